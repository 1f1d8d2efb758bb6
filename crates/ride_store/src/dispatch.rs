use tokio::sync::{mpsc, oneshot};

use crate::{
    action::{Action, CommandKind},
    error::StoreError,
};

/// Identifies the service call an outcome action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    pub kind: CommandKind,
    pub generation: u64,
}

pub(crate) type Reply = oneshot::Sender<Action>;

#[derive(Debug)]
pub(crate) struct Envelope {
    pub action: Action,
    pub ticket: Option<Ticket>,
    /// Receives the outcome that settles this request.
    pub reply: Option<Reply>,
}

#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl Dispatcher {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<Envelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        self.send(Envelope {
            action,
            ticket: None,
            reply: None,
        })
    }

    pub(crate) fn dispatch_with_reply(
        &self,
        action: Action,
    ) -> Result<oneshot::Receiver<Action>, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.send(Envelope {
            action,
            ticket: None,
            reply: Some(reply),
        })?;
        Ok(rx)
    }

    pub(crate) fn dispatch_outcome(&self, action: Action, ticket: Ticket) -> Result<(), StoreError> {
        self.send(Envelope {
            action,
            ticket: Some(ticket),
            reply: None,
        })
    }

    fn send(&self, envelope: Envelope) -> Result<(), StoreError> {
        self.tx.send(envelope).map_err(|_| StoreError::Closed)
    }
}
