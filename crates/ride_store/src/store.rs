use std::sync::Arc;

use tokio::{
    sync::{broadcast, mpsc, watch},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    action::{Action, CommandKind},
    dispatch::{Dispatcher, Envelope},
    effects::EffectRunner,
    error::StoreError,
    notify::Notifier,
    reducer::reduce,
    service::RidesService,
    state::AppState,
};

const ACTION_LOG_CAPACITY: usize = 256;

pub struct RideStore {
    dispatcher: Dispatcher,
    state: watch::Receiver<AppState>,
    actions: broadcast::Sender<Action>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RideStore {
    /// Starts the dispatch loop on the current tokio runtime.
    pub fn spawn(service: Arc<dyn RidesService>, notifier: Arc<dyn Notifier>) -> Self {
        let (dispatcher, queue) = Dispatcher::channel();
        let (state_tx, state) = watch::channel(AppState::default());
        let (actions, _) = broadcast::channel(ACTION_LOG_CAPACITY);
        let shutdown = CancellationToken::new();

        let runner = EffectRunner::new(service, notifier, dispatcher.clone());
        let task = tokio::spawn(run_loop(
            queue,
            state_tx,
            actions.clone(),
            runner,
            shutdown.clone(),
        ));

        Self {
            dispatcher,
            state,
            actions,
            shutdown,
            task: Some(task),
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        self.dispatcher.dispatch(action)
    }

    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<AppState> {
        self.state.clone()
    }

    /// Every action after it went through the reducers, in order.
    pub fn subscribe_actions(&self) -> broadcast::Receiver<Action> {
        self.actions.subscribe()
    }

    /// Dispatches a request action and waits for the success or failure that answers it.
    ///
    /// The outcome has already been reduced when this returns. If a newer command of
    /// the same kind supersedes this one, the newer command's outcome is returned.
    /// Non-request actions are dispatched and handed back as is.
    pub async fn dispatch_and_wait(&self, action: Action) -> Result<Action, StoreError> {
        if action.command_kind().is_none() {
            self.dispatch(action.clone())?;
            return Ok(action);
        }
        let outcome = self.dispatcher.dispatch_with_reply(action)?;
        outcome.await.map_err(|_| StoreError::Closed)
    }

    pub async fn shutdown(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(error = %err, "ride store loop ended abnormally");
            }
        }
    }
}

impl Drop for RideStore {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Waits on an action subscription for the next outcome of `kind`, whichever
/// request it answers.
pub async fn wait_for_outcome(
    actions: &mut broadcast::Receiver<Action>,
    kind: CommandKind,
) -> Result<Action, StoreError> {
    loop {
        match actions.recv().await {
            Ok(action) if action.outcome_of() == Some(kind) => return Ok(action),
            Ok(_) => continue,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!(skipped, "action subscriber lagged");
            }
            Err(broadcast::error::RecvError::Closed) => return Err(StoreError::Closed),
        }
    }
}

async fn run_loop(
    mut queue: mpsc::UnboundedReceiver<Envelope>,
    state_tx: watch::Sender<AppState>,
    actions: broadcast::Sender<Action>,
    mut runner: EffectRunner,
    shutdown: CancellationToken,
) {
    let mut state = AppState::default();

    loop {
        let envelope = tokio::select! {
            _ = shutdown.cancelled() => break,
            next = queue.recv() => match next {
                Some(envelope) => envelope,
                None => break,
            },
        };

        let Envelope {
            action,
            ticket,
            reply,
        } = envelope;

        let mut waiters = Vec::new();
        if let Some(ticket) = ticket {
            match runner.accept(ticket) {
                Some(settled) => waiters = settled,
                None => {
                    debug!(
                        action = action.label(),
                        generation = ticket.generation,
                        "discarding superseded response"
                    );
                    continue;
                }
            }
        }

        debug!(action = action.label(), "reducing");

        let next = reduce(&state, &action);
        if !next.same_as(&state) {
            state = next;
            state_tx.send_replace(state.clone());
        }

        let _ = actions.send(action.clone());
        for waiter in waiters {
            let _ = waiter.send(action.clone());
        }
        runner.run(&action, reply);
    }

    runner.cancel_all();
    info!("ride store stopped");
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
