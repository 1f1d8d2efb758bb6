//! Side effects triggered by reduced actions.
//!
//! Request actions start a service call on a spawned task; its outcome comes
//! back through the dispatcher tagged with a [`Ticket`]. Each command kind keeps
//! one live call: starting another cancels the previous one and bumps the
//! generation, so a late answer from the old call is refused by [`EffectRunner::accept`].
//! Callers waiting on a superseded request are carried over and receive the
//! outcome of the call that replaced it.

use std::{collections::HashMap, sync::Arc};

use futures::{future::BoxFuture, FutureExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    action::{Action, CommandKind},
    dispatch::{Dispatcher, Reply, Ticket},
    error::ServiceError,
    notify::{AlertLevel, Notifier},
    service::RidesService,
};

#[derive(Default)]
struct InFlight {
    generation: u64,
    token: Option<CancellationToken>,
    waiters: Vec<Reply>,
}

pub(crate) struct EffectRunner {
    service: Arc<dyn RidesService>,
    notifier: Arc<dyn Notifier>,
    dispatcher: Dispatcher,
    in_flight: HashMap<CommandKind, InFlight>,
}

impl EffectRunner {
    pub(crate) fn new(
        service: Arc<dyn RidesService>,
        notifier: Arc<dyn Notifier>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            service,
            notifier,
            dispatcher,
            in_flight: HashMap::new(),
        }
    }

    /// Settles the slot when an outcome still answers the latest call of its
    /// kind, handing back the callers waiting on it. `None` means stale.
    pub(crate) fn accept(&mut self, ticket: Ticket) -> Option<Vec<Reply>> {
        let slot = self.in_flight.get_mut(&ticket.kind)?;
        if slot.generation != ticket.generation || slot.token.is_none() {
            return None;
        }
        slot.token = None;
        Some(std::mem::take(&mut slot.waiters))
    }

    pub(crate) fn run(&mut self, action: &Action, reply: Option<Reply>) {
        if let Some(message) = action.success_message() {
            self.notifier.notify(message, AlertLevel::Success);
        }
        if let Some(error) = action.failure_message() {
            self.notifier.notify(error, AlertLevel::Error);
        }

        if let Some((kind, call)) = service_call(Arc::clone(&self.service), action) {
            self.start(kind, call, reply);
        }
    }

    pub(crate) fn cancel_all(&mut self) {
        for slot in self.in_flight.values_mut() {
            if let Some(token) = slot.token.take() {
                token.cancel();
            }
            slot.waiters.clear();
        }
    }

    fn start(&mut self, kind: CommandKind, call: BoxFuture<'static, Action>, reply: Option<Reply>) {
        let slot = self.in_flight.entry(kind).or_default();
        slot.waiters.extend(reply);
        if let Some(previous) = slot.token.take() {
            debug!(kind = kind.as_str(), generation = slot.generation, "superseding in-flight call");
            previous.cancel();
        }
        slot.generation += 1;

        let token = CancellationToken::new();
        slot.token = Some(token.clone());
        let ticket = Ticket {
            kind,
            generation: slot.generation,
        };
        let dispatcher = self.dispatcher.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(kind = kind.as_str(), generation = ticket.generation, "service call cancelled");
                }
                outcome = call => {
                    if dispatcher.dispatch_outcome(outcome, ticket).is_err() {
                        debug!(kind = kind.as_str(), "store closed before outcome was delivered");
                    }
                }
            }
        });
    }
}

fn service_call(
    service: Arc<dyn RidesService>,
    action: &Action,
) -> Option<(CommandKind, BoxFuture<'static, Action>)> {
    let kind = action.command_kind()?;
    let call = match action.clone() {
        Action::LoadAll => async move {
            match service.get_all().await {
                Ok(rides) => Action::LoadAllOk { rides },
                Err(err) => Action::LoadAllErr {
                    error: failure_text(CommandKind::LoadAll, &err),
                },
            }
        }
        .boxed(),
        Action::LoadOne { id } => async move {
            match service.get_one(id).await {
                Ok(ride) => Action::LoadOneOk { ride },
                Err(err) => Action::LoadOneErr {
                    error: failure_text(CommandKind::LoadOne, &err),
                },
            }
        }
        .boxed(),
        Action::Create { data } => async move {
            match service.create(&data).await {
                Ok(ride) => Action::create_ok(ride),
                Err(err) => Action::CreateErr {
                    error: failure_text(CommandKind::Create, &err),
                },
            }
        }
        .boxed(),
        Action::Update { data, id } => async move {
            match service.update(&data, id).await {
                Ok(ride) => Action::update_ok(ride),
                Err(err) => Action::UpdateErr {
                    error: failure_text(CommandKind::Update, &err),
                },
            }
        }
        .boxed(),
        Action::Delete { id } => async move {
            match service.delete(id).await {
                Ok(()) => Action::delete_ok(id),
                Err(err) => Action::DeleteErr {
                    error: failure_text(CommandKind::Delete, &err),
                },
            }
        }
        .boxed(),
        _ => return None,
    };
    Some((kind, call))
}

fn failure_text(kind: CommandKind, err: &ServiceError) -> String {
    warn!(kind = kind.as_str(), error = %err, "ride service call failed");
    err.user_message()
}

#[cfg(test)]
#[path = "tests/effects_tests.rs"]
mod tests;
