//! Client-side state management for rides: actions, reducers, effects and
//! selectors wired together by [`RideStore`].

pub mod action;
mod dispatch;
mod effects;
pub mod error;
pub mod notify;
pub mod reducer;
pub mod selectors;
pub mod service;
pub mod state;
pub mod store;

pub use action::{Action, CommandKind};
pub use dispatch::Dispatcher;
pub use error::{ServiceError, StoreError, UNKNOWN_ERROR_MESSAGE};
pub use notify::{Alert, AlertLevel, ChannelNotifier, Notifier, TracingNotifier};
pub use selectors::RideSelectors;
pub use service::{HttpRidesService, RidesService};
pub use state::{AppState, RideState, RidesState};
pub use store::{wait_for_outcome, RideStore};

#[cfg(test)]
#[path = "tests/support.rs"]
mod tests_support;
