//! Pure state transitions for the rides collection and the single-ride view.
//!
//! Both reducers take ownership of the current `Arc` and hand it back untouched
//! for actions they do not handle, so callers can use `Arc::ptr_eq` to detect
//! a no-op.

use std::sync::Arc;

use shared::domain::Ride;

use crate::{
    action::Action,
    state::{AppState, RideState, RidesState},
};

pub fn reduce(state: &AppState, action: &Action) -> AppState {
    AppState {
        rides: reduce_rides(Arc::clone(&state.rides), action),
        ride: reduce_ride(Arc::clone(&state.ride), action),
    }
}

pub fn reduce_rides(state: Arc<RidesState>, action: &Action) -> Arc<RidesState> {
    match action {
        Action::LoadAll | Action::Create { .. } | Action::Update { .. } | Action::Delete { .. } => {
            Arc::new(RidesState {
                is_loading: true,
                ..(*state).clone()
            })
        }

        Action::LoadAllOk { rides } => Arc::new(RidesState {
            rides: rides.clone(),
            is_loading: false,
            error: state.error.clone(),
        }),
        Action::CreateOk { ride, .. } => {
            let mut rides = state.rides.clone();
            rides.push(ride.clone());
            Arc::new(RidesState {
                rides,
                is_loading: false,
                error: state.error.clone(),
            })
        }
        Action::UpdateOk { ride, .. } => Arc::new(RidesState {
            rides: replace_matching(&state.rides, ride),
            is_loading: false,
            error: state.error.clone(),
        }),
        Action::DeleteOk { id, .. } => Arc::new(RidesState {
            rides: state
                .rides
                .iter()
                .filter(|existing| existing.id != *id)
                .cloned()
                .collect(),
            is_loading: false,
            error: state.error.clone(),
        }),

        Action::LoadAllErr { error }
        | Action::CreateErr { error }
        | Action::UpdateErr { error }
        | Action::DeleteErr { error } => Arc::new(RidesState {
            rides: state.rides.clone(),
            is_loading: false,
            error: Some(error.clone()),
        }),

        Action::LoadOne { .. } | Action::LoadOneOk { .. } | Action::LoadOneErr { .. } => state,
    }
}

pub fn reduce_ride(state: Arc<RideState>, action: &Action) -> Arc<RideState> {
    match action {
        Action::LoadOne { .. } => Arc::new(RideState {
            is_loading: true,
            ..(*state).clone()
        }),
        Action::LoadOneOk { ride } => Arc::new(RideState {
            ride: Some(ride.clone()),
            is_loading: false,
            error: state.error.clone(),
        }),
        Action::LoadOneErr { error } => Arc::new(RideState {
            ride: state.ride.clone(),
            is_loading: false,
            error: Some(error.clone()),
        }),
        _ => state,
    }
}

fn replace_matching(rides: &[Ride], updated: &Ride) -> Vec<Ride> {
    rides
        .iter()
        .map(|existing| {
            if existing.id == updated.id {
                updated.clone()
            } else {
                existing.clone()
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
