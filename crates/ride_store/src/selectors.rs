//! Read-side views over the store state.
//!
//! Memoized selectors cache their last output together with the input `Arc` and
//! only rerun the projector when a different `Arc` comes in.

use std::sync::Arc;

use shared::domain::Ride;

use crate::state::{AppState, RideState, RidesState};

pub fn select_rides_state(state: &AppState) -> Arc<RidesState> {
    Arc::clone(&state.rides)
}

pub fn select_ride_state(state: &AppState) -> Arc<RideState> {
    Arc::clone(&state.ride)
}

pub struct Memoized<S, T> {
    projector: fn(&S) -> T,
    last: Option<(Arc<S>, T)>,
    recomputations: usize,
}

impl<S, T: Clone> Memoized<S, T> {
    pub fn new(projector: fn(&S) -> T) -> Self {
        Self {
            projector,
            last: None,
            recomputations: 0,
        }
    }

    pub fn select(&mut self, input: &Arc<S>) -> T {
        if let Some((cached_input, output)) = &self.last {
            if Arc::ptr_eq(cached_input, input) {
                return output.clone();
            }
        }

        let output = (self.projector)(input);
        self.recomputations += 1;
        self.last = Some((Arc::clone(input), output.clone()));
        output
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

/// The selectors a ride screen reads from.
pub struct RideSelectors {
    all_rides: Memoized<RidesState, Arc<[Ride]>>,
    single_ride: Memoized<RideState, Option<Ride>>,
}

impl Default for RideSelectors {
    fn default() -> Self {
        Self::new()
    }
}

impl RideSelectors {
    pub fn new() -> Self {
        Self {
            all_rides: Memoized::new(|state: &RidesState| Arc::from(state.rides.as_slice())),
            single_ride: Memoized::new(|state: &RideState| state.ride.clone()),
        }
    }

    pub fn all_rides(&mut self, state: &AppState) -> Arc<[Ride]> {
        self.all_rides.select(&state.rides)
    }

    pub fn single_ride(&mut self, state: &AppState) -> Option<Ride> {
        self.single_ride.select(&state.ride)
    }

    pub fn all_rides_recomputations(&self) -> usize {
        self.all_rides.recomputations()
    }

    pub fn single_ride_recomputations(&self) -> usize {
        self.single_ride.recomputations()
    }
}

pub fn rides_loading(state: &AppState) -> bool {
    state.rides.is_loading
}

pub fn rides_error(state: &AppState) -> Option<&str> {
    state.rides.error.as_deref()
}

pub fn ride_loading(state: &AppState) -> bool {
    state.ride.is_loading
}

pub fn ride_error(state: &AppState) -> Option<&str> {
    state.ride.error.as_deref()
}

#[cfg(test)]
#[path = "tests/selectors_tests.rs"]
mod tests;
