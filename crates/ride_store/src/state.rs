use std::sync::Arc;

use shared::domain::Ride;

/// Collection view: every ride loaded or created in this session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RidesState {
    pub rides: Vec<Ride>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Single-entity view, filled by `LoadOne`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RideState {
    pub ride: Option<Ride>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Snapshot of everything the store owns.
///
/// An unchanged slice keeps its `Arc`, so pointer equality tells readers
/// whether a slice moved since they last looked.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub rides: Arc<RidesState>,
    pub ride: Arc<RideState>,
}

impl AppState {
    pub fn same_as(&self, other: &AppState) -> bool {
        Arc::ptr_eq(&self.rides, &other.rides) && Arc::ptr_eq(&self.ride, &other.ride)
    }
}
