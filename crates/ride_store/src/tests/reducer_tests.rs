use serde_json::json;
use shared::domain::RideId;

use super::*;

fn ride(id: i64, origin: &str) -> Ride {
    Ride::new(RideId(id)).with_field("origin", origin)
}

fn apply_all(actions: &[Action]) -> AppState {
    actions
        .iter()
        .fold(AppState::default(), |state, action| reduce(&state, action))
}

#[test]
fn request_actions_only_raise_loading_flag() {
    let loaded = reduce_rides(
        Arc::new(RidesState::default()),
        &Action::LoadAllOk {
            rides: vec![ride(1, "Lisbon")],
        },
    );

    for action in [
        Action::LoadAll,
        Action::Create { data: json!({}) },
        Action::Update {
            data: json!({}),
            id: RideId(1),
        },
        Action::Delete { id: RideId(1) },
    ] {
        let next = reduce_rides(Arc::clone(&loaded), &action);
        assert!(next.is_loading, "{} should mark loading", action.label());
        assert_eq!(next.rides, loaded.rides);
        assert_eq!(next.error, None);
    }
}

#[test]
fn load_all_ok_replaces_rides_wholesale() {
    let state = apply_all(&[
        Action::LoadAllOk {
            rides: vec![ride(1, "Lisbon"), ride(2, "Porto")],
        },
        Action::LoadAll,
        Action::LoadAllOk {
            rides: vec![ride(3, "Faro")],
        },
    ]);

    assert_eq!(state.rides.rides, vec![ride(3, "Faro")]);
    assert!(!state.rides.is_loading);
}

#[test]
fn create_ok_appends_to_the_end() {
    let state = apply_all(&[
        Action::LoadAllOk {
            rides: vec![ride(1, "Lisbon")],
        },
        Action::Create {
            data: json!({"origin": "Braga"}),
        },
        Action::create_ok(ride(7, "Braga")),
    ]);

    let ids: Vec<_> = state.rides.rides.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RideId(1), RideId(7)]);
    assert!(!state.rides.is_loading);
}

#[test]
fn update_ok_replaces_in_place_preserving_order() {
    let state = apply_all(&[
        Action::LoadAllOk {
            rides: vec![ride(1, "Lisbon"), ride(2, "Porto"), ride(3, "Faro")],
        },
        Action::update_ok(ride(2, "Coimbra")),
    ]);

    assert_eq!(
        state.rides.rides,
        vec![ride(1, "Lisbon"), ride(2, "Coimbra"), ride(3, "Faro")]
    );
}

#[test]
fn update_ok_for_unknown_ride_leaves_collection_unchanged() {
    let before = apply_all(&[Action::LoadAllOk {
        rides: vec![ride(1, "Lisbon"), ride(2, "Porto")],
    }]);
    let after = reduce(&before, &Action::update_ok(ride(99, "Nowhere")));

    assert_eq!(after.rides.rides, before.rides.rides);
}

#[test]
fn delete_ok_removes_matching_ride_and_keeps_order() {
    let a = ride(1, "Lisbon");
    let b = ride(2, "Porto");
    let state = apply_all(&[
        Action::LoadAllOk {
            rides: vec![a.clone(), b.clone()],
        },
        Action::Delete { id: a.id },
        Action::delete_ok(a.id),
    ]);

    assert_eq!(state.rides.rides, vec![b]);
    assert!(!state.rides.is_loading);
}

#[test]
fn failures_record_error_and_keep_stale_data() {
    let loaded = apply_all(&[
        Action::LoadAllOk {
            rides: vec![ride(1, "Lisbon")],
        },
        Action::LoadOneOk {
            ride: ride(1, "Lisbon"),
        },
    ]);

    for error_action in [
        Action::LoadAllErr { error: "e".into() },
        Action::CreateErr { error: "e".into() },
        Action::UpdateErr { error: "e".into() },
        Action::DeleteErr { error: "e".into() },
    ] {
        let loading = reduce(&loaded, &Action::LoadAll);
        let next = reduce(&loading, &error_action);
        assert!(!next.rides.is_loading);
        assert_eq!(next.rides.error.as_deref(), Some("e"));
        assert_eq!(next.rides.rides, loaded.rides.rides);
    }

    let next = reduce(
        &reduce(&loaded, &Action::LoadOne { id: RideId(1) }),
        &Action::LoadOneErr {
            error: "gone".into(),
        },
    );
    assert!(!next.ride.is_loading);
    assert_eq!(next.ride.error.as_deref(), Some("gone"));
    assert_eq!(next.ride.ride, Some(ride(1, "Lisbon")));
}

#[test]
fn success_does_not_clear_previous_error() {
    let state = apply_all(&[
        Action::LoadAllErr {
            error: "offline".into(),
        },
        Action::LoadAllOk {
            rides: vec![ride(1, "Lisbon")],
        },
    ]);

    assert_eq!(state.rides.error.as_deref(), Some("offline"));
    assert_eq!(state.rides.rides.len(), 1);
}

#[test]
fn entity_reducer_tracks_single_ride() {
    let state = apply_all(&[
        Action::LoadOne { id: RideId(5) },
        Action::LoadOneOk {
            ride: ride(5, "Evora"),
        },
    ]);

    assert_eq!(state.ride.ride, Some(ride(5, "Evora")));
    assert!(!state.ride.is_loading);
    assert_eq!(state.rides.rides, Vec::<Ride>::new());
}

#[test]
fn unhandled_actions_return_the_same_reference() {
    let state = AppState::default();

    let rides = reduce_rides(Arc::clone(&state.rides), &Action::LoadOne { id: RideId(1) });
    assert!(Arc::ptr_eq(&rides, &state.rides));

    let single = reduce_ride(Arc::clone(&state.ride), &Action::LoadAll);
    assert!(Arc::ptr_eq(&single, &state.ride));

    let single = reduce_ride(Arc::clone(&state.ride), &Action::delete_ok(RideId(1)));
    assert!(Arc::ptr_eq(&single, &state.ride));
}

#[test]
fn same_sequence_yields_same_state() {
    let actions = vec![
        Action::LoadAll,
        Action::LoadAllOk {
            rides: vec![ride(1, "Lisbon"), ride(2, "Porto")],
        },
        Action::Create { data: json!({}) },
        Action::create_ok(ride(3, "Faro")),
        Action::update_ok(ride(1, "Sintra")),
        Action::DeleteErr {
            error: "locked".into(),
        },
        Action::delete_ok(RideId(2)),
        Action::LoadOne { id: RideId(3) },
        Action::LoadOneOk {
            ride: ride(3, "Faro"),
        },
    ];

    let first = apply_all(&actions);
    let second = apply_all(&actions);

    assert_eq!(*first.rides, *second.rides);
    assert_eq!(*first.ride, *second.ride);
    assert_eq!(
        first.rides.rides,
        vec![ride(1, "Sintra"), ride(3, "Faro")]
    );
}
