
use serde::{Deserialize, Serialize};
use shared::domain::{Ride, RideData, RideId};

pub const CREATE_SUCCESS_MESSAGE: &str = "Ride created successfully";
pub const UPDATE_SUCCESS_MESSAGE: &str = "Ride updated successfully";
pub const DELETE_SUCCESS_MESSAGE: &str = "Ride deleted successfully";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    LoadAll,
    LoadAllOk { rides: Vec<Ride> },
    LoadAllErr { error: String },

    LoadOne { id: RideId },
    LoadOneOk { ride: Ride },
    LoadOneErr { error: String },

    Create { data: RideData },
    CreateOk { ride: Ride, message: String },
    CreateErr { error: String },

    Update { data: RideData, id: RideId },
    UpdateOk { ride: Ride, message: String },
    UpdateErr { error: String },

    Delete { id: RideId },
    DeleteOk { id: RideId, message: String },
    DeleteErr { error: String },
}

/// The five request actions. Each kind owns its own in-flight slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    LoadAll,
    LoadOne,
    Create,
    Update,
    Delete,
}

impl CommandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::LoadAll => "load_all",
            CommandKind::LoadOne => "load_one",
            CommandKind::Create => "create",
            CommandKind::Update => "update",
            CommandKind::Delete => "delete",
        }
    }
}

impl Action {
    pub fn create_ok(ride: Ride) -> Self {
        Action::CreateOk {
            ride,
            message: CREATE_SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn update_ok(ride: Ride) -> Self {
        Action::UpdateOk {
            ride,
            message: UPDATE_SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn delete_ok(id: RideId) -> Self {
        Action::DeleteOk {
            id,
            message: DELETE_SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::LoadAll => "[Ride] Load Rides",
            Action::LoadAllOk { .. } => "[Ride] Load Rides Success",
            Action::LoadAllErr { .. } => "[Ride] Load Rides Failure",
            Action::LoadOne { .. } => "[Ride] Load Ride",
            Action::LoadOneOk { .. } => "[Ride] Load Ride Success",
            Action::LoadOneErr { .. } => "[Ride] Load Ride Failure",
            Action::Create { .. } => "[Ride] Create Ride",
            Action::CreateOk { .. } => "[Ride] Create Ride Success",
            Action::CreateErr { .. } => "[Ride] Create Ride Failure",
            Action::Update { .. } => "[Ride] Update Ride",
            Action::UpdateOk { .. } => "[Ride] Update Ride Success",
            Action::UpdateErr { .. } => "[Ride] Update Ride Failure",
            Action::Delete { .. } => "[Ride] Delete Ride",
            Action::DeleteOk { .. } => "[Ride] Delete Ride Success",
            Action::DeleteErr { .. } => "[Ride] Delete Ride Failure",
        }
    }

    /// `Some` for request actions, which are the only ones that trigger a service call.
    pub fn command_kind(&self) -> Option<CommandKind> {
        match self {
            Action::LoadAll => Some(CommandKind::LoadAll),
            Action::LoadOne { .. } => Some(CommandKind::LoadOne),
            Action::Create { .. } => Some(CommandKind::Create),
            Action::Update { .. } => Some(CommandKind::Update),
            Action::Delete { .. } => Some(CommandKind::Delete),
            _ => None,
        }
    }

    /// The kind of request this action answers, for success and failure actions.
    pub fn outcome_of(&self) -> Option<CommandKind> {
        match self {
            Action::LoadAllOk { .. } | Action::LoadAllErr { .. } => Some(CommandKind::LoadAll),
            Action::LoadOneOk { .. } | Action::LoadOneErr { .. } => Some(CommandKind::LoadOne),
            Action::CreateOk { .. } | Action::CreateErr { .. } => Some(CommandKind::Create),
            Action::UpdateOk { .. } | Action::UpdateErr { .. } => Some(CommandKind::Update),
            Action::DeleteOk { .. } | Action::DeleteErr { .. } => Some(CommandKind::Delete),
            _ => None,
        }
    }

    /// Notification text carried by mutation successes.
    pub fn success_message(&self) -> Option<&str> {
        match self {
            Action::CreateOk { message, .. }
            | Action::UpdateOk { message, .. }
            | Action::DeleteOk { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Action::LoadAllErr { error }
            | Action::LoadOneErr { error }
            | Action::CreateErr { error }
            | Action::UpdateErr { error }
            | Action::DeleteErr { error } => Some(error),
            _ => None,
        }
    }
}
