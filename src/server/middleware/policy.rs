//! Authorization rules for actions on a car.

use crate::server::model::car::Car;

/// An action an actor attempts on a car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarAction {
    Read,
    Update,
    Delete,
    UploadImages,
    Comment,
    Rate,
}

impl CarAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::UploadImages => "upload images for",
            Self::Comment => "comment on",
            Self::Rate => "rate",
        }
    }
}

/// Decides whether `actor` may perform `action` on `car`.
///
/// `actor` is the ID of the authenticated user, `None` for anonymous callers.
///
/// - Reading is open to everyone.
/// - Updating, deleting and uploading images require the actor to own the car.
/// - Commenting and rating require an authenticated actor, owner or not.
pub fn allowed(actor: Option<i32>, action: CarAction, car: &Car) -> bool {
    match action {
        CarAction::Read => true,
        CarAction::Update | CarAction::Delete | CarAction::UploadImages => {
            actor == Some(car.owner_id)
        }
        CarAction::Comment | CarAction::Rate => actor.is_some(),
    }
}
