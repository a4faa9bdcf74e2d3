//! Domain layer - Core business entities and logic
//!
//! Documents for the four collections, their status lifecycles, and the
//! payloads accepted when they are created.

pub mod aid_request;
pub mod campaign;
pub mod user;
pub mod volunteer;

use bson::oid::ObjectId;
use serde_json::{Map, Value};

use crate::errors::{AppError, AppResult};

pub use aid_request::{AidRequest, AidRequestResponse, NewAidRequest, RequestStatus};
pub use campaign::{Campaign, CampaignResponse, CampaignStatus, NewCampaign};
pub use user::{NewUser, User, UserRole};
pub use volunteer::{
    NewVolunteerApplication, VolunteerApplication, VolunteerApplicationResponse, VolunteerStatus,
};

/// Free-form fields submitted alongside the typed ones.
pub type Details = Map<String, Value>;

/// Parse a document id taken from a URL.
///
/// A malformed id cannot match any document, so it is reported the same
/// way as a well-formed id that does not exist.
pub fn parse_object_id(raw: &str, entity: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::not_found(entity))
}

/// Drop keys the server owns from client-submitted details.
pub(crate) fn strip_reserved(mut details: Details, reserved: &[&str]) -> Details {
    for key in reserved {
        details.remove(*key);
    }
    details
}

/// Render an optional id for responses.
pub(crate) fn id_to_hex(id: Option<ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}
