//! Repository layer - Data access abstraction
//!
//! One repository per collection, each a trait with a MongoDB-backed store,
//! so services can be exercised against mocks or in-memory fakes.

mod aid_request_repository;
mod campaign_repository;
mod user_repository;
mod volunteer_repository;

pub use aid_request_repository::{AidRequestRepository, AidRequestStore};
pub use campaign_repository::{CampaignRepository, CampaignStore};
pub use user_repository::{UserRepository, UserStore};
pub use volunteer_repository::{VolunteerRepository, VolunteerStore};

#[cfg(test)]
pub use aid_request_repository::MockAidRequestRepository;
#[cfg(test)]
pub use campaign_repository::MockCampaignRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use volunteer_repository::MockVolunteerRepository;

use bson::{doc, Bson};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::results::{InsertOneResult, UpdateResult};

use crate::errors::{AppError, AppResult};

/// Outcome of a single-document update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Documents the filter selected
    pub matched: u64,
    /// Documents actually changed
    pub modified: u64,
}

impl WriteOutcome {
    pub fn found(&self) -> bool {
        self.matched > 0
    }

    pub fn changed(&self) -> bool {
        self.modified > 0
    }
}

impl From<UpdateResult> for WriteOutcome {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched: result.matched_count,
            modified: result.modified_count,
        }
    }
}

/// Pull the generated id out of an insert result.
pub(crate) fn inserted_object_id(result: InsertOneResult) -> AppResult<bson::oid::ObjectId> {
    match result.inserted_id {
        Bson::ObjectId(id) => Ok(id),
        other => Err(AppError::internal(format!(
            "insert returned a non-ObjectId id: {}",
            other
        ))),
    }
}

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// Whether a write was refused by a unique index.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}

/// Sort spec shared by every "newest first" listing.
pub(crate) fn newest_first() -> bson::Document {
    doc! { "createdAt": -1 }
}
