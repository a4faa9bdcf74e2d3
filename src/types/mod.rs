//! Response bodies shared across handlers.

mod response;

pub use response::{
    Created, InsertResponse, MessageResponse, RoleResponse, VolunteerReviewResponse,
};
