//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - MongoDB connection
//! - One repository per collection
//! - Unit of Work handing the repositories out

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::Database;
pub use repositories::{
    AidRequestRepository, CampaignRepository, UserRepository, VolunteerRepository, WriteOutcome,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(test)]
pub use unit_of_work::TestUnitOfWork;
