//! Entity definitions for the review assignment service
//!
//! This crate contains Sea-ORM entity definitions for the database models:
//! teams, users and pull requests.

pub mod pull_requests;
pub mod teams;
pub mod users;

pub use pull_requests::{Entity as PullRequests, PrStatus};
pub use teams::Entity as Teams;
pub use users::Entity as Users;
