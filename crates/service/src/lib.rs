//! # Assignment Service
//!
//! The core of the review assignment system: the candidate picker and the
//! ten transactional operations over pull requests, teams and users.
//!
//! Every operation runs inside exactly one call to
//! [`storage::TxManager::with_tx`]; storage sentinels are translated into
//! the closed domain error taxonomy at this boundary.

pub mod picker;

mod service;

pub use service::AssignmentService;
