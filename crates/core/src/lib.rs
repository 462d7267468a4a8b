//! Core types, errors, and constants shared by the `ownhandle` crates.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the `Error` enum and `Result` alias used for
//!   cleanup failures and configuration problems.
//! - **`policy`**: The `CleanupPolicy` that decides what happens when a
//!   deleter fails while a handle is being dropped, plus the process-wide
//!   default.
//! - **`constants`**: Environment variable names and other shared constants.

pub mod constants;
pub mod errors;
pub mod policy;

pub use self::{
    constants::*,
    errors::{BoxError, Error, Result},
    policy::{default_cleanup_policy, set_default_cleanup_policy, CleanupPolicy},
};
