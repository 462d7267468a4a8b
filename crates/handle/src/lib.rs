//! Single-owner RAII handles for manually managed resources
//!
//! Interfaces built on allocate/free pairs (raw pointers, descriptors, opaque
//! ids) leave it to the caller to free each resource exactly once. This crate
//! binds such a resource to its deleter in an [`OwningHandle`], which runs the
//! deleter when the handle goes out of scope, on every exit path, unless
//! ownership is explicitly released.
//!
//! ```
//! use ownhandle::make_resource;
//!
//! fn legacy_read(fd: i32) -> i32 { fd }
//!
//! let handle = make_resource(7, |fd: i32| println!("closing {fd}"));
//! assert_eq!(legacy_read(*handle), 7);
//! // `closing 7` is printed here, exactly once
//! ```
//!
//! Borrowing the raw value (`get`, `view`, `*handle`) never gives up
//! ownership. Handing a resource to code that frees it goes through
//! [`OwningHandle::release`].
//!
//! Deleter failures on the drop path are handled by a [`CleanupPolicy`];
//! see [`ownhandle_core::policy`].

pub mod borrowed;
pub mod cleanup;
pub mod deleters;
pub mod handle;
pub mod raw;

pub use borrowed::Borrowed;
pub use cleanup::{Cleanup, CleanupOutcome};
pub use handle::{make_resource, DynOwningHandle, OwningHandle};
pub use ownhandle_core::{
    default_cleanup_policy, set_default_cleanup_policy, CleanupPolicy, Error, Result,
};
pub use raw::RawResource;
