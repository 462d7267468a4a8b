//! The deleter contract and what happens when a deleter fails
//!
//! Any `FnOnce(T)` is a deleter, and so is any `FnOnce(T) -> Result<(), E>`
//! whose error converts into [`BoxError`]. Named deleters (see
//! [`crate::deleters`]) implement [`Cleanup`] directly.

use crate::raw::RawResource;
use ownhandle_core::{BoxError, CleanupPolicy, Error, Result};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Releases a raw resource
pub trait Cleanup<T> {
    /// Consumes the deleter and releases `resource`
    fn cleanup(self, resource: T) -> std::result::Result<(), BoxError>;
}

/// Return types a deleter closure may have
pub trait CleanupOutcome {
    fn into_result(self) -> std::result::Result<(), BoxError>;
}

impl CleanupOutcome for () {
    fn into_result(self) -> std::result::Result<(), BoxError> {
        Ok(())
    }
}

impl<E> CleanupOutcome for std::result::Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_result(self) -> std::result::Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

impl<T, F, R> Cleanup<T> for F
where
    F: FnOnce(T) -> R,
    R: CleanupOutcome,
{
    fn cleanup(self, resource: T) -> std::result::Result<(), BoxError> {
        self(resource).into_result()
    }
}

/// Runs a deleter, turning both returned errors and panics into [`Error::Cleanup`]
pub(crate) fn invoke<T, D>(cleanup: D, resource: T) -> Result<()>
where
    T: RawResource,
    D: Cleanup<T>,
{
    tracing::trace!(resource = ?resource, "running cleanup");

    match panic::catch_unwind(AssertUnwindSafe(|| cleanup.cleanup(resource))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(Error::cleanup_with_source(format!("{resource:?}"), source)),
        Err(payload) => Err(Error::cleanup(
            format!("{resource:?}"),
            format!("deleter panicked: {}", panic_message(payload.as_ref())),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureAction {
    Log,
    Panic,
    Abort,
}

/// Maps a policy onto an action, never panicking on top of an unwind
pub(crate) fn failure_action(policy: CleanupPolicy, panicking: bool) -> FailureAction {
    match policy {
        CleanupPolicy::Log => FailureAction::Log,
        CleanupPolicy::Panic if panicking => FailureAction::Log,
        CleanupPolicy::Panic => FailureAction::Panic,
        CleanupPolicy::Abort => FailureAction::Abort,
    }
}

/// Reports a cleanup failure that occurred while dropping a handle
pub(crate) fn report_failure(error: Error, policy: CleanupPolicy) {
    match failure_action(policy, std::thread::panicking()) {
        FailureAction::Log => {
            tracing::error!(error = %error, policy = %policy, "resource cleanup failed during drop");
        }
        FailureAction::Panic => panic!("{error}"),
        FailureAction::Abort => {
            tracing::error!(error = %error, policy = %policy, "resource cleanup failed during drop, aborting");
            std::process::abort();
        }
    }
}
