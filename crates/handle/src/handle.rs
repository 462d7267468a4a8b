//! Single-owner handle that runs a deleter exactly once

use crate::borrowed::Borrowed;
use crate::cleanup::{self, Cleanup};
use crate::raw::RawResource;
use ownhandle_core::{default_cleanup_policy, CleanupPolicy, Result};
use std::fmt;
use std::mem;
use std::ops::Deref;

/// Owns a raw resource and releases it with a bound deleter when dropped
///
/// The deleter runs exactly once, on every way out of the owning scope
/// (normal return, early return through `?`, unwinding), unless ownership
/// is given up with [`release`](Self::release) or [`into_raw`](Self::into_raw).
/// A handle holding the null sentinel of `T` never runs its deleter.
///
/// The handle is move-only. Moving it transfers the obligation; assigning a
/// new handle over a live one drops the old one first, so its resource is
/// released before the new one is absorbed.
///
/// # Raw access
///
/// [`get`](Self::get), [`view`](Self::view) and `*handle` give out the raw
/// value without giving up ownership. Do not pass that value to a function
/// that frees or keeps it, or it will be freed twice. Release instead:
///
/// ```
/// # use ownhandle::OwningHandle;
/// # fn legacy_consume(_id: u32) {}
/// let mut handle = OwningHandle::new(42u32, |id: u32| legacy_consume(id));
/// legacy_consume(handle.release());
/// ```
///
/// # Threads
///
/// `OwningHandle` is `Send`/`Sync` exactly when `T` and `D` are, so handles
/// over raw pointers stay on the thread that created them. Sharing a resource
/// between threads needs a synchronized owner around the handle.
pub struct OwningHandle<T: RawResource, D: Cleanup<T>> {
    resource: T,
    cleanup: Option<D>,
    policy: Option<CleanupPolicy>,
}

/// A handle whose deleter is boxed, so handles with different deleters share a type
pub type DynOwningHandle<T> = OwningHandle<T, Box<dyn FnOnce(T) + Send + 'static>>;

/// Binds `resource` to `cleanup`, inferring the deleter type
pub fn make_resource<T, D>(resource: T, cleanup: D) -> OwningHandle<T, D>
where
    T: RawResource,
    D: Cleanup<T>,
{
    OwningHandle::new(resource, cleanup)
}

impl<T: RawResource, D: Cleanup<T>> OwningHandle<T, D> {
    /// Takes ownership of `resource`, to be released by `cleanup`
    ///
    /// A null `resource` still yields an owning handle, but its deleter will
    /// never run. That usually means the value came from a failed call or the
    /// interface uses a different sentinel, so it is reported as a warning.
    pub fn new(resource: T, cleanup: D) -> Self {
        if resource.is_null() {
            tracing::warn!(resource = ?resource, "captured a null resource, its cleanup will not run");
        } else {
            tracing::trace!(resource = ?resource, "captured resource");
        }
        Self {
            resource,
            cleanup: Some(cleanup),
            policy: None,
        }
    }

    /// A handle that owns nothing
    pub fn empty() -> Self {
        Self {
            resource: T::null(),
            cleanup: None,
            policy: None,
        }
    }

    /// Overrides the process-wide cleanup policy for this handle
    #[must_use]
    pub fn with_policy(mut self, policy: CleanupPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// The policy applied if the deleter fails during drop
    pub fn policy(&self) -> CleanupPolicy {
        self.policy.unwrap_or_else(default_cleanup_policy)
    }

    /// The raw value. Ownership stays with the handle.
    pub fn get(&self) -> T {
        self.resource
    }

    /// A view of the raw value that cannot outlive the handle
    pub fn view(&self) -> Borrowed<'_, T> {
        Borrowed::new(self.resource)
    }

    pub fn is_null(&self) -> bool {
        self.resource.is_null()
    }

    /// True until the resource is released or moved out with [`take`](Self::take)
    pub fn owns(&self) -> bool {
        self.cleanup.is_some()
    }

    /// Gives up ownership and returns the raw value
    ///
    /// The deleter is dropped without being called and the handle is left
    /// holding the null sentinel, so calling this again returns the sentinel.
    pub fn release(&mut self) -> T {
        let resource = mem::replace(&mut self.resource, T::null());
        if self.cleanup.take().is_some() {
            tracing::trace!(resource = ?resource, "released resource");
        }
        resource
    }

    /// Consuming form of [`release`](Self::release)
    pub fn into_raw(mut self) -> T {
        self.release()
    }

    /// Moves ownership into a new handle, leaving this one empty
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    /// Runs the deleter now and returns its failure instead of applying the policy
    pub fn dispose(mut self) -> Result<()> {
        match self.take_obligation() {
            Some((resource, cleanup)) => cleanup::invoke(cleanup, resource),
            None => Ok(()),
        }
    }

    // Leaves the handle empty and hands back the pending cleanup, if any
    fn take_obligation(&mut self) -> Option<(T, D)> {
        let resource = mem::replace(&mut self.resource, T::null());
        let cleanup = self.cleanup.take()?;
        if resource.is_null() {
            return None;
        }
        Some((resource, cleanup))
    }
}

impl<T: RawResource> OwningHandle<T, Box<dyn FnOnce(T) + Send + 'static>> {
    /// Like [`new`](Self::new), boxing the deleter
    pub fn boxed<F>(resource: T, cleanup: F) -> Self
    where
        F: FnOnce(T) + Send + 'static,
    {
        Self::new(resource, Box::new(cleanup))
    }
}

impl<T: RawResource, D: Cleanup<T>> Drop for OwningHandle<T, D> {
    fn drop(&mut self) {
        let policy = self.policy;
        if let Some((resource, cleanup)) = self.take_obligation() {
            if let Err(error) = cleanup::invoke(cleanup, resource) {
                cleanup::report_failure(error, policy.unwrap_or_else(default_cleanup_policy));
            }
        }
    }
}

impl<T: RawResource, D: Cleanup<T>> Default for OwningHandle<T, D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: RawResource, D: Cleanup<T>> Deref for OwningHandle<T, D> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.resource
    }
}

impl<T: RawResource, D: Cleanup<T>> AsRef<T> for OwningHandle<T, D> {
    fn as_ref(&self) -> &T {
        &self.resource
    }
}

#[cfg(unix)]
impl<D: Cleanup<std::os::fd::RawFd>> std::os::fd::AsRawFd for OwningHandle<std::os::fd::RawFd, D> {
    fn as_raw_fd(&self) -> std::os::fd::RawFd {
        self.resource
    }
}

impl<T: RawResource, D: Cleanup<T>> fmt::Debug for OwningHandle<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwningHandle")
            .field("resource", &self.resource)
            .field("owns", &self.owns())
            .field("policy", &self.policy)
            .finish()
    }
}
