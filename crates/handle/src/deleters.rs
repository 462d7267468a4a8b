//! Deleters for resources handed out by the C runtime
//!
//! The deleter types can only be obtained through the `unsafe` adopt
//! functions, since binding them to an arbitrary value would free memory or
//! close descriptors this process never owned.

use crate::cleanup::Cleanup;
use crate::handle::OwningHandle;
use ownhandle_core::BoxError;

/// Releases memory obtained from `malloc`, `calloc`, `realloc` or `strdup`
#[derive(Debug)]
pub struct Free(());

impl<P> Cleanup<*mut P> for Free {
    fn cleanup(self, resource: *mut P) -> Result<(), BoxError> {
        // SAFETY: `Free` only exists inside handles built by `adopt_malloced`,
        // whose caller vouched that the pointer came from the C allocator.
        unsafe { libc::free(resource.cast()) };
        Ok(())
    }
}

/// A handle over memory from the C allocator
pub type MallocHandle<P> = OwningHandle<*mut P, Free>;

/// Takes ownership of memory from the C allocator
///
/// A null `ptr` yields a handle that frees nothing.
///
/// # Safety
/// The caller must ensure that:
/// - `ptr` is null or was returned by the C allocator
/// - The memory has not been freed already
/// - Nothing else will free it
pub unsafe fn adopt_malloced<P>(ptr: *mut P) -> MallocHandle<P> {
    OwningHandle::new(ptr, Free(()))
}

#[cfg(unix)]
pub use self::fd::{adopt_fd, Close, FdHandle};

#[cfg(unix)]
mod fd {
    use super::*;
    use std::io;
    use std::os::fd::RawFd;

    /// Closes a file descriptor, reporting a failed `close(2)`
    #[derive(Debug)]
    pub struct Close(());

    impl Cleanup<RawFd> for Close {
        fn cleanup(self, fd: RawFd) -> Result<(), BoxError> {
            if fd < 0 {
                return Ok(());
            }
            // SAFETY: `Close` only exists inside handles built by `adopt_fd`,
            // whose caller transferred ownership of the descriptor.
            if unsafe { libc::close(fd) } == 0 {
                Ok(())
            } else {
                Err(io::Error::last_os_error().into())
            }
        }
    }

    /// A handle over an open file descriptor
    pub type FdHandle = OwningHandle<RawFd, Close>;

    /// Takes ownership of an open file descriptor
    ///
    /// # Safety
    /// The caller must ensure that:
    /// - `fd` is negative or an open descriptor
    /// - Nothing else will close it
    pub unsafe fn adopt_fd(fd: RawFd) -> FdHandle {
        OwningHandle::new(fd, Close(()))
    }
}
