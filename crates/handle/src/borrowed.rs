use crate::raw::RawResource;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

/// A read-only view of the raw value inside an [`OwningHandle`]
///
/// The lifetime binds the view itself: a `Borrowed` cannot outlive the handle
/// it was taken from. The raw `T` copied out with [`get`](Self::get) or
/// `*view` is a plain value with no lifetime, so the borrow checker does not
/// stop it from being kept past the handle's cleanup. The view carries no
/// ownership; use [`OwningHandle::release`] to hand a resource to code that
/// frees it.
///
/// The view itself is rejected once the handle is gone:
///
/// ```compile_fail
/// # use ownhandle::OwningHandle;
/// let view = {
///     let handle = OwningHandle::new(3u32, |_id: u32| {});
///     handle.view()
/// };
/// ```
///
/// [`OwningHandle`]: crate::OwningHandle
/// [`OwningHandle::release`]: crate::OwningHandle::release
#[derive(Clone, Copy)]
pub struct Borrowed<'a, T: RawResource> {
    resource: T,
    _handle: PhantomData<&'a ()>,
}

impl<'a, T: RawResource> Borrowed<'a, T> {
    pub(crate) fn new(resource: T) -> Self {
        Self {
            resource,
            _handle: PhantomData,
        }
    }

    /// The raw value, for passing to a call that only uses it
    pub fn get(&self) -> T {
        self.resource
    }

    pub fn is_null(&self) -> bool {
        self.resource.is_null()
    }
}

impl<T: RawResource> Deref for Borrowed<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.resource
    }
}

impl<T: RawResource> fmt::Debug for Borrowed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Borrowed").field(&self.resource).finish()
    }
}
