//! Raw resource values and their null sentinels

use std::fmt::Debug;

/// A raw handle value as handed out by a manual allocate/free interface
///
/// Raw handles are plain values (pointers, descriptors, ids), so the trait
/// requires `Copy`. Each type names the sentinel that means "no resource";
/// a handle holding a null value never runs its deleter.
///
/// The integer impls pick one convention per type: `-1` for signed and `0`
/// for unsigned. An interface with a different sentinel should wrap its
/// values in `Option` or a newtype implementing this trait.
pub trait RawResource: Copy + Debug {
    /// The sentinel value for "no resource"
    fn null() -> Self;

    /// Returns true if this value is a sentinel
    fn is_null(&self) -> bool;
}

impl<P> RawResource for *mut P {
    fn null() -> Self {
        std::ptr::null_mut()
    }

    fn is_null(&self) -> bool {
        <*mut P>::is_null(*self)
    }
}

impl<P> RawResource for *const P {
    fn null() -> Self {
        std::ptr::null()
    }

    fn is_null(&self) -> bool {
        <*const P>::is_null(*self)
    }
}

impl<R: Copy + Debug> RawResource for Option<R> {
    fn null() -> Self {
        None
    }

    fn is_null(&self) -> bool {
        self.is_none()
    }
}

// Signed integers follow the descriptor convention: exactly -1 is the
// sentinel. Other negative values are left to the deleter.
macro_rules! descriptor_resource {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RawResource for $ty {
                fn null() -> Self {
                    -1
                }

                fn is_null(&self) -> bool {
                    *self == -1
                }
            }
        )*
    };
}

// Unsigned integers are opaque ids where 0 means "none".
macro_rules! id_resource {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RawResource for $ty {
                fn null() -> Self {
                    0
                }

                fn is_null(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

descriptor_resource!(i8, i16, i32, i64, isize);
id_resource!(u8, u16, u32, u64, usize);
