//! Owning wrapper around an opaque native pointer.
//!
//! A [`Handle`] owns exactly one native object and releases it once: an
//! explicit `release` nulls the pointer so later calls, and the final drop,
//! are no-ops. A null handle is "unopened" and every façade reports it as
//! [`Error::NullHandle`] instead of passing it to the native side.

use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr;

use tracing::debug;

use crate::error::{Error, Result};

/// A kind of native object and how to release it.
pub trait Resource {
    type Raw;

    /// Short name used in logs and [`Error::NullHandle`].
    const KIND: &'static str;

    /// # Safety
    /// `raw` is non-null, was produced by the matching native constructor and
    /// is released exactly once.
    unsafe fn release(raw: *mut Self::Raw);
}

/// Exclusive owner of one native object. Not `Send`: native handles carry
/// thread affinity.
pub struct Handle<R: Resource> {
    raw: *mut R::Raw,
    _resource: PhantomData<R>,
}

impl<R: Resource> Handle<R> {
    /// Takes ownership of a pointer returned by a native constructor. Null
    /// means the constructor failed; the native error is read right away.
    pub fn adopt(raw: *mut R::Raw) -> Result<Self> {
        if raw.is_null() {
            let err = Error::from_native(0);
            debug!(kind = R::KIND, error = %err, "native constructor failed");
            return Err(err);
        }
        debug!(kind = R::KIND, ptr = ?raw, "acquired");
        Ok(Self {
            raw,
            _resource: PhantomData,
        })
    }

    /// Wraps any pointer, null included.
    ///
    /// # Safety
    /// A non-null `raw` must be a live object of this kind that nothing else
    /// releases.
    pub unsafe fn from_raw(raw: *mut R::Raw) -> Self {
        Self {
            raw,
            _resource: PhantomData,
        }
    }

    pub fn null() -> Self {
        Self {
            raw: ptr::null_mut(),
            _resource: PhantomData,
        }
    }

    pub fn as_ptr(&self) -> *mut R::Raw {
        self.raw
    }

    pub fn is_null(&self) -> bool {
        self.raw.is_null()
    }

    /// The pointer, or [`Error::NullHandle`] once released.
    pub fn get(&self) -> Result<*mut R::Raw> {
        if self.raw.is_null() {
            Err(Error::NullHandle(R::KIND))
        } else {
            Ok(self.raw)
        }
    }

    /// Releases the native object. Idempotent.
    pub fn release(&mut self) {
        let raw = std::mem::replace(&mut self.raw, ptr::null_mut());
        if raw.is_null() {
            return;
        }
        // SAFETY: non-null and owned by this handle; nulled above so it runs once.
        unsafe { R::release(raw) };
        debug!(kind = R::KIND, ptr = ?raw, "released");
    }

    /// Gives up ownership without releasing.
    pub fn into_raw(self) -> *mut R::Raw {
        ManuallyDrop::new(self).raw
    }
}

impl<R: Resource> Drop for Handle<R> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<R: Resource> fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &R::KIND)
            .field("raw", &self.raw)
            .finish()
    }
}

/// Declares a [`Resource`] for a native type and its destructor.
macro_rules! resource {
    ($name:ident, $raw:ty, $kind:literal, $release:path) => {
        pub(crate) struct $name;

        impl $crate::handle::Resource for $name {
            type Raw = $raw;
            const KIND: &'static str = $kind;

            unsafe fn release(raw: *mut $raw) {
                // SAFETY: forwarded from the trait contract.
                unsafe { $release(raw) }
            }
        }
    };
}

pub(crate) use resource;

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    thread_local! {
        static RELEASED: Cell<usize> = const { Cell::new(0) };
    }

    struct Counted;

    impl Resource for Counted {
        type Raw = u8;
        const KIND: &'static str = "counted";

        unsafe fn release(raw: *mut u8) {
            // SAFETY: the tests only hand out boxed bytes.
            drop(unsafe { Box::from_raw(raw) });
            RELEASED.with(|count| count.set(count.get() + 1));
        }
    }

    fn released() -> usize {
        RELEASED.with(Cell::get)
    }

    #[test]
    fn release_is_idempotent_and_drop_is_a_no_op_afterwards() {
        let before = released();
        let mut handle = Handle::<Counted>::adopt(Box::into_raw(Box::new(7))).unwrap();
        assert!(!handle.is_null());
        assert!(handle.get().is_ok());

        handle.release();
        handle.release();
        assert!(handle.is_null());
        assert_eq!(handle.get(), Err(Error::NullHandle("counted")));
        drop(handle);
        assert_eq!(released() - before, 1);
    }

    #[test]
    fn drop_releases_once() {
        let before = released();
        {
            let _handle = Handle::<Counted>::adopt(Box::into_raw(Box::new(1))).unwrap();
        }
        assert_eq!(released() - before, 1);
    }

    #[test]
    fn null_pointer_is_an_unopened_handle() {
        crate::error::set_error("Out of memory").unwrap();
        let err = Handle::<Counted>::adopt(ptr::null_mut()).unwrap_err();
        assert_eq!(err.message(), "Out of memory");
        assert_eq!(err.code(), 0);

        let mut unopened = unsafe { Handle::<Counted>::from_raw(ptr::null_mut()) };
        assert!(unopened.is_null());
        unopened.release();
        assert!(Handle::<Counted>::null().is_null());
    }

    #[test]
    fn into_raw_skips_release() {
        let before = released();
        let raw = Handle::<Counted>::adopt(Box::into_raw(Box::new(3))).unwrap().into_raw();
        assert_eq!(released(), before);
        drop(unsafe { Handle::<Counted>::from_raw(raw) });
        assert_eq!(released() - before, 1);
    }
}
