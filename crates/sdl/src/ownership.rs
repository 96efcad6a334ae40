use std::borrow::Cow;
use std::ffi::{c_char, CStr};
use std::fmt;
use std::ptr::{self, NonNull};

use crate::error::{Error, Result};

/// A C string allocated by the native library and owned by the receiver.
///
/// Released with `SDL_free` exactly once, on drop.
pub struct NativeString {
    ptr: NonNull<c_char>,
}

// SAFETY: the allocator behind SDL_free is thread-safe and the string is
// exclusively owned.
unsafe impl Send for NativeString {}

impl NativeString {
    /// Takes ownership of a native allocation; `None` for null.
    ///
    /// # Safety
    /// A non-null `ptr` must be a NUL-terminated string allocated with
    /// `SDL_malloc` that nothing else frees.
    pub unsafe fn from_raw(ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr })
    }

    /// Copies `text` into a fresh native allocation.
    pub fn new(text: &str) -> Result<Self> {
        if text.as_bytes().contains(&0) {
            return Err(Error::InteriorNul);
        }
        let len = text.len();
        // SAFETY: plain allocation of len + 1 bytes.
        let raw = unsafe { sdl_sys::SDL_malloc(len + 1) }.cast::<c_char>();
        let Some(ptr) = NonNull::new(raw) else {
            return Err(Error::from_native(0));
        };
        // SAFETY: the block holds len + 1 bytes and does not overlap `text`.
        unsafe {
            ptr::copy_nonoverlapping(text.as_ptr().cast::<c_char>(), raw, len);
            raw.add(len).write(0);
        }
        Ok(Self { ptr })
    }

    pub fn as_ptr(&self) -> *const c_char {
        self.ptr.as_ptr()
    }

    pub fn as_c_str(&self) -> &CStr {
        // SAFETY: NUL-terminated and alive for as long as self.
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        self.as_c_str().to_string_lossy()
    }

    /// Copies the text out and frees the native buffer.
    pub fn into_string(self) -> String {
        self.to_string_lossy().into_owned()
    }

    /// Hands the allocation back without freeing it.
    pub fn into_raw(self) -> *mut c_char {
        let ptr = self.ptr.as_ptr();
        std::mem::forget(self);
        ptr
    }
}

impl Drop for NativeString {
    fn drop(&mut self) {
        // SAFETY: owned SDL_malloc block, freed only here.
        unsafe { sdl_sys::SDL_free(self.ptr.as_ptr().cast()) }
    }
}

impl fmt::Debug for NativeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_c_str(), f)
    }
}

impl fmt::Display for NativeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_text_into_native_memory() {
        let text = NativeString::new("/tmp/dropped file.png").unwrap();
        assert_eq!(text.as_c_str().to_bytes(), b"/tmp/dropped file.png");
        assert_eq!(text.to_string(), "/tmp/dropped file.png");
        assert_eq!(text.into_string(), "/tmp/dropped file.png");
    }

    #[test]
    fn rejects_interior_nul() {
        assert!(matches!(NativeString::new("a\0b"), Err(Error::InteriorNul)));
    }

    #[test]
    fn null_is_not_adopted() {
        assert!(unsafe { NativeString::from_raw(ptr::null_mut()) }.is_none());
    }

    #[cfg(sdl_stub)]
    #[test]
    fn drop_frees_the_native_block_once() {
        let text = NativeString::new("clip").unwrap();
        let raw = text.into_raw();
        assert!(sdl_sys::stub::heap_contains(raw.cast()));

        let text = unsafe { NativeString::from_raw(raw) }.unwrap();
        drop(text);
        assert!(!sdl_sys::stub::heap_contains(raw.cast()));
    }
}
