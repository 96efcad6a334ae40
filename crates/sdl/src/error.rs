use std::ffi::{c_char, c_int, CStr, CString, NulError};

use sdl_abi::EventType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the bridge.
///
/// Native failures are captured as [`Error::Sdl`] right after the failing
/// call, so the message always belongs to that call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{message} (code {code})")]
    Sdl { message: String, code: i32 },
    #[error("invalid event type {0} ({raw:#x})", raw = .0.raw())]
    InvalidEventType(EventType),
    #[error("no event record matches {0}")]
    UnknownEventRecord(&'static str),
    #[error("{0} handle is null")]
    NullHandle(&'static str),
    #[error("string contains an interior NUL byte")]
    InteriorNul,
}

impl Error {
    /// Captures the native last-error string for a failed call.
    pub fn from_native(code: i32) -> Self {
        Error::Sdl {
            message: get_error(),
            code,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Error::Sdl { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// The native status code, or 0 for errors raised by the bridge itself.
    pub fn code(&self) -> i32 {
        match self {
            Error::Sdl { code, .. } => *code,
            _ => 0,
        }
    }
}

impl From<NulError> for Error {
    fn from(_: NulError) -> Self {
        Error::InteriorNul
    }
}

/// The current native error message, copied out.
pub fn get_error() -> String {
    // SAFETY: SDL_GetError returns a NUL-terminated buffer or null.
    unsafe { copy_c_str(sdl_sys::SDL_GetError()) }
}

pub fn set_error(message: &str) -> Result<()> {
    let message = CString::new(message)?;
    // SAFETY: "%s" consumes exactly the one string argument passed.
    unsafe { sdl_sys::SDL_SetError(c"%s".as_ptr(), message.as_ptr()) };
    Ok(())
}

pub fn clear_error() {
    // SAFETY: no arguments, no preconditions.
    unsafe { sdl_sys::SDL_ClearError() }
}

/// Maps a `0 on success` status to a result.
pub fn check(status: c_int) -> Result<()> {
    if status == 0 {
        Ok(())
    } else {
        Err(Error::from_native(status))
    }
}

/// Maps a `negative on failure` count to a result.
pub fn check_count(count: c_int) -> Result<c_int> {
    if count < 0 {
        Err(Error::from_native(count))
    } else {
        Ok(count)
    }
}

pub fn check_ptr<T>(ptr: *mut T) -> Result<*mut T> {
    if ptr.is_null() {
        Err(Error::from_native(0))
    } else {
        Ok(ptr)
    }
}

pub fn to_cstring(text: &str) -> Result<CString> {
    Ok(CString::new(text)?)
}

/// Copies a borrowed native string; null becomes an empty string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub unsafe fn copy_c_str(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    // SAFETY: guaranteed by the caller.
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_error_round_trips_through_native_buffer() {
        set_error("window exploded: 100%").unwrap();
        assert_eq!(get_error(), "window exploded: 100%");

        clear_error();
        assert_eq!(get_error(), "");
    }

    #[test]
    fn failing_status_captures_message_and_code() {
        set_error("bad things").unwrap();
        let err = check(-1).unwrap_err();
        assert_eq!(err.message(), "bad things");
        assert_eq!(err.code(), -1);
        assert_eq!(err.to_string(), "bad things (code -1)");
        assert!(check(0).is_ok());
    }

    #[test]
    fn interior_nul_is_rejected() {
        assert_eq!(set_error("a\0b"), Err(Error::InteriorNul));
        assert_eq!(to_cstring("x\0"), Err(Error::InteriorNul));
    }

    #[test]
    fn bridge_errors_have_code_zero() {
        let err = Error::InvalidEventType(EventType(0x10000));
        assert_eq!(err.code(), 0);
        assert_eq!(err.message(), "invalid event type Unknown (65536) (0x10000)");
        assert_eq!(Error::NullHandle("window").to_string(), "window handle is null");
    }
}
