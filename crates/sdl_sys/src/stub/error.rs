use std::cell::RefCell;
use std::ffi::{c_char, c_int, CStr, CString};

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

/// Replaces the calling thread's error string. Always returns -1.
pub(crate) fn set_error(message: impl Into<String>) -> c_int {
    let mut bytes = message.into().into_bytes();
    bytes.retain(|byte| *byte != 0);
    let message = CString::new(bytes).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = message);
    -1
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetError() -> *const c_char {
    LAST_ERROR.with(|slot| slot.borrow().as_ptr())
}

/// Accepts the `"%s"`-style format the safe layer uses; the first `%s` is
/// replaced with `arg`.
#[no_mangle]
pub unsafe extern "C" fn SDL_SetError(fmt: *const c_char, arg: *const c_char) -> c_int {
    if fmt.is_null() {
        return set_error("");
    }
    // SAFETY: caller passes NUL-terminated strings.
    let fmt = unsafe { CStr::from_ptr(fmt) }.to_string_lossy();
    if arg.is_null() {
        return set_error(fmt.into_owned());
    }
    // SAFETY: non-null and NUL-terminated per the caller contract above.
    let arg = unsafe { CStr::from_ptr(arg) }.to_string_lossy();
    set_error(fmt.replacen("%s", &arg, 1))
}

#[no_mangle]
pub unsafe extern "C" fn SDL_ClearError() {
    set_error("");
}
