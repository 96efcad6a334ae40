use crate::error::{check, to_cstring, Error, Result};
use crate::ownership::NativeString;

pub fn set_clipboard_text(text: &str) -> Result<()> {
    let text = to_cstring(text)?;
    // SAFETY: NUL-terminated argument; the library copies it.
    check(unsafe { sdl_sys::SDL_SetClipboardText(text.as_ptr()) })
}

/// The clipboard contents. The native copy is released once converted.
pub fn clipboard_text() -> Result<String> {
    // SAFETY: the result is an `SDL_malloc` string the caller owns, or null.
    let text = unsafe { NativeString::from_raw(sdl_sys::SDL_GetClipboardText()) };
    text.map(NativeString::into_string)
        .ok_or_else(|| Error::from_native(0))
}

pub fn has_clipboard_text() -> bool {
    // SAFETY: no arguments.
    unsafe { sdl_sys::SDL_HasClipboardText() == sdl_sys::SDL_TRUE }
}
