use std::ffi::{c_char, c_int};
use std::slice;

use sdl_abi::MessageBoxData;

use super::error::set_error;
use super::video::window;
use crate::{SDL_Window, SDL_MESSAGEBOX_BUTTON_RETURNKEY_DEFAULT};

/// Nothing is shown; the box is answered at once with the button marked
/// as the return-key default, or -1 when there is none.
#[no_mangle]
pub unsafe extern "C" fn SDL_ShowMessageBox(data: *const MessageBoxData, buttonid: *mut c_int) -> c_int {
    // SAFETY: caller passes a readable record or null.
    let Some(data) = (unsafe { data.as_ref() }) else {
        return set_error("Parameter 'messageboxdata' is invalid");
    };
    let Ok(count) = usize::try_from(data.numbuttons) else {
        return set_error("Invalid number of buttons");
    };
    if count > 0 && data.buttons.is_null() {
        return set_error("Parameter 'buttons' is invalid");
    }
    if !data.window.is_null() && window(data.window.cast::<SDL_Window>()).is_none() {
        return -1;
    }
    let buttons = if count == 0 {
        &[][..]
    } else {
        // SAFETY: `numbuttons` readable entries, checked non-null above.
        unsafe { slice::from_raw_parts(data.buttons, count) }
    };
    let answer = buttons
        .iter()
        .find(|button| button.flags & SDL_MESSAGEBOX_BUTTON_RETURNKEY_DEFAULT != 0)
        .map_or(-1, |button| button.buttonid);
    // SAFETY: caller passes a writable int or null.
    if let Some(buttonid) = unsafe { buttonid.as_mut() } {
        *buttonid = answer;
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_ShowSimpleMessageBox(
    _flags: u32,
    title: *const c_char,
    message: *const c_char,
    parent: *mut SDL_Window,
) -> c_int {
    if title.is_null() || message.is_null() {
        return set_error("Parameter 'title' or 'message' is invalid");
    }
    if !parent.is_null() && window(parent).is_none() {
        return -1;
    }
    0
}
