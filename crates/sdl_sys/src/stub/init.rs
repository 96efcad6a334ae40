use std::collections::HashMap;
use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;

use once_cell::sync::Lazy;
use parking_lot::{const_mutex, Mutex};
use sdl_abi::{Version, SDL_MAJOR_VERSION, SDL_MINOR_VERSION, SDL_PATCHLEVEL};

use super::events;
use super::memory::strdup;
use crate::{
    SDL_bool, SDL_FALSE, SDL_INIT_EVENTS, SDL_INIT_EVERYTHING, SDL_INIT_GAMECONTROLLER,
    SDL_INIT_JOYSTICK, SDL_INIT_VIDEO, SDL_TRUE,
};

static INITIALIZED: Mutex<u32> = const_mutex(0);
static HINTS: Lazy<Mutex<HashMap<String, CString>>> = Lazy::new(Default::default);
static CLIPBOARD: Mutex<String> = const_mutex(String::new());

const REVISION: &CStr = c"hg-0:stub";

/// Adds the subsystems a flag set depends on.
fn with_dependencies(flags: u32) -> u32 {
    let mut flags = flags & SDL_INIT_EVERYTHING;
    if flags & SDL_INIT_GAMECONTROLLER != 0 {
        flags |= SDL_INIT_JOYSTICK;
    }
    if flags & (SDL_INIT_VIDEO | SDL_INIT_JOYSTICK) != 0 {
        flags |= SDL_INIT_EVENTS;
    }
    flags
}

pub(crate) fn is_initialized(flag: u32) -> bool {
    *INITIALIZED.lock() & flag == flag
}

#[no_mangle]
pub unsafe extern "C" fn SDL_Init(flags: u32) -> c_int {
    // SAFETY: no pointers involved.
    unsafe { SDL_InitSubSystem(flags) }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_InitSubSystem(flags: u32) -> c_int {
    let flags = with_dependencies(flags);
    *INITIALIZED.lock() |= flags;
    if flags & SDL_INIT_EVENTS != 0 {
        events::start_event_loop();
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_QuitSubSystem(flags: u32) {
    let flags = with_dependencies(flags);
    *INITIALIZED.lock() &= !flags;
    if flags & SDL_INIT_EVENTS != 0 {
        events::stop_event_loop();
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_WasInit(flags: u32) -> u32 {
    let initialized = *INITIALIZED.lock();
    if flags == 0 {
        initialized
    } else {
        initialized & flags
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_Quit() {
    // SAFETY: no pointers involved.
    unsafe {
        SDL_QuitSubSystem(SDL_INIT_EVERYTHING);
        SDL_ClearHints();
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetVersion(ver: *mut Version) {
    if ver.is_null() {
        return;
    }
    // SAFETY: caller passes a writable record.
    unsafe {
        ver.write(Version {
            major: SDL_MAJOR_VERSION,
            minor: SDL_MINOR_VERSION,
            patch: SDL_PATCHLEVEL,
        })
    };
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetRevision() -> *const c_char {
    REVISION.as_ptr()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetHint(name: *const c_char, value: *const c_char) -> SDL_bool {
    if name.is_null() {
        return SDL_FALSE;
    }
    // SAFETY: caller passes NUL-terminated strings.
    let name = unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned();
    let mut hints = HINTS.lock();
    if value.is_null() {
        hints.remove(&name);
    } else {
        hints.insert(name, unsafe { CStr::from_ptr(value) }.to_owned());
    }
    SDL_TRUE
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetHint(name: *const c_char) -> *const c_char {
    if name.is_null() {
        return ptr::null();
    }
    // SAFETY: caller passes a NUL-terminated string.
    let name = unsafe { CStr::from_ptr(name) }.to_string_lossy();
    HINTS
        .lock()
        .get(name.as_ref())
        .map_or(ptr::null(), |value| value.as_ptr())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_ClearHints() {
    HINTS.lock().clear();
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetClipboardText(text: *const c_char) -> c_int {
    let text = if text.is_null() {
        String::new()
    } else {
        // SAFETY: caller passes a NUL-terminated string.
        unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
    };
    *CLIPBOARD.lock() = text;
    0
}

/// Returns an `SDL_malloc` copy that the caller must `SDL_free`.
#[no_mangle]
pub unsafe extern "C" fn SDL_GetClipboardText() -> *mut c_char {
    strdup(CLIPBOARD.lock().as_bytes())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_HasClipboardText() -> SDL_bool {
    if CLIPBOARD.lock().is_empty() {
        SDL_FALSE
    } else {
        SDL_TRUE
    }
}
