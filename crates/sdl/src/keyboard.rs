use std::ffi::{c_int, CString};

use crate::error::Result;
use crate::native_flags;

native_flags! {
    /// Modifier keys (`KMOD_*`), as carried by `Keysym::mod_`.
    pub struct Keymod(u16) {
        const LSHIFT = sdl_sys::KMOD_LSHIFT;
        const RSHIFT = sdl_sys::KMOD_RSHIFT;
        const LCTRL = sdl_sys::KMOD_LCTRL;
        const RCTRL = sdl_sys::KMOD_RCTRL;
        const LALT = sdl_sys::KMOD_LALT;
        const RALT = sdl_sys::KMOD_RALT;
        const LGUI = sdl_sys::KMOD_LGUI;
        const RGUI = sdl_sys::KMOD_RGUI;
        const NUM = sdl_sys::KMOD_NUM;
        const CAPS = sdl_sys::KMOD_CAPS;
        const MODE = sdl_sys::KMOD_MODE;
    }
}

impl Keymod {
    pub const SHIFT: Self = Self::from_bits(sdl_sys::KMOD_LSHIFT | sdl_sys::KMOD_RSHIFT);
    pub const CTRL: Self = Self::from_bits(sdl_sys::KMOD_LCTRL | sdl_sys::KMOD_RCTRL);
    pub const ALT: Self = Self::from_bits(sdl_sys::KMOD_LALT | sdl_sys::KMOD_RALT);
}

/// Pressed state per scancode, indexed by `Keysym::scancode`.
///
/// The array belongs to the library and is updated by the event pump.
pub fn keyboard_state() -> &'static [u8] {
    let mut len: c_int = 0;
    // SAFETY: valid out parameter.
    let state = unsafe { sdl_sys::SDL_GetKeyboardState(&mut len) };
    if state.is_null() {
        return &[];
    }
    // SAFETY: the array has `len` entries and lives as long as the library.
    unsafe { std::slice::from_raw_parts(state, usize::try_from(len).unwrap_or(0)) }
}

pub fn mod_state() -> Keymod {
    // SAFETY: no arguments.
    let bits = unsafe { sdl_sys::SDL_GetModState() };
    Keymod::from_bits(bits as u16)
}

/// Human readable name of a physical key, empty when it has none.
pub fn scancode_name(scancode: u32) -> String {
    let Ok(scancode) = c_int::try_from(scancode) else {
        return String::new();
    };
    // SAFETY: returns a static string.
    crate::static_str(unsafe { sdl_sys::SDL_GetScancodeName(scancode) }).unwrap_or_default()
}

pub fn key_name(key: i32) -> String {
    // SAFETY: returns a static string.
    crate::static_str(unsafe { sdl_sys::SDL_GetKeyName(key) }).unwrap_or_default()
}

/// Looks a keycode up by its name, case-insensitively.
pub fn key_from_name(name: &str) -> Result<Option<i32>> {
    let name = CString::new(name)?;
    // SAFETY: NUL-terminated argument.
    let key = unsafe { sdl_sys::SDL_GetKeyFromName(name.as_ptr()) };
    Ok((key != 0).then_some(key))
}

pub fn start_text_input() {
    // SAFETY: no arguments.
    unsafe { sdl_sys::SDL_StartTextInput() }
}

pub fn stop_text_input() {
    // SAFETY: no arguments.
    unsafe { sdl_sys::SDL_StopTextInput() }
}

pub fn is_text_input_active() -> bool {
    // SAFETY: no arguments.
    unsafe { sdl_sys::SDL_IsTextInputActive() == sdl_sys::SDL_TRUE }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serial, with_video};

    #[test]
    fn state_covers_every_scancode() {
        let state = keyboard_state();
        assert_eq!(state.len(), 512);
        assert_eq!(state.as_ptr(), keyboard_state().as_ptr());
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(scancode_name(4), "A");
        assert_eq!(key_name(i32::from(b'a')), "A");
        assert_eq!(key_from_name("a").unwrap(), Some(i32::from(b'a')));
        assert_eq!(key_from_name("Return").unwrap(), Some(13));
        assert_eq!(key_from_name("no such key").unwrap(), None);
        assert_eq!(key_from_name("a\0b"), Err(crate::Error::InteriorNul));
        assert_eq!(scancode_name(u32::MAX), "");
    }

    #[test]
    fn text_input_toggles() {
        let _guard = serial();
        with_video(|| {
            start_text_input();
            assert!(is_text_input_active());
            stop_text_input();
            assert!(!is_text_input_active());
            assert!(!mod_state().intersects(Keymod::SHIFT));
        });
    }

    #[test]
    fn modifier_groups() {
        let held = Keymod::LSHIFT | Keymod::RCTRL;
        assert!(held.intersects(Keymod::SHIFT));
        assert!(held.intersects(Keymod::CTRL));
        assert!(!held.intersects(Keymod::ALT));
    }
}
