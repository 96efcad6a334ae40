use crate::error::{to_cstring, Result};

pub const HINT_RENDER_DRIVER: &str = "SDL_RENDER_DRIVER";
/// "0"/"nearest", "1"/"linear" or "2"/"best".
pub const HINT_RENDER_SCALE_QUALITY: &str = "SDL_RENDER_SCALE_QUALITY";
pub const HINT_RENDER_VSYNC: &str = "SDL_RENDER_VSYNC";
pub const HINT_VIDEO_MINIMIZE_ON_FOCUS_LOSS: &str = "SDL_VIDEO_MINIMIZE_ON_FOCUS_LOSS";
pub const HINT_JOYSTICK_ALLOW_BACKGROUND_EVENTS: &str = "SDL_JOYSTICK_ALLOW_BACKGROUND_EVENTS";

/// Sets a hint at normal priority. `Ok(false)` means a higher priority
/// setting (usually the environment) kept its value.
pub fn set_hint(name: &str, value: &str) -> Result<bool> {
    let name = to_cstring(name)?;
    let value = to_cstring(value)?;
    // SAFETY: NUL-terminated arguments; the library copies both.
    Ok(unsafe { sdl_sys::SDL_SetHint(name.as_ptr(), value.as_ptr()) } == sdl_sys::SDL_TRUE)
}

pub fn get_hint(name: &str) -> Result<Option<String>> {
    let name = to_cstring(name)?;
    // SAFETY: NUL-terminated argument; the value is copied before any other call.
    Ok(crate::static_str(unsafe { sdl_sys::SDL_GetHint(name.as_ptr()) }))
}

/// Drops every hint set through [`set_hint`].
pub fn clear_hints() {
    // SAFETY: no arguments.
    unsafe { sdl_sys::SDL_ClearHints() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serial;

    #[test]
    fn hints_round_trip_and_clear() {
        let _guard = serial();
        assert!(set_hint(HINT_RENDER_SCALE_QUALITY, "linear").unwrap());
        assert_eq!(
            get_hint(HINT_RENDER_SCALE_QUALITY).unwrap().as_deref(),
            Some("linear")
        );
        assert!(set_hint(HINT_RENDER_SCALE_QUALITY, "best").unwrap());
        assert_eq!(
            get_hint(HINT_RENDER_SCALE_QUALITY).unwrap().as_deref(),
            Some("best")
        );

        clear_hints();
        assert_eq!(get_hint(HINT_RENDER_SCALE_QUALITY).unwrap(), None);
    }

    #[test]
    fn hint_strings_reject_interior_nul() {
        assert_eq!(set_hint("SDL\0X", "1"), Err(crate::Error::InteriorNul));
        assert_eq!(get_hint("SDL\0X"), Err(crate::Error::InteriorNul));
    }
}
