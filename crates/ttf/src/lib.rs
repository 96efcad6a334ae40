//! TrueType font loading and text rendering over SDL2_ttf.
//!
//! Fonts render into [`sdl::Surface`]s and report failures as [`sdl::Error`],
//! since SDL2_ttf shares SDL's error string.

#![forbid(unsafe_op_in_unsafe_fn)]

mod font;

pub use font::{Font, FontStyle, GlyphMetrics, Hinting};

use sdl::error::check;
use sdl::{Result, Version};
use tracing::debug;

/// Initializes the library. Calls nest; each needs a matching [`quit`].
pub fn init() -> Result<()> {
    // SAFETY: no arguments.
    check(unsafe { sdl_sys::TTF_Init() })?;
    debug!("ttf initialized");
    Ok(())
}

pub fn quit() {
    // SAFETY: no arguments.
    unsafe { sdl_sys::TTF_Quit() }
}

pub fn was_init() -> bool {
    // SAFETY: no arguments.
    unsafe { sdl_sys::TTF_WasInit() > 0 }
}

pub fn linked_version() -> Version {
    // SAFETY: returns a pointer to a static record.
    unsafe { sdl_sys::TTF_Linked_Version().as_ref() }
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod test_support {
    use parking_lot::{const_mutex, Mutex, MutexGuard};

    static SERIAL: Mutex<()> = const_mutex(());

    /// Serializes tests that touch the library's init count.
    pub fn serial() -> MutexGuard<'static, ()> {
        SERIAL.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::serial;
    use super::*;

    #[test]
    fn init_nests() {
        let _guard = serial();
        init().unwrap();
        init().unwrap();
        assert!(was_init());
        quit();
        assert!(was_init());
        quit();
        assert!(!was_init());
        quit();
        assert!(!was_init());
    }

    #[test]
    fn linked_version_is_2_x() {
        assert_eq!(linked_version().major, 2);
    }
}
