//! Native window-system handles behind a [`Window`].

use sdl_abi::SysWMinfo;

use crate::video::Window;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SysWmType {
    #[default]
    Unknown,
    Windows,
    X11,
    DirectFb,
    Cocoa,
    UiKit,
    Wayland,
}

impl SysWmType {
    /// Subsystems newer than this crate read back as `Unknown`.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            sdl_sys::SDL_SYSWM_WINDOWS => SysWmType::Windows,
            sdl_sys::SDL_SYSWM_X11 => SysWmType::X11,
            sdl_sys::SDL_SYSWM_DIRECTFB => SysWmType::DirectFb,
            sdl_sys::SDL_SYSWM_COCOA => SysWmType::Cocoa,
            sdl_sys::SDL_SYSWM_UIKIT => SysWmType::UiKit,
            sdl_sys::SDL_SYSWM_WAYLAND => SysWmType::Wayland,
            _ => SysWmType::Unknown,
        }
    }
}

/// What the window system reported. Handles are raw addresses or ids and
/// only mean something to the matching subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SysWmInfo {
    raw: SysWMinfo,
}

impl SysWmInfo {
    pub fn raw(&self) -> &SysWMinfo {
        &self.raw
    }

    pub fn version(&self) -> crate::Version {
        self.raw.version
    }

    pub fn subsystem(&self) -> SysWmType {
        SysWmType::from_raw(self.raw.subsystem)
    }

    fn word(&self, subsystem: SysWmType, index: usize) -> Option<usize> {
        if self.subsystem() != subsystem {
            return None;
        }
        self.raw.info.get(index).copied()
    }

    /// `HWND`.
    pub fn win_window(&self) -> Option<usize> {
        self.word(SysWmType::Windows, 0)
    }

    /// `Display *`.
    pub fn x11_display(&self) -> Option<usize> {
        self.word(SysWmType::X11, 0)
    }

    /// The X `Window` id.
    pub fn x11_window(&self) -> Option<usize> {
        self.word(SysWmType::X11, 1)
    }

    pub fn dfb_dfb(&self) -> Option<usize> {
        self.word(SysWmType::DirectFb, 0)
    }

    pub fn dfb_window(&self) -> Option<usize> {
        self.word(SysWmType::DirectFb, 1)
    }

    pub fn dfb_surface(&self) -> Option<usize> {
        self.word(SysWmType::DirectFb, 2)
    }

    /// `NSWindow *`.
    pub fn cocoa_window(&self) -> Option<usize> {
        self.word(SysWmType::Cocoa, 0)
    }

    /// `UIWindow *`.
    pub fn uikit_window(&self) -> Option<usize> {
        self.word(SysWmType::UiKit, 0)
    }
}

impl Window {
    /// Asks the window system about this window, declaring the version these
    /// bindings were compiled against.
    pub fn wm_info(&self) -> crate::Result<SysWmInfo> {
        let window = self.raw_checked()?;
        let mut raw = SysWMinfo {
            version: crate::compiled_version(),
            ..SysWMinfo::default()
        };
        // SAFETY: live window, valid out parameter with its version set.
        if unsafe { sdl_sys::SDL_GetWindowWMInfo(window, &mut raw) } == sdl_sys::SDL_TRUE {
            Ok(SysWmInfo { raw })
        } else {
            Err(crate::Error::from_native(-1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsystem_codes_decode() {
        assert_eq!(SysWmType::from_raw(sdl_sys::SDL_SYSWM_X11), SysWmType::X11);
        assert_eq!(SysWmType::from_raw(99), SysWmType::Unknown);

        let mut raw = SysWMinfo {
            subsystem: sdl_sys::SDL_SYSWM_X11,
            ..SysWMinfo::default()
        };
        raw.info[0] = 0x1000;
        raw.info[1] = 42;
        let info = SysWmInfo { raw };
        assert_eq!(info.x11_display(), Some(0x1000));
        assert_eq!(info.x11_window(), Some(42));
        assert_eq!(info.win_window(), None);
        assert_eq!(info.cocoa_window(), None);
    }

    #[cfg(sdl_stub)]
    #[test]
    fn window_reports_its_subsystem() {
        use crate::test_support::{serial, with_video};
        use crate::video::WindowFlags;

        let _guard = serial();
        with_video(|| {
            let mut window = Window::create("wm", 0, 0, 32, 32, WindowFlags::HIDDEN).unwrap();
            let info = window.wm_info().unwrap();
            assert_eq!(info.subsystem(), SysWmType::Unknown);
            assert_eq!(info.version(), crate::compiled_version());
            assert_eq!(info.x11_window(), None);

            window.destroy();
            assert_eq!(window.wm_info(), Err(crate::Error::NullHandle("window")));
        });
    }
}
