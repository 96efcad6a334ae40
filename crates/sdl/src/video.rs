use std::ffi::c_int;
use std::marker::PhantomData;

use sdl_abi::{DisplayMode, Rect};
use sdl_sys::SDL_Window;

use crate::error::{check, check_count, copy_c_str, to_cstring, Result};
use crate::handle::{resource, Handle};
use crate::native_flags;

pub const WINDOWPOS_UNDEFINED: i32 = sdl_sys::SDL_WINDOWPOS_UNDEFINED;
pub const WINDOWPOS_CENTERED: i32 = sdl_sys::SDL_WINDOWPOS_CENTERED;

native_flags! {
    pub struct WindowFlags(u32) {
        const FULLSCREEN = sdl_sys::SDL_WINDOW_FULLSCREEN;
        const OPENGL = sdl_sys::SDL_WINDOW_OPENGL;
        const SHOWN = sdl_sys::SDL_WINDOW_SHOWN;
        const HIDDEN = sdl_sys::SDL_WINDOW_HIDDEN;
        const BORDERLESS = sdl_sys::SDL_WINDOW_BORDERLESS;
        const RESIZABLE = sdl_sys::SDL_WINDOW_RESIZABLE;
        const MINIMIZED = sdl_sys::SDL_WINDOW_MINIMIZED;
        const MAXIMIZED = sdl_sys::SDL_WINDOW_MAXIMIZED;
        const INPUT_GRABBED = sdl_sys::SDL_WINDOW_INPUT_GRABBED;
        const INPUT_FOCUS = sdl_sys::SDL_WINDOW_INPUT_FOCUS;
        const MOUSE_FOCUS = sdl_sys::SDL_WINDOW_MOUSE_FOCUS;
        const FULLSCREEN_DESKTOP = sdl_sys::SDL_WINDOW_FULLSCREEN_DESKTOP;
        const FOREIGN = sdl_sys::SDL_WINDOW_FOREIGN;
        const ALLOW_HIGHDPI = sdl_sys::SDL_WINDOW_ALLOW_HIGHDPI;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenType {
    Off,
    /// Exclusive fullscreen with a video mode change.
    True,
    /// Borderless at the desktop resolution.
    Desktop,
}

impl FullscreenType {
    fn raw(self) -> u32 {
        match self {
            FullscreenType::Off => 0,
            FullscreenType::True => sdl_sys::SDL_WINDOW_FULLSCREEN,
            FullscreenType::Desktop => sdl_sys::SDL_WINDOW_FULLSCREEN_DESKTOP,
        }
    }
}

/// OpenGL attributes accepted by [`gl_set_attribute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlAttr(pub c_int);

impl GlAttr {
    pub const RED_SIZE: Self = Self(sdl_sys::SDL_GL_RED_SIZE);
    pub const GREEN_SIZE: Self = Self(sdl_sys::SDL_GL_GREEN_SIZE);
    pub const BLUE_SIZE: Self = Self(sdl_sys::SDL_GL_BLUE_SIZE);
    pub const ALPHA_SIZE: Self = Self(sdl_sys::SDL_GL_ALPHA_SIZE);
    pub const BUFFER_SIZE: Self = Self(sdl_sys::SDL_GL_BUFFER_SIZE);
    pub const DOUBLEBUFFER: Self = Self(sdl_sys::SDL_GL_DOUBLEBUFFER);
    pub const DEPTH_SIZE: Self = Self(sdl_sys::SDL_GL_DEPTH_SIZE);
    pub const STENCIL_SIZE: Self = Self(sdl_sys::SDL_GL_STENCIL_SIZE);
    pub const MULTISAMPLEBUFFERS: Self = Self(sdl_sys::SDL_GL_MULTISAMPLEBUFFERS);
    pub const MULTISAMPLESAMPLES: Self = Self(sdl_sys::SDL_GL_MULTISAMPLESAMPLES);
    pub const ACCELERATED_VISUAL: Self = Self(sdl_sys::SDL_GL_ACCELERATED_VISUAL);
    pub const CONTEXT_MAJOR_VERSION: Self = Self(sdl_sys::SDL_GL_CONTEXT_MAJOR_VERSION);
    pub const CONTEXT_MINOR_VERSION: Self = Self(sdl_sys::SDL_GL_CONTEXT_MINOR_VERSION);
    pub const CONTEXT_FLAGS: Self = Self(sdl_sys::SDL_GL_CONTEXT_FLAGS);
    pub const CONTEXT_PROFILE_MASK: Self = Self(sdl_sys::SDL_GL_CONTEXT_PROFILE_MASK);
    pub const SHARE_WITH_CURRENT_CONTEXT: Self = Self(sdl_sys::SDL_GL_SHARE_WITH_CURRENT_CONTEXT);
    pub const FRAMEBUFFER_SRGB_CAPABLE: Self = Self(sdl_sys::SDL_GL_FRAMEBUFFER_SRGB_CAPABLE);
}

resource!(WindowResource, SDL_Window, "window", sdl_sys::SDL_DestroyWindow);
resource!(GlContextResource, std::ffi::c_void, "gl_context", sdl_sys::SDL_GL_DeleteContext);

/// A top-level window. Create, use and destroy it on the video thread.
#[derive(Debug)]
pub struct Window {
    handle: Handle<WindowResource>,
}

impl Window {
    pub fn create(title: &str, x: i32, y: i32, w: i32, h: i32, flags: WindowFlags) -> Result<Self> {
        let title = to_cstring(title)?;
        // SAFETY: valid C string; remaining arguments are plain values.
        let raw = unsafe { sdl_sys::SDL_CreateWindow(title.as_ptr(), x, y, w, h, flags.bits()) };
        Ok(Self {
            handle: Handle::adopt(raw)?,
        })
    }

    /// # Safety
    /// A non-null `raw` must be a live window owned by nobody else.
    pub unsafe fn from_raw(raw: *mut SDL_Window) -> Self {
        Self {
            // SAFETY: forwarded from the caller.
            handle: unsafe { Handle::from_raw(raw) },
        }
    }

    pub fn raw(&self) -> *mut SDL_Window {
        self.handle.as_ptr()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub(crate) fn raw_checked(&self) -> Result<*mut SDL_Window> {
        self.handle.get()
    }

    /// Destroys the window. Later calls do nothing.
    pub fn destroy(&mut self) {
        self.handle.release();
    }

    pub fn id(&self) -> Result<u32> {
        let raw = self.handle.get()?;
        // SAFETY: live window.
        Ok(unsafe { sdl_sys::SDL_GetWindowID(raw) })
    }

    pub fn title(&self) -> Result<String> {
        let raw = self.handle.get()?;
        // SAFETY: live window; the title is copied before any other call.
        Ok(unsafe { copy_c_str(sdl_sys::SDL_GetWindowTitle(raw)) })
    }

    pub fn set_title(&self, title: &str) -> Result<()> {
        let raw = self.handle.get()?;
        let title = to_cstring(title)?;
        // SAFETY: live window, valid C string.
        unsafe { sdl_sys::SDL_SetWindowTitle(raw, title.as_ptr()) };
        Ok(())
    }

    pub fn position(&self) -> Result<(i32, i32)> {
        let raw = self.handle.get()?;
        let (mut x, mut y) = (0, 0);
        // SAFETY: live window, valid out parameters.
        unsafe { sdl_sys::SDL_GetWindowPosition(raw, &mut x, &mut y) };
        Ok((x, y))
    }

    pub fn set_position(&self, x: i32, y: i32) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live window.
        unsafe { sdl_sys::SDL_SetWindowPosition(raw, x, y) };
        Ok(())
    }

    pub fn size(&self) -> Result<(i32, i32)> {
        let raw = self.handle.get()?;
        let (mut w, mut h) = (0, 0);
        // SAFETY: live window, valid out parameters.
        unsafe { sdl_sys::SDL_GetWindowSize(raw, &mut w, &mut h) };
        Ok((w, h))
    }

    pub fn set_size(&self, w: i32, h: i32) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live window.
        unsafe { sdl_sys::SDL_SetWindowSize(raw, w, h) };
        Ok(())
    }

    pub fn flags(&self) -> Result<WindowFlags> {
        let raw = self.handle.get()?;
        // SAFETY: live window.
        Ok(WindowFlags::from_bits(unsafe { sdl_sys::SDL_GetWindowFlags(raw) }))
    }

    fn apply(&self, action: unsafe extern "C" fn(*mut SDL_Window)) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live window; `action` takes only the window.
        unsafe { action(raw) };
        Ok(())
    }

    pub fn show(&self) -> Result<()> {
        self.apply(sdl_sys::SDL_ShowWindow)
    }

    pub fn hide(&self) -> Result<()> {
        self.apply(sdl_sys::SDL_HideWindow)
    }

    pub fn raise(&self) -> Result<()> {
        self.apply(sdl_sys::SDL_RaiseWindow)
    }

    pub fn maximize(&self) -> Result<()> {
        self.apply(sdl_sys::SDL_MaximizeWindow)
    }

    pub fn minimize(&self) -> Result<()> {
        self.apply(sdl_sys::SDL_MinimizeWindow)
    }

    pub fn restore(&self) -> Result<()> {
        self.apply(sdl_sys::SDL_RestoreWindow)
    }

    pub fn set_fullscreen(&self, mode: FullscreenType) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live window.
        check(unsafe { sdl_sys::SDL_SetWindowFullscreen(raw, mode.raw()) })
    }

    pub fn display_index(&self) -> Result<i32> {
        let raw = self.handle.get()?;
        // SAFETY: live window.
        check_count(unsafe { sdl_sys::SDL_GetWindowDisplayIndex(raw) })
    }

    /// Creates an OpenGL context for this window, which must have been
    /// created with [`WindowFlags::OPENGL`].
    pub fn gl_create_context(&self) -> Result<GlContext<'_>> {
        let raw = self.handle.get()?;
        // SAFETY: live window.
        let context = unsafe { sdl_sys::SDL_GL_CreateContext(raw) };
        Ok(GlContext {
            handle: Handle::adopt(context)?,
            _window: PhantomData,
        })
    }

    pub fn gl_swap_window(&self) -> Result<()> {
        self.apply(sdl_sys::SDL_GL_SwapWindow)
    }
}

/// An OpenGL context; cannot outlive its window.
#[derive(Debug)]
pub struct GlContext<'w> {
    handle: Handle<GlContextResource>,
    _window: PhantomData<&'w Window>,
}

impl GlContext<'_> {
    pub fn raw(&self) -> sdl_sys::SDL_GLContext {
        self.handle.as_ptr()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub fn destroy(&mut self) {
        self.handle.release();
    }
}

/// Sets an attribute for contexts created afterwards.
pub fn gl_set_attribute(attr: GlAttr, value: i32) -> Result<()> {
    // SAFETY: plain value arguments.
    check(unsafe { sdl_sys::SDL_GL_SetAttribute(attr.0, value) })
}

pub fn num_video_displays() -> Result<i32> {
    // SAFETY: no arguments.
    check_count(unsafe { sdl_sys::SDL_GetNumVideoDisplays() })
}

pub fn display_bounds(display_index: i32) -> Result<Rect> {
    let mut rect = Rect::default();
    // SAFETY: valid out parameter.
    check(unsafe { sdl_sys::SDL_GetDisplayBounds(display_index, &mut rect) })?;
    Ok(rect)
}

pub fn num_display_modes(display_index: i32) -> Result<i32> {
    // SAFETY: plain value argument.
    check_count(unsafe { sdl_sys::SDL_GetNumDisplayModes(display_index) })
}

pub fn display_mode(display_index: i32, mode_index: i32) -> Result<DisplayMode> {
    let mut mode = DisplayMode::default();
    // SAFETY: valid out parameter.
    check(unsafe { sdl_sys::SDL_GetDisplayMode(display_index, mode_index, &mut mode) })?;
    Ok(mode)
}

pub fn desktop_display_mode(display_index: i32) -> Result<DisplayMode> {
    let mut mode = DisplayMode::default();
    // SAFETY: valid out parameter.
    check(unsafe { sdl_sys::SDL_GetDesktopDisplayMode(display_index, &mut mode) })?;
    Ok(mode)
}

/// Name of the active video driver, `None` before video is initialized.
pub fn current_video_driver() -> Option<String> {
    // SAFETY: no arguments; returns a static string or null.
    crate::static_str(unsafe { sdl_sys::SDL_GetCurrentVideoDriver() })
}

#[cfg(all(test, sdl_stub))]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_support::{serial, with_video};

    #[test]
    fn window_lifecycle_is_idempotent() {
        let _guard = serial();
        with_video(|| {
            let mut window =
                Window::create("lifecycle", 0, 0, 320, 240, WindowFlags::HIDDEN).unwrap();
            assert!(window.id().unwrap() > 0);
            assert!(sdl_sys::stub::is_live(window.raw().cast()));

            window.destroy();
            window.destroy();
            assert!(window.is_null());
            assert_eq!(window.id(), Err(Error::NullHandle("window")));
            assert_eq!(sdl_sys::stub::live_count("window"), 0);
        });
    }

    #[test]
    fn unopened_window_reports_null() {
        let window = unsafe { Window::from_raw(std::ptr::null_mut()) };
        assert!(window.is_null());
        assert!(matches!(window.title(), Err(Error::NullHandle("window"))));
    }

    #[test]
    fn create_without_video_fails_with_native_message() {
        let _guard = serial();
        crate::quit();
        let err = Window::create("nope", 0, 0, 10, 10, WindowFlags::empty()).unwrap_err();
        assert_eq!(err.code(), 0);
        assert_eq!(err.message(), "Video subsystem has not been initialized");
    }

    #[test]
    fn window_properties_round_trip() {
        let _guard = serial();
        with_video(|| {
            let window = Window::create(
                "first",
                WINDOWPOS_CENTERED,
                WINDOWPOS_CENTERED,
                800,
                600,
                WindowFlags::RESIZABLE,
            )
            .unwrap();
            assert_eq!(window.title().unwrap(), "first");
            assert_eq!(window.position().unwrap(), (560, 240));
            assert!(window.flags().unwrap().contains(WindowFlags::SHOWN | WindowFlags::RESIZABLE));

            window.set_title("second").unwrap();
            window.set_position(10, 20).unwrap();
            window.set_size(1024, 768).unwrap();
            assert_eq!(window.title().unwrap(), "second");
            assert_eq!(window.position().unwrap(), (10, 20));
            assert_eq!(window.size().unwrap(), (1024, 768));

            window.hide().unwrap();
            assert!(window.flags().unwrap().contains(WindowFlags::HIDDEN));
            window.maximize().unwrap();
            assert!(window.flags().unwrap().contains(WindowFlags::MAXIMIZED));
            window.restore().unwrap();
            window.set_fullscreen(FullscreenType::Desktop).unwrap();
            assert!(window.flags().unwrap().contains(WindowFlags::FULLSCREEN_DESKTOP));
            assert_eq!(window.display_index().unwrap(), 0);
            assert_eq!(window.set_title("a\0b"), Err(Error::InteriorNul));
        });
    }

    #[test]
    fn gl_context_requires_opengl_window() {
        let _guard = serial();
        with_video(|| {
            let plain = Window::create("plain", 0, 0, 64, 64, WindowFlags::HIDDEN).unwrap();
            let err = plain.gl_create_context().unwrap_err();
            assert_eq!(err.message(), "The specified window isn't an OpenGL window");

            let gl = Window::create("gl", 0, 0, 64, 64, WindowFlags::OPENGL).unwrap();
            gl_set_attribute(GlAttr::DOUBLEBUFFER, 1).unwrap();
            assert!(gl_set_attribute(GlAttr(99), 1).is_err());
            let mut context = gl.gl_create_context().unwrap();
            gl.gl_swap_window().unwrap();
            context.destroy();
            context.destroy();
            assert!(context.is_null());
        });
    }

    #[test]
    fn display_queries() {
        let _guard = serial();
        with_video(|| {
            assert_eq!(num_video_displays().unwrap(), 1);
            let bounds = display_bounds(0).unwrap();
            assert_eq!((bounds.w, bounds.h), (1920, 1080));
            assert_eq!(num_display_modes(0).unwrap(), 2);
            assert_eq!(display_mode(0, 1).unwrap().w, 1280);
            assert_eq!(desktop_display_mode(0).unwrap().refresh_rate, 60);
            assert_eq!(current_video_driver().as_deref(), Some("stub"));

            let err = display_mode(0, 5).unwrap_err();
            assert_eq!(err.message(), "index must be in the range of 0 - 1");
            assert!(display_bounds(3).is_err());
        });
    }
}
