use std::ffi::c_int;

use sdl_sys::SDL_Cursor;

use crate::error::{check, check_count, Error, Result};
use crate::handle::{resource, Handle};
use crate::native_flags;
use crate::surface::Surface;
use crate::video::Window;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemCursor {
    Arrow,
    IBeam,
    Wait,
    Crosshair,
    WaitArrow,
    SizeNWSE,
    SizeNESW,
    SizeWE,
    SizeNS,
    SizeAll,
    No,
    Hand,
}

impl SystemCursor {
    pub const fn raw(self) -> c_int {
        match self {
            SystemCursor::Arrow => sdl_sys::SDL_SYSTEM_CURSOR_ARROW,
            SystemCursor::IBeam => sdl_sys::SDL_SYSTEM_CURSOR_IBEAM,
            SystemCursor::Wait => sdl_sys::SDL_SYSTEM_CURSOR_WAIT,
            SystemCursor::Crosshair => sdl_sys::SDL_SYSTEM_CURSOR_CROSSHAIR,
            SystemCursor::WaitArrow => sdl_sys::SDL_SYSTEM_CURSOR_WAITARROW,
            SystemCursor::SizeNWSE => sdl_sys::SDL_SYSTEM_CURSOR_SIZENWSE,
            SystemCursor::SizeNESW => sdl_sys::SDL_SYSTEM_CURSOR_SIZENESW,
            SystemCursor::SizeWE => sdl_sys::SDL_SYSTEM_CURSOR_SIZEWE,
            SystemCursor::SizeNS => sdl_sys::SDL_SYSTEM_CURSOR_SIZENS,
            SystemCursor::SizeAll => sdl_sys::SDL_SYSTEM_CURSOR_SIZEALL,
            SystemCursor::No => sdl_sys::SDL_SYSTEM_CURSOR_NO,
            SystemCursor::Hand => sdl_sys::SDL_SYSTEM_CURSOR_HAND,
        }
    }
}

native_flags! {
    /// Pressed buttons, `SDL_BUTTON(n)` masks.
    pub struct MouseButtons(u32) {
        const LEFT = 1 << (sdl_sys::SDL_BUTTON_LEFT - 1);
        const MIDDLE = 1 << (sdl_sys::SDL_BUTTON_MIDDLE - 1);
        const RIGHT = 1 << (sdl_sys::SDL_BUTTON_RIGHT - 1);
        const X1 = 1 << (sdl_sys::SDL_BUTTON_X1 - 1);
        const X2 = 1 << (sdl_sys::SDL_BUTTON_X2 - 1);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub buttons: MouseButtons,
}

resource!(CursorResource, SDL_Cursor, "cursor", sdl_sys::SDL_FreeCursor);

#[derive(Debug)]
pub struct Cursor {
    handle: Handle<CursorResource>,
}

impl Cursor {
    pub fn system(cursor: SystemCursor) -> Result<Self> {
        // SAFETY: plain value argument.
        let raw = unsafe { sdl_sys::SDL_CreateSystemCursor(cursor.raw()) };
        Ok(Self {
            handle: Handle::adopt(raw)?,
        })
    }

    /// A color cursor built from a copy of `surface`'s pixels.
    pub fn from_surface(surface: &Surface<'_>, hot_x: i32, hot_y: i32) -> Result<Self> {
        let surface = surface.raw_checked()?;
        // SAFETY: live surface; the native side copies what it needs.
        let raw = unsafe { sdl_sys::SDL_CreateColorCursor(surface, hot_x, hot_y) };
        Ok(Self {
            handle: Handle::adopt(raw)?,
        })
    }

    /// A monochrome cursor. `data` and `mask` hold one bit per pixel with
    /// rows padded to whole bytes.
    pub fn create(data: &[u8], mask: &[u8], w: i32, h: i32, hot_x: i32, hot_y: i32) -> Result<Self> {
        let row = (i64::from(w) + 7) / 8;
        let needed = usize::try_from(row * i64::from(h)).ok();
        match needed {
            Some(needed) if data.len() >= needed && mask.len() >= needed => {}
            _ => {
                return Err(Error::Sdl {
                    message: format!("cursor bitmaps too short for {w}x{h}"),
                    code: -1,
                })
            }
        }
        // SAFETY: both bitmaps hold at least `w / 8 * h` readable bytes.
        let raw = unsafe {
            sdl_sys::SDL_CreateCursor(data.as_ptr(), mask.as_ptr(), w, h, hot_x, hot_y)
        };
        Ok(Self {
            handle: Handle::adopt(raw)?,
        })
    }

    pub fn raw(&self) -> *mut SDL_Cursor {
        self.handle.as_ptr()
    }

    /// Whether this is the active cursor.
    pub fn is_current(&self) -> bool {
        // SAFETY: no arguments.
        !self.is_null() && unsafe { sdl_sys::SDL_GetCursor() } == self.raw()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// Makes this the active cursor. Freeing it later resets the active one.
    pub fn set(&self) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live cursor.
        unsafe { sdl_sys::SDL_SetCursor(raw) };
        Ok(())
    }

    pub fn free(&mut self) {
        self.handle.release();
    }
}

fn read_state(read: unsafe extern "C" fn(*mut c_int, *mut c_int) -> u32) -> MouseState {
    let (mut x, mut y) = (0, 0);
    // SAFETY: valid out parameters.
    let buttons = unsafe { read(&mut x, &mut y) };
    MouseState {
        x,
        y,
        buttons: MouseButtons::from_bits(buttons),
    }
}

/// Position relative to the focused window, plus held buttons.
pub fn mouse_state() -> MouseState {
    read_state(sdl_sys::SDL_GetMouseState)
}

/// Motion since the previous call.
pub fn relative_mouse_state() -> MouseState {
    read_state(sdl_sys::SDL_GetRelativeMouseState)
}

/// Shows or hides the cursor; `None` only asks. Returns whether it is shown.
pub fn show_cursor(show: Option<bool>) -> Result<bool> {
    let toggle = match show {
        None => sdl_sys::SDL_QUERY,
        Some(true) => sdl_sys::SDL_ENABLE,
        Some(false) => sdl_sys::SDL_DISABLE,
    };
    // SAFETY: plain value argument.
    let shown = check_count(unsafe { sdl_sys::SDL_ShowCursor(toggle) })?;
    Ok(shown == sdl_sys::SDL_ENABLE)
}

pub fn set_relative_mouse_mode(enabled: bool) -> Result<()> {
    let enabled = if enabled {
        sdl_sys::SDL_TRUE
    } else {
        sdl_sys::SDL_FALSE
    };
    // SAFETY: plain value argument.
    check(unsafe { sdl_sys::SDL_SetRelativeMouseMode(enabled) })
}

pub fn relative_mouse_mode() -> bool {
    // SAFETY: no arguments.
    (unsafe { sdl_sys::SDL_GetRelativeMouseMode() }) == sdl_sys::SDL_TRUE
}

/// Id of the window holding mouse focus.
pub fn mouse_focus() -> Option<u32> {
    // SAFETY: no arguments.
    let window = unsafe { sdl_sys::SDL_GetMouseFocus() };
    if window.is_null() {
        return None;
    }
    // SAFETY: non-null focus is a live window.
    Some(unsafe { sdl_sys::SDL_GetWindowID(window) })
}

/// Moves the pointer to `(x, y)` inside `window`.
pub fn warp_mouse_in_window(window: &Window, x: i32, y: i32) -> Result<()> {
    let raw = window.raw_checked()?;
    // SAFETY: live window.
    unsafe { sdl_sys::SDL_WarpMouseInWindow(raw, x, y) };
    Ok(())
}
