use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;
use std::sync::atomic::{AtomicU32, Ordering};

use sdl_abi::{DisplayMode, Rect, SysWMinfo};

use super::error::set_error;
use super::init::is_initialized;
use super::{adopt, lookup, reclaim};
use crate::{
    SDL_GLContext, SDL_Window, SDL_bool, SDL_FALSE, SDL_GL_ATTRIBUTE_COUNT, SDL_INIT_VIDEO,
    SDL_PIXELFORMAT_RGB888, SDL_SYSWM_UNKNOWN, SDL_TRUE,
    SDL_WINDOWPOS_CENTERED_MASK, SDL_WINDOWPOS_UNDEFINED_MASK, SDL_WINDOW_FULLSCREEN_DESKTOP,
    SDL_WINDOW_HIDDEN, SDL_WINDOW_MAXIMIZED, SDL_WINDOW_MINIMIZED, SDL_WINDOW_OPENGL,
    SDL_WINDOW_SHOWN,
};

const DRIVER: &CStr = c"stub";
const DESKTOP: (c_int, c_int) = (1920, 1080);
const DISPLAY_MODES: [(c_int, c_int, c_int); 2] = [(1920, 1080, 60), (1280, 720, 60)];

const WINDOW: &str = "window";
const GL_CONTEXT: &str = "gl_context";

static NEXT_WINDOW_ID: AtomicU32 = AtomicU32::new(1);

pub(crate) struct StubWindow {
    id: u32,
    title: CString,
    x: c_int,
    y: c_int,
    pub(crate) w: c_int,
    pub(crate) h: c_int,
    flags: u32,
}

struct StubGlContext {
    _window: usize,
}

fn video_ready() -> bool {
    if is_initialized(SDL_INIT_VIDEO) {
        true
    } else {
        set_error("Video subsystem has not been initialized");
        false
    }
}

fn display_ready(display_index: c_int) -> bool {
    if !video_ready() {
        return false;
    }
    if display_index != 0 {
        set_error("displayIndex must be in the range 0 - 0");
        return false;
    }
    true
}

/// Resolves a window handle or records "Invalid window".
pub(crate) fn window<'a>(window: *mut SDL_Window) -> Option<&'a mut StubWindow> {
    // SAFETY: the registry only resolves live windows.
    let found = unsafe { lookup::<StubWindow, _>(window, WINDOW) };
    if found.is_none() {
        set_error("Invalid window");
    }
    found
}

fn resolve_position(position: c_int, extent: c_int, desktop: c_int) -> c_int {
    let mask = position as u32 & 0xFFFF_0000;
    if mask == SDL_WINDOWPOS_CENTERED_MASK {
        (desktop - extent) / 2
    } else if mask == SDL_WINDOWPOS_UNDEFINED_MASK {
        0
    } else {
        position
    }
}

unsafe fn write_out(target: *mut c_int, value: c_int) {
    if !target.is_null() {
        // SAFETY: caller-provided out parameter.
        unsafe { target.write(value) };
    }
}

unsafe fn write_mode(mode: *mut DisplayMode, index: usize) -> c_int {
    if mode.is_null() {
        return set_error("Parameter 'mode' is invalid");
    }
    let (w, h, refresh_rate) = DISPLAY_MODES[index];
    // SAFETY: caller passes a writable record.
    unsafe {
        mode.write(DisplayMode {
            format: SDL_PIXELFORMAT_RGB888,
            w,
            h,
            refresh_rate,
            driverdata: ptr::null_mut(),
        })
    };
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetNumVideoDisplays() -> c_int {
    if video_ready() {
        1
    } else {
        0
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetDisplayBounds(display_index: c_int, rect: *mut Rect) -> c_int {
    if !display_ready(display_index) {
        return -1;
    }
    if rect.is_null() {
        return set_error("Parameter 'rect' is invalid");
    }
    // SAFETY: caller passes a writable record.
    unsafe { rect.write(Rect::new(0, 0, DESKTOP.0, DESKTOP.1)) };
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetNumDisplayModes(display_index: c_int) -> c_int {
    if !display_ready(display_index) {
        return -1;
    }
    DISPLAY_MODES.len() as c_int
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetDisplayMode(
    display_index: c_int,
    mode_index: c_int,
    mode: *mut DisplayMode,
) -> c_int {
    if !display_ready(display_index) {
        return -1;
    }
    if mode_index < 0 || mode_index as usize >= DISPLAY_MODES.len() {
        return set_error(format!(
            "index must be in the range of 0 - {}",
            DISPLAY_MODES.len() - 1
        ));
    }
    // SAFETY: forwarded out parameter.
    unsafe { write_mode(mode, mode_index as usize) }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetDesktopDisplayMode(
    display_index: c_int,
    mode: *mut DisplayMode,
) -> c_int {
    if !display_ready(display_index) {
        return -1;
    }
    // SAFETY: forwarded out parameter.
    unsafe { write_mode(mode, 0) }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetCurrentVideoDriver() -> *const c_char {
    if video_ready() {
        DRIVER.as_ptr()
    } else {
        ptr::null()
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_CreateWindow(
    title: *const c_char,
    x: c_int,
    y: c_int,
    w: c_int,
    h: c_int,
    flags: u32,
) -> *mut SDL_Window {
    if !video_ready() {
        return ptr::null_mut();
    }
    let title = if title.is_null() {
        CString::default()
    } else {
        // SAFETY: caller passes a NUL-terminated string.
        unsafe { CStr::from_ptr(title) }.to_owned()
    };
    let (w, h) = (w.max(1), h.max(1));
    let flags = if flags & SDL_WINDOW_HIDDEN == 0 {
        flags | SDL_WINDOW_SHOWN
    } else {
        flags
    };
    let window = StubWindow {
        id: NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed),
        title,
        x: resolve_position(x, w, DESKTOP.0),
        y: resolve_position(y, h, DESKTOP.1),
        w,
        h,
        flags,
    };
    adopt(window, WINDOW).cast()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_DestroyWindow(window: *mut SDL_Window) {
    // SAFETY: the registry only reclaims live windows.
    if unsafe { reclaim::<StubWindow, _>(window, WINDOW) }.is_none() {
        set_error("Invalid window");
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetWindowID(window: *mut SDL_Window) -> u32 {
    self::window(window).map_or(0, |window| window.id)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetWindowTitle(window: *mut SDL_Window) -> *const c_char {
    self::window(window).map_or(c"".as_ptr(), |window| window.title.as_ptr())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetWindowTitle(window: *mut SDL_Window, title: *const c_char) {
    if let Some(window) = self::window(window) {
        window.title = if title.is_null() {
            CString::default()
        } else {
            // SAFETY: caller passes a NUL-terminated string.
            unsafe { CStr::from_ptr(title) }.to_owned()
        };
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetWindowPosition(window: *mut SDL_Window, x: *mut c_int, y: *mut c_int) {
    let (px, py) = self::window(window).map_or((0, 0), |window| (window.x, window.y));
    // SAFETY: caller-provided out parameters.
    unsafe {
        write_out(x, px);
        write_out(y, py);
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetWindowPosition(window: *mut SDL_Window, x: c_int, y: c_int) {
    if let Some(window) = self::window(window) {
        window.x = resolve_position(x, window.w, DESKTOP.0);
        window.y = resolve_position(y, window.h, DESKTOP.1);
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetWindowSize(window: *mut SDL_Window, w: *mut c_int, h: *mut c_int) {
    let (width, height) = self::window(window).map_or((0, 0), |window| (window.w, window.h));
    // SAFETY: caller-provided out parameters.
    unsafe {
        write_out(w, width);
        write_out(h, height);
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetWindowSize(window: *mut SDL_Window, w: c_int, h: c_int) {
    if let Some(window) = self::window(window) {
        if w <= 0 || h <= 0 {
            set_error(if w <= 0 { "Parameter 'w' is invalid" } else { "Parameter 'h' is invalid" });
            return;
        }
        window.w = w;
        window.h = h;
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetWindowFlags(window: *mut SDL_Window) -> u32 {
    self::window(window).map_or(0, |window| window.flags)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_ShowWindow(window: *mut SDL_Window) {
    if let Some(window) = self::window(window) {
        window.flags = (window.flags & !SDL_WINDOW_HIDDEN) | SDL_WINDOW_SHOWN;
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_HideWindow(window: *mut SDL_Window) {
    if let Some(window) = self::window(window) {
        window.flags = (window.flags & !SDL_WINDOW_SHOWN) | SDL_WINDOW_HIDDEN;
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RaiseWindow(window: *mut SDL_Window) {
    self::window(window);
}

#[no_mangle]
pub unsafe extern "C" fn SDL_MaximizeWindow(window: *mut SDL_Window) {
    if let Some(window) = self::window(window) {
        window.flags = (window.flags & !SDL_WINDOW_MINIMIZED) | SDL_WINDOW_MAXIMIZED;
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_MinimizeWindow(window: *mut SDL_Window) {
    if let Some(window) = self::window(window) {
        window.flags = (window.flags & !SDL_WINDOW_MAXIMIZED) | SDL_WINDOW_MINIMIZED;
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RestoreWindow(window: *mut SDL_Window) {
    if let Some(window) = self::window(window) {
        window.flags &= !(SDL_WINDOW_MAXIMIZED | SDL_WINDOW_MINIMIZED);
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetWindowFullscreen(window: *mut SDL_Window, flags: u32) -> c_int {
    let Some(window) = self::window(window) else {
        return -1;
    };
    let flags = flags & SDL_WINDOW_FULLSCREEN_DESKTOP;
    window.flags = (window.flags & !SDL_WINDOW_FULLSCREEN_DESKTOP) | flags;
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetWindowDisplayIndex(window: *mut SDL_Window) -> c_int {
    if self::window(window).is_some() {
        0
    } else {
        -1
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GL_CreateContext(window: *mut SDL_Window) -> SDL_GLContext {
    let Some(stub) = self::window(window) else {
        return ptr::null_mut();
    };
    if stub.flags & SDL_WINDOW_OPENGL == 0 {
        set_error("The specified window isn't an OpenGL window");
        return ptr::null_mut();
    }
    adopt(
        StubGlContext {
            _window: window as usize,
        },
        GL_CONTEXT,
    )
    .cast()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GL_DeleteContext(context: SDL_GLContext) {
    // SAFETY: the registry only reclaims live contexts.
    unsafe { reclaim::<StubGlContext, _>(context, GL_CONTEXT) };
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GL_SetAttribute(attr: c_int, _value: c_int) -> c_int {
    if !(0..SDL_GL_ATTRIBUTE_COUNT).contains(&attr) {
        return set_error("Unknown OpenGL attribute");
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GL_SwapWindow(window: *mut SDL_Window) {
    self::window(window);
}

/// Reports no windowing subsystem. The caller fills `info.version` first.
#[no_mangle]
pub unsafe extern "C" fn SDL_GetWindowWMInfo(window: *mut SDL_Window, info: *mut SysWMinfo) -> SDL_bool {
    if self::window(window).is_none() {
        return SDL_FALSE;
    }
    // SAFETY: caller passes a writable record or null.
    let Some(info) = (unsafe { info.as_mut() }) else {
        set_error("Parameter 'info' is invalid");
        return SDL_FALSE;
    };
    if info.version.major > 2 {
        set_error("Application not compiled with SDL 2.0");
        return SDL_FALSE;
    }
    *info = SysWMinfo {
        version: info.version,
        subsystem: SDL_SYSWM_UNKNOWN,
        ..SysWMinfo::default()
    };
    SDL_TRUE
}
