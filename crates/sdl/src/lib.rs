//! Safe bindings over the SDL2 C ABI.
//!
//! The event union is viewed in place through [`event::convert`], native
//! objects are owned by move-only handles that release exactly once, and
//! every native failure is turned into an [`Error`] right after the failing
//! call.
//!
//! # Threads
//!
//! Window, renderer and event-pump calls must be made from the thread that
//! initialized video. Handle types are not `Send`, so they stay where they
//! were created; nothing here checks the calling thread at runtime.

#![forbid(unsafe_op_in_unsafe_fn)]

pub mod clipboard;
pub mod controller;
pub mod error;
pub mod event;
pub mod handle;
pub mod hints;
pub mod joystick;
pub mod keyboard;
pub mod messagebox;
pub mod mouse;
pub mod ownership;
pub mod pixels;
pub mod rect;
pub mod render;
pub mod surface;
pub mod syswm;
pub mod video;

mod flags;

pub use error::{clear_error, get_error, set_error, Error, Result};
pub use event::queue::{
    event_state, flush_event, flush_events, get_event_state, has_event, has_events,
    has_pending_event, peep_events, poll_event, pump_events, push_event, push_record,
    register_events, wait_event, wait_event_timeout, EventAction, EventState,
};
pub use event::{
    convert, copy_event_to_union, DropEventExt, Event, EventRecord, EventType, EventUnion,
    EventUnionExt,
};
pub use handle::{Handle, Resource};
pub use ownership::NativeString;
pub use pixels::{Palette, PixelFormat, PixelFormatEnum};
pub use render::{Renderer, Texture};
pub use sdl_abi::{Color, DisplayMode, Point, Rect, Version};
pub use surface::Surface;
pub use video::{Window, WindowFlags};

use std::ffi::CStr;

use tracing::debug;

use crate::error::check;

native_flags! {
    /// Subsystems for [`init`].
    pub struct InitFlags(u32) {
        const TIMER = sdl_sys::SDL_INIT_TIMER;
        const AUDIO = sdl_sys::SDL_INIT_AUDIO;
        /// Implies EVENTS.
        const VIDEO = sdl_sys::SDL_INIT_VIDEO;
        /// Implies EVENTS.
        const JOYSTICK = sdl_sys::SDL_INIT_JOYSTICK;
        const HAPTIC = sdl_sys::SDL_INIT_HAPTIC;
        /// Implies JOYSTICK.
        const GAMECONTROLLER = sdl_sys::SDL_INIT_GAMECONTROLLER;
        const EVENTS = sdl_sys::SDL_INIT_EVENTS;
        const NOPARACHUTE = sdl_sys::SDL_INIT_NOPARACHUTE;
        const EVERYTHING = sdl_sys::SDL_INIT_EVERYTHING;
    }
}

pub fn init(flags: InitFlags) -> Result<()> {
    // SAFETY: plain value argument.
    check(unsafe { sdl_sys::SDL_Init(flags.bits()) })?;
    debug!(flags = flags.bits(), "initialized");
    Ok(())
}

pub fn init_subsystem(flags: InitFlags) -> Result<()> {
    // SAFETY: plain value argument.
    check(unsafe { sdl_sys::SDL_InitSubSystem(flags.bits()) })
}

pub fn quit_subsystem(flags: InitFlags) {
    // SAFETY: plain value argument.
    unsafe { sdl_sys::SDL_QuitSubSystem(flags.bits()) }
}

/// Which of `flags` are initialized; an empty set asks for all of them.
pub fn was_init(flags: InitFlags) -> InitFlags {
    // SAFETY: plain value argument.
    InitFlags::from_bits(unsafe { sdl_sys::SDL_WasInit(flags.bits()) })
}

/// Shuts down every subsystem. Handles still alive afterwards must not be used.
pub fn quit() {
    // SAFETY: no arguments.
    unsafe { sdl_sys::SDL_Quit() };
    debug!("shut down");
}

/// Version of the library linked at runtime.
pub fn get_version() -> Version {
    let mut version = Version::default();
    // SAFETY: valid out parameter.
    unsafe { sdl_sys::SDL_GetVersion(&mut version) };
    version
}

pub fn get_revision() -> String {
    // SAFETY: static NUL-terminated string or null.
    unsafe { error::copy_c_str(sdl_sys::SDL_GetRevision()) }
}

/// Version of the headers these bindings were written against.
pub const fn compiled_version() -> Version {
    Version {
        major: sdl_abi::SDL_MAJOR_VERSION,
        minor: sdl_abi::SDL_MINOR_VERSION,
        patch: sdl_abi::SDL_PATCHLEVEL,
    }
}

/// `SDL_VERSIONNUM`: 2.0.3 becomes 2003.
pub const fn version_num(version: Version) -> u32 {
    version.num()
}

/// Copies a static native string, `None` for null.
fn static_str(ptr: *const std::ffi::c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null results of the callers' native functions are
    // NUL-terminated strings owned by the library.
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

#[cfg(test)]
pub(crate) mod test_support {
    use parking_lot::{const_mutex, Mutex, MutexGuard};
    use tracing_subscriber::EnvFilter;

    use super::*;

    static SERIAL: Mutex<()> = const_mutex(());

    fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }

    /// Serializes tests that touch process-wide native state.
    pub fn serial() -> MutexGuard<'static, ()> {
        init_tracing();
        SERIAL.lock()
    }

    fn with_subsystems<R>(flags: InitFlags, body: impl FnOnce() -> R) -> R {
        init(flags).unwrap();
        flush_events(EventType::FIRSTEVENT, EventType::LASTEVENT);
        let result = body();
        quit();
        result
    }

    pub fn with_events<R>(body: impl FnOnce() -> R) -> R {
        with_subsystems(InitFlags::EVENTS, body)
    }

    pub fn with_video<R>(body: impl FnOnce() -> R) -> R {
        with_subsystems(InitFlags::VIDEO, body)
    }

    pub fn with_controllers<R>(body: impl FnOnce() -> R) -> R {
        with_subsystems(InitFlags::GAMECONTROLLER, body)
    }
}
