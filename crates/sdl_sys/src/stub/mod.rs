//! In-process stand-in for the native libraries.
//!
//! Serves the same symbols as the native build so the safe layers can be
//! exercised anywhere. It models only what crosses the boundary: the error
//! string, native allocations, init state, the event queue, handle lifetimes
//! and the records handed out by pointer. It draws nothing and plays nothing.

use std::collections::HashMap;
use std::ffi::{c_int, c_void};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

mod error;
mod events;
mod init;
mod input;
mod memory;
mod messagebox;
mod mixer;
mod rect;
mod render;
mod rwops;
mod surface;
mod ttf;
mod video;

/// The exported C symbols, re-exported at the crate root.
pub mod api {
    pub use super::error::*;
    pub use super::events::*;
    pub use super::init::*;
    pub use super::input::*;
    pub use super::memory::*;
    pub use super::messagebox::*;
    pub use super::mixer::*;
    pub use super::rect::*;
    pub use super::render::*;
    pub use super::rwops::*;
    pub use super::surface::*;
    pub use super::ttf::*;
    pub use super::video::*;
}

/// Every object handed out by pointer, keyed by address.
static LIVE: Lazy<Mutex<HashMap<usize, &'static str>>> = Lazy::new(Default::default);

/// Moves `value` to the heap and records it as a live object of `kind`.
pub(crate) fn adopt<T>(value: T, kind: &'static str) -> *mut T {
    let ptr = Box::into_raw(Box::new(value));
    LIVE.lock().insert(ptr as usize, kind);
    ptr
}

/// Resolves a pointer previously returned by [`adopt`] with the same `kind`.
///
/// # Safety
/// The caller must not hold another reference to the same object.
pub(crate) unsafe fn lookup<'a, T, P>(ptr: *mut P, kind: &'static str) -> Option<&'a mut T> {
    if ptr.is_null() {
        return None;
    }
    match LIVE.lock().get(&(ptr as usize)) {
        // SAFETY: registered by `adopt::<T>` under this kind and not yet reclaimed.
        Some(registered) if *registered == kind => Some(unsafe { &mut *ptr.cast::<T>() }),
        _ => None,
    }
}

/// Takes back ownership of an object registered with [`adopt`].
///
/// # Safety
/// `ptr` must have been produced by `adopt::<T>` with the same `kind`.
pub(crate) unsafe fn reclaim<T, P>(ptr: *mut P, kind: &'static str) -> Option<Box<T>> {
    if ptr.is_null() {
        return None;
    }
    let mut live = LIVE.lock();
    match live.get(&(ptr as usize)) {
        Some(registered) if *registered == kind => {
            live.remove(&(ptr as usize));
            // SAFETY: registered by `adopt::<T>`; removed above so it is freed once.
            Some(unsafe { Box::from_raw(ptr.cast::<T>()) })
        }
        _ => None,
    }
}

/// Whether `ptr` is a handle the stub has handed out and not yet released.
pub fn is_live(ptr: *const c_void) -> bool {
    !ptr.is_null() && LIVE.lock().contains_key(&(ptr as usize))
}

/// Number of live handles of one kind (`"window"`, `"surface"`, `"palette"`, ...).
pub fn live_count(kind: &str) -> usize {
    LIVE.lock().values().filter(|registered| **registered == kind).count()
}

/// Whether `ptr` is an `SDL_malloc` block that has not been freed.
pub fn heap_contains(ptr: *const c_void) -> bool {
    memory::contains(ptr)
}

/// Plugs in a virtual joystick and returns its device index.
pub fn attach_joystick(name: &str, axes: usize, buttons: usize, hats: usize) -> c_int {
    input::attach_device(name, axes, buttons, hats)
}

pub fn set_joystick_axis(device_index: c_int, axis: usize, value: i16) {
    input::update_device(device_index, |axes, _, _| {
        if let Some(slot) = axes.get_mut(axis) {
            *slot = value;
        }
    });
}

pub fn set_joystick_button(device_index: c_int, button: usize, pressed: bool) {
    input::update_device(device_index, |_, buttons, _| {
        if let Some(slot) = buttons.get_mut(button) {
            *slot = u8::from(pressed);
        }
    });
}

pub fn set_joystick_hat(device_index: c_int, hat: usize, value: u8) {
    input::update_device(device_index, |_, _, hats| {
        if let Some(slot) = hats.get_mut(hat) {
            *slot = value;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adopted_objects_are_tracked_until_reclaimed() {
        let ptr = adopt(7_u32, "test_value");
        assert!(is_live(ptr.cast()));

        let wrong_kind = unsafe { lookup::<u32, _>(ptr, "other") };
        assert!(wrong_kind.is_none());

        let value = unsafe { reclaim::<u32, _>(ptr, "test_value") };
        assert_eq!(value.as_deref(), Some(&7));
        assert!(!is_live(ptr.cast()));
        assert!(unsafe { reclaim::<u32, _>(ptr, "test_value") }.is_none());
    }
}
