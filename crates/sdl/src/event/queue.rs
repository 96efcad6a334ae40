//! Moving events between the native queue and [`EventUnion`] buffers.
//!
//! Like window calls, pumping and waiting must happen on the thread that set
//! up the video subsystem.

use std::ffi::c_int;
use std::ptr;
use std::time::Duration;

use sdl_abi::{EventType, EventUnion};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventAction {
    /// Append to the back of the queue.
    Add,
    /// Copy from the front without removing.
    Peek,
    /// Remove from the front.
    Get,
}

impl EventAction {
    fn raw(self) -> c_int {
        match self {
            EventAction::Add => sdl_sys::SDL_ADDEVENT,
            EventAction::Peek => sdl_sys::SDL_PEEKEVENT,
            EventAction::Get => sdl_sys::SDL_GETEVENT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventState {
    Query,
    Ignore,
    Disable,
    Enable,
}

impl EventState {
    fn raw(self) -> c_int {
        match self {
            EventState::Query => sdl_sys::SDL_QUERY,
            EventState::Ignore => sdl_sys::SDL_IGNORE,
            EventState::Disable => sdl_sys::SDL_DISABLE,
            EventState::Enable => sdl_sys::SDL_ENABLE,
        }
    }
}

fn event_ptr(event: Option<&mut EventUnion>) -> *mut EventUnion {
    event.map_or(ptr::null_mut(), |event| event as *mut EventUnion)
}

/// Gathers pending input into the queue. Main thread only.
pub fn pump_events() {
    // SAFETY: no arguments.
    unsafe { sdl_sys::SDL_PumpEvents() }
}

/// Adds, peeks or removes up to `events.len()` events tagged within
/// `[min, max]` and returns how many were transferred.
///
/// An empty slice transfers nothing; with `Peek` or `Get` it reports how many
/// events match.
pub fn peep_events(
    events: &mut [EventUnion],
    action: EventAction,
    min: EventType,
    max: EventType,
) -> Result<usize> {
    let (buffer, len) = if events.is_empty() {
        (ptr::null_mut(), 0)
    } else {
        let len = c_int::try_from(events.len()).unwrap_or(c_int::MAX);
        (events.as_mut_ptr(), len)
    };
    // SAFETY: `buffer` is null or valid for `len` unions.
    let count = unsafe { sdl_sys::SDL_PeepEvents(buffer, len, action.raw(), min.raw(), max.raw()) };
    if count < 0 {
        let err = Error::from_native(count);
        debug!(?action, error = %err, "peep failed");
        return Err(err);
    }
    Ok(count as usize)
}

/// Removes the next event into `event`; `false` when the queue is empty.
pub fn poll_event(event: &mut EventUnion) -> bool {
    // SAFETY: valid destination union.
    unsafe { sdl_sys::SDL_PollEvent(event) == 1 }
}

pub fn has_pending_event() -> bool {
    // SAFETY: a null destination only checks the queue.
    unsafe { sdl_sys::SDL_PollEvent(ptr::null_mut()) == 1 }
}

/// Blocks until an event is available. With `None` the event stays queued.
pub fn wait_event(event: Option<&mut EventUnion>) -> Result<()> {
    // SAFETY: null or a valid destination union.
    if unsafe { sdl_sys::SDL_WaitEvent(event_ptr(event)) } == 0 {
        let err = Error::from_native(0);
        debug!(error = %err, "wait failed");
        return Err(err);
    }
    Ok(())
}

/// Like [`wait_event`], giving up after `timeout`. A timeout is reported as
/// an error with code 0.
pub fn wait_event_timeout(event: Option<&mut EventUnion>, timeout: Duration) -> Result<()> {
    let millis = c_int::try_from(timeout.as_millis()).unwrap_or(c_int::MAX);
    // SAFETY: null or a valid destination union.
    if unsafe { sdl_sys::SDL_WaitEventTimeout(event_ptr(event), millis) } == 0 {
        return Err(Error::from_native(0));
    }
    Ok(())
}

/// Queues a copy of `event`. `Ok(false)` means it was filtered out.
pub fn push_event(event: &mut EventUnion) -> Result<bool> {
    // SAFETY: valid source union; SDL only reads it.
    match unsafe { sdl_sys::SDL_PushEvent(event) } {
        1 => Ok(true),
        0 => Ok(false),
        status => {
            let err = Error::from_native(status);
            debug!(tag = %event.type_, error = %err, "push failed");
            Err(err)
        }
    }
}

/// Builds a union from `record` and queues it.
pub fn push_record(record: &dyn super::EventRecord) -> Result<bool> {
    let mut union = <EventUnion as super::EventUnionExt>::from_record(record)?;
    push_event(&mut union)
}

pub fn has_event(event_type: EventType) -> bool {
    // SAFETY: plain value arguments.
    unsafe { sdl_sys::SDL_HasEvent(event_type.raw()) == sdl_sys::SDL_TRUE }
}

pub fn has_events(min: EventType, max: EventType) -> bool {
    // SAFETY: plain value arguments.
    unsafe { sdl_sys::SDL_HasEvents(min.raw(), max.raw()) == sdl_sys::SDL_TRUE }
}

pub fn flush_event(event_type: EventType) {
    // SAFETY: plain value arguments.
    unsafe { sdl_sys::SDL_FlushEvent(event_type.raw()) }
}

pub fn flush_events(min: EventType, max: EventType) {
    // SAFETY: plain value arguments.
    unsafe { sdl_sys::SDL_FlushEvents(min.raw(), max.raw()) }
}

/// Sets or queries whether `event_type` is delivered; returns the state
/// before the call (`SDL_ENABLE` or `SDL_DISABLE`).
pub fn event_state(event_type: EventType, state: EventState) -> u8 {
    // SAFETY: plain value arguments.
    unsafe { sdl_sys::SDL_EventState(event_type.raw(), state.raw()) }
}

pub fn get_event_state(event_type: EventType) -> u8 {
    event_state(event_type, EventState::Query)
}

/// Reserves `count` consecutive user event tags and returns the first.
pub fn register_events(count: i32) -> Option<EventType> {
    // SAFETY: plain value argument.
    match unsafe { sdl_sys::SDL_RegisterEvents(count) } {
        u32::MAX => None,
        first => Some(EventType(first)),
    }
}
