use std::collections::{HashSet, VecDeque};
use std::ffi::c_int;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use parking_lot::{Condvar, Mutex, MutexGuard};
use sdl_abi::{EventType, EventUnion};

use super::error::set_error;
use crate::{
    SDL_bool, SDL_ADDEVENT, SDL_DISABLE, SDL_ENABLE, SDL_FALSE, SDL_GETEVENT, SDL_PEEKEVENT,
    SDL_TRUE,
};

const MAX_QUEUED_EVENTS: usize = 65535;

struct EventQueue {
    active: bool,
    events: VecDeque<EventUnion>,
    disabled: HashSet<u32>,
    next_user_event: u32,
}

static QUEUE: Lazy<Mutex<EventQueue>> = Lazy::new(|| {
    Mutex::new(EventQueue {
        active: false,
        events: VecDeque::new(),
        disabled: HashSet::new(),
        next_user_event: EventType::USEREVENT.raw(),
    })
});
static QUEUE_READY: Condvar = Condvar::new();

pub(crate) fn start_event_loop() {
    QUEUE.lock().active = true;
}

pub(crate) fn stop_event_loop() {
    let mut queue = QUEUE.lock();
    queue.active = false;
    queue.events.clear();
    QUEUE_READY.notify_all();
}

fn shut_down() -> c_int {
    set_error("The event system has been shut down")
}

fn add_events(queue: &mut MutexGuard<'_, EventQueue>, events: &[EventUnion]) -> c_int {
    let mut used = 0;
    for event in events {
        if queue.events.len() >= MAX_QUEUED_EVENTS {
            set_error("Event queue is full");
            break;
        }
        queue.events.push_back(*event);
        used += 1;
    }
    if used > 0 {
        QUEUE_READY.notify_all();
    }
    used
}

#[no_mangle]
pub unsafe extern "C" fn SDL_PumpEvents() {}

#[no_mangle]
pub unsafe extern "C" fn SDL_PeepEvents(
    events: *mut EventUnion,
    numevents: c_int,
    action: c_int,
    min_type: u32,
    max_type: u32,
) -> c_int {
    let mut queue = QUEUE.lock();
    if !queue.active {
        drop(queue);
        return shut_down();
    }
    let limit = numevents.max(0) as usize;
    match action {
        SDL_ADDEVENT => {
            if events.is_null() || limit == 0 {
                return 0;
            }
            // SAFETY: caller passes `numevents` readable records.
            let batch = unsafe { std::slice::from_raw_parts(events, limit) };
            add_events(&mut queue, batch)
        }
        SDL_PEEKEVENT | SDL_GETEVENT => {
            let mut used = 0;
            let mut index = 0;
            while index < queue.events.len() && (events.is_null() || used < limit) {
                let event = queue.events[index];
                let tag = event.type_.raw();
                if tag < min_type || tag > max_type {
                    index += 1;
                    continue;
                }
                if !events.is_null() {
                    // SAFETY: caller passes room for `numevents` records.
                    unsafe { events.add(used).write(event) };
                    if action == SDL_GETEVENT {
                        queue.events.remove(index);
                        used += 1;
                        continue;
                    }
                }
                used += 1;
                index += 1;
            }
            used as c_int
        }
        _ => {
            drop(queue);
            set_error("Unknown event action")
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_HasEvent(type_: u32) -> SDL_bool {
    // SAFETY: no pointers involved.
    unsafe { SDL_HasEvents(type_, type_) }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_HasEvents(min_type: u32, max_type: u32) -> SDL_bool {
    // SAFETY: a null buffer only counts.
    let count =
        unsafe { SDL_PeepEvents(std::ptr::null_mut(), 0, SDL_PEEKEVENT, min_type, max_type) };
    if count > 0 {
        SDL_TRUE
    } else {
        SDL_FALSE
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_FlushEvent(type_: u32) {
    // SAFETY: no pointers involved.
    unsafe { SDL_FlushEvents(type_, type_) }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_FlushEvents(min_type: u32, max_type: u32) {
    QUEUE.lock().events.retain(|event| {
        let tag = event.type_.raw();
        tag < min_type || tag > max_type
    });
}

#[no_mangle]
pub unsafe extern "C" fn SDL_PollEvent(event: *mut EventUnion) -> c_int {
    // SAFETY: forwarded.
    unsafe { SDL_WaitEventTimeout(event, 0) }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_WaitEvent(event: *mut EventUnion) -> c_int {
    // SAFETY: forwarded.
    unsafe { SDL_WaitEventTimeout(event, -1) }
}

/// Returns 1 when an event is available, 0 on timeout or error. A null
/// `event` leaves the event queued.
#[no_mangle]
pub unsafe extern "C" fn SDL_WaitEventTimeout(event: *mut EventUnion, timeout: c_int) -> c_int {
    let deadline = (timeout > 0).then(|| Instant::now() + Duration::from_millis(timeout as u64));
    let mut queue = QUEUE.lock();
    loop {
        if !queue.active {
            drop(queue);
            shut_down();
            return 0;
        }
        if let Some(front) = queue.events.front().copied() {
            if !event.is_null() {
                queue.events.pop_front();
                // SAFETY: caller passes a writable record.
                unsafe { event.write(front) };
            }
            return 1;
        }
        match (timeout, deadline) {
            (0, _) => return 0,
            (_, None) => QUEUE_READY.wait(&mut queue),
            (_, Some(deadline)) => {
                if QUEUE_READY.wait_until(&mut queue, deadline).timed_out()
                    && queue.events.is_empty()
                {
                    return 0;
                }
            }
        }
    }
}

/// 1 when queued, 0 when the event type is disabled, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn SDL_PushEvent(event: *mut EventUnion) -> c_int {
    if event.is_null() {
        return set_error("Parameter 'event' is invalid");
    }
    let mut queue = QUEUE.lock();
    if !queue.active {
        drop(queue);
        return shut_down();
    }
    // SAFETY: caller passes a readable record.
    let event = unsafe { event.read() };
    if queue.disabled.contains(&event.type_.raw()) {
        return 0;
    }
    if add_events(&mut queue, &[event]) <= 0 {
        return -1;
    }
    1
}

#[no_mangle]
pub unsafe extern "C" fn SDL_EventState(type_: u32, state: c_int) -> u8 {
    let mut queue = QUEUE.lock();
    let current = if queue.disabled.contains(&type_) {
        SDL_DISABLE
    } else {
        SDL_ENABLE
    };
    if state != current {
        match state {
            SDL_DISABLE => {
                queue.disabled.insert(type_);
                queue.events.retain(|event| event.type_.raw() != type_);
            }
            SDL_ENABLE => {
                queue.disabled.remove(&type_);
            }
            _ => {}
        }
    }
    current as u8
}

/// First id of a fresh block of `numevents` user event ids, or `u32::MAX`.
#[no_mangle]
pub unsafe extern "C" fn SDL_RegisterEvents(numevents: c_int) -> u32 {
    let mut queue = QUEUE.lock();
    let next = queue.next_user_event;
    if numevents > 0 && next as i64 + numevents as i64 <= EventType::LASTEVENT.raw() as i64 {
        queue.next_user_event = next + numevents as u32;
        next
    } else {
        u32::MAX
    }
}
