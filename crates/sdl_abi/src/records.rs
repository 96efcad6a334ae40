//! Event records of `SDL_events.h`.
//!
//! Every record starts with the [`EventType`] tag followed by a timestamp, and
//! spells out the padding the C compiler would insert. None of these structs
//! has implicit padding, so every byte of a record value is initialized and
//! any byte pattern is a valid record.

use core::ffi::{c_char, c_void};
use core::mem::{align_of, size_of};
use core::ptr;

use crate::types::Keysym;
use crate::{EventType, I64_TAIL_PAD, SDL_EVENT_SIZE};

/// Window state change event data.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub window_id: u32,
    /// One of the `WINDOWEVENT_*` ids.
    pub event: u8,
    pub padding1: u8,
    pub padding2: u8,
    pub padding3: u8,
    pub data1: i32,
    pub data2: i32,
}

/// KEYDOWN or KEYUP.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub window_id: u32,
    /// [`SDL_PRESSED`](crate::SDL_PRESSED) or [`SDL_RELEASED`](crate::SDL_RELEASED).
    pub state: u8,
    /// Non-zero if this is a key repeat.
    pub repeat: u8,
    pub padding2: u8,
    pub padding3: u8,
    pub keysym: Keysym,
}

pub const TEXTEDITINGEVENT_TEXT_SIZE: usize = 32;
pub const TEXTINPUTEVENT_TEXT_SIZE: usize = 32;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextEditingEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub window_id: u32,
    pub text: [c_char; TEXTEDITINGEVENT_TEXT_SIZE],
    pub start: i32,
    pub length: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextInputEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub window_id: u32,
    pub text: [c_char; TEXTINPUTEVENT_TEXT_SIZE],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseMotionEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub window_id: u32,
    pub which: u32,
    pub state: u8,
    pub padding1: u8,
    pub padding2: u8,
    pub padding3: u8,
    pub x: i32,
    pub y: i32,
    pub xrel: i32,
    pub yrel: i32,
}

/// MOUSEBUTTONDOWN or MOUSEBUTTONUP.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseButtonEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub window_id: u32,
    pub which: u32,
    pub button: u8,
    pub state: u8,
    pub padding1: u8,
    pub padding2: u8,
    pub x: i32,
    pub y: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseWheelEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub window_id: u32,
    pub which: u32,
    pub x: i32,
    pub y: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoyAxisEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub which: i32,
    pub axis: u8,
    pub padding1: u8,
    pub padding2: u8,
    pub padding3: u8,
    pub value: i16,
    pub padding4: u16,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoyBallEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub which: i32,
    pub ball: u8,
    pub padding1: u8,
    pub padding2: u8,
    pub padding3: u8,
    pub xrel: i16,
    pub yrel: i16,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoyHatEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub which: i32,
    pub hat: u8,
    /// Hat position bits; zero means centered.
    pub value: u8,
    pub padding1: u8,
    pub padding2: u8,
}

/// JOYBUTTONDOWN or JOYBUTTONUP.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoyButtonEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub which: i32,
    pub button: u8,
    pub state: u8,
    pub padding1: u8,
    pub padding2: u8,
}

/// JOYDEVICEADDED (`which` is the device index) or JOYDEVICEREMOVED
/// (`which` is the instance id).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoyDeviceEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub which: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerAxisEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub which: i32,
    pub axis: u8,
    pub padding1: u8,
    pub padding2: u8,
    pub padding3: u8,
    pub value: i16,
    pub padding4: u16,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerButtonEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub which: i32,
    pub button: u8,
    pub state: u8,
    pub padding1: u8,
    pub padding2: u8,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerDeviceEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub which: i32,
}

/// FINGERMOTION, FINGERDOWN or FINGERUP.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchFingerEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub touch_id: i64,
    pub finger_id: i64,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub pressure: f32,
    pub padding_tail: [u8; I64_TAIL_PAD],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MultiGestureEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub touch_id: i64,
    pub d_theta: f32,
    pub d_dist: f32,
    pub x: f32,
    pub y: f32,
    pub num_fingers: u16,
    pub padding: u16,
    pub padding_tail: [u8; I64_TAIL_PAD],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DollarGestureEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub touch_id: i64,
    pub gesture_id: i64,
    pub num_fingers: u32,
    pub error: f32,
    pub x: f32,
    pub y: f32,
}

/// A file dropped onto the application.
///
/// `file` is allocated by the native library and must be released exactly
/// once by whoever receives the event. The record is deliberately neither
/// `Copy` nor `Clone`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub struct DropEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub file: *mut c_char,
}

impl Default for DropEvent {
    fn default() -> Self {
        Self {
            type_: EventType::DROPFILE,
            timestamp: 0,
            file: ptr::null_mut(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuitEvent {
    pub type_: EventType,
    pub timestamp: u32,
}

/// Caller-registered event, tagged anywhere in `USEREVENT..=LASTEVENT`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub window_id: u32,
    pub code: i32,
    pub data1: *mut c_void,
    pub data2: *mut c_void,
}

impl Default for UserEvent {
    fn default() -> Self {
        Self {
            type_: EventType::USEREVENT,
            timestamp: 0,
            window_id: 0,
            code: 0,
            data1: ptr::null_mut(),
            data2: ptr::null_mut(),
        }
    }
}

/// Video-driver-dependent message (`SDL_SysWMmsg`), never dereferenced here.
#[repr(C)]
pub struct SysWMmsg {
    _private: [u8; 0],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SysWMEvent {
    pub type_: EventType,
    pub timestamp: u32,
    pub msg: *mut SysWMmsg,
}

impl Default for SysWMEvent {
    fn default() -> Self {
        Self {
            type_: EventType::SYSWMEVENT,
            timestamp: 0,
            msg: ptr::null_mut(),
        }
    }
}

/// The generic `SDL_Event`: a tag followed by opaque bytes.
///
/// Sized and aligned exactly like the native union; used as the buffer for
/// every queue read and write.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventUnion {
    pub type_: EventType,
    pub padding: [u8; SDL_EVENT_SIZE - 4],
    align: [u64; 0],
}

impl EventUnion {
    /// A zeroed union carrying `type_`.
    pub const fn new(type_: EventType) -> Self {
        Self {
            type_,
            padding: [0; SDL_EVENT_SIZE - 4],
            align: [],
        }
    }

    pub fn as_bytes(&self) -> &[u8; SDL_EVENT_SIZE] {
        // SAFETY: repr(C), no implicit padding, size asserted below.
        unsafe { &*(self as *const Self).cast::<[u8; SDL_EVENT_SIZE]>() }
    }
}

impl Default for EventUnion {
    fn default() -> Self {
        Self::new(EventType::FIRSTEVENT)
    }
}

macro_rules! assert_fits_union {
    ($($record:ty),* $(,)?) => {
        $(
            const _: () = {
                assert!(size_of::<$record>() <= size_of::<EventUnion>());
                assert!(align_of::<$record>() <= align_of::<EventUnion>());
            };
        )*
    };
}

const _: () = assert!(size_of::<EventUnion>() == SDL_EVENT_SIZE);

assert_fits_union!(
    WindowEvent,
    KeyboardEvent,
    TextEditingEvent,
    TextInputEvent,
    MouseMotionEvent,
    MouseButtonEvent,
    MouseWheelEvent,
    JoyAxisEvent,
    JoyBallEvent,
    JoyHatEvent,
    JoyButtonEvent,
    JoyDeviceEvent,
    ControllerAxisEvent,
    ControllerButtonEvent,
    ControllerDeviceEvent,
    TouchFingerEvent,
    MultiGestureEvent,
    DollarGestureEvent,
    DropEvent,
    QuitEvent,
    UserEvent,
    SysWMEvent,
);
