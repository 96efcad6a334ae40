//! The tagged event union and its concrete records.
//!
//! Reading never copies: a union with a recognized tag is viewed in place as
//! the record that tag selects, and anything else comes back as
//! [`Event::Generic`]. Writing checks the record's own tag and copies exactly
//! the record's bytes to the front of the union.

pub mod queue;

use std::any::{type_name, Any};
use std::ffi::CStr;
use std::mem::{align_of, size_of};
use std::ptr;

use tracing::trace;

pub use sdl_abi::{
    ControllerAxisEvent, ControllerButtonEvent, ControllerDeviceEvent, DollarGestureEvent,
    DropEvent, EventType, EventUnion, JoyAxisEvent, JoyBallEvent, JoyButtonEvent, JoyDeviceEvent,
    JoyHatEvent, KeyboardEvent, MouseButtonEvent, MouseMotionEvent, MouseWheelEvent,
    MultiGestureEvent, QuitEvent, SysWMEvent, TextEditingEvent, TextInputEvent, TouchFingerEvent,
    UserEvent, WindowEvent, SDL_EVENT_SIZE,
};

use crate::error::{Error, Result};
use crate::ownership::NativeString;

/// A concrete event payload that can be written into an [`EventUnion`].
pub trait EventRecord: Any {
    fn event_type(&self) -> EventType;

    fn as_any(&self) -> &dyn Any;

    fn record_name(&self) -> &'static str {
        type_name::<Self>()
    }
}

macro_rules! event_records {
    ($($record:ty),* $(,)?) => {
        $(
            impl EventRecord for $record {
                fn event_type(&self) -> EventType {
                    self.type_
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*

        /// Copies `event` into `target` if it is one of the known records.
        fn write_known(event: &dyn EventRecord, target: &mut EventUnion) -> bool {
            let any = event.as_any();
            $(
                if let Some(record) = any.downcast_ref::<$record>() {
                    write_record(record, target);
                    return true;
                }
            )*
            false
        }
    };
}

event_records!(
    QuitEvent,
    WindowEvent,
    SysWMEvent,
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
    UserEvent,
);

/// A borrowed, refined view of an [`EventUnion`].
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    Quit(&'a QuitEvent),
    Window(&'a WindowEvent),
    SysWM(&'a SysWMEvent),
    Keyboard(&'a KeyboardEvent),
    TextEditing(&'a TextEditingEvent),
    TextInput(&'a TextInputEvent),
    MouseMotion(&'a MouseMotionEvent),
    MouseButton(&'a MouseButtonEvent),
    MouseWheel(&'a MouseWheelEvent),
    JoyAxis(&'a JoyAxisEvent),
    JoyBall(&'a JoyBallEvent),
    JoyHat(&'a JoyHatEvent),
    JoyButton(&'a JoyButtonEvent),
    JoyDevice(&'a JoyDeviceEvent),
    ControllerAxis(&'a ControllerAxisEvent),
    ControllerButton(&'a ControllerButtonEvent),
    ControllerDevice(&'a ControllerDeviceEvent),
    TouchFinger(&'a TouchFingerEvent),
    MultiGesture(&'a MultiGestureEvent),
    DollarGesture(&'a DollarGestureEvent),
    Drop(&'a DropEvent),
    User(&'a UserEvent),
    /// Unknown or excluded tag; the raw union is all there is.
    Generic(&'a EventUnion),
}

impl Event<'_> {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::Quit(e) => e.type_,
            Event::Window(e) => e.type_,
            Event::SysWM(e) => e.type_,
            Event::Keyboard(e) => e.type_,
            Event::TextEditing(e) => e.type_,
            Event::TextInput(e) => e.type_,
            Event::MouseMotion(e) => e.type_,
            Event::MouseButton(e) => e.type_,
            Event::MouseWheel(e) => e.type_,
            Event::JoyAxis(e) => e.type_,
            Event::JoyBall(e) => e.type_,
            Event::JoyHat(e) => e.type_,
            Event::JoyButton(e) => e.type_,
            Event::JoyDevice(e) => e.type_,
            Event::ControllerAxis(e) => e.type_,
            Event::ControllerButton(e) => e.type_,
            Event::ControllerDevice(e) => e.type_,
            Event::TouchFinger(e) => e.type_,
            Event::MultiGesture(e) => e.type_,
            Event::DollarGesture(e) => e.type_,
            Event::Drop(e) => e.type_,
            Event::User(e) => e.type_,
            Event::Generic(e) => e.type_,
        }
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, Event::Generic(_))
    }
}

fn view<T: EventRecord>(event: &EventUnion) -> &T {
    const { assert!(size_of::<T>() <= SDL_EVENT_SIZE && align_of::<T>() <= align_of::<EventUnion>()) };
    // SAFETY: T is a padding-free repr(C) record for which every byte pattern
    // is valid, and it fits inside the union in size and alignment.
    unsafe { &*(event as *const EventUnion).cast::<T>() }
}

fn write_record<T: EventRecord>(record: &T, target: &mut EventUnion) {
    const { assert!(size_of::<T>() <= SDL_EVENT_SIZE) };
    // SAFETY: both sides are valid for size_of::<T>() bytes and cannot overlap
    // (one is borrowed shared, the other exclusively).
    unsafe {
        ptr::copy_nonoverlapping(
            (record as *const T).cast::<u8>(),
            (target as *mut EventUnion).cast::<u8>(),
            size_of::<T>(),
        );
    }
}

/// Refines a union into the record its tag selects.
pub fn convert(event: &EventUnion) -> Event<'_> {
    let tag = event.type_;
    if !tag.is_valid() {
        trace!(tag = tag.raw(), "unrecognized event tag, keeping generic view");
        return Event::Generic(event);
    }
    match tag {
        EventType::QUIT => Event::Quit(view(event)),
        EventType::WINDOWEVENT => Event::Window(view(event)),
        EventType::SYSWMEVENT => Event::SysWM(view(event)),
        EventType::KEYDOWN | EventType::KEYUP => Event::Keyboard(view(event)),
        EventType::TEXTEDITING => Event::TextEditing(view(event)),
        EventType::TEXTINPUT => Event::TextInput(view(event)),
        EventType::MOUSEMOTION => Event::MouseMotion(view(event)),
        EventType::MOUSEBUTTONDOWN | EventType::MOUSEBUTTONUP => Event::MouseButton(view(event)),
        EventType::MOUSEWHEEL => Event::MouseWheel(view(event)),
        EventType::JOYAXISMOTION => Event::JoyAxis(view(event)),
        EventType::JOYBALLMOTION => Event::JoyBall(view(event)),
        EventType::JOYHATMOTION => Event::JoyHat(view(event)),
        EventType::JOYBUTTONDOWN | EventType::JOYBUTTONUP => Event::JoyButton(view(event)),
        EventType::JOYDEVICEADDED | EventType::JOYDEVICEREMOVED => Event::JoyDevice(view(event)),
        EventType::CONTROLLERAXISMOTION => Event::ControllerAxis(view(event)),
        EventType::CONTROLLERBUTTONDOWN | EventType::CONTROLLERBUTTONUP => {
            Event::ControllerButton(view(event))
        }
        EventType::CONTROLLERDEVICEADDED
        | EventType::CONTROLLERDEVICEREMOVED
        | EventType::CONTROLLERDEVICEREMAPPED => Event::ControllerDevice(view(event)),
        EventType::FINGERDOWN | EventType::FINGERUP | EventType::FINGERMOTION => {
            Event::TouchFinger(view(event))
        }
        EventType::MULTIGESTURE => Event::MultiGesture(view(event)),
        EventType::DOLLARGESTURE => Event::DollarGesture(view(event)),
        EventType::DROPFILE => Event::Drop(view(event)),
        tag if tag.is_user() => Event::User(view(event)),
        _ => Event::Generic(event),
    }
}

/// Writes a record into the front of `target`.
///
/// Bytes past the record's size are left as they were. On error `target`
/// is not touched.
pub fn copy_event_to_union(event: &dyn EventRecord, target: &mut EventUnion) -> Result<()> {
    let tag = event.event_type();
    if !tag.is_valid() {
        return Err(Error::InvalidEventType(tag));
    }
    if write_known(event, target) {
        Ok(())
    } else {
        Err(Error::UnknownEventRecord(event.record_name()))
    }
}

/// Union conversions, available as methods on [`EventUnion`].
pub trait EventUnionExt {
    fn convert(&self) -> Event<'_>;

    /// Zeroed union holding `event`.
    fn from_record(event: &dyn EventRecord) -> Result<EventUnion>;

    /// Mutable view of a DROPFILE payload, used to take the filename.
    fn drop_event_mut(&mut self) -> Option<&mut DropEvent>;
}

impl EventUnionExt for EventUnion {
    fn convert(&self) -> Event<'_> {
        convert(self)
    }

    fn from_record(event: &dyn EventRecord) -> Result<EventUnion> {
        let mut union = EventUnion::new(EventType::FIRSTEVENT);
        copy_event_to_union(event, &mut union)?;
        Ok(union)
    }

    fn drop_event_mut(&mut self) -> Option<&mut DropEvent> {
        if self.type_ != EventType::DROPFILE {
            return None;
        }
        // SAFETY: same layout argument as `view`; the exclusive borrow of the
        // union covers the record.
        Some(unsafe { &mut *(self as *mut EventUnion).cast::<DropEvent>() })
    }
}

/// Ownership of the filename carried by a [`DropEvent`].
///
/// The receiver of a DROPFILE event owns `file` and must free it once.
pub trait DropEventExt {
    /// Copy of the filename, if any.
    fn file(&self) -> Option<String>;

    /// Replaces the filename with a native copy of `path`, freeing the old one.
    fn set_file(&mut self, path: &str) -> Result<()>;

    /// Frees the filename and nulls the pointer. Idempotent.
    fn free_file(&mut self);

    /// Moves the filename out, leaving the pointer null.
    fn take_file(&mut self) -> Option<NativeString>;
}

impl DropEventExt for DropEvent {
    fn file(&self) -> Option<String> {
        if self.file.is_null() {
            return None;
        }
        // SAFETY: a non-null `file` is a NUL-terminated native string.
        Some(unsafe { CStr::from_ptr(self.file) }.to_string_lossy().into_owned())
    }

    fn set_file(&mut self, path: &str) -> Result<()> {
        let file = NativeString::new(path)?;
        self.free_file();
        self.file = file.into_raw();
        Ok(())
    }

    fn free_file(&mut self) {
        drop(self.take_file());
    }

    fn take_file(&mut self) -> Option<NativeString> {
        let file = std::mem::replace(&mut self.file, ptr::null_mut());
        // SAFETY: the event owned this SDL_malloc'd string; the pointer was
        // nulled above so ownership moves exactly once.
        unsafe { NativeString::from_raw(file) }
    }
}

#[cfg(test)]
mod tests {
    use sdl_abi::{Keysym, SDL_PRESSED};

    use super::*;

    const VALID_TAGS: &[EventType] = &[
        EventType::QUIT,
        EventType::WINDOWEVENT,
        EventType::SYSWMEVENT,
        EventType::KEYDOWN,
        EventType::KEYUP,
        EventType::TEXTEDITING,
        EventType::TEXTINPUT,
        EventType::MOUSEMOTION,
        EventType::MOUSEBUTTONDOWN,
        EventType::MOUSEBUTTONUP,
        EventType::MOUSEWHEEL,
        EventType::JOYAXISMOTION,
        EventType::JOYBALLMOTION,
        EventType::JOYHATMOTION,
        EventType::JOYBUTTONDOWN,
        EventType::JOYBUTTONUP,
        EventType::JOYDEVICEADDED,
        EventType::JOYDEVICEREMOVED,
        EventType::CONTROLLERAXISMOTION,
        EventType::CONTROLLERBUTTONDOWN,
        EventType::CONTROLLERBUTTONUP,
        EventType::CONTROLLERDEVICEADDED,
        EventType::CONTROLLERDEVICEREMOVED,
        EventType::CONTROLLERDEVICEREMAPPED,
        EventType::FINGERDOWN,
        EventType::FINGERUP,
        EventType::FINGERMOTION,
        EventType::DOLLARGESTURE,
        EventType::MULTIGESTURE,
        EventType::DROPFILE,
        EventType::USEREVENT,
        EventType::LASTEVENT,
    ];

    fn dirty_union(tag: EventType) -> EventUnion {
        let mut union = EventUnion::new(tag);
        union.padding = [0xAB; SDL_EVENT_SIZE - 4];
        union
    }

    #[test]
    fn every_valid_tag_dispatches_to_a_record() {
        for &tag in VALID_TAGS {
            let union = EventUnion::new(tag);
            let event = union.convert();
            assert!(!event.is_generic(), "{tag} fell back to generic");
            assert_eq!(event.event_type(), tag);
        }
    }

    #[test]
    fn multi_tag_records_share_one_shape() {
        assert!(matches!(EventUnion::new(EventType::KEYUP).convert(), Event::Keyboard(_)));
        assert!(matches!(
            EventUnion::new(EventType::MOUSEBUTTONUP).convert(),
            Event::MouseButton(_)
        ));
        assert!(matches!(
            EventUnion::new(EventType::CONTROLLERDEVICEREMAPPED).convert(),
            Event::ControllerDevice(_)
        ));
        assert!(matches!(
            EventUnion::new(EventType::FINGERMOTION).convert(),
            Event::TouchFinger(_)
        ));
    }

    #[test]
    fn excluded_and_unknown_tags_fall_back_to_generic() {
        for raw in [
            EventType::DOLLARRECORD.raw(),
            EventType::CLIPBOARDUPDATE.raw(),
            EventType::FIRSTEVENT.raw(),
            0x0500,
            EventType::LASTEVENT.raw() + 1,
            u32::MAX,
        ] {
            let union = dirty_union(EventType(raw));
            match union.convert() {
                Event::Generic(generic) => assert_eq!(generic.as_bytes(), union.as_bytes()),
                other => panic!("tag {raw:#x} refined to {other:?}"),
            }
        }
    }

    #[test]
    fn user_range_dispatches_to_user_record() {
        for raw in [
            EventType::USEREVENT.raw(),
            EventType::USEREVENT.raw() + 1,
            EventType::LASTEVENT.raw() - 1,
        ] {
            assert!(matches!(EventUnion::new(EventType(raw)).convert(), Event::User(_)));
        }
        let below = EventUnion::new(EventType(EventType::USEREVENT.raw() - 1));
        assert!(below.convert().is_generic());
    }

    #[test]
    fn keydown_round_trips_scancode_and_state() {
        let key = KeyboardEvent {
            type_: EventType::KEYDOWN,
            timestamp: 42,
            window_id: 3,
            state: SDL_PRESSED,
            keysym: Keysym {
                scancode: 41,
                sym: 27,
                ..Keysym::default()
            },
            ..KeyboardEvent::default()
        };
        let union = EventUnion::from_record(&key).unwrap();
        let Event::Keyboard(back) = union.convert() else {
            panic!("expected a keyboard record");
        };
        assert_eq!(back.keysym.scancode, 41);
        assert_eq!(back.state, SDL_PRESSED);
        assert_eq!(back.type_, EventType::KEYDOWN);
        assert_eq!(*back, key);
    }

    macro_rules! assert_round_trip {
        ($variant:ident, $record:expr) => {{
            let record = $record;
            let union = EventUnion::from_record(&record).unwrap();
            match union.convert() {
                Event::$variant(back) => assert_eq!(*back, record),
                other => panic!("expected {}, got {other:?}", stringify!($variant)),
            }
        }};
    }

    #[test]
    fn every_record_round_trips_through_the_union() {
        assert_round_trip!(Quit, QuitEvent { type_: EventType::QUIT, timestamp: 9 });
        assert_round_trip!(
            Window,
            WindowEvent {
                type_: EventType::WINDOWEVENT,
                window_id: 2,
                event: sdl_sys::SDL_WINDOWEVENT_RESIZED,
                data1: 640,
                data2: -480,
                ..WindowEvent::default()
            }
        );
        assert_round_trip!(
            SysWM,
            SysWMEvent {
                type_: EventType::SYSWMEVENT,
                timestamp: 5,
                msg: ptr::null_mut(),
            }
        );
        let mut text = [0; 32];
        for (slot, byte) in text.iter_mut().zip(b"hello") {
            *slot = *byte as std::ffi::c_char;
        }
        assert_round_trip!(
            TextEditing,
            TextEditingEvent {
                type_: EventType::TEXTEDITING,
                text,
                start: 1,
                length: 4,
                ..TextEditingEvent::default()
            }
        );
        assert_round_trip!(
            TextInput,
            TextInputEvent {
                type_: EventType::TEXTINPUT,
                window_id: 1,
                text,
                ..TextInputEvent::default()
            }
        );
        assert_round_trip!(
            MouseMotion,
            MouseMotionEvent {
                type_: EventType::MOUSEMOTION,
                which: 1,
                state: 1,
                x: 10,
                y: 20,
                xrel: -1,
                yrel: 2,
                ..MouseMotionEvent::default()
            }
        );
        assert_round_trip!(
            MouseButton,
            MouseButtonEvent {
                type_: EventType::MOUSEBUTTONDOWN,
                button: 3,
                state: SDL_PRESSED,
                x: 7,
                y: 8,
                ..MouseButtonEvent::default()
            }
        );
        assert_round_trip!(
            MouseWheel,
            MouseWheelEvent {
                type_: EventType::MOUSEWHEEL,
                x: 0,
                y: -3,
                ..MouseWheelEvent::default()
            }
        );
        assert_round_trip!(
            JoyAxis,
            JoyAxisEvent {
                type_: EventType::JOYAXISMOTION,
                which: 1,
                axis: 2,
                value: -32768,
                ..JoyAxisEvent::default()
            }
        );
        assert_round_trip!(
            JoyBall,
            JoyBallEvent {
                type_: EventType::JOYBALLMOTION,
                ball: 1,
                xrel: 4,
                yrel: -4,
                ..JoyBallEvent::default()
            }
        );
        assert_round_trip!(
            JoyHat,
            JoyHatEvent {
                type_: EventType::JOYHATMOTION,
                hat: 0,
                value: sdl_sys::SDL_HAT_LEFT,
                ..JoyHatEvent::default()
            }
        );
        assert_round_trip!(
            JoyButton,
            JoyButtonEvent {
                type_: EventType::JOYBUTTONUP,
                button: 5,
                state: 0,
                ..JoyButtonEvent::default()
            }
        );
        assert_round_trip!(
            JoyDevice,
            JoyDeviceEvent {
                type_: EventType::JOYDEVICEADDED,
                which: 2,
                ..JoyDeviceEvent::default()
            }
        );
        assert_round_trip!(
            ControllerAxis,
            ControllerAxisEvent {
                type_: EventType::CONTROLLERAXISMOTION,
                axis: 4,
                value: 1200,
                ..ControllerAxisEvent::default()
            }
        );
        assert_round_trip!(
            ControllerButton,
            ControllerButtonEvent {
                type_: EventType::CONTROLLERBUTTONDOWN,
                button: 6,
                state: SDL_PRESSED,
                ..ControllerButtonEvent::default()
            }
        );
        assert_round_trip!(
            ControllerDevice,
            ControllerDeviceEvent {
                type_: EventType::CONTROLLERDEVICEREMOVED,
                which: 1,
                ..ControllerDeviceEvent::default()
            }
        );
        assert_round_trip!(
            TouchFinger,
            TouchFingerEvent {
                type_: EventType::FINGERDOWN,
                touch_id: 1 << 40,
                finger_id: -7,
                x: 0.25,
                y: 0.75,
                dx: 0.5,
                dy: -0.5,
                pressure: 1.0,
                ..TouchFingerEvent::default()
            }
        );
        assert_round_trip!(
            MultiGesture,
            MultiGestureEvent {
                type_: EventType::MULTIGESTURE,
                touch_id: 12,
                d_theta: 0.1,
                d_dist: 0.2,
                x: 0.3,
                y: 0.4,
                num_fingers: 2,
                ..MultiGestureEvent::default()
            }
        );
        assert_round_trip!(
            DollarGesture,
            DollarGestureEvent {
                type_: EventType::DOLLARGESTURE,
                touch_id: 3,
                gesture_id: 99,
                num_fingers: 3,
                error: 0.5,
                x: 0.1,
                y: 0.9,
                ..DollarGestureEvent::default()
            }
        );
        assert_round_trip!(
            User,
            UserEvent {
                type_: EventType(EventType::USEREVENT.raw() + 5),
                code: 17,
                ..UserEvent::default()
            }
        );
        assert_round_trip!(Drop, DropEvent::default());
    }

    #[test]
    fn write_copies_only_the_record_prefix() {
        let mut union = dirty_union(EventType::FIRSTEVENT);
        let quit = QuitEvent {
            type_: EventType::QUIT,
            timestamp: 0x0102_0304,
        };
        copy_event_to_union(&quit, &mut union).unwrap();

        let bytes = union.as_bytes();
        assert_eq!(union.type_, EventType::QUIT);
        assert_eq!(&bytes[4..8], &0x0102_0304_u32.to_ne_bytes());
        assert!(bytes[size_of::<QuitEvent>()..].iter().all(|&byte| byte == 0xAB));
    }

    #[test]
    fn invalid_tag_is_rejected_without_touching_the_target() {
        for tag in [EventType::DOLLARRECORD, EventType(EventType::LASTEVENT.raw() + 1)] {
            let mut union = dirty_union(EventType::MOUSEWHEEL);
            let before = union;
            let quit = QuitEvent { type_: tag, timestamp: 1 };

            let err = copy_event_to_union(&quit, &mut union).unwrap_err();
            assert_eq!(err, Error::InvalidEventType(tag));
            assert_eq!(union, before);
        }
    }

    #[test]
    fn unknown_record_type_is_reported_by_name() {
        struct Custom;

        impl EventRecord for Custom {
            fn event_type(&self) -> EventType {
                EventType::QUIT
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        let mut union = EventUnion::default();
        let err = copy_event_to_union(&Custom, &mut union).unwrap_err();
        let Error::UnknownEventRecord(name) = err else {
            panic!("unexpected error {err:?}");
        };
        assert!(name.ends_with("Custom"));
        assert_eq!(union, EventUnion::default());
    }

    #[test]
    fn drop_filename_is_taken_exactly_once() {
        let mut drop_event = DropEvent::default();
        drop_event.set_file("/home/user/notes.txt").unwrap();
        let mut union = EventUnion::new(EventType::FIRSTEVENT);
        copy_event_to_union(&drop_event, &mut union).unwrap();
        // Ownership moved into the union.
        drop_event.file = ptr::null_mut();
        assert!(drop_event.file().is_none());

        let received = union.drop_event_mut().unwrap();
        assert_eq!(received.file().as_deref(), Some("/home/user/notes.txt"));
        let taken = received.take_file().unwrap();
        assert_eq!(taken.to_string_lossy(), "/home/user/notes.txt");
        assert!(received.take_file().is_none());
        assert!(received.file().is_none());
        received.free_file();
    }

    #[test]
    fn set_file_replaces_and_free_file_is_idempotent() {
        let mut drop_event = DropEvent::default();
        drop_event.set_file("a.png").unwrap();
        drop_event.set_file("b.png").unwrap();
        assert_eq!(drop_event.file().as_deref(), Some("b.png"));
        drop_event.free_file();
        drop_event.free_file();
        assert!(drop_event.file.is_null());
    }

    #[test]
    fn drop_view_requires_dropfile_tag() {
        let mut union = EventUnion::new(EventType::QUIT);
        assert!(union.drop_event_mut().is_none());
    }
}
