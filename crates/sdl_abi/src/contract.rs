//! Host/native record pairs that must stay layout-equivalent.
//!
//! Native layouts are described with the field names and C types of the SDL
//! headers and laid out for the current target, so the pairs are checked on
//! whatever target the tests run on.

use crate::host_layout;
use crate::layout::{AbiField, CType, FieldKind, NativeRecord, RecordLayout};
use crate::*;

impl AbiField for EventType {
    const KIND: FieldKind = FieldKind::Int;
}

macro_rules! record_fields {
    ($($record:ty),* $(,)?) => {
        $(
            impl AbiField for $record {
                const KIND: FieldKind = FieldKind::Record;
            }
        )*
    };
}

record_fields!(Keysym, JoystickGUID, Color, Rect, Point, Version);

fn event_header(name: &'static str) -> NativeRecord {
    NativeRecord::new(name)
        .field("type", CType::U32)
        .field("timestamp", CType::U32)
}

fn padding_u8(record: NativeRecord, names: &[&'static str]) -> NativeRecord {
    names
        .iter()
        .fold(record, |record, name| record.field(*name, CType::U8))
}

fn native_keysym() -> RecordLayout {
    NativeRecord::new("SDL_Keysym")
        .field("scancode", CType::Enum)
        .field("sym", CType::I32)
        .field("mod", CType::U16)
        .field("unused", CType::U32)
        .layout()
}

fn native_rect() -> RecordLayout {
    NativeRecord::new("SDL_Rect")
        .field("x", CType::I32)
        .field("y", CType::I32)
        .field("w", CType::I32)
        .field("h", CType::I32)
        .layout()
}

fn event_pairs() -> Vec<(RecordLayout, RecordLayout)> {
    let keysym = native_keysym();
    vec![
        (
            host_layout!(WindowEvent {
                type_, timestamp, window_id, event, padding1, padding2, padding3, data1, data2
            }),
            padding_u8(
                event_header("SDL_WindowEvent")
                    .field("windowID", CType::U32)
                    .field("event", CType::U8),
                &["padding1", "padding2", "padding3"],
            )
            .field("data1", CType::I32)
            .field("data2", CType::I32)
            .layout(),
        ),
        (
            host_layout!(KeyboardEvent {
                type_, timestamp, window_id, state, repeat, padding2, padding3, keysym
            }),
            padding_u8(
                event_header("SDL_KeyboardEvent")
                    .field("windowID", CType::U32)
                    .field("state", CType::U8)
                    .field("repeat", CType::U8),
                &["padding2", "padding3"],
            )
            .field("keysym", CType::record(&keysym))
            .layout(),
        ),
        (
            host_layout!(TextEditingEvent { type_, timestamp, window_id, text, start, length }),
            event_header("SDL_TextEditingEvent")
                .field("windowID", CType::U32)
                .field("text", CType::array(CType::I8, TEXTEDITINGEVENT_TEXT_SIZE))
                .field("start", CType::I32)
                .field("length", CType::I32)
                .layout(),
        ),
        (
            host_layout!(TextInputEvent { type_, timestamp, window_id, text }),
            event_header("SDL_TextInputEvent")
                .field("windowID", CType::U32)
                .field("text", CType::array(CType::I8, TEXTINPUTEVENT_TEXT_SIZE))
                .layout(),
        ),
        (
            host_layout!(MouseMotionEvent {
                type_, timestamp, window_id, which, state, padding1, padding2, padding3,
                x, y, xrel, yrel
            }),
            padding_u8(
                event_header("SDL_MouseMotionEvent")
                    .field("windowID", CType::U32)
                    .field("which", CType::U32)
                    .field("state", CType::U8),
                &["padding1", "padding2", "padding3"],
            )
            .field("x", CType::I32)
            .field("y", CType::I32)
            .field("xrel", CType::I32)
            .field("yrel", CType::I32)
            .layout(),
        ),
        (
            host_layout!(MouseButtonEvent {
                type_, timestamp, window_id, which, button, state, padding1, padding2, x, y
            }),
            padding_u8(
                event_header("SDL_MouseButtonEvent")
                    .field("windowID", CType::U32)
                    .field("which", CType::U32)
                    .field("button", CType::U8)
                    .field("state", CType::U8),
                &["padding1", "padding2"],
            )
            .field("x", CType::I32)
            .field("y", CType::I32)
            .layout(),
        ),
        (
            host_layout!(MouseWheelEvent { type_, timestamp, window_id, which, x, y }),
            event_header("SDL_MouseWheelEvent")
                .field("windowID", CType::U32)
                .field("which", CType::U32)
                .field("x", CType::I32)
                .field("y", CType::I32)
                .layout(),
        ),
        (
            host_layout!(JoyAxisEvent {
                type_, timestamp, which, axis, padding1, padding2, padding3, value, padding4
            }),
            padding_u8(
                event_header("SDL_JoyAxisEvent")
                    .field("which", CType::I32)
                    .field("axis", CType::U8),
                &["padding1", "padding2", "padding3"],
            )
            .field("value", CType::I16)
            .field("padding4", CType::U16)
            .layout(),
        ),
        (
            host_layout!(JoyBallEvent {
                type_, timestamp, which, ball, padding1, padding2, padding3, xrel, yrel
            }),
            padding_u8(
                event_header("SDL_JoyBallEvent")
                    .field("which", CType::I32)
                    .field("ball", CType::U8),
                &["padding1", "padding2", "padding3"],
            )
            .field("xrel", CType::I16)
            .field("yrel", CType::I16)
            .layout(),
        ),
        (
            host_layout!(JoyHatEvent { type_, timestamp, which, hat, value, padding1, padding2 }),
            padding_u8(
                event_header("SDL_JoyHatEvent")
                    .field("which", CType::I32)
                    .field("hat", CType::U8)
                    .field("value", CType::U8),
                &["padding1", "padding2"],
            )
            .layout(),
        ),
        (
            host_layout!(JoyButtonEvent { type_, timestamp, which, button, state, padding1, padding2 }),
            padding_u8(
                event_header("SDL_JoyButtonEvent")
                    .field("which", CType::I32)
                    .field("button", CType::U8)
                    .field("state", CType::U8),
                &["padding1", "padding2"],
            )
            .layout(),
        ),
        (
            host_layout!(JoyDeviceEvent { type_, timestamp, which }),
            event_header("SDL_JoyDeviceEvent")
                .field("which", CType::I32)
                .layout(),
        ),
        (
            host_layout!(ControllerAxisEvent {
                type_, timestamp, which, axis, padding1, padding2, padding3, value, padding4
            }),
            padding_u8(
                event_header("SDL_ControllerAxisEvent")
                    .field("which", CType::I32)
                    .field("axis", CType::U8),
                &["padding1", "padding2", "padding3"],
            )
            .field("value", CType::I16)
            .field("padding4", CType::U16)
            .layout(),
        ),
        (
            host_layout!(ControllerButtonEvent {
                type_, timestamp, which, button, state, padding1, padding2
            }),
            padding_u8(
                event_header("SDL_ControllerButtonEvent")
                    .field("which", CType::I32)
                    .field("button", CType::U8)
                    .field("state", CType::U8),
                &["padding1", "padding2"],
            )
            .layout(),
        ),
        (
            host_layout!(ControllerDeviceEvent { type_, timestamp, which }),
            event_header("SDL_ControllerDeviceEvent")
                .field("which", CType::I32)
                .layout(),
        ),
        (
            host_layout!(TouchFingerEvent {
                type_, timestamp, touch_id, finger_id, x, y, dx, dy, pressure, padding_tail
            }),
            event_header("SDL_TouchFingerEvent")
                .field("touchId", CType::I64)
                .field("fingerId", CType::I64)
                .field("x", CType::F32)
                .field("y", CType::F32)
                .field("dx", CType::F32)
                .field("dy", CType::F32)
                .field("pressure", CType::F32)
                .layout(),
        ),
        (
            host_layout!(MultiGestureEvent {
                type_, timestamp, touch_id, d_theta, d_dist, x, y, num_fingers, padding,
                padding_tail
            }),
            event_header("SDL_MultiGestureEvent")
                .field("touchId", CType::I64)
                .field("dTheta", CType::F32)
                .field("dDist", CType::F32)
                .field("x", CType::F32)
                .field("y", CType::F32)
                .field("numFingers", CType::U16)
                .field("padding", CType::U16)
                .layout(),
        ),
        (
            host_layout!(DollarGestureEvent {
                type_, timestamp, touch_id, gesture_id, num_fingers, error, x, y
            }),
            event_header("SDL_DollarGestureEvent")
                .field("touchId", CType::I64)
                .field("gestureId", CType::I64)
                .field("numFingers", CType::U32)
                .field("error", CType::F32)
                .field("x", CType::F32)
                .field("y", CType::F32)
                .layout(),
        ),
        (
            host_layout!(DropEvent { type_, timestamp, file }),
            event_header("SDL_DropEvent")
                .field("file", CType::Ptr)
                .layout(),
        ),
        (
            host_layout!(QuitEvent { type_, timestamp }),
            event_header("SDL_QuitEvent").layout(),
        ),
        (
            host_layout!(UserEvent { type_, timestamp, window_id, code, data1, data2 }),
            event_header("SDL_UserEvent")
                .field("windowID", CType::U32)
                .field("code", CType::I32)
                .field("data1", CType::Ptr)
                .field("data2", CType::Ptr)
                .layout(),
        ),
        (
            host_layout!(SysWMEvent { type_, timestamp, msg }),
            event_header("SDL_SysWMEvent")
                .field("msg", CType::Ptr)
                .layout(),
        ),
    ]
}

fn video_pairs() -> Vec<(RecordLayout, RecordLayout)> {
    let rect = native_rect();
    let version = NativeRecord::new("SDL_version")
        .field("major", CType::U8)
        .field("minor", CType::U8)
        .field("patch", CType::U8)
        .layout();
    let message_box_color = NativeRecord::new("SDL_MessageBoxColor")
        .field("r", CType::U8)
        .field("g", CType::U8)
        .field("b", CType::U8)
        .layout();
    vec![
        (
            host_layout!(Keysym { scancode, sym, mod_, padding, unused }),
            native_keysym(),
        ),
        (
            host_layout!(JoystickGUID { data }),
            NativeRecord::new("SDL_JoystickGUID")
                .field("data", CType::array(CType::U8, 16))
                .layout(),
        ),
        (
            host_layout!(Color { r, g, b, a }),
            NativeRecord::new("SDL_Color")
                .field("r", CType::U8)
                .field("g", CType::U8)
                .field("b", CType::U8)
                .field("a", CType::U8)
                .layout(),
        ),
        (
            host_layout!(Palette { ncolors, padding, colors, version, refcount }),
            NativeRecord::new("SDL_Palette")
                .field("ncolors", CType::I32)
                .field("colors", CType::Ptr)
                .field("version", CType::U32)
                .field("refcount", CType::I32)
                .layout(),
        ),
        (
            host_layout!(PixelFormat {
                format, padding0, palette, bits_per_pixel, bytes_per_pixel, padding,
                rmask, gmask, bmask, amask, rloss, gloss, bloss, aloss,
                rshift, gshift, bshift, ashift, refcount, next
            }),
            NativeRecord::new("SDL_PixelFormat")
                .field("format", CType::U32)
                .field("palette", CType::Ptr)
                .field("BitsPerPixel", CType::U8)
                .field("BytesPerPixel", CType::U8)
                .field("padding", CType::array(CType::U8, 2))
                .field("Rmask", CType::U32)
                .field("Gmask", CType::U32)
                .field("Bmask", CType::U32)
                .field("Amask", CType::U32)
                .field("Rloss", CType::U8)
                .field("Gloss", CType::U8)
                .field("Bloss", CType::U8)
                .field("Aloss", CType::U8)
                .field("Rshift", CType::U8)
                .field("Gshift", CType::U8)
                .field("Bshift", CType::U8)
                .field("Ashift", CType::U8)
                .field("refcount", CType::I32)
                .field("next", CType::Ptr)
                .layout(),
        ),
        (
            host_layout!(Point { x, y }),
            NativeRecord::new("SDL_Point")
                .field("x", CType::I32)
                .field("y", CType::I32)
                .layout(),
        ),
        (host_layout!(Rect { x, y, w, h }), rect.clone()),
        (
            host_layout!(Surface {
                flags, padding0, format, w, h, pitch, padding1, pixels, userdata, locked,
                padding2, lock_data, clip_rect, map, refcount, padding3
            }),
            NativeRecord::new("SDL_Surface")
                .field("flags", CType::U32)
                .field("format", CType::Ptr)
                .field("w", CType::I32)
                .field("h", CType::I32)
                .field("pitch", CType::I32)
                .field("pixels", CType::Ptr)
                .field("userdata", CType::Ptr)
                .field("locked", CType::I32)
                .field("lock_data", CType::Ptr)
                .field("clip_rect", CType::record(&rect))
                .field("map", CType::Ptr)
                .field("refcount", CType::I32)
                .layout(),
        ),
        (host_layout!(Version { major, minor, patch }), version.clone()),
        (
            host_layout!(DisplayMode { format, w, h, refresh_rate, driverdata }),
            NativeRecord::new("SDL_DisplayMode")
                .field("format", CType::U32)
                .field("w", CType::I32)
                .field("h", CType::I32)
                .field("refresh_rate", CType::I32)
                .field("driverdata", CType::Ptr)
                .layout(),
        ),
        (
            host_layout!(RendererInfo {
                name, flags, num_texture_formats, texture_formats, max_texture_width,
                max_texture_height
            }),
            NativeRecord::new("SDL_RendererInfo")
                .field("name", CType::Ptr)
                .field("flags", CType::U32)
                .field("num_texture_formats", CType::U32)
                .field("texture_formats", CType::array(CType::U32, 16))
                .field("max_texture_width", CType::I32)
                .field("max_texture_height", CType::I32)
                .layout(),
        ),
        (
            host_layout!(MessageBoxButtonData { flags, buttonid, text }),
            NativeRecord::new("SDL_MessageBoxButtonData")
                .field("flags", CType::U32)
                .field("buttonid", CType::I32)
                .field("text", CType::Ptr)
                .layout(),
        ),
        (
            host_layout!(MessageBoxColor { r, g, b }),
            message_box_color.clone(),
        ),
        (
            host_layout!(MessageBoxColorScheme { colors }),
            NativeRecord::new("SDL_MessageBoxColorScheme")
                .field("colors", CType::array(CType::record(&message_box_color), 5))
                .layout(),
        ),
        (
            host_layout!(MessageBoxData {
                flags, padding0, window, title, message, numbuttons, padding1, buttons,
                color_scheme
            }),
            NativeRecord::new("SDL_MessageBoxData")
                .field("flags", CType::U32)
                .field("window", CType::Ptr)
                .field("title", CType::Ptr)
                .field("message", CType::Ptr)
                .field("numbuttons", CType::I32)
                .field("buttons", CType::Ptr)
                .field("colorScheme", CType::Ptr)
                .layout(),
        ),
        (
            host_layout!(SysWMinfo { version, padding, subsystem, info }),
            NativeRecord::new("SDL_SysWMinfo")
                .field("version", CType::record(&version))
                .field("subsystem", CType::Enum)
                .field("info", CType::array(CType::UintPtr, 64 / core::mem::size_of::<usize>()))
                .layout(),
        ),
        (
            host_layout!(MixChunk { allocated, padding, abuf, alen, volume, padding_tail }),
            NativeRecord::new("Mix_Chunk")
                .field("allocated", CType::I32)
                .field("abuf", CType::Ptr)
                .field("alen", CType::U32)
                .field("volume", CType::U8)
                .layout(),
        ),
    ]
}

/// Every (host, native) pair the bridge relies on.
pub fn declared_pairs() -> Vec<(RecordLayout, RecordLayout)> {
    let mut pairs = event_pairs();
    pairs.extend(video_pairs());
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::check_pair;
    use core::mem::size_of;

    #[test]
    fn every_declared_pair_matches() {
        let failures: Vec<String> = declared_pairs()
            .iter()
            .filter_map(|(host, native)| check_pair(host, native).err())
            .map(|err| err.to_string())
            .collect();
        assert!(failures.is_empty(), "layout mismatches: {failures:#?}");
    }

    #[test]
    fn every_event_record_is_declared() {
        let events = event_pairs();
        assert_eq!(events.len(), 22);
        for (host, _) in &events {
            assert!(host.size <= size_of::<EventUnion>(), "{} too large", host.name);
        }
    }

    #[test]
    fn event_union_matches_native_size() {
        assert_eq!(size_of::<EventUnion>(), SDL_EVENT_SIZE);
    }
}
