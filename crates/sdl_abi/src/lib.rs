#![forbid(unsafe_op_in_unsafe_fn)]

pub mod contract;
pub mod layout;

mod event_type;
mod records;
mod types;

pub use event_type::EventType;
pub use records::*;
pub use types::*;

/// Version of the native headers these records mirror.
pub const SDL_MAJOR_VERSION: u8 = 2;
pub const SDL_MINOR_VERSION: u8 = 0;
pub const SDL_PATCHLEVEL: u8 = 3;

pub const SDL_FALSE: core::ffi::c_int = 0;
pub const SDL_TRUE: core::ffi::c_int = 1;

pub const SDL_RELEASED: u8 = 0;
pub const SDL_PRESSED: u8 = 1;

/// Size of `SDL_Event` on every supported target.
pub const SDL_EVENT_SIZE: usize = 56;

/// Gap the C compiler leaves after a 4-byte field that precedes a pointer.
pub const POINTER_GAP: usize = if core::mem::size_of::<usize>() == 8 { 4 } else { 0 };

/// Tail padding of records holding a 64-bit integer and ending on a 4-byte
/// boundary, when 64-bit integers are 8-byte aligned.
pub const I64_TAIL_PAD: usize = if core::mem::align_of::<i64>() == 8 { 4 } else { 0 };

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{align_of, size_of};

    #[test]
    fn abi_constants_match_contract() {
        assert_eq!(SDL_FALSE, 0);
        assert_eq!(SDL_TRUE, 1);
        assert_eq!(SDL_RELEASED, 0);
        assert_eq!(SDL_PRESSED, 1);
        assert_eq!(SDL_EVENT_SIZE, 56);
    }

    #[test]
    fn event_union_layout_matches_c_abi() {
        assert_eq!(size_of::<EventUnion>(), 56);
        assert_eq!(align_of::<EventUnion>(), align_of::<i64>());
    }

    #[test]
    fn keyboard_event_layout_matches_c_abi() {
        assert_eq!(size_of::<Keysym>(), 16);
        assert_eq!(size_of::<KeyboardEvent>(), 32);
        assert_eq!(align_of::<KeyboardEvent>(), 4);
    }

    #[test]
    fn touch_records_layout_matches_c_abi() {
        let wide = align_of::<i64>() == 8;
        assert_eq!(size_of::<TouchFingerEvent>(), if wide { 48 } else { 44 });
        assert_eq!(size_of::<MultiGestureEvent>(), if wide { 40 } else { 36 });
        assert_eq!(size_of::<DollarGestureEvent>(), 40);
    }

    #[test]
    fn surface_layout_matches_c_abi() {
        let ptr_size = size_of::<*const core::ffi::c_void>();
        let expected_size = if ptr_size == 8 { 96 } else { 60 };

        assert_eq!(size_of::<Surface>(), expected_size);
        assert_eq!(align_of::<Surface>(), ptr_size);
    }

    #[test]
    fn pixel_format_layout_matches_c_abi() {
        let ptr_size = size_of::<*const core::ffi::c_void>();
        let expected_size = if ptr_size == 8 { 56 } else { 44 };

        assert_eq!(size_of::<PixelFormat>(), expected_size);
    }

    #[test]
    fn user_event_layout_matches_c_abi() {
        let ptr_size = size_of::<*const core::ffi::c_void>();
        assert_eq!(size_of::<UserEvent>(), 16 + 2 * ptr_size);
    }
}
