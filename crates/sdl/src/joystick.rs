use std::ffi::{c_char, c_int};

use sdl_abi::JoystickGUID;
use sdl_sys::SDL_Joystick;

use crate::error::{check_count, Error, Result};
use crate::handle::{resource, Handle};
use crate::native_flags;

native_flags! {
    /// Hat position bits; diagonals combine two directions.
    pub struct HatState(u8) {
        const CENTERED = sdl_sys::SDL_HAT_CENTERED;
        const UP = sdl_sys::SDL_HAT_UP;
        const RIGHT = sdl_sys::SDL_HAT_RIGHT;
        const DOWN = sdl_sys::SDL_HAT_DOWN;
        const LEFT = sdl_sys::SDL_HAT_LEFT;
    }
}

pub fn num_joysticks() -> Result<i32> {
    // SAFETY: no arguments.
    check_count(unsafe { sdl_sys::SDL_NumJoysticks() })
}

pub fn joystick_name_for_index(device_index: i32) -> Result<String> {
    // SAFETY: plain value argument; returns a static string or null.
    crate::static_str(unsafe { sdl_sys::SDL_JoystickNameForIndex(device_index) })
        .ok_or_else(|| Error::from_native(0))
}

/// Hex form of a GUID, 32 lowercase digits.
pub fn guid_string(guid: JoystickGUID) -> String {
    let mut buffer = [0 as c_char; 33];
    // SAFETY: `buffer` holds the advertised number of bytes.
    unsafe {
        sdl_sys::SDL_JoystickGetGUIDString(guid, buffer.as_mut_ptr(), buffer.len() as c_int);
        crate::error::copy_c_str(buffer.as_ptr())
    }
}

/// Refreshes the state of every open joystick when events are disabled.
pub fn joystick_update() {
    // SAFETY: no arguments.
    unsafe { sdl_sys::SDL_JoystickUpdate() }
}

resource!(JoystickResource, SDL_Joystick, "joystick", sdl_sys::SDL_JoystickClose);

#[derive(Debug)]
pub struct Joystick {
    handle: Handle<JoystickResource>,
}

impl Joystick {
    pub fn open(device_index: i32) -> Result<Self> {
        // SAFETY: plain value argument.
        let raw = unsafe { sdl_sys::SDL_JoystickOpen(device_index) };
        Ok(Self {
            handle: Handle::adopt(raw)?,
        })
    }

    pub fn raw(&self) -> *mut SDL_Joystick {
        self.handle.as_ptr()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub fn name(&self) -> Result<String> {
        let raw = self.handle.get()?;
        // SAFETY: live joystick; the name is copied immediately.
        crate::static_str(unsafe { sdl_sys::SDL_JoystickName(raw) })
            .ok_or_else(|| Error::from_native(0))
    }

    /// Identifier used by joystick events for this device while it stays attached.
    pub fn instance_id(&self) -> Result<i32> {
        let raw = self.handle.get()?;
        // SAFETY: live joystick.
        check_count(unsafe { sdl_sys::SDL_JoystickInstanceID(raw) })
    }

    fn count(&self, read: unsafe extern "C" fn(*mut SDL_Joystick) -> c_int) -> Result<i32> {
        let raw = self.handle.get()?;
        // SAFETY: live joystick.
        check_count(unsafe { read(raw) })
    }

    pub fn num_axes(&self) -> Result<i32> {
        self.count(sdl_sys::SDL_JoystickNumAxes)
    }

    pub fn num_balls(&self) -> Result<i32> {
        self.count(sdl_sys::SDL_JoystickNumBalls)
    }

    pub fn num_hats(&self) -> Result<i32> {
        self.count(sdl_sys::SDL_JoystickNumHats)
    }

    pub fn num_buttons(&self) -> Result<i32> {
        self.count(sdl_sys::SDL_JoystickNumButtons)
    }

    /// Reads one control. The native getters return 0 for an out-of-range
    /// index and only set the error string, so the range is checked here.
    fn control<T>(
        &self,
        index: i32,
        len: i32,
        read: unsafe extern "C" fn(*mut SDL_Joystick, c_int) -> T,
    ) -> Result<T> {
        let raw = self.handle.get()?;
        // SAFETY: live joystick.
        let value = unsafe { read(raw, index) };
        if (0..len).contains(&index) {
            Ok(value)
        } else {
            Err(Error::from_native(-1))
        }
    }

    /// Axis position in -32768..=32767.
    pub fn axis(&self, axis: i32) -> Result<i16> {
        self.control(axis, self.num_axes()?, sdl_sys::SDL_JoystickGetAxis)
    }

    pub fn hat(&self, hat: i32) -> Result<HatState> {
        self.control(hat, self.num_hats()?, sdl_sys::SDL_JoystickGetHat)
            .map(HatState::from_bits)
    }

    pub fn button(&self, button: i32) -> Result<bool> {
        self.control(button, self.num_buttons()?, sdl_sys::SDL_JoystickGetButton)
            .map(|pressed| pressed != 0)
    }

    pub fn guid(&self) -> Result<JoystickGUID> {
        let raw = self.handle.get()?;
        // SAFETY: live joystick.
        Ok(unsafe { sdl_sys::SDL_JoystickGetGUID(raw) })
    }

    pub fn close(&mut self) {
        self.handle.release();
    }
}

#[cfg(all(test, sdl_stub))]
mod tests {
    use sdl_sys::stub;

    use super::*;
    use crate::test_support::{serial, with_controllers};

    #[test]
    fn open_and_read_a_virtual_stick() {
        let _guard = serial();
        with_controllers(|| {
            let index = stub::attach_joystick("Stick One", 2, 3, 1);
            assert!(num_joysticks().unwrap() > index);
            assert_eq!(joystick_name_for_index(index).unwrap(), "Stick One");

            let mut joystick = Joystick::open(index).unwrap();
            assert_eq!(joystick.name().unwrap(), "Stick One");
            assert!(joystick.instance_id().unwrap() >= 0);
            assert_eq!(joystick.num_axes().unwrap(), 2);
            assert_eq!(joystick.num_buttons().unwrap(), 3);
            assert_eq!(joystick.num_hats().unwrap(), 1);
            assert_eq!(joystick.num_balls().unwrap(), 0);

            stub::set_joystick_axis(index, 1, -32768);
            stub::set_joystick_button(index, 2, true);
            stub::set_joystick_hat(index, 0, sdl_sys::SDL_HAT_UP | sdl_sys::SDL_HAT_RIGHT);
            joystick_update();
            assert_eq!(joystick.axis(1).unwrap(), -32768);
            assert!(joystick.button(2).unwrap());
            assert!(!joystick.button(0).unwrap());
            assert_eq!(joystick.hat(0).unwrap(), HatState::UP | HatState::RIGHT);

            joystick.close();
            joystick.close();
            assert_eq!(joystick.num_axes(), Err(Error::NullHandle("joystick")));
        });
    }

    #[test]
    fn out_of_range_controls_keep_the_native_message() {
        let _guard = serial();
        with_controllers(|| {
            let index = stub::attach_joystick("Stick Two", 2, 0, 0);
            let joystick = Joystick::open(index).unwrap();
            let err = joystick.axis(2).unwrap_err();
            assert_eq!(err.message(), "Joystick only has 2 axes");
            assert_eq!(err.code(), -1);
            assert!(joystick.button(0).is_err());
        });
    }

    #[test]
    fn guid_is_rendered_as_hex() {
        let _guard = serial();
        with_controllers(|| {
            let index = stub::attach_joystick("AB", 0, 0, 0);
            let joystick = Joystick::open(index).unwrap();
            let guid = guid_string(joystick.guid().unwrap());
            assert_eq!(guid.len(), 32);
            assert!(guid.starts_with("4142"));
            assert!(guid[4..].bytes().all(|digit| digit == b'0'));
        });
    }

    #[test]
    fn bad_device_index_is_reported() {
        let _guard = serial();
        with_controllers(|| {
            let count = num_joysticks().unwrap();
            let err = Joystick::open(count).unwrap_err();
            assert_eq!(err.message(), format!("There are {count} joysticks available"));
            assert!(joystick_name_for_index(-1).is_err());
        });
    }
}
