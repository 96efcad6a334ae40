use std::ffi::c_int;

use sdl_sys::SDL_GameController;

use crate::error::{check_count, check_ptr, to_cstring, Error, Result};
use crate::handle::{resource, Handle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControllerAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

impl ControllerAxis {
    pub const fn raw(self) -> c_int {
        match self {
            ControllerAxis::LeftX => sdl_sys::SDL_CONTROLLER_AXIS_LEFTX,
            ControllerAxis::LeftY => sdl_sys::SDL_CONTROLLER_AXIS_LEFTY,
            ControllerAxis::RightX => sdl_sys::SDL_CONTROLLER_AXIS_RIGHTX,
            ControllerAxis::RightY => sdl_sys::SDL_CONTROLLER_AXIS_RIGHTY,
            ControllerAxis::TriggerLeft => sdl_sys::SDL_CONTROLLER_AXIS_TRIGGERLEFT,
            ControllerAxis::TriggerRight => sdl_sys::SDL_CONTROLLER_AXIS_TRIGGERRIGHT,
        }
    }

    /// Decodes the `axis` byte of a `ControllerAxisEvent`.
    pub fn from_raw(raw: u8) -> Option<Self> {
        const ALL: [ControllerAxis; 6] = [
            ControllerAxis::LeftX,
            ControllerAxis::LeftY,
            ControllerAxis::RightX,
            ControllerAxis::RightY,
            ControllerAxis::TriggerLeft,
            ControllerAxis::TriggerRight,
        ];
        ALL.get(usize::from(raw)).copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    A,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl ControllerButton {
    const ALL: [ControllerButton; 15] = [
        ControllerButton::A,
        ControllerButton::B,
        ControllerButton::X,
        ControllerButton::Y,
        ControllerButton::Back,
        ControllerButton::Guide,
        ControllerButton::Start,
        ControllerButton::LeftStick,
        ControllerButton::RightStick,
        ControllerButton::LeftShoulder,
        ControllerButton::RightShoulder,
        ControllerButton::DPadUp,
        ControllerButton::DPadDown,
        ControllerButton::DPadLeft,
        ControllerButton::DPadRight,
    ];

    pub const fn raw(self) -> c_int {
        match self {
            ControllerButton::A => sdl_sys::SDL_CONTROLLER_BUTTON_A,
            ControllerButton::B => sdl_sys::SDL_CONTROLLER_BUTTON_B,
            ControllerButton::X => sdl_sys::SDL_CONTROLLER_BUTTON_X,
            ControllerButton::Y => sdl_sys::SDL_CONTROLLER_BUTTON_Y,
            ControllerButton::Back => sdl_sys::SDL_CONTROLLER_BUTTON_BACK,
            ControllerButton::Guide => sdl_sys::SDL_CONTROLLER_BUTTON_GUIDE,
            ControllerButton::Start => sdl_sys::SDL_CONTROLLER_BUTTON_START,
            ControllerButton::LeftStick => sdl_sys::SDL_CONTROLLER_BUTTON_LEFTSTICK,
            ControllerButton::RightStick => sdl_sys::SDL_CONTROLLER_BUTTON_RIGHTSTICK,
            ControllerButton::LeftShoulder => sdl_sys::SDL_CONTROLLER_BUTTON_LEFTSHOULDER,
            ControllerButton::RightShoulder => sdl_sys::SDL_CONTROLLER_BUTTON_RIGHTSHOULDER,
            ControllerButton::DPadUp => sdl_sys::SDL_CONTROLLER_BUTTON_DPAD_UP,
            ControllerButton::DPadDown => sdl_sys::SDL_CONTROLLER_BUTTON_DPAD_DOWN,
            ControllerButton::DPadLeft => sdl_sys::SDL_CONTROLLER_BUTTON_DPAD_LEFT,
            ControllerButton::DPadRight => sdl_sys::SDL_CONTROLLER_BUTTON_DPAD_RIGHT,
        }
    }

    /// Decodes the `button` byte of a `ControllerButtonEvent`.
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.get(usize::from(raw)).copied()
    }
}

/// Outcome of [`add_mapping`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingStatus {
    Added,
    Updated,
}

/// Whether the device at `joystick_index` has a controller mapping.
pub fn is_game_controller(joystick_index: i32) -> bool {
    // SAFETY: plain value argument.
    unsafe { sdl_sys::SDL_IsGameController(joystick_index) == sdl_sys::SDL_TRUE }
}

/// Registers a `GUID,name,bindings...` mapping line.
pub fn add_mapping(mapping: &str) -> Result<MappingStatus> {
    let mapping = to_cstring(mapping)?;
    // SAFETY: NUL-terminated argument.
    match check_count(unsafe { sdl_sys::SDL_GameControllerAddMapping(mapping.as_ptr()) })? {
        0 => Ok(MappingStatus::Updated),
        _ => Ok(MappingStatus::Added),
    }
}

resource!(
    GameControllerResource,
    SDL_GameController,
    "game_controller",
    sdl_sys::SDL_GameControllerClose
);

/// An opened controller. It owns its underlying joystick, which is only
/// exposed through [`GameController::joystick_instance_id`].
#[derive(Debug)]
pub struct GameController {
    handle: Handle<GameControllerResource>,
}

impl GameController {
    pub fn open(joystick_index: i32) -> Result<Self> {
        // SAFETY: plain value argument.
        let raw = unsafe { sdl_sys::SDL_GameControllerOpen(joystick_index) };
        Ok(Self {
            handle: Handle::adopt(raw)?,
        })
    }

    pub fn raw(&self) -> *mut SDL_GameController {
        self.handle.as_ptr()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// The name from the mapping.
    pub fn name(&self) -> Result<String> {
        let raw = self.handle.get()?;
        // SAFETY: live controller; the name is copied immediately.
        crate::static_str(unsafe { sdl_sys::SDL_GameControllerName(raw) })
            .ok_or_else(|| Error::from_native(0))
    }

    pub fn attached(&self) -> Result<bool> {
        let raw = self.handle.get()?;
        // SAFETY: live controller.
        Ok(unsafe { sdl_sys::SDL_GameControllerGetAttached(raw) } == sdl_sys::SDL_TRUE)
    }

    pub fn axis(&self, axis: ControllerAxis) -> Result<i16> {
        let raw = self.handle.get()?;
        // SAFETY: live controller.
        Ok(unsafe { sdl_sys::SDL_GameControllerGetAxis(raw, axis.raw()) })
    }

    pub fn button(&self, button: ControllerButton) -> Result<bool> {
        let raw = self.handle.get()?;
        // SAFETY: live controller.
        Ok(unsafe { sdl_sys::SDL_GameControllerGetButton(raw, button.raw()) } != 0)
    }

    /// Instance id of the owned joystick, as used by controller events.
    pub fn joystick_instance_id(&self) -> Result<i32> {
        let raw = self.handle.get()?;
        // SAFETY: live controller; the joystick is borrowed, never closed here.
        let joystick = check_ptr(unsafe { sdl_sys::SDL_GameControllerGetJoystick(raw) })?;
        // SAFETY: the controller keeps its joystick open.
        check_count(unsafe { sdl_sys::SDL_JoystickInstanceID(joystick) })
    }

    /// Closes the controller together with its joystick.
    pub fn close(&mut self) {
        self.handle.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_bytes_decode() {
        assert_eq!(ControllerAxis::from_raw(4), Some(ControllerAxis::TriggerLeft));
        assert_eq!(ControllerAxis::from_raw(6), None);
        assert_eq!(ControllerButton::from_raw(14), Some(ControllerButton::DPadRight));
        assert_eq!(ControllerButton::from_raw(15), None);
        for button in ControllerButton::ALL {
            assert_eq!(ControllerButton::from_raw(button.raw() as u8), Some(button));
        }
    }

    #[test]
    fn out_of_range_index_is_not_a_controller() {
        use crate::test_support::{serial, with_controllers};

        let _guard = serial();
        with_controllers(|| {
            let past_end = crate::joystick::num_joysticks().unwrap();
            for index in [-1, past_end] {
                assert!(!is_game_controller(index));
                let err = GameController::open(index).unwrap_err();
                assert!(matches!(err, Error::Sdl { .. }), "{err:?}");
            }
        });
    }

    #[cfg(sdl_stub)]
    mod stub {
        use sdl_sys::stub;

        use super::super::*;
        use crate::joystick::{guid_string, Joystick};
        use crate::test_support::{serial, with_controllers};

        fn mapping_for(index: i32, name: &str) -> String {
            let joystick = Joystick::open(index).unwrap();
            format!("{},{name},a:b0,leftx:a0", guid_string(joystick.guid().unwrap()))
        }

        #[test]
        fn mapping_turns_a_joystick_into_a_controller() {
            let _guard = serial();
            with_controllers(|| {
                let index = stub::attach_joystick("Mappable Pad", 2, 2, 0);
                assert!(!is_game_controller(index));
                let err = GameController::open(index).unwrap_err();
                assert_eq!(
                    err.message(),
                    format!("The joystick at index {index} is not a game controller")
                );

                let mapping = mapping_for(index, "Mapped Controller");
                assert_eq!(add_mapping(&mapping).unwrap(), MappingStatus::Added);
                assert_eq!(add_mapping(&mapping).unwrap(), MappingStatus::Updated);
                assert!(is_game_controller(index));

                let mut controller = GameController::open(index).unwrap();
                assert_eq!(controller.name().unwrap(), "Mapped Controller");
                assert!(controller.attached().unwrap());
                assert!(controller.joystick_instance_id().unwrap() >= 0);

                stub::set_joystick_axis(index, 0, 1234);
                stub::set_joystick_button(index, 0, true);
                assert_eq!(controller.axis(ControllerAxis::LeftX).unwrap(), 1234);
                assert!(controller.button(ControllerButton::A).unwrap());
                assert!(!controller.button(ControllerButton::B).unwrap());

                controller.close();
                assert_eq!(
                    controller.attached(),
                    Err(Error::NullHandle("game_controller"))
                );
                assert_eq!(stub::live_count("game_controller"), 0);
            });
        }

        #[test]
        fn malformed_mapping_is_rejected() {
            let _guard = serial();
            with_controllers(|| {
                let err = add_mapping("not a mapping").unwrap_err();
                assert_eq!(err.message(), "Invalid mapping string");
                assert_eq!(err.code(), -1);
                assert_eq!(add_mapping("a\0b"), Err(Error::InteriorNul));
            });
        }
    }
}
