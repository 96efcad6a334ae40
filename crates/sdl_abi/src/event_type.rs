use core::fmt;

/// Leading tag of every event record (`Uint32 type` in `SDL_Event`).
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventType(pub u32);

impl EventType {
    pub const FIRSTEVENT: Self = Self(0);

    pub const QUIT: Self = Self(0x100);

    pub const WINDOWEVENT: Self = Self(0x200);
    pub const SYSWMEVENT: Self = Self(0x201);

    pub const KEYDOWN: Self = Self(0x300);
    pub const KEYUP: Self = Self(0x301);
    pub const TEXTEDITING: Self = Self(0x302);
    pub const TEXTINPUT: Self = Self(0x303);

    pub const MOUSEMOTION: Self = Self(0x400);
    pub const MOUSEBUTTONDOWN: Self = Self(0x401);
    pub const MOUSEBUTTONUP: Self = Self(0x402);
    pub const MOUSEWHEEL: Self = Self(0x403);

    pub const JOYAXISMOTION: Self = Self(0x600);
    pub const JOYBALLMOTION: Self = Self(0x601);
    pub const JOYHATMOTION: Self = Self(0x602);
    pub const JOYBUTTONDOWN: Self = Self(0x603);
    pub const JOYBUTTONUP: Self = Self(0x604);
    pub const JOYDEVICEADDED: Self = Self(0x605);
    pub const JOYDEVICEREMOVED: Self = Self(0x606);

    pub const CONTROLLERAXISMOTION: Self = Self(0x650);
    pub const CONTROLLERBUTTONDOWN: Self = Self(0x651);
    pub const CONTROLLERBUTTONUP: Self = Self(0x652);
    pub const CONTROLLERDEVICEADDED: Self = Self(0x653);
    pub const CONTROLLERDEVICEREMOVED: Self = Self(0x654);
    pub const CONTROLLERDEVICEREMAPPED: Self = Self(0x655);

    pub const FINGERDOWN: Self = Self(0x700);
    pub const FINGERUP: Self = Self(0x701);
    pub const FINGERMOTION: Self = Self(0x702);

    pub const DOLLARGESTURE: Self = Self(0x800);
    pub const DOLLARRECORD: Self = Self(0x801);
    pub const MULTIGESTURE: Self = Self(0x802);

    pub const CLIPBOARDUPDATE: Self = Self(0x900);

    pub const DROPFILE: Self = Self(0x1000);

    /// First tag of the range reserved for `SDL_RegisterEvents`.
    pub const USEREVENT: Self = Self(0x8000);
    /// Upper sentinel of the tag space.
    pub const LASTEVENT: Self = Self(0xFFFF);

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// True for tags in the caller-registered range, both bounds inclusive.
    pub const fn is_user(self) -> bool {
        self.0 >= Self::USEREVENT.0 && self.0 <= Self::LASTEVENT.0
    }

    /// Whether a record with this tag may be reinterpreted or serialized.
    ///
    /// DOLLARRECORD and CLIPBOARDUPDATE are defined by the native library but
    /// have no fixed payload shape and are rejected.
    pub const fn is_valid(self) -> bool {
        match self {
            Self::DOLLARRECORD | Self::CLIPBOARDUPDATE => false,
            Self::QUIT
            | Self::WINDOWEVENT
            | Self::SYSWMEVENT
            | Self::KEYDOWN
            | Self::KEYUP
            | Self::TEXTEDITING
            | Self::TEXTINPUT
            | Self::MOUSEMOTION
            | Self::MOUSEBUTTONDOWN
            | Self::MOUSEBUTTONUP
            | Self::MOUSEWHEEL
            | Self::JOYAXISMOTION
            | Self::JOYBALLMOTION
            | Self::JOYHATMOTION
            | Self::JOYBUTTONDOWN
            | Self::JOYBUTTONUP
            | Self::JOYDEVICEADDED
            | Self::JOYDEVICEREMOVED
            | Self::CONTROLLERAXISMOTION
            | Self::CONTROLLERBUTTONDOWN
            | Self::CONTROLLERBUTTONUP
            | Self::CONTROLLERDEVICEADDED
            | Self::CONTROLLERDEVICEREMOVED
            | Self::CONTROLLERDEVICEREMAPPED
            | Self::FINGERDOWN
            | Self::FINGERUP
            | Self::FINGERMOTION
            | Self::DOLLARGESTURE
            | Self::MULTIGESTURE
            | Self::DROPFILE => true,
            other => other.is_user(),
        }
    }

    fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::FIRSTEVENT => "FIRSTEVENT",
            Self::QUIT => "QUIT",
            Self::WINDOWEVENT => "WINDOWEVENT",
            Self::SYSWMEVENT => "SYSWMEVENT",
            Self::KEYDOWN => "KEYDOWN",
            Self::KEYUP => "KEYUP",
            Self::TEXTEDITING => "TEXTEDITING",
            Self::TEXTINPUT => "TEXTINPUT",
            Self::MOUSEMOTION => "MOUSEMOTION",
            Self::MOUSEBUTTONDOWN => "MOUSEBUTTONDOWN",
            Self::MOUSEBUTTONUP => "MOUSEBUTTONUP",
            Self::MOUSEWHEEL => "MOUSEWHEEL",
            Self::JOYAXISMOTION => "JOYAXISMOTION",
            Self::JOYBALLMOTION => "JOYBALLMOTION",
            Self::JOYHATMOTION => "JOYHATMOTION",
            Self::JOYBUTTONDOWN => "JOYBUTTONDOWN",
            Self::JOYBUTTONUP => "JOYBUTTONUP",
            Self::JOYDEVICEADDED => "JOYDEVICEADDED",
            Self::JOYDEVICEREMOVED => "JOYDEVICEREMOVED",
            Self::CONTROLLERAXISMOTION => "CONTROLLERAXISMOTION",
            Self::CONTROLLERBUTTONDOWN => "CONTROLLERBUTTONDOWN",
            Self::CONTROLLERBUTTONUP => "CONTROLLERBUTTONUP",
            Self::CONTROLLERDEVICEADDED => "CONTROLLERDEVICEADDED",
            Self::CONTROLLERDEVICEREMOVED => "CONTROLLERDEVICEREMOVED",
            Self::CONTROLLERDEVICEREMAPPED => "CONTROLLERDEVICEREMAPPED",
            Self::FINGERDOWN => "FINGERDOWN",
            Self::FINGERUP => "FINGERUP",
            Self::FINGERMOTION => "FINGERMOTION",
            Self::DOLLARGESTURE => "DOLLARGESTURE",
            Self::DOLLARRECORD => "DOLLARRECORD",
            Self::MULTIGESTURE => "MULTIGESTURE",
            Self::CLIPBOARDUPDATE => "CLIPBOARDUPDATE",
            Self::DROPFILE => "DROPFILE",
            Self::LASTEVENT => "LASTEVENT",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self >= Self::USEREVENT && *self < Self::LASTEVENT {
            return f.write_str("USEREVENT");
        }
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown ({})", self.0),
        }
    }
}

impl From<u32> for EventType {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<EventType> for u32 {
    fn from(value: EventType) -> Self {
        value.0
    }
}
