//! Raw bindings to SDL2, SDL2_ttf and SDL2_mixer.
//!
//! Without the `native` feature the same symbols are served by an in-process
//! stub (see [`stub`]), which lets the safe layers be tested on machines
//! without the native libraries.

#![forbid(unsafe_op_in_unsafe_fn)]
#![allow(non_camel_case_types, non_snake_case, clippy::missing_safety_doc)]

use core::ffi::c_int;

pub use sdl_abi::{
    Color, DisplayMode, EventType, EventUnion, JoystickGUID, MessageBoxButtonData,
    MessageBoxColor, MessageBoxColorScheme, MessageBoxData, MixChunk, Palette, PixelFormat,
    Point, Rect, RendererInfo, Surface, SysWMinfo, Version,
};

#[cfg(not(sdl_stub))]
mod ffi;
#[cfg(not(sdl_stub))]
pub use ffi::*;

#[cfg(sdl_stub)]
pub mod stub;
#[cfg(sdl_stub)]
pub use stub::api::*;

#[cfg(all(test, not(sdl_stub)))]
mod header_layout;

macro_rules! opaque {
    ($($name:ident),* $(,)?) => {
        $(
            #[repr(C)]
            pub struct $name {
                _private: [u8; 0],
            }
        )*
    };
}

opaque!(
    SDL_Window,
    SDL_Renderer,
    SDL_Texture,
    SDL_Cursor,
    SDL_Joystick,
    SDL_GameController,
    SDL_RWops,
    TTF_Font,
    Mix_Music,
);

pub type SDL_bool = c_int;
pub type SDL_GLContext = *mut core::ffi::c_void;

pub const SDL_FALSE: SDL_bool = 0;
pub const SDL_TRUE: SDL_bool = 1;

pub const SDL_INIT_TIMER: u32 = 0x0000_0001;
pub const SDL_INIT_AUDIO: u32 = 0x0000_0010;
pub const SDL_INIT_VIDEO: u32 = 0x0000_0020;
pub const SDL_INIT_JOYSTICK: u32 = 0x0000_0200;
pub const SDL_INIT_HAPTIC: u32 = 0x0000_1000;
pub const SDL_INIT_GAMECONTROLLER: u32 = 0x0000_2000;
pub const SDL_INIT_EVENTS: u32 = 0x0000_4000;
pub const SDL_INIT_NOPARACHUTE: u32 = 0x0010_0000;
pub const SDL_INIT_EVERYTHING: u32 = SDL_INIT_TIMER
    | SDL_INIT_AUDIO
    | SDL_INIT_VIDEO
    | SDL_INIT_EVENTS
    | SDL_INIT_JOYSTICK
    | SDL_INIT_HAPTIC
    | SDL_INIT_GAMECONTROLLER;

// SDL_eventaction
pub const SDL_ADDEVENT: c_int = 0;
pub const SDL_PEEKEVENT: c_int = 1;
pub const SDL_GETEVENT: c_int = 2;

pub const SDL_QUERY: c_int = -1;
pub const SDL_IGNORE: c_int = 0;
pub const SDL_DISABLE: c_int = 0;
pub const SDL_ENABLE: c_int = 1;

pub const SDL_WINDOW_FULLSCREEN: u32 = 0x0000_0001;
pub const SDL_WINDOW_OPENGL: u32 = 0x0000_0002;
pub const SDL_WINDOW_SHOWN: u32 = 0x0000_0004;
pub const SDL_WINDOW_HIDDEN: u32 = 0x0000_0008;
pub const SDL_WINDOW_BORDERLESS: u32 = 0x0000_0010;
pub const SDL_WINDOW_RESIZABLE: u32 = 0x0000_0020;
pub const SDL_WINDOW_MINIMIZED: u32 = 0x0000_0040;
pub const SDL_WINDOW_MAXIMIZED: u32 = 0x0000_0080;
pub const SDL_WINDOW_INPUT_GRABBED: u32 = 0x0000_0100;
pub const SDL_WINDOW_INPUT_FOCUS: u32 = 0x0000_0200;
pub const SDL_WINDOW_MOUSE_FOCUS: u32 = 0x0000_0400;
pub const SDL_WINDOW_FULLSCREEN_DESKTOP: u32 = SDL_WINDOW_FULLSCREEN | 0x0000_1000;
pub const SDL_WINDOW_FOREIGN: u32 = 0x0000_0800;
pub const SDL_WINDOW_ALLOW_HIGHDPI: u32 = 0x0000_2000;

pub const SDL_WINDOWPOS_UNDEFINED_MASK: u32 = 0x1FFF_0000;
pub const SDL_WINDOWPOS_UNDEFINED: c_int = SDL_WINDOWPOS_UNDEFINED_MASK as c_int;
pub const SDL_WINDOWPOS_CENTERED_MASK: u32 = 0x2FFF_0000;
pub const SDL_WINDOWPOS_CENTERED: c_int = SDL_WINDOWPOS_CENTERED_MASK as c_int;

// SDL_WindowEventID
pub const SDL_WINDOWEVENT_NONE: u8 = 0;
pub const SDL_WINDOWEVENT_SHOWN: u8 = 1;
pub const SDL_WINDOWEVENT_HIDDEN: u8 = 2;
pub const SDL_WINDOWEVENT_EXPOSED: u8 = 3;
pub const SDL_WINDOWEVENT_MOVED: u8 = 4;
pub const SDL_WINDOWEVENT_RESIZED: u8 = 5;
pub const SDL_WINDOWEVENT_SIZE_CHANGED: u8 = 6;
pub const SDL_WINDOWEVENT_MINIMIZED: u8 = 7;
pub const SDL_WINDOWEVENT_MAXIMIZED: u8 = 8;
pub const SDL_WINDOWEVENT_RESTORED: u8 = 9;
pub const SDL_WINDOWEVENT_ENTER: u8 = 10;
pub const SDL_WINDOWEVENT_LEAVE: u8 = 11;
pub const SDL_WINDOWEVENT_FOCUS_GAINED: u8 = 12;
pub const SDL_WINDOWEVENT_FOCUS_LOST: u8 = 13;
pub const SDL_WINDOWEVENT_CLOSE: u8 = 14;

// SDL_GLattr
pub const SDL_GL_RED_SIZE: c_int = 0;
pub const SDL_GL_GREEN_SIZE: c_int = 1;
pub const SDL_GL_BLUE_SIZE: c_int = 2;
pub const SDL_GL_ALPHA_SIZE: c_int = 3;
pub const SDL_GL_BUFFER_SIZE: c_int = 4;
pub const SDL_GL_DOUBLEBUFFER: c_int = 5;
pub const SDL_GL_DEPTH_SIZE: c_int = 6;
pub const SDL_GL_STENCIL_SIZE: c_int = 7;
pub const SDL_GL_MULTISAMPLEBUFFERS: c_int = 13;
pub const SDL_GL_MULTISAMPLESAMPLES: c_int = 14;
pub const SDL_GL_ACCELERATED_VISUAL: c_int = 15;
pub const SDL_GL_CONTEXT_MAJOR_VERSION: c_int = 17;
pub const SDL_GL_CONTEXT_MINOR_VERSION: c_int = 18;
pub const SDL_GL_CONTEXT_FLAGS: c_int = 20;
pub const SDL_GL_CONTEXT_PROFILE_MASK: c_int = 21;
pub const SDL_GL_SHARE_WITH_CURRENT_CONTEXT: c_int = 22;
pub const SDL_GL_FRAMEBUFFER_SRGB_CAPABLE: c_int = 23;
/// One past the last attribute the headers define.
pub const SDL_GL_ATTRIBUTE_COUNT: c_int = 24;

pub const SDL_RENDERER_SOFTWARE: u32 = 0x0000_0001;
pub const SDL_RENDERER_ACCELERATED: u32 = 0x0000_0002;
pub const SDL_RENDERER_PRESENTVSYNC: u32 = 0x0000_0004;
pub const SDL_RENDERER_TARGETTEXTURE: u32 = 0x0000_0008;

pub const SDL_TEXTUREACCESS_STATIC: c_int = 0;
pub const SDL_TEXTUREACCESS_STREAMING: c_int = 1;
pub const SDL_TEXTUREACCESS_TARGET: c_int = 2;

pub const SDL_FLIP_NONE: c_int = 0;
pub const SDL_FLIP_HORIZONTAL: c_int = 1;
pub const SDL_FLIP_VERTICAL: c_int = 2;

pub const SDL_BLENDMODE_NONE: c_int = 0;
pub const SDL_BLENDMODE_BLEND: c_int = 1;
pub const SDL_BLENDMODE_ADD: c_int = 2;
pub const SDL_BLENDMODE_MOD: c_int = 4;

pub const SDL_SWSURFACE: u32 = 0;
pub const SDL_PREALLOC: u32 = 0x0000_0001;
pub const SDL_RLEACCEL: u32 = 0x0000_0002;
pub const SDL_DONTFREE: u32 = 0x0000_0004;

pub const SDL_ALPHA_OPAQUE: u8 = 255;
pub const SDL_ALPHA_TRANSPARENT: u8 = 0;

pub const SDL_PIXELFORMAT_UNKNOWN: u32 = 0;
pub const SDL_PIXELFORMAT_INDEX8: u32 = 0x1300_0801;
pub const SDL_PIXELFORMAT_RGB332: u32 = 0x1411_0801;
pub const SDL_PIXELFORMAT_RGB565: u32 = 0x1515_1002;
pub const SDL_PIXELFORMAT_RGB24: u32 = 0x1710_1803;
pub const SDL_PIXELFORMAT_BGR24: u32 = 0x1740_1803;
pub const SDL_PIXELFORMAT_RGB888: u32 = 0x1616_1804;
pub const SDL_PIXELFORMAT_BGR888: u32 = 0x1656_1804;
pub const SDL_PIXELFORMAT_ARGB8888: u32 = 0x1636_2004;
pub const SDL_PIXELFORMAT_RGBA8888: u32 = 0x1646_2004;
pub const SDL_PIXELFORMAT_ABGR8888: u32 = 0x1676_2004;
pub const SDL_PIXELFORMAT_BGRA8888: u32 = 0x1686_2004;

// SDL_SystemCursor
pub const SDL_SYSTEM_CURSOR_ARROW: c_int = 0;
pub const SDL_SYSTEM_CURSOR_IBEAM: c_int = 1;
pub const SDL_SYSTEM_CURSOR_WAIT: c_int = 2;
pub const SDL_SYSTEM_CURSOR_CROSSHAIR: c_int = 3;
pub const SDL_SYSTEM_CURSOR_WAITARROW: c_int = 4;
pub const SDL_SYSTEM_CURSOR_SIZENWSE: c_int = 5;
pub const SDL_SYSTEM_CURSOR_SIZENESW: c_int = 6;
pub const SDL_SYSTEM_CURSOR_SIZEWE: c_int = 7;
pub const SDL_SYSTEM_CURSOR_SIZENS: c_int = 8;
pub const SDL_SYSTEM_CURSOR_SIZEALL: c_int = 9;
pub const SDL_SYSTEM_CURSOR_NO: c_int = 10;
pub const SDL_SYSTEM_CURSOR_HAND: c_int = 11;
pub const SDL_NUM_SYSTEM_CURSORS: c_int = 12;

pub const SDL_BUTTON_LEFT: u32 = 1;
pub const SDL_BUTTON_MIDDLE: u32 = 2;
pub const SDL_BUTTON_RIGHT: u32 = 3;
pub const SDL_BUTTON_X1: u32 = 4;
pub const SDL_BUTTON_X2: u32 = 5;

pub const SDL_MESSAGEBOX_ERROR: u32 = 0x0000_0010;
pub const SDL_MESSAGEBOX_WARNING: u32 = 0x0000_0020;
pub const SDL_MESSAGEBOX_INFORMATION: u32 = 0x0000_0040;
pub const SDL_MESSAGEBOX_BUTTON_RETURNKEY_DEFAULT: u32 = 0x0000_0001;
pub const SDL_MESSAGEBOX_BUTTON_ESCAPEKEY_DEFAULT: u32 = 0x0000_0002;

pub const SDL_SYSWM_UNKNOWN: u32 = 0;
pub const SDL_SYSWM_WINDOWS: u32 = 1;
pub const SDL_SYSWM_X11: u32 = 2;
pub const SDL_SYSWM_DIRECTFB: u32 = 3;
pub const SDL_SYSWM_COCOA: u32 = 4;
pub const SDL_SYSWM_UIKIT: u32 = 5;
pub const SDL_SYSWM_WAYLAND: u32 = 6;

pub const SDL_NUM_SCANCODES: c_int = 512;

pub const KMOD_NONE: u16 = 0x0000;
pub const KMOD_LSHIFT: u16 = 0x0001;
pub const KMOD_RSHIFT: u16 = 0x0002;
pub const KMOD_LCTRL: u16 = 0x0040;
pub const KMOD_RCTRL: u16 = 0x0080;
pub const KMOD_LALT: u16 = 0x0100;
pub const KMOD_RALT: u16 = 0x0200;
pub const KMOD_LGUI: u16 = 0x0400;
pub const KMOD_RGUI: u16 = 0x0800;
pub const KMOD_NUM: u16 = 0x1000;
pub const KMOD_CAPS: u16 = 0x2000;
pub const KMOD_MODE: u16 = 0x4000;

pub const SDL_HAT_CENTERED: u8 = 0x00;
pub const SDL_HAT_UP: u8 = 0x01;
pub const SDL_HAT_RIGHT: u8 = 0x02;
pub const SDL_HAT_DOWN: u8 = 0x04;
pub const SDL_HAT_LEFT: u8 = 0x08;

// SDL_GameControllerAxis
pub const SDL_CONTROLLER_AXIS_INVALID: c_int = -1;
pub const SDL_CONTROLLER_AXIS_LEFTX: c_int = 0;
pub const SDL_CONTROLLER_AXIS_LEFTY: c_int = 1;
pub const SDL_CONTROLLER_AXIS_RIGHTX: c_int = 2;
pub const SDL_CONTROLLER_AXIS_RIGHTY: c_int = 3;
pub const SDL_CONTROLLER_AXIS_TRIGGERLEFT: c_int = 4;
pub const SDL_CONTROLLER_AXIS_TRIGGERRIGHT: c_int = 5;
pub const SDL_CONTROLLER_AXIS_MAX: c_int = 6;

// SDL_GameControllerButton
pub const SDL_CONTROLLER_BUTTON_INVALID: c_int = -1;
pub const SDL_CONTROLLER_BUTTON_A: c_int = 0;
pub const SDL_CONTROLLER_BUTTON_B: c_int = 1;
pub const SDL_CONTROLLER_BUTTON_X: c_int = 2;
pub const SDL_CONTROLLER_BUTTON_Y: c_int = 3;
pub const SDL_CONTROLLER_BUTTON_BACK: c_int = 4;
pub const SDL_CONTROLLER_BUTTON_GUIDE: c_int = 5;
pub const SDL_CONTROLLER_BUTTON_START: c_int = 6;
pub const SDL_CONTROLLER_BUTTON_LEFTSTICK: c_int = 7;
pub const SDL_CONTROLLER_BUTTON_RIGHTSTICK: c_int = 8;
pub const SDL_CONTROLLER_BUTTON_LEFTSHOULDER: c_int = 9;
pub const SDL_CONTROLLER_BUTTON_RIGHTSHOULDER: c_int = 10;
pub const SDL_CONTROLLER_BUTTON_DPAD_UP: c_int = 11;
pub const SDL_CONTROLLER_BUTTON_DPAD_DOWN: c_int = 12;
pub const SDL_CONTROLLER_BUTTON_DPAD_LEFT: c_int = 13;
pub const SDL_CONTROLLER_BUTTON_DPAD_RIGHT: c_int = 14;
pub const SDL_CONTROLLER_BUTTON_MAX: c_int = 15;

pub const TTF_STYLE_NORMAL: c_int = 0x00;
pub const TTF_STYLE_BOLD: c_int = 0x01;
pub const TTF_STYLE_ITALIC: c_int = 0x02;
pub const TTF_STYLE_UNDERLINE: c_int = 0x04;
pub const TTF_STYLE_STRIKETHROUGH: c_int = 0x08;

pub const TTF_HINTING_NORMAL: c_int = 0;
pub const TTF_HINTING_LIGHT: c_int = 1;
pub const TTF_HINTING_MONO: c_int = 2;
pub const TTF_HINTING_NONE: c_int = 3;

pub const MIX_INIT_FLAC: c_int = 0x0000_0001;
pub const MIX_INIT_MOD: c_int = 0x0000_0002;
pub const MIX_INIT_MODPLUG: c_int = 0x0000_0004;
pub const MIX_INIT_MP3: c_int = 0x0000_0008;
pub const MIX_INIT_OGG: c_int = 0x0000_0010;
pub const MIX_INIT_FLUIDSYNTH: c_int = 0x0000_0020;

pub const MIX_CHANNELS: c_int = 8;
pub const MIX_DEFAULT_FREQUENCY: c_int = 22050;
pub const MIX_DEFAULT_CHANNELS: c_int = 2;
pub const MIX_MAX_VOLUME: c_int = 128;

pub const AUDIO_U8: u16 = 0x0008;
pub const AUDIO_S8: u16 = 0x8008;
pub const AUDIO_U16LSB: u16 = 0x0010;
pub const AUDIO_S16LSB: u16 = 0x8010;
pub const AUDIO_U16MSB: u16 = 0x1010;
pub const AUDIO_S16MSB: u16 = 0x9010;
pub const AUDIO_S32LSB: u16 = 0x8020;
pub const AUDIO_S32MSB: u16 = 0x9020;
pub const AUDIO_F32LSB: u16 = 0x8120;
pub const AUDIO_F32MSB: u16 = 0x9120;
pub const MIX_DEFAULT_FORMAT: u16 = if cfg!(target_endian = "little") {
    AUDIO_S16LSB
} else {
    AUDIO_S16MSB
};

// Mix_Fading
pub const MIX_NO_FADING: c_int = 0;
pub const MIX_FADING_OUT: c_int = 1;
pub const MIX_FADING_IN: c_int = 2;

// Mix_MusicType
pub const MUS_NONE: c_int = 0;
pub const MUS_CMD: c_int = 1;
pub const MUS_WAV: c_int = 2;
pub const MUS_MOD: c_int = 3;
pub const MUS_MID: c_int = 4;
pub const MUS_OGG: c_int = 5;
pub const MUS_MP3: c_int = 6;
pub const MUS_MP3_MAD: c_int = 7;
pub const MUS_FLAC: c_int = 8;
pub const MUS_MODPLUG: c_int = 9;
