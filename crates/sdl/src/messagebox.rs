use std::ffi::{c_int, CString};
use std::ptr;

use sdl_abi::{MessageBoxButtonData, MessageBoxColor, MessageBoxColorScheme, MessageBoxData};
use tracing::debug;

use crate::error::{check, to_cstring, Error, Result};
use crate::native_flags;
use crate::video::Window;

native_flags! {
    pub struct MessageBoxFlags(u32) {
        const ERROR = sdl_sys::SDL_MESSAGEBOX_ERROR;
        const WARNING = sdl_sys::SDL_MESSAGEBOX_WARNING;
        const INFORMATION = sdl_sys::SDL_MESSAGEBOX_INFORMATION;
    }
}

native_flags! {
    pub struct ButtonFlags(u32) {
        /// Chosen when the user presses return.
        const RETURNKEY_DEFAULT = sdl_sys::SDL_MESSAGEBOX_BUTTON_RETURNKEY_DEFAULT;
        /// Chosen when the user presses escape.
        const ESCAPEKEY_DEFAULT = sdl_sys::SDL_MESSAGEBOX_BUTTON_ESCAPEKEY_DEFAULT;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonData {
    pub flags: ButtonFlags,
    pub button_id: i32,
    pub text: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: MessageBoxColor,
    pub text: MessageBoxColor,
    pub button_border: MessageBoxColor,
    pub button_background: MessageBoxColor,
    pub button_selected: MessageBoxColor,
}

impl ColorScheme {
    fn raw(&self) -> MessageBoxColorScheme {
        MessageBoxColorScheme {
            colors: [
                self.background,
                self.text,
                self.button_border,
                self.button_background,
                self.button_selected,
            ],
        }
    }
}

/// A modal dialog. Blocks the calling thread until a button is chosen.
#[derive(Clone, Debug, Default)]
pub struct MessageBox<'w> {
    pub flags: MessageBoxFlags,
    pub window: Option<&'w Window>,
    pub title: String,
    pub message: String,
    pub buttons: Vec<ButtonData>,
    pub color_scheme: Option<ColorScheme>,
}

impl MessageBox<'_> {
    /// Shows the box and returns the id of the chosen button, or -1 when it
    /// was closed without one.
    pub fn show(&self) -> Result<i32> {
        let window = match self.window {
            Some(window) => window.raw_checked()?,
            None => ptr::null_mut(),
        };
        let title = to_cstring(&self.title)?;
        let message = to_cstring(&self.message)?;
        let texts = self
            .buttons
            .iter()
            .map(|button| to_cstring(&button.text))
            .collect::<Result<Vec<CString>>>()?;
        let buttons: Vec<MessageBoxButtonData> = self
            .buttons
            .iter()
            .zip(&texts)
            .map(|(button, text)| MessageBoxButtonData {
                flags: button.flags.bits(),
                buttonid: button.button_id,
                text: text.as_ptr(),
            })
            .collect();
        let numbuttons = c_int::try_from(buttons.len()).map_err(|_| Error::Sdl {
            message: format!("{} buttons is too many", buttons.len()),
            code: -1,
        })?;
        let scheme = self.color_scheme.map(|scheme| scheme.raw());
        let data = MessageBoxData {
            flags: self.flags.bits(),
            padding0: [0; sdl_abi::POINTER_GAP],
            window: window.cast(),
            title: title.as_ptr(),
            message: message.as_ptr(),
            numbuttons,
            padding1: [0; sdl_abi::POINTER_GAP],
            buttons: if buttons.is_empty() { ptr::null() } else { buttons.as_ptr() },
            color_scheme: scheme.as_ref().map_or(ptr::null(), |scheme| scheme as *const _),
        };
        let mut chosen: c_int = -1;
        // SAFETY: every pointer in `data` borrows a local that outlives the call.
        check(unsafe { sdl_sys::SDL_ShowMessageBox(&data, &mut chosen) })?;
        debug!(title = %self.title, button = chosen, "message box answered");
        Ok(chosen)
    }
}

/// A box with a single OK button.
pub fn show_simple_message_box(
    flags: MessageBoxFlags,
    title: &str,
    message: &str,
    window: Option<&Window>,
) -> Result<()> {
    let window = match window {
        Some(window) => window.raw_checked()?,
        None => ptr::null_mut(),
    };
    let title = to_cstring(title)?;
    let message = to_cstring(message)?;
    // SAFETY: NUL-terminated strings; the window is live or null.
    check(unsafe {
        sdl_sys::SDL_ShowSimpleMessageBox(flags.bits(), title.as_ptr(), message.as_ptr(), window)
    })
}

#[cfg(all(test, sdl_stub))]
mod tests {
    use super::*;
    use crate::test_support::{serial, with_video};
    use crate::video::WindowFlags;

    fn button(flags: ButtonFlags, button_id: i32, text: &str) -> ButtonData {
        ButtonData {
            flags,
            button_id,
            text: text.to_owned(),
        }
    }

    #[test]
    fn return_key_default_answers() {
        let _guard = serial();
        let dialog = MessageBox {
            flags: MessageBoxFlags::WARNING,
            title: "Unsaved".into(),
            message: "Quit anyway?".into(),
            buttons: vec![
                button(ButtonFlags::ESCAPEKEY_DEFAULT, 0, "Cancel"),
                button(ButtonFlags::RETURNKEY_DEFAULT, 1, "Quit"),
            ],
            color_scheme: Some(ColorScheme {
                background: MessageBoxColor { r: 30, g: 30, b: 30 },
                ..ColorScheme::default()
            }),
            ..MessageBox::default()
        };
        assert_eq!(dialog.show().unwrap(), 1);

        let bare = MessageBox {
            title: "Note".into(),
            ..MessageBox::default()
        };
        assert_eq!(bare.show().unwrap(), -1);
    }

    #[test]
    fn strings_and_windows_are_checked() {
        let _guard = serial();
        let dialog = MessageBox {
            buttons: vec![button(ButtonFlags::empty(), 3, "a\0b")],
            ..MessageBox::default()
        };
        assert_eq!(dialog.show(), Err(Error::InteriorNul));

        with_video(|| {
            let mut window = Window::create("owner", 0, 0, 32, 32, WindowFlags::HIDDEN).unwrap();
            show_simple_message_box(MessageBoxFlags::INFORMATION, "Done", "Saved.", Some(&window))
                .unwrap();
            window.destroy();
            let dialog = MessageBox {
                window: Some(&window),
                ..MessageBox::default()
            };
            assert_eq!(dialog.show(), Err(Error::NullHandle("window")));
        });
        assert!(show_simple_message_box(MessageBoxFlags::ERROR, "x", "y", None).is_ok());
    }
}
