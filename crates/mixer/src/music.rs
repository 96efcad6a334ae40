use std::ffi::c_int;
use std::path::Path;

use sdl::error::{check, to_cstring, Result};
use sdl::{Handle, Resource};
use sdl_sys::Mix_Music;
use tracing::debug;

/// Decoder family of a [`Music`] stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MusicType {
    #[default]
    None,
    Cmd,
    Wav,
    Mod,
    Mid,
    Ogg,
    Mp3,
    Mp3Mad,
    Flac,
    Modplug,
}

impl MusicType {
    pub const fn raw(self) -> c_int {
        match self {
            MusicType::None => sdl_sys::MUS_NONE,
            MusicType::Cmd => sdl_sys::MUS_CMD,
            MusicType::Wav => sdl_sys::MUS_WAV,
            MusicType::Mod => sdl_sys::MUS_MOD,
            MusicType::Mid => sdl_sys::MUS_MID,
            MusicType::Ogg => sdl_sys::MUS_OGG,
            MusicType::Mp3 => sdl_sys::MUS_MP3,
            MusicType::Mp3Mad => sdl_sys::MUS_MP3_MAD,
            MusicType::Flac => sdl_sys::MUS_FLAC,
            MusicType::Modplug => sdl_sys::MUS_MODPLUG,
        }
    }

    /// Unknown values read back as `None`.
    pub fn from_raw(raw: c_int) -> Self {
        match raw {
            sdl_sys::MUS_CMD => MusicType::Cmd,
            sdl_sys::MUS_WAV => MusicType::Wav,
            sdl_sys::MUS_MOD => MusicType::Mod,
            sdl_sys::MUS_MID => MusicType::Mid,
            sdl_sys::MUS_OGG => MusicType::Ogg,
            sdl_sys::MUS_MP3 => MusicType::Mp3,
            sdl_sys::MUS_MP3_MAD => MusicType::Mp3Mad,
            sdl_sys::MUS_FLAC => MusicType::Flac,
            sdl_sys::MUS_MODPLUG => MusicType::Modplug,
            _ => MusicType::None,
        }
    }
}

/// Type of the music currently playing, `None` when nothing is.
pub fn playing_music_type() -> MusicType {
    // SAFETY: null asks for the playing music.
    MusicType::from_raw(unsafe { sdl_sys::Mix_GetMusicType(std::ptr::null()) })
}

struct MusicResource;

impl Resource for MusicResource {
    type Raw = Mix_Music;

    const KIND: &'static str = "music";

    unsafe fn release(raw: *mut Mix_Music) {
        // SAFETY: guaranteed by the `Resource` contract.
        unsafe { sdl_sys::Mix_FreeMusic(raw) }
    }
}

/// A streamed music file. Freeing it while it plays stops the music.
#[derive(Debug)]
pub struct Music {
    handle: Handle<MusicResource>,
}

// SAFETY: the stream has no thread affinity and the native mixer locks the
// device around playback.
unsafe impl Send for Music {}

impl Music {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = to_cstring(&path.to_string_lossy())?;
        // SAFETY: NUL-terminated path.
        let raw = unsafe { sdl_sys::Mix_LoadMUS(file.as_ptr()) };
        let handle = Handle::adopt(raw)?;
        debug!(path = %path.display(), "music loaded");
        Ok(Self { handle })
    }

    pub fn raw(&self) -> *mut Mix_Music {
        self.handle.as_ptr()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub fn music_type(&self) -> Result<MusicType> {
        let raw = self.handle.get()?;
        // SAFETY: live music.
        Ok(MusicType::from_raw(unsafe { sdl_sys::Mix_GetMusicType(raw) }))
    }

    /// Starts playback, replacing any music already playing.
    ///
    /// `loops` of -1 repeats forever and 0 plays nothing.
    pub fn play(&self, loops: i32) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live music.
        check(unsafe { sdl_sys::Mix_PlayMusic(raw, loops) })
    }

    pub fn free(&mut self) {
        self.handle.release();
    }
}

#[cfg(test)]
mod tests {
    use sdl::Error;
    use tempfile::TempDir;

    use super::*;

    fn assert_send<T: Send>() {}

    #[test]
    fn type_codes_decode() {
        for kind in [MusicType::Wav, MusicType::Ogg, MusicType::Flac, MusicType::Modplug] {
            assert_eq!(MusicType::from_raw(kind.raw()), kind);
        }
        assert_eq!(MusicType::from_raw(99), MusicType::None);
        assert_send::<Music>();
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = Music::load(dir.path().join("absent.ogg")).unwrap_err();
        assert!(err.message().contains("absent.ogg"), "{}", err.message());
        assert_eq!(Music::load("a\0b.ogg").unwrap_err(), Error::InteriorNul);
    }

    #[cfg(sdl_stub)]
    mod stub {
        use std::fs;
        use std::path::PathBuf;

        use super::*;
        use crate::test_support::{serial, with_audio};

        fn music_file(dir: &TempDir, name: &str) -> PathBuf {
            let path = dir.path().join(name);
            fs::write(&path, b"not decoded until played").unwrap();
            path
        }

        #[test]
        fn type_follows_the_extension() {
            let dir = TempDir::new().unwrap();
            let cases = [
                ("theme.ogg", MusicType::Ogg),
                ("loop.XM", MusicType::Mod),
                ("intro.mid", MusicType::Mid),
                ("drums.flac", MusicType::Flac),
            ];
            for (name, expected) in cases {
                let music = Music::load(music_file(&dir, name)).unwrap();
                assert_eq!(music.music_type().unwrap(), expected, "{name}");
            }
            let err = Music::load(music_file(&dir, "notes.txt")).unwrap_err();
            assert_eq!(err.message(), "Unrecognized music format");
        }

        #[test]
        fn playback_needs_an_open_device() {
            let _guard = serial();
            let dir = TempDir::new().unwrap();
            let music = Music::load(music_file(&dir, "theme.ogg")).unwrap();
            let err = music.play(-1).unwrap_err();
            assert_eq!(err.message(), "Audio device hasn't been opened");
            assert_eq!(err.code(), -1);
            assert!(!crate::playing_music());
        }

        #[test]
        fn play_and_halt() {
            let _guard = serial();
            let dir = TempDir::new().unwrap();
            with_audio(|| {
                let mut music = Music::load(music_file(&dir, "theme.ogg")).unwrap();
                music.play(-1).unwrap();
                assert_eq!(crate::fading_music(), crate::Fading::None);
                crate::halt_music();
                assert!(!crate::playing_music());
                assert_eq!(playing_music_type(), MusicType::None);

                music.free();
                assert_eq!(music.play(1), Err(Error::NullHandle("music")));
                assert_eq!(music.music_type(), Err(Error::NullHandle("music")));
                assert_eq!(sdl_sys::stub::live_count("music"), 0);
            });
        }
    }
}
