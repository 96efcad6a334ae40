//! Audio mixing over SDL2_mixer.
//!
//! One output device is shared by the whole process. Sound effects are
//! [`Chunk`]s played on numbered channels, and a single [`Music`] stream
//! plays beside them. Failures are reported as [`sdl::Error`] with the
//! native message.

#![forbid(unsafe_op_in_unsafe_fn)]

mod chunk;
mod music;

pub use chunk::Chunk;
pub use music::{playing_music_type, Music, MusicType};

use std::ffi::c_int;
use std::fmt;

use sdl::error::{check, check_count, Error};
use sdl::{Result, Version};
use tracing::debug;

pub const CHANNELS: i32 = sdl_sys::MIX_CHANNELS;
pub const DEFAULT_FREQUENCY: i32 = sdl_sys::MIX_DEFAULT_FREQUENCY;
pub const DEFAULT_CHANNELS: i32 = sdl_sys::MIX_DEFAULT_CHANNELS;
pub const MAX_VOLUME: i32 = sdl_sys::MIX_MAX_VOLUME;

sdl::native_flags! {
    /// Decoders to load up front with [`init`].
    pub struct InitFlags(c_int) {
        const FLAC = sdl_sys::MIX_INIT_FLAC;
        const MOD = sdl_sys::MIX_INIT_MOD;
        const MODPLUG = sdl_sys::MIX_INIT_MODPLUG;
        const MP3 = sdl_sys::MIX_INIT_MP3;
        const OGG = sdl_sys::MIX_INIT_OGG;
        const FLUIDSYNTH = sdl_sys::MIX_INIT_FLUIDSYNTH;
    }
}

/// Sample format of the output device (`AUDIO_*`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AudioFormat(pub u16);

impl AudioFormat {
    pub const U8: Self = Self(sdl_sys::AUDIO_U8);
    pub const S8: Self = Self(sdl_sys::AUDIO_S8);
    pub const U16LSB: Self = Self(sdl_sys::AUDIO_U16LSB);
    pub const S16LSB: Self = Self(sdl_sys::AUDIO_S16LSB);
    pub const U16MSB: Self = Self(sdl_sys::AUDIO_U16MSB);
    pub const S16MSB: Self = Self(sdl_sys::AUDIO_S16MSB);
    pub const S32LSB: Self = Self(sdl_sys::AUDIO_S32LSB);
    pub const S32MSB: Self = Self(sdl_sys::AUDIO_S32MSB);
    pub const F32LSB: Self = Self(sdl_sys::AUDIO_F32LSB);
    pub const F32MSB: Self = Self(sdl_sys::AUDIO_F32MSB);
    /// Signed 16-bit samples in native byte order.
    pub const DEFAULT: Self = Self(sdl_sys::MIX_DEFAULT_FORMAT);

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn bits(self) -> u16 {
        self.0 & 0xFF
    }

    pub const fn is_signed(self) -> bool {
        self.0 & 0x8000 != 0
    }

    pub const fn is_float(self) -> bool {
        self.0 & 0x0100 != 0
    }

    pub const fn is_big_endian(self) -> bool {
        self.0 & 0x1000 != 0
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_float() {
            'F'
        } else if self.is_signed() {
            'S'
        } else {
            'U'
        };
        let order = match (self.bits(), self.is_big_endian()) {
            (8, _) => "",
            (_, true) => "MSB",
            (_, false) => "LSB",
        };
        write!(f, "{kind}{}{order}", self.bits())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fading {
    #[default]
    None,
    Out,
    In,
}

impl Fading {
    /// Unknown values read back as `None`.
    pub fn from_raw(raw: c_int) -> Self {
        match raw {
            sdl_sys::MIX_FADING_OUT => Fading::Out,
            sdl_sys::MIX_FADING_IN => Fading::In,
            _ => Fading::None,
        }
    }
}

/// Parameters the device was actually opened with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioSpec {
    pub frequency: i32,
    pub format: AudioFormat,
    pub channels: i32,
    /// Number of outstanding [`open_audio`] calls.
    pub open_count: i32,
}

/// Loads the decoders in `flags`.
///
/// Succeeds only when every requested decoder is available; otherwise the
/// error carries the native message and the flags that did initialize as its
/// code.
pub fn init(flags: InitFlags) -> Result<InitFlags> {
    // SAFETY: plain value argument.
    let loaded = InitFlags::from_bits(unsafe { sdl_sys::Mix_Init(flags.bits()) });
    if !loaded.contains(flags) {
        return Err(Error::from_native(loaded.bits()));
    }
    debug!(flags = loaded.bits(), "mixer initialized");
    Ok(loaded)
}

pub fn quit() {
    // SAFETY: no arguments.
    unsafe { sdl_sys::Mix_Quit() }
}

pub fn linked_version() -> Version {
    // SAFETY: returns a pointer to a static record.
    unsafe { sdl_sys::Mix_Linked_Version().as_ref() }
        .copied()
        .unwrap_or_default()
}

/// Opens the output device and allocates [`CHANNELS`] mixing channels.
///
/// Opens nest; each successful call needs a matching [`close_audio`].
pub fn open_audio(frequency: i32, format: AudioFormat, channels: i32, chunk_size: i32) -> Result<()> {
    // SAFETY: plain value arguments.
    check(unsafe { sdl_sys::Mix_OpenAudio(frequency, format.raw(), channels, chunk_size) })?;
    debug!(frequency, format = %format, channels, chunk_size, "audio opened");
    Ok(())
}

pub fn close_audio() {
    // SAFETY: no arguments.
    unsafe { sdl_sys::Mix_CloseAudio() }
}

pub fn query_spec() -> Result<AudioSpec> {
    let (mut frequency, mut format, mut channels) = (0, 0, 0);
    // SAFETY: valid out parameters.
    let open_count = unsafe { sdl_sys::Mix_QuerySpec(&mut frequency, &mut format, &mut channels) };
    if open_count == 0 {
        return Err(Error::from_native(0));
    }
    Ok(AudioSpec {
        frequency,
        format: AudioFormat(format),
        channels,
        open_count,
    })
}

/// Resizes the channel table and returns its new size.
///
/// Channels beyond the new size are halted.
pub fn allocate_channels(count: u32) -> i32 {
    let count = c_int::try_from(count).unwrap_or(c_int::MAX);
    // SAFETY: plain value argument.
    unsafe { sdl_sys::Mix_AllocateChannels(count) }
}

pub fn num_channels() -> i32 {
    // SAFETY: a negative count only queries.
    unsafe { sdl_sys::Mix_AllocateChannels(-1) }
}

/// Plays `chunk` on `channel`, or on the first free one for -1.
///
/// `loops` of -1 repeats forever. Returns the channel used.
pub fn play_channel(channel: i32, chunk: &Chunk, loops: i32) -> Result<i32> {
    let raw = chunk.raw_checked()?;
    // SAFETY: live chunk; -1 ticks plays without a time limit.
    check_count(unsafe { sdl_sys::Mix_PlayChannelTimed(channel, raw, loops, -1) })
}

/// Stops `channel`, or every channel for -1.
pub fn halt_channel(channel: i32) {
    // SAFETY: plain value argument.
    unsafe { sdl_sys::Mix_HaltChannel(channel) };
}

pub fn halt_music() {
    // SAFETY: no arguments.
    unsafe { sdl_sys::Mix_HaltMusic() };
}

/// Sets the volume of `channel` (-1 for all) and returns the previous one.
///
/// `None` only queries. Volumes are clamped to [`MAX_VOLUME`].
pub fn volume(channel: i32, volume: Option<i32>) -> i32 {
    // SAFETY: plain value arguments.
    unsafe { sdl_sys::Mix_Volume(channel, volume.unwrap_or(-1)) }
}

pub fn volume_music(volume: Option<i32>) -> i32 {
    // SAFETY: plain value argument.
    unsafe { sdl_sys::Mix_VolumeMusic(volume.unwrap_or(-1)) }
}

pub fn pause(channel: i32) {
    // SAFETY: plain value argument.
    unsafe { sdl_sys::Mix_Pause(channel) }
}

pub fn resume(channel: i32) {
    // SAFETY: plain value argument.
    unsafe { sdl_sys::Mix_Resume(channel) }
}

/// Number of busy channels for -1, otherwise whether `channel` is busy (1 or 0).
///
/// Paused channels count as busy.
pub fn playing(channel: i32) -> i32 {
    // SAFETY: plain value argument.
    unsafe { sdl_sys::Mix_Playing(channel) }
}

pub fn playing_music() -> bool {
    // SAFETY: no arguments.
    unsafe { sdl_sys::Mix_PlayingMusic() != 0 }
}

pub fn fading_music() -> Fading {
    // SAFETY: no arguments.
    Fading::from_raw(unsafe { sdl_sys::Mix_FadingMusic() })
}

#[cfg(test)]
pub(crate) mod test_support {
    use parking_lot::{const_mutex, Mutex, MutexGuard};

    use super::*;

    static SERIAL: Mutex<()> = const_mutex(());

    /// Serializes tests that touch the shared output device.
    pub fn serial() -> MutexGuard<'static, ()> {
        SERIAL.lock()
    }

    /// Runs `body` with the device open at the default settings.
    pub fn with_audio<R>(body: impl FnOnce() -> R) -> R {
        open_audio(DEFAULT_FREQUENCY, AudioFormat::DEFAULT, DEFAULT_CHANNELS, 1024).unwrap();
        let result = body();
        close_audio();
        result
    }

    /// A minimal RIFF/WAVE header followed by `samples` bytes of silence.
    pub fn wav_bytes(samples: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(44 + samples);
        data.extend_from_slice(b"RIFF");
        data.extend_from_slice(&(36 + samples as u32).to_le_bytes());
        data.extend_from_slice(b"WAVEfmt ");
        data.extend_from_slice(&16u32.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&22050u32.to_le_bytes());
        data.extend_from_slice(&22050u32.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&8u16.to_le_bytes());
        data.extend_from_slice(b"data");
        data.extend_from_slice(&(samples as u32).to_le_bytes());
        data.resize(44 + samples, 0x80);
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bits_decode() {
        assert_eq!(AudioFormat::S16LSB.bits(), 16);
        assert!(AudioFormat::S16LSB.is_signed());
        assert!(!AudioFormat::U8.is_signed());
        assert!(AudioFormat::F32MSB.is_float());
        assert!(AudioFormat::F32MSB.is_big_endian());
        assert_eq!(AudioFormat::S16MSB.to_string(), "S16MSB");
        assert_eq!(AudioFormat::U8.to_string(), "U8");
        assert_eq!(AudioFormat::F32LSB.to_string(), "F32LSB");
        assert_eq!(AudioFormat::default().bits(), 16);
    }

    #[test]
    fn fading_decodes() {
        assert_eq!(Fading::from_raw(sdl_sys::MIX_FADING_IN), Fading::In);
        assert_eq!(Fading::from_raw(sdl_sys::MIX_FADING_OUT), Fading::Out);
        assert_eq!(Fading::from_raw(42), Fading::None);
    }

    #[test]
    fn linked_version_is_2_x() {
        assert_eq!(linked_version().major, 2);
    }

    #[cfg(sdl_stub)]
    mod stub {
        use sdl::Error;

        use super::*;
        use crate::test_support::{serial, wav_bytes, with_audio};

        #[test]
        fn init_reports_missing_decoders() {
            let _guard = serial();
            assert_eq!(init(InitFlags::OGG | InitFlags::FLAC).unwrap(), InitFlags::OGG | InitFlags::FLAC);

            let err = init(InitFlags::OGG | InitFlags::MP3).unwrap_err();
            assert_eq!(err.message(), "MP3 support not available");
            assert!(InitFlags::from_bits(err.code()).contains(InitFlags::OGG));
            quit();
            assert_eq!(init(InitFlags::MOD).unwrap(), InitFlags::MOD);
            quit();
        }

        #[test]
        fn device_opens_nest() {
            let _guard = serial();
            let err = query_spec().unwrap_err();
            assert_eq!(err.message(), "Audio device hasn't been opened");

            open_audio(44100, AudioFormat::S16LSB, 2, 512).unwrap();
            open_audio(22050, AudioFormat::U8, 1, 512).unwrap();
            let spec = query_spec().unwrap();
            assert_eq!(
                spec,
                AudioSpec {
                    frequency: 44100,
                    format: AudioFormat::S16LSB,
                    channels: 2,
                    open_count: 2,
                }
            );
            assert_eq!(num_channels(), CHANNELS);
            close_audio();
            assert_eq!(query_spec().unwrap().open_count, 1);
            close_audio();
            assert!(query_spec().is_err());
        }

        #[test]
        fn bad_device_parameters_are_rejected() {
            let _guard = serial();
            let err = open_audio(0, AudioFormat::DEFAULT, 2, 1024).unwrap_err();
            assert_eq!(err.message(), "Invalid audio frequency");
            assert_eq!(err.code(), -1);
            assert!(open_audio(DEFAULT_FREQUENCY, AudioFormat::DEFAULT, 9, 1024).is_err());
            let err = open_audio(DEFAULT_FREQUENCY, AudioFormat(0x1234), 2, 1024).unwrap_err();
            assert_eq!(err.message(), "Unsupported audio format");
        }

        #[test]
        fn channels_are_addressed_by_number() {
            let _guard = serial();
            with_audio(|| {
                let chunk = Chunk::from_bytes(&wav_bytes(64)).unwrap();
                assert_eq!(play_channel(-1, &chunk, 0).unwrap(), 0);
                assert_eq!(play_channel(3, &chunk, -1).unwrap(), 3);
                let err = play_channel(CHANNELS, &chunk, 0).unwrap_err();
                assert_eq!(err.message(), "No free channels available");
                assert_eq!(err.code(), -1);

                pause(3);
                resume(3);
                halt_channel(-1);
                assert_eq!(playing(-1), 0);
                assert_eq!(volume(0, None), MAX_VOLUME);
                assert_eq!(volume_music(None), MAX_VOLUME);
            });
        }

        #[test]
        fn channel_table_resizes() {
            let _guard = serial();
            with_audio(|| {
                let chunk = Chunk::from_bytes(&wav_bytes(8)).unwrap();
                assert_eq!(allocate_channels(1), 1);
                assert_eq!(num_channels(), 1);
                assert_eq!(play_channel(-1, &chunk, 0).unwrap(), 0);
                assert!(play_channel(1, &chunk, 0).is_err());

                assert_eq!(allocate_channels(0), 0);
                let err = play_channel(-1, &chunk, 0).unwrap_err();
                assert_eq!(err.message(), "No free channels available");
                assert_eq!(allocate_channels(CHANNELS as u32), CHANNELS);
            });
            assert_eq!(num_channels(), 0);
        }

        #[test]
        fn playing_a_freed_chunk_is_refused() {
            let _guard = serial();
            with_audio(|| {
                let mut chunk = Chunk::from_bytes(&wav_bytes(8)).unwrap();
                chunk.free();
                assert_eq!(play_channel(-1, &chunk, 0), Err(Error::NullHandle("chunk")));
                assert_eq!(playing(-1), 0);
            });
        }
    }
}
