use std::ffi::c_int;
use std::path::Path;

use sdl::error::{check_ptr, to_cstring, Error, Result};
use sdl::{Handle, Resource};
use sdl_abi::MixChunk;
use sdl_sys::SDL_RWops;
use tracing::debug;

struct ChunkResource;

impl Resource for ChunkResource {
    type Raw = MixChunk;

    const KIND: &'static str = "chunk";

    unsafe fn release(raw: *mut MixChunk) {
        // SAFETY: guaranteed by the `Resource` contract.
        unsafe { sdl_sys::Mix_FreeChunk(raw) }
    }
}

/// A decoded sound effect.
///
/// Freeing a chunk halts every channel still playing it.
#[derive(Debug)]
pub struct Chunk {
    handle: Handle<ChunkResource>,
}

// SAFETY: the chunk owns its sample buffer and the native mixer locks the
// device around every access to it.
unsafe impl Send for Chunk {}

impl Chunk {
    /// Decodes the sound file at `path`. The device must already be open.
    pub fn load_wav(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = to_cstring(&path.to_string_lossy())?;
        // SAFETY: NUL-terminated arguments.
        let src = check_ptr(unsafe { sdl_sys::SDL_RWFromFile(file.as_ptr(), c"rb".as_ptr()) })?;
        let chunk = Self::decode(src)?;
        debug!(path = %path.display(), len = chunk.byte_len().unwrap_or(0), "chunk loaded");
        Ok(chunk)
    }

    /// Decodes an in-memory sound file. The samples are copied, so `data`
    /// is only borrowed for the call.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let size = c_int::try_from(data.len()).map_err(|_| Error::Sdl {
            message: format!("{} bytes is too large for a chunk", data.len()),
            code: -1,
        })?;
        // SAFETY: `data` holds `size` readable bytes for the whole call.
        let src = check_ptr(unsafe { sdl_sys::SDL_RWFromConstMem(data.as_ptr().cast(), size) })?;
        Self::decode(src)
    }

    /// Takes ownership of `src`; the stream is closed whether or not decoding succeeds.
    fn decode(src: *mut SDL_RWops) -> Result<Self> {
        // SAFETY: live stream, released by the call.
        let raw = unsafe { sdl_sys::Mix_LoadWAV_RW(src, 1) };
        Ok(Self {
            handle: Handle::adopt(raw)?,
        })
    }

    pub fn raw(&self) -> *mut MixChunk {
        self.handle.as_ptr()
    }

    pub(crate) fn raw_checked(&self) -> Result<*mut MixChunk> {
        self.handle.get()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// Size of the decoded samples in bytes.
    pub fn byte_len(&self) -> Result<usize> {
        let raw = self.handle.get()?;
        // SAFETY: live chunk.
        Ok(unsafe { (*raw).alen } as usize)
    }

    pub fn volume(&self) -> Result<i32> {
        let raw = self.handle.get()?;
        // SAFETY: live chunk; -1 only queries.
        Ok(unsafe { sdl_sys::Mix_VolumeChunk(raw, -1) })
    }

    /// Sets the volume, clamped to [`MAX_VOLUME`](crate::MAX_VOLUME), and
    /// returns the previous one.
    pub fn set_volume(&mut self, volume: u8) -> Result<i32> {
        let raw = self.handle.get()?;
        // SAFETY: live chunk.
        Ok(unsafe { sdl_sys::Mix_VolumeChunk(raw, c_int::from(volume)) })
    }

    pub fn free(&mut self) {
        self.handle.release();
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::test_support::{serial, wav_bytes, with_audio};

    fn assert_send<T: Send>() {}

    #[test]
    fn chunk_moves_between_threads() {
        assert_send::<Chunk>();
    }

    #[test]
    fn freed_chunk_refuses_every_call() {
        let _guard = serial();
        with_audio(|| {
            let mut chunk = Chunk::from_bytes(&wav_bytes(16)).unwrap();
            assert!(!chunk.is_null());
            chunk.free();
            chunk.free();
            assert!(chunk.is_null());
            assert_eq!(chunk.volume(), Err(Error::NullHandle("chunk")));
            assert_eq!(chunk.byte_len(), Err(Error::NullHandle("chunk")));
        });
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.wav");
        let err = Chunk::load_wav(&path).unwrap_err();
        assert!(err.message().contains("missing.wav"), "{}", err.message());
    }

    #[test]
    fn interior_nul_in_path() {
        assert_eq!(Chunk::load_wav("a\0b.wav").unwrap_err(), Error::InteriorNul);
    }

    #[test]
    fn empty_buffer_is_rejected() {
        assert!(Chunk::from_bytes(&[]).is_err());
    }

    #[cfg(sdl_stub)]
    mod stub {
        use std::fs;

        use sdl_sys::stub;

        use super::*;

        #[test]
        fn decode_needs_an_open_device() {
            let _guard = serial();
            let err = Chunk::from_bytes(&wav_bytes(16)).unwrap_err();
            assert_eq!(err.message(), "Audio device hasn't been opened");
            assert_eq!(stub::live_count("rwops"), 0);
        }

        #[test]
        fn bytes_and_files_decode_alike() {
            let _guard = serial();
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("blip.wav");
            fs::write(&path, wav_bytes(32)).unwrap();

            with_audio(|| {
                let from_file = Chunk::load_wav(&path).unwrap();
                let from_bytes = Chunk::from_bytes(&wav_bytes(32)).unwrap();
                assert_eq!(from_file.byte_len().unwrap(), 76);
                assert_eq!(from_bytes.byte_len().unwrap(), 76);
                assert_eq!(stub::live_count("rwops"), 0);
                assert_eq!(stub::live_count("chunk"), 2);
            });
            assert_eq!(stub::live_count("chunk"), 0);
        }

        #[test]
        fn unknown_data_is_rejected() {
            let _guard = serial();
            with_audio(|| {
                let err = Chunk::from_bytes(b"definitely not audio").unwrap_err();
                assert_eq!(err.message(), "Unrecognized audio format");
                assert_eq!(err.code(), 0);
                assert_eq!(stub::live_count("rwops"), 0);
            });
        }

        #[test]
        fn volume_is_clamped() {
            let _guard = serial();
            with_audio(|| {
                let mut chunk = Chunk::from_bytes(&wav_bytes(4)).unwrap();
                assert_eq!(chunk.volume().unwrap(), crate::MAX_VOLUME);
                assert_eq!(chunk.set_volume(32).unwrap(), crate::MAX_VOLUME);
                assert_eq!(chunk.set_volume(255).unwrap(), 32);
                assert_eq!(chunk.volume().unwrap(), crate::MAX_VOLUME);
            });
        }

        #[test]
        fn chunk_is_freed_on_drop() {
            let _guard = serial();
            with_audio(|| {
                let chunk = Chunk::from_bytes(&wav_bytes(4)).unwrap();
                let raw = chunk.raw();
                assert!(stub::is_live(raw.cast()));
                drop(chunk);
                assert!(!stub::is_live(raw.cast()));
            });
        }
    }
}
