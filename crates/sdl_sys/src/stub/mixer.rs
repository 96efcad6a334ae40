use std::ffi::{c_char, c_int, CStr};
use std::path::Path;
use std::ptr;

use parking_lot::{const_mutex, Mutex};
use sdl_abi::{MixChunk, Version, POINTER_GAP};

use super::error::set_error;
use super::memory::{SDL_free, SDL_malloc};
use super::rwops;
use super::{adopt, lookup, reclaim};
use crate::{
    Mix_Music, SDL_RWops, AUDIO_F32LSB, AUDIO_F32MSB, AUDIO_S16LSB, AUDIO_S16MSB, AUDIO_S32LSB,
    AUDIO_S32MSB, AUDIO_S8, AUDIO_U16LSB, AUDIO_U16MSB, AUDIO_U8, MIX_CHANNELS, MIX_INIT_FLAC,
    MIX_INIT_MOD, MIX_INIT_MODPLUG, MIX_INIT_MP3, MIX_INIT_OGG, MIX_MAX_VOLUME, MUS_FLAC, MUS_MID,
    MUS_MOD, MUS_MP3, MUS_NONE, MUS_OGG, MUS_WAV,
};

const CHUNK: &str = "chunk";
const MUSIC: &str = "music";

const SUPPORTED_FORMATS: c_int = MIX_INIT_FLAC | MIX_INIT_MOD | MIX_INIT_OGG;

static LINKED_VERSION: Version = Version {
    major: 2,
    minor: 0,
    patch: 0,
};

struct Device {
    open_count: c_int,
    frequency: c_int,
    format: u16,
    channels: c_int,
}

/// Device and channel counts. Nothing is mixed, so no channel ever plays.
struct MixerState {
    initialized: c_int,
    device: Device,
    channels: c_int,
}

static MIXER: Mutex<MixerState> = const_mutex(MixerState {
    initialized: 0,
    device: Device {
        open_count: 0,
        frequency: 0,
        format: 0,
        channels: 0,
    },
    channels: 0,
});

struct StubMusic {
    kind: c_int,
}

fn format_name(flag: c_int) -> &'static str {
    match flag {
        MIX_INIT_FLAC => "FLAC",
        MIX_INIT_MOD => "MOD",
        MIX_INIT_MODPLUG => "MODPLUG",
        MIX_INIT_MP3 => "MP3",
        MIX_INIT_OGG => "OGG",
        _ => "FLUIDSYNTH",
    }
}

#[no_mangle]
pub unsafe extern "C" fn Mix_Linked_Version() -> *const Version {
    &LINKED_VERSION
}

/// Returns every flag initialized so far; unsupported flags record an error.
#[no_mangle]
pub unsafe extern "C" fn Mix_Init(flags: c_int) -> c_int {
    let mut state = MIXER.lock();
    for bit in (0..6).map(|shift| 1 << shift).filter(|bit| flags & bit != 0) {
        if SUPPORTED_FORMATS & bit != 0 {
            state.initialized |= bit;
        } else {
            set_error(format!("{} support not available", format_name(bit)));
        }
    }
    state.initialized
}

#[no_mangle]
pub unsafe extern "C" fn Mix_Quit() {
    MIXER.lock().initialized = 0;
}

#[no_mangle]
pub unsafe extern "C" fn Mix_OpenAudio(frequency: c_int, format: u16, channels: c_int, chunksize: c_int) -> c_int {
    if frequency <= 0 {
        return set_error("Invalid audio frequency");
    }
    if !(1..=8).contains(&channels) {
        return set_error("Invalid number of channels");
    }
    if chunksize <= 0 {
        return set_error("Invalid chunk size");
    }
    let known = [
        AUDIO_U8,
        AUDIO_S8,
        AUDIO_U16LSB,
        AUDIO_S16LSB,
        AUDIO_U16MSB,
        AUDIO_S16MSB,
        AUDIO_S32LSB,
        AUDIO_S32MSB,
        AUDIO_F32LSB,
        AUDIO_F32MSB,
    ];
    if !known.contains(&format) {
        return set_error("Unsupported audio format");
    }
    let mut state = MIXER.lock();
    if state.device.open_count == 0 {
        state.device = Device {
            open_count: 0,
            frequency,
            format,
            channels,
        };
        state.channels = MIX_CHANNELS;
    }
    state.device.open_count += 1;
    0
}

#[no_mangle]
pub unsafe extern "C" fn Mix_CloseAudio() {
    let mut state = MIXER.lock();
    if state.device.open_count == 0 {
        return;
    }
    state.device.open_count -= 1;
    if state.device.open_count == 0 {
        state.channels = 0;
    }
}

/// Returns how many times the device has been opened, 0 when closed.
#[no_mangle]
pub unsafe extern "C" fn Mix_QuerySpec(frequency: *mut c_int, format: *mut u16, channels: *mut c_int) -> c_int {
    let state = MIXER.lock();
    if state.device.open_count == 0 {
        set_error("Audio device hasn't been opened");
        return 0;
    }
    // SAFETY: caller-provided out parameters, each optional.
    unsafe {
        if !frequency.is_null() {
            frequency.write(state.device.frequency);
        }
        if !format.is_null() {
            format.write(state.device.format);
        }
        if !channels.is_null() {
            channels.write(state.device.channels);
        }
    }
    state.device.open_count
}

/// A negative count only queries.
#[no_mangle]
pub unsafe extern "C" fn Mix_AllocateChannels(numchans: c_int) -> c_int {
    let mut state = MIXER.lock();
    if numchans >= 0 {
        state.channels = numchans;
    }
    state.channels
}

fn recognized(data: &[u8]) -> bool {
    (data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WAVE")
        || data.starts_with(b"OggS")
        || data.starts_with(b"fLaC")
        || data.starts_with(b"FORM")
}

#[no_mangle]
pub unsafe extern "C" fn Mix_LoadWAV_RW(src: *mut SDL_RWops, freesrc: c_int) -> *mut MixChunk {
    let Some(data) = rwops::contents(src) else {
        set_error("Mix_LoadWAV_RW with NULL src");
        return ptr::null_mut();
    };
    if freesrc != 0 {
        rwops::close(src);
    }
    if MIXER.lock().device.open_count == 0 {
        set_error("Audio device hasn't been opened");
        return ptr::null_mut();
    }
    if !recognized(&data) {
        set_error("Unrecognized audio format");
        return ptr::null_mut();
    }
    // SAFETY: plain allocation of `data.len()` bytes.
    let abuf = unsafe { SDL_malloc(data.len()) }.cast::<u8>();
    if abuf.is_null() {
        set_error("Out of memory");
        return ptr::null_mut();
    }
    // SAFETY: `abuf` holds `data.len()` bytes.
    unsafe { ptr::copy_nonoverlapping(data.as_ptr(), abuf, data.len()) };
    let chunk = MixChunk {
        allocated: 1,
        padding: [0; POINTER_GAP],
        abuf,
        alen: data.len() as u32,
        volume: MIX_MAX_VOLUME as u8,
        padding_tail: [0; 3],
    };
    adopt(chunk, CHUNK)
}

#[no_mangle]
pub unsafe extern "C" fn Mix_FreeChunk(chunk: *mut MixChunk) {
    // SAFETY: the registry only reclaims live chunks.
    let Some(chunk) = (unsafe { reclaim::<MixChunk, _>(chunk, CHUNK) }) else {
        return;
    };
    if chunk.allocated != 0 {
        // SAFETY: `abuf` came from SDL_malloc in Mix_LoadWAV_RW.
        unsafe { SDL_free(chunk.abuf.cast()) };
    }
}

/// Returns the previous volume; -1 only queries.
#[no_mangle]
pub unsafe extern "C" fn Mix_VolumeChunk(chunk: *mut MixChunk, volume: c_int) -> c_int {
    // SAFETY: the registry only resolves live chunks.
    let Some(chunk) = (unsafe { lookup::<MixChunk, _>(chunk, CHUNK) }) else {
        return -1;
    };
    let previous = c_int::from(chunk.volume);
    if volume >= 0 {
        chunk.volume = volume.min(MIX_MAX_VOLUME) as u8;
    }
    previous
}

fn music_type(path: &Path) -> Option<c_int> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "wav" => Some(MUS_WAV),
        "mod" | "xm" | "s3m" | "it" => Some(MUS_MOD),
        "mid" | "midi" => Some(MUS_MID),
        "ogg" => Some(MUS_OGG),
        "mp3" => Some(MUS_MP3),
        "flac" => Some(MUS_FLAC),
        _ => None,
    }
}

#[no_mangle]
pub unsafe extern "C" fn Mix_LoadMUS(file: *const c_char) -> *mut Mix_Music {
    if file.is_null() {
        set_error("Parameter 'file' is invalid");
        return ptr::null_mut();
    }
    // SAFETY: caller passes a NUL-terminated string.
    let path = unsafe { CStr::from_ptr(file) }.to_string_lossy().into_owned();
    let path = Path::new(&path);
    if !path.is_file() {
        set_error(format!("Couldn't open '{}'", path.display()));
        return ptr::null_mut();
    }
    let Some(kind) = music_type(path) else {
        set_error("Unrecognized music format");
        return ptr::null_mut();
    };
    adopt(StubMusic { kind }, MUSIC).cast()
}

#[no_mangle]
pub unsafe extern "C" fn Mix_FreeMusic(music: *mut Mix_Music) {
    // SAFETY: the registry only reclaims live music.
    unsafe { reclaim::<StubMusic, _>(music, MUSIC) };
}

/// The type of `music`. Null asks for the playing music, and none ever plays.
#[no_mangle]
pub unsafe extern "C" fn Mix_GetMusicType(music: *const Mix_Music) -> c_int {
    // SAFETY: the registry only resolves live music.
    unsafe { lookup::<StubMusic, _>(music.cast_mut(), MUSIC) }.map_or(MUS_NONE, |music| music.kind)
}

#[no_mangle]
pub unsafe extern "C" fn Mix_PlayMusic(music: *mut Mix_Music, _loops: c_int) -> c_int {
    // SAFETY: the registry only resolves live music.
    if unsafe { lookup::<StubMusic, _>(music, MUSIC) }.is_none() {
        return set_error("music parameter was NULL");
    }
    if MIXER.lock().device.open_count == 0 {
        return set_error("Audio device hasn't been opened");
    }
    0
}

/// Returns the channel picked, the first one for -1.
#[no_mangle]
pub unsafe extern "C" fn Mix_PlayChannelTimed(
    channel: c_int,
    chunk: *mut MixChunk,
    _loops: c_int,
    _ticks: c_int,
) -> c_int {
    // SAFETY: the registry only resolves live chunks.
    if unsafe { lookup::<MixChunk, _>(chunk, CHUNK) }.is_none() {
        return set_error("Tried to play a NULL chunk");
    }
    let count = MIXER.lock().channels;
    match channel {
        -1 if count > 0 => 0,
        channel if (0..count).contains(&channel) => channel,
        _ => set_error("No free channels available"),
    }
}

#[no_mangle]
pub unsafe extern "C" fn Mix_HaltChannel(_channel: c_int) -> c_int {
    0
}

#[no_mangle]
pub unsafe extern "C" fn Mix_HaltMusic() -> c_int {
    0
}

/// Volumes are not kept; every query answers the maximum.
#[no_mangle]
pub unsafe extern "C" fn Mix_Volume(_channel: c_int, _volume: c_int) -> c_int {
    MIX_MAX_VOLUME
}

#[no_mangle]
pub unsafe extern "C" fn Mix_VolumeMusic(_volume: c_int) -> c_int {
    MIX_MAX_VOLUME
}

#[no_mangle]
pub unsafe extern "C" fn Mix_Pause(_channel: c_int) {}

#[no_mangle]
pub unsafe extern "C" fn Mix_Resume(_channel: c_int) {}

#[no_mangle]
pub unsafe extern "C" fn Mix_Playing(_channel: c_int) -> c_int {
    0
}

#[no_mangle]
pub unsafe extern "C" fn Mix_PlayingMusic() -> c_int {
    0
}

#[no_mangle]
pub unsafe extern "C" fn Mix_FadingMusic() -> c_int {
    0
}
