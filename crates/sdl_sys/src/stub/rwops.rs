use std::ffi::{c_char, c_int, c_void, CStr};
use std::ptr;

use super::error::set_error;
use super::{adopt, lookup, reclaim};
use crate::SDL_RWops;

const RWOPS: &str = "rwops";

struct StubRwops {
    data: Vec<u8>,
}

/// Contents of a live stream, or `None` for anything else.
pub(crate) fn contents(src: *mut SDL_RWops) -> Option<Vec<u8>> {
    // SAFETY: the registry only resolves live streams.
    unsafe { lookup::<StubRwops, _>(src, RWOPS) }.map(|rwops| rwops.data.clone())
}

pub(crate) fn close(src: *mut SDL_RWops) {
    // SAFETY: the registry only reclaims live streams.
    unsafe { reclaim::<StubRwops, _>(src, RWOPS) };
}

/// Read modes only; the stub never writes files.
#[no_mangle]
pub unsafe extern "C" fn SDL_RWFromFile(file: *const c_char, mode: *const c_char) -> *mut SDL_RWops {
    if file.is_null() || mode.is_null() {
        set_error("SDL_RWFromFile(): No file or no mode specified");
        return ptr::null_mut();
    }
    // SAFETY: caller passes NUL-terminated strings.
    let (file, mode) = unsafe { (CStr::from_ptr(file), CStr::from_ptr(mode)) };
    let path = file.to_string_lossy();
    if !mode.to_bytes().starts_with(b"r") {
        set_error(format!("Couldn't open {path}"));
        return ptr::null_mut();
    }
    match std::fs::read(path.as_ref()) {
        Ok(data) => adopt(StubRwops { data }, RWOPS).cast(),
        Err(_) => {
            set_error(format!("Couldn't open {path}"));
            ptr::null_mut()
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RWFromConstMem(mem: *const c_void, size: c_int) -> *mut SDL_RWops {
    if mem.is_null() {
        set_error("Parameter 'mem' is invalid");
        return ptr::null_mut();
    }
    if size <= 0 {
        set_error("Parameter 'size' is invalid");
        return ptr::null_mut();
    }
    // SAFETY: caller passes `size` readable bytes.
    let data = unsafe { std::slice::from_raw_parts(mem.cast::<u8>(), size as usize) }.to_vec();
    adopt(StubRwops { data }, RWOPS).cast()
}
