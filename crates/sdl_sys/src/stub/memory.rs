use std::alloc::{self, Layout};
use std::collections::HashMap;
use std::ffi::{c_char, c_void};
use std::ptr;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

const BLOCK_ALIGN: usize = 16;

static BLOCKS: Lazy<Mutex<HashMap<usize, Layout>>> = Lazy::new(Default::default);

#[no_mangle]
pub unsafe extern "C" fn SDL_malloc(size: usize) -> *mut c_void {
    let Ok(layout) = Layout::from_size_align(size.max(1), BLOCK_ALIGN) else {
        return ptr::null_mut();
    };
    // SAFETY: layout has non-zero size.
    let block = unsafe { alloc::alloc_zeroed(layout) };
    if !block.is_null() {
        BLOCKS.lock().insert(block as usize, layout);
    }
    block.cast()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_free(mem: *mut c_void) {
    if mem.is_null() {
        return;
    }
    if let Some(layout) = BLOCKS.lock().remove(&(mem as usize)) {
        // SAFETY: allocated by SDL_malloc with this layout and removed above.
        unsafe { alloc::dealloc(mem.cast(), layout) };
    }
}

/// `SDL_strdup` for stub-side strings.
pub(crate) fn strdup(text: &[u8]) -> *mut c_char {
    // SAFETY: plain allocation.
    let copy = unsafe { SDL_malloc(text.len() + 1) }.cast::<u8>();
    if !copy.is_null() {
        // SAFETY: the block holds len + 1 bytes and is zeroed, so it ends in NUL.
        unsafe { ptr::copy_nonoverlapping(text.as_ptr(), copy, text.len()) };
    }
    copy.cast()
}

/// Whether `ptr` is an `SDL_malloc` block that has not been freed.
pub(crate) fn contains(ptr: *const c_void) -> bool {
    !ptr.is_null() && BLOCKS.lock().contains_key(&(ptr as usize))
}
