use std::ffi::{c_char, c_int, c_long, CStr};
use std::path::Path;
use std::ptr;
use std::sync::atomic::{AtomicI32, Ordering};

use sdl_abi::{Color, Surface, Version};

use super::error::set_error;
use super::surface::new_surface;
use super::{adopt, lookup, reclaim};
use crate::{
    TTF_Font, SDL_PIXELFORMAT_ARGB8888, SDL_PIXELFORMAT_INDEX8, TTF_HINTING_NORMAL,
    TTF_STYLE_NORMAL,
};

const FONT: &str = "font";

static LINKED_VERSION: Version = Version {
    major: 2,
    minor: 0,
    patch: 12,
};
static INIT_COUNT: AtomicI32 = AtomicI32::new(0);

/// Settings a caller can read back. Metrics are all zero.
struct StubFont {
    style: c_int,
    outline: c_int,
    hinting: c_int,
    kerning: c_int,
}

fn font<'a>(font: *const TTF_Font) -> Option<&'a mut StubFont> {
    // SAFETY: the registry only resolves live fonts.
    let found = unsafe { lookup::<StubFont, _>(font.cast_mut(), FONT) };
    if found.is_none() {
        set_error("Passed a NULL font");
    }
    found
}

/// Whether `text` is non-null and non-empty.
fn text_arg(text: *const c_char) -> Option<bool> {
    if text.is_null() {
        set_error("Passed a NULL string");
        return None;
    }
    // SAFETY: caller passes a NUL-terminated string.
    Some(!unsafe { CStr::from_ptr(text) }.is_empty())
}

#[no_mangle]
pub unsafe extern "C" fn TTF_Linked_Version() -> *const Version {
    &LINKED_VERSION
}

#[no_mangle]
pub unsafe extern "C" fn TTF_Init() -> c_int {
    INIT_COUNT.fetch_add(1, Ordering::SeqCst);
    0
}

#[no_mangle]
pub unsafe extern "C" fn TTF_Quit() {
    let _ = INIT_COUNT.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
        (count > 0).then(|| count - 1)
    });
}

#[no_mangle]
pub unsafe extern "C" fn TTF_WasInit() -> c_int {
    INIT_COUNT.load(Ordering::SeqCst)
}

#[no_mangle]
pub unsafe extern "C" fn TTF_OpenFont(file: *const c_char, ptsize: c_int) -> *mut TTF_Font {
    // SAFETY: forwarded.
    unsafe { TTF_OpenFontIndex(file, ptsize, 0) }
}

/// Any readable file opens as a font; face 0 is the only face.
#[no_mangle]
pub unsafe extern "C" fn TTF_OpenFontIndex(
    file: *const c_char,
    ptsize: c_int,
    index: c_long,
) -> *mut TTF_Font {
    if INIT_COUNT.load(Ordering::SeqCst) == 0 {
        set_error("Library not initialized");
        return ptr::null_mut();
    }
    if file.is_null() {
        set_error("Passed a NULL font file name");
        return ptr::null_mut();
    }
    // SAFETY: caller passes a NUL-terminated string.
    let path = unsafe { CStr::from_ptr(file) }.to_string_lossy().into_owned();
    let path = Path::new(&path);
    if !path.is_file() {
        set_error(format!("Couldn't open {}", path.display()));
        return ptr::null_mut();
    }
    if index != 0 {
        set_error("Couldn't load font file");
        return ptr::null_mut();
    }
    if ptsize <= 0 {
        set_error("Couldn't set font size");
        return ptr::null_mut();
    }
    let font = StubFont {
        style: TTF_STYLE_NORMAL,
        outline: 0,
        hinting: TTF_HINTING_NORMAL,
        kerning: 1,
    };
    adopt(font, FONT).cast()
}

#[no_mangle]
pub unsafe extern "C" fn TTF_CloseFont(font: *mut TTF_Font) {
    // SAFETY: the registry only reclaims live fonts.
    unsafe { reclaim::<StubFont, _>(font, FONT) };
}

#[no_mangle]
pub unsafe extern "C" fn TTF_GetFontStyle(font: *const TTF_Font) -> c_int {
    self::font(font).map_or(0, |font| font.style)
}

#[no_mangle]
pub unsafe extern "C" fn TTF_SetFontStyle(font: *mut TTF_Font, style: c_int) {
    if let Some(font) = self::font(font) {
        font.style = style;
    }
}

#[no_mangle]
pub unsafe extern "C" fn TTF_GetFontOutline(font: *const TTF_Font) -> c_int {
    self::font(font).map_or(0, |font| font.outline)
}

#[no_mangle]
pub unsafe extern "C" fn TTF_SetFontOutline(font: *mut TTF_Font, outline: c_int) {
    if let Some(font) = self::font(font) {
        font.outline = outline.max(0);
    }
}

#[no_mangle]
pub unsafe extern "C" fn TTF_GetFontHinting(font: *const TTF_Font) -> c_int {
    self::font(font).map_or(0, |font| font.hinting)
}

#[no_mangle]
pub unsafe extern "C" fn TTF_SetFontHinting(font: *mut TTF_Font, hinting: c_int) {
    if let Some(font) = self::font(font) {
        font.hinting = hinting;
    }
}

#[no_mangle]
pub unsafe extern "C" fn TTF_FontHeight(font: *const TTF_Font) -> c_int {
    let _ = self::font(font);
    0
}

#[no_mangle]
pub unsafe extern "C" fn TTF_FontAscent(font: *const TTF_Font) -> c_int {
    let _ = self::font(font);
    0
}

#[no_mangle]
pub unsafe extern "C" fn TTF_FontDescent(font: *const TTF_Font) -> c_int {
    let _ = self::font(font);
    0
}

#[no_mangle]
pub unsafe extern "C" fn TTF_FontLineSkip(font: *const TTF_Font) -> c_int {
    let _ = self::font(font);
    0
}

#[no_mangle]
pub unsafe extern "C" fn TTF_GetFontKerning(font: *const TTF_Font) -> c_int {
    self::font(font).map_or(0, |font| font.kerning)
}

#[no_mangle]
pub unsafe extern "C" fn TTF_SetFontKerning(font: *mut TTF_Font, allowed: c_int) {
    if let Some(font) = self::font(font) {
        font.kerning = allowed;
    }
}

#[no_mangle]
pub unsafe extern "C" fn TTF_FontFaces(font: *const TTF_Font) -> c_long {
    self::font(font).map_or(0, |_| 1)
}

#[no_mangle]
pub unsafe extern "C" fn TTF_FontFaceIsFixedWidth(font: *const TTF_Font) -> c_int {
    self::font(font).map_or(0, |_| 1)
}

#[no_mangle]
pub unsafe extern "C" fn TTF_FontFaceFamilyName(font: *const TTF_Font) -> *mut c_char {
    self::font(font).map_or(ptr::null_mut(), |_| c"Stub".as_ptr().cast_mut())
}

#[no_mangle]
pub unsafe extern "C" fn TTF_FontFaceStyleName(font: *const TTF_Font) -> *mut c_char {
    self::font(font).map_or(ptr::null_mut(), |_| c"Regular".as_ptr().cast_mut())
}

/// Writes zero for every metric.
#[no_mangle]
pub unsafe extern "C" fn TTF_GlyphMetrics(
    font: *mut TTF_Font,
    _ch: u16,
    minx: *mut c_int,
    maxx: *mut c_int,
    miny: *mut c_int,
    maxy: *mut c_int,
    advance: *mut c_int,
) -> c_int {
    if self::font(font).is_none() {
        return -1;
    }
    // SAFETY: caller-provided out parameters, each optional.
    unsafe { write_zeros(&[minx, maxx, miny, maxy, advance]) };
    0
}

unsafe fn write_zeros(targets: &[*mut c_int]) {
    for target in targets.iter().filter(|target| !target.is_null()) {
        // SAFETY: caller passes writable out parameters.
        unsafe { target.write(0) };
    }
}

#[no_mangle]
pub unsafe extern "C" fn TTF_SizeUTF8(
    font: *mut TTF_Font,
    text: *const c_char,
    w: *mut c_int,
    h: *mut c_int,
) -> c_int {
    if self::font(font).is_none() || text_arg(text).is_none() {
        return -1;
    }
    // SAFETY: caller-provided out parameters, each optional.
    unsafe { write_zeros(&[w, h]) };
    0
}

/// A blank 1x1 surface in `format`; empty text has no surface.
fn render(font: *mut TTF_Font, text: *const c_char, format: u32) -> *mut Surface {
    if self::font(font).is_none() {
        return ptr::null_mut();
    }
    match text_arg(text) {
        Some(true) => new_surface(format, 1, 1, None),
        Some(false) => {
            set_error("Text has zero width");
            ptr::null_mut()
        }
        None => ptr::null_mut(),
    }
}

#[no_mangle]
pub unsafe extern "C" fn TTF_RenderUTF8_Solid(
    font: *mut TTF_Font,
    text: *const c_char,
    _fg: Color,
) -> *mut Surface {
    render(font, text, SDL_PIXELFORMAT_INDEX8)
}

#[no_mangle]
pub unsafe extern "C" fn TTF_RenderUTF8_Shaded(
    font: *mut TTF_Font,
    text: *const c_char,
    _fg: Color,
    _bg: Color,
) -> *mut Surface {
    render(font, text, SDL_PIXELFORMAT_INDEX8)
}

#[no_mangle]
pub unsafe extern "C" fn TTF_RenderUTF8_Blended(
    font: *mut TTF_Font,
    text: *const c_char,
    _fg: Color,
) -> *mut Surface {
    render(font, text, SDL_PIXELFORMAT_ARGB8888)
}

#[no_mangle]
pub unsafe extern "C" fn TTF_RenderUTF8_Blended_Wrapped(
    font: *mut TTF_Font,
    text: *const c_char,
    _fg: Color,
    _wrap_length: u32,
) -> *mut Surface {
    render(font, text, SDL_PIXELFORMAT_ARGB8888)
}
