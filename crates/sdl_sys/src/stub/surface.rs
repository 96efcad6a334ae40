use std::ffi::{c_char, c_int, c_void, CStr};
use std::ptr;

use sdl_abi::{BlitMap, Color, Palette, PixelFormat, Rect, Surface, POINTER_GAP};

use super::error::set_error;
use super::memory::{SDL_free, SDL_malloc};
use super::{adopt, lookup, reclaim};
use crate::{
    SDL_DONTFREE, SDL_PIXELFORMAT_ABGR8888, SDL_PIXELFORMAT_ARGB8888, SDL_PIXELFORMAT_BGR24,
    SDL_PIXELFORMAT_BGR888, SDL_PIXELFORMAT_BGRA8888, SDL_PIXELFORMAT_INDEX8,
    SDL_PIXELFORMAT_RGB24, SDL_PIXELFORMAT_RGB332, SDL_PIXELFORMAT_RGB565,
    SDL_PIXELFORMAT_RGB888, SDL_PIXELFORMAT_RGBA8888, SDL_PREALLOC,
};

const SURFACE: &str = "surface";
const PIXEL_FORMAT: &str = "pixel_format";
const PALETTE: &str = "palette";

struct FormatEntry {
    format: u32,
    name: &'static CStr,
    masks: [u32; 4],
}

const FORMATS: [FormatEntry; 11] = [
    FormatEntry {
        format: SDL_PIXELFORMAT_INDEX8,
        name: c"SDL_PIXELFORMAT_INDEX8",
        masks: [0, 0, 0, 0],
    },
    FormatEntry {
        format: SDL_PIXELFORMAT_RGB332,
        name: c"SDL_PIXELFORMAT_RGB332",
        masks: [0xE0, 0x1C, 0x03, 0],
    },
    FormatEntry {
        format: SDL_PIXELFORMAT_RGB565,
        name: c"SDL_PIXELFORMAT_RGB565",
        masks: [0xF800, 0x07E0, 0x001F, 0],
    },
    FormatEntry {
        format: SDL_PIXELFORMAT_RGB24,
        name: c"SDL_PIXELFORMAT_RGB24",
        masks: [0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0],
    },
    FormatEntry {
        format: SDL_PIXELFORMAT_BGR24,
        name: c"SDL_PIXELFORMAT_BGR24",
        masks: [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0],
    },
    FormatEntry {
        format: SDL_PIXELFORMAT_RGB888,
        name: c"SDL_PIXELFORMAT_RGB888",
        masks: [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0],
    },
    FormatEntry {
        format: SDL_PIXELFORMAT_BGR888,
        name: c"SDL_PIXELFORMAT_BGR888",
        masks: [0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0],
    },
    FormatEntry {
        format: SDL_PIXELFORMAT_ARGB8888,
        name: c"SDL_PIXELFORMAT_ARGB8888",
        masks: [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000],
    },
    FormatEntry {
        format: SDL_PIXELFORMAT_RGBA8888,
        name: c"SDL_PIXELFORMAT_RGBA8888",
        masks: [0xFF00_0000, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF],
    },
    FormatEntry {
        format: SDL_PIXELFORMAT_ABGR8888,
        name: c"SDL_PIXELFORMAT_ABGR8888",
        masks: [0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0xFF00_0000],
    },
    FormatEntry {
        format: SDL_PIXELFORMAT_BGRA8888,
        name: c"SDL_PIXELFORMAT_BGRA8888",
        masks: [0x0000_FF00, 0x00FF_0000, 0xFF00_0000, 0x0000_00FF],
    },
];

fn entry(format: u32) -> Option<&'static FormatEntry> {
    FORMATS.iter().find(|entry| entry.format == format)
}

const fn bits_per_pixel(format: u32) -> u8 {
    ((format >> 8) & 0xFF) as u8
}

const fn bytes_per_pixel(format: u32) -> u8 {
    (format & 0xFF) as u8
}

fn is_indexed(format: u32) -> bool {
    format == SDL_PIXELFORMAT_INDEX8
}

/// `SDL_MasksToPixelFormatEnum` over the formats the stub knows.
fn masks_to_format(depth: c_int, masks: [u32; 4]) -> Option<u32> {
    if masks == [0; 4] {
        return match depth {
            8 => Some(SDL_PIXELFORMAT_INDEX8),
            24 => Some(SDL_PIXELFORMAT_RGB24),
            32 => Some(SDL_PIXELFORMAT_RGB888),
            _ => None,
        };
    }
    FORMATS
        .iter()
        .filter(|entry| entry.masks == masks)
        .find(|entry| {
            let bits = c_int::from(bits_per_pixel(entry.format));
            bits == depth || (depth == 32 && bytes_per_pixel(entry.format) == 4)
        })
        .map(|entry| entry.format)
}

/// Per-surface blit state hung off `Surface::map`.
struct BlitInfo {
    color_key: Option<u32>,
    alpha_mod: u8,
}

pub(crate) fn surface<'a>(surface: *mut Surface) -> Option<&'a mut Surface> {
    // SAFETY: the registry only resolves live surfaces.
    unsafe { lookup::<Surface, _>(surface, SURFACE) }
}

fn pixel_format<'a>(format: *mut PixelFormat) -> Option<&'a mut PixelFormat> {
    // SAFETY: the registry only resolves live formats.
    unsafe { lookup::<PixelFormat, _>(format, PIXEL_FORMAT) }
}

fn palette<'a>(palette: *mut Palette) -> Option<&'a mut Palette> {
    // SAFETY: the registry only resolves live palettes.
    unsafe { lookup::<Palette, _>(palette, PALETTE) }
}

fn blit_info<'a>(surface: &Surface) -> Option<&'a mut BlitInfo> {
    // SAFETY: `map` is only ever set to a boxed `BlitInfo` by `new_surface`.
    unsafe { surface.map.cast::<BlitInfo>().as_mut() }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetPixelFormatName(format: u32) -> *const c_char {
    entry(format).map_or(c"SDL_PIXELFORMAT_UNKNOWN", |entry| entry.name).as_ptr()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_AllocFormat(pixel_format: u32) -> *mut PixelFormat {
    let Some(entry) = entry(pixel_format) else {
        set_error("Unknown pixel format");
        return ptr::null_mut();
    };
    let [rmask, gmask, bmask, amask] = entry.masks;
    let format = PixelFormat {
        format: pixel_format,
        padding0: [0; POINTER_GAP],
        palette: ptr::null_mut(),
        bits_per_pixel: bits_per_pixel(pixel_format),
        bytes_per_pixel: bytes_per_pixel(pixel_format),
        padding: [0; 2],
        rmask,
        gmask,
        bmask,
        amask,
        rloss: 0,
        gloss: 0,
        bloss: 0,
        aloss: 0,
        rshift: 0,
        gshift: 0,
        bshift: 0,
        ashift: 0,
        refcount: 1,
        next: ptr::null_mut(),
    };
    adopt(format, PIXEL_FORMAT)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_FreeFormat(format: *mut PixelFormat) {
    let Some(record) = pixel_format(format) else {
        set_error("Parameter 'format' is invalid");
        return;
    };
    record.refcount -= 1;
    if record.refcount > 0 {
        return;
    }
    let palette = record.palette;
    // SAFETY: the registry only reclaims live formats.
    unsafe {
        if !palette.is_null() {
            SDL_FreePalette(palette);
        }
        reclaim::<PixelFormat, _>(format, PIXEL_FORMAT);
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_AllocPalette(ncolors: c_int) -> *mut Palette {
    if ncolors < 1 {
        set_error("Parameter 'ncolors' is invalid");
        return ptr::null_mut();
    }
    let colors: Box<[Color]> = vec![Color::rgb(0xFF, 0xFF, 0xFF); ncolors as usize].into();
    let palette = Palette {
        ncolors,
        padding: [0; POINTER_GAP],
        colors: Box::into_raw(colors).cast(),
        version: 1,
        refcount: 1,
    };
    adopt(palette, PALETTE)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_FreePalette(palette: *mut Palette) {
    let Some(record) = self::palette(palette) else {
        set_error("Parameter 'palette' is invalid");
        return;
    };
    record.refcount -= 1;
    if record.refcount > 0 {
        return;
    }
    // SAFETY: the registry only reclaims live palettes; `colors` came from a
    // boxed slice of `ncolors` entries.
    unsafe {
        if let Some(record) = reclaim::<Palette, _>(palette, PALETTE) {
            let colors =
                ptr::slice_from_raw_parts_mut(record.colors, record.ncolors as usize);
            drop(Box::from_raw(colors));
        }
    }
}

/// Returns -1 when the range had to be truncated to fit the palette.
#[no_mangle]
pub unsafe extern "C" fn SDL_SetPaletteColors(
    palette: *mut Palette,
    colors: *const Color,
    firstcolor: c_int,
    ncolors: c_int,
) -> c_int {
    let Some(record) = self::palette(palette) else {
        return set_error("Parameter 'palette' is invalid");
    };
    if colors.is_null() {
        return set_error("Parameter 'colors' is invalid");
    }
    if firstcolor < 0 || ncolors < 0 {
        return set_error("Parameter 'firstcolor' is invalid");
    }
    let mut status = 0;
    let mut count = ncolors;
    if count > record.ncolors - firstcolor {
        count = (record.ncolors - firstcolor).max(0);
        status = -1;
    }
    if count > 0 {
        // SAFETY: `count` entries fit both buffers.
        unsafe {
            ptr::copy(
                colors,
                record.colors.add(firstcolor as usize),
                count as usize,
            )
        };
        record.version = record.version.wrapping_add(1).max(1);
    }
    status
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetPixelFormatPalette(
    format: *mut PixelFormat,
    palette: *mut Palette,
) -> c_int {
    let Some(record) = pixel_format(format) else {
        return set_error("Parameter 'format' is invalid");
    };
    if let Some(new) = self::palette(palette) {
        let expected = 1_u64 << record.bits_per_pixel.min(32);
        if u64::try_from(new.ncolors).ok() != Some(expected) {
            return set_error(
                "SDL_SetPixelFormatPalette() passed a palette that doesn't match the format",
            );
        }
    }
    if record.palette == palette {
        return 0;
    }
    if let Some(new) = self::palette(palette) {
        new.refcount += 1;
    }
    let old = std::mem::replace(&mut record.palette, palette);
    if !old.is_null() {
        // SAFETY: the old palette was retained by this format.
        unsafe { SDL_FreePalette(old) };
    }
    0
}

/// Packs nothing; every color maps to pixel 0.
#[no_mangle]
pub unsafe extern "C" fn SDL_MapRGB(format: *const PixelFormat, _r: u8, _g: u8, _b: u8) -> u32 {
    if format.is_null() {
        set_error("Parameter 'format' is invalid");
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_MapRGBA(
    format: *const PixelFormat,
    r: u8,
    g: u8,
    b: u8,
    _a: u8,
) -> u32 {
    // SAFETY: forwarded.
    unsafe { SDL_MapRGB(format, r, g, b) }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetRGB(
    pixel: u32,
    format: *const PixelFormat,
    r: *mut u8,
    g: *mut u8,
    b: *mut u8,
) {
    // SAFETY: forwarded; a null alpha pointer is skipped.
    unsafe { SDL_GetRGBA(pixel, format, r, g, b, ptr::null_mut()) }
}

/// Unpacks every pixel to opaque black.
#[no_mangle]
pub unsafe extern "C" fn SDL_GetRGBA(
    _pixel: u32,
    format: *const PixelFormat,
    r: *mut u8,
    g: *mut u8,
    b: *mut u8,
    a: *mut u8,
) {
    if format.is_null() {
        return;
    }
    for (target, value) in [(r, 0), (g, 0), (b, 0), (a, 0xFF)] {
        if !target.is_null() {
            // SAFETY: caller-provided out parameters.
            unsafe { target.write(value) };
        }
    }
}

/// Builds a registered surface. `pixels` is adopted as caller-owned memory
/// (`SDL_PREALLOC`); otherwise a zeroed buffer is allocated.
pub(crate) fn new_surface(
    format: u32,
    w: c_int,
    h: c_int,
    pixels: Option<(*mut c_void, c_int)>,
) -> *mut Surface {
    if w < 0 || h < 0 {
        set_error(if w < 0 { "Parameter 'width' is invalid" } else { "Parameter 'height' is invalid" });
        return ptr::null_mut();
    }
    // SAFETY: plain allocation.
    let pixel_format = unsafe { SDL_AllocFormat(format) };
    let Some((bits, bytes)) = self::pixel_format(pixel_format)
        .map(|record| (record.bits_per_pixel, record.bytes_per_pixel))
    else {
        return ptr::null_mut();
    };
    if is_indexed(format) {
        // SAFETY: fresh palette, retained by the format and released here.
        unsafe {
            let palette = SDL_AllocPalette(1 << bits);
            SDL_SetPixelFormatPalette(pixel_format, palette);
            SDL_FreePalette(palette);
        }
    }
    let (flags, pixels, pitch) = match pixels {
        Some((pixels, pitch)) => (SDL_PREALLOC, pixels, pitch),
        None => {
            let pitch = (i64::from(w) * i64::from(bytes) + 3) & !3;
            let size = usize::try_from(pitch * i64::from(h)).ok();
            let (Ok(pitch), Some(size)) = (c_int::try_from(pitch), size) else {
                // SAFETY: format allocated above.
                unsafe { SDL_FreeFormat(pixel_format) };
                set_error("Out of memory");
                return ptr::null_mut();
            };
            let pixels = if size == 0 {
                ptr::null_mut()
            } else {
                // SAFETY: plain allocation.
                let pixels = unsafe { SDL_malloc(size) };
                if pixels.is_null() {
                    // SAFETY: format allocated above.
                    unsafe { SDL_FreeFormat(pixel_format) };
                    set_error("Out of memory");
                    return ptr::null_mut();
                }
                pixels
            };
            (0, pixels, pitch)
        }
    };
    let map = Box::into_raw(Box::new(BlitInfo {
        color_key: None,
        alpha_mod: 0xFF,
    }))
    .cast::<BlitMap>();
    let surface = Surface {
        flags,
        padding0: [0; POINTER_GAP],
        format: pixel_format,
        w,
        h,
        pitch,
        padding1: [0; POINTER_GAP],
        pixels,
        userdata: ptr::null_mut(),
        locked: 0,
        padding2: [0; POINTER_GAP],
        lock_data: ptr::null_mut(),
        clip_rect: Rect::new(0, 0, w, h),
        map,
        refcount: 1,
        padding3: [0; POINTER_GAP],
    };
    adopt(surface, SURFACE)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_CreateRGBSurface(
    _flags: u32,
    width: c_int,
    height: c_int,
    depth: c_int,
    rmask: u32,
    gmask: u32,
    bmask: u32,
    amask: u32,
) -> *mut Surface {
    let Some(format) = masks_to_format(depth, [rmask, gmask, bmask, amask]) else {
        set_error("Unknown pixel format");
        return ptr::null_mut();
    };
    new_surface(format, width, height, None)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_CreateRGBSurfaceFrom(
    pixels: *mut c_void,
    width: c_int,
    height: c_int,
    depth: c_int,
    pitch: c_int,
    rmask: u32,
    gmask: u32,
    bmask: u32,
    amask: u32,
) -> *mut Surface {
    let Some(format) = masks_to_format(depth, [rmask, gmask, bmask, amask]) else {
        set_error("Unknown pixel format");
        return ptr::null_mut();
    };
    new_surface(format, width, height, Some((pixels, pitch)))
}

#[no_mangle]
pub unsafe extern "C" fn SDL_FreeSurface(surface: *mut Surface) {
    let Some(record) = self::surface(surface) else {
        return;
    };
    if record.flags & SDL_DONTFREE != 0 {
        return;
    }
    record.refcount -= 1;
    if record.refcount > 0 {
        return;
    }
    // SAFETY: the registry only reclaims live surfaces; each owned resource is
    // released exactly once here.
    unsafe {
        let Some(record) = reclaim::<Surface, _>(surface, SURFACE) else {
            return;
        };
        SDL_FreeFormat(record.format);
        if record.flags & SDL_PREALLOC == 0 {
            SDL_free(record.pixels);
        }
        if !record.map.is_null() {
            drop(Box::from_raw(record.map.cast::<BlitInfo>()));
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_LockSurface(surface: *mut Surface) -> c_int {
    let Some(record) = self::surface(surface) else {
        return set_error("Parameter 'surface' is invalid");
    };
    record.locked += 1;
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_UnlockSurface(surface: *mut Surface) {
    if let Some(record) = self::surface(surface) {
        if record.locked > 0 {
            record.locked -= 1;
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetSurfacePalette(surface: *mut Surface, palette: *mut Palette) -> c_int {
    let Some(record) = self::surface(surface) else {
        return set_error("Parameter 'surface' is invalid");
    };
    // SAFETY: forwarded to the surface's own format.
    unsafe { SDL_SetPixelFormatPalette(record.format, palette) }
}

/// Writes no pixels.
#[no_mangle]
pub unsafe extern "C" fn SDL_FillRect(dst: *mut Surface, _rect: *const Rect, _color: u32) -> c_int {
    if self::surface(dst).is_none() {
        return set_error("Passed NULL destination surface");
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetColorKey(surface: *mut Surface, flag: c_int, key: u32) -> c_int {
    let Some(info) = self::surface(surface).and_then(|record| blit_info(record)) else {
        return set_error("Parameter 'surface' is invalid");
    };
    info.color_key = (flag != 0).then_some(key);
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetColorKey(surface: *mut Surface, key: *mut u32) -> c_int {
    let Some(info) = self::surface(surface).and_then(|record| blit_info(record)) else {
        return set_error("Parameter 'surface' is invalid");
    };
    let Some(color_key) = info.color_key else {
        return set_error("Surface doesn't have a colorkey");
    };
    if !key.is_null() {
        // SAFETY: caller-provided out parameter.
        unsafe { key.write(color_key) };
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetSurfaceAlphaMod(surface: *mut Surface, alpha: u8) -> c_int {
    let Some(info) = self::surface(surface).and_then(|record| blit_info(record)) else {
        return set_error("Parameter 'surface' is invalid");
    };
    info.alpha_mod = alpha;
    0
}

/// Copies no pixels and leaves `dstrect` as given.
#[no_mangle]
pub unsafe extern "C" fn SDL_UpperBlit(
    src: *mut Surface,
    _srcrect: *const Rect,
    dst: *mut Surface,
    _dstrect: *mut Rect,
) -> c_int {
    let locked = |surface| self::surface(surface).map(|record| record.locked > 0);
    match (locked(src), locked(dst)) {
        (Some(false), Some(false)) => 0,
        (Some(_), Some(_)) => set_error("Surfaces must not be locked during blit"),
        _ => set_error("SDL_UpperBlit: passed a NULL surface"),
    }
}
