use std::ffi::{c_int, c_void, CStr};
use std::ptr;

use sdl_abi::{Color, Point, Rect, RendererInfo, Surface};

use super::error::set_error;
use super::surface::surface;
use super::video::window;
use super::{adopt, lookup, reclaim};
use crate::{
    SDL_Renderer, SDL_Texture, SDL_Window, SDL_BLENDMODE_ADD, SDL_BLENDMODE_BLEND,
    SDL_BLENDMODE_MOD, SDL_BLENDMODE_NONE, SDL_PIXELFORMAT_ARGB8888, SDL_PIXELFORMAT_RGB888,
    SDL_RENDERER_PRESENTVSYNC, SDL_RENDERER_SOFTWARE, SDL_RENDERER_TARGETTEXTURE, SDL_TEXTUREACCESS_STATIC,
    SDL_TEXTUREACCESS_TARGET,
};

const DRIVER_NAME: &CStr = c"stub";
const MAX_TEXTURE_SIZE: c_int = 8192;
const TEXTURE_FORMATS: [u32; 2] = [SDL_PIXELFORMAT_ARGB8888, SDL_PIXELFORMAT_RGB888];

const RENDERER: &str = "renderer";
const TEXTURE: &str = "texture";

struct StubRenderer {
    window: *mut SDL_Window,
    flags: u32,
    draw_color: Color,
    viewport: Option<Rect>,
    logical: (c_int, c_int),
}

struct StubTexture {
    renderer: *mut SDL_Renderer,
    format: u32,
    access: c_int,
    w: c_int,
    h: c_int,
}

fn renderer<'a>(renderer: *mut SDL_Renderer) -> Option<&'a mut StubRenderer> {
    // SAFETY: the registry only resolves live renderers.
    let found = unsafe { lookup::<StubRenderer, _>(renderer, RENDERER) };
    if found.is_none() {
        set_error("Invalid renderer");
    }
    found
}

fn texture<'a>(texture: *mut SDL_Texture) -> Option<&'a mut StubTexture> {
    // SAFETY: the registry only resolves live textures.
    let found = unsafe { lookup::<StubTexture, _>(texture, TEXTURE) };
    if found.is_none() {
        set_error("Invalid texture");
    }
    found
}

fn output_size(renderer: &StubRenderer) -> (c_int, c_int) {
    if renderer.logical != (0, 0) {
        return renderer.logical;
    }
    window(renderer.window).map_or((0, 0), |window| (window.w, window.h))
}

fn status(ok: bool) -> c_int {
    if ok {
        0
    } else {
        -1
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_CreateRenderer(
    window: *mut SDL_Window,
    index: c_int,
    flags: u32,
) -> *mut SDL_Renderer {
    if self::window(window).is_none() {
        return ptr::null_mut();
    }
    if index < -1 || index > 0 {
        set_error("index must be -1 or in the range of 0 - 0");
        return ptr::null_mut();
    }
    let renderer = StubRenderer {
        window,
        flags: SDL_RENDERER_SOFTWARE | SDL_RENDERER_TARGETTEXTURE | (flags & SDL_RENDERER_PRESENTVSYNC),
        draw_color: Color::rgba(0, 0, 0, 0xFF),
        viewport: None,
        logical: (0, 0),
    };
    adopt(renderer, RENDERER).cast()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_DestroyRenderer(renderer: *mut SDL_Renderer) {
    // SAFETY: the registry only reclaims live renderers.
    if unsafe { reclaim::<StubRenderer, _>(renderer, RENDERER) }.is_none() {
        set_error("Invalid renderer");
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetRendererInfo(
    renderer: *mut SDL_Renderer,
    info: *mut RendererInfo,
) -> c_int {
    let Some(renderer) = self::renderer(renderer) else {
        return -1;
    };
    if info.is_null() {
        return set_error("Parameter 'info' is invalid");
    }
    let mut texture_formats = [0; 16];
    texture_formats[..TEXTURE_FORMATS.len()].copy_from_slice(&TEXTURE_FORMATS);
    // SAFETY: caller passes a writable record.
    unsafe {
        info.write(RendererInfo {
            name: DRIVER_NAME.as_ptr(),
            flags: renderer.flags,
            num_texture_formats: TEXTURE_FORMATS.len() as u32,
            texture_formats,
            max_texture_width: MAX_TEXTURE_SIZE,
            max_texture_height: MAX_TEXTURE_SIZE,
        })
    };
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetRenderDrawColor(
    renderer: *mut SDL_Renderer,
    r: u8,
    g: u8,
    b: u8,
    a: u8,
) -> c_int {
    let Some(renderer) = self::renderer(renderer) else {
        return -1;
    };
    renderer.draw_color = Color::rgba(r, g, b, a);
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_GetRenderDrawColor(
    renderer: *mut SDL_Renderer,
    r: *mut u8,
    g: *mut u8,
    b: *mut u8,
    a: *mut u8,
) -> c_int {
    let Some(renderer) = self::renderer(renderer) else {
        return -1;
    };
    let color = renderer.draw_color;
    for (target, value) in [(r, color.r), (g, color.g), (b, color.b), (a, color.a)] {
        if !target.is_null() {
            // SAFETY: caller-provided out parameter.
            unsafe { target.write(value) };
        }
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderClear(renderer: *mut SDL_Renderer) -> c_int {
    status(self::renderer(renderer).is_some())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderPresent(renderer: *mut SDL_Renderer) {
    self::renderer(renderer);
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderDrawPoint(renderer: *mut SDL_Renderer, _x: c_int, _y: c_int) -> c_int {
    status(self::renderer(renderer).is_some())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderDrawLine(
    renderer: *mut SDL_Renderer,
    _x1: c_int,
    _y1: c_int,
    _x2: c_int,
    _y2: c_int,
) -> c_int {
    status(self::renderer(renderer).is_some())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderDrawRect(renderer: *mut SDL_Renderer, _rect: *const Rect) -> c_int {
    status(self::renderer(renderer).is_some())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderFillRect(renderer: *mut SDL_Renderer, _rect: *const Rect) -> c_int {
    status(self::renderer(renderer).is_some())
}

/// A null `rect` resets the viewport to the whole output.
#[no_mangle]
pub unsafe extern "C" fn SDL_RenderSetViewport(renderer: *mut SDL_Renderer, rect: *const Rect) -> c_int {
    let Some(renderer) = self::renderer(renderer) else {
        return -1;
    };
    // SAFETY: caller passes a readable record or null.
    renderer.viewport = unsafe { rect.as_ref() }.copied();
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderGetViewport(renderer: *mut SDL_Renderer, rect: *mut Rect) {
    let Some(renderer) = self::renderer(renderer) else {
        return;
    };
    if rect.is_null() {
        return;
    }
    let viewport = renderer.viewport.unwrap_or_else(|| {
        let (w, h) = output_size(renderer);
        Rect::new(0, 0, w, h)
    });
    // SAFETY: caller passes a writable record.
    unsafe { rect.write(viewport) };
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderSetScale(renderer: *mut SDL_Renderer, scale_x: f32, scale_y: f32) -> c_int {
    if self::renderer(renderer).is_none() {
        return -1;
    }
    if !(scale_x > 0.0 && scale_y > 0.0) {
        return set_error("Invalid render scale");
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderSetLogicalSize(renderer: *mut SDL_Renderer, w: c_int, h: c_int) -> c_int {
    let Some(renderer) = self::renderer(renderer) else {
        return -1;
    };
    if w < 0 || h < 0 {
        return set_error("Invalid logical size");
    }
    renderer.logical = (w, h);
    renderer.viewport = None;
    0
}

fn copy_check(renderer: *mut SDL_Renderer, texture: *mut SDL_Texture) -> c_int {
    if self::renderer(renderer).is_none() {
        return -1;
    }
    let Some(texture) = self::texture(texture) else {
        return -1;
    };
    if texture.renderer != renderer {
        return set_error("Texture was not created with this renderer");
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderCopy(
    renderer: *mut SDL_Renderer,
    texture: *mut SDL_Texture,
    _srcrect: *const Rect,
    _dstrect: *const Rect,
) -> c_int {
    copy_check(renderer, texture)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_RenderCopyEx(
    renderer: *mut SDL_Renderer,
    texture: *mut SDL_Texture,
    _srcrect: *const Rect,
    _dstrect: *const Rect,
    _angle: f64,
    _center: *const Point,
    flip: c_int,
) -> c_int {
    if !(0..=3).contains(&flip) {
        return set_error("Invalid flip mode");
    }
    copy_check(renderer, texture)
}

#[no_mangle]
pub unsafe extern "C" fn SDL_CreateTexture(
    renderer: *mut SDL_Renderer,
    format: u32,
    access: c_int,
    w: c_int,
    h: c_int,
) -> *mut SDL_Texture {
    if self::renderer(renderer).is_none() {
        return ptr::null_mut();
    }
    if format == 0 {
        set_error("Invalid texture format");
        return ptr::null_mut();
    }
    if !(SDL_TEXTUREACCESS_STATIC..=SDL_TEXTUREACCESS_TARGET).contains(&access) {
        set_error("Invalid texture access");
        return ptr::null_mut();
    }
    if w <= 0 || h <= 0 {
        set_error("Texture dimensions can't be 0");
        return ptr::null_mut();
    }
    if w > MAX_TEXTURE_SIZE || h > MAX_TEXTURE_SIZE {
        set_error(format!(
            "Texture dimensions are limited to {MAX_TEXTURE_SIZE}x{MAX_TEXTURE_SIZE}"
        ));
        return ptr::null_mut();
    }
    let texture = StubTexture {
        renderer,
        format,
        access,
        w,
        h,
    };
    adopt(texture, TEXTURE).cast()
}

#[no_mangle]
pub unsafe extern "C" fn SDL_CreateTextureFromSurface(
    renderer: *mut SDL_Renderer,
    surface: *mut Surface,
) -> *mut SDL_Texture {
    if self::renderer(renderer).is_none() {
        return ptr::null_mut();
    }
    let Some((w, h)) = self::surface(surface).map(|surface| (surface.w, surface.h)) else {
        set_error("SDL_CreateTextureFromSurface() passed NULL surface");
        return ptr::null_mut();
    };
    // SAFETY: renderer validated above.
    unsafe { SDL_CreateTexture(renderer, SDL_PIXELFORMAT_ARGB8888, SDL_TEXTUREACCESS_STATIC, w, h) }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_DestroyTexture(texture: *mut SDL_Texture) {
    // SAFETY: the registry only reclaims live textures.
    if unsafe { reclaim::<StubTexture, _>(texture, TEXTURE) }.is_none() {
        set_error("Invalid texture");
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_QueryTexture(
    texture: *mut SDL_Texture,
    format: *mut u32,
    access: *mut c_int,
    w: *mut c_int,
    h: *mut c_int,
) -> c_int {
    let Some(texture) = self::texture(texture) else {
        return -1;
    };
    // SAFETY: caller-provided out parameters, each optional.
    unsafe {
        if !format.is_null() {
            format.write(texture.format);
        }
        for (target, value) in [(access, texture.access), (w, texture.w), (h, texture.h)] {
            if !target.is_null() {
                target.write(value);
            }
        }
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetTextureColorMod(texture: *mut SDL_Texture, _r: u8, _g: u8, _b: u8) -> c_int {
    status(self::texture(texture).is_some())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetTextureAlphaMod(texture: *mut SDL_Texture, _alpha: u8) -> c_int {
    status(self::texture(texture).is_some())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_SetTextureBlendMode(texture: *mut SDL_Texture, blend_mode: c_int) -> c_int {
    if self::texture(texture).is_none() {
        return -1;
    }
    match blend_mode {
        SDL_BLENDMODE_NONE | SDL_BLENDMODE_BLEND | SDL_BLENDMODE_ADD | SDL_BLENDMODE_MOD => 0,
        _ => set_error("Invalid blend mode"),
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_UpdateTexture(
    texture: *mut SDL_Texture,
    rect: *const Rect,
    pixels: *const c_void,
    pitch: c_int,
) -> c_int {
    let Some(texture) = self::texture(texture) else {
        return -1;
    };
    if pixels.is_null() {
        return set_error("Parameter 'pixels' is invalid");
    }
    if pitch <= 0 {
        return set_error("Parameter 'pitch' is invalid");
    }
    let full = Rect::new(0, 0, texture.w, texture.h);
    // SAFETY: caller passes a readable record or null.
    let area = unsafe { rect.as_ref() }.copied().unwrap_or(full);
    if area.is_empty() {
        return 0;
    }
    if full.intersect(&area) != Some(area) {
        return set_error("Parameter 'rect' is invalid");
    }
    0
}
