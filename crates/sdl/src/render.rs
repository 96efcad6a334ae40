use std::ffi::{c_int, CStr};
use std::marker::PhantomData;
use std::ptr;

use sdl_abi::{Color, Point, Rect, RendererInfo as RawRendererInfo};
use sdl_sys::{SDL_Renderer, SDL_Texture};

use crate::error::{check, Error, Result};
use crate::handle::{resource, Handle};
use crate::native_flags;
use crate::pixels::bytes_per_pixel;
use crate::surface::Surface;
use crate::video::Window;

native_flags! {
    pub struct RendererFlags(u32) {
        const SOFTWARE = sdl_sys::SDL_RENDERER_SOFTWARE;
        const ACCELERATED = sdl_sys::SDL_RENDERER_ACCELERATED;
        const PRESENTVSYNC = sdl_sys::SDL_RENDERER_PRESENTVSYNC;
        const TARGETTEXTURE = sdl_sys::SDL_RENDERER_TARGETTEXTURE;
    }
}

native_flags! {
    pub struct RendererFlip(c_int) {
        const NONE = sdl_sys::SDL_FLIP_NONE;
        const HORIZONTAL = sdl_sys::SDL_FLIP_HORIZONTAL;
        const VERTICAL = sdl_sys::SDL_FLIP_VERTICAL;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureAccess {
    /// Rarely changed, not lockable.
    Static,
    /// Changed frequently, lockable.
    Streaming,
    /// Usable as a render target.
    Target,
}

impl TextureAccess {
    fn raw(self) -> c_int {
        match self {
            TextureAccess::Static => sdl_sys::SDL_TEXTUREACCESS_STATIC,
            TextureAccess::Streaming => sdl_sys::SDL_TEXTUREACCESS_STREAMING,
            TextureAccess::Target => sdl_sys::SDL_TEXTUREACCESS_TARGET,
        }
    }

    fn from_raw(raw: c_int) -> Option<Self> {
        match raw {
            sdl_sys::SDL_TEXTUREACCESS_STATIC => Some(TextureAccess::Static),
            sdl_sys::SDL_TEXTUREACCESS_STREAMING => Some(TextureAccess::Streaming),
            sdl_sys::SDL_TEXTUREACCESS_TARGET => Some(TextureAccess::Target),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    None,
    Blend,
    Add,
    Mod,
}

impl BlendMode {
    fn raw(self) -> c_int {
        match self {
            BlendMode::None => sdl_sys::SDL_BLENDMODE_NONE,
            BlendMode::Blend => sdl_sys::SDL_BLENDMODE_BLEND,
            BlendMode::Add => sdl_sys::SDL_BLENDMODE_ADD,
            BlendMode::Mod => sdl_sys::SDL_BLENDMODE_MOD,
        }
    }
}

/// Host copy of `SDL_RendererInfo`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RendererInfo {
    pub name: String,
    pub flags: RendererFlags,
    pub texture_formats: Vec<u32>,
    pub max_texture_width: i32,
    pub max_texture_height: i32,
}

impl From<&RawRendererInfo> for RendererInfo {
    fn from(raw: &RawRendererInfo) -> Self {
        let name = if raw.name.is_null() {
            String::new()
        } else {
            // SAFETY: the driver name is a static NUL-terminated string.
            unsafe { CStr::from_ptr(raw.name) }.to_string_lossy().into_owned()
        };
        let count = (raw.num_texture_formats as usize).min(raw.texture_formats.len());
        Self {
            name,
            flags: RendererFlags::from_bits(raw.flags),
            texture_formats: raw.texture_formats[..count].to_vec(),
            max_texture_width: raw.max_texture_width,
            max_texture_height: raw.max_texture_height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureQuery {
    pub format: u32,
    pub access: Option<TextureAccess>,
    pub width: i32,
    pub height: i32,
}

resource!(RendererResource, SDL_Renderer, "renderer", sdl_sys::SDL_DestroyRenderer);
resource!(TextureResource, SDL_Texture, "texture", sdl_sys::SDL_DestroyTexture);

fn rect_ptr(rect: Option<&Rect>) -> *const Rect {
    rect.map_or(ptr::null(), |rect| rect as *const Rect)
}

impl Window {
    /// Creates a 2D renderer for this window. `index` -1 picks the first
    /// driver that supports `flags`.
    pub fn create_renderer(&self, index: i32, flags: RendererFlags) -> Result<Renderer<'_>> {
        let window = self.raw();
        if window.is_null() {
            return Err(Error::NullHandle("window"));
        }
        // SAFETY: live window.
        let raw = unsafe { sdl_sys::SDL_CreateRenderer(window, index, flags.bits()) };
        Ok(Renderer {
            handle: Handle::adopt(raw)?,
            _window: PhantomData,
        })
    }
}

/// A 2D rendering context bound to one window.
#[derive(Debug)]
pub struct Renderer<'w> {
    handle: Handle<RendererResource>,
    _window: PhantomData<&'w Window>,
}

impl Renderer<'_> {
    pub fn raw(&self) -> *mut SDL_Renderer {
        self.handle.as_ptr()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub fn destroy(&mut self) {
        self.handle.release();
    }

    pub fn info(&self) -> Result<RendererInfo> {
        let raw = self.handle.get()?;
        let mut info = RawRendererInfo::default();
        // SAFETY: live renderer, valid out parameter.
        check(unsafe { sdl_sys::SDL_GetRendererInfo(raw, &mut info) })?;
        Ok(RendererInfo::from(&info))
    }

    pub fn set_draw_color(&self, color: Color) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer.
        check(unsafe { sdl_sys::SDL_SetRenderDrawColor(raw, color.r, color.g, color.b, color.a) })
    }

    pub fn draw_color(&self) -> Result<Color> {
        let raw = self.handle.get()?;
        let mut color = Color::default();
        // SAFETY: live renderer, valid out parameters.
        check(unsafe {
            sdl_sys::SDL_GetRenderDrawColor(raw, &mut color.r, &mut color.g, &mut color.b, &mut color.a)
        })?;
        Ok(color)
    }

    pub fn clear(&self) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer.
        check(unsafe { sdl_sys::SDL_RenderClear(raw) })
    }

    pub fn present(&self) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer.
        unsafe { sdl_sys::SDL_RenderPresent(raw) };
        Ok(())
    }

    pub fn draw_point(&self, x: i32, y: i32) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer.
        check(unsafe { sdl_sys::SDL_RenderDrawPoint(raw, x, y) })
    }

    pub fn draw_line(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer.
        check(unsafe { sdl_sys::SDL_RenderDrawLine(raw, x1, y1, x2, y2) })
    }

    /// Outlines `rect`, or the whole target for `None`.
    pub fn draw_rect(&self, rect: Option<&Rect>) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer, rect null or valid.
        check(unsafe { sdl_sys::SDL_RenderDrawRect(raw, rect_ptr(rect)) })
    }

    pub fn fill_rect(&self, rect: Option<&Rect>) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer, rect null or valid.
        check(unsafe { sdl_sys::SDL_RenderFillRect(raw, rect_ptr(rect)) })
    }

    /// `None` resets the viewport to the whole target.
    pub fn set_viewport(&self, rect: Option<&Rect>) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer, rect null or valid.
        check(unsafe { sdl_sys::SDL_RenderSetViewport(raw, rect_ptr(rect)) })
    }

    pub fn viewport(&self) -> Result<Rect> {
        let raw = self.handle.get()?;
        let mut rect = Rect::default();
        // SAFETY: live renderer, valid out parameter.
        unsafe { sdl_sys::SDL_RenderGetViewport(raw, &mut rect) };
        Ok(rect)
    }

    pub fn set_scale(&self, scale_x: f32, scale_y: f32) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer.
        check(unsafe { sdl_sys::SDL_RenderSetScale(raw, scale_x, scale_y) })
    }

    pub fn set_logical_size(&self, w: i32, h: i32) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer.
        check(unsafe { sdl_sys::SDL_RenderSetLogicalSize(raw, w, h) })
    }

    pub fn copy(&self, texture: &Texture<'_>, src: Option<&Rect>, dst: Option<&Rect>) -> Result<()> {
        let raw = self.handle.get()?;
        let texture = texture.handle.get()?;
        // SAFETY: live renderer and texture; rects null or valid.
        check(unsafe { sdl_sys::SDL_RenderCopy(raw, texture, rect_ptr(src), rect_ptr(dst)) })
    }

    /// Copies with rotation by `angle` degrees around `center` (the middle of
    /// `dst` for `None`) and optional flipping.
    pub fn copy_ex(
        &self,
        texture: &Texture<'_>,
        src: Option<&Rect>,
        dst: Option<&Rect>,
        angle: f64,
        center: Option<&Point>,
        flip: RendererFlip,
    ) -> Result<()> {
        let raw = self.handle.get()?;
        let texture = texture.handle.get()?;
        let center = center.map_or(ptr::null(), |center| center as *const Point);
        // SAFETY: live renderer and texture; pointers null or valid.
        check(unsafe {
            sdl_sys::SDL_RenderCopyEx(
                raw,
                texture,
                rect_ptr(src),
                rect_ptr(dst),
                angle,
                center,
                flip.bits(),
            )
        })
    }

    pub fn create_texture(
        &self,
        format: u32,
        access: TextureAccess,
        width: i32,
        height: i32,
    ) -> Result<Texture<'_>> {
        let raw = self.handle.get()?;
        // SAFETY: live renderer.
        let texture = unsafe { sdl_sys::SDL_CreateTexture(raw, format, access.raw(), width, height) };
        Ok(Texture {
            handle: Handle::adopt(texture)?,
            _renderer: PhantomData,
        })
    }

    /// Uploads a copy of `surface`; the surface can be freed afterwards.
    pub fn create_texture_from_surface(&self, surface: &Surface<'_>) -> Result<Texture<'_>> {
        let raw = self.handle.get()?;
        let surface = surface.raw_checked()?;
        // SAFETY: live renderer and surface.
        let texture = unsafe { sdl_sys::SDL_CreateTextureFromSurface(raw, surface) };
        Ok(Texture {
            handle: Handle::adopt(texture)?,
            _renderer: PhantomData,
        })
    }
}

/// A texture; cannot outlive the renderer that created it.
#[derive(Debug)]
pub struct Texture<'r> {
    handle: Handle<TextureResource>,
    _renderer: PhantomData<&'r ()>,
}

impl Texture<'_> {
    pub fn raw(&self) -> *mut SDL_Texture {
        self.handle.as_ptr()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub fn destroy(&mut self) {
        self.handle.release();
    }

    pub fn query(&self) -> Result<TextureQuery> {
        let raw = self.handle.get()?;
        let (mut format, mut access, mut width, mut height) = (0, 0, 0, 0);
        // SAFETY: live texture, valid out parameters.
        check(unsafe {
            sdl_sys::SDL_QueryTexture(raw, &mut format, &mut access, &mut width, &mut height)
        })?;
        Ok(TextureQuery {
            format,
            access: TextureAccess::from_raw(access),
            width,
            height,
        })
    }

    pub fn set_color_mod(&self, r: u8, g: u8, b: u8) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live texture.
        check(unsafe { sdl_sys::SDL_SetTextureColorMod(raw, r, g, b) })
    }

    pub fn set_alpha_mod(&self, alpha: u8) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live texture.
        check(unsafe { sdl_sys::SDL_SetTextureAlphaMod(raw, alpha) })
    }

    pub fn set_blend_mode(&self, mode: BlendMode) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live texture.
        check(unsafe { sdl_sys::SDL_SetTextureBlendMode(raw, mode.raw()) })
    }

    /// Replaces the pixels of `rect` (the whole texture for `None`) with
    /// rows of `pitch` bytes taken from `pixels`.
    ///
    /// `pitch` must cover a full row of the area.
    pub fn update(&self, rect: Option<&Rect>, pixels: &[u8], pitch: i32) -> Result<()> {
        let raw = self.handle.get()?;
        let query = self.query()?;
        let (width, height) = rect.map_or((query.width, query.height), |rect| (rect.w, rect.h));
        if width > 0 && height > 0 {
            let row = i64::from(width) * bytes_per_pixel(query.format) as i64;
            if i64::from(pitch) < row {
                return Err(Error::Sdl {
                    message: format!("pitch {pitch} is shorter than a {row}-byte row"),
                    code: -1,
                });
            }
            let needed = i64::from(pitch) * (i64::from(height) - 1) + row;
            if (pixels.len() as i64) < needed {
                return Err(Error::Sdl {
                    message: format!(
                        "pixel buffer holds {} bytes, {needed} needed",
                        pixels.len()
                    ),
                    code: -1,
                });
            }
        }
        // SAFETY: live texture; `pixels` covers every row the native side reads.
        check(unsafe {
            sdl_sys::SDL_UpdateTexture(raw, rect_ptr(rect), pixels.as_ptr().cast(), pitch)
        })
    }
}

#[cfg(all(test, sdl_stub))]
mod tests {
    use super::*;
    use crate::pixels::PixelFormatEnum;
    use crate::test_support::{serial, with_video};
    use crate::video::WindowFlags;

    fn window() -> Window {
        Window::create("render", 0, 0, 640, 480, WindowFlags::HIDDEN).unwrap()
    }

    #[test]
    fn renderer_reports_driver_info() {
        let _guard = serial();
        with_video(|| {
            let window = window();
            let renderer = window.create_renderer(-1, RendererFlags::PRESENTVSYNC).unwrap();
            let info = renderer.info().unwrap();
            assert_eq!(info.name, "stub");
            assert!(info.flags.contains(RendererFlags::PRESENTVSYNC));
            assert!(info.texture_formats.contains(&PixelFormatEnum::ARGB8888.raw()));
            assert_eq!(info.max_texture_width, 8192);
        });
    }

    #[test]
    fn draw_state_round_trips() {
        let _guard = serial();
        with_video(|| {
            let window = window();
            let renderer = window.create_renderer(-1, RendererFlags::empty()).unwrap();
            renderer.set_draw_color(Color::rgba(10, 20, 30, 40)).unwrap();
            assert_eq!(renderer.draw_color().unwrap(), Color::rgba(10, 20, 30, 40));

            assert_eq!(renderer.viewport().unwrap(), Rect::new(0, 0, 640, 480));
            renderer.set_viewport(Some(&Rect::new(10, 10, 100, 50))).unwrap();
            assert_eq!(renderer.viewport().unwrap(), Rect::new(10, 10, 100, 50));
            renderer.set_logical_size(320, 240).unwrap();
            assert_eq!(renderer.viewport().unwrap(), Rect::new(0, 0, 320, 240));
            renderer.set_viewport(None).unwrap();

            renderer.set_scale(2.0, 2.0).unwrap();
            assert!(renderer.set_scale(0.0, 1.0).is_err());

            renderer.clear().unwrap();
            renderer.draw_point(1, 1).unwrap();
            renderer.draw_line(0, 0, 5, 5).unwrap();
            renderer.draw_rect(Some(&Rect::new(0, 0, 4, 4))).unwrap();
            renderer.fill_rect(None).unwrap();
            renderer.present().unwrap();
        });
    }

    #[test]
    fn textures_validate_arguments() {
        let _guard = serial();
        with_video(|| {
            let window = window();
            let renderer = window.create_renderer(-1, RendererFlags::empty()).unwrap();
            let err = renderer
                .create_texture(PixelFormatEnum::ARGB8888.raw(), TextureAccess::Static, 0, 4)
                .unwrap_err();
            assert_eq!(err.message(), "Texture dimensions can't be 0");

            let texture = renderer
                .create_texture(PixelFormatEnum::ARGB8888.raw(), TextureAccess::Streaming, 4, 2)
                .unwrap();
            let query = texture.query().unwrap();
            assert_eq!(query.access, Some(TextureAccess::Streaming));
            assert_eq!((query.width, query.height), (4, 2));

            texture.set_color_mod(1, 2, 3).unwrap();
            texture.set_alpha_mod(128).unwrap();
            texture.set_blend_mode(BlendMode::Add).unwrap();
            texture.update(None, &[0; 32], 16).unwrap();
            assert!(texture.update(None, &[0; 20], 16).is_err());
            assert!(texture.update(Some(&Rect::new(2, 0, 4, 2)), &[0; 32], 16).is_err());

            for pitch in [0, -16, 12] {
                let err = texture.update(None, &[0; 64], pitch).unwrap_err();
                assert_eq!(err.code(), -1);
                assert_eq!(err.message(), format!("pitch {pitch} is shorter than a 16-byte row"));
            }
            texture.update(Some(&Rect::new(0, 0, 2, 2)), &[0; 24], 16).unwrap();

            renderer.copy(&texture, None, None).unwrap();
            renderer
                .copy_ex(&texture, None, None, 90.0, None, RendererFlip::HORIZONTAL)
                .unwrap();
        });
    }

    #[test]
    fn texture_from_surface_and_double_destroy() {
        let _guard = serial();
        with_video(|| {
            let window = window();
            let mut renderer = window.create_renderer(0, RendererFlags::SOFTWARE).unwrap();
            let surface = Surface::create_rgb(8, 8, 32, [0xFF0000, 0xFF00, 0xFF, 0]).unwrap();
            let mut texture = renderer.create_texture_from_surface(&surface).unwrap();
            assert_eq!(texture.query().unwrap().width, 8);

            texture.destroy();
            texture.destroy();
            assert!(texture.is_null());
            assert!(matches!(texture.query(), Err(Error::NullHandle("texture"))));
            drop(texture);

            renderer.destroy();
            renderer.destroy();
            assert_eq!(sdl_sys::stub::live_count("renderer"), 0);
        });
    }

    #[test]
    fn renderer_index_is_validated() {
        let _guard = serial();
        with_video(|| {
            let window = window();
            let err = window.create_renderer(3, RendererFlags::empty()).unwrap_err();
            assert_eq!(err.message(), "index must be -1 or in the range of 0 - 0");
        });
    }
}
