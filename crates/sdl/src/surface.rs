use std::ffi::c_int;
use std::marker::PhantomData;
use std::ptr;

use sdl_abi::{Rect, Surface as RawSurface};

use crate::error::{check, Error, Result};
use crate::handle::{resource, Handle};
use crate::pixels::{Palette, PixelFormatRef};

resource!(SurfaceResource, RawSurface, "surface", sdl_sys::SDL_FreeSurface);

/// A native `SDL_Surface`.
///
/// `'p` is the lifetime of caller-provided pixel memory; surfaces whose
/// pixels the library allocated are `Surface<'static>`.
#[derive(Debug)]
pub struct Surface<'p> {
    handle: Handle<SurfaceResource>,
    _pixels: PhantomData<&'p mut [u8]>,
}

impl Surface<'static> {
    /// A zeroed surface whose format is picked from `depth` and the RGBA masks.
    pub fn create_rgb(width: i32, height: i32, depth: i32, masks: [u32; 4]) -> Result<Self> {
        let [r, g, b, a] = masks;
        // SAFETY: plain value arguments.
        let raw = unsafe { sdl_sys::SDL_CreateRGBSurface(0, width, height, depth, r, g, b, a) };
        Ok(Self {
            handle: Handle::adopt(raw)?,
            _pixels: PhantomData,
        })
    }
}

impl<'p> Surface<'p> {
    /// Wraps `pixels` without copying; the buffer stays borrowed until the
    /// surface is gone.
    pub fn from_pixels(
        pixels: &'p mut [u8],
        width: i32,
        height: i32,
        depth: i32,
        pitch: i32,
        masks: [u32; 4],
    ) -> Result<Self> {
        if width > 0 && height > 0 {
            let row = width as usize * (depth.max(0) as usize).div_ceil(8);
            let needed = pitch.max(0) as usize * (height as usize - 1) + row;
            if pitch < 0 || (pitch as usize) < row || pixels.len() < needed {
                return Err(Error::Sdl {
                    message: format!("pixel buffer holds {} bytes, {needed} needed", pixels.len()),
                    code: -1,
                });
            }
        }
        let [r, g, b, a] = masks;
        // SAFETY: the buffer covers `height` rows of `pitch` bytes and is
        // mutably borrowed for the surface's lifetime.
        let raw = unsafe {
            sdl_sys::SDL_CreateRGBSurfaceFrom(
                pixels.as_mut_ptr().cast(),
                width,
                height,
                depth,
                pitch,
                r,
                g,
                b,
                a,
            )
        };
        Ok(Self {
            handle: Handle::adopt(raw)?,
            _pixels: PhantomData,
        })
    }

    /// # Safety
    /// `raw` must be null or a live surface nothing else will free, whose
    /// pixels stay valid for `'p`.
    pub unsafe fn from_raw(raw: *mut RawSurface) -> Self {
        Self {
            // SAFETY: forwarded to the caller.
            handle: unsafe { Handle::from_raw(raw) },
            _pixels: PhantomData,
        }
    }

    pub fn raw(&self) -> *mut RawSurface {
        self.handle.as_ptr()
    }

    pub(crate) fn raw_checked(&self) -> Result<*mut RawSurface> {
        self.handle.get()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    fn record(&self) -> Result<&RawSurface> {
        let raw = self.handle.get()?;
        // SAFETY: the handle keeps the surface alive while borrowed.
        Ok(unsafe { &*raw })
    }

    pub fn width(&self) -> Result<i32> {
        Ok(self.record()?.w)
    }

    pub fn height(&self) -> Result<i32> {
        Ok(self.record()?.h)
    }

    /// Bytes per row, padding included.
    pub fn pitch(&self) -> Result<i32> {
        Ok(self.record()?.pitch)
    }

    /// The surface's own format record. Borrowed; freeing the surface frees it.
    pub fn format(&self) -> Result<PixelFormatRef<'_>> {
        let record = self.record()?;
        // SAFETY: a live surface always carries a live format.
        Ok(unsafe { PixelFormatRef::new(&*record.format) })
    }

    fn pixel_len(record: &RawSurface) -> usize {
        record.pitch.max(0) as usize * record.h.max(0) as usize
    }

    /// The pixel rows, or `None` when the surface is freed or has no pixels.
    pub fn pixels(&self) -> Option<&[u8]> {
        let record = self.record().ok()?;
        if record.pixels.is_null() {
            return None;
        }
        // SAFETY: `pixels` holds `pitch * h` bytes while the surface lives.
        Some(unsafe { std::slice::from_raw_parts(record.pixels.cast(), Self::pixel_len(record)) })
    }

    pub fn pixels_mut(&mut self) -> Option<&mut [u8]> {
        let record = self.record().ok()?;
        if record.pixels.is_null() {
            return None;
        }
        let (pixels, len) = (record.pixels, Self::pixel_len(record));
        // SAFETY: as above; `&mut self` makes the view exclusive.
        Some(unsafe { std::slice::from_raw_parts_mut(pixels.cast(), len) })
    }

    /// `SDL_MUSTLOCK`: RLE surfaces have to be locked before touching pixels.
    pub fn must_lock(&self) -> Result<bool> {
        Ok(self.record()?.flags & sdl_sys::SDL_RLEACCEL != 0)
    }

    pub fn lock(&mut self) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live surface.
        check(unsafe { sdl_sys::SDL_LockSurface(raw) })
    }

    pub fn unlock(&mut self) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live surface.
        unsafe { sdl_sys::SDL_UnlockSurface(raw) };
        Ok(())
    }

    /// Shares `palette` with the surface's format; later palette edits show
    /// through.
    pub fn set_palette(&mut self, palette: &Palette) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live surface and palette.
        check(unsafe { sdl_sys::SDL_SetSurfacePalette(raw, palette.raw()) })
    }

    /// Fills `rect`, or the whole clip area for `None`, with a packed pixel.
    ///
    /// `rect` is clipped here first; a rect outside the clip area writes
    /// nothing.
    pub fn fill_rect(&mut self, rect: Option<&Rect>, color: u32) -> Result<()> {
        let raw = self.handle.get()?;
        let clipped = match rect {
            None => None,
            Some(rect) => match rect.intersect(&self.record()?.clip_rect) {
                Some(clipped) => Some(clipped),
                None => return Ok(()),
            },
        };
        let rect = clipped.as_ref().map_or(ptr::null(), |rect| rect as *const Rect);
        // SAFETY: live surface; `rect` is readable or null.
        check(unsafe { sdl_sys::SDL_FillRect(raw, rect, color) })
    }

    pub fn set_color_key(&mut self, enable: bool, key: u32) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live surface.
        check(unsafe { sdl_sys::SDL_SetColorKey(raw, c_int::from(enable), key) })
    }

    /// The transparent pixel; an error when no key is set.
    pub fn color_key(&self) -> Result<u32> {
        let raw = self.handle.get()?;
        let mut key = 0;
        // SAFETY: live surface, valid out parameter.
        check(unsafe { sdl_sys::SDL_GetColorKey(raw, &mut key) })?;
        Ok(key)
    }

    pub fn set_alpha_mod(&mut self, alpha: u8) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live surface.
        check(unsafe { sdl_sys::SDL_SetSurfaceAlphaMod(raw, alpha) })
    }

    /// Copies `src_rect` (whole surface for `None`) onto `dst` at the
    /// position of `dst_rect`. Returns the area actually written after
    /// clipping.
    pub fn blit(
        &self,
        src_rect: Option<&Rect>,
        dst: &mut Surface<'_>,
        dst_rect: Option<Rect>,
    ) -> Result<Rect> {
        let src = self.handle.get()?;
        let target = dst.handle.get()?;
        let origin = dst_rect.unwrap_or_default();
        let record = self.record()?;
        let clipped = clip_blit(
            (record.w, record.h),
            src_rect,
            (origin.x, origin.y),
            &dst.record()?.clip_rect,
        );
        // Nothing overlaps: a zero-sized blit still runs the native checks.
        let (src_area, mut area) = clipped.unwrap_or((Rect::default(), Rect::default()));
        // SAFETY: live surfaces; both rects are local and already clipped.
        check(unsafe { sdl_sys::SDL_UpperBlit(src, &src_area, target, &mut area) })?;
        Ok(match clipped {
            Some(_) => area,
            None => Rect::new(origin.x, origin.y, 0, 0),
        })
    }

    pub fn free(&mut self) {
        self.handle.release();
    }
}

/// Clips a blit the way `SDL_UpperBlit` does, in 64 bits: the source rect
/// to the source surface, shifting the destination by whatever is cut off
/// its top-left, then the destination to `clip`. Returns the source and
/// destination areas, or `None` when nothing is left.
fn clip_blit(
    (src_w, src_h): (i32, i32),
    src_rect: Option<&Rect>,
    (dst_x, dst_y): (i32, i32),
    clip: &Rect,
) -> Option<(Rect, Rect)> {
    let (mut sx, mut sy, mut w, mut h) = match src_rect {
        Some(rect) => (
            i64::from(rect.x),
            i64::from(rect.y),
            i64::from(rect.w),
            i64::from(rect.h),
        ),
        None => (0, 0, i64::from(src_w), i64::from(src_h)),
    };
    let (mut dx, mut dy) = (i64::from(dst_x), i64::from(dst_y));
    if sx < 0 {
        w += sx;
        dx -= sx;
        sx = 0;
    }
    if sy < 0 {
        h += sy;
        dy -= sy;
        sy = 0;
    }
    w = w.min(i64::from(src_w) - sx);
    h = h.min(i64::from(src_h) - sy);

    let (cx, cy) = (i64::from(clip.x), i64::from(clip.y));
    if cx > dx {
        w -= cx - dx;
        sx += cx - dx;
        dx = cx;
    }
    if cy > dy {
        h -= cy - dy;
        sy += cy - dy;
        dy = cy;
    }
    w = w.min(cx + i64::from(clip.w) - dx);
    h = h.min(cy + i64::from(clip.h) - dy);
    if w <= 0 || h <= 0 {
        return None;
    }
    let narrow = |value: i64| i32::try_from(value).ok();
    let (w, h) = (narrow(w)?, narrow(h)?);
    Some((
        Rect::new(narrow(sx)?, narrow(sy)?, w, h),
        Rect::new(narrow(dx)?, narrow(dy)?, w, h),
    ))
}

#[cfg(test)]
mod tests {
    use sdl_abi::Color;

    use super::*;
    use crate::pixels::PixelFormatEnum;

    const ARGB: [u32; 4] = [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000];

    #[test]
    fn created_surface_has_padded_rows() {
        let surface = Surface::create_rgb(3, 2, 24, [0; 4]).unwrap();
        assert_eq!(surface.width().unwrap(), 3);
        assert_eq!(surface.height().unwrap(), 2);
        assert_eq!(surface.pitch().unwrap(), 12);
        assert_eq!(surface.format().unwrap().format(), PixelFormatEnum::RGB24);
        assert_eq!(surface.pixels().unwrap(), &[0; 24][..]);
        assert!(!surface.must_lock().unwrap());
    }

    #[cfg(not(sdl_stub))]
    #[test]
    fn fill_writes_caller_pixels() {
        let mut buffer = [0_u8; 4 * 4 * 2];
        {
            let mut surface = Surface::from_pixels(&mut buffer, 4, 2, 32, 16, ARGB).unwrap();
            assert_eq!(surface.format().unwrap().format(), PixelFormatEnum::ARGB8888);
            let red = surface.format().unwrap().map_rgb(0xFF, 0, 0);
            surface.fill_rect(Some(&Rect::new(1, 1, 2, 1)), red).unwrap();
            assert_eq!(surface.pixels_mut().unwrap().len(), 32);
        }
        assert_eq!(buffer[..16], [0; 16]);
        assert_eq!(buffer[20..24], 0xFFFF_0000_u32.to_le_bytes());
        assert_eq!(buffer[24..28], 0xFFFF_0000_u32.to_le_bytes());
        assert_eq!(buffer[28..], [0; 4]);
    }

    #[test]
    fn short_caller_buffer_is_rejected() {
        let mut buffer = [0_u8; 20];
        let err = Surface::from_pixels(&mut buffer, 4, 2, 32, 16, ARGB).unwrap_err();
        assert_eq!(err.code(), -1);
        assert_eq!(err.message(), "pixel buffer holds 20 bytes, 32 needed");
    }

    #[test]
    fn color_key_round_trip() {
        let mut surface = Surface::create_rgb(2, 2, 32, ARGB).unwrap();
        assert_eq!(
            surface.color_key().unwrap_err().message(),
            "Surface doesn't have a colorkey"
        );
        surface.set_color_key(true, 0xFF00_FF00).unwrap();
        assert_eq!(surface.color_key().unwrap(), 0xFF00_FF00);
        surface.set_color_key(false, 0).unwrap();
        assert!(surface.color_key().is_err());
        surface.set_alpha_mod(0x80).unwrap();
    }

    #[test]
    fn blit_clips_to_the_destination() {
        let mut source = Surface::create_rgb(8, 8, 32, ARGB).unwrap();
        source.fill_rect(None, 0xFF11_2233).unwrap();
        let mut target = Surface::create_rgb(4, 4, 32, ARGB).unwrap();

        let area = source.blit(None, &mut target, Some(Rect::new(2, 2, 0, 0))).unwrap();
        assert_eq!(area, Rect::new(2, 2, 2, 2));

        let offset = Rect::new(-2, -2, i32::MAX, i32::MAX);
        let area = source.blit(Some(&offset), &mut target, None).unwrap();
        assert_eq!(area, Rect::new(2, 2, 2, 2));

        let area = source.blit(None, &mut target, Some(Rect::new(-6, 1, 0, 0))).unwrap();
        assert_eq!(area, Rect::new(0, 1, 2, 3));
    }

    #[cfg(not(sdl_stub))]
    #[test]
    fn blit_copies_pixels() {
        let mut source = Surface::create_rgb(8, 8, 32, ARGB).unwrap();
        source.fill_rect(None, 0xFF11_2233).unwrap();
        let mut target = Surface::create_rgb(4, 4, 32, ARGB).unwrap();
        source.blit(None, &mut target, Some(Rect::new(2, 2, 0, 0))).unwrap();

        let pixels = target.pixels().unwrap();
        let at = |x: usize, y: usize| &pixels[y * 16 + x * 4..][..4];
        assert_eq!(at(3, 3), 0xFF11_2233_u32.to_le_bytes());
        assert_eq!(at(1, 1), [0; 4]);
    }

    #[test]
    fn extreme_rects_never_reach_native_math() {
        let mut target = Surface::create_rgb(4, 4, 32, ARGB).unwrap();
        let source = Surface::create_rgb(8, 8, 32, ARGB).unwrap();
        let far = Rect::new(i32::MAX - 1, i32::MAX - 1, i32::MAX, i32::MAX);
        let before = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);

        target.fill_rect(Some(&far), 0xFFFF_FFFF).unwrap();
        target.fill_rect(Some(&before), 0xFFFF_FFFF).unwrap();
        assert_eq!(target.pixels().unwrap(), &[0; 64][..]);

        let area = source.blit(Some(&before), &mut target, Some(far)).unwrap();
        assert_eq!(area, Rect::new(far.x, far.y, 0, 0));
        let area = source.blit(None, &mut target, Some(before)).unwrap();
        assert_eq!(area, Rect::new(i32::MIN, i32::MIN, 0, 0));
        let area = source.blit(Some(&far), &mut target, None).unwrap();
        assert_eq!(area, Rect::new(0, 0, 0, 0));
    }

    #[test]
    fn blit_clipping_saturates() {
        let clip = Rect::new(0, 0, 4, 4);
        assert_eq!(clip_blit((8, 8), None, (i32::MAX, i32::MAX), &clip), None);
        assert_eq!(clip_blit((8, 8), None, (i32::MIN, 0), &clip), None);
        let wide = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(clip_blit((8, 8), Some(&wide), (0, 0), &clip), None);
        assert_eq!(
            clip_blit((8, 8), Some(&Rect::new(6, 6, 9, 9)), (-1, 0), &clip),
            Some((Rect::new(7, 6, 1, 2), Rect::new(0, 0, 1, 2)))
        );
    }

    #[test]
    fn locked_surfaces_refuse_to_blit() {
        let source = Surface::create_rgb(2, 2, 32, ARGB).unwrap();
        let mut target = Surface::create_rgb(2, 2, 32, ARGB).unwrap();
        target.lock().unwrap();
        let err = source.blit(None, &mut target, None).unwrap_err();
        assert_eq!(err.message(), "Surfaces must not be locked during blit");
        target.unlock().unwrap();
        assert_eq!(source.blit(None, &mut target, None).unwrap(), Rect::new(0, 0, 2, 2));
    }

    #[test]
    fn indexed_surface_sees_palette_edits() {
        let mut surface = Surface::create_rgb(2, 2, 8, [0; 4]).unwrap();
        let palette = Palette::alloc(256).unwrap();
        surface.set_palette(&palette).unwrap();
        palette.set_colors(&[Color::rgb(9, 8, 7)], 5).unwrap();
        if cfg!(not(sdl_stub)) {
            assert_eq!(surface.format().unwrap().get_rgb(5), Color::rgb(9, 8, 7));
        }

        let small = Palette::alloc(4).unwrap();
        assert!(surface.set_palette(&small).is_err());
    }

    #[test]
    fn freed_surface_reports_null_handle() {
        let mut surface = Surface::create_rgb(1, 1, 32, ARGB).unwrap();
        surface.free();
        surface.free();
        assert!(surface.is_null());
        assert!(surface.pixels().is_none());
        assert_eq!(surface.width(), Err(Error::NullHandle("surface")));
    }

    #[cfg(sdl_stub)]
    #[test]
    fn surface_keeps_shared_palette_alive() {
        let mut surface = Surface::create_rgb(2, 2, 8, [0; 4]).unwrap();
        let palette = Palette::alloc(256).unwrap();
        let raw = palette.raw();
        surface.set_palette(&palette).unwrap();
        drop(palette);
        assert!(sdl_sys::stub::is_live(raw.cast()));
        surface.free();
        assert!(!sdl_sys::stub::is_live(raw.cast()));
    }
}
