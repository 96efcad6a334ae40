use std::ffi::c_int;
use std::fmt;
use std::rc::Rc;

use sdl_abi::{Color, Palette as RawPalette, PixelFormat as RawPixelFormat};

use crate::error::{check, Result};
use crate::handle::{resource, Handle};

/// Pixel format tags (`SDL_PIXELFORMAT_*`) for the formats the bridge names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelFormatEnum(pub u32);

impl PixelFormatEnum {
    pub const UNKNOWN: Self = Self(sdl_sys::SDL_PIXELFORMAT_UNKNOWN);
    pub const INDEX8: Self = Self(sdl_sys::SDL_PIXELFORMAT_INDEX8);
    pub const RGB332: Self = Self(sdl_sys::SDL_PIXELFORMAT_RGB332);
    pub const RGB565: Self = Self(sdl_sys::SDL_PIXELFORMAT_RGB565);
    pub const RGB24: Self = Self(sdl_sys::SDL_PIXELFORMAT_RGB24);
    pub const BGR24: Self = Self(sdl_sys::SDL_PIXELFORMAT_BGR24);
    pub const RGB888: Self = Self(sdl_sys::SDL_PIXELFORMAT_RGB888);
    pub const BGR888: Self = Self(sdl_sys::SDL_PIXELFORMAT_BGR888);
    pub const ARGB8888: Self = Self(sdl_sys::SDL_PIXELFORMAT_ARGB8888);
    pub const RGBA8888: Self = Self(sdl_sys::SDL_PIXELFORMAT_RGBA8888);
    pub const ABGR8888: Self = Self(sdl_sys::SDL_PIXELFORMAT_ABGR8888);
    pub const BGRA8888: Self = Self(sdl_sys::SDL_PIXELFORMAT_BGRA8888);

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn name(self) -> String {
        pixel_format_name(self.0)
    }

    pub const fn bits_per_pixel(self) -> u32 {
        (self.0 >> 8) & 0xFF
    }

    pub fn bytes_per_pixel(self) -> usize {
        bytes_per_pixel(self.0)
    }
}

impl fmt::Display for PixelFormatEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// `SDL_BYTESPERPIXEL` for packed and array formats; FOURCC formats count as 1.
pub(crate) fn bytes_per_pixel(format: u32) -> usize {
    if (format >> 28) & 0x0F == 1 {
        (format & 0xFF) as usize
    } else {
        1
    }
}

/// Symbolic name of a format, `SDL_PIXELFORMAT_UNKNOWN` for anything unrecognized.
pub fn pixel_format_name(format: u32) -> String {
    // SAFETY: returns a static NUL-terminated string.
    crate::static_str(unsafe { sdl_sys::SDL_GetPixelFormatName(format) }).unwrap_or_default()
}

resource!(PixelFormatResource, RawPixelFormat, "pixel_format", sdl_sys::SDL_FreeFormat);
resource!(PaletteResource, RawPalette, "palette", sdl_sys::SDL_FreePalette);

/// Borrowed view of a native `SDL_PixelFormat`, such as the one a surface owns.
#[derive(Clone, Copy)]
pub struct PixelFormatRef<'a> {
    record: &'a RawPixelFormat,
}

impl<'a> PixelFormatRef<'a> {
    /// # Safety
    /// `record` must be a live native format for all of `'a`.
    pub(crate) unsafe fn new(record: &'a RawPixelFormat) -> Self {
        Self { record }
    }

    pub fn format(&self) -> PixelFormatEnum {
        PixelFormatEnum(self.record.format)
    }

    pub fn bits_per_pixel(&self) -> u8 {
        self.record.bits_per_pixel
    }

    pub fn bytes_per_pixel(&self) -> u8 {
        self.record.bytes_per_pixel
    }

    /// Red, green, blue and alpha masks.
    pub fn masks(&self) -> [u32; 4] {
        [
            self.record.rmask,
            self.record.gmask,
            self.record.bmask,
            self.record.amask,
        ]
    }

    pub fn has_palette(&self) -> bool {
        !self.record.palette.is_null()
    }

    /// Packs an opaque color; formats without alpha ignore it.
    pub fn map_rgb(&self, r: u8, g: u8, b: u8) -> u32 {
        // SAFETY: live format.
        unsafe { sdl_sys::SDL_MapRGB(self.record, r, g, b) }
    }

    pub fn map_rgba(&self, color: Color) -> u32 {
        // SAFETY: live format.
        unsafe { sdl_sys::SDL_MapRGBA(self.record, color.r, color.g, color.b, color.a) }
    }

    pub fn get_rgb(&self, pixel: u32) -> Color {
        let mut color = Color::rgb(0, 0, 0);
        // SAFETY: live format, valid out parameters.
        unsafe { sdl_sys::SDL_GetRGB(pixel, self.record, &mut color.r, &mut color.g, &mut color.b) };
        color
    }

    pub fn get_rgba(&self, pixel: u32) -> Color {
        let mut color = Color::default();
        // SAFETY: live format, valid out parameters.
        unsafe {
            sdl_sys::SDL_GetRGBA(
                pixel,
                self.record,
                &mut color.r,
                &mut color.g,
                &mut color.b,
                &mut color.a,
            )
        };
        color
    }
}

impl fmt::Debug for PixelFormatRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelFormatRef")
            .field("format", &self.format())
            .field("masks", &self.masks())
            .finish()
    }
}

/// An owned `SDL_PixelFormat` from [`PixelFormat::alloc`].
#[derive(Debug)]
pub struct PixelFormat {
    handle: Handle<PixelFormatResource>,
}

impl PixelFormat {
    pub fn alloc(format: PixelFormatEnum) -> Result<Self> {
        // SAFETY: plain value argument.
        let raw = unsafe { sdl_sys::SDL_AllocFormat(format.raw()) };
        Ok(Self {
            handle: Handle::adopt(raw)?,
        })
    }

    pub fn raw(&self) -> *mut RawPixelFormat {
        self.handle.as_ptr()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub fn free(&mut self) {
        self.handle.release();
    }

    pub fn view(&self) -> Result<PixelFormatRef<'_>> {
        let raw = self.handle.get()?;
        // SAFETY: the handle keeps the format alive while borrowed.
        Ok(unsafe { PixelFormatRef::new(&*raw) })
    }

    pub fn map_rgb(&self, r: u8, g: u8, b: u8) -> Result<u32> {
        Ok(self.view()?.map_rgb(r, g, b))
    }

    pub fn map_rgba(&self, color: Color) -> Result<u32> {
        Ok(self.view()?.map_rgba(color))
    }

    pub fn get_rgb(&self, pixel: u32) -> Result<Color> {
        Ok(self.view()?.get_rgb(pixel))
    }

    pub fn get_rgba(&self, pixel: u32) -> Result<Color> {
        Ok(self.view()?.get_rgba(pixel))
    }

    /// Attaches `palette`; the format keeps its own native reference.
    pub fn set_palette(&self, palette: &Palette) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live format and palette.
        check(unsafe { sdl_sys::SDL_SetPixelFormatPalette(raw, palette.raw()) })
    }
}

/// A shared native palette.
///
/// Clones refer to the same native palette and see each other's changes;
/// it is released when the last clone is dropped. Surfaces and formats that
/// use it hold their own native reference.
#[derive(Clone)]
pub struct Palette {
    inner: Rc<Handle<PaletteResource>>,
}

impl Palette {
    /// A palette of `ncolors` entries, all white.
    pub fn alloc(ncolors: i32) -> Result<Self> {
        // SAFETY: plain value argument.
        let raw = unsafe { sdl_sys::SDL_AllocPalette(ncolors) };
        Ok(Self {
            inner: Rc::new(Handle::adopt(raw)?),
        })
    }

    pub fn raw(&self) -> *mut RawPalette {
        self.inner.as_ptr()
    }

    pub fn len(&self) -> usize {
        // SAFETY: adopted non-null and kept alive by the Rc.
        let ncolors = unsafe { (*self.raw()).ncolors };
        usize::try_from(ncolors).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bumped by the native side on every color change.
    pub fn version(&self) -> u32 {
        // SAFETY: adopted non-null and kept alive by the Rc.
        unsafe { (*self.raw()).version }
    }

    pub fn colors(&self) -> Vec<Color> {
        let len = self.len();
        // SAFETY: `colors` holds `ncolors` entries for the palette's lifetime.
        unsafe {
            let colors = (*self.raw()).colors;
            if colors.is_null() {
                return Vec::new();
            }
            std::slice::from_raw_parts(colors, len).to_vec()
        }
    }

    /// Overwrites entries starting at `first`. Every surface sharing the
    /// palette sees the change.
    pub fn set_colors(&self, colors: &[Color], first: usize) -> Result<()> {
        let count = c_int::try_from(colors.len()).unwrap_or(c_int::MAX);
        let first = c_int::try_from(first).unwrap_or(c_int::MAX);
        // SAFETY: live palette; `count` colors are readable.
        check(unsafe { sdl_sys::SDL_SetPaletteColors(self.raw(), colors.as_ptr(), first, count) })
    }

    pub fn ptr_eq(&self, other: &Palette) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("raw", &self.raw())
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_and_sizes() {
        assert_eq!(PixelFormatEnum::ARGB8888.name(), "SDL_PIXELFORMAT_ARGB8888");
        assert_eq!(pixel_format_name(0xDEAD), "SDL_PIXELFORMAT_UNKNOWN");
        assert_eq!(PixelFormatEnum::RGB565.bytes_per_pixel(), 2);
        assert_eq!(PixelFormatEnum::RGB24.bits_per_pixel(), 24);
        assert_eq!(PixelFormatEnum::INDEX8.bytes_per_pixel(), 1);
    }

    #[cfg(not(sdl_stub))]
    #[test]
    fn map_and_unpack_rgba() {
        let format = PixelFormat::alloc(PixelFormatEnum::ARGB8888).unwrap();
        let pixel = format.map_rgba(Color::rgba(0x11, 0x22, 0x33, 0x44)).unwrap();
        assert_eq!(pixel, 0x4411_2233);
        assert_eq!(format.get_rgba(pixel).unwrap(), Color::rgba(0x11, 0x22, 0x33, 0x44));

        let opaque = PixelFormat::alloc(PixelFormatEnum::RGB888).unwrap();
        assert_eq!(opaque.map_rgb(1, 2, 3).unwrap(), 0x0001_0203);
        assert_eq!(opaque.get_rgba(0x0001_0203).unwrap(), Color::rgba(1, 2, 3, 0xFF));
    }

    #[test]
    fn freed_format_reports_null_handle() {
        let mut format = PixelFormat::alloc(PixelFormatEnum::RGB565).unwrap();
        format.free();
        format.free();
        assert!(format.is_null());
        assert_eq!(
            format.map_rgb(0, 0, 0),
            Err(crate::Error::NullHandle("pixel_format"))
        );
    }

    #[test]
    fn unknown_format_is_a_native_error() {
        let err = PixelFormat::alloc(PixelFormatEnum(0x1234)).unwrap_err();
        assert_eq!(err.message(), "Unknown pixel format");
    }

    #[test]
    fn palette_edits_are_shared_by_clones() {
        let palette = Palette::alloc(4).unwrap();
        let alias = palette.clone();
        assert!(palette.ptr_eq(&alias));
        assert_eq!(palette.len(), 4);
        assert_eq!(palette.colors()[0], Color::rgb(0xFF, 0xFF, 0xFF));

        let version = palette.version();
        palette
            .set_colors(&[Color::rgb(1, 2, 3), Color::rgb(4, 5, 6)], 1)
            .unwrap();
        assert_eq!(alias.colors()[1..3], [Color::rgb(1, 2, 3), Color::rgb(4, 5, 6)]);
        assert_ne!(alias.version(), version);

        assert!(palette.set_colors(&[Color::rgb(0, 0, 0); 3], 2).is_err());
    }

    #[test]
    fn palette_rejects_empty_size() {
        assert_eq!(
            Palette::alloc(0).unwrap_err().message(),
            "Parameter 'ncolors' is invalid"
        );
    }

    #[cfg(sdl_stub)]
    #[test]
    fn palette_is_freed_after_last_clone() {
        let palette = Palette::alloc(256).unwrap();
        let raw = palette.raw();
        let format = PixelFormat::alloc(PixelFormatEnum::INDEX8).unwrap();
        format.set_palette(&palette).unwrap();

        let clone = palette.clone();
        drop(palette);
        assert!(sdl_sys::stub::is_live(raw.cast()));
        drop(clone);
        // The format still holds a reference.
        assert!(sdl_sys::stub::is_live(raw.cast()));
        assert!(format.view().unwrap().has_palette());
        drop(format);
        assert!(!sdl_sys::stub::is_live(raw.cast()));
    }
}
