use std::ffi::{c_char, c_int, c_long, CString};
use std::path::Path;

use sdl::error::{check, check_ptr, to_cstring, Error, Result};
use sdl::{Color, Handle, Resource, Surface};
use sdl_sys::TTF_Font;
use tracing::debug;

sdl::native_flags! {
    /// Synthesized style applied on top of the face.
    pub struct FontStyle(c_int) {
        const NORMAL = sdl_sys::TTF_STYLE_NORMAL;
        const BOLD = sdl_sys::TTF_STYLE_BOLD;
        const ITALIC = sdl_sys::TTF_STYLE_ITALIC;
        const UNDERLINE = sdl_sys::TTF_STYLE_UNDERLINE;
        const STRIKETHROUGH = sdl_sys::TTF_STYLE_STRIKETHROUGH;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Hinting {
    #[default]
    Normal,
    Light,
    Mono,
    None,
}

impl Hinting {
    pub const fn raw(self) -> c_int {
        match self {
            Hinting::Normal => sdl_sys::TTF_HINTING_NORMAL,
            Hinting::Light => sdl_sys::TTF_HINTING_LIGHT,
            Hinting::Mono => sdl_sys::TTF_HINTING_MONO,
            Hinting::None => sdl_sys::TTF_HINTING_NONE,
        }
    }

    /// Unknown values read back as `Normal`.
    pub fn from_raw(raw: c_int) -> Self {
        match raw {
            sdl_sys::TTF_HINTING_LIGHT => Hinting::Light,
            sdl_sys::TTF_HINTING_MONO => Hinting::Mono,
            sdl_sys::TTF_HINTING_NONE => Hinting::None,
            _ => Hinting::Normal,
        }
    }
}

/// Bounding box and advance of one glyph, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub advance: i32,
}

struct FontResource;

impl Resource for FontResource {
    type Raw = TTF_Font;

    const KIND: &'static str = "font";

    unsafe fn release(raw: *mut TTF_Font) {
        // SAFETY: guaranteed by the `Resource` contract.
        unsafe { sdl_sys::TTF_CloseFont(raw) }
    }
}

/// An opened font face at one point size.
///
/// A font may be moved to another thread but not shared between threads;
/// the native object keeps glyph caches that are not synchronized. Every
/// method on a closed font fails with `Error::NullHandle("font")`.
#[derive(Debug)]
pub struct Font {
    handle: Handle<FontResource>,
}

// SAFETY: the native font is only reached through `&self`/`&mut self` of a
// single owner; it has no thread affinity of its own.
unsafe impl Send for Font {}

fn path_to_cstring(path: &Path) -> Result<CString> {
    to_cstring(&path.to_string_lossy())
}

impl Font {
    /// Opens the first face of the font file at `path`.
    pub fn open(path: impl AsRef<Path>, ptsize: i32) -> Result<Self> {
        let path = path.as_ref();
        let file = path_to_cstring(path)?;
        // SAFETY: NUL-terminated path.
        let raw = unsafe { sdl_sys::TTF_OpenFont(file.as_ptr(), ptsize) };
        let handle = Handle::adopt(raw)?;
        debug!(path = %path.display(), ptsize, "font opened");
        Ok(Self { handle })
    }

    /// Opens face `index` of a font collection.
    pub fn open_index(path: impl AsRef<Path>, ptsize: i32, index: i64) -> Result<Self> {
        let path = path.as_ref();
        let file = path_to_cstring(path)?;
        let index = c_long::try_from(index).map_err(|_| Error::Sdl {
            message: format!("face index {index} is out of range"),
            code: -1,
        })?;
        // SAFETY: NUL-terminated path.
        let raw = unsafe { sdl_sys::TTF_OpenFontIndex(file.as_ptr(), ptsize, index) };
        let handle = Handle::adopt(raw)?;
        debug!(path = %path.display(), ptsize, index, "font opened");
        Ok(Self { handle })
    }

    pub fn raw(&self) -> *mut TTF_Font {
        self.handle.as_ptr()
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub fn close(&mut self) {
        self.handle.release();
    }

    fn read(&self, getter: unsafe extern "C" fn(*const TTF_Font) -> c_int) -> Result<c_int> {
        let raw = self.handle.get()?;
        // SAFETY: live font.
        Ok(unsafe { getter(raw) })
    }

    fn write(&mut self, setter: unsafe extern "C" fn(*mut TTF_Font, c_int), value: c_int) -> Result<()> {
        let raw = self.handle.get()?;
        // SAFETY: live font.
        unsafe { setter(raw, value) };
        Ok(())
    }

    pub fn style(&self) -> Result<FontStyle> {
        self.read(sdl_sys::TTF_GetFontStyle).map(FontStyle::from_bits)
    }

    /// Changing the style flushes the glyph cache.
    pub fn set_style(&mut self, style: FontStyle) -> Result<()> {
        self.write(sdl_sys::TTF_SetFontStyle, style.bits())
    }

    /// Outline width in pixels, 0 for none.
    pub fn outline(&self) -> Result<i32> {
        self.read(sdl_sys::TTF_GetFontOutline)
    }

    pub fn set_outline(&mut self, outline: i32) -> Result<()> {
        self.write(sdl_sys::TTF_SetFontOutline, outline)
    }

    pub fn hinting(&self) -> Result<Hinting> {
        self.read(sdl_sys::TTF_GetFontHinting).map(Hinting::from_raw)
    }

    pub fn set_hinting(&mut self, hinting: Hinting) -> Result<()> {
        self.write(sdl_sys::TTF_SetFontHinting, hinting.raw())
    }

    /// Maximum glyph height.
    pub fn height(&self) -> Result<i32> {
        self.read(sdl_sys::TTF_FontHeight)
    }

    pub fn ascent(&self) -> Result<i32> {
        self.read(sdl_sys::TTF_FontAscent)
    }

    /// Negative: the distance below the baseline.
    pub fn descent(&self) -> Result<i32> {
        self.read(sdl_sys::TTF_FontDescent)
    }

    /// Recommended distance between baselines.
    pub fn line_skip(&self) -> Result<i32> {
        self.read(sdl_sys::TTF_FontLineSkip)
    }

    pub fn kerning(&self) -> Result<bool> {
        self.read(sdl_sys::TTF_GetFontKerning).map(|allowed| allowed != 0)
    }

    pub fn set_kerning(&mut self, allowed: bool) -> Result<()> {
        self.write(sdl_sys::TTF_SetFontKerning, c_int::from(allowed))
    }

    pub fn faces(&self) -> Result<i64> {
        let raw = self.handle.get()?;
        // SAFETY: live font.
        Ok(i64::from(unsafe { sdl_sys::TTF_FontFaces(raw) }))
    }

    pub fn is_fixed_width(&self) -> Result<bool> {
        self.read(sdl_sys::TTF_FontFaceIsFixedWidth).map(|fixed| fixed != 0)
    }

    fn face_name(
        &self,
        getter: unsafe extern "C" fn(*const TTF_Font) -> *mut c_char,
    ) -> Result<Option<String>> {
        let raw = self.handle.get()?;
        // SAFETY: live font; the name points into the font and is copied at once.
        let name = unsafe { getter(raw) };
        if name.is_null() {
            return Ok(None);
        }
        // SAFETY: non-null, NUL-terminated.
        Ok(Some(unsafe { sdl::error::copy_c_str(name) }))
    }

    pub fn family_name(&self) -> Result<Option<String>> {
        self.face_name(sdl_sys::TTF_FontFaceFamilyName)
    }

    pub fn style_name(&self) -> Result<Option<String>> {
        self.face_name(sdl_sys::TTF_FontFaceStyleName)
    }

    /// Metrics of one glyph. Only characters of the Basic Multilingual Plane
    /// can be measured.
    pub fn glyph_metrics(&self, ch: char) -> Result<GlyphMetrics> {
        let raw = self.handle.get()?;
        let code = u16::try_from(u32::from(ch)).map_err(|_| Error::Sdl {
            message: format!("glyph {ch:?} is outside the Basic Multilingual Plane"),
            code: -1,
        })?;
        let mut metrics = GlyphMetrics::default();
        // SAFETY: live font, valid out parameters.
        check(unsafe {
            sdl_sys::TTF_GlyphMetrics(
                raw,
                code,
                &mut metrics.min_x,
                &mut metrics.max_x,
                &mut metrics.min_y,
                &mut metrics.max_y,
                &mut metrics.advance,
            )
        })?;
        Ok(metrics)
    }

    /// Width and height `text` would render at, without rendering it.
    pub fn size_utf8(&self, text: &str) -> Result<(i32, i32)> {
        let raw = self.handle.get()?;
        let text = to_cstring(text)?;
        let (mut w, mut h) = (0, 0);
        // SAFETY: live font, NUL-terminated text, valid out parameters.
        check(unsafe { sdl_sys::TTF_SizeUTF8(raw, text.as_ptr(), &mut w, &mut h) })?;
        Ok((w, h))
    }

    fn render(
        &self,
        text: &str,
        draw: impl FnOnce(*mut TTF_Font, *const c_char) -> *mut sdl_abi::Surface,
    ) -> Result<Surface<'static>> {
        let raw = self.handle.get()?;
        let text = to_cstring(text)?;
        let surface = check_ptr(draw(raw, text.as_ptr()))?;
        // SAFETY: a fresh surface the caller now owns; its pixels are native.
        Ok(unsafe { Surface::from_raw(surface) })
    }

    /// Fast, unantialiased 8-bit render: index 0 is the transparent
    /// background and index 1 is `fg`.
    pub fn render_utf8_solid(&self, text: &str, fg: Color) -> Result<Surface<'static>> {
        // SAFETY: arguments come from `render`.
        self.render(text, |font, text| unsafe { sdl_sys::TTF_RenderUTF8_Solid(font, text, fg) })
    }

    /// Antialiased 8-bit render onto an opaque `bg` box.
    pub fn render_utf8_shaded(&self, text: &str, fg: Color, bg: Color) -> Result<Surface<'static>> {
        // SAFETY: arguments come from `render`.
        self.render(text, |font, text| unsafe {
            sdl_sys::TTF_RenderUTF8_Shaded(font, text, fg, bg)
        })
    }

    /// Antialiased 32-bit ARGB render with alpha.
    pub fn render_utf8_blended(&self, text: &str, fg: Color) -> Result<Surface<'static>> {
        // SAFETY: arguments come from `render`.
        self.render(text, |font, text| unsafe {
            sdl_sys::TTF_RenderUTF8_Blended(font, text, fg)
        })
    }

    /// Like [`Font::render_utf8_blended`], breaking lines at spaces so none is
    /// wider than `wrap_length` pixels. Newlines always break.
    pub fn render_utf8_blended_wrapped(
        &self,
        text: &str,
        fg: Color,
        wrap_length: u32,
    ) -> Result<Surface<'static>> {
        // SAFETY: arguments come from `render`.
        self.render(text, |font, text| unsafe {
            sdl_sys::TTF_RenderUTF8_Blended_Wrapped(font, text, fg, wrap_length)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::test_support::serial;

    fn font_file(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"not really a font").unwrap();
        path
    }

    fn with_ttf<R>(body: impl FnOnce() -> R) -> R {
        let _guard = serial();
        crate::init().unwrap();
        let result = body();
        crate::quit();
        result
    }

    #[test]
    fn font_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Font>();
    }

    #[test]
    fn hinting_round_trip() {
        for hinting in [Hinting::Normal, Hinting::Light, Hinting::Mono, Hinting::None] {
            assert_eq!(Hinting::from_raw(hinting.raw()), hinting);
        }
        assert_eq!(Hinting::from_raw(42), Hinting::Normal);
    }

    #[test]
    fn closed_font_reports_null_handle() {
        let dir = TempDir::new().unwrap();
        let path = font_file(&dir, "Closable.ttf");
        with_ttf(|| {
            let mut font = Font::open(&path, 12).unwrap();
            font.close();
            font.close();
            assert!(font.is_null());
            assert_eq!(font.height(), Err(Error::NullHandle("font")));
            assert_eq!(font.set_style(FontStyle::BOLD), Err(Error::NullHandle("font")));
            assert_eq!(
                font.render_utf8_blended("x", Color::rgb(0, 0, 0)).unwrap_err(),
                Error::NullHandle("font")
            );
        });
    }

    #[test]
    fn missing_file_is_a_native_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.ttf");
        with_ttf(|| {
            let err = Font::open(&path, 12).unwrap_err();
            assert_eq!(err.code(), 0);
            assert!(err.message().starts_with("Couldn't open"));
        });
    }

    #[test]
    fn text_rejects_interior_nul() {
        let dir = TempDir::new().unwrap();
        let path = font_file(&dir, "Nul.ttf");
        with_ttf(|| {
            let font = Font::open(&path, 12).unwrap();
            assert_eq!(font.size_utf8("a\0b"), Err(Error::InteriorNul));
        });
    }

    #[cfg(sdl_stub)]
    mod stub {
        use super::*;

        #[test]
        fn opening_requires_init() {
            let dir = TempDir::new().unwrap();
            let path = font_file(&dir, "Early.ttf");
            let _guard = serial();
            let err = Font::open(&path, 12).unwrap_err();
            assert_eq!(err.message(), "Library not initialized");
        }

        #[test]
        fn metric_queries_reach_the_library() {
            let dir = TempDir::new().unwrap();
            let path = font_file(&dir, "Metric Sans.ttf");
            with_ttf(|| {
                let font = Font::open(&path, 20).unwrap();
                assert_eq!(font.height().unwrap(), 0);
                assert_eq!(font.line_skip().unwrap(), 0);
                assert_eq!(font.faces().unwrap(), 1);
                assert!(font.is_fixed_width().unwrap());
                assert_eq!(font.family_name().unwrap().as_deref(), Some("Stub"));
                assert_eq!(font.style_name().unwrap().as_deref(), Some("Regular"));
                assert_eq!(font.glyph_metrics('g').unwrap(), GlyphMetrics::default());
                assert_eq!(font.glyph_metrics('\u{1F600}').unwrap_err().code(), -1);
                assert_eq!(font.size_utf8("abc").unwrap(), (0, 0));
            });
        }

        #[test]
        fn settings_round_trip() {
            let dir = TempDir::new().unwrap();
            let path = font_file(&dir, "Settings.ttf");
            with_ttf(|| {
                let mut font = Font::open(&path, 16).unwrap();
                assert_eq!(font.style().unwrap(), FontStyle::NORMAL);
                font.set_style(FontStyle::BOLD | FontStyle::UNDERLINE).unwrap();
                assert!(font.style().unwrap().contains(FontStyle::UNDERLINE));

                font.set_outline(2).unwrap();
                assert_eq!(font.outline().unwrap(), 2);

                font.set_hinting(Hinting::Mono).unwrap();
                assert_eq!(font.hinting().unwrap(), Hinting::Mono);

                assert!(font.kerning().unwrap());
                font.set_kerning(false).unwrap();
                assert!(!font.kerning().unwrap());
            });
        }

        #[test]
        fn renders_into_owned_surfaces() {
            let dir = TempDir::new().unwrap();
            let path = font_file(&dir, "Render.ttf");
            with_ttf(|| {
                let font = Font::open(&path, 20).unwrap();
                let fg = Color::rgb(0x10, 0x20, 0x30);
                let format_of = |surface: &sdl::Surface<'static>| {
                    surface.format().unwrap().format()
                };

                let blended = font.render_utf8_blended("hello", fg).unwrap();
                assert_eq!(format_of(&blended), sdl::PixelFormatEnum::ARGB8888);
                assert_eq!(sdl_sys::stub::live_count("surface"), 1);

                let solid = font.render_utf8_solid("hi", fg).unwrap();
                assert_eq!(format_of(&solid), sdl::PixelFormatEnum::INDEX8);
                assert!(solid.format().unwrap().has_palette());

                let shaded = font
                    .render_utf8_shaded("hi", fg, Color::rgb(0xFF, 0xFF, 0xFF))
                    .unwrap();
                assert_eq!(format_of(&shaded), sdl::PixelFormatEnum::INDEX8);

                let wrapped = font
                    .render_utf8_blended_wrapped("hello world", fg, 60)
                    .unwrap();
                assert_eq!(format_of(&wrapped), sdl::PixelFormatEnum::ARGB8888);

                let err = font.render_utf8_blended("", fg).unwrap_err();
                assert_eq!(err.message(), "Text has zero width");
                drop((blended, solid, shaded, wrapped));
                assert_eq!(sdl_sys::stub::live_count("surface"), 0);
            });
        }

        #[test]
        fn font_can_move_to_another_thread() {
            let dir = TempDir::new().unwrap();
            let path = font_file(&dir, "Moved.ttf");
            with_ttf(|| {
                let font = Font::open(&path, 10).unwrap();
                let height = std::thread::spawn(move || font.height().unwrap())
                    .join()
                    .unwrap();
                assert_eq!(height, 0);
            });
        }
    }
}
