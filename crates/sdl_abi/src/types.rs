//! Non-event records shared by the event union and the video, render and
//! mixer interfaces.

use core::ffi::{c_char, c_void};

use crate::POINTER_GAP;

/// Key information carried by [`KeyboardEvent`](crate::KeyboardEvent).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Keysym {
    /// Physical key code (`SDL_Scancode`).
    pub scancode: u32,
    /// Virtual key code (`SDL_Keycode`).
    pub sym: i32,
    /// Active modifiers (`KMOD_*`).
    pub mod_: u16,
    pub padding: [u8; 2],
    pub unused: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct JoystickGUID {
    pub data: [u8; 16],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }
}

/// `SDL_Palette`. Reference counted on the native side.
#[repr(C)]
#[derive(Debug)]
pub struct Palette {
    pub ncolors: i32,
    pub padding: [u8; POINTER_GAP],
    pub colors: *mut Color,
    pub version: u32,
    pub refcount: i32,
}

/// `SDL_PixelFormat`.
#[repr(C)]
#[derive(Debug)]
pub struct PixelFormat {
    pub format: u32,
    pub padding0: [u8; POINTER_GAP],
    pub palette: *mut Palette,
    pub bits_per_pixel: u8,
    pub bytes_per_pixel: u8,
    pub padding: [u8; 2],
    pub rmask: u32,
    pub gmask: u32,
    pub bmask: u32,
    pub amask: u32,
    pub rloss: u8,
    pub gloss: u8,
    pub bloss: u8,
    pub aloss: u8,
    pub rshift: u8,
    pub gshift: u8,
    pub bshift: u8,
    pub ashift: u8,
    pub refcount: i32,
    pub next: *mut PixelFormat,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Intersection of two rectangles, or `None` when they do not overlap.
    ///
    /// Edges are computed in 64 bits, so rectangles reaching past `i32::MAX`
    /// clip instead of wrapping.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let (ax0, ay0, ax1, ay1) = self.edges();
        let (bx0, by0, bx1, by1) = other.edges();
        Rect::from_edges(ax0.max(bx0), ay0.max(by0), ax1.min(bx1), ay1.min(by1))
    }

    pub fn has_intersection(&self, other: &Rect) -> bool {
        self.intersect(other).is_some()
    }

    /// Smallest rectangle covering both. An empty side yields the other.
    pub fn union(&self, other: &Rect) -> Rect {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let (ax0, ay0, ax1, ay1) = self.edges();
        let (bx0, by0, bx1, by1) = other.edges();
        Rect::from_edges(ax0.min(bx0), ay0.min(by0), ax1.max(bx1), ay1.max(by1))
            .unwrap_or_default()
    }

    /// Smallest rectangle holding every point, counting only points inside
    /// `clip` when one is given. `None` when no point qualifies.
    pub fn enclose_points(points: &[Point], clip: Option<&Rect>) -> Option<Rect> {
        if clip.is_some_and(Rect::is_empty) {
            return None;
        }
        let mut inside = points.iter().filter(|point| clip.map_or(true, |clip| clip.contains(point)));
        let first = inside.next()?;
        let (mut x0, mut y0) = (i64::from(first.x), i64::from(first.y));
        let (mut x1, mut y1) = (x0, y0);
        for point in inside {
            x0 = x0.min(i64::from(point.x));
            y0 = y0.min(i64::from(point.y));
            x1 = x1.max(i64::from(point.x));
            y1 = y1.max(i64::from(point.y));
        }
        Rect::from_edges(x0, y0, x1 + 1, y1 + 1)
    }

    pub fn contains(&self, point: &Point) -> bool {
        let (x0, y0, x1, y1) = self.edges();
        let (x, y) = (i64::from(point.x), i64::from(point.y));
        x >= x0 && x < x1 && y >= y0 && y < y1
    }

    /// Clips the segment from `start` to `end` to this rectangle, or `None`
    /// when no part of it lies inside.
    pub fn intersect_line(&self, start: Point, end: Point) -> Option<(Point, Point)> {
        if self.is_empty() {
            return None;
        }
        let (left, top, right, bottom) = self.edges();
        let (right, bottom) = (right - 1, bottom - 1);
        let (mut x1, mut y1) = (i64::from(start.x), i64::from(start.y));
        let (mut x2, mut y2) = (i64::from(end.x), i64::from(end.y));

        if (x1 < left && x2 < left)
            || (x1 > right && x2 > right)
            || (y1 < top && y2 < top)
            || (y1 > bottom && y2 > bottom)
        {
            return None;
        }
        if y1 == y2 {
            x1 = x1.clamp(left, right);
            x2 = x2.clamp(left, right);
        } else if x1 == x2 {
            y1 = y1.clamp(top, bottom);
            y2 = y2.clamp(top, bottom);
        } else {
            let outcode = |x: i64, y: i64| {
                let mut code = 0;
                if y < top {
                    code |= OUT_TOP;
                } else if y > bottom {
                    code |= OUT_BOTTOM;
                }
                if x < left {
                    code |= OUT_LEFT;
                } else if x > right {
                    code |= OUT_RIGHT;
                }
                code
            };
            let (mut code1, mut code2) = (outcode(x1, y1), outcode(x2, y2));
            while code1 | code2 != 0 {
                if code1 & code2 != 0 {
                    return None;
                }
                let code = if code1 != 0 { code1 } else { code2 };
                let (x, y) = if code & OUT_TOP != 0 {
                    (interpolate((y1, x1), (y2, x2), top), top)
                } else if code & OUT_BOTTOM != 0 {
                    (interpolate((y1, x1), (y2, x2), bottom), bottom)
                } else if code & OUT_LEFT != 0 {
                    (left, interpolate((x1, y1), (x2, y2), left))
                } else {
                    (right, interpolate((x1, y1), (x2, y2), right))
                };
                if code1 != 0 {
                    (x1, y1) = (x, y);
                    code1 = outcode(x, y);
                } else {
                    (x2, y2) = (x, y);
                    code2 = outcode(x, y);
                }
            }
        }
        Some((
            Point::new(clamp_i32(x1), clamp_i32(y1)),
            Point::new(clamp_i32(x2), clamp_i32(y2)),
        ))
    }

    fn edges(&self) -> (i64, i64, i64, i64) {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        (x, y, x + i64::from(self.w), y + i64::from(self.h))
    }

    /// Rectangle spanning `[x0, x1)` by `[y0, y1)`, saturated to `i32`.
    fn from_edges(x0: i64, y0: i64, x1: i64, y1: i64) -> Option<Rect> {
        let rect = Rect::new(
            clamp_i32(x0),
            clamp_i32(y0),
            clamp_i32(x1 - x0),
            clamp_i32(y1 - y0),
        );
        (!rect.is_empty()).then_some(rect)
    }
}

const OUT_TOP: u8 = 1;
const OUT_BOTTOM: u8 = 2;
const OUT_LEFT: u8 = 4;
const OUT_RIGHT: u8 = 8;

/// The other coordinate at `at` along the line through `from` and `to`,
/// each given as (known, other). The product needs 128 bits.
fn interpolate(from: (i64, i64), to: (i64, i64), at: i64) -> i64 {
    let span = i128::from(to.1 - from.1) * i128::from(at - from.0) / i128::from(to.0 - from.0);
    from.1 + span as i64
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Opaque blit mapping owned by a surface.
#[repr(C)]
pub struct BlitMap {
    _private: [u8; 0],
}

/// `SDL_Surface`.
#[repr(C)]
#[derive(Debug)]
pub struct Surface {
    pub flags: u32,
    pub padding0: [u8; POINTER_GAP],
    pub format: *mut PixelFormat,
    pub w: i32,
    pub h: i32,
    pub pitch: i32,
    pub padding1: [u8; POINTER_GAP],
    pub pixels: *mut c_void,
    pub userdata: *mut c_void,
    pub locked: i32,
    pub padding2: [u8; POINTER_GAP],
    pub lock_data: *mut c_void,
    pub clip_rect: Rect,
    pub map: *mut BlitMap,
    pub refcount: i32,
    pub padding3: [u8; POINTER_GAP],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl Version {
    /// `SDL_VERSIONNUM`.
    pub const fn num(&self) -> u32 {
        self.major as u32 * 1000 + self.minor as u32 * 100 + self.patch as u32
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayMode {
    pub format: u32,
    pub w: i32,
    pub h: i32,
    pub refresh_rate: i32,
    pub driverdata: *mut c_void,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self {
            format: 0,
            w: 0,
            h: 0,
            refresh_rate: 0,
            driverdata: core::ptr::null_mut(),
        }
    }
}

/// `SDL_RendererInfo`. `name` points into static driver storage.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RendererInfo {
    pub name: *const c_char,
    pub flags: u32,
    pub num_texture_formats: u32,
    pub texture_formats: [u32; 16],
    pub max_texture_width: i32,
    pub max_texture_height: i32,
}

impl Default for RendererInfo {
    fn default() -> Self {
        Self {
            name: core::ptr::null(),
            flags: 0,
            num_texture_formats: 0,
            texture_formats: [0; 16],
            max_texture_width: 0,
            max_texture_height: 0,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MessageBoxButtonData {
    pub flags: u32,
    pub buttonid: i32,
    pub text: *const c_char,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MessageBoxColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Indexed by `SDL_MESSAGEBOX_COLOR_*`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MessageBoxColorScheme {
    pub colors: [MessageBoxColor; 5],
}

/// `SDL_MessageBoxData`. Every pointer is borrowed for the duration of the call.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MessageBoxData {
    pub flags: u32,
    pub padding0: [u8; POINTER_GAP],
    pub window: *mut c_void,
    pub title: *const c_char,
    pub message: *const c_char,
    pub numbuttons: i32,
    pub padding1: [u8; POINTER_GAP],
    pub buttons: *const MessageBoxButtonData,
    pub color_scheme: *const MessageBoxColorScheme,
}

/// `SDL_SysWMinfo`. `info` is the driver union; its first words hold the
/// native handles of the reporting subsystem.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SysWMinfo {
    pub version: Version,
    pub padding: u8,
    pub subsystem: u32,
    pub info: [usize; 64 / core::mem::size_of::<usize>()],
}

impl Default for SysWMinfo {
    fn default() -> Self {
        Self {
            version: Version::default(),
            padding: 0,
            subsystem: 0,
            info: [0; 64 / core::mem::size_of::<usize>()],
        }
    }
}

/// `Mix_Chunk`: decoded sample data owned by the mixer.
#[repr(C)]
#[derive(Debug)]
pub struct MixChunk {
    pub allocated: i32,
    pub padding: [u8; POINTER_GAP],
    pub abuf: *mut u8,
    pub alen: u32,
    pub volume: u8,
    pub padding_tail: [u8; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 5, 5, 5)));
        assert!(a.has_intersection(&b));
        assert_eq!(a.intersect(&Rect::new(10, 0, 5, 5)), None);
        assert_eq!(a.intersect(&Rect::new(2, 2, 0, 4)), None);
    }

    #[test]
    fn extreme_rects_clip_without_wrapping() {
        let far = Rect::new(i32::MAX - 1, i32::MAX - 1, i32::MAX, i32::MAX);
        let near = Rect::new(0, 0, 16, 16);
        assert_eq!(far.intersect(&near), None);
        assert_eq!(near.intersect(&far), None);

        let huge = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(huge.intersect(&near), None);

        let everything = Rect::new(i32::MIN / 2, i32::MIN / 2, i32::MAX, i32::MAX);
        assert_eq!(everything.intersect(&near), Some(near));

        let edge = Rect::new(i32::MAX - 4, 0, i32::MAX, 8);
        let clipped = Rect::new(i32::MAX - 8, 0, 8, 8).intersect(&edge).unwrap();
        assert_eq!(clipped, Rect::new(i32::MAX - 4, 0, 4, 8));
    }

    #[test]
    fn union_saturates() {
        let a = Rect::new(0, 0, 2, 2);
        assert_eq!(a.union(&Rect::new(4, 4, 2, 2)), Rect::new(0, 0, 6, 6));
        assert_eq!(a.union(&Rect::default()), a);
        assert_eq!(Rect::default().union(&a), a);

        let wide = Rect::new(i32::MIN, 0, 1, 1).union(&Rect::new(i32::MAX - 1, 0, 1, 1));
        assert_eq!(wide, Rect::new(i32::MIN, 0, i32::MAX, 1));
    }

    #[test]
    fn points_are_enclosed() {
        let points = [Point::new(3, 4), Point::new(-1, 8), Point::new(6, 2)];
        assert_eq!(Rect::enclose_points(&points, None), Some(Rect::new(-1, 2, 8, 7)));

        let clip = Rect::new(0, 0, 5, 5);
        assert_eq!(Rect::enclose_points(&points, Some(&clip)), Some(Rect::new(3, 4, 1, 1)));
        assert_eq!(Rect::enclose_points(&[Point::new(9, 9)], Some(&clip)), None);
        assert_eq!(Rect::enclose_points(&[], None), None);
    }

    #[test]
    fn lines_are_clipped() {
        let rect = Rect::new(0, 0, 10, 10);
        let inside = (Point::new(1, 1), Point::new(8, 8));
        assert_eq!(rect.intersect_line(inside.0, inside.1), Some(inside));
        assert_eq!(
            rect.intersect_line(Point::new(-5, 3), Point::new(20, 3)),
            Some((Point::new(0, 3), Point::new(9, 3)))
        );
        assert_eq!(
            rect.intersect_line(Point::new(4, -5), Point::new(4, 50)),
            Some((Point::new(4, 0), Point::new(4, 9)))
        );
        assert_eq!(
            rect.intersect_line(Point::new(-10, -10), Point::new(20, 20)),
            Some((Point::new(0, 0), Point::new(9, 9)))
        );
        assert_eq!(rect.intersect_line(Point::new(-5, -1), Point::new(5, -20)), None);
        assert_eq!(rect.intersect_line(Point::new(11, 0), Point::new(20, 9)), None);
    }

    #[test]
    fn extreme_lines_do_not_overflow() {
        let rect = Rect::new(i32::MAX - 10, i32::MIN, 10, 10);
        let clipped = rect
            .intersect_line(Point::new(i32::MIN, i32::MAX), Point::new(i32::MAX, i32::MIN))
            .unwrap();
        assert!(rect.contains(&clipped.0) && rect.contains(&clipped.1));
    }
}
