//! Rectangle math from the native library.
//!
//! [`Rect`] carries the same operations in pure Rust; these go through the
//! linked library for callers that want its exact answers.

use std::ffi::c_int;
use std::ptr;

use sdl_abi::{Point, Rect};

use crate::error::{Error, Result};

fn is_true(value: sdl_sys::SDL_bool) -> bool {
    value == sdl_sys::SDL_TRUE
}

pub fn has_intersection(a: &Rect, b: &Rect) -> bool {
    // SAFETY: both rects are borrowed for the call.
    is_true(unsafe { sdl_sys::SDL_HasIntersection(a, b) })
}

/// The overlap of `a` and `b`, `None` when it is empty.
pub fn intersect_rect(a: &Rect, b: &Rect) -> Option<Rect> {
    let mut result = Rect::default();
    // SAFETY: borrowed inputs, valid out parameter.
    is_true(unsafe { sdl_sys::SDL_IntersectRect(a, b, &mut result) }).then_some(result)
}

pub fn union_rect(a: &Rect, b: &Rect) -> Rect {
    let mut result = Rect::default();
    // SAFETY: borrowed inputs, valid out parameter.
    unsafe { sdl_sys::SDL_UnionRect(a, b, &mut result) };
    result
}

/// Smallest rect holding every point inside `clip`; `None` when no point
/// qualifies.
pub fn enclose_points(points: &[Point], clip: Option<&Rect>) -> Result<Option<Rect>> {
    let count = c_int::try_from(points.len()).map_err(|_| Error::Sdl {
        message: format!("{} points is too many to enclose", points.len()),
        code: -1,
    })?;
    if count == 0 {
        return Ok(None);
    }
    let clip = clip.map_or(ptr::null(), |clip| clip as *const Rect);
    let mut result = Rect::default();
    // SAFETY: `count` readable points; clip is borrowed or null.
    let found = unsafe { sdl_sys::SDL_EnclosePoints(points.as_ptr(), count, clip, &mut result) };
    Ok(is_true(found).then_some(result))
}

/// The part of the segment from `start` to `end` inside `rect`.
pub fn intersect_rect_and_line(rect: &Rect, start: Point, end: Point) -> Option<(Point, Point)> {
    let (mut x1, mut y1, mut x2, mut y2) = (start.x, start.y, end.x, end.y);
    // SAFETY: borrowed rect, valid in-out coordinates.
    let hit = unsafe {
        sdl_sys::SDL_IntersectRectAndLine(rect, &mut x1, &mut y1, &mut x2, &mut y2)
    };
    is_true(hit).then(|| (Point::new(x1, y1), Point::new(x2, y2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_and_pure_answers_agree() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -5, 10, 10);
        assert!(has_intersection(&a, &b));
        assert_eq!(intersect_rect(&a, &b), a.intersect(&b));
        assert_eq!(intersect_rect(&a, &b), Some(Rect::new(5, 0, 5, 5)));
        assert_eq!(union_rect(&a, &b), Rect::new(0, -5, 15, 15));

        let apart = Rect::new(20, 20, 1, 1);
        assert!(!has_intersection(&a, &apart));
        assert_eq!(intersect_rect(&a, &apart), None);
    }

    #[test]
    fn points_and_lines() {
        let points = [Point::new(3, 4), Point::new(-2, 9), Point::new(7, 1)];
        assert_eq!(enclose_points(&points, None).unwrap(), Some(Rect::new(-2, 1, 10, 9)));
        let clip = Rect::new(0, 0, 5, 5);
        assert_eq!(enclose_points(&points, Some(&clip)).unwrap(), Some(Rect::new(3, 4, 1, 1)));
        assert_eq!(enclose_points(&[], None).unwrap(), None);
        assert_eq!(enclose_points(&[Point::new(50, 50)], Some(&clip)).unwrap(), None);

        let rect = Rect::new(0, 0, 10, 10);
        let clipped = intersect_rect_and_line(&rect, Point::new(-5, 5), Point::new(15, 5));
        assert_eq!(clipped, Some((Point::new(0, 5), Point::new(9, 5))));
        assert_eq!(intersect_rect_and_line(&rect, Point::new(-5, -5), Point::new(-1, -1)), None);
    }

    #[cfg(sdl_stub)]
    #[test]
    fn extreme_rects_stay_in_range() {
        const EXTREME: Rect = Rect::new(i32::MAX - 1, i32::MAX - 1, i32::MAX, i32::MAX);
        let corner = Rect::new(i32::MAX - 1, i32::MAX - 1, 1, 1);
        assert_eq!(intersect_rect(&EXTREME, &corner), Some(corner));
        assert!(has_intersection(&EXTREME, &EXTREME));
        let far = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        let union = union_rect(&EXTREME, &far);
        assert_eq!((union.x, union.y), (i32::MIN, i32::MIN));
        assert_eq!((union.w, union.h), (i32::MAX, i32::MAX));
    }
}
