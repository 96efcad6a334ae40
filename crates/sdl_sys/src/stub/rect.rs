use std::ffi::c_int;
use std::slice;

use sdl_abi::{Point, Rect};

use super::error::set_error;
use crate::{SDL_bool, SDL_FALSE, SDL_TRUE};

fn truth(value: bool) -> SDL_bool {
    if value {
        SDL_TRUE
    } else {
        SDL_FALSE
    }
}

/// Resolves both operands, naming the first null one in the error string.
unsafe fn operands<'a>(a: *const Rect, b: *const Rect) -> Option<(&'a Rect, &'a Rect)> {
    // SAFETY: caller passes readable rects or null.
    match unsafe { (a.as_ref(), b.as_ref()) } {
        (Some(a), Some(b)) => Some((a, b)),
        (None, _) => {
            set_error("Parameter 'A' is invalid");
            None
        }
        (_, None) => {
            set_error("Parameter 'B' is invalid");
            None
        }
    }
}

#[no_mangle]
pub unsafe extern "C" fn SDL_HasIntersection(a: *const Rect, b: *const Rect) -> SDL_bool {
    match unsafe { operands(a, b) } {
        Some((a, b)) => truth(a.has_intersection(b)),
        None => SDL_FALSE,
    }
}

/// Leaves an empty rect in `result` when nothing overlaps.
#[no_mangle]
pub unsafe extern "C" fn SDL_IntersectRect(
    a: *const Rect,
    b: *const Rect,
    result: *mut Rect,
) -> SDL_bool {
    let Some((a, b)) = (unsafe { operands(a, b) }) else {
        return SDL_FALSE;
    };
    // SAFETY: caller passes a writable rect or null.
    let Some(result) = (unsafe { result.as_mut() }) else {
        set_error("Parameter 'result' is invalid");
        return SDL_FALSE;
    };
    let overlap = a.intersect(b);
    *result = overlap.unwrap_or_default();
    truth(overlap.is_some())
}

#[no_mangle]
pub unsafe extern "C" fn SDL_UnionRect(a: *const Rect, b: *const Rect, result: *mut Rect) {
    let Some((a, b)) = (unsafe { operands(a, b) }) else {
        return;
    };
    // SAFETY: caller passes a writable rect or null.
    match unsafe { result.as_mut() } {
        Some(result) => *result = a.union(b),
        None => {
            set_error("Parameter 'result' is invalid");
        }
    }
}

/// `result` may be null when only the answer is wanted.
#[no_mangle]
pub unsafe extern "C" fn SDL_EnclosePoints(
    points: *const Point,
    count: c_int,
    clip: *const Rect,
    result: *mut Rect,
) -> SDL_bool {
    if points.is_null() {
        set_error("Parameter 'points' is invalid");
        return SDL_FALSE;
    }
    let Ok(len) = usize::try_from(count) else {
        set_error("Parameter 'count' is invalid");
        return SDL_FALSE;
    };
    if len == 0 {
        set_error("Parameter 'count' is invalid");
        return SDL_FALSE;
    }
    // SAFETY: caller passes `count` readable points.
    let points = unsafe { slice::from_raw_parts(points, len) };
    // SAFETY: caller passes a readable rect or null.
    let clip = unsafe { clip.as_ref() };
    let Some(bounds) = Rect::enclose_points(points, clip) else {
        return SDL_FALSE;
    };
    // SAFETY: caller passes a writable rect or null.
    if let Some(result) = unsafe { result.as_mut() } {
        *result = bounds;
    }
    SDL_TRUE
}

/// Rewrites the endpoints in place with the clipped segment.
#[no_mangle]
pub unsafe extern "C" fn SDL_IntersectRectAndLine(
    rect: *const Rect,
    x1: *mut c_int,
    y1: *mut c_int,
    x2: *mut c_int,
    y2: *mut c_int,
) -> SDL_bool {
    // SAFETY: caller passes a readable rect and writable coordinates, or null.
    let (Some(rect), Some(x1), Some(y1), Some(x2), Some(y2)) =
        (unsafe { (rect.as_ref(), x1.as_mut(), y1.as_mut(), x2.as_mut(), y2.as_mut()) })
    else {
        set_error("Parameter 'rect' or a coordinate is invalid");
        return SDL_FALSE;
    };
    match rect.intersect_line(Point::new(*x1, *y1), Point::new(*x2, *y2)) {
        Some((start, end)) => {
            (*x1, *y1, *x2, *y2) = (start.x, start.y, end.x, end.y);
            SDL_TRUE
        }
        None => SDL_FALSE,
    }
}
