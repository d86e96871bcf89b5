//! Binary morphology for cleaning the fused mask.
//!
//! The structuring element is a square of side `2 * radius + 1`. Pixels
//! outside the image are ignored rather than treated as set or clear: erosion
//! only asks that every in-bounds neighbour is set, dilation that any is.
//! With that convention erosion and dilation form an adjunction, so opening,
//! closing and `close(open(·))` are idempotent on any mask.
//!
//! Both operators are separable and run as a horizontal then a vertical pass
//! over running counts, so the cost does not depend on the radius.
use crate::image::Mask;

/// Radius of the cleaning element (an 11 × 11 square).
pub const CLEAN_RADIUS: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Op {
    Erode,
    Dilate,
}

/// One-dimensional pass along `len` samples read through `at(i)`.
fn pass_1d(
    len: usize,
    radius: usize,
    op: Op,
    at: impl Fn(usize) -> bool,
    mut out: impl FnMut(usize, bool),
) {
    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(0usize);
    for i in 0..len {
        let last = prefix[i];
        prefix.push(last + at(i) as usize);
    }
    for i in 0..len {
        let lo = i.saturating_sub(radius);
        let hi = (i + radius + 1).min(len);
        let set = prefix[hi] - prefix[lo];
        let on = match op {
            Op::Erode => set == hi - lo,
            Op::Dilate => set > 0,
        };
        out(i, on);
    }
}

fn apply(mask: &Mask, radius: usize, op: Op) -> Mask {
    let (w, h) = (mask.w, mask.h);
    if w == 0 || h == 0 || radius == 0 {
        return mask.clone();
    }
    let mut horizontal = Mask::new(w, h);
    for y in 0..h {
        let row = y * w;
        pass_1d(w, radius, op, |x| mask.is_set(row + x), |x, on| {
            if on {
                horizontal.data[row + x] = Mask::ON;
            }
        });
    }
    let mut out = Mask::new(w, h);
    for x in 0..w {
        pass_1d(h, radius, op, |y| horizontal.is_set(y * w + x), |y, on| {
            if on {
                out.data[y * w + x] = Mask::ON;
            }
        });
    }
    out
}

pub fn erode(mask: &Mask, radius: usize) -> Mask {
    apply(mask, radius, Op::Erode)
}

pub fn dilate(mask: &Mask, radius: usize) -> Mask {
    apply(mask, radius, Op::Dilate)
}

/// Erode then dilate: removes components the element does not fit in.
pub fn open(mask: &Mask, radius: usize) -> Mask {
    dilate(&erode(mask, radius), radius)
}

/// Dilate then erode: fills gaps and holes narrower than the element.
pub fn close(mask: &Mask, radius: usize) -> Mask {
    erode(&dilate(mask, radius), radius)
}

/// Opening followed by closing with the cleaning element.
pub fn clean(mask: &Mask) -> Mask {
    close(&open(mask, CLEAN_RADIUS), CLEAN_RADIUS)
}
