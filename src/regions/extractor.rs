//! Connected-component extraction over the cleaned mask.
//!
//! Components are 8-connected and discovered in raster order of their first
//! pixel, so for a fixed mask the output is fully deterministic.
use crate::image::Mask;
use crate::types::{BoundingBox, Centroid, ShapeMetrics};
use nalgebra::{Matrix2, SymmetricEigen};
use std::f32::consts::PI;

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Variance of a unit pixel along one axis; keeps one-pixel-wide components
/// from producing a zero minor axis.
const PIXEL_VARIANCE: f64 = 1.0 / 12.0;

/// A component that survived the area filter.
#[derive(Clone, Debug)]
pub struct RegionCandidate {
    pub bbox: BoundingBox,
    pub centroid: Centroid,
    pub area: u32,
    /// Flat pixel indices (`y * w + x`) in discovery order.
    pub pixels: Vec<usize>,
    pub shape: ShapeMetrics,
}

/// Output of [`extract_regions`].
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    pub candidates: Vec<RegionCandidate>,
    /// Components found before the area filter.
    pub components: usize,
}

struct ComponentAccumulator {
    pixels: Vec<usize>,
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
    sum_x: f64,
    sum_y: f64,
    sum_xx: f64,
    sum_yy: f64,
    sum_xy: f64,
}

impl ComponentAccumulator {
    fn new() -> Self {
        Self {
            pixels: Vec::with_capacity(256),
            min_x: usize::MAX,
            min_y: usize::MAX,
            max_x: 0,
            max_y: 0,
            sum_x: 0.0,
            sum_y: 0.0,
            sum_xx: 0.0,
            sum_yy: 0.0,
            sum_xy: 0.0,
        }
    }

    fn reset(&mut self) {
        self.pixels.clear();
        self.min_x = usize::MAX;
        self.min_y = usize::MAX;
        self.max_x = 0;
        self.max_y = 0;
        self.sum_x = 0.0;
        self.sum_y = 0.0;
        self.sum_xx = 0.0;
        self.sum_yy = 0.0;
        self.sum_xy = 0.0;
    }

    fn push(&mut self, idx: usize, x: usize, y: usize) {
        self.pixels.push(idx);
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        let (xf, yf) = (x as f64, y as f64);
        self.sum_x += xf;
        self.sum_y += yf;
        self.sum_xx += xf * xf;
        self.sum_yy += yf * yf;
        self.sum_xy += xf * yf;
    }

    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn bbox(&self) -> BoundingBox {
        BoundingBox {
            x: self.min_x as u32,
            y: self.min_y as u32,
            width: (self.max_x - self.min_x + 1) as u32,
            height: (self.max_y - self.min_y + 1) as u32,
        }
    }

    fn centroid(&self) -> (f64, f64) {
        let n = self.len() as f64;
        (self.sum_x / n, self.sum_y / n)
    }

    /// Square root of the covariance eigenvalue ratio.
    fn elongation(&self) -> f32 {
        let n = self.len() as f64;
        let (cx, cy) = self.centroid();
        let cxx = (self.sum_xx / n - cx * cx).max(0.0) + PIXEL_VARIANCE;
        let cyy = (self.sum_yy / n - cy * cy).max(0.0) + PIXEL_VARIANCE;
        let cxy = self.sum_xy / n - cx * cy;
        let eig = SymmetricEigen::new(Matrix2::new(cxx, cxy, cxy, cyy));
        let (a, b) = (eig.eigenvalues[0], eig.eigenvalues[1]);
        let (major, minor) = if a >= b { (a, b) } else { (b, a) };
        if !major.is_finite() || minor <= 0.0 {
            return 1.0;
        }
        (major / minor).sqrt().max(1.0) as f32
    }

    fn to_candidate(&self, perimeter: usize) -> RegionCandidate {
        let bbox = self.bbox();
        let (cx, cy) = self.centroid();
        let area = self.len();
        let long = bbox.width.max(bbox.height) as f32;
        let short = bbox.width.min(bbox.height) as f32;
        let circularity = if perimeter > 0 {
            (4.0 * PI * area as f32 / (perimeter * perimeter) as f32).min(1.0)
        } else {
            0.0
        };
        RegionCandidate {
            bbox,
            centroid: Centroid {
                x: cx as f32,
                y: cy as f32,
            },
            area: area as u32,
            pixels: self.pixels.clone(),
            shape: ShapeMetrics {
                perimeter_px: perimeter as u32,
                circularity,
                aspect_ratio: long / short,
                extent: area as f32 / bbox.area() as f32,
                elongation: self.elongation(),
            },
        }
    }
}

/// Label 8-connected components of `mask` and keep those with at least
/// `min_area` pixels.
pub fn extract_regions(mask: &Mask, min_area: u32) -> Extraction {
    let (w, h) = (mask.w, mask.h);
    let mut labels = vec![0u32; w * h];
    let mut next_label = 0u32;
    let mut stack: Vec<usize> = Vec::with_capacity(64);
    let mut component = ComponentAccumulator::new();
    let mut out = Extraction::default();

    for start in 0..w * h {
        if !mask.is_set(start) || labels[start] != 0 {
            continue;
        }
        next_label += 1;
        component.reset();
        labels[start] = next_label;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % w, idx / w);
            component.push(idx, x, y);
            for (dx, dy) in NEIGH_OFFSETS {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if mask.is_set(nidx) && labels[nidx] == 0 {
                    labels[nidx] = next_label;
                    stack.push(nidx);
                }
            }
        }

        out.components += 1;
        if component.len() < min_area as usize {
            continue;
        }
        let perimeter = boundary_pixels(&component.pixels, &labels, next_label, w, h);
        out.candidates.push(component.to_candidate(perimeter));
    }
    out
}

/// Pixels of the labelled component with a 4-neighbour outside it (image
/// borders count as outside).
fn boundary_pixels(pixels: &[usize], labels: &[u32], label: u32, w: usize, h: usize) -> usize {
    pixels
        .iter()
        .filter(|&&idx| {
            let (x, y) = (idx % w, idx / w);
            x == 0
                || y == 0
                || x + 1 == w
                || y + 1 == h
                || labels[idx - 1] != label
                || labels[idx + 1] != label
                || labels[idx - w] != label
                || labels[idx + w] != label
        })
        .count()
}
