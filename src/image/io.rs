//! I/O helpers for color images, masks and JSON.
//!
//! These sit outside the detector; the engine itself only sees borrowed views.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned 8-bit RGB buffer.
//! - `fit_within`: aspect-preserving downscale to a bounding size (never upscales).
//! - `save_mask_png`: write a [`Mask`] as an 8-bit grayscale PNG.
//! - `render_overlay` / `save_rgb_png`: draw severity-coloured region boxes.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ColorImageU8, Mask};
use crate::error::IoError;
use crate::types::{Region, Severity};
use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Box outline thickness in pixels.
const OVERLAY_THICKNESS: u32 = 2;

/// Owned, tightly packed 8-bit RGB buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbImageU8 {
    /// Wrap raw RGB bytes; returns `None` if `data` is not `3 * width * height` long.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * 3).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Borrow as a read-only view for the detector.
    pub fn as_view(&self) -> ColorImageU8<'_> {
        ColorImageU8::rgb(self.width, self.height, &self.data)
    }

    fn to_rgb_image(&self) -> Option<RgbImage> {
        RgbImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
    }

    fn from_rgb_image(img: RgbImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// Load an image from disk and convert to 8-bit RGB (alpha dropped).
pub fn load_rgb_image(path: &Path) -> Result<RgbImageU8, IoError> {
    let img = image::open(path)
        .map_err(|source| IoError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();
    Ok(RgbImageU8::from_rgb_image(img))
}

/// Target size for fitting `(width, height)` inside `(max_w, max_h)`.
pub fn fitted_size(width: usize, height: usize, max_w: usize, max_h: usize) -> (usize, usize) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    let scale = (max_w as f64 / width as f64)
        .min(max_h as f64 / height as f64)
        .min(1.0);
    if scale >= 1.0 {
        return (width, height);
    }
    let w = ((width as f64 * scale) as usize).max(1);
    let h = ((height as f64 * scale) as usize).max(1);
    (w, h)
}

/// Downscale so the image fits within `max_w × max_h`, keeping aspect ratio.
pub fn fit_within(image: &RgbImageU8, max_w: usize, max_h: usize) -> RgbImageU8 {
    let (w, h) = fitted_size(image.width, image.height, max_w, max_h);
    if (w, h) == (image.width, image.height) {
        return image.clone();
    }
    match image.to_rgb_image() {
        Some(src) => RgbImageU8::from_rgb_image(imageops::resize(
            &src,
            w as u32,
            h as u32,
            FilterType::Triangle,
        )),
        None => image.clone(),
    }
}

/// Save a binary mask as an 8-bit grayscale PNG (set pixels are white).
pub fn save_mask_png(mask: &Mask, path: &Path) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let out = GrayImage::from_raw(mask.w as u32, mask.h as u32, mask.data.clone()).ok_or_else(
        || IoError::Buffer {
            path: path.to_path_buf(),
        },
    )?;
    out.save(path).map_err(|source| IoError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Outline color per severity.
pub fn severity_color(severity: Severity) -> [u8; 3] {
    match severity {
        Severity::Critical => [255, 0, 0],
        Severity::High => [255, 165, 0],
        Severity::Medium => [255, 255, 0],
        Severity::Low => [0, 255, 0],
    }
}

/// Copy of `image` with each region's bounding box outlined in its severity color.
pub fn render_overlay(image: &RgbImageU8, regions: &[Region]) -> RgbImageU8 {
    let mut out = image.clone();
    let (w, h) = (out.width as u32, out.height as u32);
    // Least severe first so severe boxes stay on top where they overlap.
    let mut ordered: Vec<&Region> = regions.iter().collect();
    ordered.sort_by_key(|r| r.severity);
    for region in ordered {
        let color = severity_color(region.severity);
        let bbox = region.bounding_box;
        let (x0, y0) = (bbox.x, bbox.y);
        let x1 = bbox.right().min(w);
        let y1 = bbox.bottom().min(h);
        for y in y0..y1 {
            for x in x0..x1 {
                let on_edge = x < x0 + OVERLAY_THICKNESS
                    || y < y0 + OVERLAY_THICKNESS
                    || x + OVERLAY_THICKNESS >= x1
                    || y + OVERLAY_THICKNESS >= y1;
                if on_edge {
                    let i = (y as usize * out.width + x as usize) * 3;
                    out.data[i..i + 3].copy_from_slice(&color);
                }
            }
        }
    }
    out
}

/// Save an owned RGB buffer as PNG (or any format implied by the extension).
pub fn save_rgb_png(image: &RgbImageU8, path: &Path) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let out = image.to_rgb_image().ok_or_else(|| IoError::Buffer {
        path: path.to_path_buf(),
    })?;
    out.save(path).map_err(|source| IoError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| IoError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
