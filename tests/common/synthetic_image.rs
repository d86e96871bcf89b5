/// Neutral gray background; zero saturation, never rust-colored.
pub const GRAY: [u8; 3] = [128, 128, 128];
/// Flat orange-brown inside every pipeline type's rust bands at sensitivity 0.5.
pub const RUST: [u8; 3] = [180, 80, 30];
/// Weakly saturated brown that only passes the color bands at high sensitivity.
pub const FAINT_RUST: [u8; 3] = [150, 135, 126];
/// Saturated blue, far from any rust hue.
pub const BLUE: [u8; 3] = [30, 60, 160];
/// Base color of textured rust; per-pixel brightness varies, hue does not.
pub const TEXTURED_BASE: [u8; 3] = [200, 90, 30];

/// Tightly packed RGB buffer filled with one color.
pub fn solid_rgb(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    rgb.iter().copied().cycle().take(width * height * 3).collect()
}

/// Paint an axis-aligned `w × h` rectangle with a flat color.
pub fn paint_rect(
    buf: &mut [u8],
    width: usize,
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
    rgb: [u8; 3],
) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let i = (y * width + x) * 3;
            buf[i..i + 3].copy_from_slice(&rgb);
        }
    }
}

/// Paint a rectangle of rough rust: `TEXTURED_BASE` scaled per pixel by a
/// deterministic factor in `[0.5, 1.0]`.
pub fn paint_textured_rust(
    buf: &mut [u8],
    width: usize,
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let factor = 0.5 + 0.5 * unit_noise(x as u32, y as u32);
            let i = (y * width + x) * 3;
            for c in 0..3 {
                buf[i + c] = (TEXTURED_BASE[c] as f32 * factor).round() as u8;
            }
        }
    }
}

/// Paint a rectangle of colorless roughness: gray levels spread over `[60, 200]`.
pub fn paint_rough_gray(
    buf: &mut [u8],
    width: usize,
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            let v = (60.0 + 140.0 * unit_noise(x as u32, y as u32)).round() as u8;
            let i = (y * width + x) * 3;
            buf[i..i + 3].copy_from_slice(&[v, v, v]);
        }
    }
}

/// Gray image with flat square patches `(x, y, side, color)`.
pub fn with_patches(
    width: usize,
    height: usize,
    patches: &[(usize, usize, usize, [u8; 3])],
) -> Vec<u8> {
    let mut buf = solid_rgb(width, height, GRAY);
    for &(x, y, side, rgb) in patches {
        paint_rect(&mut buf, width, x, y, side, side, rgb);
    }
    buf
}

/// A scene mixing flat rust, textured rust, faint rust and a straight seam.
pub fn mixed_scene(width: usize, height: usize) -> Vec<u8> {
    assert!(width >= 120 && height >= 100, "scene needs at least 120x100");
    let mut buf = solid_rgb(width, height, GRAY);
    paint_rect(&mut buf, width, 8, 8, 30, 26, RUST);
    paint_textured_rust(&mut buf, width, 50, 10, 40, 36);
    paint_rect(&mut buf, width, 12, 55, 36, 30, FAINT_RUST);
    // Dark vertical seam: one long straight edge pair.
    paint_rect(&mut buf, width, 100, 0, 4, height, [60, 60, 60]);
    paint_textured_rust(&mut buf, width, 60, 60, 28, 28);
    paint_rect(&mut buf, width, 70, 70, 8, 8, RUST);
    buf
}

/// Expand RGB to RGBA with a row stride padded to `stride` bytes.
pub fn to_rgba_strided(rgb: &[u8], width: usize, height: usize, stride: usize) -> Vec<u8> {
    assert!(stride >= width * 4, "stride too small");
    let mut out = vec![0u8; stride * height];
    for y in 0..height {
        for x in 0..width {
            let src = (y * width + x) * 3;
            let dst = y * stride + x * 4;
            out[dst..dst + 3].copy_from_slice(&rgb[src..src + 3]);
            out[dst + 3] = 255;
        }
    }
    out
}

/// Deterministic hash noise in `[0, 1]`.
pub fn unit_noise(x: u32, y: u32) -> f32 {
    let mut h = x.wrapping_mul(0x9E37_79B1) ^ y.wrapping_mul(0x85EB_CA77);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297A_2D39);
    h ^= h >> 15;
    (h & 0xFFFF) as f32 / 65535.0
}
