//! The color-keying algorithm.
//!
//! Keying replaces every pixel whose RGB value lies within a Manhattan
//! distance of the key color with fully transparent black `(0, 0, 0, 0)`.
//! The key color is either supplied by the caller or auto-detected from
//! the top-left pixel of the image.

use image::{DynamicImage, Rgba, RgbaImage};

use crate::color::{Color, Tolerance};

/// Sample the top-left pixel of a normalized image as the key color.
///
/// The alpha channel at (0, 0) is discarded. Single-channel sources reach
/// this point with their intensity already replicated across R, G, B by
/// the RGBA conversion, so grayscale images key on that intensity.
#[must_use]
pub fn detect_key_color(image: &RgbaImage) -> Color {
    let px = image.get_pixel(0, 0);
    Color::new(px[0], px[1], px[2])
}

/// Replace pixels matching the key color (within tolerance) with transparency.
///
/// The image is normalized to 8-bit RGBA first; images without an alpha
/// channel gain a fully opaque one. When `key_color` is `None` the key is
/// auto-detected once per image via [`detect_key_color`], never per pixel.
///
/// Matching compares RGB only. A pixel is replaced iff its Manhattan
/// distance to the key is `<= tolerance` (inclusive boundary), regardless
/// of its alpha value. Replaced pixels become `(0, 0, 0, 0)`.
///
/// Returns the keyed image, the key color actually used, and the number
/// of pixels replaced.
#[must_use]
pub fn color_key(
    image: &DynamicImage,
    key_color: Option<Color>,
    tolerance: Tolerance,
) -> (RgbaImage, Color, u64) {
    let mut rgba = image.to_rgba8();
    let key = key_color.unwrap_or_else(|| detect_key_color(&rgba));

    let mut replaced = 0u64;
    // pixels_mut walks the buffer in row-major order; the scan must be
    // exhaustive and deterministic so counts are reproducible.
    for px in rgba.pixels_mut() {
        let distance = key.distance(Color::new(px[0], px[1], px[2]));
        if distance <= tolerance.get() {
            *px = Rgba([0, 0, 0, 0]);
            replaced += 1;
        }
    }

    (rgba, key, replaced)
}
