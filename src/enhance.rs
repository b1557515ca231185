//! Contrast and brightness enhancement of character images.
//!
//! Both adjustments blend the image with a degenerate image by a factor:
//! `out = degenerate + factor * (pixel - degenerate)`. For contrast the
//! degenerate image is flat gray at the image's mean luma, for brightness it
//! is black. A factor of 1.0 returns the input unchanged, 0.0 returns the
//! degenerate image, values above 1.0 push away from it. Results truncate
//! toward zero and clip to `0..=255`.
//!
//! Contrast is applied first, then brightness.

/// Rec. 601 luma of an RGB triple, 16-bit fixed point, rounded.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Mean luma of packed RGB pixels, rounded half up. Empty input is 0.
pub fn mean_luma(rgb: &[u8]) -> u8 {
    let mut sum: u64 = 0;
    let mut n: u64 = 0;
    for px in rgb.chunks_exact(3) {
        sum += luma(px[0], px[1], px[2]) as u64;
        n += 1;
    }
    if n == 0 {
        return 0;
    }
    ((sum * 2 + n) / (2 * n)) as u8
}

#[inline]
fn blend(degenerate: u8, value: u8, factor: f32) -> u8 {
    let d = degenerate as f32;
    let out = d + factor * (value as f32 - d);
    if out <= 0.0 {
        0
    } else if out >= 255.0 {
        255
    } else {
        out as u8
    }
}

fn sanitize(factor: f32) -> f32 {
    if factor.is_nan() { 1.0 } else { factor.max(0.0) }
}

/// Adjust contrast of packed RGB pixels in place.
pub fn adjust_contrast(rgb: &mut [u8], factor: f32) {
    let factor = sanitize(factor);
    if factor == 1.0 {
        return;
    }
    let mean = mean_luma(rgb);
    let len = rgb.len() - rgb.len() % 3;
    for v in &mut rgb[..len] {
        *v = blend(mean, *v, factor);
    }
}

/// Adjust brightness of packed RGB pixels in place.
pub fn adjust_brightness(rgb: &mut [u8], factor: f32) {
    let factor = sanitize(factor);
    if factor == 1.0 {
        return;
    }
    let len = rgb.len() - rgb.len() % 3;
    for v in &mut rgb[..len] {
        *v = blend(0, *v, factor);
    }
}

/// Apply contrast then brightness to packed RGB pixels in place.
///
/// Trailing bytes that do not form a whole pixel are left alone.
/// Negative factors act as 0.0; NaN acts as 1.0.
pub fn enhance_rgb(rgb: &mut [u8], contrast: f32, brightness: f32) {
    adjust_contrast(rgb, contrast);
    adjust_brightness(rgb, brightness);
}

/// Enhance an RGB raster, returning a new image.
#[cfg(feature = "image")]
pub fn enhance(image: &image::RgbImage, contrast: f32, brightness: f32) -> image::RgbImage {
    let mut out = image.clone();
    enhance_rgb(&mut out, contrast, brightness);
    out
}

/// Convert any decoded image to RGB and enhance it.
#[cfg(feature = "image")]
pub fn enhance_dynamic(
    image: &image::DynamicImage,
    contrast: f32,
    brightness: f32,
) -> image::RgbImage {
    let mut out = image.to_rgb8();
    enhance_rgb(&mut out, contrast, brightness);
    out
}
