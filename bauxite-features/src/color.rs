//! Color space conversions.

use image::Rgb;

/// Converts an RGB pixel to (hue, saturation, lightness).
///
/// Hue is in degrees `[0, 360)` with 0 for achromatic pixels; saturation
/// and lightness are in `[0, 1]`.
pub fn rgb_to_hsl(pixel: &Rgb<u8>) -> (f64, f64, f64) {
    let r = pixel[0] as f64 / 255.0;
    let g = pixel[1] as f64 / 255.0;
    let b = pixel[2] as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, lightness);
    }

    let delta = max - min;
    let saturation = if lightness <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let mut hue = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    hue *= 60.0;
    if hue < 0.0 {
        hue += 360.0;
    }

    (hue, saturation, lightness)
}

/// Luma of an RGB pixel as `0.3 R + 0.59 G + 0.11 B`, truncated.
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    (pixel[0] as f64 * 0.3 + pixel[1] as f64 * 0.59 + pixel[2] as f64 * 0.11) as u8
}
