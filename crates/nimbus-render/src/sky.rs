//! Procedural sky backgrounds for hosts (and tests) without a source image.
//! The gradient uses a squared falloff toward the zenith, evaluated per row:
//! t = (1 - v)^2 where v runs from 0 at the top row to 1 at the bottom.

use nimbus_core::Rgb;

use crate::image::Image;

/// Default sky zenith color (deep blue, looking straight up).
pub const DEFAULT_SKY_ZENITH: [f32; 3] = [0.1, 0.15, 0.4];

/// Default sky horizon color (warm haze at the horizon).
pub const DEFAULT_SKY_HORIZON: [f32; 3] = [0.5, 0.45, 0.35];

/// Vertical zenith-to-horizon gradient.
pub fn sky_gradient(width: u32, height: u32, zenith: Rgb, horizon: Rgb) -> Image {
    Image::from_fn(width, height, |_, y| {
        let v = (y as f32 + 0.5) / height as f32;
        let t = (1.0 - v) * (1.0 - v);
        horizon.lerp(zenith, t)
    })
}

/// Gradient with the default colors.
pub fn default_sky(width: u32, height: u32) -> Image {
    sky_gradient(
        width,
        height,
        Rgb::from_array(DEFAULT_SKY_ZENITH),
        Rgb::from_array(DEFAULT_SKY_HORIZON),
    )
}
