use glam::Vec3;
use nimbus_core::{NimbusError, Rgb};

/// Linear RGB frame buffer, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Image {
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, NimbusError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(NimbusError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y as usize * self.width as usize + x as usize] = color;
        }
    }

    /// 8-bit RGBA, each channel clamped to [0, 1] and rounded; alpha is opaque.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            let c = (p.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
            out.extend_from_slice(&[c.x as u8, c.y as u8, c.z as u8, 255]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_layout() {
        let img = Image::from_fn(3, 2, |x, y| Vec3::new(x as f32, y as f32, 0.0));
        assert_eq!(img.get(2, 1), Some(Vec3::new(2.0, 1.0, 0.0)));
        assert_eq!(img.pixels()[4], Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(img.get(3, 0), None);
    }

    #[test]
    fn test_from_pixels_checks_len() {
        let err = Image::from_pixels(2, 2, vec![Vec3::ZERO; 3]).unwrap_err();
        assert_eq!(
            err,
            NimbusError::PixelCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_set_ignores_out_of_range() {
        let mut img = Image::new(2, 2, Vec3::ZERO);
        img.set(1, 1, Vec3::ONE);
        img.set(5, 5, Vec3::ONE);
        assert_eq!(img.get(1, 1), Some(Vec3::ONE));
        assert_eq!(img.pixels().iter().filter(|p| **p == Vec3::ONE).count(), 1);
    }

    #[test]
    fn test_to_rgba8_clamps() {
        let img = Image::from_pixels(2, 1, vec![Vec3::new(-1.0, 0.5, 2.0), Vec3::ONE]).expect("valid");
        assert_eq!(img.to_rgba8(), vec![0, 128, 255, 255, 255, 255, 255, 255]);
    }
}
