use crate::error::NoiseError;
use crate::hash::{hash3, hash_to_unit};

/// 2D tiling scalar tile addressed by screen pixel, values in [0, 1].
///
/// Used only to offset the primary march start per pixel. The value for a
/// pixel is fixed, so the dither pattern is stable from frame to frame.
#[derive(Debug, Clone, PartialEq)]
pub struct JitterTile {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl JitterTile {
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self, NoiseError> {
        if width == 0 || height == 0 {
            return Err(NoiseError::ZeroDimension(width, height, 1));
        }
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(NoiseError::VoxelCountMismatch {
                expected,
                actual: values.len(),
            });
        }
        let values = values
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
            .collect();
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Wrap an 8-bit single-channel texture.
    pub fn from_luma8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, NoiseError> {
        let values = bytes.iter().map(|&b| b as f32 / 255.0).collect();
        Self::new(width, height, values)
    }

    /// Ordered-dither (Bayer) matrix of side `2^order`, values at cell centres.
    pub fn bayer(order: u32) -> Self {
        let order = order.clamp(1, 6);
        let side = 1u32 << order;
        let n = (side * side) as f32;
        let mut values = Vec::with_capacity((side * side) as usize);
        for y in 0..side {
            for x in 0..side {
                values.push((bayer_index(x, y, order) as f32 + 0.5) / n);
            }
        }
        Self {
            width: side,
            height: side,
            values,
        }
    }

    /// Hash-based white noise tile. Fallback when no authored blue-noise tile is available.
    pub fn white(side: u32, seed: u32) -> Self {
        let side = side.max(1);
        let values = (0..side * side)
            .map(|i| hash_to_unit(hash3((i % side) as i32, (i / side) as i32, 0, seed)))
            .collect();
        Self {
            width: side,
            height: side,
            values,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tile value at a screen pixel, wrapping in both directions.
    pub fn sample(&self, x: u32, y: u32) -> f32 {
        let tx = x % self.width;
        let ty = y % self.height;
        self.values[(ty * self.width + tx) as usize]
    }
}

/// Bayer rank by interleaving `x ^ y` and `y`. The lowest coordinate bits
/// land in the most significant pair, so neighbours differ the most.
fn bayer_index(x: u32, y: u32, order: u32) -> u32 {
    let mut index = 0;
    for bit in 0..order {
        let bx = (x >> bit) & 1;
        let by = (y >> bit) & 1;
        index = (index << 2) | (((bx ^ by) << 1) | by);
    }
    index
}
