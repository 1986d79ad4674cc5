//! Procedural tileable Worley fields.
//!
//! These stand in for authored 3D textures in tests and the bench. Each
//! channel is inverted cellular noise summed over three octaves, with the
//! base cell count doubling per channel. Period is 1 in noise space.

use glam::{IVec3, Vec3, Vec4};

use crate::field::NoiseField;
use crate::hash::{hash3, hash_to_unit, mix};

/// Octave weights for the per-channel fractal sum.
const OCTAVE_WEIGHTS: [f32; 3] = [0.625, 0.25, 0.125];

/// Inverted distance to the nearest feature point on a periodic lattice of
/// `cells` cells per unit. Returns a value in [0, 1].
pub fn worley(uvw: Vec3, cells: u32, seed: u32) -> f32 {
    if !uvw.is_finite() {
        return 0.0;
    }
    let cells = cells.max(1) as i32;
    let p = (uvw - uvw.floor()) * cells as f32;
    let cell = p.floor().as_ivec3();

    let mut min_dist_sq = f32::MAX;
    for dz in -1..=1 {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let neighbor = cell + IVec3::new(dx, dy, dz);
                let wrapped = IVec3::new(
                    neighbor.x.rem_euclid(cells),
                    neighbor.y.rem_euclid(cells),
                    neighbor.z.rem_euclid(cells),
                );
                let feature = neighbor.as_vec3() + feature_offset(wrapped, seed);
                min_dist_sq = min_dist_sq.min(feature.distance_squared(p));
            }
        }
    }
    1.0 - min_dist_sq.sqrt().min(1.0)
}

fn feature_offset(cell: IVec3, seed: u32) -> Vec3 {
    let h0 = hash3(cell.x, cell.y, cell.z, seed);
    let h1 = mix(h0 ^ 0x68E31DA4);
    let h2 = mix(h1 ^ 0xB5297A4D);
    Vec3::new(hash_to_unit(h0), hash_to_unit(h1), hash_to_unit(h2))
}

fn worley_fbm(uvw: Vec3, cells: u32, seed: u32) -> f32 {
    OCTAVE_WEIGHTS
        .iter()
        .enumerate()
        .map(|(octave, w)| w * worley(uvw, cells << octave, seed.wrapping_add(octave as u32)))
        .sum()
}

/// 4-channel procedural shape field, low to high frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorleyShape {
    pub base_cells: u32,
    pub seed: u32,
}

impl Default for WorleyShape {
    fn default() -> Self {
        Self {
            base_cells: 3,
            seed: 1,
        }
    }
}

impl NoiseField for WorleyShape {
    type Value = Vec4;

    fn sample(&self, uvw: Vec3) -> Vec4 {
        let c = self.base_cells.max(1);
        Vec4::new(
            worley_fbm(uvw, c, self.seed),
            worley_fbm(uvw, c * 2, self.seed.wrapping_add(16)),
            worley_fbm(uvw, c * 4, self.seed.wrapping_add(32)),
            worley_fbm(uvw, c * 8, self.seed.wrapping_add(48)),
        )
    }
}

/// 3-channel procedural detail field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorleyDetail {
    pub base_cells: u32,
    pub seed: u32,
}

impl Default for WorleyDetail {
    fn default() -> Self {
        Self {
            base_cells: 6,
            seed: 101,
        }
    }
}

impl NoiseField for WorleyDetail {
    type Value = Vec3;

    fn sample(&self, uvw: Vec3) -> Vec3 {
        let c = self.base_cells.max(1);
        Vec3::new(
            worley_fbm(uvw, c, self.seed),
            worley_fbm(uvw, c * 2, self.seed.wrapping_add(16)),
            worley_fbm(uvw, c * 4, self.seed.wrapping_add(32)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worley_range() {
        for i in 0..200 {
            let p = Vec3::new(i as f32 * 0.013, i as f32 * 0.029, i as f32 * 0.007);
            let v = worley(p, 4, 9);
            assert!((0.0..=1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn test_worley_tiles_with_period_one() {
        let p = Vec3::new(0.31, 0.77, 0.12);
        let a = worley(p, 5, 2);
        let b = worley(p + Vec3::new(1.0, -2.0, 3.0), 5, 2);
        assert!((a - b).abs() < 1e-4, "{a} vs {b}");
    }

    #[test]
    fn test_worley_non_finite() {
        assert_eq!(worley(Vec3::splat(f32::NAN), 4, 0), 0.0);
    }

    #[test]
    fn test_worley_varies() {
        let a = worley(Vec3::new(0.1, 0.1, 0.1), 4, 0);
        let mut differs = false;
        for i in 1..20 {
            let b = worley(Vec3::new(0.1 + i as f32 * 0.05, 0.1, 0.1), 4, 0);
            if (a - b).abs() > 1e-3 {
                differs = true;
            }
        }
        assert!(differs, "worley should not be constant");
    }

    #[test]
    fn test_shape_deterministic() {
        let shape = WorleyShape::default();
        let p = Vec3::new(0.4, 0.6, 0.2);
        assert_eq!(shape.sample(p), shape.sample(p));
    }

    #[test]
    fn test_fbm_weights_bound_channels() {
        let detail = WorleyDetail::default();
        let v = detail.sample(Vec3::new(0.7, 0.3, 0.9));
        assert!(v.min_element() >= 0.0);
        assert!(v.max_element() <= 1.0 + 1e-6);
    }

    #[test]
    fn test_feature_offsets_stay_in_cell() {
        for z in 0..4 {
            for y in 0..4 {
                for x in 0..4 {
                    let o = feature_offset(IVec3::new(x, y, z), 5);
                    assert!(o.cmpge(Vec3::ZERO).all() && o.cmplt(Vec3::ONE).all(), "{o}");
                    assert_ne!(o, feature_offset(IVec3::new(x, y, z), 6));
                }
            }
        }
    }

    #[test]
    fn test_worley_continuous_across_seam() {
        // The last cell's neighbour wraps to cell 0, so both sides of the
        // period boundary see the same feature points.
        let eps = 1e-4;
        for (y, z) in [(0.13, 0.71), (0.5, 0.5), (0.92, 0.04)] {
            let below = worley(Vec3::new(1.0 - eps, y, z), 4, 3);
            let above = worley(Vec3::new(eps, y, z), 4, 3);
            assert!((below - above).abs() < 1e-2, "seam jump {below} vs {above}");
        }
    }
}
