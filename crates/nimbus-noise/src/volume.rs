use glam::{UVec3, Vec3, Vec4};
use rayon::prelude::*;

use crate::error::NoiseError;
use crate::field::NoiseField;

/// Dense 3D noise grid with `C` channels per voxel.
///
/// Sampling uses repeat addressing and trilinear filtering, so noise-space
/// coordinates tile with period 1 on every axis.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseVolume<const C: usize> {
    size: UVec3,
    voxels: Vec<[f32; C]>,
}

impl<const C: usize> NoiseVolume<C> {
    /// Wrap voxel data laid out x-fastest, then y, then z.
    pub fn from_voxels(size: UVec3, voxels: Vec<[f32; C]>) -> Result<Self, NoiseError> {
        if size.min_element() == 0 {
            return Err(NoiseError::ZeroDimension(size.x, size.y, size.z));
        }
        let expected = voxel_count(size);
        if voxels.len() != expected {
            return Err(NoiseError::VoxelCountMismatch {
                expected,
                actual: voxels.len(),
            });
        }
        Ok(Self { size, voxels })
    }

    /// Decode 8-bit texel bytes (e.g. an RGBA8 3D texture). The first `C`
    /// bytes of every `stride`-byte texel become channels mapped to [0, 1].
    pub fn from_texels(size: UVec3, bytes: &[u8], stride: usize) -> Result<Self, NoiseError> {
        if stride < C {
            return Err(NoiseError::StrideTooSmall {
                stride,
                channels: C,
            });
        }
        if size.min_element() == 0 {
            return Err(NoiseError::ZeroDimension(size.x, size.y, size.z));
        }
        let expected = voxel_count(size) * stride;
        if bytes.len() != expected {
            return Err(NoiseError::TexelByteMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let voxels = bytes
            .chunks_exact(stride)
            .map(|texel| std::array::from_fn(|c| texel[c] as f32 / 255.0))
            .collect();
        Self::from_voxels(size, voxels)
    }

    /// Evaluate `field` at every voxel centre.
    pub fn bake<F>(field: &F, size: UVec3) -> Result<Self, NoiseError>
    where
        F: NoiseField + ?Sized,
        F::Value: Into<[f32; C]>,
    {
        if size.min_element() == 0 {
            return Err(NoiseError::ZeroDimension(size.x, size.y, size.z));
        }
        let inv = Vec3::ONE / size.as_vec3();
        let slice = (size.x * size.y) as usize;
        let mut voxels = vec![[0.0f32; C]; voxel_count(size)];
        voxels
            .par_chunks_mut(slice)
            .enumerate()
            .for_each(|(z, plane)| {
                for (i, voxel) in plane.iter_mut().enumerate() {
                    let x = (i as u32) % size.x;
                    let y = (i as u32) / size.x;
                    let uvw = (Vec3::new(x as f32, y as f32, z as f32) + 0.5) * inv;
                    *voxel = field.sample(uvw).into();
                }
            });
        log::debug!("baked {}x{}x{} noise volume", size.x, size.y, size.z);
        Ok(Self { size, voxels })
    }

    pub fn size(&self) -> UVec3 {
        self.size
    }

    /// Raw voxel at wrapped integer coordinates.
    pub fn voxel(&self, x: i64, y: i64, z: i64) -> [f32; C] {
        let sx = self.size.x as i64;
        let sy = self.size.y as i64;
        let sz = self.size.z as i64;
        let ix = x.rem_euclid(sx);
        let iy = y.rem_euclid(sy);
        let iz = z.rem_euclid(sz);
        self.voxels[(ix + iy * sx + iz * sx * sy) as usize]
    }

    /// Trilinear sample with repeat addressing. Non-finite input yields zeros.
    pub fn sample_channels(&self, uvw: Vec3) -> [f32; C] {
        if !uvw.is_finite() {
            return [0.0; C];
        }
        // Reduce to one period first so large offsets keep sub-voxel precision.
        let p = (uvw - uvw.floor()) * self.size.as_vec3() - 0.5;
        let base = p.floor();
        let f = p - base;
        let (x0, y0, z0) = (base.x as i64, base.y as i64, base.z as i64);

        let mut out = [0.0f32; C];
        for dz in 0..2i64 {
            let wz = if dz == 0 { 1.0 - f.z } else { f.z };
            for dy in 0..2i64 {
                let wy = if dy == 0 { 1.0 - f.y } else { f.y };
                for dx in 0..2i64 {
                    let wx = if dx == 0 { 1.0 - f.x } else { f.x };
                    let w = wx * wy * wz;
                    let v = self.voxel(x0 + dx, y0 + dy, z0 + dz);
                    for c in 0..C {
                        out[c] += v[c] * w;
                    }
                }
            }
        }
        out
    }
}

fn voxel_count(size: UVec3) -> usize {
    size.x as usize * size.y as usize * size.z as usize
}

impl NoiseField for NoiseVolume<4> {
    type Value = Vec4;

    fn sample(&self, uvw: Vec3) -> Vec4 {
        Vec4::from_array(self.sample_channels(uvw))
    }
}

impl NoiseField for NoiseVolume<3> {
    type Value = Vec3;

    fn sample(&self, uvw: Vec3) -> Vec3 {
        Vec3::from_array(self.sample_channels(uvw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::UniformNoise;

    fn ramp_x(size: u32) -> NoiseVolume<3> {
        let size3 = UVec3::splat(size);
        let mut voxels = Vec::new();
        for _z in 0..size {
            for _y in 0..size {
                for x in 0..size {
                    voxels.push([x as f32, 0.0, 1.0]);
                }
            }
        }
        NoiseVolume::from_voxels(size3, voxels).expect("valid volume")
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = NoiseVolume::<4>::from_voxels(UVec3::new(0, 2, 2), vec![]).unwrap_err();
        assert_eq!(err, NoiseError::ZeroDimension(0, 2, 2));
    }

    #[test]
    fn test_voxel_count_checked() {
        let err = NoiseVolume::<3>::from_voxels(UVec3::splat(2), vec![[0.0; 3]; 7]).unwrap_err();
        assert_eq!(
            err,
            NoiseError::VoxelCountMismatch {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_sample_at_voxel_centre_is_exact() {
        let vol = ramp_x(4);
        // Voxel 2 centre sits at u = 2.5 / 4.
        let v = vol.sample_channels(Vec3::new(2.5 / 4.0, 0.125, 0.125));
        assert!((v[0] - 2.0).abs() < 1e-5, "got {}", v[0]);
        assert!((v[2] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sample_interpolates_between_centres() {
        let vol = ramp_x(4);
        let v = vol.sample_channels(Vec3::new(2.0 / 4.0, 0.125, 0.125));
        assert!((v[0] - 1.5).abs() < 1e-5, "got {}", v[0]);
    }

    #[test]
    fn test_repeat_addressing() {
        let vol = ramp_x(4);
        let a = vol.sample(Vec3::new(0.3, 0.2, 0.7));
        let b = vol.sample(Vec3::new(5.3, -3.8, 2.7));
        assert!((a - b).abs().max_element() < 1e-4);
    }

    #[test]
    fn test_non_finite_sample_is_zero() {
        let vol = ramp_x(2);
        assert_eq!(vol.sample(Vec3::new(f32::NAN, 0.0, 0.0)), Vec3::ZERO);
        assert_eq!(vol.sample(Vec3::splat(f32::INFINITY)), Vec3::ZERO);
    }

    #[test]
    fn test_from_texels_rgba() {
        let bytes = vec![255u8, 0, 51, 7, 0, 255, 0, 9];
        let vol = NoiseVolume::<3>::from_texels(UVec3::new(2, 1, 1), &bytes, 4).expect("valid");
        assert_eq!(vol.voxel(0, 0, 0), [1.0, 0.0, 0.2]);
        assert_eq!(vol.voxel(1, 0, 0), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_from_texels_rejects_short_stride() {
        let err = NoiseVolume::<4>::from_texels(UVec3::ONE, &[0, 0, 0], 3).unwrap_err();
        assert_eq!(
            err,
            NoiseError::StrideTooSmall {
                stride: 3,
                channels: 4
            }
        );
    }

    #[test]
    fn test_bake_uniform_field() {
        let field = UniformNoise(Vec4::new(0.25, 0.5, 0.75, 1.0));
        let vol = NoiseVolume::<4>::bake(&field, UVec3::new(3, 2, 5)).expect("bake");
        assert_eq!(vol.size(), UVec3::new(3, 2, 5));
        let s = vol.sample(Vec3::new(0.9, 0.1, 0.4));
        assert!((s - field.0).abs().max_element() < 1e-6);
    }
}
