//! Deterministic lattice hash.
//!
//! Pure function of cell coordinates and seed. No state, so fields built on
//! it stay idempotent under parallel sampling.

/// Final avalanche rounds shared by all hash entry points.
pub fn mix(mut state: u32) -> u32 {
    state ^= state >> 16;
    state = state.wrapping_mul(0x45D9F3B);
    state ^= state >> 16;
    state = state.wrapping_mul(0x45D9F3B);
    state ^= state >> 16;
    state
}

/// Hash an integer lattice point and seed into a well-distributed u32.
pub fn hash3(x: i32, y: i32, z: i32, seed: u32) -> u32 {
    let state = (x as u32)
        .wrapping_mul(0x9E3779B9)
        .wrapping_add((y as u32).wrapping_mul(0x517CC1B7))
        .wrapping_add((z as u32).wrapping_mul(0x6C62272E))
        .wrapping_add(seed.wrapping_mul(0x2545F491));
    mix(state)
}

/// Convert a hash value to a float in [0, 1).
pub fn hash_to_unit(hash: u32) -> f32 {
    (hash >> 8) as f32 / 16_777_216.0 // 2^24
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octave_seeds_decorrelate() {
        // Worley octaves reuse the lattice with seed + octave.
        let mut same = 0;
        for x in 0..16 {
            for z in 0..16 {
                if hash3(x, 0, z, 1) == hash3(x, 0, z, 2) {
                    same += 1;
                }
            }
        }
        assert_eq!(same, 0);
    }

    #[test]
    fn test_neighbor_cells_differ() {
        let centre = hash3(3, 3, 3, 9);
        let steps = [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ];
        for (dx, dy, dz) in steps {
            assert_ne!(centre, hash3(3 + dx, 3 + dy, 3 + dz, 9), "({dx}, {dy}, {dz})");
        }
    }

    #[test]
    fn test_jitter_tile_unbiased() {
        // A 64x64 white jitter tile should average close to one half.
        let mut sum = 0.0f64;
        for y in 0..64 {
            for x in 0..64 {
                let v = hash_to_unit(hash3(x, y, 0, 7));
                assert!((0.0..1.0).contains(&v), "out of range: {v}");
                sum += v as f64;
            }
        }
        let mean = sum / 4096.0;
        assert!((mean - 0.5).abs() < 0.03, "biased jitter mean {mean}");
    }

    #[test]
    fn test_unit_upper_bound() {
        assert!(hash_to_unit(u32::MAX) < 1.0);
        assert_eq!(hash_to_unit(0), 0.0);
    }
}
