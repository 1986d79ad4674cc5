/// Errors raised while wrapping host-provided noise data.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NoiseError {
    #[error("noise dimensions must be non-zero, got {0}x{1}x{2}")]
    ZeroDimension(u32, u32, u32),

    #[error("expected {expected} voxels, got {actual}")]
    VoxelCountMismatch { expected: usize, actual: usize },

    #[error("texel stride {stride} is smaller than the {channels} channels required")]
    StrideTooSmall { stride: usize, channels: usize },

    #[error("texel data is {actual} bytes, expected {expected}")]
    TexelByteMismatch { expected: usize, actual: usize },
}
