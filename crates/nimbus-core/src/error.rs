use thiserror::Error;

/// Errors surfaced by the frame-level render entry points.
///
/// The per-pixel kernel itself is total and never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NimbusError {
    #[error("destination is {dest_width}x{dest_height}, background is {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        dest_width: u32,
        dest_height: u32,
    },

    #[error("image buffer holds {actual} pixels, expected {expected}")]
    PixelCountMismatch { expected: usize, actual: usize },
}
