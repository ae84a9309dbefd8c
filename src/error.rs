//! Error type shared by construction and pixel access.

use crate::{ImageDtype, LimitExceeded};

/// Errors from image construction and pixel access.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ImageError {
    /// Pixel get/set/fill on the null image. There is no storage to address.
    #[error("cannot set or get values for null image")]
    NullImage,
    /// Coordinate lies outside the image.
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// Pixel value does not match the image's format.
    #[error("expected {expected} pixel, got {actual}")]
    PixelMismatch {
        expected: ImageDtype,
        actual: ImageDtype,
    },
    /// Format name not recognized.
    #[error("unknown image dtype {0:?}")]
    UnknownDtype(String),
    /// Storage for the requested size does not fit in the address space.
    #[error("{width}x{height} {dtype} image is too large to address")]
    TooLarge {
        width: u32,
        height: u32,
        dtype: ImageDtype,
    },
    /// The allocator refused the pixel storage.
    #[error("failed to allocate {bytes} bytes of pixel storage")]
    Alloc { bytes: usize },
    #[error(transparent)]
    Limit(#[from] LimitExceeded),
}
