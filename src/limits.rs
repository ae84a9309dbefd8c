//! Allocation caps checked before an image is built.

use crate::ImageDtype;

/// Upper bounds on what [`ImageOptions::try_create`](crate::ImageOptions::try_create)
/// may allocate.
///
/// Every cap is optional and the default caps nothing. Even then
/// `try_create` refuses storage that cannot be addressed at all, so the caps
/// are policy, not overflow protection.
///
/// ```
/// use image_any::{ImageDtype, ResourceLimits};
///
/// let limits = ResourceLimits::none().with_max_memory(3000);
/// assert!(limits.check_image(32, 32, ImageDtype::Gray16).is_ok());
/// assert!(limits.check_image(32, 32, ImageDtype::Rgba8).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ResourceLimits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Cap on `width * height`.
    pub max_pixels: Option<u64>,
    /// Cap on pixel storage in bytes, for the format being built.
    pub max_memory_bytes: Option<u64>,
}

impl ResourceLimits {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_max_width(self, max: u32) -> Self {
        Self {
            max_width: Some(max),
            ..self
        }
    }

    pub fn with_max_height(self, max: u32) -> Self {
        Self {
            max_height: Some(max),
            ..self
        }
    }

    pub fn with_max_pixels(self, max: u64) -> Self {
        Self {
            max_pixels: Some(max),
            ..self
        }
    }

    pub fn with_max_memory(self, max: u64) -> Self {
        Self {
            max_memory_bytes: Some(max),
            ..self
        }
    }

    pub fn has_any(&self) -> bool {
        *self != Self::none()
    }

    /// Check a `width × height` image of `dtype` against every cap, in
    /// the order width, height, pixels, memory.
    ///
    /// The null image stores nothing and always passes. A byte count past
    /// `u64::MAX` is reported as `u64::MAX`.
    pub fn check_image(&self, width: u32, height: u32, dtype: ImageDtype) -> Result<(), LimitExceeded> {
        if dtype.is_null() {
            return Ok(());
        }
        let pixels = u64::from(width) * u64::from(height);
        let bytes = pixels.saturating_mul(dtype.bytes_per_pixel() as u64);
        match *self {
            Self {
                max_width: Some(max),
                ..
            } if width > max => Err(LimitExceeded::Width { actual: width, max }),
            Self {
                max_height: Some(max),
                ..
            } if height > max => Err(LimitExceeded::Height { actual: height, max }),
            Self {
                max_pixels: Some(max),
                ..
            } if pixels > max => Err(LimitExceeded::Pixels { actual: pixels, max }),
            Self {
                max_memory_bytes: Some(max),
                ..
            } if bytes > max => Err(LimitExceeded::Memory { actual: bytes, max }),
            _ => Ok(()),
        }
    }
}

/// Which cap an image request broke, with the requested value and the cap.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LimitExceeded {
    #[error("width {actual} is over the cap of {max}")]
    Width { actual: u32, max: u32 },
    #[error("height {actual} is over the cap of {max}")]
    Height { actual: u32, max: u32 },
    #[error("{actual} pixels is over the cap of {max}")]
    Pixels { actual: u64, max: u64 },
    #[error("{actual} bytes of pixel storage is over the cap of {max}")]
    Memory { actual: u64, max: u64 },
}
