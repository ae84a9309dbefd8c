//! Pixel format tags.

use core::fmt;
use core::str::FromStr;

use crate::ImageError;

/// Closed set of pixel formats an [`ImageAny`](crate::ImageAny) can hold.
///
/// The raw `u8` value is what runtime callers pass around (config files,
/// FFI, wire messages). Use [`from_raw`](Self::from_raw) for strict lookup
/// and [`from_raw_or_default`](Self::from_raw_or_default) for the
/// permissive factory lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImageDtype {
    /// 8-bit RGBA, 4 bytes per pixel.
    #[default]
    Rgba8 = 0,
    /// 8-bit grayscale.
    Gray8 = 1,
    /// 16-bit grayscale.
    Gray16 = 2,
    /// 32-bit float grayscale.
    Gray32f = 3,
    /// No buffer at all.
    Null = 4,
}

impl ImageDtype {
    /// Every tag, in raw order.
    pub const ALL: [Self; 5] = [
        Self::Rgba8,
        Self::Gray8,
        Self::Gray16,
        Self::Gray32f,
        Self::Null,
    ];

    /// Look up a raw tag. Returns `None` for unrecognized values.
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Rgba8),
            1 => Some(Self::Gray8),
            2 => Some(Self::Gray16),
            3 => Some(Self::Gray32f),
            4 => Some(Self::Null),
            _ => None,
        }
    }

    /// Look up a raw tag, substituting [`ImageDtype::default()`] (RGBA8)
    /// for unrecognized values.
    ///
    /// The substitution is deliberate and only reported through a
    /// `warn`-level log record. Callers that need to reject unknown tags
    /// should use [`from_raw`](Self::from_raw).
    pub fn from_raw_or_default(value: u8) -> Self {
        match Self::from_raw(value) {
            Some(dtype) => dtype,
            None => {
                let fallback = Self::default();
                log::warn!("unrecognized image dtype {value}, falling back to {fallback}");
                fallback
            }
        }
    }

    /// Raw tag value.
    #[inline]
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgba8 => "rgba8",
            Self::Gray8 => "gray8",
            Self::Gray16 => "gray16",
            Self::Gray32f => "gray32f",
            Self::Null => "null",
        }
    }

    /// Bytes per pixel (0 for [`Null`](Self::Null)).
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 => 4,
            Self::Gray8 => 1,
            Self::Gray16 => 2,
            Self::Gray32f => 4,
            Self::Null => 0,
        }
    }

    /// Bytes needed to store a `width × height` image of this format.
    ///
    /// `None` when the count does not fit in `usize` or exceeds
    /// `isize::MAX`, the most a single allocation can hold.
    pub fn storage_bytes(self, width: u32, height: u32) -> Option<usize> {
        if self.is_null() {
            return Some(0);
        }
        let bytes = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(self.bytes_per_pixel())?;
        (bytes <= isize::MAX as usize).then_some(bytes)
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for ImageDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImageDtype {
    type Err = ImageError;

    /// Case-insensitive name lookup. Strict: unknown names are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dtype| dtype.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ImageError::UnknownDtype(s.to_owned()))
    }
}
