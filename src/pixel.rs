//! Pixel values.
//!
//! [`AnyPixel`] is the format-erased value read from and written to an
//! [`ImageAny`]. [`Pixel`] ties each `rgb` pixel type to its format tag and
//! to the matching [`ImageAny`] variant.

use rgb::{ComponentBytes, Gray, Rgba};

use crate::{Image, ImageAny, ImageDtype};

/// A single pixel of any supported format.
///
/// There is no null pixel: the null image has no storage, so reads and
/// writes on it fail with [`ImageError::NullImage`](crate::ImageError::NullImage)
/// instead of producing a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnyPixel {
    Rgba8(Rgba<u8>),
    Gray8(Gray<u8>),
    Gray16(Gray<u16>),
    Gray32f(Gray<f32>),
}

impl AnyPixel {
    /// Format of this pixel.
    pub fn dtype(&self) -> ImageDtype {
        match self {
            AnyPixel::Rgba8(_) => ImageDtype::Rgba8,
            AnyPixel::Gray8(_) => ImageDtype::Gray8,
            AnyPixel::Gray16(_) => ImageDtype::Gray16,
            AnyPixel::Gray32f(_) => ImageDtype::Gray32f,
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Pixel types that have a matching [`ImageAny`] variant.
///
/// Sealed: implemented for exactly `Rgba<u8>`, `Gray<u8>`, `Gray<u16>` and
/// `Gray<f32>`. The projection methods are what [`ImageAny::get`],
/// [`ImageAny::get_mut`] and [`ImageAny::into_image`] route through.
pub trait Pixel: Copy + Default + PartialEq + Send + Sync + 'static + sealed::Sealed {
    /// Format tag of images holding this pixel type.
    const DTYPE: ImageDtype;

    fn into_any(self) -> AnyPixel;

    /// Returns `None` if `pixel` is a different format.
    fn from_any(pixel: AnyPixel) -> Option<Self>;

    /// Raw sample bytes of a pixel slice.
    fn as_bytes(pixels: &[Self]) -> &[u8];

    fn as_bytes_mut(pixels: &mut [Self]) -> &mut [u8];

    fn project(image: &ImageAny) -> Option<&Image<Self>>;

    fn project_mut(image: &mut ImageAny) -> Option<&mut Image<Self>>;

    /// Take the typed image out, or hand the container back unchanged.
    fn unwrap_image(image: ImageAny) -> Result<Image<Self>, ImageAny>;

    fn wrap_image(image: Image<Self>) -> ImageAny;
}

macro_rules! impl_pixel {
    ($pixel:ty, $variant:ident) => {
        impl sealed::Sealed for $pixel {}

        impl Pixel for $pixel {
            const DTYPE: ImageDtype = ImageDtype::$variant;

            #[inline]
            fn into_any(self) -> AnyPixel {
                AnyPixel::$variant(self)
            }

            #[inline]
            fn from_any(pixel: AnyPixel) -> Option<Self> {
                match pixel {
                    AnyPixel::$variant(px) => Some(px),
                    _ => None,
                }
            }

            #[inline]
            fn as_bytes(pixels: &[Self]) -> &[u8] {
                pixels.as_bytes()
            }

            #[inline]
            fn as_bytes_mut(pixels: &mut [Self]) -> &mut [u8] {
                pixels.as_bytes_mut()
            }

            #[inline]
            fn project(image: &ImageAny) -> Option<&Image<Self>> {
                match image {
                    ImageAny::$variant(img) => Some(img),
                    _ => None,
                }
            }

            #[inline]
            fn project_mut(image: &mut ImageAny) -> Option<&mut Image<Self>> {
                match image {
                    ImageAny::$variant(img) => Some(img),
                    _ => None,
                }
            }

            fn unwrap_image(image: ImageAny) -> Result<Image<Self>, ImageAny> {
                match image {
                    ImageAny::$variant(img) => Ok(img),
                    other => Err(other),
                }
            }

            #[inline]
            fn wrap_image(image: Image<Self>) -> ImageAny {
                ImageAny::$variant(image)
            }
        }

        impl From<$pixel> for AnyPixel {
            #[inline]
            fn from(pixel: $pixel) -> Self {
                AnyPixel::$variant(pixel)
            }
        }
    };
}

impl_pixel!(Rgba<u8>, Rgba8);
impl_pixel!(Gray<u8>, Gray8);
impl_pixel!(Gray<u16>, Gray16);
impl_pixel!(Gray<f32>, Gray32f);
