//! Format-erased image container.
//!
//! [`ImageAny`] holds exactly one concrete buffer and routes every uniform
//! operation to it with a single `match`. Adding a variant makes every
//! routing function below fail to compile until it is handled.

use core::fmt;

use crate::{
    AnyPixel, Image, ImageDtype, ImageError, ImageGray16, ImageGray32f, ImageGray8, ImageNull,
    ImageOptions, ImageRgba8, Pixel,
};

/// An image of any supported pixel format.
///
/// The variant is fixed at construction; changing format means building a
/// new value. Cloning deep-copies the pixel storage, moving transfers it.
///
/// # Example
///
/// ```
/// use image_any::{ImageAny, ImageDtype};
///
/// let img = ImageAny::new(4, 2, ImageDtype::Gray16);
/// assert_eq!(img.width(), 4);
/// assert_eq!(img.byte_size(), 16);
/// assert!(!img.painted());
/// ```
#[derive(Clone, PartialEq)]
pub enum ImageAny {
    Null(ImageNull),
    Rgba8(ImageRgba8),
    Gray8(ImageGray8),
    Gray16(ImageGray16),
    Gray32f(ImageGray32f),
}

/// Evaluate `$body` against whichever buffer `$image` holds.
macro_rules! dispatch {
    ($image:expr, $img:ident => $body:expr) => {
        match $image {
            ImageAny::Null($img) => $body,
            ImageAny::Rgba8($img) => $body,
            ImageAny::Gray8($img) => $body,
            ImageAny::Gray16($img) => $body,
            ImageAny::Gray32f($img) => $body,
        }
    };
}

impl ImageAny {
    /// Allocate a zero-initialized image with default flags.
    ///
    /// [`ImageDtype::Null`] ignores the dimensions.
    pub fn new(width: u32, height: u32, dtype: ImageDtype) -> Self {
        ImageOptions::default().create(width, height, dtype)
    }

    /// Allocate an image using `options` for initialization and flags.
    ///
    /// Resource limits in `options` are not checked; use
    /// [`ImageOptions::try_create`] for that.
    pub fn with_options(width: u32, height: u32, dtype: ImageDtype, options: &ImageOptions) -> Self {
        options.create(width, height, dtype)
    }

    /// Format of the held buffer.
    pub fn dtype(&self) -> ImageDtype {
        match self {
            ImageAny::Null(_) => ImageDtype::Null,
            ImageAny::Rgba8(_) => ImageDtype::Rgba8,
            ImageAny::Gray8(_) => ImageDtype::Gray8,
            ImageAny::Gray16(_) => ImageDtype::Gray16,
            ImageAny::Gray32f(_) => ImageDtype::Gray32f,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, ImageAny::Null(_))
    }

    /// Raw sample bytes. Empty for the null image.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        dispatch!(self, img => img.bytes())
    }

    /// Mutable raw sample bytes. Empty for the null image.
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        dispatch!(self, img => img.bytes_mut())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        dispatch!(self, img => img.width())
    }

    #[inline]
    pub fn height(&self) -> u32 {
        dispatch!(self, img => img.height())
    }

    #[inline]
    pub fn premultiplied(&self) -> bool {
        dispatch!(self, img => img.premultiplied())
    }

    /// Ignored by the null image.
    #[inline]
    pub fn set_premultiplied(&mut self, premultiplied: bool) {
        dispatch!(self, img => img.set_premultiplied(premultiplied))
    }

    #[inline]
    pub fn painted(&self) -> bool {
        dispatch!(self, img => img.painted())
    }

    /// Ignored by the null image.
    #[inline]
    pub fn set_painted(&mut self, painted: bool) {
        dispatch!(self, img => img.set_painted(painted))
    }

    /// Total storage in bytes.
    #[inline]
    pub fn byte_size(&self) -> usize {
        dispatch!(self, img => img.byte_size())
    }

    /// Bytes in one row.
    #[inline]
    pub fn row_size(&self) -> usize {
        dispatch!(self, img => img.row_size())
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`ImageError::NullImage`] on the null image, [`ImageError::OutOfBounds`]
    /// outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<AnyPixel, ImageError> {
        match self {
            ImageAny::Null(_) => Err(ImageError::NullImage),
            ImageAny::Rgba8(img) => read_pixel(img, x, y),
            ImageAny::Gray8(img) => read_pixel(img, x, y),
            ImageAny::Gray16(img) => read_pixel(img, x, y),
            ImageAny::Gray32f(img) => read_pixel(img, x, y),
        }
    }

    /// Write the pixel at `(x, y)` and mark the image painted.
    ///
    /// # Errors
    ///
    /// [`ImageError::NullImage`] on the null image,
    /// [`ImageError::PixelMismatch`] if `value` is another format,
    /// [`ImageError::OutOfBounds`] outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: impl Into<AnyPixel>) -> Result<(), ImageError> {
        let value = value.into();
        match self {
            ImageAny::Null(_) => Err(ImageError::NullImage),
            ImageAny::Rgba8(img) => img.set_pixel(x, y, typed(value)?),
            ImageAny::Gray8(img) => img.set_pixel(x, y, typed(value)?),
            ImageAny::Gray16(img) => img.set_pixel(x, y, typed(value)?),
            ImageAny::Gray32f(img) => img.set_pixel(x, y, typed(value)?),
        }
    }

    /// Set every pixel to `value` and mark the image painted.
    ///
    /// # Errors
    ///
    /// [`ImageError::NullImage`] on the null image,
    /// [`ImageError::PixelMismatch`] if `value` is another format.
    pub fn fill(&mut self, value: impl Into<AnyPixel>) -> Result<(), ImageError> {
        let value = value.into();
        match self {
            ImageAny::Null(_) => return Err(ImageError::NullImage),
            ImageAny::Rgba8(img) => img.fill(typed(value)?),
            ImageAny::Gray8(img) => img.fill(typed(value)?),
            ImageAny::Gray16(img) => img.fill(typed(value)?),
            ImageAny::Gray32f(img) => img.fill(typed(value)?),
        }
        Ok(())
    }

    /// Borrow the held buffer if it stores `P` pixels.
    #[inline]
    pub fn get<P: Pixel>(&self) -> Option<&Image<P>> {
        P::project(self)
    }

    #[inline]
    pub fn get_mut<P: Pixel>(&mut self) -> Option<&mut Image<P>> {
        P::project_mut(self)
    }

    /// Take the held buffer out if it stores `P` pixels, otherwise get
    /// `self` back unchanged.
    pub fn into_image<P: Pixel>(self) -> Result<Image<P>, ImageAny> {
        P::unwrap_image(self)
    }
}

#[inline]
fn read_pixel<P: Pixel>(img: &Image<P>, x: u32, y: u32) -> Result<AnyPixel, ImageError> {
    img.pixel(x, y)
        .map(Pixel::into_any)
        .ok_or(ImageError::OutOfBounds {
            x,
            y,
            width: img.width(),
            height: img.height(),
        })
}

#[inline]
fn typed<P: Pixel>(value: AnyPixel) -> Result<P, ImageError> {
    P::from_any(value).ok_or(ImageError::PixelMismatch {
        expected: P::DTYPE,
        actual: value.dtype(),
    })
}

impl Default for ImageAny {
    /// The null image.
    fn default() -> Self {
        ImageAny::Null(ImageNull)
    }
}

impl From<ImageNull> for ImageAny {
    fn from(null: ImageNull) -> Self {
        ImageAny::Null(null)
    }
}

impl<P: Pixel> From<Image<P>> for ImageAny {
    #[inline]
    fn from(image: Image<P>) -> Self {
        P::wrap_image(image)
    }
}

impl fmt::Debug for ImageAny {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            ImageAny::Null(_) => return f.write_str("ImageAny::Null"),
            ImageAny::Rgba8(_) => "Rgba8",
            ImageAny::Gray8(_) => "Gray8",
            ImageAny::Gray16(_) => "Gray16",
            ImageAny::Gray32f(_) => "Gray32f",
        };
        write!(
            f,
            "ImageAny::{}({}x{})",
            variant,
            self.width(),
            self.height()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::{Gray, Rgba};

    fn all_non_null(width: u32, height: u32) -> Vec<ImageAny> {
        ImageDtype::ALL
            .into_iter()
            .filter(|dtype| !dtype.is_null())
            .map(|dtype| ImageAny::new(width, height, dtype))
            .collect()
    }

    #[test]
    fn dimensions_follow_variant() {
        for img in all_non_null(5, 3) {
            assert_eq!(img.width(), 5);
            assert_eq!(img.height(), 3);
        }
        let null = ImageAny::new(5, 3, ImageDtype::Null);
        assert_eq!((null.width(), null.height()), (0, 0));
    }

    #[test]
    fn byte_size_is_row_size_times_height() {
        for img in all_non_null(7, 3) {
            let bpp = img.dtype().bytes_per_pixel();
            assert_eq!(img.byte_size(), img.row_size() * img.height() as usize);
            assert!(img.row_size() >= img.width() as usize * bpp);
            assert_eq!(img.bytes().len(), img.byte_size());
        }
    }

    #[test]
    fn null_answers_defaults() {
        let mut null = ImageAny::default();
        assert!(null.is_null());
        assert_eq!(null.dtype(), ImageDtype::Null);
        assert!(null.bytes().is_empty());
        assert!(null.bytes_mut().is_empty());
        assert_eq!(null.width(), 0);
        assert_eq!(null.height(), 0);
        assert!(!null.premultiplied());
        assert!(!null.painted());
        assert_eq!(null.byte_size(), 0);
        assert_eq!(null.row_size(), 0);

        null.set_premultiplied(true);
        null.set_painted(true);
        assert!(!null.premultiplied());
        assert!(!null.painted());
    }

    #[test]
    fn null_pixel_access_fails() {
        let mut null = ImageAny::default();
        assert_eq!(null.get_pixel(0, 0), Err(ImageError::NullImage));
        assert_eq!(
            null.set_pixel(0, 0, Gray::new(1u8)),
            Err(ImageError::NullImage)
        );
        assert_eq!(null.fill(Gray::new(1u8)), Err(ImageError::NullImage));
    }

    #[test]
    fn pixel_roundtrip_each_format() {
        let mut img = ImageAny::new(2, 2, ImageDtype::Rgba8);
        let red = Rgba::new(255u8, 0, 0, 255);
        img.set_pixel(1, 0, red).unwrap();
        assert_eq!(img.get_pixel(1, 0), Ok(AnyPixel::Rgba8(red)));
        assert_eq!(&img.bytes()[4..8], &[255, 0, 0, 255]);

        let mut img = ImageAny::new(2, 2, ImageDtype::Gray8);
        img.set_pixel(0, 1, Gray::new(42u8)).unwrap();
        assert_eq!(img.get_pixel(0, 1), Ok(AnyPixel::Gray8(Gray::new(42))));

        let mut img = ImageAny::new(2, 2, ImageDtype::Gray16);
        img.set_pixel(1, 1, Gray::new(0xBEEFu16)).unwrap();
        assert_eq!(
            img.get_pixel(1, 1),
            Ok(AnyPixel::Gray16(Gray::new(0xBEEF)))
        );

        let mut img = ImageAny::new(2, 2, ImageDtype::Gray32f);
        img.set_pixel(0, 0, Gray::new(0.25f32)).unwrap();
        assert_eq!(
            img.get_pixel(0, 0),
            Ok(AnyPixel::Gray32f(Gray::new(0.25)))
        );
    }

    #[test]
    fn set_pixel_marks_painted() {
        let mut img = ImageAny::new(2, 2, ImageDtype::Gray8);
        assert!(!img.painted());
        img.set_pixel(0, 0, Gray::new(1u8)).unwrap();
        assert!(img.painted());
    }

    #[test]
    fn set_pixel_wrong_format() {
        let mut img = ImageAny::new(2, 2, ImageDtype::Gray8);
        let err = img.set_pixel(0, 0, Gray::new(1u16)).unwrap_err();
        assert_eq!(
            err,
            ImageError::PixelMismatch {
                expected: ImageDtype::Gray8,
                actual: ImageDtype::Gray16,
            }
        );
        assert!(!img.painted());
    }

    #[test]
    fn pixel_out_of_bounds() {
        let mut img = ImageAny::new(3, 2, ImageDtype::Gray16);
        let oob = ImageError::OutOfBounds {
            x: 0,
            y: 2,
            width: 3,
            height: 2,
        };
        assert_eq!(img.get_pixel(0, 2), Err(oob.clone()));
        assert_eq!(img.set_pixel(0, 2, Gray::new(1u16)), Err(oob));
    }

    #[test]
    fn fill_sets_every_pixel() {
        let mut img = ImageAny::new(3, 2, ImageDtype::Gray8);
        img.fill(Gray::new(9u8)).unwrap();
        assert!(img.bytes().iter().all(|&b| b == 9));
        assert!(img.painted());
        assert!(img.fill(Gray::new(0.5f32)).is_err());
    }

    #[test]
    fn premultiplied_flag_routes() {
        let mut img = ImageAny::new(1, 1, ImageDtype::Rgba8);
        assert!(!img.premultiplied());
        img.set_premultiplied(true);
        assert!(img.premultiplied());
        assert!(img.get::<Rgba<u8>>().unwrap().premultiplied());
    }

    #[test]
    fn wrap_concrete_roundtrip() {
        let concrete = ImageGray32f::new(6, 4, true, true, true);
        let img = ImageAny::from(concrete);
        assert_eq!(img.dtype(), ImageDtype::Gray32f);
        assert_eq!(img.width(), 6);
        assert_eq!(img.height(), 4);
        assert!(img.premultiplied());
        assert!(img.painted());
        assert_eq!(img.row_size(), 24);
        assert_eq!(img.byte_size(), 96);
    }

    #[test]
    fn typed_projection() {
        let mut img = ImageAny::new(2, 1, ImageDtype::Gray16);
        assert!(img.get::<Gray<u16>>().is_some());
        assert!(img.get::<Gray<u8>>().is_none());
        assert!(img.get::<Rgba<u8>>().is_none());

        img.get_mut::<Gray<u16>>()
            .unwrap()
            .set_pixel(1, 0, Gray::new(5))
            .unwrap();
        assert_eq!(img.get_pixel(1, 0), Ok(AnyPixel::Gray16(Gray::new(5))));

        let img = img.into_image::<Gray<u8>>().unwrap_err();
        let typed = img.into_image::<Gray<u16>>().unwrap();
        assert_eq!(typed.pixel(1, 0), Some(Gray::new(5)));
    }

    #[test]
    fn move_transfers_storage() {
        let mut img = ImageAny::new(16, 16, ImageDtype::Rgba8);
        img.fill(Rgba::new(1u8, 2, 3, 4)).unwrap();
        let ptr = img.bytes().as_ptr();
        let moved = img;
        // Same allocation, no copy.
        assert_eq!(moved.bytes().as_ptr(), ptr);

        let typed = moved.into_image::<Rgba<u8>>().unwrap();
        assert_eq!(typed.bytes().as_ptr(), ptr);
    }

    #[test]
    fn take_leaves_null_behind() {
        let mut slot = ImageAny::new(4, 4, ImageDtype::Gray8);
        let taken = core::mem::take(&mut slot);
        assert!(slot.is_null());
        assert_eq!(taken.width(), 4);
    }

    #[test]
    fn clone_is_deep() {
        let mut a = ImageAny::new(2, 2, ImageDtype::Gray8);
        let b = a.clone();
        a.set_pixel(0, 0, Gray::new(200u8)).unwrap();
        assert_eq!(b.get_pixel(0, 0), Ok(AnyPixel::Gray8(Gray::new(0))));
        assert_ne!(a.bytes().as_ptr(), b.bytes().as_ptr());
    }

    #[test]
    fn send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ImageAny>();
    }

    #[test]
    fn moves_across_threads() {
        use rayon::prelude::*;

        let images: Vec<ImageAny> = ImageDtype::ALL
            .into_par_iter()
            .map(|dtype| {
                let mut img = ImageAny::new(8, 8, dtype);
                img.set_painted(true);
                img
            })
            .collect();
        for (img, dtype) in images.iter().zip(ImageDtype::ALL) {
            assert_eq!(img.dtype(), dtype);
            assert_eq!(img.painted(), !dtype.is_null());
        }

        let handle = std::thread::spawn(move || {
            images
                .into_iter()
                .map(|img| img.byte_size())
                .sum::<usize>()
        });
        // rgba8 256 + gray8 64 + gray16 128 + gray32f 256 + null 0
        assert_eq!(handle.join().unwrap(), 704);
    }

    #[test]
    fn debug_format() {
        let img = ImageAny::new(3, 2, ImageDtype::Gray16);
        assert_eq!(format!("{img:?}"), "ImageAny::Gray16(3x2)");
        assert_eq!(format!("{:?}", ImageAny::default()), "ImageAny::Null");
    }
}
