//! Concrete pixel buffers.

use core::fmt;

use imgref::{ImgRef, ImgVec};
use rgb::{Gray, Rgba};

use crate::{ImageError, Pixel};

/// Owned, contiguous buffer of one pixel type.
///
/// Rows are tightly packed: [`row_size`](Self::row_size) is exactly
/// `width * size_of::<P>()` and [`byte_size`](Self::byte_size) is
/// `row_size * height`.
#[derive(Clone, PartialEq)]
pub struct Image<P: Pixel> {
    pixels: Vec<P>,
    width: u32,
    height: u32,
    premultiplied: bool,
    painted: bool,
}

/// 8-bit RGBA image.
pub type ImageRgba8 = Image<Rgba<u8>>;
/// 8-bit grayscale image.
pub type ImageGray8 = Image<Gray<u8>>;
/// 16-bit grayscale image.
pub type ImageGray16 = Image<Gray<u16>>;
/// 32-bit float grayscale image.
pub type ImageGray32f = Image<Gray<f32>>;

impl<P: Pixel> Image<P> {
    /// Allocate a `width × height` image.
    ///
    /// With `initialize` set every sample is zero. Without it the content
    /// is unspecified; callers are expected to overwrite it.
    ///
    /// # Panics
    ///
    /// Like `vec!`, panics or aborts when the storage cannot be allocated.
    /// Use [`try_new`](Self::try_new) for sizes that come from untrusted input.
    pub fn new(width: u32, height: u32, _initialize: bool, premultiplied: bool, painted: bool) -> Self {
        // Safe code cannot hand out uninitialized memory, so both paths
        // allocate default (all-zero) pixels.
        let len = (width as usize).saturating_mul(height as usize);
        Self {
            pixels: vec![P::default(); len],
            width,
            height,
            premultiplied,
            painted,
        }
    }

    /// Fallible [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// [`ImageError::TooLarge`] when the byte count cannot be addressed,
    /// [`ImageError::Alloc`] when the allocator refuses it.
    pub fn try_new(
        width: u32,
        height: u32,
        _initialize: bool,
        premultiplied: bool,
        painted: bool,
    ) -> Result<Self, ImageError> {
        let bytes = P::DTYPE
            .storage_bytes(width, height)
            .ok_or(ImageError::TooLarge {
                width,
                height,
                dtype: P::DTYPE,
            })?;
        let len = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| ImageError::Alloc { bytes })?;
        pixels.resize(len, P::default());
        Ok(Self {
            pixels,
            width,
            height,
            premultiplied,
            painted,
        })
    }

    /// Wrap existing pixels. Returns `None` unless `pixels.len() == width * height`.
    pub fn from_vec(pixels: Vec<P>, width: u32, height: u32) -> Option<Self> {
        if pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
            premultiplied: false,
            painted: false,
        })
    }

    /// Consume the image and return its pixels in row-major order.
    pub fn into_vec(self) -> Vec<P> {
        self.pixels
    }

    /// Borrow as an `imgref` view.
    ///
    /// Returns `None` for images with no pixels.
    pub fn as_imgref(&self) -> Option<ImgRef<'_, P>> {
        if self.pixels.is_empty() {
            return None;
        }
        Some(ImgRef::new(
            self.pixels.as_slice(),
            self.width as usize,
            self.height as usize,
        ))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether color samples are already multiplied by alpha.
    #[inline]
    pub fn premultiplied(&self) -> bool {
        self.premultiplied
    }

    #[inline]
    pub fn set_premultiplied(&mut self, premultiplied: bool) {
        self.premultiplied = premultiplied;
    }

    /// Whether the image has been written to since creation.
    #[inline]
    pub fn painted(&self) -> bool {
        self.painted
    }

    #[inline]
    pub fn set_painted(&mut self, painted: bool) {
        self.painted = painted;
    }

    /// Raw sample bytes, row-major.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        P::as_bytes(&self.pixels)
    }

    /// Mutable raw sample bytes. Writes through here do not mark the image painted.
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        P::as_bytes_mut(&mut self.pixels)
    }

    /// Total storage in bytes.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.row_size() * self.height as usize
    }

    /// Bytes in one row.
    #[inline]
    pub fn row_size(&self) -> usize {
        self.width as usize * size_of::<P>()
    }

    #[inline]
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    /// Pixels of row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[P]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.pixels[start..start + self.width as usize])
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<P> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut P> {
        self.index(x, y).map(|i| &mut self.pixels[i])
    }

    /// Write one pixel and mark the image painted.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: P) -> Result<(), ImageError> {
        let i = self.index(x, y).ok_or(ImageError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.pixels[i] = value;
        self.painted = true;
        Ok(())
    }

    /// Set every pixel to `value` and mark the image painted.
    pub fn fill(&mut self, value: P) {
        self.pixels.fill(value);
        self.painted = true;
    }
}

impl<P: Pixel> From<ImgVec<P>> for Image<P> {
    /// Strided input is repacked into contiguous rows.
    fn from(img: ImgVec<P>) -> Self {
        let (buf, w, h) = img.as_ref().to_contiguous_buf();
        Self {
            pixels: buf.into_owned(),
            width: w as u32,
            height: h as u32,
            premultiplied: false,
            painted: false,
        }
    }
}

impl<P: Pixel> fmt::Debug for Image<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Image<{}>({}x{})", P::DTYPE, self.width, self.height)
    }
}

/// The empty image.
///
/// Owns no storage. Every size is 0 and both flags are always `false`;
/// flag setters are ignored. Pixel access fails with
/// [`ImageError::NullImage`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImageNull;

impl ImageNull {
    #[inline]
    pub fn width(&self) -> u32 {
        0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        0
    }

    #[inline]
    pub fn premultiplied(&self) -> bool {
        false
    }

    #[inline]
    pub fn set_premultiplied(&mut self, _premultiplied: bool) {}

    #[inline]
    pub fn painted(&self) -> bool {
        false
    }

    #[inline]
    pub fn set_painted(&mut self, _painted: bool) {}

    /// Always the empty slice.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &[]
    }

    /// Always the empty slice.
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut []
    }

    #[inline]
    pub fn byte_size(&self) -> usize {
        0
    }

    #[inline]
    pub fn row_size(&self) -> usize {
        0
    }
}
