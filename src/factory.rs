//! Building an [`ImageAny`] from a runtime format tag.

use crate::{
    ImageAny, ImageDtype, ImageError, ImageGray16, ImageGray32f, ImageGray8, ImageNull,
    ImageRgba8, ResourceLimits,
};

/// Construction options for [`ImageAny`].
///
/// Defaults: storage initialized, not premultiplied, not painted, no
/// limits.
///
/// # Example
///
/// ```
/// use image_any::{ImageDtype, ImageOptions, ResourceLimits};
///
/// let options = ImageOptions::default()
///     .with_premultiplied(true)
///     .with_limits(ResourceLimits::none().with_max_pixels(1 << 20));
/// let img = options.try_create(256, 256, ImageDtype::Rgba8).unwrap();
/// assert!(img.premultiplied());
/// assert!(options.try_create(2048, 2048, ImageDtype::Rgba8).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageOptions {
    /// Zero-fill storage on allocation.
    pub initialize: bool,
    /// Initial premultiplied-alpha flag.
    pub premultiplied: bool,
    /// Initial painted flag.
    pub painted: bool,
    /// Checked by [`try_create`](Self::try_create) only.
    pub limits: ResourceLimits,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            initialize: true,
            premultiplied: false,
            painted: false,
            limits: ResourceLimits::none(),
        }
    }
}

impl ImageOptions {
    pub fn with_initialize(mut self, initialize: bool) -> Self {
        self.initialize = initialize;
        self
    }

    pub fn with_premultiplied(mut self, premultiplied: bool) -> Self {
        self.premultiplied = premultiplied;
        self
    }

    pub fn with_painted(mut self, painted: bool) -> Self {
        self.painted = painted;
        self
    }

    pub fn with_limits(mut self, limits: ResourceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Build an image of `dtype`. Limits are not checked.
    pub fn create(&self, width: u32, height: u32, dtype: ImageDtype) -> ImageAny {
        create_image_any(
            width,
            height,
            dtype,
            self.initialize,
            self.premultiplied,
            self.painted,
        )
    }

    /// Build an image of `dtype` after checking [`limits`](Self::limits).
    ///
    /// Nothing is allocated when a limit is exceeded. With no limits set,
    /// storage that cannot be addressed is still an error, never a panic.
    pub fn try_create(&self, width: u32, height: u32, dtype: ImageDtype) -> Result<ImageAny, ImageError> {
        self.limits.check_image(width, height, dtype)?;
        try_create_image_any(
            width,
            height,
            dtype,
            self.initialize,
            self.premultiplied,
            self.painted,
        )
    }
}

/// Build the [`ImageAny`] variant matching `dtype`.
///
/// Zero dimensions give a valid empty buffer of that format.
/// [`ImageDtype::Null`] ignores every other argument.
pub fn create_image_any(
    width: u32,
    height: u32,
    dtype: ImageDtype,
    initialize: bool,
    premultiplied: bool,
    painted: bool,
) -> ImageAny {
    log::debug!("create {dtype} image {width}x{height}");
    match dtype {
        ImageDtype::Null => ImageAny::Null(ImageNull),
        ImageDtype::Rgba8 => {
            ImageAny::Rgba8(ImageRgba8::new(width, height, initialize, premultiplied, painted))
        }
        ImageDtype::Gray8 => {
            ImageAny::Gray8(ImageGray8::new(width, height, initialize, premultiplied, painted))
        }
        ImageDtype::Gray16 => {
            ImageAny::Gray16(ImageGray16::new(width, height, initialize, premultiplied, painted))
        }
        ImageDtype::Gray32f => ImageAny::Gray32f(ImageGray32f::new(
            width,
            height,
            initialize,
            premultiplied,
            painted,
        )),
    }
}

/// Fallible [`create_image_any`].
///
/// # Errors
///
/// [`ImageError::TooLarge`] when `width * height` pixels of `dtype` cannot be
/// addressed, [`ImageError::Alloc`] when the allocator refuses the storage.
pub fn try_create_image_any(
    width: u32,
    height: u32,
    dtype: ImageDtype,
    initialize: bool,
    premultiplied: bool,
    painted: bool,
) -> Result<ImageAny, ImageError> {
    log::debug!("create {dtype} image {width}x{height}");
    Ok(match dtype {
        ImageDtype::Null => ImageAny::Null(ImageNull),
        ImageDtype::Rgba8 => ImageAny::Rgba8(ImageRgba8::try_new(
            width,
            height,
            initialize,
            premultiplied,
            painted,
        )?),
        ImageDtype::Gray8 => ImageAny::Gray8(ImageGray8::try_new(
            width,
            height,
            initialize,
            premultiplied,
            painted,
        )?),
        ImageDtype::Gray16 => ImageAny::Gray16(ImageGray16::try_new(
            width,
            height,
            initialize,
            premultiplied,
            painted,
        )?),
        ImageDtype::Gray32f => ImageAny::Gray32f(ImageGray32f::try_new(
            width,
            height,
            initialize,
            premultiplied,
            painted,
        )?),
    })
}

/// Build an image from a raw format tag.
///
/// Unrecognized tags produce an RGBA8 image of the requested size instead
/// of failing. The substitution is logged at `warn` level; use
/// [`ImageDtype::from_raw`] first when unknown tags must be rejected.
pub fn create_image_any_from_raw(
    width: u32,
    height: u32,
    raw: u8,
    initialize: bool,
    premultiplied: bool,
    painted: bool,
) -> ImageAny {
    create_image_any(
        width,
        height,
        ImageDtype::from_raw_or_default(raw),
        initialize,
        premultiplied,
        painted,
    )
}
