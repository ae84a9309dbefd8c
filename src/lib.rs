//! Format-erased image buffers.
//!
//! [`ImageAny`] holds exactly one of a closed set of typed pixel buffers and
//! exposes one set of operations over all of them:
//!
//! - [`ImageAny`] — the container; every uniform operation is a single `match`
//! - [`Image`] / [`ImageNull`] — the concrete buffers it can hold
//! - [`ImageDtype`] — format tags, with a permissive raw lookup for the factory
//! - [`AnyPixel`] / [`Pixel`] — pixel values and typed projection
//! - [`create_image_any`] / [`ImageOptions`] — construction from a format tag
//! - [`ResourceLimits`] — allocation caps for [`ImageOptions::try_create`]
//!
//! Pixel access on the null image is an [`ImageError::NullImage`], never a
//! panic.

#![forbid(unsafe_code)]

mod any;
mod dtype;
mod error;
mod factory;
mod image;
mod limits;
mod pixel;

pub use any::ImageAny;
pub use dtype::ImageDtype;
pub use error::ImageError;
pub use factory::{
    ImageOptions, create_image_any, create_image_any_from_raw, try_create_image_any,
};
pub use image::{Image, ImageGray8, ImageGray16, ImageGray32f, ImageNull, ImageRgba8};
pub use limits::{LimitExceeded, ResourceLimits};
pub use pixel::{AnyPixel, Pixel};

// Re-exports for callers building pixels and views.
pub use imgref::{ImgRef, ImgVec};
pub use rgb;
pub use rgb::{Gray, Rgba};
