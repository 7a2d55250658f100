//! Reading image sizes in pure Rust, without decoding.
//!
//! | Format | Crate / function |
//! |---|---|
//! | JPEG, PNG, GIF, WebP | `image::image_dimensions` |
//! | AVIF | `avif_parse` container metadata |
//!
//! The only operation the generator needs is *identify*: gallery images that
//! live inside the site directory get `width`/`height` attributes so lazily
//! loaded images do not shift the layout when they arrive.

pub mod backend;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use rust_backend::RustBackend;
