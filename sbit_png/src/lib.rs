// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sbit PNG decodes the PNG images that color fonts embed as bitmap glyphs
//! and writes them into glyph bitmaps as premultiplied BGRA.
//!
//! A load either populates a bitmap, sizing it from the decoded image, or
//! overlays the image onto a region of an existing 32-bit bitmap such as a
//! glyph atlas. Requests are validated before any data is decoded, and the
//! scratch memory used for decoding is returned on every path.
//!
//! ## Features
//!
//! - `std` (enabled by default): Enables `std` support in `skrifa`.
//! - `png` (enabled by default): Provides [`PngCodec`], a [`Codec`] backed by the `png` crate.
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "png")]
//! # fn main() -> Result<(), sbit_png::Error> {
//! use sbit_png::{GlyphBitmap, PngCodec, PngGlyphLoader, SbitMetrics};
//!
//! # let mut png_bytes = Vec::new();
//! # {
//! #     let mut encoder = png::Encoder::new(&mut png_bytes, 2, 2);
//! #     encoder.set_color(png::ColorType::Rgba);
//! #     let mut writer = encoder.write_header().unwrap();
//! #     writer.write_image_data(&[255; 16]).unwrap();
//! # }
//! let mut loader = PngGlyphLoader::new(PngCodec::new());
//! let mut bitmap = GlyphBitmap::new();
//! let mut metrics = SbitMetrics::with_size(2, 2);
//! loader.populate(&mut bitmap, &mut metrics, &png_bytes)?;
//! assert_eq!((bitmap.width, bitmap.rows), (2, 2));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "png"))]
//! # fn main() {}
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitmap;
mod codec;
mod composite;
mod error;
mod font;
mod load;
mod pixel;
#[cfg(feature = "png")]
mod png_codec;
mod scratch;
mod validate;

pub use bitmap::{GlyphBitmap, PixelMode, SbitMetrics};
pub use codec::Codec;
pub use error::{DecodeError, Error, ErrorKind, MAX_DIMENSION};
pub use font::load_bitmap_glyph;
pub use load::{load_sbit_png, PngGlyphLoader};
pub use pixel::{multiply_alpha, pack, premultiply, premultiply_pixel, unpack};
#[cfg(feature = "png")]
pub use png_codec::{PngCodec, DEFAULT_LIMIT};
pub use scratch::{Allocator, Global};
pub use validate::{Mode, SbitRequest};
