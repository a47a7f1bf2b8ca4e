// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation of offsets, declared metrics, and decoded dimensions.

use crate::bitmap::{GlyphBitmap, PixelMode, SbitMetrics};
use crate::error::{Error, MAX_DIMENSION};

/// How a load call treats the target [`GlyphBitmap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Size the bitmap from the decoded image and fill it, updating the metrics.
    Populate,
    /// Write into a sub-region of an existing BGRA bitmap, such as an atlas.
    Overlay {
        /// Bits per pixel the caller expects; only 32 is accepted.
        pixel_depth: u8,
    },
}

/// Parameters of a single load call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SbitRequest {
    /// Column of the target bitmap where the image's left edge lands.
    pub x_offset: i32,
    /// Row of the target bitmap where the image's top edge lands.
    pub y_offset: i32,
    /// Operating mode.
    pub mode: Mode,
    /// Validate and update shape and metrics, but copy no pixels.
    pub metrics_only: bool,
}

impl SbitRequest {
    /// A request that sizes and fills the target bitmap.
    pub fn populate() -> Self {
        Self {
            x_offset: 0,
            y_offset: 0,
            mode: Mode::Populate,
            metrics_only: false,
        }
    }

    /// A request that writes a 32-bit image at `(x_offset, y_offset)` of an existing bitmap.
    pub fn overlay(x_offset: i32, y_offset: i32) -> Self {
        Self {
            x_offset,
            y_offset,
            mode: Mode::Overlay { pixel_depth: 32 },
            metrics_only: false,
        }
    }

    /// Returns this request with pixel copying turned off.
    pub fn metrics_only(self) -> Self {
        Self {
            metrics_only: true,
            ..self
        }
    }
}

/// Non-negative destination of the image inside the target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Origin {
    pub(crate) x: u32,
    pub(crate) y: u32,
}

/// Shape a populated bitmap takes on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Shape {
    pub(crate) width: u32,
    pub(crate) rows: u32,
    pub(crate) pitch: u32,
}

/// What to do with a decoded image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Plan {
    /// Resize the target to `Shape` and copy the image to its origin.
    Populate(Shape),
    /// Copy the image into the existing target.
    Composite,
    /// Leave the target untouched and report success.
    Skip,
}

/// Checks a request against the target before anything is decoded.
pub(crate) fn validate_request(
    request: &SbitRequest,
    bitmap: &GlyphBitmap,
    declared: &SbitMetrics,
) -> Result<Origin, Error> {
    let (Ok(x), Ok(y)) = (
        u32::try_from(request.x_offset),
        u32::try_from(request.y_offset),
    ) else {
        return Err(Error::negative_offset(request.x_offset, request.y_offset));
    };

    match request.mode {
        Mode::Populate => {
            // The populated bitmap is exactly the size of the image.
            if x != 0 || y != 0 {
                return Err(Error::populate_offset(x, y));
            }
        }
        Mode::Overlay { pixel_depth } => {
            let x_end = u64::from(x) + u64::from(declared.width);
            let y_end = u64::from(y) + u64::from(declared.height);
            if x_end > u64::from(bitmap.width) || y_end > u64::from(bitmap.rows) {
                return Err(Error::out_of_bounds(
                    x_end,
                    y_end,
                    bitmap.width,
                    bitmap.rows,
                ));
            }
            if pixel_depth != 32 {
                return Err(Error::pixel_depth(pixel_depth));
            }
            if bitmap.pixel_mode != PixelMode::Bgra {
                return Err(Error::pixel_mode(bitmap.pixel_mode));
            }
            if !bitmap.fits_buffer() {
                return Err(Error::bad_target(
                    bitmap.width,
                    bitmap.rows,
                    bitmap.pitch,
                    bitmap.buffer.len(),
                ));
            }
        }
    }

    Ok(Origin { x, y })
}

/// Decides what to do with an image of `width` by `height` pixels.
pub(crate) fn reconcile(
    mode: Mode,
    declared: &SbitMetrics,
    width: u32,
    height: u32,
) -> Result<Plan, Error> {
    match mode {
        Mode::Populate => {
            if width > MAX_DIMENSION || height > MAX_DIMENSION {
                log::warn!("embedded image {width}x{height} is too large");
                return Err(Error::too_large(width, height));
            }
            Ok(Plan::Populate(Shape {
                width,
                rows: height,
                pitch: width * 4,
            }))
        }
        Mode::Overlay { .. } => {
            if width != u32::from(declared.width) || height != u32::from(declared.height) {
                log::warn!(
                    "embedded image is {width}x{height} but metrics declare {}x{}; not copying",
                    declared.width,
                    declared.height
                );
                return Ok(Plan::Skip);
            }
            Ok(Plan::Composite)
        }
    }
}
