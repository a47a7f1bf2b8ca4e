// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The load entry point tying validation, decoding, and compositing together.

use crate::bitmap::{GlyphBitmap, SbitMetrics};
use crate::codec::{decode_image, Codec};
use crate::composite::{copy_rows, populate};
use crate::error::Error;
use crate::pixel::premultiply;
use crate::scratch::{Allocator, Global};
use crate::validate::{reconcile, validate_request, Plan, SbitRequest};

/// Decodes an embedded PNG glyph and writes it into `bitmap`.
///
/// In [`Mode::Populate`](crate::Mode::Populate) the bitmap is resized to the
/// decoded image and `metrics.width`/`metrics.height` are replaced with its
/// dimensions. In [`Mode::Overlay`](crate::Mode::Overlay) the image is
/// written at the requested offset of the existing bitmap; if the decoded
/// size differs from the declared metrics, nothing is written and the call
/// still succeeds.
///
/// Requests are validated before `data` is decoded. On error, neither
/// `bitmap` nor `metrics` is modified. The scratch buffer taken from
/// `allocator` is returned to it on every path.
pub fn load_sbit_png<C, A>(
    bitmap: &mut GlyphBitmap,
    metrics: &mut SbitMetrics,
    request: &SbitRequest,
    data: &[u8],
    allocator: &mut A,
    codec: &mut C,
) -> Result<(), Error>
where
    C: Codec + ?Sized,
    A: Allocator + ?Sized,
{
    let origin = validate_request(request, bitmap, metrics).inspect_err(|error| {
        log::debug!("rejecting embedded image request: {error}");
    })?;

    let mut decoded = decode_image(codec, allocator, data, metrics)?;

    match reconcile(request.mode, metrics, decoded.width, decoded.height)? {
        Plan::Skip => return Ok(()),
        Plan::Composite => {}
        Plan::Populate(shape) => populate(bitmap, metrics, shape)?,
    }

    if request.metrics_only {
        return Ok(());
    }

    premultiply(decoded.pixels_mut());
    let height = decoded.height as usize;
    copy_rows(bitmap, origin, (0..height).map(|y| decoded.row(y)));
    log::trace!(
        "composited {}x{} embedded image at ({}, {})",
        decoded.width,
        decoded.height,
        origin.x,
        origin.y
    );
    Ok(())
}

/// A codec and scratch allocator bundled for repeated glyph loads.
#[derive(Clone, Debug, Default)]
pub struct PngGlyphLoader<C, A = Global> {
    codec: C,
    allocator: A,
}

impl<C: Codec> PngGlyphLoader<C> {
    /// Creates a loader that takes scratch memory from the global heap.
    pub fn new(codec: C) -> Self {
        Self::with_allocator(codec, Global)
    }
}

impl<C: Codec, A: Allocator> PngGlyphLoader<C, A> {
    /// Creates a loader with a custom scratch allocator.
    pub fn with_allocator(codec: C, allocator: A) -> Self {
        Self { codec, allocator }
    }

    /// Runs [`load_sbit_png`] with this loader's codec and allocator.
    pub fn load(
        &mut self,
        bitmap: &mut GlyphBitmap,
        metrics: &mut SbitMetrics,
        request: &SbitRequest,
        data: &[u8],
    ) -> Result<(), Error> {
        load_sbit_png(
            bitmap,
            metrics,
            request,
            data,
            &mut self.allocator,
            &mut self.codec,
        )
    }

    /// Sizes `bitmap` from the image in `data` and fills it.
    pub fn populate(
        &mut self,
        bitmap: &mut GlyphBitmap,
        metrics: &mut SbitMetrics,
        data: &[u8],
    ) -> Result<(), Error> {
        self.load(bitmap, metrics, &SbitRequest::populate(), data)
    }

    /// Writes the image in `data` at `(x_offset, y_offset)` of an existing bitmap.
    pub fn overlay(
        &mut self,
        bitmap: &mut GlyphBitmap,
        metrics: &SbitMetrics,
        x_offset: i32,
        y_offset: i32,
        data: &[u8],
    ) -> Result<(), Error> {
        let mut metrics = *metrics;
        self.load(
            bitmap,
            &mut metrics,
            &SbitRequest::overlay(x_offset, y_offset),
            data,
        )
    }

    /// Returns the codec and allocator.
    pub fn into_parts(self) -> (C, A) {
        (self.codec, self.allocator)
    }
}
