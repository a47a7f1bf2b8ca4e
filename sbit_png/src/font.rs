// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading PNG bitmap glyphs straight from a font's bitmap strikes.

#![allow(
    clippy::cast_possible_truncation,
    reason = "bitmap table metrics are stored as small integers, so the float values always fit."
)]

use skrifa::bitmap::{BitmapData, BitmapGlyph};
use skrifa::instance::Size;
use skrifa::{FontRef, GlyphId, MetadataProvider};

use crate::bitmap::{GlyphBitmap, SbitMetrics};
use crate::codec::Codec;
use crate::error::Error;
use crate::load::load_sbit_png;
use crate::scratch::Global;
use crate::validate::SbitRequest;

/// Loads the PNG bitmap for `glyph_id` from the strike that best matches `size`.
///
/// The bitmap is populated from the decoded image and the glyph's metrics are
/// returned with its width and height replaced by the image's. Returns
/// `Ok(None)` when the font has no bitmap for the glyph, or has one that is not
/// PNG data.
pub fn load_bitmap_glyph<C: Codec + ?Sized>(
    font: &FontRef<'_>,
    size: Size,
    glyph_id: GlyphId,
    bitmap: &mut GlyphBitmap,
    codec: &mut C,
    metrics_only: bool,
) -> Result<Option<SbitMetrics>, Error> {
    let Some(glyph) = font.bitmap_strikes().glyph_for_size(size, glyph_id) else {
        return Ok(None);
    };
    let BitmapData::Png(data) = &glyph.data else {
        log::trace!(
            "glyph {} has a bitmap, but it is not png data",
            glyph_id.to_u32()
        );
        return Ok(None);
    };

    let mut metrics = strike_metrics(&glyph)?;
    let request = SbitRequest {
        metrics_only,
        ..SbitRequest::populate()
    };
    load_sbit_png(bitmap, &mut metrics, &request, data, &mut Global, codec)?;
    Ok(Some(metrics))
}

/// Converts the metrics a strike declares for a glyph into pixel metrics.
///
/// Strikes only expose horizontal metrics, so the vertical ones stay zero.
/// A strike without an advance (`sbix`) gets a zero advance.
fn strike_metrics(glyph: &BitmapGlyph<'_>) -> Result<SbitMetrics, Error> {
    let (Ok(width), Ok(height)) = (u16::try_from(glyph.width), u16::try_from(glyph.height)) else {
        return Err(Error::too_large(glyph.width, glyph.height));
    };
    Ok(SbitMetrics {
        width,
        height,
        hori_bearing_x: glyph.inner_bearing_x as i16,
        hori_bearing_y: glyph.inner_bearing_y as i16,
        hori_advance: glyph.advance.unwrap_or(0.0) as u16,
        ..SbitMetrics::default()
    })
}
