// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sizing the target bitmap and copying decoded rows into it.

use crate::bitmap::{byte_size, GlyphBitmap, PixelMode, SbitMetrics};
use crate::error::Error;
use crate::validate::{Origin, Shape};

/// Allocates the target buffer for `shape`, then commits the shape and metrics.
///
/// Nothing is modified if the allocation fails.
pub(crate) fn populate(
    bitmap: &mut GlyphBitmap,
    metrics: &mut SbitMetrics,
    shape: Shape,
) -> Result<(), Error> {
    let size = byte_size(shape.rows, shape.pitch).ok_or(Error::out_of_memory(usize::MAX))?;
    bitmap.alloc_buffer(size)?;

    bitmap.width = shape.width;
    bitmap.rows = shape.rows;
    bitmap.pitch = shape.pitch;
    bitmap.pixel_mode = PixelMode::Bgra;
    bitmap.num_grays = 256;

    // Both dimensions were checked against `MAX_DIMENSION`.
    metrics.width = u16::try_from(shape.width).unwrap_or(u16::MAX);
    metrics.height = u16::try_from(shape.rows).unwrap_or(u16::MAX);
    Ok(())
}

/// Copies `height` rows of `width * 4` bytes from `source` to `origin` in `bitmap`.
///
/// The caller has established that the region lies inside the target.
pub(crate) fn copy_rows<'a>(
    bitmap: &mut GlyphBitmap,
    origin: Origin,
    rows: impl Iterator<Item = &'a [u8]>,
) {
    let pitch = bitmap.pitch as usize;
    let x = origin.x as usize * 4;
    for (i, row) in rows.enumerate() {
        let start = (origin.y as usize + i) * pitch + x;
        bitmap.buffer[start..start + row.len()].copy_from_slice(row);
    }
}
