// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph bitmap and embedded bitmap metrics.

use alloc::vec::Vec;

use crate::error::Error;

/// Pixel layout of a [`GlyphBitmap`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PixelMode {
    /// No pixel data has been assigned yet.
    #[default]
    None,
    /// One bit per pixel.
    Mono,
    /// One byte of coverage per pixel.
    Gray,
    /// Four bytes per pixel, premultiplied, stored as blue, green, red, alpha.
    Bgra,
}

/// The pixel buffer and shape of one rendered glyph image.
///
/// The buffer is owned by the glyph once allocated. Rows start `pitch` bytes
/// apart, which may be more than `width * 4` when the bitmap is an atlas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Pixel storage, `rows * pitch` bytes.
    pub buffer: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Number of pixel rows.
    pub rows: u32,
    /// Distance in bytes between the starts of consecutive rows.
    pub pitch: u32,
    /// Layout of each pixel.
    pub pixel_mode: PixelMode,
    /// Number of gray levels.
    pub num_grays: u16,
}

impl GlyphBitmap {
    /// Creates an empty bitmap with no pixel data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zeroed BGRA bitmap with a tightly packed pitch.
    ///
    /// Returns an error if the buffer cannot be allocated.
    pub fn bgra(width: u32, rows: u32) -> Result<Self, Error> {
        let pitch = width.checked_mul(4).ok_or(Error::out_of_memory(usize::MAX))?;
        Self::bgra_with_pitch(width, rows, pitch)
    }

    /// Creates a zeroed BGRA bitmap whose rows are `pitch` bytes apart.
    ///
    /// `pitch` is raised to `width * 4` if it is smaller.
    pub fn bgra_with_pitch(width: u32, rows: u32, pitch: u32) -> Result<Self, Error> {
        let pitch = pitch.max(width.saturating_mul(4));
        let mut bitmap = Self {
            width,
            rows,
            pitch,
            pixel_mode: PixelMode::Bgra,
            num_grays: 256,
            ..Self::default()
        };
        let size = byte_size(rows, pitch).ok_or(Error::out_of_memory(usize::MAX))?;
        bitmap.alloc_buffer(size)?;
        Ok(bitmap)
    }

    /// Replaces the pixel buffer with a zeroed one of `size` bytes.
    ///
    /// On failure the existing buffer is left untouched.
    pub fn alloc_buffer(&mut self, size: usize) -> Result<(), Error> {
        self.buffer = zeroed(size)?;
        Ok(())
    }

    /// Returns the bytes of row `y`, excluding any padding past `width`.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.rows {
            return None;
        }
        let start = usize::try_from(u64::from(y) * u64::from(self.pitch)).ok()?;
        let len = usize::try_from(self.row_bytes()).ok()?;
        self.buffer.get(start..start.checked_add(len)?)
    }

    /// Returns the four bytes of the BGRA pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if self.pixel_mode != PixelMode::Bgra || x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        let start = usize::try_from(x).ok()? * 4;
        row.get(start..start + 4)?.try_into().ok()
    }

    /// Returns `true` if the shape describes a bitmap whose rows all fit in the buffer.
    pub(crate) fn fits_buffer(&self) -> bool {
        u64::from(self.pitch) >= self.row_bytes()
            && byte_size(self.rows, self.pitch).is_some_and(|size| size <= self.buffer.len())
    }

    /// Number of bytes covered by `width` pixels.
    fn row_bytes(&self) -> u64 {
        let width = u64::from(self.width);
        match self.pixel_mode {
            PixelMode::None => 0,
            PixelMode::Mono => width.div_ceil(8),
            PixelMode::Gray => width,
            PixelMode::Bgra => width * 4,
        }
    }
}

/// Embedded bitmap metrics for a single glyph, in pixels.
///
/// `width` and `height` are what the font declares; loading a glyph in
/// populate mode overwrites them with the decoded image's dimensions.
///
/// [`load_bitmap_glyph`](crate::load_bitmap_glyph) fills in the horizontal
/// fields only. Bitmap strikes carry no per-glyph vertical metrics, so
/// `vert_bearing_x`, `vert_bearing_y` and `vert_advance` are left at zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SbitMetrics {
    /// Number of columns.
    pub width: u16,
    /// Number of rows.
    pub height: u16,
    /// Horizontal distance from the pen position to the left edge.
    pub hori_bearing_x: i16,
    /// Vertical distance from the baseline to the top edge.
    pub hori_bearing_y: i16,
    /// Horizontal advance.
    pub hori_advance: u16,
    /// Horizontal distance from the vertical origin to the left edge.
    pub vert_bearing_x: i16,
    /// Vertical distance from the vertical origin to the top edge.
    pub vert_bearing_y: i16,
    /// Vertical advance.
    pub vert_advance: u16,
}

impl SbitMetrics {
    /// Creates metrics with only the declared dimensions set.
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

/// `rows * pitch` as a `usize`, or `None` on overflow.
pub(crate) fn byte_size(rows: u32, pitch: u32) -> Option<usize> {
    usize::try_from(u64::from(rows) * u64::from(pitch)).ok()
}

/// `width * height * 4` as a `usize`, or `None` if it does not fit.
pub(crate) fn rgba_size(width: u32, height: u32) -> Option<usize> {
    let size = u64::from(width)
        .checked_mul(u64::from(height))?
        .checked_mul(4)?;
    usize::try_from(size).ok()
}

fn zeroed(size: usize) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(size)
        .map_err(|_| Error::out_of_memory(size))?;
    buffer.resize(size, 0);
    Ok(buffer)
}
