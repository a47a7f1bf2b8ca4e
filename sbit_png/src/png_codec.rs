// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Codec`] implementation backed by the `png` crate.

use alloc::vec::Vec;

use png::{BitDepth, ColorType, Decoder, DecodingError, Limits, Transformations};

use crate::bitmap::rgba_size;
use crate::codec::Codec;
use crate::error::DecodeError;

/// Default cap on the memory a single decode may use.
pub const DEFAULT_LIMIT: usize = 64 * 1024 * 1024;

/// Decodes PNG data into RGBA8, expanding every PNG color type and bit depth.
#[derive(Copy, Clone, Debug)]
pub struct PngCodec {
    limit: usize,
}

impl PngCodec {
    /// Creates a codec with the [default memory limit](DEFAULT_LIMIT).
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    /// Creates a codec that refuses images needing more than `bytes` bytes.
    pub fn with_limit(bytes: usize) -> Self {
        Self { limit: bytes }
    }

    /// The memory limit in bytes.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for PngCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for PngCodec {
    fn decode(&mut self, data: &[u8], out: &mut Vec<u8>) -> Result<(u32, u32), DecodeError> {
        let mut decoder = Decoder::new_with_limits(data, Limits { bytes: self.limit });
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
        let mut reader = decoder.read_info().map_err(map_error)?;

        let (width, height) = reader.info().size();
        let size = rgba_size(width, height).ok_or(DecodeError::LimitExceeded)?;
        if size > self.limit {
            log::debug!("{width}x{height} png exceeds the {} byte limit", self.limit);
            return Err(DecodeError::LimitExceeded);
        }

        let mut frame = Vec::new();
        frame
            .try_reserve_exact(reader.output_buffer_size())
            .map_err(|_| DecodeError::OutOfMemory)?;
        frame.resize(reader.output_buffer_size(), 0);
        let info = reader.next_frame(&mut frame).map_err(map_error)?;
        frame.truncate(info.buffer_size());

        out.clear();
        out.try_reserve_exact(size)
            .map_err(|_| DecodeError::OutOfMemory)?;
        expand_to_rgba(&frame, info.color_type, info.bit_depth, out)?;
        if out.len() != size {
            return Err(DecodeError::InvalidData);
        }
        Ok((width, height))
    }
}

/// Appends the 8-bit samples in `frame` to `out` as RGBA.
fn expand_to_rgba(
    frame: &[u8],
    color_type: ColorType,
    bit_depth: BitDepth,
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    if bit_depth != BitDepth::Eight {
        return Err(DecodeError::Unsupported);
    }
    match color_type {
        ColorType::Rgba => out.extend_from_slice(frame),
        ColorType::Rgb => {
            for rgb in frame.chunks_exact(3) {
                out.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 0xFF]);
            }
        }
        ColorType::GrayscaleAlpha => {
            for ga in frame.chunks_exact(2) {
                out.extend_from_slice(&[ga[0], ga[0], ga[0], ga[1]]);
            }
        }
        ColorType::Grayscale => {
            for &g in frame {
                out.extend_from_slice(&[g, g, g, 0xFF]);
            }
        }
        ColorType::Indexed => return Err(DecodeError::Unsupported),
    }
    Ok(())
}

fn map_error(error: DecodingError) -> DecodeError {
    log::debug!("png decoding failed: {error}");
    match error {
        DecodingError::LimitsExceeded => DecodeError::LimitExceeded,
        DecodingError::Parameter(_) => DecodeError::Unsupported,
        _ => DecodeError::InvalidData,
    }
}
