// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The image codec seam and the adapter that drives it.

use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};

use crate::bitmap::{rgba_size, SbitMetrics};
use crate::error::{DecodeError, Error};
use crate::scratch::{Allocator, ScratchBuffer};

/// Decodes compressed image bytes into straight-alpha RGBA8.
pub trait Codec {
    /// Decodes `data` into `out`, returning the image's width and height.
    ///
    /// `out` arrives with capacity for the dimensions the font declares and
    /// may hold stale bytes. The codec replaces its contents and must leave
    /// exactly `width * height * 4` bytes of row-major RGBA pixels in it.
    fn decode(&mut self, data: &[u8], out: &mut Vec<u8>) -> Result<(u32, u32), DecodeError>;
}

impl<C: Codec + ?Sized> Codec for &mut C {
    fn decode(&mut self, data: &[u8], out: &mut Vec<u8>) -> Result<(u32, u32), DecodeError> {
        (**self).decode(data, out)
    }
}

/// A decoded image whose pixels live in a scratch buffer.
pub(crate) struct Decoded<'a, A: Allocator + ?Sized> {
    pub(crate) pixels: ScratchBuffer<'a, A>,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl<A: Allocator + ?Sized> Decoded<'_, A> {
    /// Row-major pixels, four bytes each.
    pub(crate) fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        // `decode_image` checked the length is exactly `width * height * 4`.
        bytemuck::cast_slice_mut(&mut self.pixels[..])
    }

    pub(crate) fn row(&self, y: usize) -> &[u8] {
        let stride = self.width as usize * 4;
        &self.pixels[y * stride..(y + 1) * stride]
    }
}

impl<A: Allocator + ?Sized> Debug for Decoded<'_, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Decoded")
            .field("pixels", &self.pixels)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Decodes `data` into a scratch buffer borrowed from `allocator`.
///
/// The initial allocation is sized from the declared metrics so that memory
/// use is bounded by what the font claims before any decoding happens.
pub(crate) fn decode_image<'a, C, A>(
    codec: &mut C,
    allocator: &'a mut A,
    data: &[u8],
    declared: &SbitMetrics,
) -> Result<Decoded<'a, A>, Error>
where
    C: Codec + ?Sized,
    A: Allocator + ?Sized,
{
    let size = rgba_size(declared.width.into(), declared.height.into())
        .ok_or(Error::out_of_memory(usize::MAX))?;
    let mut pixels = ScratchBuffer::new(allocator, size).ok_or(Error::out_of_memory(size))?;

    let (width, height) = match codec.decode(data, pixels.as_mut_vec()) {
        Ok(dimensions) => dimensions,
        Err(DecodeError::OutOfMemory) => {
            log::debug!("codec ran out of memory decoding {} bytes", data.len());
            return Err(Error::out_of_memory(size));
        }
        Err(error) => {
            log::debug!("rejecting embedded image of {} bytes: {error}", data.len());
            return Err(Error::unknown_format(error));
        }
    };

    let expected = rgba_size(width, height);
    if expected != Some(pixels.len()) {
        let expected = expected.unwrap_or(usize::MAX);
        log::debug!(
            "codec returned {} bytes for a {width}x{height} image",
            pixels.len()
        );
        return Err(Error::short_buffer(expected, pixels.len()));
    }

    Ok(Decoded {
        pixels,
        width,
        height,
    })
}
