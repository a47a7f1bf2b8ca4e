// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::bitmap::PixelMode;

/// Error returned when an embedded PNG glyph cannot be loaded.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the context needed to explain
/// which check rejected the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    context: Context,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn negative_offset(x_offset: i32, y_offset: i32) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            context: Context::NegativeOffset { x_offset, y_offset },
        }
    }

    pub(crate) fn out_of_bounds(x_end: u64, y_end: u64, width: u32, rows: u32) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            context: Context::OutOfBounds {
                x_end,
                y_end,
                width,
                rows,
            },
        }
    }

    pub(crate) fn populate_offset(x_offset: u32, y_offset: u32) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            context: Context::PopulateOffset { x_offset, y_offset },
        }
    }

    pub(crate) fn pixel_depth(depth: u8) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            context: Context::PixelDepth(depth),
        }
    }

    pub(crate) fn pixel_mode(mode: PixelMode) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            context: Context::PixelMode(mode),
        }
    }

    pub(crate) fn bad_target(width: u32, rows: u32, pitch: u32, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            context: Context::BadTarget {
                width,
                rows,
                pitch,
                len,
            },
        }
    }

    pub(crate) fn out_of_memory(size: usize) -> Self {
        Self {
            kind: ErrorKind::OutOfMemory,
            context: Context::Allocation(size),
        }
    }

    pub(crate) fn unknown_format(error: DecodeError) -> Self {
        Self {
            kind: ErrorKind::UnknownFormat,
            context: Context::Decode(error),
        }
    }

    pub(crate) fn short_buffer(expected: usize, actual: usize) -> Self {
        Self {
            kind: ErrorKind::UnknownFormat,
            context: Context::ShortBuffer { expected, actual },
        }
    }

    pub(crate) fn too_large(width: u32, height: u32) -> Self {
        Self {
            kind: ErrorKind::ArrayTooLarge,
            context: Context::TooLarge { width, height },
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.context {
            Context::NegativeOffset { x_offset, y_offset } => {
                write!(f, "negative glyph offset ({x_offset}, {y_offset})")
            }
            Context::OutOfBounds {
                x_end,
                y_end,
                width,
                rows,
            } => write!(
                f,
                "glyph region ending at ({x_end}, {y_end}) exceeds {width}x{rows} bitmap"
            ),
            Context::PopulateOffset { x_offset, y_offset } => write!(
                f,
                "offset ({x_offset}, {y_offset}) given for a populated bitmap, which starts at (0, 0)"
            ),
            Context::PixelDepth(depth) => {
                write!(f, "expected 32 bits per pixel, got {depth}")
            }
            Context::PixelMode(mode) => {
                write!(f, "target bitmap has pixel mode {mode:?}, expected Bgra")
            }
            Context::BadTarget {
                width,
                rows,
                pitch,
                len,
            } => write!(
                f,
                "target bitmap {width}x{rows} with pitch {pitch} does not fit its {len} byte buffer"
            ),
            Context::Allocation(size) => write!(f, "failed to allocate {size} bytes"),
            Context::Decode(error) => write!(f, "could not decode embedded image: {error}"),
            Context::ShortBuffer { expected, actual } => write!(
                f,
                "decoder produced {actual} bytes, expected {expected}"
            ),
            Context::TooLarge { width, height } => write!(
                f,
                "decoded image {width}x{height} exceeds the {MAX_DIMENSION} pixel limit"
            ),
        }
    }
}

impl core::error::Error for Error {}

/// Largest width or height accepted for a populated glyph bitmap.
///
/// Matches the rasterizer's limit; `MAX_DIMENSION * MAX_DIMENSION * 4` fits in a `u32`.
pub const MAX_DIMENSION: u32 = 0x7FFF;

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A negative offset, or an overlay request that does not fit the target bitmap.
    InvalidArgument,

    /// An allocation failed.
    OutOfMemory,

    /// The embedded data is not a decodable image.
    UnknownFormat,

    /// The decoded image exceeds [`MAX_DIMENSION`] in either direction.
    ArrayTooLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    NegativeOffset {
        x_offset: i32,
        y_offset: i32,
    },
    OutOfBounds {
        x_end: u64,
        y_end: u64,
        width: u32,
        rows: u32,
    },
    PopulateOffset {
        x_offset: u32,
        y_offset: u32,
    },
    PixelDepth(u8),
    PixelMode(PixelMode),
    BadTarget {
        width: u32,
        rows: u32,
        pitch: u32,
        len: usize,
    },
    Allocation(usize),
    Decode(DecodeError),
    ShortBuffer {
        expected: usize,
        actual: usize,
    },
    TooLarge {
        width: u32,
        height: u32,
    },
}

/// Failure reported by a [`Codec`](crate::Codec).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The codec could not allocate its output.
    OutOfMemory,

    /// The data is corrupt or not an image at all.
    InvalidData,

    /// The data is an image, but in a form the codec cannot convert to RGBA8.
    Unsupported,

    /// Decoding would exceed the codec's configured memory limit.
    LimitExceeded,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::OutOfMemory => "out of memory",
            Self::InvalidData => "invalid image data",
            Self::Unsupported => "unsupported image layout",
            Self::LimitExceeded => "memory limit exceeded",
        })
    }
}

impl core::error::Error for DecodeError {}
