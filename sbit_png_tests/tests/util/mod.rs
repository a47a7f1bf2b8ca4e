// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixtures shared across tests.

use sbit_png::{Allocator, Codec, DecodeError, Global, PngCodec};

/// Encodes straight-alpha RGBA pixels as an 8-bit RGBA PNG.
pub(crate) fn encode_rgba(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
    assert_eq!(
        pixels.len(),
        (width * height) as usize,
        "pixel count does not match {width}x{height}"
    );
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer
            .write_image_data(&pixels.concat())
            .unwrap();
    }
    bytes
}

/// Encodes a single-color RGBA PNG.
pub(crate) fn solid(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
    encode_rgba(width, height, &vec![pixel; (width * height) as usize])
}

/// Allocator that records every call and can be told to fail.
#[derive(Debug, Default)]
pub(crate) struct CountingAllocator {
    pub(crate) requested: Vec<usize>,
    pub(crate) freed: usize,
    pub(crate) fail: bool,
}

impl CountingAllocator {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of buffers handed out that were never returned.
    pub(crate) fn outstanding(&self) -> usize {
        let handed_out = if self.fail { 0 } else { self.requested.len() };
        handed_out - self.freed
    }
}

impl Allocator for CountingAllocator {
    fn alloc(&mut self, size: usize) -> Option<Vec<u8>> {
        self.requested.push(size);
        if self.fail {
            None
        } else {
            Global.alloc(size)
        }
    }

    fn free(&mut self, buffer: Vec<u8>) {
        self.freed += 1;
        Global.free(buffer);
    }
}

/// [`PngCodec`] wrapper that counts how often it is invoked.
#[derive(Debug, Default)]
pub(crate) struct SpyCodec {
    inner: PngCodec,
    pub(crate) calls: usize,
}

impl Codec for SpyCodec {
    fn decode(&mut self, data: &[u8], out: &mut Vec<u8>) -> Result<(u32, u32), DecodeError> {
        self.calls += 1;
        self.inner.decode(data, out)
    }
}

/// Codec that reports arbitrary dimensions without reading its input.
///
/// Used for sizes too large to encode as real test images.
#[derive(Debug)]
pub(crate) struct FakeDimensions {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Codec for FakeDimensions {
    fn decode(&mut self, _data: &[u8], out: &mut Vec<u8>) -> Result<(u32, u32), DecodeError> {
        out.clear();
        out.resize((self.width * self.height * 4) as usize, 0xFF);
        Ok((self.width, self.height))
    }
}

/// Per-glyph metrics of a `CBDT` format 17 record.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SmallMetrics {
    pub(crate) width: u8,
    pub(crate) height: u8,
    pub(crate) bearing_x: i8,
    pub(crate) bearing_y: i8,
    pub(crate) advance: u8,
}

/// Builds a font with a single 16 ppem color strike that holds `png` as glyph 1.
///
/// The font contains only `CBDT` and `CBLC`. The strike uses an index subtable
/// of format 1 and stores the glyph in image format 17 (small metrics, PNG data).
pub(crate) fn cbdt_font(metrics: SmallMetrics, png: &[u8]) -> Vec<u8> {
    let mut cbdt = Vec::new();
    // majorVersion, minorVersion
    cbdt.extend_from_slice(&3_u16.to_be_bytes());
    cbdt.extend_from_slice(&0_u16.to_be_bytes());
    cbdt.push(metrics.height);
    cbdt.push(metrics.width);
    cbdt.extend_from_slice(&metrics.bearing_x.to_be_bytes());
    cbdt.extend_from_slice(&metrics.bearing_y.to_be_bytes());
    cbdt.push(metrics.advance);
    cbdt.extend_from_slice(&(png.len() as u32).to_be_bytes());
    cbdt.extend_from_slice(png);
    let glyph_len = (cbdt.len() - 4) as u32;

    let mut cblc = Vec::new();
    // majorVersion, minorVersion, numSizes
    cblc.extend_from_slice(&3_u16.to_be_bytes());
    cblc.extend_from_slice(&0_u16.to_be_bytes());
    cblc.extend_from_slice(&1_u32.to_be_bytes());
    // BitmapSize: the index subtable list starts right after it and holds one
    // 8 byte record followed by a 16 byte format 1 subtable.
    cblc.extend_from_slice(&56_u32.to_be_bytes());
    cblc.extend_from_slice(&24_u32.to_be_bytes());
    cblc.extend_from_slice(&1_u32.to_be_bytes());
    cblc.extend_from_slice(&0_u32.to_be_bytes());
    // hori and vert line metrics
    cblc.extend_from_slice(&[0; 24]);
    // startGlyphIndex, endGlyphIndex
    cblc.extend_from_slice(&1_u16.to_be_bytes());
    cblc.extend_from_slice(&1_u16.to_be_bytes());
    // ppemX, ppemY, bitDepth, flags (horizontal)
    cblc.extend_from_slice(&[16, 16, 32, 1]);
    // IndexSubtableRecord: glyphs 1..=1, subtable 8 bytes into the list
    cblc.extend_from_slice(&1_u16.to_be_bytes());
    cblc.extend_from_slice(&1_u16.to_be_bytes());
    cblc.extend_from_slice(&8_u32.to_be_bytes());
    // IndexSubtable1: indexFormat, imageFormat, imageDataOffset, sbitOffsets
    cblc.extend_from_slice(&1_u16.to_be_bytes());
    cblc.extend_from_slice(&17_u16.to_be_bytes());
    cblc.extend_from_slice(&4_u32.to_be_bytes());
    cblc.extend_from_slice(&0_u32.to_be_bytes());
    cblc.extend_from_slice(&glyph_len.to_be_bytes());

    sfnt(&[(*b"CBDT", &cbdt[..]), (*b"CBLC", &cblc[..])])
}

/// Wraps `tables`, which must be sorted by tag, in an sfnt table directory.
fn sfnt(tables: &[([u8; 4], &[u8])]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let mut data = Vec::new();
    data.extend_from_slice(&0x0001_0000_u32.to_be_bytes());
    data.extend_from_slice(&num_tables.to_be_bytes());
    // searchRange, entrySelector, rangeShift are not consulted when reading.
    data.extend_from_slice(&[0; 6]);

    let mut offset = 12 + 16 * tables.len();
    for (tag, table) in tables {
        data.extend_from_slice(tag);
        data.extend_from_slice(&0_u32.to_be_bytes());
        data.extend_from_slice(&(offset as u32).to_be_bytes());
        data.extend_from_slice(&(table.len() as u32).to_be_bytes());
        offset += table.len().next_multiple_of(4);
    }
    for (_, table) in tables {
        data.extend_from_slice(table);
        data.resize(data.len().next_multiple_of(4), 0);
    }
    data
}
