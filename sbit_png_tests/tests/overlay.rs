// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for writing into a region of an existing bitmap.

use sbit_png::{
    load_sbit_png, ErrorKind, GlyphBitmap, Mode, PngCodec, PngGlyphLoader, SbitMetrics,
    SbitRequest,
};

use crate::util::{encode_rgba, solid, CountingAllocator, SpyCodec};

fn atlas(width: u32, rows: u32, pitch: u32) -> GlyphBitmap {
    let mut bitmap = GlyphBitmap::bgra_with_pitch(width, rows, pitch).unwrap();
    bitmap.buffer.fill(0x11);
    bitmap
}

#[test]
fn overlay_writes_at_offset() {
    let png = encode_rgba(2, 1, &[[255, 0, 0, 255], [0, 0, 255, 128]]);
    let mut bitmap = atlas(4, 3, 20);
    PngGlyphLoader::new(PngCodec::new())
        .overlay(&mut bitmap, &SbitMetrics::with_size(2, 1), 1, 2, &png)
        .unwrap();

    assert_eq!(bitmap.pixel(1, 2), Some([0, 0, 255, 255]));
    assert_eq!(bitmap.pixel(2, 2), Some([128, 0, 0, 128]));
    // Everything outside the destination region is untouched.
    assert_eq!(bitmap.pixel(0, 2), Some([0x11; 4]));
    assert_eq!(bitmap.pixel(3, 2), Some([0x11; 4]));
    assert!(bitmap.row(0).unwrap().iter().all(|&b| b == 0x11));
    assert!(bitmap.row(1).unwrap().iter().all(|&b| b == 0x11));
    assert_eq!(&bitmap.buffer[56..60], &[0x11; 4]);
}

#[test]
fn overlay_fills_bottom_right_corner() {
    let mut bitmap = atlas(3, 3, 12);
    PngGlyphLoader::new(PngCodec::new())
        .overlay(
            &mut bitmap,
            &SbitMetrics::with_size(1, 1),
            2,
            2,
            &solid(1, 1, [7, 8, 9, 255]),
        )
        .unwrap();
    assert_eq!(bitmap.pixel(2, 2), Some([9, 8, 7, 255]));
}

#[test]
fn overlay_mismatch_skips_copy() {
    let mut bitmap = atlas(8, 8, 32);
    let before = bitmap.clone();
    let mut metrics = SbitMetrics::with_size(2, 2);
    let mut allocator = CountingAllocator::default();
    let mut codec = SpyCodec::default();
    load_sbit_png(
        &mut bitmap,
        &mut metrics,
        &SbitRequest::overlay(1, 1),
        &solid(3, 2, [255; 4]),
        &mut allocator,
        &mut codec,
    )
    .unwrap();

    assert_eq!(codec.calls, 1);
    assert_eq!(bitmap, before);
    assert_eq!(metrics, SbitMetrics::with_size(2, 2));
    assert_eq!(allocator.outstanding(), 0);
}

#[test]
fn overlay_out_of_bounds_never_decodes() {
    for (x, y, w, h) in [(3, 0, 2, 1), (0, 3, 1, 2), (0, 0, 5, 1), (i32::MAX, 0, 1, 1)] {
        let mut bitmap = atlas(4, 4, 16);
        let mut allocator = CountingAllocator::default();
        let mut codec = SpyCodec::default();
        let err = load_sbit_png(
            &mut bitmap,
            &mut SbitMetrics::with_size(w, h),
            &SbitRequest::overlay(x, y),
            &solid(u32::from(w), u32::from(h), [1; 4]),
            &mut allocator,
            &mut codec,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "({x}, {y}) {w}x{h}");
        assert_eq!(codec.calls, 0);
        assert!(allocator.requested.is_empty());
    }
}

#[test]
fn overlay_requires_32_bit_target() {
    let mut gray = GlyphBitmap {
        pixel_mode: sbit_png::PixelMode::Gray,
        ..atlas(4, 4, 16)
    };
    let mut codec = SpyCodec::default();
    let err = load_sbit_png(
        &mut gray,
        &mut SbitMetrics::with_size(1, 1),
        &SbitRequest::overlay(0, 0),
        &solid(1, 1, [1; 4]),
        &mut CountingAllocator::default(),
        &mut codec,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let mut bitmap = atlas(4, 4, 16);
    let err = load_sbit_png(
        &mut bitmap,
        &mut SbitMetrics::with_size(1, 1),
        &SbitRequest {
            mode: Mode::Overlay { pixel_depth: 24 },
            ..SbitRequest::overlay(0, 0)
        },
        &solid(1, 1, [1; 4]),
        &mut CountingAllocator::default(),
        &mut codec,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(codec.calls, 0);
}

#[test]
fn overlay_metrics_only_leaves_pixels() {
    let mut bitmap = atlas(2, 2, 8);
    let before = bitmap.clone();
    load_sbit_png(
        &mut bitmap,
        &mut SbitMetrics::with_size(1, 1),
        &SbitRequest::overlay(0, 0).metrics_only(),
        &solid(1, 1, [255; 4]),
        &mut CountingAllocator::default(),
        &mut SpyCodec::default(),
    )
    .unwrap();
    assert_eq!(bitmap, before);
}
