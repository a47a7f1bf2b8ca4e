// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion from straight-alpha RGBA to premultiplied BGRA.

/// Packs premultiplied channels into a `u32` whose low byte is blue.
#[inline]
pub fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from(b) | (u32::from(g) << 8) | (u32::from(r) << 16) | (u32::from(a) << 24)
}

/// Splits a value created by [`pack`] back into `(r, g, b, a)`.
#[inline]
pub fn unpack(packed: u32) -> (u8, u8, u8, u8) {
    let [b, g, r, a] = packed.to_le_bytes();
    (r, g, b, a)
}

/// Scales `color` by `alpha / 255`, rounding to nearest.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "the result never exceeds 0xFF"
)]
pub fn multiply_alpha(alpha: u8, color: u8) -> u8 {
    let temp = u32::from(alpha) * u32::from(color) + 0x80;
    ((temp + (temp >> 8)) >> 8) as u8
}

/// Premultiplies one straight-alpha RGBA pixel, returning the BGRA bytes.
///
/// Fully transparent pixels become all zero so that no color survives under them.
#[inline]
pub fn premultiply_pixel([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    let packed = match a {
        0 => 0,
        0xFF => pack(r, g, b, a),
        _ => pack(
            multiply_alpha(a, r),
            multiply_alpha(a, g),
            multiply_alpha(a, b),
            a,
        ),
    };
    packed.to_le_bytes()
}

/// Premultiplies a buffer of straight-alpha RGBA pixels in place.
///
/// Each pixel is independent, so rows can be processed in any order.
pub fn premultiply(pixels: &mut [[u8; 4]]) {
    for pixel in pixels {
        *pixel = premultiply_pixel(*pixel);
    }
}
