// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `sbit_png`.
//!
//! - The `util` module contains fixtures shared by the tests: a PNG encoder,
//!   an allocator that counts its calls, and a codec that records whether it ran.
//! - As in the other test crates of this workspace, `mod.rs` is the single
//!   entry point instead of one binary per file.
//! - Put the "topic" of a test at the start of its name, e.g. `overlay_mismatch_skips_copy`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod overlay;
mod util;
