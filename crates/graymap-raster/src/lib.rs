// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// graymap-raster: 8-bit grayscale raster engine for Graymap.
//
// Provides the owned pixel buffer, raw PGM (P5) load/save, point transforms
// (negative, threshold, brighten), geometric transforms (rotate, mirror,
// crop), compositing (paste, blend), sub-image search, and a box-mean blur.

pub mod codec;
pub mod filter;
pub mod raster;
pub mod search;
pub mod transform;

// Re-export the primary types so callers can use `graymap_raster::Raster` etc.
pub use codec::{decode, decode_with, encode, encode_with, load, load_with, save, save_with};
pub use raster::Raster;

pub use graymap_core::{
    CodecConfig, ErrorKind, FormatError, GraymapError, PixelCounters, PixelObserver, Position,
    Rect, Result,
};
