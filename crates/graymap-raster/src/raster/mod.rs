// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module: the owned pixel buffer and its conversion to `image` types.

pub mod buffer;
pub mod interop;

pub use buffer::Raster;
