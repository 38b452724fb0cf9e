// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transform module: point transforms, geometric transforms, and compositing.

pub mod compose;
pub mod geometry;
pub mod point;

/// Round half up and saturate to `[0, maxval]`.
///
/// Adding 0.5 before truncation only rounds correctly for non-negative
/// values; the clamp runs first, so negative inputs become 0.
pub(crate) fn round_saturate(value: f64, maxval: u8) -> u8 {
    (value + 0.5).clamp(0.0, f64::from(maxval)) as u8
}
