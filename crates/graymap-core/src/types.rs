// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Graymap rasters.

use serde::{Deserialize, Serialize};

/// A pixel position; `x` grows rightwards, `y` downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle given by its top-left corner and extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Exclusive right edge, or `None` if it does not fit in `usize`.
    pub fn right(&self) -> Option<usize> {
        self.x.checked_add(self.width)
    }

    /// Exclusive bottom edge, or `None` if it does not fit in `usize`.
    pub fn bottom(&self) -> Option<usize> {
        self.y.checked_add(self.height)
    }
}

/// Darkest and brightest gray level found in a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelStats {
    pub min: u8,
    pub max: u8,
}

/// Pixel-level events reported to a [`crate::PixelObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelEvent {
    /// One pixel was read from a pixel array.
    Read,
    /// One pixel was stored into a pixel array.
    Write,
    /// Two pixels were compared during sub-image matching.
    Compare,
}
