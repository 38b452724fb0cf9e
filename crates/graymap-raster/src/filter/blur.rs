// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Box blur: replaces each pixel with the mean of a (2dx+1) x (2dy+1)
// window around it.
//
// The window is clamped to the raster rather than padded, so pixels near the
// border average over fewer neighbours. Window sums come from a summed-area
// table; they are exact integers, identical to summing the window directly.

use graymap_core::error::{GraymapError, Result};
use tracing::{debug, instrument};

use crate::raster::Raster;

impl Raster {
    /// Blur in place with a mean filter over `[x-dx, x+dx] × [y-dy, y+dy]`,
    /// clamped to the raster.
    ///
    /// Means are rounded half up. Every output pixel is computed from the
    /// original levels: results go to a scratch raster that is pasted back
    /// once complete. Fails only if the scratch space cannot be allocated,
    /// in which case the raster is unchanged.
    #[instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn blur(&mut self, dx: usize, dy: usize) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return Ok(());
        }

        let table = SummedArea::build(self)?;
        let mut blurred = self.derive(width, height)?;

        for y in 0..height {
            let top = y.saturating_sub(dy);
            let bottom = y.saturating_add(dy).min(height - 1);
            for x in 0..width {
                let left = x.saturating_sub(dx);
                let right = x.saturating_add(dx).min(width - 1);

                let sum = table.window_sum(left, top, right, bottom);
                let count = (right - left + 1) * (bottom - top + 1);
                let mean = sum as f64 / count as f64;
                blurred.set_pixel(x, y, (mean + 0.5) as u8);
            }
        }

        self.paste(0, 0, &blurred);
        debug!("Blur complete");
        Ok(())
    }
}

/// Summed-area table with a zero top row and left column.
///
/// `table[y * stride + x]` holds the sum of all pixels in `[0, x) × [0, y)`.
struct SummedArea {
    stride: usize,
    table: Vec<u64>,
}

impl SummedArea {
    fn build(raster: &Raster) -> Result<Self> {
        let (width, height) = (raster.width(), raster.height());
        let stride = width + 1;
        let len = stride.checked_mul(height + 1).ok_or_else(|| {
            GraymapError::Allocation(format!("blur window sums ({width}x{height})"))
        })?;

        let mut table = Vec::new();
        table
            .try_reserve_exact(len)
            .map_err(|_| GraymapError::Allocation(format!("blur window sums ({width}x{height})")))?;
        table.resize(len, 0u64);

        for y in 0..height {
            let mut row_sum = 0u64;
            for x in 0..width {
                row_sum += u64::from(raster.get_pixel(x, y));
                table[(y + 1) * stride + x + 1] = row_sum + table[y * stride + x + 1];
            }
        }

        Ok(Self { stride, table })
    }

    /// Sum over the inclusive window `[left, right] × [top, bottom]`.
    fn window_sum(&self, left: usize, top: usize, right: usize, bottom: usize) -> u64 {
        let at = |x: usize, y: usize| self.table[y * self.stride + x];
        let (x1, y1, x2, y2) = (left, top, right + 1, bottom + 1);
        (at(x2, y2) + at(x1, y1)) - (at(x2, y1) + at(x1, y2))
    }
}
