// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometric transforms: rotate, mirror, crop.
//
// Each returns a new raster with the source's maxval; the source is left
// untouched. The only failure is running out of memory for the result.

use graymap_core::error::Result;
use graymap_core::types::Rect;
use tracing::{debug, instrument};

use crate::raster::Raster;

impl Raster {
    /// Rotate 90 degrees anticlockwise.
    ///
    /// The result is `height × width`; source pixel (x, y) lands at
    /// (y, result.height - 1 - x).
    #[instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn rotate_ccw90(&self) -> Result<Raster> {
        let mut rotated = self.derive(self.height(), self.width())?;
        let last_row = rotated.height().saturating_sub(1);
        for y in 0..self.height() {
            for x in 0..self.width() {
                rotated.set_pixel(y, last_row - x, self.get_pixel(x, y));
            }
        }
        debug!("Rotation complete");
        Ok(rotated)
    }

    /// Flip left-right: source pixel (x, y) lands at (width - 1 - x, y).
    #[instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn mirror_horizontal(&self) -> Result<Raster> {
        let mut mirrored = self.derive(self.width(), self.height())?;
        let last_col = mirrored.width().saturating_sub(1);
        for y in 0..self.height() {
            for x in 0..self.width() {
                mirrored.set_pixel(last_col - x, y, self.get_pixel(x, y));
            }
        }
        debug!("Mirror complete");
        Ok(mirrored)
    }

    /// Copy the sub-image covered by `rect` into a new raster.
    ///
    /// # Panics
    ///
    /// Panics if `rect` is not completely inside the raster.
    #[instrument(skip(self))]
    pub fn crop(&self, rect: Rect) -> Result<Raster> {
        assert!(
            self.valid_rect(rect),
            "crop rectangle {rect:?} outside {}x{} raster",
            self.width(),
            self.height()
        );

        let mut cropped = self.derive(rect.width, rect.height)?;
        for j in 0..rect.height {
            for i in 0..rect.width {
                // TODO: decide whether levels should be rescaled once crops can
                // target a raster with a different maxval.
                cropped.set_pixel(i, j, self.get_pixel(rect.x + i, rect.y + j));
            }
        }
        debug!(width = rect.width, height = rect.height, "Crop complete");
        Ok(cropped)
    }
}
