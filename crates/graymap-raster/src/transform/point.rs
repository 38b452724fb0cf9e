// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Point transforms: per-pixel level changes that keep the geometry.
//
// All of these modify the raster in place and never fail.

use tracing::{debug, instrument};

use super::round_saturate;
use crate::raster::Raster;

impl Raster {
    /// Replace every level `L` with `maxval - L` (photographic negative).
    #[instrument(skip(self), fields(width = self.width(), height = self.height()))]
    pub fn negative(&mut self) {
        let maxval = self.maxval();
        self.map_levels(|level| maxval.saturating_sub(level));
        debug!("Negative applied");
    }

    /// Levels below `thr` become black (0); the rest become white (maxval).
    #[instrument(skip(self))]
    pub fn threshold(&mut self, thr: u8) {
        let maxval = self.maxval();
        self.map_levels(|level| if level < thr { 0 } else { maxval });
        debug!("Threshold applied");
    }

    /// Multiply every level by `factor`, rounding half up and saturating at
    /// maxval. Factors above 1.0 brighten; factors below 1.0 darken.
    #[instrument(skip(self))]
    pub fn brighten(&mut self, factor: f64) {
        let maxval = self.maxval();
        self.map_levels(|level| round_saturate(factor * f64::from(level), maxval));
        debug!("Brighten applied");
    }

    /// Apply `f` to every pixel in raster-scan order.
    fn map_levels(&mut self, f: impl Fn(u8) -> u8) {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let level = f(self.get_pixel(x, y));
                self.set_pixel(x, y, level);
            }
        }
    }
}
