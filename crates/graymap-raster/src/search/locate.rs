// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sub-image search.
//
// Matching compares pixel levels exactly. Location tries every top-left
// offset in raster-scan order and stops at the first match.

use graymap_core::types::{PixelEvent, Position, Rect};
use tracing::{debug, instrument};

use crate::raster::Raster;

impl Raster {
    /// Whether `template` matches the region of this raster starting at
    /// (x, y).
    ///
    /// Rows are bounded by `min(height - y, template.width)` and columns by
    /// `min(width - x, template.height)`: the template's width limits rows and
    /// its height limits columns. Parts of the template hanging past this
    /// raster's edges are not compared. With a non-square template the loop
    /// can step outside the template, which trips its position check.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is not a valid position in this raster, or if the
    /// bounds above reach outside `template`.
    pub fn match_sub_image(&self, x: usize, y: usize, template: &Raster) -> bool {
        assert!(
            self.valid_position(x, y),
            "match position ({x}, {y}) outside {}x{} raster",
            self.width(),
            self.height()
        );

        let rows = (self.height() - y).min(template.width());
        let cols = (self.width() - x).min(template.height());
        for j in 0..rows {
            for i in 0..cols {
                self.record(PixelEvent::Compare, 1);
                if self.get_pixel(x + i, y + j) != template.get_pixel(i, j) {
                    return false;
                }
            }
        }
        true
    }

    /// Find the first offset at which `template` matches.
    ///
    /// Offsets are scanned top to bottom, then left to right.
    ///
    /// # Panics
    ///
    /// Panics if `template` is larger than this raster in either dimension,
    /// or if this raster is empty.
    #[instrument(skip_all, fields(template_width = template.width(), template_height = template.height()))]
    pub fn locate_sub_image(&self, template: &Raster) -> Option<Position> {
        assert!(
            self.valid_rect(Rect::new(0, 0, template.width(), template.height())),
            "{}x{} template does not fit inside {}x{} raster",
            template.width(),
            template.height(),
            self.width(),
            self.height()
        );

        for j in 0..=self.height() - template.height() {
            for i in 0..=self.width() - template.width() {
                if self.match_sub_image(i, j, template) {
                    debug!(x = i, y = j, "Sub-image found");
                    return Some(Position::new(i, j));
                }
            }
        }
        debug!("Sub-image not found");
        None
    }
}
