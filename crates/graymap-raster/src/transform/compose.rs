// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compositing: paste and blend a smaller raster into a region of this one.
//
// Both operators modify `self` in place and only read the other raster.

use graymap_core::types::Rect;
use tracing::{debug, instrument};

use super::round_saturate;
use crate::raster::Raster;

impl Raster {
    /// Copy `src` into this raster with its top-left corner at (x, y).
    ///
    /// Levels are copied verbatim, without rescaling between maxvals.
    ///
    /// # Panics
    ///
    /// Panics if `src` does not fit inside this raster at (x, y).
    #[instrument(skip(self, src), fields(src_width = src.width(), src_height = src.height()))]
    pub fn paste(&mut self, x: usize, y: usize, src: &Raster) {
        self.assert_fits(x, y, src);
        for j in 0..src.height() {
            for i in 0..src.width() {
                let level = src.get_pixel(i, j);
                self.set_pixel(x + i, y + j, level);
            }
        }
        debug!("Paste complete");
    }

    /// Blend `src` into this raster with its top-left corner at (x, y).
    ///
    /// Each covered pixel becomes `(1 - alpha) * dst + alpha * src`, rounded
    /// half up and saturated to `[0, maxval]` of this raster. `alpha` is
    /// usually in `[0, 1]`; other values are accepted and simply saturate.
    ///
    /// # Panics
    ///
    /// Panics if `src` does not fit inside this raster at (x, y).
    #[instrument(skip(self, src), fields(src_width = src.width(), src_height = src.height()))]
    pub fn blend(&mut self, x: usize, y: usize, src: &Raster, alpha: f64) {
        self.assert_fits(x, y, src);
        let maxval = self.maxval();
        for j in 0..src.height() {
            for i in 0..src.width() {
                let below = f64::from(self.get_pixel(x + i, y + j));
                let above = f64::from(src.get_pixel(i, j));
                let blended = (1.0 - alpha) * below + alpha * above;
                self.set_pixel(x + i, y + j, round_saturate(blended, maxval));
            }
        }
        debug!("Blend complete");
    }

    fn assert_fits(&self, x: usize, y: usize, src: &Raster) {
        let rect = Rect::new(x, y, src.width(), src.height());
        assert!(
            self.valid_rect(rect),
            "{}x{} raster does not fit inside {}x{} raster at ({x}, {y})",
            src.width(),
            src.height(),
            self.width(),
            self.height()
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::raster::Raster;

    fn filled(width: usize, height: usize, maxval: u8, level: u8) -> Raster {
        Raster::from_pixels(width, height, maxval, vec![level; width * height])
    }

    #[test]
    fn paste_copies_into_region() {
        let mut dst = filled(4, 3, 255, 9);
        let src = Raster::from_pixels(2, 2, 255, vec![1, 2, 3, 4]);
        dst.paste(1, 1, &src);
        assert_eq!(
            dst.pixels(),
            &[
                9, 9, 9, 9, //
                9, 1, 2, 9, //
                9, 3, 4, 9,
            ]
        );
    }

    #[test]
    fn paste_leaves_source_untouched() {
        let mut dst = filled(3, 3, 255, 0);
        let src = filled(2, 2, 255, 200);
        dst.paste(0, 0, &src);
        assert_eq!(src, filled(2, 2, 255, 200));
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn paste_overhang_panics() {
        let mut dst = filled(3, 3, 255, 0);
        dst.paste(2, 0, &filled(2, 1, 255, 1));
    }

    #[test]
    fn blend_with_zero_alpha_is_noop() {
        let original = Raster::from_pixels(3, 2, 255, vec![0, 40, 80, 120, 160, 200]);
        let mut dst = original.clone();
        dst.blend(0, 0, &filled(2, 2, 255, 255), 0.0);
        assert_eq!(dst, original);
    }

    #[test]
    fn blend_with_full_alpha_replaces_region() {
        let mut dst = filled(3, 3, 255, 10);
        let src = Raster::from_pixels(2, 2, 255, vec![7, 100, 201, 255]);
        dst.blend(1, 1, &src, 1.0);

        let mut expected = filled(3, 3, 255, 10);
        expected.paste(1, 1, &src);
        assert_eq!(dst, expected);
    }

    #[test]
    fn blend_half_rounds_up() {
        let mut dst = Raster::from_pixels(2, 1, 255, vec![10, 0]);
        let src = Raster::from_pixels(2, 1, 255, vec![21, 255]);
        dst.blend(0, 0, &src, 0.5);
        // 15.5 -> 16, 127.5 -> 128
        assert_eq!(dst.pixels(), &[16, 128]);
    }

    /// Alpha outside [0, 1] extrapolates and saturates instead of failing.
    #[test]
    fn blend_extrapolation_saturates() {
        let mut dst = Raster::from_pixels(2, 1, 100, vec![80, 20]);
        let src = Raster::from_pixels(2, 1, 100, vec![20, 80]);
        dst.blend(0, 0, &src, -1.0);
        // 2*80 - 20 = 140 -> 100, 2*20 - 80 = -40 -> 0
        assert_eq!(dst.pixels(), &[100, 0]);
    }
}
