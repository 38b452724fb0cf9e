// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion between `Raster` and the `image` crate's `GrayImage`.
//
// Conversions copy pixel levels verbatim; no rescaling between maxval and
// the 0..=255 range of `GrayImage` takes place.

use graymap_core::error::{GraymapError, Result};
use image::GrayImage;

use super::Raster;

impl Raster {
    /// Copy the pixels into an `image::GrayImage`.
    ///
    /// Fails with `Conversion` when a dimension does not fit in `u32`.
    pub fn to_gray_image(&self) -> Result<GrayImage> {
        let width = u32::try_from(self.width()).map_err(|_| {
            GraymapError::Conversion(format!("width {} exceeds u32", self.width()))
        })?;
        let height = u32::try_from(self.height()).map_err(|_| {
            GraymapError::Conversion(format!("height {} exceeds u32", self.height()))
        })?;
        GrayImage::from_raw(width, height, self.pixels().to_vec()).ok_or_else(|| {
            GraymapError::Conversion("pixel buffer does not match dimensions".into())
        })
    }

    /// Build a raster from an `image::GrayImage`.
    ///
    /// Levels above `maxval` are clamped to it.
    ///
    /// # Panics
    ///
    /// Panics if `maxval` is zero.
    pub fn from_gray_image(image: &GrayImage, maxval: u8) -> Self {
        let pixels = image.as_raw().iter().map(|&p| p.min(maxval)).collect();
        Self::from_pixels(
            image.width() as usize,
            image.height() as usize,
            maxval,
            pixels,
        )
    }
}
