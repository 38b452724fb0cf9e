// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster buffer: the owned width × height array of 8-bit gray levels.
//
// Pixels are stored as a raster scan, left to right and top to bottom, so
// position (x, y) lives at index `y * width + x`. In a 100-pixel-wide raster
// (33, 0) is element 33 and (22, 1) is element 122.

use std::fmt;
use std::sync::Arc;

use graymap_core::error::{GraymapError, Result};
use graymap_core::instrument::PixelObserver;
use graymap_core::types::{PixelEvent, PixelStats, Rect};

/// An 8-bit grayscale image with a per-image maximum gray level.
///
/// Pixels at `maxval` are pure white and pixels at 0 are black. Every stored
/// level is expected to be at most `maxval`; operations that can exceed it
/// clamp explicitly.
///
/// Position arguments are checked: passing a position outside the raster is
/// a programming error and panics.
#[derive(Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    maxval: u8,
    pixels: Vec<u8>,
    observer: Option<Arc<dyn PixelObserver>>,
}

impl Raster {
    // -- Construction ---------------------------------------------------------

    /// Create a black raster of `width × height` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `maxval` is zero.
    pub fn new(width: usize, height: usize, maxval: u8) -> Result<Self> {
        assert!(maxval > 0, "maxval must be positive");

        let len = width.checked_mul(height).ok_or_else(|| {
            GraymapError::Allocation(format!("pixel data ({width}x{height})"))
        })?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| GraymapError::Allocation(format!("pixel data ({width}x{height})")))?;
        pixels.resize(len, 0);

        Ok(Self {
            width,
            height,
            maxval,
            pixels,
            observer: None,
        })
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// # Panics
    ///
    /// Panics if `maxval` is zero or `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, maxval: u8, pixels: Vec<u8>) -> Self {
        assert!(maxval > 0, "maxval must be positive");
        assert_eq!(
            Some(pixels.len()),
            width.checked_mul(height),
            "pixel buffer length does not match {width}x{height}"
        );
        Self {
            width,
            height,
            maxval,
            pixels,
            observer: None,
        }
    }

    /// Attach an observer that receives pixel read/write/compare events.
    ///
    /// Rasters derived from this one (rotations, crops, blur scratch space)
    /// report to the same observer.
    pub fn with_observer(mut self, observer: Arc<dyn PixelObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Create a black raster with this raster's maxval and observer.
    pub(crate) fn derive(&self, width: usize, height: usize) -> Result<Self> {
        let mut derived = Self::new(width, height, self.maxval)?;
        derived.observer = self.observer.clone();
        // Zero-filling stores every pixel once.
        derived.record(PixelEvent::Write, derived.pixels.len() as u64);
        Ok(derived)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn maxval(&self) -> u8 {
        self.maxval
    }

    /// Borrow the raw pixel array in raster-scan order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the raster and return its pixel array.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn observer(&self) -> Option<&Arc<dyn PixelObserver>> {
        self.observer.as_ref()
    }

    // -- Geometry predicates --------------------------------------------------

    /// Whether (x, y) lies inside the raster.
    pub fn valid_position(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Whether `rect` lies completely inside the raster.
    ///
    /// The origin itself must be a valid position, so even an empty rect is
    /// rejected when its corner sits on or past the right or bottom edge.
    pub fn valid_rect(&self, rect: Rect) -> bool {
        self.valid_position(rect.x, rect.y)
            && rect.right().is_some_and(|right| right <= self.width)
            && rect.bottom().is_some_and(|bottom| bottom <= self.height)
    }

    // -- Pixel access ---------------------------------------------------------

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            self.valid_position(x, y),
            "pixel position ({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Gray level at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is not a valid position.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        let i = self.index(x, y);
        self.record(PixelEvent::Read, 1);
        self.pixels[i]
    }

    /// Set the gray level at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is not a valid position.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, level: u8) {
        let i = self.index(x, y);
        self.record(PixelEvent::Write, 1);
        self.pixels[i] = level;
    }

    #[inline]
    pub(crate) fn record(&self, event: PixelEvent, count: u64) {
        if let Some(observer) = &self.observer {
            observer.add(event, count);
        }
    }

    // -- Statistics -----------------------------------------------------------

    /// Minimum and maximum gray level, or `None` for a raster with no pixels.
    pub fn stats(&self) -> Option<PixelStats> {
        let mut stats: Option<PixelStats> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let level = self.get_pixel(x, y);
                stats = Some(match stats {
                    None => PixelStats {
                        min: level,
                        max: level,
                    },
                    Some(s) => PixelStats {
                        min: s.min.min(level),
                        max: s.max.max(level),
                    },
                });
            }
        }
        stats
    }
}

impl PartialEq for Raster {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.maxval == other.maxval
            && self.pixels == other.pixels
    }
}

impl Eq for Raster {}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("maxval", &self.maxval)
            .field("pixels", &self.pixels.len())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graymap_core::error::ErrorKind;
    use graymap_core::instrument::PixelCounters;

    #[test]
    fn new_raster_is_black() {
        let img = Raster::new(4, 3, 255).expect("create failed");
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 3);
        assert_eq!(img.maxval(), 255);
        assert_eq!(img.pixels().len(), 12);
        assert!(img.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn empty_raster_is_allowed() {
        let img = Raster::new(0, 5, 10).expect("create failed");
        assert!(img.pixels().is_empty());
        assert!(!img.valid_position(0, 0));
        assert_eq!(img.stats(), None);
    }

    #[test]
    #[should_panic(expected = "maxval must be positive")]
    fn zero_maxval_panics() {
        let _ = Raster::new(1, 1, 0);
    }

    /// A size that cannot be represented is reported, not aborted on.
    #[test]
    fn oversized_raster_is_an_allocation_error() {
        let err = Raster::new(usize::MAX, 2, 255).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Allocation);

        let err = Raster::new(isize::MAX as usize + 1, 1, 255).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Allocation);
    }

    /// Every level up to maxval reads back exactly as it was written.
    #[test]
    fn set_then_get_round_trips() {
        let mut img = Raster::new(3, 2, 200).expect("create failed");
        for v in 0..=200u8 {
            for y in 0..2 {
                for x in 0..3 {
                    img.set_pixel(x, y, v);
                    assert_eq!(img.get_pixel(x, y), v);
                }
            }
        }
    }

    #[test]
    fn raster_scan_layout() {
        let mut img = Raster::new(100, 2, 255).expect("create failed");
        img.set_pixel(33, 0, 1);
        img.set_pixel(22, 1, 2);
        assert_eq!(img.pixels()[33], 1);
        assert_eq!(img.pixels()[122], 2);
    }

    #[test]
    #[should_panic(expected = "outside 4x3 raster")]
    fn get_outside_panics() {
        let img = Raster::new(4, 3, 255).expect("create failed");
        img.get_pixel(4, 0);
    }

    #[test]
    #[should_panic(expected = "outside 4x3 raster")]
    fn set_outside_panics() {
        let mut img = Raster::new(4, 3, 255).expect("create failed");
        img.set_pixel(0, 3, 1);
    }

    #[test]
    fn rect_validity() {
        let img = Raster::new(4, 3, 255).expect("create failed");
        assert!(img.valid_rect(Rect::new(0, 0, 4, 3)));
        assert!(img.valid_rect(Rect::new(3, 2, 1, 1)));
        assert!(img.valid_rect(Rect::new(1, 1, 0, 0)));
        assert!(!img.valid_rect(Rect::new(1, 0, 4, 1)));
        assert!(!img.valid_rect(Rect::new(0, 1, 1, 3)));
        // Origin on the edge is never valid, even with zero extent.
        assert!(!img.valid_rect(Rect::new(4, 0, 0, 0)));
        assert!(!img.valid_rect(Rect::new(2, 0, usize::MAX, 1)));
    }

    #[test]
    fn stats_finds_extremes() {
        let mut img = Raster::new(3, 3, 255).expect("create failed");
        for y in 0..3 {
            for x in 0..3 {
                img.set_pixel(x, y, 50);
            }
        }
        img.set_pixel(0, 2, 7);
        img.set_pixel(2, 1, 230);
        assert_eq!(img.stats(), Some(PixelStats { min: 7, max: 230 }));
    }

    #[test]
    #[should_panic(expected = "pixel buffer length")]
    fn from_pixels_checks_length() {
        let _ = Raster::from_pixels(2, 2, 255, vec![0; 3]);
    }

    /// Clones own their pixels; equality ignores the observer.
    #[test]
    fn clone_is_independent() {
        let counters = Arc::new(PixelCounters::new());
        let original = Raster::from_pixels(2, 1, 9, vec![1, 2]).with_observer(counters);
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_pixel(0, 0, 9);
        assert_ne!(copy, original);
        assert_eq!(original.get_pixel(0, 0), 1);
        assert_eq!(original, Raster::from_pixels(2, 1, 9, vec![1, 2]));
    }

    #[test]
    fn observer_counts_reads_and_writes() {
        let counters = Arc::new(PixelCounters::new());
        let mut img = Raster::new(2, 2, 255)
            .expect("create failed")
            .with_observer(counters.clone());

        img.set_pixel(1, 1, 3);
        let _ = img.get_pixel(1, 1);
        let _ = img.get_pixel(0, 0);

        let derived = img.derive(3, 1).expect("derive failed");
        assert!(derived.observer().is_some());

        let snap = counters.snapshot();
        assert_eq!(snap.reads, 2);
        assert_eq!(snap.writes, 1 + 3);
        assert_eq!(snap.accesses, 6);
    }
}
