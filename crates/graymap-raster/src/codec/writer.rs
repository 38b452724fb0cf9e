// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raw PGM writer: emits a P5 header followed by the pixel block.
//
// A failed save can leave a partial, invalid file behind; the file is
// written in place rather than through a temporary and rename.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use graymap_core::config::CodecConfig;
use graymap_core::error::{GraymapError, IoOp, Result};
use graymap_core::types::PixelEvent;
use tracing::{debug, info, instrument};

use crate::raster::Raster;

/// Save `raster` as a raw PGM file with the default configuration.
pub fn save(raster: &Raster, path: impl AsRef<Path>) -> Result<()> {
    save_with(raster, path, &CodecConfig::default())
}

/// Save `raster` as a raw PGM file, creating or truncating `path`.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_with(raster: &Raster, path: impl AsRef<Path>, config: &CodecConfig) -> Result<()> {
    let path = path.as_ref();
    if config.create_parent_dirs {
        ensure_parent_dir(path)?;
    }
    let file = File::create(path).map_err(|err| GraymapError::io(IoOp::Create, err))?;
    encode_with(raster, BufWriter::new(file), config)?;
    info!(
        width = raster.width(),
        height = raster.height(),
        maxval = raster.maxval(),
        "Image saved"
    );
    Ok(())
}

/// Encode `raster` to a writer with the default configuration.
pub fn encode<W: Write>(raster: &Raster, writer: W) -> Result<()> {
    encode_with(raster, writer, &CodecConfig::default())
}

/// Encode `raster` as `P5`, optional comment lines, `width height`, `maxval`,
/// then the raw pixels in row-major order.
pub fn encode_with<W: Write>(raster: &Raster, mut writer: W, config: &CodecConfig) -> Result<()> {
    let header = header_bytes(raster, config);
    writer
        .write_all(&header)
        .map_err(|err| GraymapError::io(IoOp::WriteHeader, err))?;

    writer
        .write_all(raster.pixels())
        .map_err(|err| GraymapError::io(IoOp::WritePixels, err))?;
    raster.record(PixelEvent::Read, raster.pixels().len() as u64);

    writer
        .flush()
        .map_err(|err| GraymapError::io(IoOp::Flush, err))?;
    debug!(
        header_len = header.len(),
        pixel_len = raster.pixels().len(),
        "PGM encoded"
    );
    Ok(())
}

fn header_bytes(raster: &Raster, config: &CodecConfig) -> Vec<u8> {
    let mut header = String::from("P5\n");
    if let Some(comment) = &config.comment {
        for line in comment.lines() {
            header.push_str("# ");
            header.push_str(line);
            header.push('\n');
        }
    }
    header.push_str(&format!(
        "{} {}\n{}\n",
        raster.width(),
        raster.height(),
        raster.maxval()
    ));
    header.into_bytes()
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| GraymapError::io(IoOp::Create, err))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::reader::{decode, load};

    fn sample() -> Raster {
        Raster::from_pixels(3, 2, 200, vec![0, 50, 100, 150, 200, 7])
    }

    #[test]
    fn header_layout() {
        let mut out = Vec::new();
        encode(&sample(), &mut out).expect("encode failed");
        assert_eq!(&out[..11], b"P5\n3 2\n200\n");
        assert_eq!(&out[11..], &[0, 50, 100, 150, 200, 7]);
    }

    #[test]
    fn comment_lines_follow_magic() {
        let config = CodecConfig {
            comment: Some("first\nsecond".into()),
            ..CodecConfig::default()
        };
        let mut out = Vec::new();
        encode_with(&sample(), &mut out, &config).expect("encode failed");
        assert!(out.starts_with(b"P5\n# first\n# second\n3 2\n200\n"));

        let back = decode(&out[..]).expect("decode failed");
        assert_eq!(back, sample());
    }

    /// Saving then loading yields identical dimensions, maxval, and pixels.
    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("sample.pgm");

        let mut img = Raster::new(17, 9, 255).expect("create failed");
        for y in 0..9 {
            for x in 0..17 {
                img.set_pixel(x, y, ((x * 31 + y * 7) % 256) as u8);
            }
        }

        save(&img, &path).expect("save failed");
        let back = load(&path).expect("load failed");
        assert_eq!(back.width(), 17);
        assert_eq!(back.height(), 9);
        assert_eq!(back.maxval(), 255);
        assert_eq!(back, img);
    }

    #[test]
    fn save_into_missing_dir_fails_without_config() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("nested").join("out.pgm");

        match save(&sample(), &path) {
            Err(GraymapError::Io { op, .. }) => assert_eq!(op, IoOp::Create),
            other => panic!("expected a create error, got {other:?}"),
        }

        let config = CodecConfig {
            create_parent_dirs: true,
            ..CodecConfig::default()
        };
        save_with(&sample(), &path, &config).expect("save failed");
        assert_eq!(load(&path).expect("load failed"), sample());
    }

    /// A writer that accepts a fixed number of bytes, then fails.
    struct Budget(usize);

    impl Write for Budget {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.0 == 0 {
                return Err(std::io::Error::other("disk full"));
            }
            let n = buf.len().min(self.0);
            self.0 -= n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_name_the_step() {
        match encode(&sample(), Budget(0)) {
            Err(GraymapError::Io { op, .. }) => assert_eq!(op, IoOp::WriteHeader),
            other => panic!("expected a header error, got {other:?}"),
        }
        match encode(&sample(), Budget(12)) {
            Err(GraymapError::Io { op, .. }) => assert_eq!(op, IoOp::WritePixels),
            other => panic!("expected a pixel error, got {other:?}"),
        }
    }
}
