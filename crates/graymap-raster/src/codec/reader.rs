// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raw PGM reader: parses the P5 header and the pixel block that follows it.
//
// Header fields are read strictly in order: magic, width, height, maxval,
// then exactly one whitespace byte. Whitespace and `#` comment lines may
// precede each numeric field. Only 8-bit files (maxval 1..=255) are
// accepted.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use graymap_core::config::CodecConfig;
use graymap_core::error::{FormatError, GraymapError, IoOp, Result};
use tracing::{debug, info, instrument, warn};

use crate::raster::Raster;

/// Load a raw PGM file with the default configuration.
pub fn load(path: impl AsRef<Path>) -> Result<Raster> {
    load_with(path, &CodecConfig::default())
}

/// Load a raw PGM file.
///
/// On failure no raster is returned and the file is closed; the error keeps
/// the I/O error observed at the failing step.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_with(path: impl AsRef<Path>, config: &CodecConfig) -> Result<Raster> {
    let file = File::open(path.as_ref()).map_err(|err| GraymapError::io(IoOp::Open, err))?;
    let raster = decode_with(BufReader::new(file), config)?;
    info!(
        width = raster.width(),
        height = raster.height(),
        maxval = raster.maxval(),
        "Image loaded"
    );
    Ok(raster)
}

/// Decode a raw PGM stream with the default configuration.
pub fn decode<R: BufRead>(reader: R) -> Result<Raster> {
    decode_with(reader, &CodecConfig::default())
}

/// Decode a raw PGM stream.
///
/// Exactly `width * height` pixel bytes are consumed after the header; any
/// trailing bytes are left unread.
pub fn decode_with<R: BufRead>(mut reader: R, config: &CodecConfig) -> Result<Raster> {
    let header = match Header::parse(&mut reader) {
        Ok(header) => header,
        Err(err) => {
            warn!(error = %err, "Rejecting PGM header");
            return Err(err);
        }
    };
    debug!(
        width = header.width,
        height = header.height,
        maxval = header.maxval,
        "PGM header parsed"
    );

    if !config.allows(header.width, header.height) {
        return Err(GraymapError::Allocation(format!(
            "pixel data ({}x{}): exceeds the configured limit of {} pixels",
            header.width,
            header.height,
            config.max_pixels.unwrap_or_default()
        )));
    }

    let mut raster = Raster::new(header.width, header.height, header.maxval)?;
    reader
        .read_exact(raster.pixels_mut())
        .map_err(|err| GraymapError::io(IoOp::ReadPixels, err))?;
    Ok(raster)
}

/// Parsed P5 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    width: usize,
    height: usize,
    maxval: u8,
}

impl Header {
    fn parse<R: BufRead>(reader: &mut R) -> Result<Self> {
        let mut scan = Scanner { reader };

        if scan.next_byte()? != Some(b'P') || scan.next_byte()? != Some(b'5') {
            return Err(FormatError::InvalidMagic.into());
        }

        scan.skip_filler()?;
        let width = scan
            .read_int()?
            .and_then(|w| usize::try_from(w).ok())
            .ok_or(FormatError::InvalidWidth)?;

        scan.skip_filler()?;
        let height = scan
            .read_int()?
            .and_then(|h| usize::try_from(h).ok())
            .ok_or(FormatError::InvalidHeight)?;

        scan.skip_filler()?;
        let maxval = scan
            .read_int()?
            .and_then(|m| u8::try_from(m).ok())
            .filter(|&m| m > 0)
            .ok_or(FormatError::InvalidMaxval)?;

        match scan.next_byte()? {
            Some(b) if is_space(b) => {}
            _ => return Err(FormatError::MissingSeparator.into()),
        }

        Ok(Self {
            width,
            height,
            maxval,
        })
    }
}

/// Byte-level header tokenizer over a buffered reader.
struct Scanner<'a, R> {
    reader: &'a mut R,
}

impl<R: BufRead> Scanner<'_, R> {
    fn peek(&mut self) -> Result<Option<u8>> {
        let buf = self
            .reader
            .fill_buf()
            .map_err(|err| GraymapError::io(IoOp::ReadHeader, err))?;
        Ok(buf.first().copied())
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.peek()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }

    /// Skip whitespace and whole `#` comment lines, newline included.
    fn skip_filler(&mut self) -> Result<()> {
        loop {
            match self.peek()? {
                Some(b) if is_space(b) => self.reader.consume(1),
                Some(b'#') => {
                    while let Some(b) = self.next_byte()? {
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Optionally signed decimal integer; `None` if there are no digits or
    /// the value overflows.
    fn read_int(&mut self) -> Result<Option<i64>> {
        let negative = match self.peek()? {
            Some(b'-') => {
                self.reader.consume(1);
                true
            }
            Some(b'+') => {
                self.reader.consume(1);
                false
            }
            _ => false,
        };

        let mut value: Option<i64> = Some(0);
        let mut digits = 0usize;
        while let Some(b) = self.peek()? {
            if !b.is_ascii_digit() {
                break;
            }
            self.reader.consume(1);
            digits += 1;
            value = value
                .and_then(|v| v.checked_mul(10))
                .and_then(|v| v.checked_add(i64::from(b - b'0')));
        }

        if digits == 0 {
            return Ok(None);
        }
        Ok(value.map(|v| if negative { -v } else { v }))
    }
}

/// Whitespace as understood by formatted scanning (includes `\v` and `\f`).
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}
