// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec module: raw PGM (P5) load and save.
//
// See the Netpbm PGM description: http://netpbm.sourceforge.net/doc/pgm.html

pub mod reader;
pub mod writer;

pub use reader::{decode, decode_with, load, load_with};
pub use writer::{encode, encode_with, save, save_with};
