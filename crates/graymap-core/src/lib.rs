// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Graymap: Core types, errors, and configuration shared across all crates.

pub mod config;
pub mod error;
pub mod instrument;
pub mod types;

pub use config::CodecConfig;
pub use error::{ErrorKind, FormatError, GraymapError, IoOp, Result};
pub use instrument::{CounterSnapshot, PixelCounters, PixelObserver};
pub use types::*;
