// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options for loading and saving raw PGM files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Refuse to load images with more pixels than this (no limit if unset).
    pub max_pixels: Option<u64>,
    /// Comment written after the magic number when saving. Each line of the
    /// text becomes its own `#` line.
    pub comment: Option<String>,
    /// Create missing parent directories before saving.
    pub create_parent_dirs: bool,
}

impl CodecConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether a `width × height` image is within `max_pixels`.
    pub fn allows(&self, width: usize, height: usize) -> bool {
        match self.max_pixels {
            None => true,
            Some(limit) => (width as u128) * (height as u128) <= limit as u128,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn default_is_unlimited() {
        let config = CodecConfig::default();
        assert!(config.allows(usize::MAX, usize::MAX));
        assert!(config.comment.is_none());
        assert!(!config.create_parent_dirs);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = CodecConfig::from_json_str(r#"{ "max_pixels": 12 }"#).expect("parse failed");
        assert_eq!(config.max_pixels, Some(12));
        assert!(config.allows(4, 3));
        assert!(!config.allows(4, 4));
        assert!(!config.create_parent_dirs);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = CodecConfig::from_json_str("{ max_pixels: ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
