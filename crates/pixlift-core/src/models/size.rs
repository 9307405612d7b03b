//! Typed file sizes and the per-job size ceiling.
//!
//! Size probes report a magnitude with an explicit unit; normalization to
//! megabytes is a pure function over that pair, so gate comparisons never
//! depend on which unit the underlying probe happened to use.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unit a measured file size is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeUnit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

/// A measured file size: magnitude plus unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileSize {
    pub magnitude: f64,
    pub unit: SizeUnit,
}

impl FileSize {
    pub fn new(magnitude: f64, unit: SizeUnit) -> Self {
        Self { magnitude, unit }
    }

    pub fn from_bytes(bytes: u64) -> Self {
        Self::new(bytes as f64, SizeUnit::Bytes)
    }

    /// Normalize to megabytes regardless of the reported unit.
    pub fn megabytes(&self) -> f64 {
        match self.unit {
            SizeUnit::Bytes => self.magnitude / (1024.0 * 1024.0),
            SizeUnit::Kilobytes => self.magnitude / 1024.0,
            SizeUnit::Megabytes => self.magnitude,
            SizeUnit::Gigabytes => self.magnitude * 1024.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid file size string: {0:?}")]
pub struct ParseSizeError(pub String);

impl FromStr for FileSize {
    type Err = ParseSizeError;

    /// Parse probe output like `"2048K"`, `"3.2M"`, `"1.5GB"` or `"12345"`
    /// (bare digits are bytes). Suffix matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-')
            .unwrap_or(trimmed.len());
        let (number, suffix) = trimmed.split_at(split);
        let magnitude: f64 = number
            .parse()
            .map_err(|_| ParseSizeError(s.to_string()))?;
        if magnitude < 0.0 {
            return Err(ParseSizeError(s.to_string()));
        }
        let unit = match suffix.trim().to_ascii_uppercase().as_str() {
            "" | "B" => SizeUnit::Bytes,
            "K" | "KB" | "KIB" => SizeUnit::Kilobytes,
            "M" | "MB" | "MIB" => SizeUnit::Megabytes,
            "G" | "GB" | "GIB" => SizeUnit::Gigabytes,
            _ => return Err(ParseSizeError(s.to_string())),
        };
        Ok(FileSize::new(magnitude, unit))
    }
}

/// Per-job ceiling on the source file size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum SizeLimit {
    #[default]
    Unlimited,
    /// Bound in megabytes; must be positive.
    Megabytes(f64),
}
