//! Export formats and their precision parameters.

use crate::error::{ModelingError, Result};
use std::fmt;
use std::str::FromStr;

/// Supported export formats.
///
/// `Step` and `Stp` are the same interchange format under two extensions;
/// they share export and validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Binary STL triangle mesh
    Stl,
    /// STEP written with the `.step` extension
    Step,
    /// STEP written with the `.stp` extension
    Stp,
}

impl ExportFormat {
    /// Parse a caller-supplied format name, case-insensitively.
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "stl" => Ok(Self::Stl),
            "step" => Ok(Self::Step),
            "stp" => Ok(Self::Stp),
            _ => Err(ModelingError::UnsupportedFormat {
                format: format.to_string(),
            }),
        }
    }

    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Step => "step",
            Self::Stp => "stp",
        }
    }

    /// Whether this format belongs to the STEP family.
    pub fn is_step_family(&self) -> bool {
        matches!(self, Self::Step | Self::Stp)
    }

    /// Whether `path` already carries a STEP-family suffix.
    pub fn has_step_suffix(path: &str) -> bool {
        let lower = path.to_lowercase();
        lower.ends_with(".step") || lower.ends_with(".stp")
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ModelingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Precision parameters handed to the engine for one export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSettings {
    /// Linear tolerance in model units
    pub tolerance: f64,
    /// Angular tolerance in degrees
    pub angular_tolerance: f64,
}

impl ExportSettings {
    /// High-precision defaults used for STEP-family exports.
    pub const STEP_DEFAULT: Self = Self {
        tolerance: 0.001,
        angular_tolerance: 0.1,
    };

    /// Coarser settings used for mesh previews.
    pub const PREVIEW: Self = Self {
        tolerance: 0.1,
        angular_tolerance: 0.5,
    };
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::STEP_DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ExportFormat::parse("STL").unwrap(), ExportFormat::Stl);
        assert_eq!(ExportFormat::parse("Step").unwrap(), ExportFormat::Step);
        assert_eq!(ExportFormat::parse("sTp").unwrap(), ExportFormat::Stp);
    }

    #[test]
    fn test_stp_is_step_family() {
        assert!(ExportFormat::Stp.is_step_family());
        assert!(ExportFormat::Step.is_step_family());
        assert!(!ExportFormat::Stl.is_step_family());
        assert_eq!(ExportFormat::Stp.extension(), "stp");
    }

    #[test]
    fn test_unknown_format() {
        let err = ExportFormat::parse("xyz").unwrap_err();
        assert_eq!(err.kind_name(), "UnsupportedFormat");
    }

    #[test]
    fn test_step_suffix() {
        assert!(ExportFormat::has_step_suffix("/tmp/part.STEP"));
        assert!(ExportFormat::has_step_suffix("part.stp"));
        assert!(!ExportFormat::has_step_suffix("part.step.txt"));
        assert!(!ExportFormat::has_step_suffix("part"));
    }
}
