use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

/// Output format for rendered telemetry.
///
/// `Json` is the only format whose output parses back into an equivalent
/// value tree. `Csv` renders flat scalar rows. `HumanReadable` renders an
/// indented block layout with upper-cased keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    HumanReadable,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human_readable" | "human" => Ok(OutputFormat::HumanReadable),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::HumanReadable => write!(f, "human_readable"),
        }
    }
}

/// Compatibility mode mimicking a legacy tool's output conventions.
///
/// `AmdSmi` is the primary mode. `RocmSmi` is a reserved extension point:
/// selecting it is valid, but it applies no extra shaping yet. `GpuvSmi`
/// adds status masking, key renames, and cosmetic rewrites on top of the
/// base rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compatibility {
    AmdSmi,
    RocmSmi,
    GpuvSmi,
}

impl FromStr for Compatibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amdsmi" => Ok(Compatibility::AmdSmi),
            "rocmsmi" => Ok(Compatibility::RocmSmi),
            "gpuvsmi" => Ok(Compatibility::GpuvSmi),
            other => Err(Error::UnsupportedCompatibility(other.to_string())),
        }
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compatibility::AmdSmi => write!(f, "amdsmi"),
            Compatibility::RocmSmi => write!(f, "rocmsmi"),
            Compatibility::GpuvSmi => write!(f, "gpuvsmi"),
        }
    }
}

/// Where rendered output goes.
///
/// File writes append by default; the watch-session final flush is the one
/// overwrite case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Destination::File(path.into())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => write!(f, "stdout"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}
