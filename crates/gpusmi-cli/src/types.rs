use clap::ValueEnum;
use gpusmi_types::{Compatibility, OutputFormat};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum FormatArg {
    Json,
    Csv,
    HumanReadable,
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Json => write!(f, "json"),
            FormatArg::Csv => write!(f, "csv"),
            FormatArg::HumanReadable => write!(f, "human_readable"),
        }
    }
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::HumanReadable => OutputFormat::HumanReadable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CompatArg {
    Amdsmi,
    Rocmsmi,
    Gpuvsmi,
}

impl fmt::Display for CompatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompatArg::Amdsmi => write!(f, "amdsmi"),
            CompatArg::Rocmsmi => write!(f, "rocmsmi"),
            CompatArg::Gpuvsmi => write!(f, "gpuvsmi"),
        }
    }
}

impl From<CompatArg> for Compatibility {
    fn from(value: CompatArg) -> Self {
        match value {
            CompatArg::Amdsmi => Compatibility::AmdSmi,
            CompatArg::Rocmsmi => Compatibility::RocmSmi,
            CompatArg::Gpuvsmi => Compatibility::GpuvSmi,
        }
    }
}
