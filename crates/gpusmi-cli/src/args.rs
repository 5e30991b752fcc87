use crate::types::{CompatArg, FormatArg};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gpusmi")]
#[command(about = "Report GPU telemetry in legacy SMI output conventions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, default_value = "human_readable", global = true)]
    pub format: FormatArg,

    /// Legacy tool whose output conventions to follow
    #[arg(long, default_value = "amdsmi", global = true)]
    pub compat: CompatArg,

    /// Append output to this file instead of printing to stdout
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Restrict reporting to these device ids (repeatable)
    #[arg(long = "gpu", global = true)]
    pub gpus: Option<Vec<u32>>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List discovered devices with their bus and unique ids
    List,

    /// Show static device information (asic, bus, vbios, board, limit)
    Static,

    /// Show current device metrics (usage, power, clock, temperature)
    Metric,

    /// Poll metrics on an interval, collecting timestamped samples
    Watch {
        /// Seconds between samples
        #[arg(long, default_value = "1")]
        interval: u64,

        /// Stop after this many samples (default: run until Ctrl-C)
        #[arg(long)]
        iterations: Option<u64>,
    },
}
