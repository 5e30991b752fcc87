mod args;
mod commands;
pub mod devices;
mod handlers;
mod types;

pub use args::{Cli, Commands};
pub use commands::run;
pub use types::{CompatArg, FormatArg};
