use crate::args::{Cli, Commands};
use crate::devices::SimulatedDevices;
use crate::handlers;
use anyhow::Result;
use gpusmi_types::Destination;

pub fn run(cli: Cli) -> Result<()> {
    let format = cli.format.into();
    let compatibility = cli.compat.into();
    let destination = match cli.file {
        Some(path) => Destination::File(path),
        None => Destination::Stdout,
    };

    let devices = SimulatedDevices::discover();
    let handles = devices.select(cli.gpus.as_deref())?;

    match cli.command {
        Commands::List => {
            handlers::list::handle(&devices, &handles, compatibility, format, destination)
        }
        Commands::Static => {
            handlers::static_info::handle(&devices, &handles, compatibility, format, destination)
        }
        Commands::Metric => {
            handlers::metric::handle(&devices, &handles, compatibility, format, destination)
        }
        Commands::Watch {
            interval,
            iterations,
        } => handlers::watch::handle(
            &devices,
            &handles,
            compatibility,
            format,
            destination,
            interval,
            iterations,
        ),
    }
}
