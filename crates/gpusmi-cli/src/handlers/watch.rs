use crate::devices::SimulatedDevices;
use anyhow::Result;
use gpusmi_render::ReportSession;
use gpusmi_types::{Compatibility, Destination, DeviceHandle, OutputFormat};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub fn handle(
    devices: &SimulatedDevices,
    handles: &[DeviceHandle],
    compatibility: Compatibility,
    format: OutputFormat,
    destination: Destination,
    interval: u64,
    iterations: Option<u64>,
) -> Result<()> {
    if format != OutputFormat::Json {
        eprintln!(
            "Warning: watch samples are only rendered in json format; {} output stays empty",
            format
        );
    }

    let mut session = ReportSession::new(
        compatibility,
        format,
        destination,
        Box::new(devices.resolver()),
    );
    let multi_device = handles.len() > 1;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
    }

    announce(handles.len(), interval);

    let mut tick: u64 = 0;
    while running.load(Ordering::SeqCst) && iterations.map_or(true, |limit| tick < limit) {
        session.reset();
        for &handle in handles {
            session.store(handle, "values", devices.metrics(handle, tick));
            if multi_device {
                session.capture_device();
            }
        }
        session.capture_sample(multi_device);
        session.print(multi_device, true)?;

        tick += 1;
        if iterations.is_some_and(|limit| tick >= limit) {
            break;
        }
        std::thread::sleep(Duration::from_secs(interval));
    }

    session.flush_watch()
}

fn announce(device_count: usize, interval: u64) {
    if std::io::stderr().is_terminal() {
        eprintln!(
            "{} {} device(s) every {}s (Ctrl-C to stop)",
            "Watching".green().bold(),
            device_count,
            interval
        );
    } else {
        eprintln!(
            "Watching {} device(s) every {}s (Ctrl-C to stop)",
            device_count, interval
        );
    }
}
