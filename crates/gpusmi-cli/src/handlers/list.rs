use crate::devices::SimulatedDevices;
use anyhow::Result;
use gpusmi_render::ReportSession;
use gpusmi_types::{Compatibility, Destination, DeviceHandle, OutputFormat};

pub fn handle(
    devices: &SimulatedDevices,
    handles: &[DeviceHandle],
    compatibility: Compatibility,
    format: OutputFormat,
    destination: Destination,
) -> Result<()> {
    let mut session = ReportSession::new(
        compatibility,
        format,
        destination,
        Box::new(devices.resolver()),
    );
    let multi_device = handles.len() > 1;

    for &handle in handles {
        session.store(handle, "values", devices.identity(handle));
        if multi_device {
            session.capture_device();
        }
    }

    session.print(multi_device, false)
}
