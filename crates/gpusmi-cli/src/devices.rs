use anyhow::Result;
use gpusmi_types::DeviceHandle;
use serde_json::{Value, json};

/// Fixed device inventory standing in for the hardware query layer.
///
/// Records are deterministic so output is stable across runs; metric values
/// wobble per tick so watch sessions show movement. Device 1 reports an
/// unsupported serial, which is what the gpuvsmi status masking is for.
pub struct SimulatedDevices {
    devices: Vec<SimDevice>,
}

struct SimDevice {
    id: u32,
    bdf: &'static str,
    uuid: &'static str,
    market_name: &'static str,
    serial: &'static str,
}

impl SimulatedDevices {
    pub fn discover() -> Self {
        SimulatedDevices {
            devices: vec![
                SimDevice {
                    id: 0,
                    bdf: "0000:23:00.0",
                    uuid: "8a3bfb00-2a2a-4b54-91f5-19f861b9e210",
                    market_name: "Instinct MI210",
                    serial: "PCB012345-0042",
                },
                SimDevice {
                    id: 1,
                    bdf: "0000:26:00.0",
                    uuid: "1f64a1f0-77f0-4ec3-9b31-ce8c0e9d6a38",
                    market_name: "Instinct MI210",
                    serial: "AMDSMI_STATUS_NOT_SUPPORTED",
                },
            ],
        }
    }

    /// Handles for every device, or for the requested ids in request order.
    pub fn select(&self, ids: Option<&[u32]>) -> Result<Vec<DeviceHandle>> {
        match ids {
            None => Ok(self
                .devices
                .iter()
                .map(|device| DeviceHandle::new(u64::from(device.id)))
                .collect()),
            Some(ids) => ids
                .iter()
                .map(|id| {
                    if self.devices.iter().any(|device| device.id == *id) {
                        Ok(DeviceHandle::new(u64::from(*id)))
                    } else {
                        anyhow::bail!("Device not found: {}", id)
                    }
                })
                .collect(),
        }
    }

    /// Handles issued by `select` carry the device id as their raw token.
    pub fn resolver(&self) -> impl Fn(DeviceHandle) -> u32 + 'static {
        |handle| handle.raw() as u32
    }

    pub fn identity(&self, handle: DeviceHandle) -> Value {
        let device = self.device(handle);
        json!({
            "bdf": device.bdf,
            "uuid": device.uuid,
        })
    }

    pub fn static_info(&self, handle: DeviceHandle) -> Value {
        let device = self.device(handle);
        json!({
            "asic": {
                "market_name": device.market_name,
                "vendor_id": "0x1002",
                "device_id": "0x740f",
                "num_compute_units": 104,
            },
            "bus": {
                "bdf": device.bdf,
                "max_pcie_width": 16,
                "max_pcie_speed": 32,
            },
            "vbios": {
                "name": "113-D67301-063",
                "version": "022.040.003.035",
            },
            "board": {
                "model_number": "102-D67301",
                "product_serial": device.serial,
                "product_name": device.market_name,
            },
            "limit": {
                "max_power": 300,
                "min_power": 0,
                "max_fan_rpm": 14800,
            },
        })
    }

    pub fn metrics(&self, handle: DeviceHandle, tick: u64) -> Value {
        let device = self.device(handle);
        let wobble =
            |base: u64, span: u64| base + (u64::from(device.id) * 3 + tick * 7) % span;
        json!({
            "usage": {
                "gfx_activity": wobble(12, 9),
                "umc_activity": wobble(4, 5),
                "mm_activity": 0,
            },
            "power": {
                "socket_power": wobble(41, 14),
                "gfx_voltage": wobble(762, 40),
                "fan_speed": wobble(3400, 160),
            },
            "clock": {
                "gfx": {"clk": wobble(800, 900), "min_clk": 500, "max_clk": 1700},
                "mem": {"clk": 1600, "min_clk": 400, "max_clk": 1600},
            },
            "temperature": {
                "edge": wobble(39, 8),
                "hotspot": wobble(51, 10),
                "mem": wobble(46, 7),
            },
        })
    }

    fn device(&self, handle: DeviceHandle) -> &SimDevice {
        self.devices
            .iter()
            .find(|device| u64::from(device.id) == handle.raw())
            .expect("handle issued by select")
    }
}
