pub mod config;
pub mod device;
pub mod error;
pub mod record;

pub use config::{Compatibility, Destination, OutputFormat};
pub use device::{DeviceHandle, DeviceResolver};
pub use error::{Error, Result};
pub use record::{ValueMap, WatchSample};
