//! Device discovery for the Rival 700.

use crate::error::{Error, Result};
use crate::{pids, STEELSERIES_VID};
use tracing::{debug, info};

/// Marketing name of the supported mouse.
pub const RIVAL_700_NAME: &str = "SteelSeries Rival 700";

/// Information about a discovered Rival 700.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub vid: u16,
    pub pid: u16,
    pub bus_number: u8,
    pub address: u8,
}

impl DeviceInfo {
    /// Bus/address label for log and list output.
    pub fn location(&self) -> String {
        format!("bus {}, address {}", self.bus_number, self.address)
    }
}

/// Discover all connected Rival 700 mice.
///
/// Walks the USB bus and returns info for every matching vendor/product id.
/// Devices whose descriptor cannot be read are skipped.
pub fn discover_devices() -> Result<Vec<DeviceInfo>> {
    debug!("starting USB device enumeration");
    let devices = rusb::devices().map_err(|e| Error::Usb(e.to_string()))?;

    let mut found = Vec::new();
    for device in devices.iter() {
        let desc = match device.device_descriptor() {
            Ok(d) => d,
            Err(_) => continue,
        };
        if desc.vendor_id() != STEELSERIES_VID || desc.product_id() != pids::RIVAL_700 {
            continue;
        }

        let info = DeviceInfo {
            vid: desc.vendor_id(),
            pid: desc.product_id(),
            bus_number: device.bus_number(),
            address: device.address(),
        };
        info!(
            vid = format_args!("0x{:04X}", info.vid),
            pid = format_args!("0x{:04X}", info.pid),
            location = %info.location(),
            "found Rival 700"
        );
        found.push(info);
    }

    debug!(count = found.len(), "device enumeration complete");
    Ok(found)
}
