//! rival-haptics CLI: trigger a tactile alert on the SteelSeries Rival 700.

use anyhow::Result;
use clap::Parser;
use rival_haptics_core::device::{self, RIVAL_700_NAME};
use rival_haptics_core::error::Error;
use rival_haptics_core::haptics::{send_vibration, VibrationRequest};
use rival_haptics_core::pattern::VibrationPattern;
use rival_haptics_core::report::ControlRequest;
use rival_haptics_core::transport::UsbTransport;
use rival_haptics_core::{pids, STEELSERIES_VID};

/// Real transport backed by a libusb device handle.
struct CliUsbTransport {
    handle: rusb::DeviceHandle<rusb::GlobalContext>,
}

impl CliUsbTransport {
    /// Open the first Rival 700 on the bus.
    fn open() -> Result<Self> {
        let handle = rusb::open_device_with_vid_pid(STEELSERIES_VID, pids::RIVAL_700)
            .ok_or_else(|| {
                Error::DeviceNotFound(format!(
                    "no {RIVAL_700_NAME} (VID=0x{STEELSERIES_VID:04X} PID=0x{:04X}) on the bus",
                    pids::RIVAL_700
                ))
            })?;
        tracing::debug!("opened {RIVAL_700_NAME} handle");
        Ok(Self { handle })
    }
}

fn usb_err(e: rusb::Error) -> Error {
    Error::Usb(e.to_string())
}

impl UsbTransport for CliUsbTransport {
    fn kernel_driver_active(&self, interface: u8) -> rival_haptics_core::error::Result<bool> {
        self.handle.kernel_driver_active(interface).map_err(usb_err)
    }

    fn detach_kernel_driver(&self, interface: u8) -> rival_haptics_core::error::Result<()> {
        self.handle.detach_kernel_driver(interface).map_err(usb_err)
    }

    fn claim_interface(&self, interface: u8) -> rival_haptics_core::error::Result<()> {
        self.handle.claim_interface(interface).map_err(usb_err)
    }

    fn control_transfer(&self, request: &ControlRequest) -> rival_haptics_core::error::Result<usize> {
        self.handle
            .write_control(
                request.request_type,
                request.request,
                request.value,
                request.index,
                &request.payload,
                request.timeout,
            )
            .map_err(usb_err)
    }

    fn release_interface(&self, interface: u8) -> rival_haptics_core::error::Result<()> {
        self.handle.release_interface(interface).map_err(usb_err)
    }

    fn attach_kernel_driver(&self, interface: u8) -> rival_haptics_core::error::Result<()> {
        self.handle.attach_kernel_driver(interface).map_err(usb_err)
    }
}

#[derive(Parser)]
#[command(
    name = "rival-haptics",
    version,
    about = "Trigger haptic feedback on the SteelSeries Rival 700"
)]
struct Cli {
    /// Vibration pattern name (e.g. Strong, Buzz) or a raw 0-127 code.
    #[arg(required_unless_present_any = ["list_patterns", "list_devices"])]
    pattern: Option<String>,

    /// Delay in milliseconds before the command is sent.
    #[arg(required_unless_present_any = ["list_patterns", "list_devices"])]
    delay_ms: Option<u64>,

    /// List the named vibration patterns and their codes, then exit.
    #[arg(long, conflicts_with = "list_devices")]
    list_patterns: bool,

    /// List connected Rival 700 mice, then exit.
    #[arg(long)]
    list_devices: bool,

    /// Emit listings as JSON.
    #[arg(long)]
    json: bool,
}

fn list_patterns(json: bool) -> Result<()> {
    if json {
        let entries: Vec<_> = VibrationPattern::ALL
            .iter()
            .map(|p| serde_json::json!({ "name": p.name(), "code": p.code() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for p in VibrationPattern::ALL {
            println!("{:<16} {:>3}  (0b{:06b})", p.name(), p.code(), p.code());
        }
    }
    Ok(())
}

fn list_devices(json: bool) -> Result<()> {
    let devices = device::discover_devices()?;
    if json {
        let entries: Vec<_> = devices
            .iter()
            .map(|d| {
                serde_json::json!({
                    "name": RIVAL_700_NAME,
                    "vid": d.vid,
                    "pid": d.pid,
                    "bus": d.bus_number,
                    "address": d.address,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if devices.is_empty() {
        println!("No {RIVAL_700_NAME} found.");
        println!("Ensure the mouse is connected and you have USB permissions.");
    } else {
        for d in &devices {
            println!(
                "{RIVAL_700_NAME} (VID: 0x{:04X}, PID: 0x{:04X}, {})",
                d.vid,
                d.pid,
                d.location()
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.list_patterns {
        return list_patterns(cli.json);
    }
    if cli.list_devices {
        return list_devices(cli.json);
    }

    let (Some(pattern), Some(delay_ms)) = (cli.pattern, cli.delay_ms) else {
        anyhow::bail!("PATTERN and DELAY_MS are required");
    };

    let request = VibrationRequest::new(&pattern, delay_ms);
    let transport = CliUsbTransport::open()?;
    let code = send_vibration(&transport, &request)?;

    println!("Vibration '{pattern}' (code {code}) triggered after {delay_ms}ms");
    Ok(())
}
