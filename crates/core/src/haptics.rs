//! Haptic command orchestration: resolve, wait, send.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::pattern;
use crate::report::{ControlRequest, HAPTIC_INTERFACE};
use crate::transport::UsbTransport;

/// A single vibration request, built from process input and consumed once.
#[derive(Debug, Clone)]
pub struct VibrationRequest {
    /// Pattern name or decimal code literal.
    pub token: String,
    /// Delay before the command is sent.
    pub delay: Duration,
}

impl VibrationRequest {
    pub fn new(token: impl Into<String>, delay_ms: u64) -> Self {
        Self {
            token: token.into(),
            delay: Duration::from_millis(delay_ms),
        }
    }
}

/// Extract the platform error text from a raw transport failure so the
/// stage-specific error carries the underlying reason without re-prefixing.
fn underlying(err: Error) -> String {
    match err {
        Error::Usb(msg) => msg,
        other => other.to_string(),
    }
}

/// Send one vibration command over an open transport.
///
/// Resolves the pattern token, waits the requested delay (a best-effort
/// lower bound, not hard real-time), then runs the detach → claim →
/// Set_Report → release sequence on interface 0. Returns the resolved
/// waveform code on success.
///
/// The interface is released on every exit path past the claim, including a
/// failed transfer. Release and reattach errors are logged and never fail
/// the operation. Nothing is retried.
pub fn send_vibration(transport: &dyn UsbTransport, request: &VibrationRequest) -> Result<u8> {
    let code = pattern::resolve_code(&request.token)?;
    debug!(token = %request.token, code, "resolved vibration pattern");

    if !request.delay.is_zero() {
        debug!(delay_ms = request.delay.as_millis() as u64, "waiting before send");
        thread::sleep(request.delay);
    }

    let driver_was_active = transport
        .kernel_driver_active(HAPTIC_INTERFACE)
        .map_err(|e| Error::DriverDetachFailed(underlying(e)))?;
    if driver_was_active {
        transport
            .detach_kernel_driver(HAPTIC_INTERFACE)
            .map_err(|e| Error::DriverDetachFailed(underlying(e)))?;
        debug!(interface = HAPTIC_INTERFACE, "detached kernel driver");
    }

    transport
        .claim_interface(HAPTIC_INTERFACE)
        .map_err(|e| Error::InterfaceClaimFailed(underlying(e)))?;

    let control = ControlRequest::haptic(code);
    let transfer_result = transport
        .control_transfer(&control)
        .map_err(|e| Error::TransferFailed(underlying(e)));

    if let Err(e) = transport.release_interface(HAPTIC_INTERFACE) {
        warn!(interface = HAPTIC_INTERFACE, error = %e, "failed to release interface");
    }

    // Reattach keys on the driver state observed now, not on whether the
    // detach above ran; the check must stay this way.
    match transport.kernel_driver_active(HAPTIC_INTERFACE) {
        Ok(false) => {
            if let Err(e) = transport.attach_kernel_driver(HAPTIC_INTERFACE) {
                warn!(interface = HAPTIC_INTERFACE, error = %e, "failed to reattach kernel driver");
            }
        }
        Ok(true) => {}
        Err(e) => {
            warn!(interface = HAPTIC_INTERFACE, error = %e, "driver state check failed after release");
        }
    }

    let written = transfer_result?;
    info!(code, bytes = written, "haptic command sent");
    Ok(code)
}
