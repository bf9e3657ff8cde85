//! USB transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so the real libusb-backed device
//! and mock devices share the same interface.

use crate::error::Result;
use crate::report::ControlRequest;

/// Abstraction over the narrow slice of libusb the haptic command needs.
///
/// An implementation represents an already-open device handle; finding and
/// opening the device is the constructor's job, and a missing device
/// surfaces there as [`crate::error::Error::DeviceNotFound`].
pub trait UsbTransport: Send {
    /// Whether a kernel driver is currently bound to `interface`.
    fn kernel_driver_active(&self, interface: u8) -> Result<bool>;

    /// Detach the kernel driver from `interface`.
    fn detach_kernel_driver(&self, interface: u8) -> Result<()>;

    /// Claim `interface` for this handle.
    fn claim_interface(&self, interface: u8) -> Result<()>;

    /// Issue a host-to-device control transfer; returns bytes written.
    fn control_transfer(&self, request: &ControlRequest) -> Result<usize>;

    /// Release a previously claimed `interface`.
    fn release_interface(&self, interface: u8) -> Result<()>;

    /// Reattach the kernel driver to `interface`.
    fn attach_kernel_driver(&self, interface: u8) -> Result<()>;
}
