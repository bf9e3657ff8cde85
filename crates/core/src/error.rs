//! Error types for rival-haptics-core.

use thiserror::Error;

/// Core library error type.
///
/// Every variant is terminal for the current invocation; nothing here is
/// retried. Cleanup failures (interface release, driver reattach) are logged
/// as warnings by the caller and never surface through this type.
#[derive(Debug, Error)]
pub enum Error {
    /// Pattern token is neither a known name nor an integer literal.
    #[error("invalid vibration pattern: {0:?}")]
    InvalidPattern(String),

    /// No matching USB device on the bus.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Kernel driver could not be detached from the target interface.
    #[error("kernel driver detach failed: {0}")]
    DriverDetachFailed(String),

    /// The target interface could not be claimed.
    #[error("interface claim failed: {0}")]
    InterfaceClaimFailed(String),

    /// The control transfer carrying the haptic command failed.
    #[error("control transfer failed: {0}")]
    TransferFailed(String),

    /// USB failure outside the staged send sequence (enumeration, descriptor
    /// reads, raw transport calls before stage classification).
    #[error("USB error: {0}")]
    Usb(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
