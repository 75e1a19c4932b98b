//! Error types for the DP83822 driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: capability registration and invalid requests
//! - [`AddressError`]: bus address discovery and identity verification
//! - [`IoError`]: register transport failures and poll timeouts
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods. Link-down and autonegotiation-in-progress are
//! *not* errors; they are reported as [`crate::link::LinkState`] variants.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Capability registration and configuration errors
///
/// These errors occur before any register traffic: an incomplete
/// capability table, a failing transport hook, or a request the chip has
/// no encoding for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Read-register capability missing from the table
    MissingReadFn,
    /// Write-register capability missing from the table
    MissingWriteFn,
    /// Tick-source capability missing from the table
    MissingTickFn,
    /// Requested forced link mode has no register encoding
    UnsupportedLinkMode,
    /// Transport init/deinit hook reported a failure
    HookFailed,
    /// Reset pin could not be driven
    GpioFault,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::MissingReadFn => "read-register capability missing",
            ConfigError::MissingWriteFn => "write-register capability missing",
            ConfigError::MissingTickFn => "tick capability missing",
            ConfigError::UnsupportedLinkMode => "unsupported forced link mode",
            ConfigError::HookFailed => "transport hook failed",
            ConfigError::GpioFault => "reset pin fault",
        }
    }
}

// =============================================================================
// Address Errors
// =============================================================================

/// Bus address discovery errors
///
/// Raised during bring-up when the scan finds nothing, or when the
/// device that answered is not a DP83822.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// No address on the bus answered with a plausible identity
    NoDeviceFound,
    /// A device answered but its OUI bits do not match
    IdMismatch,
}

impl core::fmt::Display for AddressError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AddressError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AddressError::NoDeviceFound => "no device found on bus",
            AddressError::IdMismatch => "device identity mismatch",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Register transport errors
///
/// A `Read`/`Write` failure is surfaced immediately from discrete
/// register operations. `Timeout` comes from the bounded polls in the
/// bring-up sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Register read failed on the management bus
    Read,
    /// Register write failed on the management bus
    Write,
    /// Polled condition did not become true within its deadline
    Timeout,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Read => "register read failed",
            IoError::Write => "register write failed",
            IoError::Timeout => "poll timed out",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Address(AddressError::NoDeviceFound)) => { /* ... */ }
///     Err(Error::Io(IoError::Timeout)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Address discovery error
    Address(AddressError),
    /// Register transport error
    Io(IoError),
    /// Status bits matched no known speed/duplex combination
    Decode,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Address(e) => write!(f, "address: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
            Error::Decode => f.write_str("status decode error"),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<AddressError> for Error {
    fn from(e: AddressError) -> Self {
        Error::Address(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
