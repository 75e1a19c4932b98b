//! DP83822 Ethernet PHY Driver
//!
//! A `no_std`, no-alloc driver for the Texas Instruments DP83822 10/100
//! Ethernet PHY, managed over an MDIO-style bus.
//!
//! # Architecture
//!
//! The driver is transport-agnostic: all register access and timing is
//! delegated to a caller-supplied capability set.
//!
//! 1. **Capability layer** ([`io`]): the [`PhyIo`] trait plus a
//!    function-slot table form ([`IoTable`]/[`TableIo`]) for BSP-style
//!    integration
//! 2. **Driver layer** ([`driver`]): bus address discovery, identity
//!    verification, reset/negotiation sequencing, link control
//! 3. **Register map** ([`regs`]): the MII registers and bitfields the
//!    driver touches
//!
//! # Bring-up flow
//!
//! ```ignore
//! use dp83822_phy::{Dp83822, LinkState};
//!
//! // io: your PhyIo implementation over the MAC's MDIO controller
//! let mut phy = Dp83822::new(io);
//!
//! // Discovers the bus address, verifies identity, soft-resets and
//! // waits (bounded) for autonegotiation and link-up.
//! phy.initialize()?;
//!
//! match phy.link_state()? {
//!     LinkState::Up(status) => { /* program MAC speed/duplex */ }
//!     LinkState::AutoNegIncomplete => { /* poll again */ }
//!     LinkState::Down => { /* cable unplugged */ }
//! }
//! ```
//!
//! # Features
//!
//! - `defmt`: derive `defmt::Format` on public types for
//!   embedded-friendly logging
//!
//! # Concurrency
//!
//! Single-threaded, synchronous, blocking. The driver assumes exclusive
//! access to the device instance and the underlying bus; wrap it in your
//! platform's mutual exclusion if it must be shared.

#![no_std]
#![deny(missing_docs)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod error;
pub mod io;
pub mod link;
pub mod regs;

// Test utilities (only available during testing)
#[cfg(test)]
pub(crate) mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::{Dp83822, Dp83822WithReset};
pub use error::{AddressError, ConfigError, ConfigResult, Error, IoError, Result};
pub use io::{BusFault, IoTable, PhyIo, TableIo, Unconnected};
pub use link::{Duplex, LinkState, LinkStatus, Speed};
