//! DP83822 device driver
//!
//! Bring-up, link control and link-state decoding for the TI DP83822
//! 10/100 Ethernet PHY. All register traffic goes through the injected
//! [`PhyIo`] capability set; the driver holds no bus state of its own
//! beyond the discovered address and the initialized flag.
//!
//! # Bring-up
//!
//! [`Dp83822::initialize`] scans the management bus for the chip,
//! verifies its identity, soft-resets it, restarts autonegotiation and
//! waits for the link to come up. Each wait is bounded against the
//! injected tick source and fails with [`IoError::Timeout`] instead of
//! blocking forever.
//!
//! # Example
//!
//! ```ignore
//! use dp83822_phy::{Dp83822, LinkState};
//!
//! let mut phy = Dp83822::new(io); // io: impl PhyIo over your MDIO controller
//! phy.initialize()?;
//!
//! match phy.link_state()? {
//!     LinkState::Up(status) => {
//!         mac.set_speed(status.speed);
//!         mac.set_duplex(status.duplex);
//!     }
//!     LinkState::AutoNegIncomplete => { /* poll again later */ }
//!     LinkState::Down => { /* no partner */ }
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{AddressError, ConfigError, Error, IoError, Result};
use crate::io::PhyIo;
use crate::link::{Duplex, LinkState, LinkStatus, Speed};
use crate::regs::{MAX_PHY_ADDR, NO_DEVICE, PHY_ADDR_UNASSIGNED, bmcr, bmsr, phyidr1, physts, reg};

// =============================================================================
// Timing Constants
// =============================================================================

/// Maximum wait for the soft-reset bit to self-clear
const RESET_TIMEOUT_MS: u32 = 500;

/// Maximum wait for autonegotiation-enable to read back set
const AN_ENABLE_TIMEOUT_MS: u32 = 500;

/// Maximum wait for the link-status bit after restarting autonegotiation
const LINK_UP_TIMEOUT_MS: u32 = 5_000;

/// Hardware reset pulse duration in microseconds
const RESET_PULSE_US: u32 = 100;

/// Recovery time after releasing hardware reset, before management access
const RESET_RECOVERY_US: u32 = 2_000;

// =============================================================================
// DP83822 Driver
// =============================================================================

/// DP83822 device handle
///
/// Owns the injected capability set plus the state discovered during
/// bring-up. One instance per physical chip; the driver assumes
/// exclusive access to the chip and to the underlying bus.
///
/// Operations other than [`initialize`](Self::initialize) address the
/// chip at the discovered bus address and assume a completed bring-up.
#[derive(Debug)]
pub struct Dp83822<IO> {
    io: IO,
    addr: u8,
    initialized: bool,
}

impl<IO: PhyIo> Dp83822<IO> {
    /// Create a device handle over a capability set.
    ///
    /// The bus address starts unassigned; it is discovered by
    /// [`initialize`](Self::initialize).
    pub const fn new(io: IO) -> Self {
        Self {
            io,
            addr: PHY_ADDR_UNASSIGNED,
            initialized: false,
        }
    }

    /// Bus address discovered during bring-up, if any
    pub fn address(&self) -> Option<u8> {
        (self.addr <= MAX_PHY_ADDR).then_some(self.addr)
    }

    /// Whether a full bring-up has completed
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Borrow the capability set
    ///
    /// Escape hatch for vendor registers the driver does not cover.
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Mutably borrow the capability set
    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Consume the handle and return the capability set
    pub fn free(self) -> IO {
        self.io
    }

    // =========================================================================
    // Register Helpers
    // =========================================================================

    /// Read a register at the discovered address.
    fn read(&mut self, reg_addr: u8) -> Result<u16> {
        self.io
            .read(self.addr, reg_addr)
            .map_err(|_| IoError::Read.into())
    }

    /// Write a register at the discovered address.
    fn write(&mut self, reg_addr: u8, value: u16) -> Result<()> {
        self.io
            .write(self.addr, reg_addr, value)
            .map_err(|_| IoError::Write.into())
    }

    /// Read-modify-write on the control register.
    fn update_bmcr(&mut self, clear: u16, set: u16) -> Result<()> {
        let val = self.read(reg::BMCR)?;
        self.write(reg::BMCR, (val & !clear) | set)
    }

    /// Poll `reg_addr` until `done` holds for its value.
    ///
    /// Bounded by `timeout_ms` against the injected tick source; a
    /// transport fault inside the poll is fatal, not "still waiting".
    fn wait_for(&mut self, reg_addr: u8, timeout_ms: u32, done: fn(u16) -> bool) -> Result<()> {
        let start = self.io.get_tick();
        loop {
            if done(self.read(reg_addr)?) {
                return Ok(());
            }
            if self.io.get_tick().wrapping_sub(start) > timeout_ms {
                return Err(IoError::Timeout.into());
            }
        }
    }

    // =========================================================================
    // Bring-Up / Tear-Down
    // =========================================================================

    /// Bring the device up.
    ///
    /// Discovers the chip's bus address, verifies its identity,
    /// soft-resets it, restarts autonegotiation and waits for the link.
    /// A second call on an initialized device performs no register
    /// access and returns success.
    ///
    /// # Errors
    ///
    /// [`AddressError::NoDeviceFound`] when no bus address answers,
    /// [`AddressError::IdMismatch`] when the responding chip is not a
    /// DP83822, [`IoError`] for transport faults and expired waits.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }

        self.io.init().map_err(|_| ConfigError::HookFailed)?;

        self.addr = PHY_ADDR_UNASSIGNED;

        // Scan the bus for the first address that answers with plausible
        // identity registers. A transport fault only rules out that one
        // address; an undriven address reads all-ones on both.
        for addr in 0..=MAX_PHY_ADDR {
            let Ok(id1) = self.io.read(addr, reg::PHYIDR1) else {
                continue;
            };
            let Ok(id2) = self.io.read(addr, reg::PHYIDR2) else {
                continue;
            };
            if id1 != NO_DEVICE && id2 != NO_DEVICE {
                self.addr = addr;
                break;
            }
        }
        if self.addr > MAX_PHY_ADDR {
            return Err(AddressError::NoDeviceFound.into());
        }

        // The scan only proves something answered; the OUI bits prove it
        // is the chip this driver is for.
        if self.read(reg::PHYIDR1)? != phyidr1::OUI_PATTERN {
            return Err(AddressError::IdMismatch.into());
        }

        // Soft reset, self-clearing
        self.write(reg::BMCR, bmcr::SOFT_RESET)?;
        self.wait_for(reg::BMCR, RESET_TIMEOUT_MS, |v| v & bmcr::SOFT_RESET == 0)?;

        // Enable and restart autonegotiation
        self.write(reg::BMCR, bmcr::AN_ENABLE | bmcr::AN_RESTART)?;
        self.wait_for(reg::BMCR, AN_ENABLE_TIMEOUT_MS, |v| v & bmcr::AN_ENABLE != 0)?;

        // Wait for a link partner
        self.wait_for(reg::BMSR, LINK_UP_TIMEOUT_MS, |v| v & bmsr::LINK_STATUS != 0)?;
        // Link status is latched low; one more read reflects current state
        let _ = self.read(reg::BMSR)?;

        self.initialized = true;
        Ok(())
    }

    /// Tear the device down.
    ///
    /// Invokes the deinit hook and drops the initialized flag. The
    /// discovered bus address survives, so a vendor-register escape
    /// hatch keeps working after deinitialization.
    pub fn deinitialize(&mut self) -> Result<()> {
        if self.initialized {
            self.initialized = false;
            self.io.deinit().map_err(|_| ConfigError::HookFailed)?;
        }
        Ok(())
    }

    // =========================================================================
    // Link Control
    // =========================================================================

    /// Put the PHY into its low-power state.
    pub fn enable_power_down(&mut self) -> Result<()> {
        self.update_bmcr(0, bmcr::POWER_DOWN)
    }

    /// Resume normal operation from power-down.
    pub fn disable_power_down(&mut self) -> Result<()> {
        self.update_bmcr(bmcr::POWER_DOWN, 0)
    }

    /// Enable autonegotiation.
    ///
    /// Does not restart an exchange already in progress; use
    /// [`initialize`](Self::initialize) for a full restart.
    pub fn start_auto_negotiation(&mut self) -> Result<()> {
        self.update_bmcr(0, bmcr::AN_ENABLE)
    }

    /// Route transmit data back to the receive path inside the PHY.
    pub fn enable_loopback(&mut self) -> Result<()> {
        self.update_bmcr(0, bmcr::LOOPBACK)
    }

    /// Return to normal, non-looped operation.
    pub fn disable_loopback(&mut self) -> Result<()> {
        self.update_bmcr(bmcr::LOOPBACK, 0)
    }

    /// Force speed and duplex, disabling autonegotiation.
    ///
    /// 10 Mb/s half duplex has no forced-mode encoding in the control
    /// register; requesting it returns
    /// [`ConfigError::UnsupportedLinkMode`] without touching the
    /// register.
    pub fn set_link_state(&mut self, target: LinkStatus) -> Result<()> {
        let set = match (target.speed, target.duplex) {
            (Speed::Mbps100, Duplex::Full) => bmcr::SPEED_SELECT | bmcr::DUPLEX_FULL,
            (Speed::Mbps100, Duplex::Half) => bmcr::SPEED_SELECT,
            (Speed::Mbps10, Duplex::Full) => bmcr::DUPLEX_FULL,
            (Speed::Mbps10, Duplex::Half) => {
                return Err(ConfigError::UnsupportedLinkMode.into());
            }
        };
        self.update_bmcr(bmcr::AN_ENABLE | bmcr::SPEED_SELECT | bmcr::DUPLEX_FULL, set)
    }

    // =========================================================================
    // Link State Decoding
    // =========================================================================

    /// Decode the current link state.
    ///
    /// [`LinkState::Down`] and [`LinkState::AutoNegIncomplete`] are
    /// observable states, not errors. In forced mode the speed/duplex
    /// pair comes straight from the control register; with
    /// autonegotiation enabled it comes from the PHYSTS register, which
    /// uses its own bit layout *and* its own all-bits-clear default
    /// (100 half there, versus 10 half in forced mode).
    pub fn link_state(&mut self) -> Result<LinkState> {
        let status = self.read(reg::BMSR)?;
        if status & bmsr::LINK_STATUS == 0 {
            return Ok(LinkState::Down);
        }

        let control = self.read(reg::BMCR)?;
        if control & bmcr::AN_ENABLE == 0 {
            // Forced mode: decode the control register directly
            let speed = if control & bmcr::SPEED_SELECT != 0 {
                Speed::Mbps100
            } else {
                Speed::Mbps10
            };
            let duplex = if control & bmcr::DUPLEX_FULL != 0 {
                Duplex::Full
            } else {
                Duplex::Half
            };
            return Ok(LinkState::Up(LinkStatus::new(speed, duplex)));
        }

        let physts = self.read(reg::PHYSTS)?;
        if physts & physts::AN_DONE == 0 {
            return Ok(LinkState::AutoNegIncomplete);
        }

        let resolved = match physts & (physts::SPEED | physts::DUPLEX) {
            0 => LinkStatus::fast_half(),
            x if x == physts::DUPLEX => LinkStatus::fast_full(),
            x if x == physts::SPEED => LinkStatus::slow_half(),
            x if x == (physts::SPEED | physts::DUPLEX) => LinkStatus::slow_full(),
            _ => return Err(Error::Decode),
        };
        Ok(LinkState::Up(resolved))
    }
}

// =============================================================================
// DP83822 Driver (with reset pin)
// =============================================================================

/// DP83822 driver with an active-low hardware reset pin
///
/// Soft reset over the management bus is usually sufficient; hardware
/// reset recovers the chip from states where the bus itself is wedged.
/// The pin is driven through `embedded_hal::digital::OutputPin`.
///
/// # Example
///
/// ```ignore
/// let mut phy = Dp83822WithReset::new(io, reset_pin);
/// phy.hardware_reset(&mut delay)?;
/// phy.phy_mut().initialize()?;
/// ```
#[derive(Debug)]
pub struct Dp83822WithReset<IO, RST: OutputPin> {
    phy: Dp83822<IO>,
    reset_pin: RST,
}

impl<IO: PhyIo, RST: OutputPin> Dp83822WithReset<IO, RST> {
    /// Create a driver with a reset pin.
    ///
    /// The pin is released (driven high) immediately.
    pub fn new(io: IO, mut reset_pin: RST) -> Self {
        let _ = reset_pin.set_high();
        Self {
            phy: Dp83822::new(io),
            reset_pin,
        }
    }

    /// Pulse the reset pin and wait out the recovery time.
    ///
    /// Call before [`Dp83822::initialize`] when the chip may be in an
    /// unknown state.
    pub fn hardware_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        self.reset_pin
            .set_low()
            .map_err(|_| ConfigError::GpioFault)?;
        delay.delay_us(RESET_PULSE_US);

        self.reset_pin
            .set_high()
            .map_err(|_| ConfigError::GpioFault)?;
        delay.delay_us(RESET_RECOVERY_US);

        Ok(())
    }

    /// Hold the chip in reset until [`release_reset`](Self::release_reset).
    pub fn assert_reset(&mut self) -> Result<()> {
        self.reset_pin
            .set_low()
            .map_err(|_| ConfigError::GpioFault.into())
    }

    /// Release the chip from reset.
    ///
    /// Allow the recovery time to pass before any management access.
    pub fn release_reset(&mut self) -> Result<()> {
        self.reset_pin
            .set_high()
            .map_err(|_| ConfigError::GpioFault.into())
    }

    /// Borrow the inner driver
    pub fn phy(&self) -> &Dp83822<IO> {
        &self.phy
    }

    /// Mutably borrow the inner driver
    pub fn phy_mut(&mut self) -> &mut Dp83822<IO> {
        &mut self.phy
    }

    /// Split into the inner driver and the reset pin
    pub fn into_parts(self) -> (Dp83822<IO>, RST) {
        (self.phy, self.reset_pin)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
