//! Register I/O capability interface
//!
//! The driver never touches hardware directly. All register traffic and
//! all timing goes through a caller-supplied capability set:
//!
//! - [`PhyIo`] is the trait every driver method consumes. Implement it
//!   directly over your MAC's MDIO controller for the idiomatic path.
//! - [`IoTable`]/[`TableIo`] is the function-slot form of the same
//!   contract, for integrators porting a BSP-style callback table. The
//!   mandatory subset is validated once, at construction.
//! - [`Unconnected`] is a transport that is not wired to anything;
//!   every access fails. It exists for tests and placeholder wiring.

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Bus Fault
// =============================================================================

/// Transport-level failure token
///
/// Capability implementations return this when a bus transaction fails.
/// The driver maps it onto [`crate::error::IoError`] according to the
/// operation in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusFault;

// =============================================================================
// Capability Trait
// =============================================================================

/// Caller-supplied register I/O capabilities
///
/// `read`, `write` and `get_tick` are mandatory; the type system enforces
/// their presence. `init` and `deinit` are optional hooks with no-op
/// defaults, invoked once per bring-up/tear-down for clock and GPIO
/// preparation.
pub trait PhyIo {
    /// Prepare the transport (clocks, GPIO). Invoked once at the start
    /// of bring-up.
    fn init(&mut self) -> Result<(), BusFault> {
        Ok(())
    }

    /// Release transport resources. Invoked once during tear-down.
    fn deinit(&mut self) -> Result<(), BusFault> {
        Ok(())
    }

    /// Read a 16-bit management register at `phy_addr`/`reg`.
    fn read(&mut self, phy_addr: u8, reg: u8) -> Result<u16, BusFault>;

    /// Write a 16-bit management register at `phy_addr`/`reg`.
    fn write(&mut self, phy_addr: u8, reg: u8, value: u16) -> Result<(), BusFault>;

    /// Monotonic millisecond tick, wrapping at `u32::MAX`.
    ///
    /// Consumed by the bounded polls in the bring-up sequence. Elapsed
    /// time is computed with wrapping subtraction.
    fn get_tick(&mut self) -> u32;
}

// =============================================================================
// Function-Slot Capability Table
// =============================================================================

/// A capability table of plain function slots over a bus handle `T`
///
/// This mirrors the callback-table registration style of vendor BSPs.
/// The handle `T` carries whatever state the functions need (typically
/// the MAC peripheral), so no global hardware handle is involved.
///
/// Any slot may be left `None`; [`TableIo::new`] decides which absences
/// are fatal.
#[derive(Debug)]
pub struct IoTable<T> {
    /// Optional transport preparation hook
    pub init: Option<fn(&mut T) -> Result<(), BusFault>>,
    /// Optional transport release hook
    pub deinit: Option<fn(&mut T) -> Result<(), BusFault>>,
    /// Register read, mandatory
    pub read_reg: Option<fn(&mut T, u8, u8) -> Result<u16, BusFault>>,
    /// Register write, mandatory
    pub write_reg: Option<fn(&mut T, u8, u8, u16) -> Result<(), BusFault>>,
    /// Millisecond tick source, mandatory
    pub get_tick: Option<fn(&mut T) -> u32>,
}

impl<T> Default for IoTable<T> {
    fn default() -> Self {
        Self {
            init: None,
            deinit: None,
            read_reg: None,
            write_reg: None,
            get_tick: None,
        }
    }
}

/// A validated capability table bound to its bus handle
///
/// Construction is the registration step: it fails fast with the precise
/// [`ConfigError`] variant when a mandatory slot is absent, and has no
/// side effects beyond storing the table.
#[derive(Debug)]
pub struct TableIo<T> {
    handle: T,
    init: Option<fn(&mut T) -> Result<(), BusFault>>,
    deinit: Option<fn(&mut T) -> Result<(), BusFault>>,
    read_reg: fn(&mut T, u8, u8) -> Result<u16, BusFault>,
    write_reg: fn(&mut T, u8, u8, u16) -> Result<(), BusFault>,
    get_tick: fn(&mut T) -> u32,
}

impl<T> TableIo<T> {
    /// Validate `table` and bind it to `handle`.
    ///
    /// `read_reg`, `write_reg` and `get_tick` must be present;
    /// `init`/`deinit` may be absent.
    pub fn new(table: IoTable<T>, handle: T) -> ConfigResult<Self> {
        let read_reg = table.read_reg.ok_or(ConfigError::MissingReadFn)?;
        let write_reg = table.write_reg.ok_or(ConfigError::MissingWriteFn)?;
        let get_tick = table.get_tick.ok_or(ConfigError::MissingTickFn)?;

        Ok(Self {
            handle,
            init: table.init,
            deinit: table.deinit,
            read_reg,
            write_reg,
            get_tick,
        })
    }

    /// Borrow the bus handle
    pub fn handle(&self) -> &T {
        &self.handle
    }

    /// Mutably borrow the bus handle
    pub fn handle_mut(&mut self) -> &mut T {
        &mut self.handle
    }

    /// Consume the wrapper and return the bus handle
    pub fn into_handle(self) -> T {
        self.handle
    }
}

impl<T> PhyIo for TableIo<T> {
    fn init(&mut self) -> Result<(), BusFault> {
        match self.init {
            Some(f) => f(&mut self.handle),
            None => Ok(()),
        }
    }

    fn deinit(&mut self) -> Result<(), BusFault> {
        match self.deinit {
            Some(f) => f(&mut self.handle),
            None => Ok(()),
        }
    }

    fn read(&mut self, phy_addr: u8, reg: u8) -> Result<u16, BusFault> {
        (self.read_reg)(&mut self.handle, phy_addr, reg)
    }

    fn write(&mut self, phy_addr: u8, reg: u8, value: u16) -> Result<(), BusFault> {
        (self.write_reg)(&mut self.handle, phy_addr, reg, value)
    }

    fn get_tick(&mut self) -> u32 {
        (self.get_tick)(&mut self.handle)
    }
}

// =============================================================================
// Unconnected Transport
// =============================================================================

/// A transport that is not wired to any bus
///
/// Every register access fails with [`BusFault`] and the tick never
/// advances. Useful in tests and as placeholder wiring; not production
/// logic.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Unconnected;

impl PhyIo for Unconnected {
    fn read(&mut self, _phy_addr: u8, _reg: u8) -> Result<u16, BusFault> {
        Err(BusFault)
    }

    fn write(&mut self, _phy_addr: u8, _reg: u8, _value: u16) -> Result<(), BusFault> {
        Err(BusFault)
    }

    fn get_tick(&mut self) -> u32 {
        0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
