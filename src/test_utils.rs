//! Testing utilities and mock implementations
//!
//! Mock capability implementations for exercising the driver on the host
//! without hardware access. Only available when running `cargo test`.

#![allow(missing_docs)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::vec::Vec;

use crate::io::{BusFault, PhyIo};
use crate::regs::{bmcr, bmsr, reg};

// =============================================================================
// Mock Capability Set
// =============================================================================

/// Mock register I/O for testing the driver without hardware
///
/// Backed by a register map with a write log, per-register read-fault
/// injection and a tick that advances on every `get_tick` call. Reads of
/// addresses nothing was installed at return the bus all-ones sentinel,
/// so address discovery behaves as on a real bus.
///
/// # Example
///
/// ```ignore
/// let mut io = MockPhyIo::new();
/// io.install_phy(5);
/// io.link_up(5);
///
/// let mut phy = Dp83822::new(io);
/// phy.initialize().unwrap();
/// assert_eq!(phy.address(), Some(5));
/// ```
#[derive(Debug, Default)]
pub struct MockPhyIo {
    /// Register values: (phy_addr, reg_addr) -> value
    registers: RefCell<HashMap<(u8, u8), u16>>,
    /// Record of reads: (phy_addr, reg_addr)
    read_log: RefCell<Vec<(u8, u8)>>,
    /// Record of writes: (phy_addr, reg_addr, value)
    write_log: RefCell<Vec<(u8, u8, u16)>>,
    /// Registers whose reads fail with a bus fault
    read_faults: RefCell<HashSet<(u8, u8)>>,
    /// When set, a written soft-reset bit stays set instead of self-clearing
    hold_reset: Cell<bool>,
    /// Millisecond tick, advanced per get_tick call
    tick: Cell<u32>,
    tick_step: Cell<u32>,
    init_calls: Cell<u32>,
    deinit_calls: Cell<u32>,
    fail_init: Cell<bool>,
    fail_deinit: Cell<bool>,
}

impl MockPhyIo {
    /// Create a new mock with an empty bus and a 1 ms tick step
    pub fn new() -> Self {
        let mock = Self::default();
        mock.tick_step.set(1);
        mock
    }

    /// Set a register value
    pub fn set_register(&self, phy_addr: u8, reg_addr: u8, value: u16) {
        self.registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), value);
    }

    /// Get the current value of a register (for test verification)
    pub fn get_register(&self, phy_addr: u8, reg_addr: u8) -> Option<u16> {
        self.registers.borrow().get(&(phy_addr, reg_addr)).copied()
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.write_log.borrow().clone()
    }

    /// Number of reads of one specific register
    pub fn reads_of(&self, phy_addr: u8, reg_addr: u8) -> usize {
        self.read_log
            .borrow()
            .iter()
            .filter(|&&entry| entry == (phy_addr, reg_addr))
            .count()
    }

    /// Total register accesses (reads plus writes)
    pub fn total_accesses(&self) -> usize {
        self.read_log.borrow().len() + self.write_log.borrow().len()
    }

    /// Make every read of one register fail with a bus fault
    pub fn fail_read(&self, phy_addr: u8, reg_addr: u8) {
        self.read_faults.borrow_mut().insert((phy_addr, reg_addr));
    }

    /// Keep the soft-reset bit set after a reset write
    pub fn hold_reset(&self) {
        self.hold_reset.set(true);
    }

    /// Make the init hook report a fault
    pub fn fail_init(&self) {
        self.fail_init.set(true);
    }

    /// Make the deinit hook report a fault
    pub fn fail_deinit(&self) {
        self.fail_deinit.set(true);
    }

    pub fn init_calls(&self) -> u32 {
        self.init_calls.get()
    }

    pub fn deinit_calls(&self) -> u32 {
        self.deinit_calls.get()
    }

    /// Install a DP83822 at `phy_addr`: matching identity registers,
    /// control and status registers cleared, link down.
    pub fn install_phy(&self, phy_addr: u8) {
        self.set_register(phy_addr, reg::PHYIDR1, 0x2000);
        self.set_register(phy_addr, reg::PHYIDR2, 0xA240);
        self.set_register(phy_addr, reg::BMCR, 0x0000);
        self.set_register(phy_addr, reg::BMSR, 0x0000);
    }

    /// Install a responding device whose identity is not a DP83822
    pub fn install_foreign_phy(&self, phy_addr: u8) {
        self.set_register(phy_addr, reg::PHYIDR1, 0x0007);
        self.set_register(phy_addr, reg::PHYIDR2, 0xC0F1);
        self.set_register(phy_addr, reg::BMCR, 0x0000);
        self.set_register(phy_addr, reg::BMSR, 0x0000);
    }

    /// Raise the link-status bit at `phy_addr`
    pub fn link_up(&self, phy_addr: u8) {
        let val = self.get_register(phy_addr, reg::BMSR).unwrap_or(0);
        self.set_register(phy_addr, reg::BMSR, val | bmsr::LINK_STATUS);
    }

    /// Drop the link-status bit at `phy_addr`
    pub fn link_down(&self, phy_addr: u8) {
        let val = self.get_register(phy_addr, reg::BMSR).unwrap_or(0);
        self.set_register(phy_addr, reg::BMSR, val & !bmsr::LINK_STATUS);
    }
}

impl PhyIo for MockPhyIo {
    fn init(&mut self) -> Result<(), BusFault> {
        self.init_calls.set(self.init_calls.get() + 1);
        if self.fail_init.get() {
            return Err(BusFault);
        }
        Ok(())
    }

    fn deinit(&mut self) -> Result<(), BusFault> {
        self.deinit_calls.set(self.deinit_calls.get() + 1);
        if self.fail_deinit.get() {
            return Err(BusFault);
        }
        Ok(())
    }

    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16, BusFault> {
        if self.read_faults.borrow().contains(&(phy_addr, reg_addr)) {
            return Err(BusFault);
        }
        self.read_log.borrow_mut().push((phy_addr, reg_addr));

        // An undriven bus reads all-ones
        Ok(self
            .registers
            .borrow()
            .get(&(phy_addr, reg_addr))
            .copied()
            .unwrap_or(0xFFFF))
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<(), BusFault> {
        self.write_log
            .borrow_mut()
            .push((phy_addr, reg_addr, value));

        // The soft-reset bit self-clears unless a test holds it
        let stored = if reg_addr == reg::BMCR && !self.hold_reset.get() {
            value & !bmcr::SOFT_RESET
        } else {
            value
        };
        self.registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), stored);

        Ok(())
    }

    fn get_tick(&mut self) -> u32 {
        let now = self.tick.get();
        self.tick.set(now.wrapping_add(self.tick_step.get()));
        now
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: Cell<u64>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        self.total_ns.get()
    }

    /// Total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

// =============================================================================
// Mock Reset Pin
// =============================================================================

/// Mock active-low reset pin recording its level transitions
#[derive(Debug, Default)]
pub struct MockResetPin {
    /// Recorded levels, true = high
    pub transitions: RefCell<Vec<bool>>,
}

impl MockResetPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> Vec<bool> {
        self.transitions.borrow().clone()
    }
}

impl embedded_hal::digital::ErrorType for MockResetPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.transitions.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.transitions.borrow_mut().push(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_reads_all_ones_when_empty() {
        let mut io = MockPhyIo::new();
        assert_eq!(io.read(0, reg::PHYIDR1).unwrap(), 0xFFFF);
    }

    #[test]
    fn mock_write_updates_and_logs() {
        let mut io = MockPhyIo::new();
        io.write(3, reg::BMSR, 0x1234).unwrap();
        assert_eq!(io.read(3, reg::BMSR).unwrap(), 0x1234);
        assert_eq!(io.get_writes(), std::vec![(3, reg::BMSR, 0x1234)]);
    }

    #[test]
    fn mock_reset_bit_self_clears() {
        let mut io = MockPhyIo::new();
        io.write(0, reg::BMCR, bmcr::SOFT_RESET | bmcr::AN_ENABLE).unwrap();
        assert_eq!(io.read(0, reg::BMCR).unwrap(), bmcr::AN_ENABLE);
    }

    #[test]
    fn mock_reset_bit_can_be_held() {
        let mut io = MockPhyIo::new();
        io.hold_reset();
        io.write(0, reg::BMCR, bmcr::SOFT_RESET).unwrap();
        assert_eq!(io.read(0, reg::BMCR).unwrap(), bmcr::SOFT_RESET);
    }

    #[test]
    fn mock_tick_advances_per_call() {
        let mut io = MockPhyIo::new();
        let first = io.get_tick();
        let second = io.get_tick();
        assert_eq!(second, first + 1);
    }

    #[test]
    fn mock_read_fault_injection() {
        let mut io = MockPhyIo::new();
        io.install_phy(2);
        io.fail_read(2, reg::PHYIDR1);
        assert_eq!(io.read(2, reg::PHYIDR1), Err(BusFault));
        // Other registers at the same address still read fine
        assert_eq!(io.read(2, reg::PHYIDR2).unwrap(), 0xA240);
    }
}
