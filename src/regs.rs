//! DP83822 register map
//!
//! Only the registers the driver actually touches are defined here. The
//! chip's MII register space is the IEEE 802.3 Clause 22 layout for
//! registers 0-15 plus the vendor PHYSTS register at 0x10.

/// Register addresses (MII mapping)
pub mod reg {
    /// Basic Mode Control Register
    pub const BMCR: u8 = 0x00;
    /// Basic Mode Status Register
    pub const BMSR: u8 = 0x01;
    /// PHY Identifier Register 1 (OUI bits [18:3])
    pub const PHYIDR1: u8 = 0x02;
    /// PHY Identifier Register 2 (OUI bits [24:19], model, revision)
    pub const PHYIDR2: u8 = 0x03;
    /// PHY Status Register (vendor-specific, negotiated speed/duplex)
    pub const PHYSTS: u8 = 0x10;
}

/// Basic Mode Control Register (0x00) bits
pub mod bmcr {
    /// Soft reset, self-clearing
    pub const SOFT_RESET: u16 = 0x8000;
    /// Digital loopback
    pub const LOOPBACK: u16 = 0x4000;
    /// Speed select: set = 100 Mb/s, clear = 10 Mb/s (forced mode)
    pub const SPEED_SELECT: u16 = 0x2000;
    /// Autonegotiation enable
    pub const AN_ENABLE: u16 = 0x1000;
    /// Power down
    pub const POWER_DOWN: u16 = 0x0800;
    /// Restart autonegotiation, self-clearing
    pub const AN_RESTART: u16 = 0x0200;
    /// Duplex mode: set = full, clear = half (forced mode)
    pub const DUPLEX_FULL: u16 = 0x0100;
}

/// Basic Mode Status Register (0x01) bits
pub mod bmsr {
    /// Link is up. Latched low: read twice for the current state.
    pub const LINK_STATUS: u16 = 0x0004;
}

/// PHY Identifier Register 1 (0x02) expected contents
pub mod phyidr1 {
    /// OUI bits [18:3] of the TI identifier
    pub const OUI_PATTERN: u16 = 0x2000;
}

/// PHY Status Register (0x10) bits
pub mod physts {
    /// Autonegotiation complete
    pub const AN_DONE: u16 = 0x0010;
    /// Resolved duplex: see the decode table in the driver
    pub const DUPLEX: u16 = 0x0004;
    /// Resolved speed: see the decode table in the driver
    pub const SPEED: u16 = 0x0002;
}

/// Highest valid management bus address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Sentinel address meaning "discovery has not succeeded"
pub const PHY_ADDR_UNASSIGNED: u8 = MAX_PHY_ADDR + 1;

/// Value an MDIO read returns when nothing drives the bus
pub const NO_DEVICE: u16 = 0xFFFF;
