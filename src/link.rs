//! Link speed, duplex and decoded link state

// =============================================================================
// Speed / Duplex
// =============================================================================

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    #[default]
    Mbps100,
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

// =============================================================================
// Link Status
// =============================================================================

/// A resolved speed/duplex pair
///
/// Either the outcome of autonegotiation or a forced configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
}

impl LinkStatus {
    /// Create a new link status
    pub const fn new(speed: Speed, duplex: Duplex) -> Self {
        Self { speed, duplex }
    }

    /// 100 Mbps Full Duplex
    pub const fn fast_full() -> Self {
        Self::new(Speed::Mbps100, Duplex::Full)
    }

    /// 100 Mbps Half Duplex
    pub const fn fast_half() -> Self {
        Self::new(Speed::Mbps100, Duplex::Half)
    }

    /// 10 Mbps Full Duplex
    pub const fn slow_full() -> Self {
        Self::new(Speed::Mbps10, Duplex::Full)
    }

    /// 10 Mbps Half Duplex
    pub const fn slow_half() -> Self {
        Self::new(Speed::Mbps10, Duplex::Half)
    }
}

// =============================================================================
// Link State
// =============================================================================

/// Everything the status registers can say about the link
///
/// `Down` and `AutoNegIncomplete` are legitimate observable states. Only
/// transport failures and undecodable register contents are reported as
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No link partner detected
    Down,
    /// Autonegotiation is enabled but has not finished
    AutoNegIncomplete,
    /// Link is up with the given parameters
    Up(LinkStatus),
}

impl LinkState {
    /// The negotiated or forced parameters, if the link is up
    pub const fn status(&self) -> Option<LinkStatus> {
        match self {
            LinkState::Up(status) => Some(*status),
            _ => None,
        }
    }

    /// Whether a link partner is present and the link is usable
    pub const fn is_up(&self) -> bool {
        matches!(self, LinkState::Up(_))
    }
}
