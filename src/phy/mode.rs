//! Legacy transmission modes.
//!
//! A [`WifiMode`] names one entry of a legacy (non-HT) rate set: a modulation
//! family and the nominal data rate it achieves on its reference channel.

use std::fmt;

use crate::core::{DSSS_CHANNEL_WIDTH, LEGACY_CHANNEL_WIDTH};

/// Modulation family of a legacy mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModulationClass {
    /// 802.11 DSSS (1 and 2 Mb/s).
    Dsss,
    /// 802.11b HR-DSSS / CCK (5.5 and 11 Mb/s).
    HrDsss,
    /// 802.11g ERP-OFDM.
    ErpOfdm,
    /// 802.11a OFDM.
    Ofdm,
}

impl ModulationClass {
    /// DSSS and HR-DSSS share the 22 MHz channel and the long/short preamble choice.
    pub fn is_dsss_family(&self) -> bool {
        matches!(self, Self::Dsss | Self::HrDsss)
    }
}

/// PLCP preamble used for a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preamble {
    /// Long preamble, understood by every legacy station.
    Long,
    /// Short preamble (DSSS family only, when the peer supports it).
    Short,
}

/// One legacy transmission mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WifiMode {
    name: &'static str,
    class: ModulationClass,
    /// Data rate in bit/s on the reference channel (22 MHz DSSS, 20 MHz OFDM).
    rate_bps: u64,
}

impl WifiMode {
    /// Create a mode.
    pub const fn new(name: &'static str, class: ModulationClass, rate_bps: u64) -> Self {
        Self {
            name,
            class,
            rate_bps,
        }
    }

    /// Unique mode name (e.g. `"OfdmRate24Mbps"`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Modulation family.
    pub fn class(&self) -> ModulationClass {
        self.class
    }

    /// Nominal data rate in bit/s on the reference channel.
    pub fn nominal_rate(&self) -> u64 {
        self.rate_bps
    }

    /// Data rate in bit/s on a channel of `channel_width` MHz.
    ///
    /// DSSS rates do not depend on the width. OFDM rates scale with it
    /// (half-rate at 10 MHz, quarter-rate at 5 MHz); 22 MHz counts as 20.
    pub fn data_rate(&self, channel_width: u16) -> u64 {
        if self.class.is_dsss_family() {
            return self.rate_bps;
        }
        let width = if channel_width == DSSS_CHANNEL_WIDTH {
            LEGACY_CHANNEL_WIDTH
        } else {
            channel_width
        };
        self.rate_bps * u64::from(width) / u64::from(LEGACY_CHANNEL_WIDTH)
    }

    /// DSSS 1 Mb/s.
    pub const fn dsss_1mbps() -> Self {
        Self::new("DsssRate1Mbps", ModulationClass::Dsss, 1_000_000)
    }

    /// DSSS 2 Mb/s.
    pub const fn dsss_2mbps() -> Self {
        Self::new("DsssRate2Mbps", ModulationClass::Dsss, 2_000_000)
    }

    /// HR-DSSS (CCK) 5.5 Mb/s.
    pub const fn dsss_5_5mbps() -> Self {
        Self::new("DsssRate5_5Mbps", ModulationClass::HrDsss, 5_500_000)
    }

    /// HR-DSSS (CCK) 11 Mb/s.
    pub const fn dsss_11mbps() -> Self {
        Self::new("DsssRate11Mbps", ModulationClass::HrDsss, 11_000_000)
    }

    /// OFDM 6 Mb/s.
    pub const fn ofdm_6mbps() -> Self {
        Self::new("OfdmRate6Mbps", ModulationClass::Ofdm, 6_000_000)
    }

    /// OFDM 9 Mb/s.
    pub const fn ofdm_9mbps() -> Self {
        Self::new("OfdmRate9Mbps", ModulationClass::Ofdm, 9_000_000)
    }

    /// OFDM 12 Mb/s.
    pub const fn ofdm_12mbps() -> Self {
        Self::new("OfdmRate12Mbps", ModulationClass::Ofdm, 12_000_000)
    }

    /// OFDM 18 Mb/s.
    pub const fn ofdm_18mbps() -> Self {
        Self::new("OfdmRate18Mbps", ModulationClass::Ofdm, 18_000_000)
    }

    /// OFDM 24 Mb/s.
    pub const fn ofdm_24mbps() -> Self {
        Self::new("OfdmRate24Mbps", ModulationClass::Ofdm, 24_000_000)
    }

    /// OFDM 36 Mb/s.
    pub const fn ofdm_36mbps() -> Self {
        Self::new("OfdmRate36Mbps", ModulationClass::Ofdm, 36_000_000)
    }

    /// OFDM 48 Mb/s.
    pub const fn ofdm_48mbps() -> Self {
        Self::new("OfdmRate48Mbps", ModulationClass::Ofdm, 48_000_000)
    }

    /// OFDM 54 Mb/s.
    pub const fn ofdm_54mbps() -> Self {
        Self::new("OfdmRate54Mbps", ModulationClass::Ofdm, 54_000_000)
    }

    /// ERP-OFDM variant of an OFDM mode (same rate, 802.11g naming).
    pub const fn erp(rate_bps: u64) -> Self {
        let name = match rate_bps {
            6_000_000 => "ErpOfdmRate6Mbps",
            9_000_000 => "ErpOfdmRate9Mbps",
            12_000_000 => "ErpOfdmRate12Mbps",
            18_000_000 => "ErpOfdmRate18Mbps",
            24_000_000 => "ErpOfdmRate24Mbps",
            36_000_000 => "ErpOfdmRate36Mbps",
            48_000_000 => "ErpOfdmRate48Mbps",
            54_000_000 => "ErpOfdmRate54Mbps",
            _ => "ErpOfdmRate",
        };
        Self::new(name, ModulationClass::ErpOfdm, rate_bps)
    }
}

impl fmt::Display for WifiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dsss_rate_ignores_width() {
        let mode = WifiMode::dsss_11mbps();
        assert_eq!(mode.data_rate(22), 11_000_000);
        assert_eq!(mode.data_rate(20), 11_000_000);
    }

    #[test]
    fn test_ofdm_rate_scales_with_width() {
        let mode = WifiMode::ofdm_54mbps();
        assert_eq!(mode.data_rate(20), 54_000_000);
        assert_eq!(mode.data_rate(10), 27_000_000);
        assert_eq!(mode.data_rate(5), 13_500_000);
        assert_eq!(mode.data_rate(22), 54_000_000);
    }

    #[test]
    fn test_erp_naming() {
        let mode = WifiMode::erp(24_000_000);
        assert_eq!(mode.name(), "ErpOfdmRate24Mbps");
        assert_eq!(mode.class(), ModulationClass::ErpOfdm);
        assert_eq!(mode.to_string(), "ErpOfdmRate24Mbps");
        assert_ne!(mode, WifiMode::ofdm_24mbps());
    }

    #[test]
    fn test_dsss_family() {
        assert!(ModulationClass::Dsss.is_dsss_family());
        assert!(ModulationClass::HrDsss.is_dsss_family());
        assert!(!ModulationClass::ErpOfdm.is_dsss_family());
        assert!(!ModulationClass::Ofdm.is_dsss_family());
    }
}
