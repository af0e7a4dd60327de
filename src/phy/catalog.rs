//! Ordered rate sets and a plain peer link description.
//!
//! Real deployments get the operational rate set of a peer from association;
//! the reference sets here cover the mandatory and optional legacy rates of
//! 802.11b, 802.11a and 802.11g.

use crate::core::{DSSS_CHANNEL_WIDTH, LEGACY_CHANNEL_WIDTH, RemoteStation};

use super::mode::WifiMode;

/// Ordered list of modes, slowest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateCatalog {
    modes: Vec<WifiMode>,
}

impl RateCatalog {
    /// Build a catalog, ordering the modes by nominal rate.
    ///
    /// The sort is stable, so modes with equal rates keep their given order.
    pub fn new(mut modes: Vec<WifiMode>) -> Self {
        modes.sort_by_key(WifiMode::nominal_rate);
        Self { modes }
    }

    /// 802.11b: DSSS 1, 2 and HR-DSSS 5.5, 11 Mb/s.
    pub fn dsss() -> Self {
        Self::new(vec![
            WifiMode::dsss_1mbps(),
            WifiMode::dsss_2mbps(),
            WifiMode::dsss_5_5mbps(),
            WifiMode::dsss_11mbps(),
        ])
    }

    /// 802.11a: OFDM 6 to 54 Mb/s.
    pub fn ofdm() -> Self {
        Self::new(vec![
            WifiMode::ofdm_6mbps(),
            WifiMode::ofdm_9mbps(),
            WifiMode::ofdm_12mbps(),
            WifiMode::ofdm_18mbps(),
            WifiMode::ofdm_24mbps(),
            WifiMode::ofdm_36mbps(),
            WifiMode::ofdm_48mbps(),
            WifiMode::ofdm_54mbps(),
        ])
    }

    /// 802.11g: ERP-OFDM 6 to 54 Mb/s.
    pub fn erp_ofdm() -> Self {
        Self::new(
            [
                6_000_000, 9_000_000, 12_000_000, 18_000_000, 24_000_000, 36_000_000, 48_000_000,
                54_000_000,
            ]
            .into_iter()
            .map(WifiMode::erp)
            .collect(),
        )
    }

    /// Number of modes.
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Check if the catalog has no modes.
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Mode at `index`.
    pub fn get(&self, index: usize) -> Option<&WifiMode> {
        self.modes.get(index)
    }

    /// Iterate from slowest to fastest.
    pub fn iter(&self) -> impl Iterator<Item = &WifiMode> {
        self.modes.iter()
    }

    /// Index of the fastest mode, `None` when empty.
    pub fn top_index(&self) -> Option<usize> {
        self.modes.len().checked_sub(1)
    }
}

impl FromIterator<WifiMode> for RateCatalog {
    fn from_iter<I: IntoIterator<Item = WifiMode>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Negotiated link towards one peer.
///
/// A ready-made [`RemoteStation`] for pipelines that keep their peer state in
/// plain structs, and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerLink {
    /// Operational rate set.
    pub rates: RateCatalog,
    /// Rates usable for non-ERP protection frames (empty: use `rates`).
    pub non_erp_rates: RateCatalog,
    /// Channel width in MHz.
    pub channel_width: u16,
    /// Long retry limit.
    pub long_retry_count: u32,
    /// Peer accepts short preambles.
    pub short_preamble: bool,
    /// Aggregation enabled.
    pub aggregation: bool,
}

impl PeerLink {
    /// Default long retry limit (dot11LongRetryLimit).
    pub const DEFAULT_LONG_RETRY_COUNT: u32 = 7;

    /// Link with the given rate set on its natural channel width.
    ///
    /// A set starting with a DSSS-family mode gets the 22 MHz channel,
    /// anything else 20 MHz.
    pub fn new(rates: RateCatalog) -> Self {
        let channel_width = match rates.get(0) {
            Some(mode) if mode.class().is_dsss_family() => DSSS_CHANNEL_WIDTH,
            _ => LEGACY_CHANNEL_WIDTH,
        };
        Self {
            rates,
            non_erp_rates: RateCatalog::default(),
            channel_width,
            long_retry_count: Self::DEFAULT_LONG_RETRY_COUNT,
            short_preamble: false,
            aggregation: false,
        }
    }

    /// Set the channel width in MHz.
    pub fn with_channel_width(mut self, channel_width: u16) -> Self {
        self.channel_width = channel_width;
        self
    }

    /// Set the non-ERP rate set used under protection.
    pub fn with_non_erp_rates(mut self, rates: RateCatalog) -> Self {
        self.non_erp_rates = rates;
        self
    }

    /// Set short preamble support.
    pub fn with_short_preamble(mut self, enabled: bool) -> Self {
        self.short_preamble = enabled;
        self
    }

    /// Set the long retry limit.
    pub fn with_long_retry_count(mut self, count: u32) -> Self {
        self.long_retry_count = count;
        self
    }

    /// Set aggregation.
    pub fn with_aggregation(mut self, enabled: bool) -> Self {
        self.aggregation = enabled;
        self
    }

    fn non_erp(&self) -> &RateCatalog {
        if self.non_erp_rates.is_empty() {
            &self.rates
        } else {
            &self.non_erp_rates
        }
    }
}

impl RemoteStation for PeerLink {
    fn supported_count(&self) -> usize {
        self.rates.len()
    }

    fn supported(&self, index: usize) -> WifiMode {
        self.rates.modes[index]
    }

    fn non_erp_supported_count(&self) -> usize {
        self.non_erp().len()
    }

    fn non_erp_supported(&self, index: usize) -> WifiMode {
        self.non_erp().modes[index]
    }

    fn channel_width(&self) -> u16 {
        self.channel_width
    }

    fn long_retry_count(&self) -> u32 {
        self.long_retry_count
    }

    fn short_preamble_supported(&self) -> bool {
        self.short_preamble
    }

    fn aggregation(&self) -> bool {
        self.aggregation
    }
}
