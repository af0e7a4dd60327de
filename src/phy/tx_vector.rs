//! Transmission parameters handed to the PHY.

use crate::core::{
    DSSS_CHANNEL_WIDTH, LEGACY_CHANNEL_WIDTH, LEGACY_GUARD_INTERVAL_NS, LEGACY_NESS, LEGACY_N_TX,
    LEGACY_NSS,
};

use super::mode::{Preamble, WifiMode};

/// Parameters for one transmission attempt.
///
/// Everything except the mode is forwarded from the peer's link description;
/// the rate adaptation engine only chooses `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxVector {
    /// Selected mode.
    pub mode: WifiMode,
    /// Transmit power level index.
    pub tx_power_level: u8,
    /// Retry limit for this frame.
    pub retry_limit: u32,
    /// PLCP preamble.
    pub preamble: Preamble,
    /// Guard interval in nanoseconds.
    pub guard_interval_ns: u16,
    /// Number of transmit chains.
    pub n_tx: u8,
    /// Number of spatial streams.
    pub nss: u8,
    /// Number of extension spatial streams.
    pub ness: u8,
    /// Channel width in MHz.
    pub channel_width: u16,
    /// Whether the frame is sent as part of an aggregate.
    pub aggregation: bool,
    /// Space-time block coding.
    pub stbc: bool,
}

impl TxVector {
    /// Build a legacy single-stream vector: 800 ns GI, one chain, no STBC.
    pub fn legacy(
        mode: WifiMode,
        tx_power_level: u8,
        retry_limit: u32,
        preamble: Preamble,
        channel_width: u16,
        aggregation: bool,
    ) -> Self {
        Self {
            mode,
            tx_power_level,
            retry_limit,
            preamble,
            guard_interval_ns: LEGACY_GUARD_INTERVAL_NS,
            n_tx: LEGACY_N_TX,
            nss: LEGACY_NSS,
            ness: LEGACY_NESS,
            channel_width,
            aggregation,
            stbc: false,
        }
    }

    /// Data rate of the selected mode at this vector's channel width.
    pub fn data_rate(&self) -> u64 {
        self.mode.data_rate(self.channel_width)
    }
}

/// Clamp a channel width for legacy rate adaptation.
///
/// Widths above 20 MHz belong to HT/VHT/HE operation and are brought back to
/// 20 MHz; the 22 MHz DSSS channel and narrower OFDM channels pass through.
pub fn legacy_channel_width(channel_width: u16) -> u16 {
    if channel_width > LEGACY_CHANNEL_WIDTH && channel_width != DSSS_CHANNEL_WIDTH {
        LEGACY_CHANNEL_WIDTH
    } else {
        channel_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_wide_channels() {
        assert_eq!(legacy_channel_width(40), 20);
        assert_eq!(legacy_channel_width(80), 20);
        assert_eq!(legacy_channel_width(160), 20);
    }

    #[test]
    fn test_keep_legacy_channels() {
        assert_eq!(legacy_channel_width(22), 22);
        assert_eq!(legacy_channel_width(20), 20);
        assert_eq!(legacy_channel_width(10), 10);
        assert_eq!(legacy_channel_width(5), 5);
    }

    #[test]
    fn test_legacy_vector_fields() {
        let tx = TxVector::legacy(WifiMode::ofdm_12mbps(), 3, 7, Preamble::Long, 10, true);
        assert_eq!(tx.guard_interval_ns, 800);
        assert_eq!((tx.n_tx, tx.nss, tx.ness), (1, 1, 0));
        assert!(!tx.stbc);
        assert!(tx.aggregation);
        assert_eq!(tx.data_rate(), 6_000_000);
    }
}
