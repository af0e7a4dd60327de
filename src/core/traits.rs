//! Core traits for ARF rate control.
//!
//! These traits define the interface between the engine and the transmit
//! pipeline that owns the peer table and delivers transmission outcomes.

use crate::phy::WifiMode;

/// Per-peer view of the negotiated link, provided by the transmit pipeline.
///
/// The engine only reads from it. The supported modes form an ordered list:
/// index 0 is the most robust (slowest) mode and each following entry is at
/// least as fast as the one before.
///
/// # Example
///
/// ```
/// use arf_rate_control::prelude::*;
///
/// struct Fixed;
///
/// impl RemoteStation for Fixed {
///     fn supported_count(&self) -> usize {
///         1
///     }
///
///     fn supported(&self, _index: usize) -> WifiMode {
///         WifiMode::ofdm_6mbps()
///     }
///
///     fn channel_width(&self) -> u16 {
///         20
///     }
/// }
///
/// assert_eq!(Fixed.non_erp_supported(0), WifiMode::ofdm_6mbps());
/// assert_eq!(Fixed.long_retry_count(), 7);
/// ```
pub trait RemoteStation {
    /// Number of modes in the peer's operational rate set.
    fn supported_count(&self) -> usize;

    /// Mode at `index` in the operational rate set.
    ///
    /// Callers only pass indices below [`supported_count`](Self::supported_count).
    fn supported(&self, index: usize) -> WifiMode;

    /// Number of non-ERP modes, used for protection frames.
    fn non_erp_supported_count(&self) -> usize {
        self.supported_count()
    }

    /// Mode at `index` in the non-ERP rate set.
    fn non_erp_supported(&self, index: usize) -> WifiMode {
        self.supported(index)
    }

    /// Current channel width in MHz.
    fn channel_width(&self) -> u16;

    /// Long retry limit configured for this peer.
    fn long_retry_count(&self) -> u32 {
        7
    }

    /// Whether the peer accepts short PLCP preambles.
    fn short_preamble_supported(&self) -> bool {
        false
    }

    /// Whether frame aggregation is enabled towards this peer.
    fn aggregation(&self) -> bool {
        false
    }
}

/// Receiver of rate-change telemetry.
///
/// Called with the previous and the new effective data rate in bit/s.
pub trait RateObserver: Send + Sync {
    /// The selected data rate changed from `old` to `new`.
    fn on_rate_change(&self, old: u64, new: u64);
}

impl<F> RateObserver for F
where
    F: Fn(u64, u64) + Send + Sync,
{
    fn on_rate_change(&self, old: u64, new: u64) {
        self(old, new)
    }
}
