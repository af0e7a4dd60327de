//! Constants for the ARF rate adaptation engine.
//!
//! Threshold defaults follow the published ARF parameters. PHY values are the
//! fixed legacy (non-HT) transmission parameters the engine reports.

// =============================================================================
// ARF THRESHOLDS
// =============================================================================

/// Consecutive successful data transmissions before probing a faster rate.
pub const DEFAULT_SUCCESS_THRESHOLD: u32 = 10;

/// Transmissions since the last rate change before probing a faster rate.
pub const DEFAULT_TIMER_THRESHOLD: u32 = 15;

/// Default transmit power level index handed to the PHY.
pub const DEFAULT_TX_POWER_LEVEL: u8 = 0;

// =============================================================================
// CHANNEL WIDTHS (MHz)
// =============================================================================

/// Legacy OFDM channel width. Wider channels are clamped down to this.
pub const LEGACY_CHANNEL_WIDTH: u16 = 20;

/// DSSS / HR-DSSS channel width, passed through unclamped.
pub const DSSS_CHANNEL_WIDTH: u16 = 22;

// =============================================================================
// LEGACY TX VECTOR FIELDS
// =============================================================================

/// Guard interval in nanoseconds (long GI).
pub const LEGACY_GUARD_INTERVAL_NS: u16 = 800;

/// Number of transmit chains.
pub const LEGACY_N_TX: u8 = 1;

/// Number of spatial streams.
pub const LEGACY_NSS: u8 = 1;

/// Number of extension spatial streams.
pub const LEGACY_NESS: u8 = 0;
