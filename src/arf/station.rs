//! Per-peer ARF state.
//!
//! Every data transmission attempt towards a peer, first send or retry, is an
//! independent trial: a random backoff separates any two attempts. The station
//! only looks at success and failure of those trials.

use crate::core::{RateControlError, RateControlResult, RemoteStation};
use crate::phy::WifiMode;

use super::config::ArfConfig;
use super::policy::FallbackMode;

/// Effect of an event on the selected rate index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateChange {
    /// Rate index unchanged.
    Unchanged,
    /// Stepped up one rate.
    Increased {
        /// Previous index.
        from: usize,
        /// New index.
        to: usize,
    },
    /// Stepped down one rate.
    Decreased {
        /// Previous index.
        from: usize,
        /// New index.
        to: usize,
    },
}

impl RateChange {
    /// Check if the rate index moved.
    pub fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// ARF state for one peer.
///
/// Created with the lowest rate selected and all counters at zero. The rate
/// index moves by at most one step per event and stays inside the peer's rate
/// set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArfStation {
    /// Index into the peer's operational rate set.
    rate_index: usize,
    /// Consecutive data successes since the last failure or rate increase.
    success: u32,
    /// Consecutive data failures since the last success.
    failed: u32,
    /// Failures since the last success.
    retry: u32,
    /// Transmissions since the last rate change.
    timer: u32,
    /// Active fallback policy.
    mode: FallbackMode,
    success_threshold: u32,
    timer_threshold: u32,
}

impl ArfStation {
    /// Create a fresh station using the thresholds from `config`.
    pub fn new(config: &ArfConfig) -> Self {
        Self {
            rate_index: 0,
            success: 0,
            failed: 0,
            retry: 0,
            timer: 0,
            mode: FallbackMode::SteadyState,
            success_threshold: config.success_threshold,
            timer_threshold: config.timer_threshold,
        }
    }

    /// Currently selected index into the rate set.
    pub fn rate_index(&self) -> usize {
        self.rate_index
    }

    /// Active fallback policy.
    pub fn fallback_mode(&self) -> FallbackMode {
        self.mode
    }

    /// Check if the station is between a rate increase and the next success.
    pub fn in_recovery(&self) -> bool {
        self.mode.is_recovery()
    }

    /// Consecutive data successes.
    pub fn consecutive_successes(&self) -> u32 {
        self.success
    }

    /// Consecutive data failures.
    pub fn consecutive_failures(&self) -> u32 {
        self.failed
    }

    /// Failures since the last success.
    pub fn retry_count(&self) -> u32 {
        self.retry
    }

    /// Transmissions since the last rate change.
    pub fn probe_timer(&self) -> u32 {
        self.timer
    }

    /// Success threshold copied in at creation.
    pub fn success_threshold(&self) -> u32 {
        self.success_threshold
    }

    /// Timer threshold copied in at creation.
    pub fn timer_threshold(&self) -> u32 {
        self.timer_threshold
    }

    /// Apply a failed data transmission attempt.
    pub fn on_data_failed(&mut self) -> RateChange {
        self.timer = self.timer.saturating_add(1);
        self.failed = self.failed.saturating_add(1);
        self.retry = self.retry.saturating_add(1);
        self.success = 0;

        let verdict = self.mode.on_failure(self.retry);
        let change = if verdict.step_down {
            self.step_down()
        } else {
            RateChange::Unchanged
        };
        if verdict.reset_timer {
            self.timer = 0;
        }
        change
    }

    /// Apply a successful data transmission.
    ///
    /// `catalog_size` is the current size of the peer's rate set and bounds the
    /// step up.
    pub fn on_data_ok(&mut self, catalog_size: usize) -> RateChange {
        // Both counters keep running while parked on the fastest rate.
        self.timer = self.timer.saturating_add(1);
        self.success = self.success.saturating_add(1);
        self.failed = 0;
        self.retry = 0;
        self.mode = self.mode.on_success();

        let probe_due =
            self.success == self.success_threshold || self.timer == self.timer_threshold;
        if probe_due && self.rate_index + 1 < catalog_size {
            let from = self.rate_index;
            self.rate_index += 1;
            self.timer = 0;
            self.success = 0;
            self.mode = self.mode.on_rate_increase();
            return RateChange::Increased {
                from,
                to: self.rate_index,
            };
        }
        RateChange::Unchanged
    }

    /// Mode to use for the next data transmission, with its index.
    ///
    /// If the peer's rate set shrank below the selected index, the index is
    /// first clamped to the fastest remaining rate.
    pub fn select_data_rate<S>(&mut self, link: &S) -> RateControlResult<(WifiMode, usize)>
    where
        S: RemoteStation + ?Sized,
    {
        let count = link.supported_count();
        if count == 0 {
            return Err(RateControlError::EmptyRateSet);
        }
        self.clamp_to(count);
        Ok((link.supported(self.rate_index), self.rate_index))
    }

    /// Keep the rate index inside a rate set of `catalog_size` modes.
    pub fn clamp_to(&mut self, catalog_size: usize) {
        if let Some(top) = catalog_size.checked_sub(1)
            && self.rate_index > top
        {
            self.rate_index = top;
        }
    }

    fn step_down(&mut self) -> RateChange {
        if self.rate_index == 0 {
            return RateChange::Unchanged;
        }
        let from = self.rate_index;
        self.rate_index -= 1;
        RateChange::Decreased {
            from,
            to: self.rate_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phy::{PeerLink, RateCatalog};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const CATALOG: usize = 8;

    fn station(success_threshold: u32, timer_threshold: u32) -> ArfStation {
        ArfStation::new(&ArfConfig::with_thresholds(success_threshold, timer_threshold))
    }

    /// Drive a station up to `index` through successes, then leave recovery
    /// with one more success capped at the current rate.
    fn station_at(index: usize) -> ArfStation {
        let mut st = station(1, 1000);
        for _ in 0..index {
            st.on_data_ok(CATALOG);
        }
        assert_eq!(st.on_data_ok(index + 1), RateChange::Unchanged);
        assert_eq!(st.rate_index(), index);
        assert!(!st.in_recovery());
        st
    }

    #[test]
    fn test_new_station() {
        let st = ArfStation::new(&ArfConfig::default());
        assert_eq!(st.rate_index(), 0);
        assert_eq!(st.consecutive_successes(), 0);
        assert_eq!(st.consecutive_failures(), 0);
        assert_eq!(st.retry_count(), 0);
        assert_eq!(st.probe_timer(), 0);
        assert!(!st.in_recovery());
        assert_eq!(st.success_threshold(), 10);
        assert_eq!(st.timer_threshold(), 15);
    }

    #[test]
    fn test_increase_on_success_threshold() {
        let mut st = station(3, 100);
        assert_eq!(st.on_data_ok(CATALOG), RateChange::Unchanged);
        assert_eq!(st.on_data_ok(CATALOG), RateChange::Unchanged);
        assert_eq!(
            st.on_data_ok(CATALOG),
            RateChange::Increased { from: 0, to: 1 }
        );
        assert!(st.in_recovery());
        assert_eq!(st.consecutive_successes(), 0);
        assert_eq!(st.probe_timer(), 0);
    }

    #[test]
    fn test_increase_on_timer_threshold() {
        let mut st = station(10, 5);
        // ok, fail, ok, ok, ok: timer reaches 5 without a full success streak.
        st.on_data_ok(CATALOG);
        st.on_data_failed();
        assert_eq!(st.probe_timer(), 2);
        st.on_data_ok(CATALOG);
        st.on_data_ok(CATALOG);
        assert_eq!(st.rate_index(), 0);
        let change = st.on_data_ok(CATALOG);
        assert_eq!(change, RateChange::Increased { from: 0, to: 1 });
        assert_eq!(st.rate_index(), 1);
        assert!(st.in_recovery());
    }

    #[test]
    fn test_no_increase_at_ceiling() {
        let mut st = station(1, 1);
        for _ in 0..20 {
            st.on_data_ok(4);
        }
        assert_eq!(st.rate_index(), 3);
        assert_eq!(st.on_data_ok(4), RateChange::Unchanged);
        assert_eq!(st.rate_index(), 3);
        assert!(!st.in_recovery());
    }

    #[test]
    fn test_single_mode_catalog_never_moves() {
        let mut st = station(1, 1);
        for _ in 0..5 {
            assert_eq!(st.on_data_ok(1), RateChange::Unchanged);
            assert_eq!(st.on_data_failed(), RateChange::Unchanged);
        }
        assert_eq!(st.rate_index(), 0);
    }

    #[test]
    fn test_aggressive_fallback_in_recovery() {
        let mut st = station(1, 1000);
        st.on_data_ok(CATALOG);
        st.on_data_ok(CATALOG);
        assert_eq!(st.rate_index(), 2);
        assert!(st.in_recovery());

        assert_eq!(
            st.on_data_failed(),
            RateChange::Decreased { from: 2, to: 1 }
        );
        assert_eq!(st.probe_timer(), 0);
        // Still recovering until the next success; further failures hold.
        assert!(st.in_recovery());
        assert_eq!(st.on_data_failed(), RateChange::Unchanged);
        assert_eq!(st.on_data_failed(), RateChange::Unchanged);
        assert_eq!(st.rate_index(), 1);
    }

    #[test]
    fn test_conservative_fallback_parity() {
        let mut st = station_at(3);

        assert_eq!(st.on_data_failed(), RateChange::Unchanged);
        assert_eq!(st.rate_index(), 3);
        assert_eq!(
            st.on_data_failed(),
            RateChange::Decreased { from: 3, to: 2 }
        );
        assert_eq!(st.on_data_failed(), RateChange::Unchanged);
        assert_eq!(
            st.on_data_failed(),
            RateChange::Decreased { from: 2, to: 1 }
        );
        assert_eq!(st.consecutive_failures(), 4);
        assert_eq!(st.retry_count(), 4);
    }

    #[test]
    fn test_conservative_timer_reset() {
        let mut st = station(10, 15);
        st.on_data_ok(CATALOG);
        st.on_data_ok(CATALOG);
        st.on_data_failed();
        assert_eq!(st.probe_timer(), 3);
        st.on_data_failed();
        assert_eq!(st.probe_timer(), 0);
    }

    #[test]
    fn test_no_decrease_at_floor() {
        let mut st = station(10, 15);
        for _ in 0..6 {
            assert_eq!(st.on_data_failed(), RateChange::Unchanged);
            assert_eq!(st.rate_index(), 0);
        }
    }

    #[test]
    fn test_success_clears_failure_counters() {
        let mut st = station(10, 15);
        st.on_data_failed();
        st.on_data_failed();
        st.on_data_ok(CATALOG);
        assert_eq!(st.consecutive_failures(), 0);
        assert_eq!(st.retry_count(), 0);
        assert_eq!(st.consecutive_successes(), 1);
    }

    #[test]
    fn test_select_data_rate() {
        let link = PeerLink::new(RateCatalog::ofdm());
        let mut st = station(1, 1000);
        st.on_data_ok(link.rates.len());
        let (mode, index) = st.select_data_rate(&link).unwrap();
        assert_eq!(index, 1);
        assert_eq!(mode, crate::phy::WifiMode::ofdm_9mbps());
    }

    #[test]
    fn test_select_clamps_after_rate_set_shrinks() {
        let mut st = station_at(6);
        let link = PeerLink::new(RateCatalog::dsss());
        let (mode, index) = st.select_data_rate(&link).unwrap();
        assert_eq!(index, 3);
        assert_eq!(st.rate_index(), 3);
        assert_eq!(mode, crate::phy::WifiMode::dsss_11mbps());
    }

    #[test]
    fn test_select_empty_rate_set() {
        let mut st = station(10, 15);
        let link = PeerLink::new(RateCatalog::default());
        assert_eq!(
            st.select_data_rate(&link),
            Err(RateControlError::EmptyRateSet)
        );
    }

    #[test]
    fn test_random_sequences_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for size in 1..=8 {
            let mut st = station(3, 5);
            let mut last_increase = false;
            for _ in 0..2_000 {
                let before = st.rate_index();
                if rng.gen_bool(0.7) {
                    let change = st.on_data_ok(size);
                    last_increase = matches!(change, RateChange::Increased { .. });
                    // Recovery is set by the increase and only by it.
                    assert_eq!(st.in_recovery(), last_increase);
                } else {
                    let change = st.on_data_failed();
                    // Failures keep whatever mode the last success left.
                    assert_eq!(st.in_recovery(), last_increase);
                    assert!(!matches!(change, RateChange::Increased { .. }));
                }
                let after = st.rate_index();
                assert!(after < size);
                assert!(after.abs_diff(before) <= 1);
            }
        }
    }
}
