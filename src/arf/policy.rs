//! Fallback policy state machine.
//!
//! ARF runs one of two fallback policies at any time:
//!
//! ```text
//!                 rate increase
//!   SteadyState ─────────────────▶ Recovery
//!        ▲                            │
//!        └────────── data ok ─────────┘
//! ```
//!
//! Recovery begins with the rate increase and ends at the next successful data
//! transmission; it spans retransmission boundaries. Failures never change the
//! mode.

/// Which fallback policy applies to the next data failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackMode {
    /// Conservative: step down on every second failure of a streak.
    #[default]
    SteadyState,
    /// Aggressive: step down on the first failure after a rate increase.
    Recovery,
}

/// What a data failure does to the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureVerdict {
    /// Move one rate down (if not already at the lowest rate).
    pub step_down: bool,
    /// Reset the probe timer.
    pub reset_timer: bool,
}

impl FallbackMode {
    /// Decide on a data failure.
    ///
    /// `retry` is the number of failures since the last success, this one
    /// included, so it is at least 1.
    pub fn on_failure(self, retry: u32) -> FailureVerdict {
        debug_assert!(retry >= 1, "data failure reported with retry count {retry}");
        match self {
            Self::Recovery => FailureVerdict {
                step_down: retry == 1,
                reset_timer: true,
            },
            Self::SteadyState => FailureVerdict {
                step_down: retry.saturating_sub(1) % 2 == 1,
                reset_timer: retry >= 2,
            },
        }
    }

    /// Mode after a successful data transmission.
    pub fn on_success(self) -> Self {
        Self::SteadyState
    }

    /// Mode after stepping up to a faster rate.
    pub fn on_rate_increase(self) -> Self {
        Self::Recovery
    }

    /// Check for the aggressive policy.
    pub fn is_recovery(self) -> bool {
        self == Self::Recovery
    }
}
