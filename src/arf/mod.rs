//! ARF Rate Control - Rate adaptation engine
//!
//! Automatic Rate Fallback keeps, for every peer, a position in the peer's
//! ordered rate set and moves it one step at a time:
//!
//! - **Up** after `success_threshold` consecutive acknowledged data frames, or
//!   after `timer_threshold` transmissions without a rate change
//! - **Down** immediately on the first failure after a step up ([`FallbackMode::Recovery`]),
//!   otherwise on every second failure of a streak ([`FallbackMode::SteadyState`])
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          Transmit pipeline              │
//! ├──────────── TxEvent ──▼─▲── TxVector ───┤
//! │            ArfManager                   │  ← This module
//! │   MacAddress → ArfStation               │
//! ├─────────────────────────────────────────┤
//! │     RemoteStation (rate set, width)     │
//! └─────────────────────────────────────────┘
//! ```

mod config;
mod manager;
mod policy;
mod station;
mod trace;

pub use config::ArfConfig;
pub use manager::{ArfManager, TxEvent};
pub use policy::{FailureVerdict, FallbackMode};
pub use station::{ArfStation, RateChange};
pub use trace::RateTrace;
