//! # ARF Rate Control
//!
//! **A**utomatic **R**ate **F**allback for legacy 802.11 transmitters.
//!
//! ARF picks, for every peer independently, the transmission rate of the next
//! data frame from the peer's ordered rate set. It only looks at whether each
//! data frame was acknowledged:
//!
//! - **Probing**: enough consecutive successes, or enough transmissions since
//!   the last rate change, move one rate up
//! - **Recovery**: the first failure right after moving up moves straight back
//! - **Steady state**: otherwise every second failure of a streak moves one rate down
//!
//! HT, VHT and HE rate tables are not supported.
//!
//! ## Modules
//!
//! - [`core`]: Collaborator traits, peer identity, constants, and error types
//! - [`phy`]: Legacy modes, rate sets, and transmission parameters
//! - [`arf`]: The per-peer state machine and the station manager
//!
//! ## Feature Flags
//!
//! - `serde`: `Deserialize`/`Serialize` for [`ArfConfig`]
//!
//! ## Example Usage
//!
//! ```rust
//! use arf_rate_control::prelude::*;
//!
//! let mut manager = ArfManager::new(ArfConfig::with_thresholds(3, 15))?;
//! let peer = MacAddress::new([0x02, 0, 0, 0, 0, 0x01]);
//! let link = PeerLink::new(RateCatalog::ofdm());
//!
//! // Three acknowledged frames in a row: probe the next rate.
//! for _ in 0..3 {
//!     let tx = manager.data_tx_vector(peer, &link)?;
//!     manager.report(peer, &link, TxEvent::data_ok(20.0, tx.mode, 20.0));
//! }
//! assert_eq!(manager.data_tx_vector(peer, &link)?.mode, WifiMode::ofdm_9mbps());
//!
//! // The probe fails: fall back at once.
//! manager.report(peer, &link, TxEvent::DataFailed);
//! assert_eq!(manager.data_tx_vector(peer, &link)?.mode, WifiMode::ofdm_6mbps());
//!
//! // Extended rate tables are refused.
//! assert!(manager.set_ht_supported(true).is_err());
//! # Ok::<(), RateControlError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod arf;
pub mod core;
pub mod phy;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::arf::*;
    pub use crate::core::*;
    pub use crate::phy::*;
}

// Re-export commonly used items at crate root
pub use arf::{ArfConfig, ArfManager, ArfStation, FallbackMode, RateChange, TxEvent};
pub use crate::core::{Capability, MacAddress, RateControlError, RateObserver, RemoteStation};
pub use phy::{PeerLink, RateCatalog, TxVector, WifiMode};
