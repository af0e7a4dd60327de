//! ARF Rate Control - Legacy PHY description
//!
//! The engine treats PHY parameters as opaque and only picks a mode. This
//! module provides the types it picks from and hands back:
//!
//! - **Modes**: [`WifiMode`] with its [`ModulationClass`] and width-dependent data rate
//! - **Rate sets**: [`RateCatalog`], ordered slowest first, with 802.11a/b/g reference sets
//! - **Links**: [`PeerLink`], a plain [`RemoteStation`](crate::core::RemoteStation)
//! - **Transmission parameters**: [`TxVector`]

mod catalog;
mod mode;
mod tx_vector;

pub use catalog::*;
pub use mode::*;
pub use tx_vector::*;
