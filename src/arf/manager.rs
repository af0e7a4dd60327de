//! ARF station manager.
//!
//! Owns the per-peer state table and is the entry point for the transmit
//! pipeline: transmission outcomes go in through [`ArfManager::report`] (or the
//! individual `report_*` methods) and transmission parameters come out of
//! [`ArfManager::data_tx_vector`] and [`ArfManager::rts_tx_vector`].
//!
//! Events for one peer must be reported in the order the attempts completed;
//! the first-failure and second-failure rules depend on it.

use std::collections::HashMap;

use tracing::{debug, error, info, trace};

use crate::core::{
    Capability, MacAddress, RateControlError, RateControlResult, RateObserver, RemoteStation,
};
use crate::phy::{Preamble, TxVector, WifiMode, legacy_channel_width};

use super::config::ArfConfig;
use super::station::{ArfStation, RateChange};
use super::trace::RateTrace;

/// Outcome of one transmission attempt, as reported by the transmit pipeline.
///
/// Only [`DataOk`](Self::DataOk) and [`DataFailed`](Self::DataFailed) drive
/// the algorithm. The others are accepted and logged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TxEvent {
    /// An RTS got no CTS.
    RtsFailed,
    /// A data frame got no ACK.
    DataFailed,
    /// An RTS was answered by a CTS.
    RtsOk {
        /// SNR of the CTS.
        cts_snr: f64,
        /// Mode the CTS was received with.
        cts_mode: WifiMode,
        /// SNR of the RTS as reported by the peer.
        rts_snr: f64,
    },
    /// A data frame was acknowledged.
    DataOk {
        /// SNR of the ACK.
        ack_snr: f64,
        /// Mode the ACK was received with.
        ack_mode: WifiMode,
        /// SNR of the data frame as reported by the peer.
        data_snr: f64,
    },
    /// A frame from the peer was received.
    RxOk {
        /// SNR of the received frame.
        rx_snr: f64,
        /// Mode the frame was sent with.
        tx_mode: WifiMode,
    },
    /// An RTS exhausted its retry limit.
    FinalRtsFailed,
    /// A data frame exhausted its retry limit.
    FinalDataFailed,
}

impl TxEvent {
    /// Acknowledged data frame.
    pub fn data_ok(ack_snr: f64, ack_mode: WifiMode, data_snr: f64) -> Self {
        Self::DataOk {
            ack_snr,
            ack_mode,
            data_snr,
        }
    }

    /// Answered RTS.
    pub fn rts_ok(cts_snr: f64, cts_mode: WifiMode, rts_snr: f64) -> Self {
        Self::RtsOk {
            cts_snr,
            cts_mode,
            rts_snr,
        }
    }

    /// Received frame.
    pub fn rx_ok(rx_snr: f64, tx_mode: WifiMode) -> Self {
        Self::RxOk { rx_snr, tx_mode }
    }
}

/// Rate adaptation engine for all peers of one transmitter.
#[derive(Debug)]
pub struct ArfManager {
    config: ArfConfig,
    stations: HashMap<MacAddress, ArfStation>,
    use_non_erp_protection: bool,
    rate: RateTrace,
}

impl ArfManager {
    /// Create a manager, validating the configuration.
    pub fn new(config: ArfConfig) -> RateControlResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stations: HashMap::new(),
            use_non_erp_protection: false,
            rate: RateTrace::new(),
        })
    }

    /// Configuration new stations are created with.
    pub fn config(&self) -> &ArfConfig {
        &self.config
    }

    /// ARF reacts to every single frame outcome.
    pub fn is_low_latency(&self) -> bool {
        true
    }

    // =========================================================================
    // STATION TABLE
    // =========================================================================

    /// Start tracking `peer`. An existing state is kept as is.
    pub fn add_station(&mut self, peer: MacAddress) -> &mut ArfStation {
        self.lookup(peer)
    }

    /// Stop tracking `peer`, returning its last state.
    pub fn remove_station(&mut self, peer: MacAddress) -> Option<ArfStation> {
        let removed = self.stations.remove(&peer);
        if removed.is_some() {
            info!(%peer, "removed station");
        }
        removed
    }

    /// State of `peer`, if tracked.
    pub fn station(&self, peer: MacAddress) -> Option<&ArfStation> {
        self.stations.get(&peer)
    }

    /// Number of tracked peers.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    fn lookup(&mut self, peer: MacAddress) -> &mut ArfStation {
        let config = &self.config;
        self.stations.entry(peer).or_insert_with(|| {
            info!(%peer, "created station");
            ArfStation::new(config)
        })
    }

    // =========================================================================
    // TRANSMISSION OUTCOMES
    // =========================================================================

    /// Apply one transmission outcome for `peer`.
    pub fn report<S>(&mut self, peer: MacAddress, link: &S, event: TxEvent) -> RateChange
    where
        S: RemoteStation + ?Sized,
    {
        match event {
            TxEvent::RtsFailed => {
                self.report_rts_failed(peer);
                RateChange::Unchanged
            }
            TxEvent::DataFailed => self.report_data_failed(peer),
            TxEvent::RtsOk {
                cts_snr,
                cts_mode,
                rts_snr,
            } => {
                self.report_rts_ok(peer, cts_snr, cts_mode, rts_snr);
                RateChange::Unchanged
            }
            TxEvent::DataOk {
                ack_snr,
                ack_mode,
                data_snr,
            } => self.report_data_ok(peer, link, ack_snr, ack_mode, data_snr),
            TxEvent::RxOk { rx_snr, tx_mode } => {
                self.report_rx_ok(peer, rx_snr, tx_mode);
                RateChange::Unchanged
            }
            TxEvent::FinalRtsFailed => {
                self.report_final_rts_failed(peer);
                RateChange::Unchanged
            }
            TxEvent::FinalDataFailed => {
                self.report_final_data_failed(peer);
                RateChange::Unchanged
            }
        }
    }

    /// A data transmission attempt to `peer` failed.
    pub fn report_data_failed(&mut self, peer: MacAddress) -> RateChange {
        trace!(%peer, "data failed");
        let station = self.lookup(peer);
        let change = station.on_data_failed();
        if let RateChange::Decreased { from, to } = change {
            debug!(
                %peer,
                from,
                to,
                recovery = station.in_recovery(),
                retry = station.retry_count(),
                "dec rate"
            );
        }
        change
    }

    /// A data transmission to `peer` was acknowledged.
    pub fn report_data_ok<S>(
        &mut self,
        peer: MacAddress,
        link: &S,
        ack_snr: f64,
        ack_mode: WifiMode,
        data_snr: f64,
    ) -> RateChange
    where
        S: RemoteStation + ?Sized,
    {
        trace!(%peer, ack_snr, %ack_mode, data_snr, "data ok");
        let catalog_size = link.supported_count();
        let station = self.lookup(peer);
        let success = station.consecutive_successes().saturating_add(1);
        let timer = station.probe_timer().saturating_add(1);
        debug!(%peer, success, timer, "data ok");
        let change = station.on_data_ok(catalog_size);
        if let RateChange::Increased { from, to } = change {
            debug!(%peer, from, to, "inc rate");
        }
        change
    }

    /// An RTS to `peer` got no CTS. Informational.
    pub fn report_rts_failed(&mut self, peer: MacAddress) {
        trace!(%peer, "rts failed");
        self.lookup(peer);
    }

    /// An RTS to `peer` was answered. Informational.
    pub fn report_rts_ok(
        &mut self,
        peer: MacAddress,
        cts_snr: f64,
        cts_mode: WifiMode,
        rts_snr: f64,
    ) {
        trace!(%peer, cts_snr, %cts_mode, rts_snr, "rts ok");
        self.lookup(peer);
    }

    /// A frame from `peer` was received. Informational.
    pub fn report_rx_ok(&mut self, peer: MacAddress, rx_snr: f64, tx_mode: WifiMode) {
        trace!(%peer, rx_snr, %tx_mode, "rx ok");
        self.lookup(peer);
    }

    /// An RTS to `peer` exhausted its retries. Informational.
    pub fn report_final_rts_failed(&mut self, peer: MacAddress) {
        trace!(%peer, "final rts failed");
        self.lookup(peer);
    }

    /// A data frame to `peer` exhausted its retries. Informational.
    pub fn report_final_data_failed(&mut self, peer: MacAddress) {
        trace!(%peer, "final data failed");
        self.lookup(peer);
    }

    // =========================================================================
    // RATE QUERIES
    // =========================================================================

    /// Transmission parameters for the next data frame to `peer`.
    ///
    /// Updates the effective rate telemetry when the selected rate differs
    /// from the previous selection.
    pub fn data_tx_vector<S>(
        &mut self,
        peer: MacAddress,
        link: &S,
    ) -> RateControlResult<TxVector>
    where
        S: RemoteStation + ?Sized,
    {
        trace!(%peer, "data tx vector");
        let channel_width = legacy_channel_width(link.channel_width());
        let (mode, _) = self.lookup(peer).select_data_rate(link)?;

        let rate = mode.data_rate(channel_width);
        if self.rate.set(rate) {
            debug!(%peer, rate, %mode, "new data rate");
        }
        Ok(self.tx_vector(mode, link, channel_width))
    }

    /// Transmission parameters for the next RTS to `peer`.
    ///
    /// RTS frames always go out at the most robust rate of the set matching
    /// the current protection mode; ARF does not adapt them.
    pub fn rts_tx_vector<S>(
        &mut self,
        peer: MacAddress,
        link: &S,
    ) -> RateControlResult<TxVector>
    where
        S: RemoteStation + ?Sized,
    {
        trace!(%peer, "rts tx vector");
        self.lookup(peer);
        let channel_width = legacy_channel_width(link.channel_width());
        let mode = if self.use_non_erp_protection {
            if link.non_erp_supported_count() == 0 {
                return Err(RateControlError::EmptyRateSet);
            }
            link.non_erp_supported(0)
        } else {
            if link.supported_count() == 0 {
                return Err(RateControlError::EmptyRateSet);
            }
            link.supported(0)
        };
        Ok(self.tx_vector(mode, link, channel_width))
    }

    fn tx_vector<S>(&self, mode: WifiMode, link: &S, channel_width: u16) -> TxVector
    where
        S: RemoteStation + ?Sized,
    {
        let preamble = if mode.class().is_dsss_family() && link.short_preamble_supported() {
            Preamble::Short
        } else {
            Preamble::Long
        };
        TxVector::legacy(
            mode,
            self.config.default_tx_power_level,
            link.long_retry_count(),
            preamble,
            channel_width,
            link.aggregation(),
        )
    }

    // =========================================================================
    // PROTECTION, CAPABILITIES AND TELEMETRY
    // =========================================================================

    /// Select the non-ERP rate set for protection (RTS) frames.
    pub fn set_use_non_erp_protection(&mut self, enable: bool) {
        self.use_non_erp_protection = enable;
    }

    /// Check if protection frames use the non-ERP rate set.
    pub fn use_non_erp_protection(&self) -> bool {
        self.use_non_erp_protection
    }

    /// Switch an extended capability on or off.
    ///
    /// ARF has no policy for HT, VHT or HE rate tables: enabling any of them
    /// fails with [`RateControlError::UnsupportedCapability`]. Disabling is a no-op.
    pub fn set_capability(
        &mut self,
        capability: Capability,
        enable: bool,
    ) -> RateControlResult<()> {
        if enable {
            error!(%capability, "rate control does not support extended rates");
            return Err(RateControlError::UnsupportedCapability(capability));
        }
        Ok(())
    }

    /// Switch HT (802.11n) rates on or off.
    pub fn set_ht_supported(&mut self, enable: bool) -> RateControlResult<()> {
        self.set_capability(Capability::Ht, enable)
    }

    /// Switch VHT (802.11ac) rates on or off.
    pub fn set_vht_supported(&mut self, enable: bool) -> RateControlResult<()> {
        self.set_capability(Capability::Vht, enable)
    }

    /// Switch HE (802.11ax) rates on or off.
    pub fn set_he_supported(&mut self, enable: bool) -> RateControlResult<()> {
        self.set_capability(Capability::He, enable)
    }

    /// Last selected data rate in bit/s (0 before the first data query).
    pub fn current_rate(&self) -> u64 {
        self.rate.get()
    }

    /// Register a rate-change observer.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: RateObserver + 'static,
    {
        self.rate.subscribe(observer);
    }
}
