//! ARF Channel Simulation
//!
//! Drives one ARF station per peer over a lossy channel and reports where each
//! peer settled. Peers are placed at increasing distances and simulated on
//! separate blocking tasks; they share nothing.
//!
//! Logging is controlled with `RUST_LOG`, e.g.
//! `RUST_LOG=channel_sim=debug,arf_rate_control=debug`.

mod channel;

use std::collections::BTreeMap;

use arf_rate_control::prelude::*;
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::channel::Channel;

/// Legacy standard providing the rate set.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Standard {
    /// 802.11a (OFDM).
    A,
    /// 802.11b (DSSS).
    B,
    /// 802.11g (ERP-OFDM).
    G,
}

impl Standard {
    fn catalog(self) -> RateCatalog {
        match self {
            Self::A => RateCatalog::ofdm(),
            Self::B => RateCatalog::dsss(),
            Self::G => RateCatalog::erp_ofdm(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Simulate ARF rate adaptation over a lossy channel")]
struct Args {
    /// Number of peers.
    #[arg(long, default_value_t = 4)]
    peers: u32,

    /// Data frames offered to each peer.
    #[arg(long, default_value_t = 2000)]
    frames: u32,

    /// Distance of the first peer in meters; each next peer is twice as far.
    #[arg(long, default_value_t = 5.0)]
    distance: f64,

    /// Rate set.
    #[arg(long, value_enum, default_value_t = Standard::A)]
    standard: Standard,

    /// Consecutive successes before probing a faster rate.
    #[arg(long, default_value_t = DEFAULT_SUCCESS_THRESHOLD)]
    success_threshold: u32,

    /// Transmissions before probing a faster rate.
    #[arg(long, default_value_t = DEFAULT_TIMER_THRESHOLD)]
    timer_threshold: u32,

    /// RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Outcome of one peer's run.
#[derive(Debug)]
struct PeerReport {
    peer: MacAddress,
    mean_snr_db: f64,
    final_mode: WifiMode,
    delivered: u32,
    dropped: u32,
    attempts: u64,
    rate_changes: u32,
    /// Frames delivered per mode.
    per_mode: BTreeMap<usize, u32>,
}

fn run_peer(
    peer: MacAddress,
    config: ArfConfig,
    link: PeerLink,
    mut channel: Channel,
    frames: u32,
) -> RateControlResult<PeerReport> {
    let mut station = ArfStation::new(&config);
    let mut report = PeerReport {
        peer,
        mean_snr_db: channel.mean_snr_db(),
        final_mode: link.supported(0),
        delivered: 0,
        dropped: 0,
        attempts: 0,
        rate_changes: 0,
        per_mode: BTreeMap::new(),
    };

    for _ in 0..frames {
        let mut delivered = false;
        // First attempt plus retries.
        for _ in 0..=link.long_retry_count() {
            let (mode, index) = station.select_data_rate(&link)?;
            report.attempts += 1;
            let (snr, ok) = channel.attempt(&mode);
            let change = if ok {
                station.on_data_ok(link.supported_count())
            } else {
                station.on_data_failed()
            };
            if change.is_changed() {
                report.rate_changes += 1;
                debug!(%peer, snr, ?change, "rate change");
            }
            if ok {
                *report.per_mode.entry(index).or_default() += 1;
                delivered = true;
                break;
            }
        }
        if delivered {
            report.delivered += 1;
        } else {
            report.dropped += 1;
        }
    }

    report.final_mode = station.select_data_rate(&link)?.0;
    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = ArfConfig::with_thresholds(args.success_threshold, args.timer_threshold);
    config.validate()?;
    let link = PeerLink::new(args.standard.catalog());
    info!(
        peers = args.peers,
        frames = args.frames,
        standard = ?args.standard,
        "starting simulation"
    );

    let mut tasks = Vec::new();
    let mut distance = args.distance;
    for i in 0..args.peers {
        let peer = MacAddress::from_index(i + 1);
        let channel = Channel::new(distance, args.seed.wrapping_add(u64::from(i)));
        let (config, link, frames) = (config.clone(), link.clone(), args.frames);
        tasks.push(tokio::task::spawn_blocking(move || {
            run_peer(peer, config, link, channel, frames)
        }));
        distance *= 2.0;
    }

    for task in tasks {
        let report = task.await??;
        let offered = report.delivered + report.dropped;
        println!(
            "{}  snr {:5.1} dB  final {:<18} delivered {}/{} ({:.1}%)  attempts {}  changes {}",
            report.peer,
            report.mean_snr_db,
            report.final_mode.name(),
            report.delivered,
            offered,
            100.0 * f64::from(report.delivered) / f64::from(offered.max(1)),
            report.attempts,
            report.rate_changes,
        );
        for (index, count) in &report.per_mode {
            println!("    {:<18} {count}", link.supported(*index).name());
        }
    }
    Ok(())
}
