//! Lossy channel model.
//!
//! Each peer sits at a fixed distance. Log-distance path loss gives a mean
//! SNR, every attempt adds uniform fading, and a logistic curve around the
//! mode's SNR threshold turns that into a delivery probability.

use arf_rate_control::WifiMode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Transmit power minus noise floor at 1 m, in dB.
const LINK_BUDGET_DB: f64 = 60.0;

/// Path loss exponent (indoor).
const PATH_LOSS_EXPONENT: f64 = 3.0;

/// Peak-to-peak fading around the mean SNR, in dB.
const FADING_DB: f64 = 6.0;

/// Steepness of the delivery probability around the threshold.
const SLOPE: f64 = 1.5;

/// Channel towards one peer.
#[derive(Debug)]
pub struct Channel {
    mean_snr_db: f64,
    rng: StdRng,
}

impl Channel {
    /// Channel to a peer `distance_m` meters away.
    pub fn new(distance_m: f64, seed: u64) -> Self {
        let mean_snr_db = LINK_BUDGET_DB - 10.0 * PATH_LOSS_EXPONENT * distance_m.max(1.0).log10();
        Self {
            mean_snr_db,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Mean SNR in dB.
    pub fn mean_snr_db(&self) -> f64 {
        self.mean_snr_db
    }

    /// Send one frame with `mode`. Returns the SNR seen and whether it got through.
    pub fn attempt(&mut self, mode: &WifiMode) -> (f64, bool) {
        let half = FADING_DB / 2.0;
        let snr = self.mean_snr_db + self.rng.gen_range(-half..half);
        let p = 1.0 / (1.0 + (SLOPE * (snr_threshold_db(mode) - snr)).exp());
        (snr, self.rng.gen_bool(p.clamp(0.0, 1.0)))
    }
}

/// SNR needed for roughly 50% frame delivery.
fn snr_threshold_db(mode: &WifiMode) -> f64 {
    match mode.nominal_rate() {
        r if r <= 1_000_000 => 0.0,
        r if r <= 2_000_000 => 3.0,
        r if r <= 5_500_000 => 6.0,
        r if r <= 6_000_000 => 5.0,
        r if r <= 9_000_000 => 6.0,
        r if r <= 11_000_000 => 9.0,
        r if r <= 12_000_000 => 8.0,
        r if r <= 18_000_000 => 11.0,
        r if r <= 24_000_000 => 14.0,
        r if r <= 36_000_000 => 18.0,
        r if r <= 48_000_000 => 22.0,
        _ => 24.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snr_falls_with_distance() {
        let near = Channel::new(5.0, 1);
        let far = Channel::new(50.0, 1);
        assert!(near.mean_snr_db() > far.mean_snr_db());
        assert!((far.mean_snr_db() - (near.mean_snr_db() - 30.0)).abs() < 1e-9);
    }

    #[test]
    fn test_close_peer_delivers_robust_rate() {
        let mut channel = Channel::new(1.0, 7);
        let delivered = (0..1000)
            .filter(|_| channel.attempt(&WifiMode::ofdm_6mbps()).1)
            .count();
        assert_eq!(delivered, 1000);
    }
}
