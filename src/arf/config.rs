//! Engine configuration.

use crate::core::{
    DEFAULT_SUCCESS_THRESHOLD, DEFAULT_TIMER_THRESHOLD, DEFAULT_TX_POWER_LEVEL, RateControlError,
    RateControlResult,
};

/// ARF tunables.
///
/// Thresholds are copied into each peer state when it is created, so changing
/// them later only affects peers that are added afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArfConfig {
    /// Consecutive successes needed to try the next faster rate.
    pub success_threshold: u32,
    /// Transmissions since the last rate change needed to try the next faster rate.
    pub timer_threshold: u32,
    /// Transmit power level put in every TX vector.
    pub default_tx_power_level: u8,
}

impl Default for ArfConfig {
    fn default() -> Self {
        Self {
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
            timer_threshold: DEFAULT_TIMER_THRESHOLD,
            default_tx_power_level: DEFAULT_TX_POWER_LEVEL,
        }
    }
}

impl ArfConfig {
    /// Create config with specific thresholds.
    pub fn with_thresholds(success_threshold: u32, timer_threshold: u32) -> Self {
        Self {
            success_threshold,
            timer_threshold,
            ..Self::default()
        }
    }

    /// Set the transmit power level.
    pub fn with_tx_power_level(mut self, level: u8) -> Self {
        self.default_tx_power_level = level;
        self
    }

    /// Check the thresholds.
    ///
    /// Both counters are compared for equality right after being incremented,
    /// so a zero threshold could never fire.
    pub fn validate(&self) -> RateControlResult<()> {
        if self.success_threshold == 0 {
            return Err(RateControlError::InvalidConfig(
                "success_threshold must be at least 1".into(),
            ));
        }
        if self.timer_threshold == 0 {
            return Err(RateControlError::InvalidConfig(
                "timer_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ArfConfig::default();
        assert_eq!(config.success_threshold, 10);
        assert_eq!(config.timer_threshold, 15);
        assert_eq!(config.default_tx_power_level, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_with_thresholds() {
        let config = ArfConfig::with_thresholds(3, 5).with_tx_power_level(2);
        assert_eq!(config.success_threshold, 3);
        assert_eq!(config.timer_threshold, 5);
        assert_eq!(config.default_tx_power_level, 2);
    }

    #[test]
    fn test_config_rejects_zero_thresholds() {
        assert!(matches!(
            ArfConfig::with_thresholds(0, 15).validate(),
            Err(RateControlError::InvalidConfig(_))
        ));
        assert!(matches!(
            ArfConfig::with_thresholds(10, 0).validate(),
            Err(RateControlError::InvalidConfig(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_deserialize_partial() {
        let config: ArfConfig = serde_json::from_str(r#"{ "success_threshold": 4 }"#).unwrap();
        assert_eq!(config.success_threshold, 4);
        assert_eq!(config.timer_threshold, 15);
    }
}
