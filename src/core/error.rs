//! Error types for ARF rate control.

use std::fmt;

use thiserror::Error;

/// Extended PHY capability sets with their own rate tables.
///
/// ARF only has a decision policy for the legacy rate set, so none of these
/// can be switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// High Throughput (802.11n).
    Ht,
    /// Very High Throughput (802.11ac).
    Vht,
    /// High Efficiency (802.11ax).
    He,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ht => "HT",
            Self::Vht => "VHT",
            Self::He => "HE",
        };
        f.write_str(name)
    }
}

/// Errors raised by the rate adaptation engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateControlError {
    /// An extended capability was enabled. The caller must not continue with
    /// an engine that assumes the legacy rate set.
    #[error("rate control does not support {0} rates")]
    UnsupportedCapability(Capability),

    /// Configuration rejected at construction.
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// The peer has no supported modes to select from.
    #[error("peer has an empty rate set")]
    EmptyRateSet,
}

/// Result alias for rate control operations.
pub type RateControlResult<T> = std::result::Result<T, RateControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RateControlError::UnsupportedCapability(Capability::Vht).to_string(),
            "rate control does not support VHT rates"
        );
        assert_eq!(
            RateControlError::InvalidConfig("bad".into()).to_string(),
            "configuration error: bad"
        );
        assert_eq!(
            RateControlError::EmptyRateSet.to_string(),
            "peer has an empty rate set"
        );
    }
}
