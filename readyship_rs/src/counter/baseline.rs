//! Epoch baseline: what the counter shows the instant it mounts.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shipments per 30-day month at the nominal rate.
pub const MONTHLY_RATE: u64 = 2_105_156;
pub const MS_PER_MONTH: u64 = 30 * 24 * 60 * 60 * 1000;
pub const EPOCH_RFC3339: &str = "2023-01-01T00:00:00Z";
pub const EPOCH_MS: i64 = 1_672_531_200_000;

/// Fixed reference instant plus a long-run rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    pub epoch_ms: i64,
    pub monthly_rate: u64,
}

impl Default for Baseline {
    fn default() -> Self {
        Self::new(EPOCH_MS, MONTHLY_RATE)
    }
}

impl Baseline {
    pub fn new(epoch_ms: i64, monthly_rate: u64) -> Self {
        Self {
            epoch_ms,
            monthly_rate,
        }
    }

    pub fn from_rfc3339(epoch: &str, monthly_rate: u64) -> Result<Self> {
        let parsed = DateTime::parse_from_rfc3339(epoch).map_err(|source| Error::InvalidEpoch {
            value: epoch.to_string(),
            source,
        })?;
        Ok(Self::new(parsed.timestamp_millis(), monthly_rate))
    }

    pub fn per_ms(&self) -> f64 {
        self.monthly_rate as f64 / MS_PER_MONTH as f64
    }

    /// `floor((now - epoch) * rate / ms_per_month)`, computed in integers so
    /// whole months land exactly on multiples of the rate. Instants before
    /// the epoch give 0.
    pub fn at(&self, now_unix_ms: i64) -> u64 {
        let elapsed = now_unix_ms.saturating_sub(self.epoch_ms);
        if elapsed <= 0 {
            return 0;
        }
        let value = elapsed as u128 * self.monthly_rate as u128 / MS_PER_MONTH as u128;
        u64::try_from(value).unwrap_or(u64::MAX)
    }
}

/// Baseline at `now_unix_ms` for the production epoch and rate.
pub fn epoch_baseline(now_unix_ms: i64) -> u64 {
    Baseline::default().at(now_unix_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    #[test]
    fn epoch_constant_matches_rfc3339() {
        let parsed = Baseline::from_rfc3339(EPOCH_RFC3339, MONTHLY_RATE).unwrap();
        assert_eq!(parsed, Baseline::default());
    }

    #[test]
    fn thirty_days_after_epoch_is_one_month_of_shipments() {
        assert_eq!(epoch_baseline(EPOCH_MS + 30 * DAY_MS), 2_105_156);
    }

    #[test]
    fn matches_float_formula_within_one() {
        let b = Baseline::default();
        for offset in [1_i64, 999, 86_399_999, 400 * DAY_MS + 12_345] {
            let float = (offset as f64 * b.per_ms()).floor() as i128;
            let int = b.at(EPOCH_MS + offset) as i128;
            assert!((float - int).abs() <= 1, "offset {offset}: {float} vs {int}");
        }
    }

    #[test]
    fn before_epoch_is_zero() {
        assert_eq!(epoch_baseline(0), 0);
        assert_eq!(epoch_baseline(EPOCH_MS), 0);
        assert_eq!(epoch_baseline(i64::MIN), 0);
    }

    #[test]
    fn rejects_bad_epoch() {
        let err = Baseline::from_rfc3339("last tuesday", MONTHLY_RATE).unwrap_err();
        assert!(matches!(err, Error::InvalidEpoch { ref value, .. } if value == "last tuesday"));
    }

    #[test]
    fn later_mounts_never_start_lower() {
        let b = Baseline::default();
        let mut prev = 0;
        for day in 0..2_000 {
            let v = b.at(EPOCH_MS + day * DAY_MS + 7);
            assert!(v >= prev);
            prev = v;
        }
    }
}
