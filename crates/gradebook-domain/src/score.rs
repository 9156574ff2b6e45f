//! Score validation and percentage arithmetic used by the ledger and reports.

use serde::{Deserialize, Serialize};

/// Max score applied when a grade is recorded without one.
pub const DEFAULT_MAX_SCORE: f64 = 100.0;

/// Rejected score/max-score pair.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("score must be a finite number")]
    NotFinite,
    #[error("score must be between 0 and {max_score}")]
    OutOfRange { max_score: f64 },
}

/// Accepts `0 <= score <= max_score`.
pub fn validate_score(score: f64, max_score: f64) -> Result<(), ScoreError> {
    if !score.is_finite() || !max_score.is_finite() {
        return Err(ScoreError::NotFinite);
    }
    if score < 0.0 || score > max_score {
        return Err(ScoreError::OutOfRange { max_score });
    }
    Ok(())
}

/// `score / max_score * 100`, or 0 when `max_score` is 0.
pub fn percentage(score: f64, max_score: f64) -> f64 {
    if max_score > 0.0 {
        score / max_score * 100.0
    } else {
        0.0
    }
}

/// Half-up rounding to one decimal place: `floor(10x + 0.5) / 10`.
pub fn round_one_decimal(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

/// Render a value with exactly one decimal, e.g. `85.0`.
pub fn format_one_decimal(x: f64) -> String {
    format!("{:.1}", round_one_decimal(x))
}

/// Count/total/average/highest/lowest over a set of percentages.
///
/// An empty set yields all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentageSummary {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
}

impl PercentageSummary {
    pub fn from_percentages<I>(percentages: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut total = 0.0;
        let mut highest = f64::NEG_INFINITY;
        let mut lowest = f64::INFINITY;

        for p in percentages {
            count += 1;
            total += p;
            highest = highest.max(p);
            lowest = lowest.min(p);
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            count,
            total,
            average: total / count as f64,
            highest,
            lowest,
        }
    }

    /// Same summary with every percentage field rounded to one decimal.
    pub fn rounded(self) -> Self {
        Self {
            count: self.count,
            total: round_one_decimal(self.total),
            average: round_one_decimal(self.average),
            highest: round_one_decimal(self.highest),
            lowest: round_one_decimal(self.lowest),
        }
    }
}
