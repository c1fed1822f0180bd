//! Risk scoring for the ISO 14971-style 5×5 matrix.
//!
//! A risk factor carries a severity and a probability, each an integer on a
//! 1–5 scale. The risk score is their product (1–25), bucketed into three
//! levels for display and filtering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Lowest legal severity/probability value.
pub const SCALE_MIN: u8 = 1;
/// Highest legal severity/probability value.
pub const SCALE_MAX: u8 = 5;

/// Computes the risk score for a severity/probability pair.
///
/// Both inputs must lie on the 1–5 scale; anything else is a validation
/// error rather than a silently clamped value.
///
/// # Examples
///
/// ```
/// use cardea_core::scoring::risk_score;
///
/// assert_eq!(risk_score(4, 3).unwrap(), 12);
/// assert!(risk_score(0, 3).is_err());
/// ```
pub fn risk_score(severity: u8, probability: u8) -> Result<u8> {
    validate_scale("severity_score", severity)?;
    validate_scale("probability_score", probability)?;
    Ok(severity * probability)
}

/// Checks that a single severity/probability value lies on the 1–5 scale.
pub fn validate_scale(field: &str, value: u8) -> Result<()> {
    if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
        return Err(Error::validation_field(
            field,
            format!("must be between {SCALE_MIN} and {SCALE_MAX}, got {value}"),
        ));
    }
    Ok(())
}

/// Qualitative bucket for a risk score.
///
/// The buckets partition the full score range [1, 25]:
/// scores up to 3 are low, up to 8 medium, everything above high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score 1–3.
    Low,
    /// Score 4–8.
    Medium,
    /// Score 9–25.
    High,
}

impl RiskLevel {
    /// Buckets a risk score.
    ///
    /// Total over all of `u8`; callers holding a server-computed score never
    /// need to handle an error case here.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => RiskLevel::Low,
            4..=8 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    /// All levels, in ascending order.
    pub fn all() -> [RiskLevel; 3] {
        [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]
    }

    /// Lowercase wire/CLI name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(Error::UnknownValue {
                kind: "risk level",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_score_is_product() {
        for severity in SCALE_MIN..=SCALE_MAX {
            for probability in SCALE_MIN..=SCALE_MAX {
                assert_eq!(
                    risk_score(severity, probability).unwrap(),
                    severity * probability,
                    "score({severity}, {probability})"
                );
            }
        }
    }

    #[test]
    fn test_risk_score_rejects_out_of_range() {
        assert!(risk_score(0, 3).is_err());
        assert!(risk_score(3, 0).is_err());
        assert!(risk_score(6, 1).is_err());
        assert!(risk_score(1, 6).is_err());
    }

    #[test]
    fn test_risk_score_error_names_field() {
        let err = risk_score(9, 2).unwrap_err();
        assert!(err.to_string().contains("must be between 1 and 5"));
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(RiskLevel::from_score(1), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(3), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(4), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(8), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(9), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(25), RiskLevel::High);
    }

    #[test]
    fn test_levels_exhaustive_and_contiguous() {
        // Every attainable score lands in exactly one bucket, and the
        // buckets never interleave as the score climbs.
        let mut previous = RiskLevel::Low;
        for score in 1..=25u8 {
            let level = RiskLevel::from_score(score);
            assert!(level >= previous, "level regressed at score {score}");
            previous = level;
        }
        assert_eq!(previous, RiskLevel::High);
    }

    #[test]
    fn test_level_parse_roundtrip() {
        for level in RiskLevel::all() {
            assert_eq!(level.as_str().parse::<RiskLevel>().unwrap(), level);
        }
        assert!("extreme".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_level_parse_is_case_insensitive() {
        assert_eq!("HIGH".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!("Medium".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
    }

    #[test]
    fn test_level_serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"medium\""
        );
        let parsed: RiskLevel = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, RiskLevel::High);
    }
}
