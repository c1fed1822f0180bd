//! Client-side filtering of the risk register.
//!
//! The register view composes three independent predicates — risk-level
//! bucket, hazard category, free-text search — conjunctively: a factor is
//! shown only if it passes every predicate that is active. An inactive
//! predicate matches everything.

use crate::model::{HazardCategory, RiskFactor};
use crate::scoring::RiskLevel;

/// Conjunctive filter over risk factors.
///
/// # Examples
///
/// ```
/// use cardea_core::filter::RiskFilter;
/// use cardea_core::scoring::RiskLevel;
///
/// let filter = RiskFilter::new()
///     .with_level(RiskLevel::High)
///     .with_search("shock");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RiskFilter {
    level: Option<RiskLevel>,
    category: Option<HazardCategory>,
    search: Option<String>,
}

impl RiskFilter {
    /// An empty filter; matches every factor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to factors whose risk score falls in `level`'s bucket.
    pub fn with_level(mut self, level: RiskLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Restrict to factors in the given hazard category.
    pub fn with_category(mut self, category: HazardCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict to factors whose hazard name, hazardous situation, or harm
    /// contains `needle` (case-insensitive). Blank needles are ignored.
    pub fn with_search(mut self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        if !needle.trim().is_empty() {
            self.search = Some(needle.to_lowercase());
        }
        self
    }

    /// Whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.category.is_none() && self.search.is_none()
    }

    /// Tests one factor against every active predicate.
    pub fn matches(&self, factor: &RiskFactor) -> bool {
        if let Some(level) = self.level {
            if factor.level() != level {
                return false;
            }
        }
        if let Some(category) = self.category {
            if factor.hazard_category != category {
                return false;
            }
        }
        if let Some(needle) = &self.search {
            let hit = factor.hazard_name.to_lowercase().contains(needle)
                || factor.hazardous_situation.to_lowercase().contains(needle)
                || factor.harm.to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }
        true
    }

    /// Applies the filter, preserving order.
    pub fn apply<'a>(&self, factors: &'a [RiskFactor]) -> Vec<&'a RiskFactor> {
        factors.iter().filter(|f| self.matches(f)).collect()
    }
}

/// Headline counts over a register, for the summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RegisterSummary {
    /// Counts a slice of factors by level.
    pub fn of(factors: &[RiskFactor]) -> Self {
        let mut summary = Self {
            total: factors.len(),
            ..Self::default()
        };
        for factor in factors {
            match factor.level() {
                RiskLevel::High => summary.high += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::Low => summary.low += 1,
            }
        }
        summary
    }
}
