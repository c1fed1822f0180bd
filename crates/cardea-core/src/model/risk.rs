//! Risk analyses and risk factors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::scoring::RiskLevel;

/// Device lifecycle stage a hazard applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    Operation,
    Maintenance,
    Storage,
    Transport,
    Disposal,
}

impl LifecycleStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleStage::Operation => "operation",
            LifecycleStage::Maintenance => "maintenance",
            LifecycleStage::Storage => "storage",
            LifecycleStage::Transport => "transport",
            LifecycleStage::Disposal => "disposal",
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "operation" => Ok(LifecycleStage::Operation),
            "maintenance" => Ok(LifecycleStage::Maintenance),
            "storage" => Ok(LifecycleStage::Storage),
            "transport" => Ok(LifecycleStage::Transport),
            "disposal" => Ok(LifecycleStage::Disposal),
            other => Err(Error::UnknownValue {
                kind: "lifecycle stage",
                value: other.to_string(),
            }),
        }
    }
}

/// Hazard category of a risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardCategory {
    BiologicalChemical,
    OperationalInformational,
    Software,
    EnergyFunctional,
}

impl HazardCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardCategory::BiologicalChemical => "biological_chemical",
            HazardCategory::OperationalInformational => "operational_informational",
            HazardCategory::Software => "software",
            HazardCategory::EnergyFunctional => "energy_functional",
        }
    }
}

impl fmt::Display for HazardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "biological_chemical" => Ok(HazardCategory::BiologicalChemical),
            "operational_informational" => Ok(HazardCategory::OperationalInformational),
            "software" => Ok(HazardCategory::Software),
            "energy_functional" => Ok(HazardCategory::EnergyFunctional),
            other => Err(Error::UnknownValue {
                kind: "hazard category",
                value: other.to_string(),
            }),
        }
    }
}

/// Kind of body contact the device makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    NoContact,
    Surface,
    Invasive,
}

/// A single row of the risk register.
///
/// `risk_score` is computed server-side as severity × probability; the
/// client re-derives only the qualitative level from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub id: i64,
    pub analysis_id: i64,
    pub lifecycle_stage: LifecycleStage,
    pub hazard_name: String,
    pub hazardous_situation: String,
    pub sequence_of_events: String,
    pub harm: String,
    pub hazard_category: HazardCategory,
    pub severity_score: u8,
    pub probability_score: u8,
    pub risk_score: u8,
    #[serde(default)]
    pub control_measures: Option<String>,
    #[serde(default)]
    pub residual_risk_score: Option<u8>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RiskFactor {
    /// Qualitative bucket of the server-computed score.
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }
}

/// A project's risk analysis envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskAnalysis {
    pub id: i64,
    pub project_id: i64,
    #[serde(default)]
    pub has_body_contact: bool,
    #[serde(default)]
    pub contact_type: Option<ContactType>,
    pub analyst_id: i64,
    pub analysis_date: DateTime<Utc>,
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,
    #[serde(default)]
    pub total_risk_factors: u32,
    #[serde(default)]
    pub high_risk_count: u32,
    #[serde(default)]
    pub medium_risk_count: u32,
    #[serde(default)]
    pub low_risk_count: u32,
}

/// Cross-project row of `GET /api/risk-analyses/summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskAnalysisSummary {
    pub project_id: i64,
    pub project_name: String,
    pub device_name: String,
    pub total_risk_factors: u32,
    pub high_risk_count: u32,
    pub medium_risk_count: u32,
    pub low_risk_count: u32,
    pub analysis_date: DateTime<Utc>,
    pub analyst_name: String,
}

/// New analysis payload for `POST /api/risk-analyses/project/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisDraft {
    pub has_body_contact: bool,
    pub contact_type: ContactType,
    pub risk_factors: Vec<RiskFactorDraft>,
}

impl Default for AnalysisDraft {
    /// The empty analysis created implicitly before the first factor.
    fn default() -> Self {
        Self {
            has_body_contact: false,
            contact_type: ContactType::NoContact,
            risk_factors: Vec::new(),
        }
    }
}

/// New factor payload for `POST /api/risk-analyses/{analysis_id}/factors`.
#[derive(Debug, Clone, Serialize)]
pub struct RiskFactorDraft {
    pub lifecycle_stage: LifecycleStage,
    pub hazard_name: String,
    pub hazardous_situation: String,
    pub sequence_of_events: String,
    pub harm: String,
    pub hazard_category: HazardCategory,
    pub severity_score: u8,
    pub probability_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_measures: Option<String>,
}

/// Partial factor update, `PUT /api/risk-analyses/factors/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RiskFactorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle_stage: Option<LifecycleStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hazard_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hazardous_situation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_of_events: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hazard_category: Option<HazardCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_measures: Option<String>,
}
