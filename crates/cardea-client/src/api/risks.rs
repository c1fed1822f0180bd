//! Risk-analysis endpoints: `/api/risk-analyses/*`.

use cardea_core::model::{
    AnalysisDraft, RiskAnalysis, RiskAnalysisSummary, RiskFactor, RiskFactorDraft,
    RiskFactorUpdate,
};

use crate::client::ApiClient;
use crate::error::Result;

impl ApiClient {
    /// The project's risk analysis envelope, 404 if none exists yet.
    pub async fn get_analysis(&self, project_id: i64) -> Result<RiskAnalysis> {
        self.get_json(&format!("/api/risk-analyses/project/{project_id}"))
            .await
    }

    /// Creates the project's risk analysis.
    pub async fn create_analysis(
        &self,
        project_id: i64,
        draft: &AnalysisDraft,
    ) -> Result<RiskAnalysis> {
        self.post_json(&format!("/api/risk-analyses/project/{project_id}"), draft)
            .await
    }

    /// Get-or-create: factors hang off an analysis, so the first `risks add`
    /// on a project creates an empty one implicitly.
    pub async fn ensure_analysis(&self, project_id: i64) -> Result<RiskAnalysis> {
        match self.get_analysis(project_id).await {
            Ok(analysis) => Ok(analysis),
            Err(err) if err.is_not_found() => {
                log::info!("no risk analysis for project {project_id} yet, creating one");
                self.create_analysis(project_id, &AnalysisDraft::default())
                    .await
            }
            Err(err) => Err(err),
        }
    }

    /// All factors of a project's register, flat.
    pub async fn list_factors(&self, project_id: i64) -> Result<Vec<RiskFactor>> {
        self.get_json(&format!("/api/risk-analyses/project/{project_id}/factors"))
            .await
    }

    /// Appends a factor to an analysis. The server computes the risk score.
    pub async fn add_factor(
        &self,
        analysis_id: i64,
        draft: &RiskFactorDraft,
    ) -> Result<RiskFactor> {
        self.post_json(&format!("/api/risk-analyses/{analysis_id}/factors"), draft)
            .await
    }

    /// Applies a partial factor update; the score is recomputed server-side.
    pub async fn update_factor(
        &self,
        factor_id: i64,
        update: &RiskFactorUpdate,
    ) -> Result<RiskFactor> {
        self.put_json(&format!("/api/risk-analyses/factors/{factor_id}"), update)
            .await
    }

    /// Deletes a factor.
    pub async fn delete_factor(&self, factor_id: i64) -> Result<()> {
        self.delete(&format!("/api/risk-analyses/factors/{factor_id}"))
            .await
    }

    /// Cross-project analysis summaries.
    pub async fn analysis_summaries(&self) -> Result<Vec<RiskAnalysisSummary>> {
        self.get_json("/api/risk-analyses/summary").await
    }
}
