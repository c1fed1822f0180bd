//! The risk register: summary cards, the filtered table, and factor CRUD.
//!
//! Mutations here never patch local state — the register is always
//! re-fetched after a successful call, trading a round trip for agreement
//! with the server of record.

use cardea_core::filter::{RegisterSummary, RiskFilter};
use cardea_core::model::{RiskFactor, RiskFactorDraft, RiskFactorUpdate};
use cardea_core::perms;
use cardea_core::scoring::{risk_score, validate_scale};

use crate::cli::RisksAction;
use crate::commands::{authorize, Page};
use crate::config::CardeaConfig;
use crate::error::{Error, Result};
use crate::render;

pub async fn run(config: &CardeaConfig, action: RisksAction) -> Result<()> {
    let Some(page) = authorize(config, false).await? else {
        return Ok(());
    };

    match action {
        RisksAction::List {
            project_id,
            level,
            category,
            search,
        } => {
            let mut filter = RiskFilter::new();
            if let Some(level) = level {
                filter = filter.with_level(level);
            }
            if let Some(category) = category {
                filter = filter.with_category(category);
            }
            if let Some(search) = search {
                filter = filter.with_search(search);
            }
            list(&page, project_id, &filter).await
        }
        RisksAction::Add {
            project_id,
            stage,
            hazard,
            situation,
            sequence,
            harm,
            category,
            severity,
            probability,
            controls,
        } => {
            // Validate the scores up front; the projected score also goes
            // into the confirmation line.
            let score = risk_score(severity, probability)?;
            let draft = RiskFactorDraft {
                lifecycle_stage: stage,
                hazard_name: hazard,
                hazardous_situation: situation,
                sequence_of_events: sequence,
                harm,
                hazard_category: category,
                severity_score: severity,
                probability_score: probability,
                control_measures: controls,
            };
            add(&page, project_id, draft, score).await
        }
        RisksAction::Edit {
            project_id,
            factor_id,
            stage,
            hazard,
            situation,
            sequence,
            harm,
            category,
            severity,
            probability,
            controls,
        } => {
            if let Some(severity) = severity {
                validate_scale("severity_score", severity)?;
            }
            if let Some(probability) = probability {
                validate_scale("probability_score", probability)?;
            }
            let update = RiskFactorUpdate {
                lifecycle_stage: stage,
                hazard_name: hazard,
                hazardous_situation: situation,
                sequence_of_events: sequence,
                harm,
                hazard_category: category,
                severity_score: severity,
                probability_score: probability,
                control_measures: controls,
            };
            edit(&page, project_id, factor_id, update).await
        }
        RisksAction::Delete {
            project_id,
            factor_id,
            yes,
        } => delete(&page, project_id, factor_id, yes).await,
        RisksAction::Summary => summary(&page).await,
    }
}

async fn list(page: &Page, project_id: i64, filter: &RiskFilter) -> Result<()> {
    let project = page.client.get_project(project_id).await?;
    let factors = page.client.list_factors(project_id).await?;

    println!("Risk register — {} ({})\n", project.name, project.device_name);

    let summary = RegisterSummary::of(&factors);
    println!(
        "Total {}   High {}   Medium {}   Low {}",
        summary.total, summary.high, summary.medium, summary.low
    );

    let visible = filter.apply(&factors);
    if !filter.is_empty() {
        println!("Showing {} of {} after filters", visible.len(), factors.len());
    }
    if visible.is_empty() {
        println!("\nNo matching risk factors.");
        return Ok(());
    }

    println!("\n{}", factor_table(&visible));
    Ok(())
}

fn factor_table(factors: &[&RiskFactor]) -> String {
    let rows: Vec<Vec<String>> = factors
        .iter()
        .map(|f| {
            vec![
                f.id.to_string(),
                render::truncate(&f.hazard_name, 28),
                render::truncate(&f.hazardous_situation, 32),
                render::truncate(&f.harm, 24),
                f.hazard_category.to_string(),
                f.severity_score.to_string(),
                f.probability_score.to_string(),
                format!("{} ({})", f.risk_score, f.level()),
            ]
        })
        .collect();
    render::table(
        &["ID", "HAZARD", "SITUATION", "HARM", "CATEGORY", "SEV", "PROB", "SCORE"],
        &rows,
    )
}

async fn add(page: &Page, project_id: i64, draft: RiskFactorDraft, score: u8) -> Result<()> {
    require_risk_management(page, project_id).await?;

    // Factors hang off the project's analysis; create it on first use.
    let analysis = page.client.ensure_analysis(project_id).await?;
    let factor = page.client.add_factor(analysis.id, &draft).await?;
    println!(
        "Added risk factor {} (projected score {score}, server score {}).\n",
        factor.id, factor.risk_score
    );

    list(page, project_id, &RiskFilter::new()).await
}

async fn edit(
    page: &Page,
    project_id: i64,
    factor_id: i64,
    update: RiskFactorUpdate,
) -> Result<()> {
    require_risk_management(page, project_id).await?;

    let factor = page.client.update_factor(factor_id, &update).await?;
    println!(
        "Updated risk factor {} (score now {}).\n",
        factor.id, factor.risk_score
    );

    list(page, project_id, &RiskFilter::new()).await
}

async fn delete(page: &Page, project_id: i64, factor_id: i64, yes: bool) -> Result<()> {
    require_risk_management(page, project_id).await?;

    if !yes {
        println!("This permanently deletes risk factor {factor_id}.");
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }
    page.client.delete_factor(factor_id).await?;
    println!("Risk factor {factor_id} deleted.\n");

    list(page, project_id, &RiskFilter::new()).await
}

async fn summary(page: &Page) -> Result<()> {
    let summaries = page.client.analysis_summaries().await?;
    if summaries.is_empty() {
        println!("No risk analyses yet.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            vec![
                s.project_id.to_string(),
                s.project_name.clone(),
                s.device_name.clone(),
                s.total_risk_factors.to_string(),
                s.high_risk_count.to_string(),
                s.medium_risk_count.to_string(),
                s.low_risk_count.to_string(),
                s.analyst_name.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        render::table(
            &["PROJECT", "NAME", "DEVICE", "TOTAL", "HIGH", "MED", "LOW", "ANALYST"],
            &rows
        )
    );
    Ok(())
}

/// Risk mutations need a project admin or doctor role (or SYS_ADMIN).
async fn require_risk_management(page: &Page, project_id: i64) -> Result<()> {
    let project = page.client.get_project(project_id).await?;
    let project_role = project.role_of(page.user.id);
    if perms::can_manage_risks(&page.user, project_role) {
        return Ok(());
    }
    Err(Error::Forbidden {
        action: "risk management",
        requires: "a project admin or doctor role",
    })
}
