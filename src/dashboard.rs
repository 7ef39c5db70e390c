use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::metrics::AggregationRow;
use crate::player::PlayerRecord;
use crate::repository::{PlayerRepository, Summary};
use crate::{development, geographic, performance, predictive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Page {
    Development,
    Geographic,
    Performance,
    Predictive,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Development,
        Page::Geographic,
        Page::Performance,
        Page::Predictive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Development => "Development",
            Page::Geographic => "Geographic",
            Page::Performance => "Performance",
            Page::Predictive => "Predictive",
        }
    }

    pub fn from_name(raw: &str) -> Option<Page> {
        let s = raw.trim();
        Page::ALL
            .into_iter()
            .find(|page| page.label().eq_ignore_ascii_case(s))
    }

    pub fn metrics(self) -> impl Iterator<Item = Metric> {
        Metric::ALL.into_iter().filter(move |m| m.page() == self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    YouthDevelopmentIndex,
    ClubDevelopmentScore,
    TalentPipelineStrength,
    GeographicTalentDensity,
    TalentMigrationPatterns,
    RegionalDevelopmentCenters,
    CrossBorderDevelopment,
    TalentExportImportRatio,
    DevelopmentEfficiency,
    TalentRetentionRate,
    ClubSuccessCorrelation,
    AgeToValueRatio,
    FutureStarPotential,
    DevelopmentTrajectory,
    MarketValuePrediction,
    TalentScoutingScore,
}

impl Metric {
    pub const ALL: [Metric; 16] = [
        Metric::YouthDevelopmentIndex,
        Metric::ClubDevelopmentScore,
        Metric::TalentPipelineStrength,
        Metric::GeographicTalentDensity,
        Metric::TalentMigrationPatterns,
        Metric::RegionalDevelopmentCenters,
        Metric::CrossBorderDevelopment,
        Metric::TalentExportImportRatio,
        Metric::DevelopmentEfficiency,
        Metric::TalentRetentionRate,
        Metric::ClubSuccessCorrelation,
        Metric::AgeToValueRatio,
        Metric::FutureStarPotential,
        Metric::DevelopmentTrajectory,
        Metric::MarketValuePrediction,
        Metric::TalentScoutingScore,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Metric::YouthDevelopmentIndex => "Youth Development Index",
            Metric::ClubDevelopmentScore => "Club Development Score",
            Metric::TalentPipelineStrength => "Talent Pipeline Strength",
            Metric::GeographicTalentDensity => "Geographic Talent Density",
            Metric::TalentMigrationPatterns => "Talent Migration Patterns",
            Metric::RegionalDevelopmentCenters => "Regional Development Centers",
            Metric::CrossBorderDevelopment => "Cross-Border Development",
            Metric::TalentExportImportRatio => "Talent Export/Import Ratio",
            Metric::DevelopmentEfficiency => "Development Efficiency",
            Metric::TalentRetentionRate => "Talent Retention Rate",
            Metric::ClubSuccessCorrelation => "Club Success Correlation",
            Metric::AgeToValueRatio => "Age-to-Value Ratio",
            Metric::FutureStarPotential => "Future Star Potential",
            Metric::DevelopmentTrajectory => "Development Trajectory",
            Metric::MarketValuePrediction => "Market Value Prediction",
            Metric::TalentScoutingScore => "Talent Scouting Score",
        }
    }

    /// Short identifier, safe for sheet names and CLI flags.
    pub fn slug(self) -> &'static str {
        match self {
            Metric::YouthDevelopmentIndex => "youth_dev_index",
            Metric::ClubDevelopmentScore => "club_dev_score",
            Metric::TalentPipelineStrength => "pipeline",
            Metric::GeographicTalentDensity => "talent_density",
            Metric::TalentMigrationPatterns => "migration",
            Metric::RegionalDevelopmentCenters => "regional_centers",
            Metric::CrossBorderDevelopment => "cross_border",
            Metric::TalentExportImportRatio => "export_import",
            Metric::DevelopmentEfficiency => "dev_efficiency",
            Metric::TalentRetentionRate => "retention",
            Metric::ClubSuccessCorrelation => "club_success",
            Metric::AgeToValueRatio => "age_to_value",
            Metric::FutureStarPotential => "future_stars",
            Metric::DevelopmentTrajectory => "trajectory",
            Metric::MarketValuePrediction => "value_prediction",
            Metric::TalentScoutingScore => "scouting",
        }
    }

    pub fn page(self) -> Page {
        match self {
            Metric::YouthDevelopmentIndex
            | Metric::ClubDevelopmentScore
            | Metric::TalentPipelineStrength
            | Metric::GeographicTalentDensity => Page::Development,
            Metric::TalentMigrationPatterns
            | Metric::RegionalDevelopmentCenters
            | Metric::CrossBorderDevelopment
            | Metric::TalentExportImportRatio => Page::Geographic,
            Metric::DevelopmentEfficiency
            | Metric::TalentRetentionRate
            | Metric::ClubSuccessCorrelation
            | Metric::AgeToValueRatio => Page::Performance,
            Metric::FutureStarPotential
            | Metric::DevelopmentTrajectory
            | Metric::MarketValuePrediction
            | Metric::TalentScoutingScore => Page::Predictive,
        }
    }

    /// Whether the group name is a club (longer display width) rather than a country or bracket.
    pub fn groups_by_club(self) -> bool {
        matches!(
            self,
            Metric::ClubDevelopmentScore
                | Metric::DevelopmentEfficiency
                | Metric::ClubSuccessCorrelation
                | Metric::FutureStarPotential
                | Metric::TalentScoutingScore
        )
    }

    pub fn compute(self, records: &[PlayerRecord]) -> Vec<AggregationRow> {
        match self {
            Metric::YouthDevelopmentIndex => development::youth_development_index(records),
            Metric::ClubDevelopmentScore => development::club_development_score(records),
            Metric::TalentPipelineStrength => development::talent_pipeline_strength(records),
            Metric::GeographicTalentDensity => development::geographic_talent_density(records),
            Metric::TalentMigrationPatterns => geographic::talent_migration_patterns(records),
            Metric::RegionalDevelopmentCenters => {
                geographic::regional_development_centers(records)
            }
            Metric::CrossBorderDevelopment => geographic::cross_border_development(records),
            Metric::TalentExportImportRatio => geographic::talent_export_import_ratio(records),
            Metric::DevelopmentEfficiency => performance::development_efficiency(records),
            Metric::TalentRetentionRate => performance::talent_retention_rate(records),
            Metric::ClubSuccessCorrelation => performance::club_success_correlation(records),
            Metric::AgeToValueRatio => performance::age_to_value_ratio(records),
            Metric::FutureStarPotential => predictive::future_star_potential(records),
            Metric::DevelopmentTrajectory => predictive::development_trajectory(records),
            Metric::MarketValuePrediction => predictive::market_value_prediction(records),
            Metric::TalentScoutingScore => predictive::talent_scouting_score(records),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricTable {
    pub metric: Metric,
    pub title: String,
    pub page: Page,
    pub rows: Vec<AggregationRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub summary: Summary,
    pub metrics: Vec<MetricTable>,
}

impl DashboardReport {
    pub fn table(&self, metric: Metric) -> Option<&MetricTable> {
        self.metrics.iter().find(|t| t.metric == metric)
    }
}

/// Every metric over one snapshot, in `Metric::ALL` order.
pub fn build_report(repo: &PlayerRepository, cfg: &Config) -> DashboardReport {
    build_report_for(repo, &Metric::ALL, cfg)
}

pub fn build_report_for(
    repo: &PlayerRepository,
    metrics: &[Metric],
    cfg: &Config,
) -> DashboardReport {
    let records = repo.records();
    let tables: Vec<MetricTable> = with_metric_pool(cfg.metric_parallelism, || {
        metrics
            .par_iter()
            .map(|metric| MetricTable {
                metric: *metric,
                title: metric.title().to_string(),
                page: metric.page(),
                rows: metric.compute(records),
            })
            .collect()
    });
    debug!(metrics = tables.len(), records = records.len(), "built dashboard report");
    DashboardReport {
        summary: repo.summary().clone(),
        metrics: tables,
    }
}

fn with_metric_pool<T>(threads: usize, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(action),
        Err(_) => action(),
    }
}
