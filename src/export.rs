use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dashboard::{DashboardReport, MetricTable};
use crate::metrics::RowDetail;
use crate::player::PlayerRecord;
use crate::players::{display_birth_date, display_market_value};

/// Excel caps sheet names at 31 characters.
const MAX_SHEET_NAME: usize = 31;

pub struct ExportReport {
    pub sheets: usize,
    pub metric_rows: usize,
    pub players: usize,
}

pub fn export_report_xlsx(
    path: &Path,
    report: &DashboardReport,
    records: &[PlayerRecord],
) -> Result<ExportReport> {
    let mut workbook = Workbook::new();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_summary(sheet, report)?;
    }

    let mut metric_rows = 0usize;
    for table in &report.metrics {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(sheet_name(table))
            .with_context(|| format!("name sheet for {}", table.title))?;
        write_metric(sheet, table)?;
        metric_rows += table.rows.len();
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Players")?;
        write_rows(sheet, &player_rows(records))?;
    }

    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportReport {
        sheets: report.metrics.len() + 2,
        metric_rows,
        players: records.len(),
    })
}

fn sheet_name(table: &MetricTable) -> String {
    let slug = table.metric.slug();
    slug.chars().take(MAX_SHEET_NAME).collect()
}

fn write_summary(sheet: &mut Worksheet, report: &DashboardReport) -> Result<()> {
    let s = &report.summary;
    let rows: [(&str, f64); 5] = [
        ("Total Players", s.total_players as f64),
        ("Players With Youth Club", s.players_with_youth_club as f64),
        ("Youth Club %", s.youth_club_percentage),
        ("Youth Club Countries", s.youth_club_countries as f64),
        ("Total Market Value", s.market_value_sum),
    ];
    sheet.write_string(0, 0, "Metric")?;
    sheet.write_string(0, 1, "Value")?;
    for (idx, (label, value)) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet
            .write_string(row, 0, *label)
            .with_context(|| format!("write summary label {label}"))?;
        sheet
            .write_number(row, 1, *value)
            .with_context(|| format!("write summary value {label}"))?;
    }
    Ok(())
}

fn write_metric(sheet: &mut Worksheet, table: &MetricTable) -> Result<()> {
    let headers = ["Name", "Value", "Percentage", "Score", "Players", "Detail"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (idx, row) in table.rows.iter().enumerate() {
        let r = idx as u32 + 1;
        sheet
            .write_string(r, 0, &row.name)
            .with_context(|| format!("write cell ({r},0)"))?;
        sheet.write_number(r, 1, row.value)?;
        sheet.write_number(r, 2, row.percentage)?;
        sheet.write_number(r, 3, row.score)?;
        sheet.write_number(r, 4, row.players as f64)?;
        sheet.write_string(r, 5, detail_text(&row.detail))?;
    }
    Ok(())
}

fn detail_text(detail: &RowDetail) -> String {
    match detail {
        RowDetail::None => String::new(),
        RowDetail::Migration { from, to, net } => format!("from {from} / to {to} / net {net}"),
        RowDetail::Trade { exported, imported } => {
            format!("exported {exported} / imported {imported}")
        }
        RowDetail::YoungStars { young_stars } => format!("young stars {young_stars}"),
    }
}

fn player_rows(records: &[PlayerRecord]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Player ID".to_string(),
        "Player".to_string(),
        "Club".to_string(),
        "Competition".to_string(),
        "Youth Club".to_string(),
        "Youth Club Country".to_string(),
        "Nationality".to_string(),
        "Position".to_string(),
        "Date of Birth".to_string(),
        "Age".to_string(),
        "Foot".to_string(),
        "Market Value".to_string(),
    ]];
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    for p in records {
        rows.push(vec![
            p.player_id.clone(),
            p.full_name.clone(),
            opt(&p.current_club),
            opt(&p.competition),
            p.development_club().unwrap_or_default().to_string(),
            opt(&p.youth_club_country),
            opt(&p.nationality),
            opt(&p.position),
            display_birth_date(p),
            p.age.map(|a| a.to_string()).unwrap_or_default(),
            opt(&p.dominant_foot),
            display_market_value(p).to_string(),
        ]);
    }
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
