use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, warn};

use crate::country::CountryNormalizer;
use crate::error::{LoadError, Result};
use crate::player::{
    PlayerRecord, RawRow, parse_age, parse_birth_date, parse_market_value, present,
};

/// A skipped row. `line` is 1-based in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    pub line: u64,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    pub rows: Vec<RawRow>,
    pub warnings: Vec<ParseIssue>,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedRows {
    pub records: Vec<PlayerRecord>,
    pub excluded: usize,
}

/// Parse header + rows. Bad rows become warnings; only an unreadable payload fails.
pub fn parse_players_csv(raw: &str) -> Result<ParsedCsv> {
    if raw.trim().is_empty() {
        return Err(LoadError::parse("payload is empty"));
    }

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(raw.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|err| LoadError::parse(format!("unreadable header: {err}")))?
        .clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::parse("header row is blank"));
    }

    let mut out = ParsedCsv::default();
    let mut record = StringRecord::new();
    loop {
        let line = rdr.position().line();
        match rdr.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(err) => {
                let line = err.position().map(|p| p.line()).unwrap_or(line);
                push_issue(&mut out.warnings, line, err.to_string());
                continue;
            }
        }

        let line = record.position().map(|p| p.line()).unwrap_or(line);
        if is_blank(&record) {
            continue;
        }
        if record.len() != headers.len() {
            push_issue(
                &mut out.warnings,
                line,
                format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            );
            continue;
        }
        match record.deserialize::<RawRow>(Some(&headers)) {
            Ok(row) => out.rows.push(row),
            Err(err) => push_issue(&mut out.warnings, line, err.to_string()),
        }
    }

    debug!(
        rows = out.rows.len(),
        warnings = out.warnings.len(),
        "parsed player csv"
    );
    Ok(out)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn push_issue(warnings: &mut Vec<ParseIssue>, line: u64, message: String) {
    warn!(line, %message, "skipping malformed csv row");
    warnings.push(ParseIssue { line, message });
}

pub fn is_valid_row(row: &RawRow) -> bool {
    !row.player_id.is_empty() && !row.full_name.trim().is_empty()
}

/// Drop invalid rows and convert the rest into typed records.
pub fn normalize_rows(rows: Vec<RawRow>, countries: &CountryNormalizer) -> NormalizedRows {
    let total = rows.len();
    let records: Vec<PlayerRecord> = rows
        .into_iter()
        .filter(is_valid_row)
        .map(|row| to_record(row, countries))
        .collect();
    let excluded = total - records.len();
    if excluded > 0 {
        debug!(excluded, "dropped incomplete rows");
    }
    NormalizedRows { records, excluded }
}

pub fn to_record(row: RawRow, countries: &CountryNormalizer) -> PlayerRecord {
    let youth_club_country = countries.normalize(&row.youth_club_country);
    PlayerRecord {
        market_value: parse_market_value(&row.latest_market_value),
        age: parse_age(&row.age),
        date_of_birth: parse_birth_date(&row.date_of_birth),
        current_club: present(&row.current_club),
        competition: present(&row.competition),
        youth_club: present(&row.youth_club),
        youth_club_cleaned: present(&row.youth_club_cleaned),
        youth_club_country: present(&youth_club_country),
        nationality: present(&row.nationality),
        position: present(&row.position),
        dominant_foot: present(&row.dominant_foot),
        latest_market_value: present(&row.latest_market_value),
        latest_transfer_date: present(&row.latest_transfer_date),
        latest_fee: present(&row.latest_fee),
        player_id: row.player_id,
        full_name: row.full_name,
    }
}
