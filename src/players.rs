use std::collections::BTreeSet;

use crate::player::PlayerRecord;

pub const PAGE_SIZE: usize = 20;

/// Filters for the player listing. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerQuery {
    pub search: String,
    pub position: Option<String>,
}

impl PlayerQuery {
    pub fn matches(&self, record: &PlayerRecord) -> bool {
        if let Some(position) = self.position.as_deref()
            && record.position.as_deref() != Some(position)
        {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(record.full_name.as_str()),
            record.current_club.as_deref(),
            record.youth_club.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, records: &'a [PlayerRecord]) -> Vec<&'a PlayerRecord> {
        records.iter().filter(|p| self.matches(p)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// 1-based pagination. Out-of-range pages (including 0) come back empty.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let slice = if page == 0 || page > total_pages {
        &items[0..0]
    } else {
        let start = (page - 1) * per_page;
        let end = (start + per_page).min(items.len());
        &items[start..end]
    };
    Page {
        items: slice,
        page,
        total_pages,
        total_items: items.len(),
    }
}

pub fn unique_positions(records: &[PlayerRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|p| p.position.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn display_market_value(record: &PlayerRecord) -> &str {
    record.latest_market_value.as_deref().unwrap_or("N/A")
}

pub fn display_birth_date(record: &PlayerRecord) -> String {
    record
        .date_of_birth
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Cuts to `max` characters and appends `...` when something was dropped.
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max).collect();
    out.push_str("...");
    out
}
