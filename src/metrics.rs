use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::player::PlayerRecord;

/// One ranked line of a metric table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationRow {
    pub name: String,
    pub value: f64,
    pub percentage: f64,
    pub score: f64,
    pub players: usize,
    #[serde(skip_serializing_if = "RowDetail::is_none")]
    pub detail: RowDetail,
}

/// Metric-specific extras carried next to the common columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowDetail {
    #[default]
    None,
    Migration { from: usize, to: usize, net: i64 },
    Trade { exported: usize, imported: usize },
    YoungStars { young_stars: usize },
}

impl RowDetail {
    pub fn is_none(&self) -> bool {
        matches!(self, RowDetail::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankBy {
    Score,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricSpec {
    pub min_support: usize,
    pub top_n: Option<usize>,
    pub rank_by: RankBy,
}

impl MetricSpec {
    pub const fn top(n: usize, rank_by: RankBy) -> Self {
        Self {
            min_support: 0,
            top_n: Some(n),
            rank_by,
        }
    }

    pub const fn min_support(mut self, n: usize) -> Self {
        self.min_support = n;
        self
    }

    pub fn admits(&self, group_size: usize) -> bool {
        group_size >= self.min_support
    }
}

/// Groups keyed by name, iterated in first-seen order.
#[derive(Debug, Clone)]
pub struct GroupTable<S> {
    index: HashMap<String, usize>,
    groups: Vec<(String, S)>,
}

impl<S: Default> GroupTable<S> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    pub fn entry(&mut self, key: &str) -> &mut S {
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => {
                self.groups.push((key.to_string(), S::default()));
                let idx = self.groups.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.groups[idx].1
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> Vec<(String, S)> {
        self.groups
    }
}

impl<S: Default> Default for GroupTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-key grouping: records without a key are skipped.
pub fn group_by<S, K, F>(records: &[PlayerRecord], key: K, mut fold: F) -> GroupTable<S>
where
    S: Default,
    K: Fn(&PlayerRecord) -> Option<&str>,
    F: FnMut(&mut S, &PlayerRecord),
{
    let mut table = GroupTable::new();
    for record in records {
        if let Some(k) = key(record) {
            fold(table.entry(k), record);
        }
    }
    table
}

/// Stable descending sort on the ranking field, then truncate.
pub fn rank_rows(mut rows: Vec<AggregationRow>, spec: MetricSpec) -> Vec<AggregationRow> {
    let field = |row: &AggregationRow| match spec.rank_by {
        RankBy::Score => row.score,
        RankBy::Value => row.value,
    };
    rows.sort_by(|a, b| field(b).partial_cmp(&field(a)).unwrap_or(Ordering::Equal));
    if let Some(n) = spec.top_n {
        rows.truncate(n);
    }
    rows
}

/// Incremental mean where `n` already counts the new sample.
pub fn running_mean(mean: f64, n: usize, value: f64) -> f64 {
    if n == 0 {
        return mean;
    }
    (mean * (n as f64 - 1.0) + value) / n as f64
}

pub fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgeBracket {
    U18,
    U21,
    U25,
    U30,
    Over30,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 5] = [
        AgeBracket::U18,
        AgeBracket::U21,
        AgeBracket::U25,
        AgeBracket::U30,
        AgeBracket::Over30,
    ];

    pub fn from_age(age: u32) -> Self {
        match age {
            0..=18 => AgeBracket::U18,
            19..=21 => AgeBracket::U21,
            22..=25 => AgeBracket::U25,
            26..=30 => AgeBracket::U30,
            _ => AgeBracket::Over30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::U18 => "U18",
            AgeBracket::U21 => "U21",
            AgeBracket::U25 => "U25",
            AgeBracket::U30 => "U30",
            AgeBracket::Over30 => "30+",
        }
    }

    /// Reference age used by the age-to-value ratio.
    pub fn expected_age(self) -> f64 {
        match self {
            AgeBracket::U18 => 18.0,
            AgeBracket::U21 => 21.0,
            AgeBracket::U25 => 25.0,
            AgeBracket::U30 => 30.0,
            AgeBracket::Over30 => 35.0,
        }
    }

    pub fn growth_factor(self) -> f64 {
        match self {
            AgeBracket::U18 => 3.0,
            AgeBracket::U21 => 2.5,
            AgeBracket::U25 => 2.0,
            AgeBracket::U30 => 1.5,
            AgeBracket::Over30 => 1.0,
        }
    }
}

/// Per-bracket running market-value mean over players with known age and value.
pub(crate) fn valued_brackets(records: &[PlayerRecord]) -> Vec<(AgeBracket, usize, f64)> {
    let mut order: Vec<AgeBracket> = Vec::new();
    let mut stats: HashMap<AgeBracket, (usize, f64)> = HashMap::new();
    for record in records {
        let Some(age) = record.age else { continue };
        if record.market_value <= 0.0 {
            continue;
        }
        let bracket = AgeBracket::from_age(age);
        let entry = stats.entry(bracket).or_insert_with(|| {
            order.push(bracket);
            (0, 0.0)
        });
        entry.0 += 1;
        entry.1 = running_mean(entry.1, entry.0, record.market_value);
    }
    order
        .into_iter()
        .filter_map(|b| stats.get(&b).map(|(n, mean)| (b, *n, *mean)))
        .collect()
}
