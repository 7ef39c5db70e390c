use std::collections::HashSet;

use serde::Serialize;

use crate::metrics::{
    AggregationRow, GroupTable, MetricSpec, RankBy, RowDetail, group_by, percent_of, rank_rows,
};
use crate::player::PlayerRecord;

pub const TALENT_MIGRATION_PATTERNS: MetricSpec = MetricSpec::top(10, RankBy::Value);
pub const REGIONAL_DEVELOPMENT_CENTERS: MetricSpec = MetricSpec::top(8, RankBy::Value);
pub const CROSS_BORDER_DEVELOPMENT: MetricSpec = MetricSpec::top(10, RankBy::Score).min_support(5);
pub const TALENT_EXPORT_IMPORT_RATIO: MetricSpec =
    MetricSpec::top(10, RankBy::Value).min_support(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    SouthAmerica,
    Europe,
    NorthAmerica,
    Asia,
    Oceania,
    Africa,
    Other,
}

const COUNTRY_REGIONS: &[(&str, Region)] = &[
    ("Brazil", Region::SouthAmerica),
    ("Argentina", Region::SouthAmerica),
    ("Uruguay", Region::SouthAmerica),
    ("Chile", Region::SouthAmerica),
    ("Colombia", Region::SouthAmerica),
    ("Peru", Region::SouthAmerica),
    ("Spain", Region::Europe),
    ("Germany", Region::Europe),
    ("France", Region::Europe),
    ("Italy", Region::Europe),
    ("England", Region::Europe),
    ("Netherlands", Region::Europe),
    ("Portugal", Region::Europe),
    ("Belgium", Region::Europe),
    ("Croatia", Region::Europe),
    ("Serbia", Region::Europe),
    ("Poland", Region::Europe),
    ("Czech Republic", Region::Europe),
    ("Slovakia", Region::Europe),
    ("Hungary", Region::Europe),
    ("Romania", Region::Europe),
    ("Bulgaria", Region::Europe),
    ("Greece", Region::Europe),
    ("Turkey", Region::Europe),
    ("Russia", Region::Europe),
    ("Ukraine", Region::Europe),
    ("United States", Region::NorthAmerica),
    ("Canada", Region::NorthAmerica),
    ("Mexico", Region::NorthAmerica),
    ("Japan", Region::Asia),
    ("South Korea", Region::Asia),
    ("China", Region::Asia),
    ("Australia", Region::Oceania),
    ("Nigeria", Region::Africa),
    ("Ghana", Region::Africa),
    ("Senegal", Region::Africa),
    ("Morocco", Region::Africa),
    ("Egypt", Region::Africa),
    ("Algeria", Region::Africa),
    ("Tunisia", Region::Africa),
    ("Ivory Coast", Region::Africa),
    ("Côte d'Ivoire", Region::Africa),
    ("Cameroon", Region::Africa),
    ("South Africa", Region::Africa),
];

impl Region {
    /// Exact-name lookup; anything unmapped is `Other`.
    pub fn of_country(country: &str) -> Region {
        COUNTRY_REGIONS
            .iter()
            .find(|(name, _)| *name == country)
            .map(|(_, region)| *region)
            .unwrap_or(Region::Other)
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::SouthAmerica => "South America",
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::Asia => "Asia",
            Region::Oceania => "Oceania",
            Region::Africa => "Africa",
            Region::Other => "Other",
        }
    }
}

#[derive(Debug, Default)]
struct MigrationFlow {
    from: usize,
    to: usize,
    net: i64,
}

/// Players leaving (`from`) and arriving (`to`) per country, counting both ends of a move.
pub fn talent_migration_patterns(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let mut table: GroupTable<MigrationFlow> = GroupTable::new();
    for record in records {
        let Some((nationality, youth_country)) = record.origin_pair() else {
            continue;
        };
        if nationality == youth_country {
            let home = table.entry(nationality);
            home.from += 1;
            home.net += 1;
        } else {
            let origin = table.entry(nationality);
            origin.from += 1;
            origin.net -= 1;
            let host = table.entry(youth_country);
            host.to += 1;
            host.net += 1;
        }
    }

    let rows = table
        .into_groups()
        .into_iter()
        .map(|(country, flow)| {
            let moves = flow.from + flow.to;
            AggregationRow {
                name: country,
                value: moves as f64,
                percentage: percent_of(moves, total),
                score: flow.to as f64 / flow.from.max(1) as f64,
                players: moves,
                detail: RowDetail::Migration {
                    from: flow.from,
                    to: flow.to,
                    net: flow.net,
                },
            }
        })
        .collect();
    rank_rows(rows, TALENT_MIGRATION_PATTERNS)
}

#[derive(Debug, Default)]
struct RegionCenters {
    players: usize,
    clubs: HashSet<String>,
    countries: HashSet<String>,
}

/// Distinct youth clubs per represented country, by region.
pub fn regional_development_centers(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let groups = group_by(
        records,
        |p| {
            p.youth_club_country
                .as_deref()
                .map(|country| Region::of_country(country).label())
        },
        |stats: &mut RegionCenters, p| {
            stats.players += 1;
            if let Some(club) = p.youth_club.as_deref() {
                stats.clubs.insert(club.to_string());
            }
            if let Some(country) = p.youth_club_country.as_deref() {
                stats.countries.insert(country.to_string());
            }
        },
    );

    let rows = groups
        .into_groups()
        .into_iter()
        .map(|(region, stats)| AggregationRow {
            name: region,
            value: stats.players as f64,
            percentage: percent_of(stats.players, total),
            score: stats.clubs.len() as f64 / stats.countries.len().max(1) as f64,
            players: stats.players,
            detail: RowDetail::None,
        })
        .collect();
    rank_rows(rows, REGIONAL_DEVELOPMENT_CENTERS)
}

#[derive(Debug, Default)]
struct CrossBorder {
    total: usize,
    cross_border: usize,
}

/// Share of each nationality trained abroad.
pub fn cross_border_development(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let mut table: GroupTable<CrossBorder> = GroupTable::new();
    for record in records {
        let Some((nationality, youth_country)) = record.origin_pair() else {
            continue;
        };
        let stats = table.entry(nationality);
        stats.total += 1;
        if nationality != youth_country {
            stats.cross_border += 1;
        }
    }

    let spec = CROSS_BORDER_DEVELOPMENT;
    let rows = table
        .into_groups()
        .into_iter()
        .filter(|(_, stats)| spec.admits(stats.total))
        .map(|(country, stats)| AggregationRow {
            name: country,
            value: stats.cross_border as f64,
            percentage: percent_of(stats.cross_border, total),
            score: stats.cross_border as f64 / stats.total as f64,
            players: stats.total,
            detail: RowDetail::None,
        })
        .collect();
    rank_rows(rows, spec)
}

#[derive(Debug, Default)]
struct Trade {
    exported: usize,
    imported: usize,
}

/// Imports per export for countries involved in at least a few moves.
pub fn talent_export_import_ratio(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let mut table: GroupTable<Trade> = GroupTable::new();
    for record in records {
        let Some((nationality, youth_country)) = record.origin_pair() else {
            continue;
        };
        if nationality == youth_country {
            continue;
        }
        table.entry(nationality).exported += 1;
        table.entry(youth_country).imported += 1;
    }

    let spec = TALENT_EXPORT_IMPORT_RATIO;
    let rows = table
        .into_groups()
        .into_iter()
        .filter(|(_, trade)| spec.admits(trade.exported + trade.imported))
        .map(|(country, trade)| {
            let moves = trade.exported + trade.imported;
            AggregationRow {
                name: country,
                value: moves as f64,
                percentage: percent_of(moves, total),
                score: trade.imported as f64 / trade.exported.max(1) as f64,
                players: moves,
                detail: RowDetail::Trade {
                    exported: trade.exported,
                    imported: trade.imported,
                },
            }
        })
        .collect();
    rank_rows(rows, spec)
}
