use std::collections::HashSet;

use crate::geographic::Region;
use crate::metrics::{
    AgeBracket, AggregationRow, MetricSpec, RankBy, RowDetail, group_by, percent_of, rank_rows,
    round2, running_mean,
};
use crate::player::PlayerRecord;

pub const YOUTH_DEVELOPMENT_INDEX: MetricSpec = MetricSpec::top(10, RankBy::Score);
pub const CLUB_DEVELOPMENT_SCORE: MetricSpec = MetricSpec::top(10, RankBy::Score);
pub const TALENT_PIPELINE_STRENGTH: MetricSpec = MetricSpec::top(5, RankBy::Value);
pub const GEOGRAPHIC_TALENT_DENSITY: MetricSpec = MetricSpec::top(8, RankBy::Score);

#[derive(Debug, Default)]
struct CountryDevelopment {
    players: usize,
    clubs: HashSet<String>,
    avg_age: f64,
    market_value: f64,
}

/// Composite 0-100 index per youth-club country.
pub fn youth_development_index(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let groups = group_by(
        records,
        |p| p.youth_club_country.as_deref(),
        |stats: &mut CountryDevelopment, p| {
            stats.players += 1;
            if let Some(club) = p.youth_club.as_deref() {
                stats.clubs.insert(club.to_string());
            }
            if let Some(age) = p.age {
                stats.avg_age = running_mean(stats.avg_age, stats.players, age as f64);
            }
            stats.market_value += p.market_value;
        },
    );

    let rows = groups
        .into_groups()
        .into_iter()
        .map(|(country, stats)| {
            let player_ratio = percent_of(stats.players, total);
            let club_diversity = (stats.clubs.len() as f64 / stats.players as f64 * 10.0).min(10.0);
            let age_score = (25.0 - stats.avg_age).max(0.0) * 2.0;
            let market_score = (stats.market_value / 1_000_000.0).min(50.0);
            let index = (player_ratio + club_diversity + age_score + market_score).min(100.0);
            AggregationRow {
                name: country,
                value: round2(index),
                percentage: player_ratio,
                score: index,
                players: stats.players,
                detail: RowDetail::None,
            }
        })
        .collect();
    rank_rows(rows, YOUTH_DEVELOPMENT_INDEX)
}

#[derive(Debug, Default)]
struct ClubDevelopment {
    players: usize,
    nationalities: HashSet<String>,
    avg_age: f64,
    market_value: f64,
}

/// Composite 0-100 score per youth club.
pub fn club_development_score(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let groups = group_by(
        records,
        PlayerRecord::development_club,
        |stats: &mut ClubDevelopment, p| {
            stats.players += 1;
            if let Some(nationality) = p.nationality.as_deref() {
                stats.nationalities.insert(nationality.to_string());
            }
            if let Some(age) = p.age {
                stats.avg_age = running_mean(stats.avg_age, stats.players, age as f64);
            }
            stats.market_value += p.market_value;
        },
    );

    let rows = groups
        .into_groups()
        .into_iter()
        .map(|(club, stats)| {
            let diversity = stats.nationalities.len() as f64 * 2.0;
            let age_score = (30.0 - stats.avg_age).max(0.0) * 1.5;
            let market_score = (stats.market_value / 10_000_000.0).min(30.0);
            let score = (stats.players as f64 + diversity + age_score + market_score).min(100.0);
            AggregationRow {
                name: club,
                value: round2(score),
                percentage: percent_of(stats.players, total),
                score,
                players: stats.players,
                detail: RowDetail::None,
            }
        })
        .collect();
    rank_rows(rows, CLUB_DEVELOPMENT_SCORE)
}

/// Head count per age bracket. Every bracket is reported, unknown ages land in U18.
pub fn talent_pipeline_strength(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    if records.is_empty() {
        return Vec::new();
    }
    let total = records.len();
    let mut counts = [0usize; 5];
    for record in records {
        let bracket = AgeBracket::from_age(record.age_or_zero());
        counts[bracket as usize] += 1;
    }

    let rows = AgeBracket::ALL
        .iter()
        .map(|bracket| {
            let count = counts[*bracket as usize];
            AggregationRow {
                name: bracket.label().to_string(),
                value: count as f64,
                percentage: percent_of(count, total),
                score: count as f64,
                players: count,
                detail: RowDetail::None,
            }
        })
        .collect();
    rank_rows(rows, TALENT_PIPELINE_STRENGTH)
}

#[derive(Debug, Default)]
struct RegionDensity {
    players: usize,
    countries: HashSet<String>,
}

/// Players per represented country inside each region.
pub fn geographic_talent_density(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let groups = group_by(
        records,
        |p| {
            p.youth_club_country
                .as_deref()
                .map(|country| Region::of_country(country).label())
        },
        |stats: &mut RegionDensity, p| {
            stats.players += 1;
            if let Some(country) = p.youth_club_country.as_deref() {
                stats.countries.insert(country.to_string());
            }
        },
    );

    let rows = groups
        .into_groups()
        .into_iter()
        .map(|(region, stats)| {
            let density = stats.players as f64 / stats.countries.len().max(1) as f64;
            AggregationRow {
                name: region,
                value: stats.players as f64,
                percentage: percent_of(stats.players, total),
                score: density,
                players: stats.players,
                detail: RowDetail::None,
            }
        })
        .collect();
    rank_rows(rows, GEOGRAPHIC_TALENT_DENSITY)
}
