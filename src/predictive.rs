use std::collections::HashSet;

use crate::metrics::{
    AggregationRow, MetricSpec, RankBy, RowDetail, group_by, percent_of, rank_rows, round2,
    running_mean, valued_brackets,
};
use crate::player::PlayerRecord;

pub const FUTURE_STAR_POTENTIAL: MetricSpec = MetricSpec::top(10, RankBy::Score).min_support(3);
pub const DEVELOPMENT_TRAJECTORY: MetricSpec = MetricSpec::top(5, RankBy::Score);
pub const MARKET_VALUE_PREDICTION: MetricSpec = MetricSpec::top(10, RankBy::Score).min_support(5);
pub const TALENT_SCOUTING_SCORE: MetricSpec = MetricSpec::top(10, RankBy::Score).min_support(2);

const YOUNG_STAR_MAX_AGE: u32 = 25;
const YOUNG_STAR_MIN_VALUE: f64 = 1_000_000.0;
const MAX_GROWTH: f64 = 2.0;

pub fn is_young_star(record: &PlayerRecord) -> bool {
    record.age_or_zero() <= YOUNG_STAR_MAX_AGE && record.market_value >= YOUNG_STAR_MIN_VALUE
}

#[derive(Debug, Default)]
struct StarCount {
    players: usize,
    young_stars: usize,
}

/// Share of a club's graduates who are young and already valuable.
pub fn future_star_potential(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let groups = group_by(
        records,
        PlayerRecord::development_club,
        |stats: &mut StarCount, p| {
            stats.players += 1;
            if is_young_star(p) {
                stats.young_stars += 1;
            }
        },
    );

    let spec = FUTURE_STAR_POTENTIAL;
    let rows = groups
        .into_groups()
        .into_iter()
        .filter(|(_, stats)| spec.admits(stats.players))
        .map(|(club, stats)| {
            let potential = percent_of(stats.young_stars, stats.players);
            AggregationRow {
                name: club,
                value: round2(potential),
                percentage: percent_of(stats.young_stars, total),
                score: potential,
                players: stats.players,
                detail: RowDetail::YoungStars {
                    young_stars: stats.young_stars,
                },
            }
        })
        .collect();
    rank_rows(rows, spec)
}

/// Average value per bracket projected by a fixed growth factor.
pub fn development_trajectory(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let rows = valued_brackets(records)
        .into_iter()
        .map(|(bracket, players, avg_market_value)| AggregationRow {
            name: bracket.label().to_string(),
            value: players as f64,
            percentage: percent_of(players, total),
            score: avg_market_value * bracket.growth_factor(),
            players,
            detail: RowDetail::None,
        })
        .collect();
    rank_rows(rows, DEVELOPMENT_TRAJECTORY)
}

#[derive(Debug, Default)]
struct CountryValue {
    players: usize,
    avg_market_value: f64,
}

/// Average value per youth country, boosted by sample size up to 2x.
pub fn market_value_prediction(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let groups = group_by(
        records,
        |p| {
            if p.market_value > 0.0 {
                p.youth_club_country.as_deref()
            } else {
                None
            }
        },
        |stats: &mut CountryValue, p| {
            stats.players += 1;
            stats.avg_market_value =
                running_mean(stats.avg_market_value, stats.players, p.market_value);
        },
    );

    let spec = MARKET_VALUE_PREDICTION;
    let rows = groups
        .into_groups()
        .into_iter()
        .filter(|(_, stats)| spec.admits(stats.players))
        .map(|(country, stats)| {
            let growth = (1.0 + stats.players as f64 / 100.0).min(MAX_GROWTH);
            AggregationRow {
                name: country,
                value: stats.avg_market_value.round(),
                percentage: percent_of(stats.players, total),
                score: stats.avg_market_value * growth,
                players: stats.players,
                detail: RowDetail::None,
            }
        })
        .collect();
    rank_rows(rows, spec)
}

#[derive(Debug, Default)]
struct Scouting {
    players: usize,
    nationalities: HashSet<String>,
}

/// Nationality spread of a club's graduates, weighted by the log of its output.
pub fn talent_scouting_score(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let groups = group_by(
        records,
        PlayerRecord::development_club,
        |stats: &mut Scouting, p| {
            stats.players += 1;
            if let Some(nationality) = p.nationality.as_deref() {
                stats.nationalities.insert(nationality.to_string());
            }
        },
    );

    let spec = TALENT_SCOUTING_SCORE;
    let rows = groups
        .into_groups()
        .into_iter()
        .filter(|(_, stats)| spec.admits(stats.players))
        .map(|(club, stats)| {
            let unique = stats.nationalities.len();
            AggregationRow {
                name: club,
                value: unique as f64,
                percentage: percent_of(stats.players, total),
                score: unique as f64 * (stats.players as f64).ln() * 10.0,
                players: stats.players,
                detail: RowDetail::None,
            }
        })
        .collect();
    rank_rows(rows, spec)
}
