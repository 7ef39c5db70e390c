use crate::metrics::{
    AggregationRow, GroupTable, MetricSpec, RankBy, RowDetail, group_by, percent_of, rank_rows,
    round2, running_mean, valued_brackets,
};
use crate::player::PlayerRecord;

pub const DEVELOPMENT_EFFICIENCY: MetricSpec = MetricSpec::top(10, RankBy::Score).min_support(3);
pub const TALENT_RETENTION_RATE: MetricSpec = MetricSpec::top(10, RankBy::Score).min_support(5);
pub const CLUB_SUCCESS_CORRELATION: MetricSpec = MetricSpec::top(10, RankBy::Score).min_support(2);
pub const AGE_TO_VALUE_RATIO: MetricSpec = MetricSpec::top(5, RankBy::Score);

#[derive(Debug, Default)]
struct ClubEfficiency {
    players: usize,
    avg_age: f64,
    market_value: f64,
}

/// Market value per player, scaled by how young the club's graduates are.
pub fn development_efficiency(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let groups = group_by(
        records,
        PlayerRecord::development_club,
        |stats: &mut ClubEfficiency, p| {
            stats.players += 1;
            if let Some(age) = p.age {
                stats.avg_age = running_mean(stats.avg_age, stats.players, age as f64);
            }
            stats.market_value += p.market_value;
        },
    );

    let spec = DEVELOPMENT_EFFICIENCY;
    let rows = groups
        .into_groups()
        .into_iter()
        .filter(|(_, stats)| spec.admits(stats.players))
        .map(|(club, stats)| {
            let efficiency = if stats.avg_age > 0.0 {
                (stats.market_value / stats.players as f64) / stats.avg_age * 100.0
            } else {
                0.0
            };
            AggregationRow {
                name: club,
                value: round2(efficiency),
                percentage: percent_of(stats.players, total),
                score: efficiency,
                players: stats.players,
                detail: RowDetail::None,
            }
        })
        .collect();
    rank_rows(rows, spec)
}

#[derive(Debug, Default)]
struct Retention {
    total: usize,
    retained: usize,
}

/// Share of each nationality that also trained at home.
pub fn talent_retention_rate(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let mut table: GroupTable<Retention> = GroupTable::new();
    for record in records {
        let Some((nationality, youth_country)) = record.origin_pair() else {
            continue;
        };
        let stats = table.entry(nationality);
        stats.total += 1;
        if nationality == youth_country {
            stats.retained += 1;
        }
    }

    let spec = TALENT_RETENTION_RATE;
    let rows = table
        .into_groups()
        .into_iter()
        .filter(|(_, stats)| spec.admits(stats.total))
        .map(|(country, stats)| AggregationRow {
            name: country,
            value: stats.retained as f64,
            percentage: percent_of(stats.retained, total),
            score: percent_of(stats.retained, stats.total),
            players: stats.total,
            detail: RowDetail::None,
        })
        .collect();
    rank_rows(rows, spec)
}

#[derive(Debug, Default)]
struct ClubSuccess {
    players: usize,
    avg_market_value: f64,
}

/// Average graduate value, weighted by the log of the club's output.
pub fn club_success_correlation(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let groups = group_by(
        records,
        PlayerRecord::development_club,
        |stats: &mut ClubSuccess, p| {
            stats.players += 1;
            stats.avg_market_value =
                running_mean(stats.avg_market_value, stats.players, p.market_value);
        },
    );

    let spec = CLUB_SUCCESS_CORRELATION;
    let rows = groups
        .into_groups()
        .into_iter()
        .filter(|(_, stats)| spec.admits(stats.players))
        .map(|(club, stats)| AggregationRow {
            name: club,
            value: stats.avg_market_value.round(),
            percentage: percent_of(stats.players, total),
            score: stats.avg_market_value * (stats.players as f64).ln(),
            players: stats.players,
            detail: RowDetail::None,
        })
        .collect();
    rank_rows(rows, spec)
}

/// Average value per bracket divided by the bracket's reference age.
pub fn age_to_value_ratio(records: &[PlayerRecord]) -> Vec<AggregationRow> {
    let total = records.len();
    let rows = valued_brackets(records)
        .into_iter()
        .map(|(bracket, players, avg_market_value)| AggregationRow {
            name: bracket.label().to_string(),
            value: players as f64,
            percentage: percent_of(players, total),
            score: avg_market_value / bracket.expected_age(),
            players,
            detail: RowDetail::None,
        })
        .collect();
    rank_rows(rows, AGE_TO_VALUE_RATIO)
}
