use std::collections::HashSet;

use serde::Serialize;

use crate::player::PlayerRecord;

/// Headline figures for the overview page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_players: usize,
    pub players_with_youth_club: usize,
    pub market_value_sum: f64,
    pub youth_club_percentage: f64,
    pub youth_club_countries: usize,
}

impl Summary {
    pub fn from_records(records: &[PlayerRecord]) -> Self {
        let total_players = records
            .iter()
            .map(|p| p.player_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let players_with_youth_club = records
            .iter()
            .filter(|p| p.has_real_youth_club())
            .map(|p| p.player_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        // Summed per row, duplicates included.
        let market_value_sum = records.iter().map(|p| p.market_value).sum();

        let youth_club_percentage = if total_players > 0 {
            players_with_youth_club as f64 / total_players as f64 * 100.0
        } else {
            0.0
        };

        let youth_club_countries = records
            .iter()
            .filter_map(|p| p.youth_club_country.as_deref())
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_players,
            players_with_youth_club,
            market_value_sum,
            youth_club_percentage,
            youth_club_countries,
        }
    }
}

/// Validated, normalized players. Immutable once built; reloads build a new one.
#[derive(Debug, Clone, Default)]
pub struct PlayerRepository {
    records: Vec<PlayerRecord>,
    summary: Summary,
}

impl PlayerRepository {
    pub fn new(records: Vec<PlayerRecord>) -> Self {
        let summary = Summary::from_records(&records);
        Self { records, summary }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn total_players(&self) -> usize {
        self.summary.total_players
    }

    pub fn players_with_youth_club(&self) -> usize {
        self.summary.players_with_youth_club
    }

    pub fn market_value_sum(&self) -> f64 {
        self.summary.market_value_sum
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
