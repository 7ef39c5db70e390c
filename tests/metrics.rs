use youth_pipeline::country::CountryNormalizer;
use youth_pipeline::development::{
    club_development_score, geographic_talent_density, talent_pipeline_strength,
    youth_development_index,
};
use youth_pipeline::geographic::{
    cross_border_development, regional_development_centers,
    talent_export_import_ratio, talent_migration_patterns,
};
use youth_pipeline::metrics::{AggregationRow, RowDetail};
use youth_pipeline::performance::{
    age_to_value_ratio, club_success_correlation, development_efficiency, talent_retention_rate,
};
use youth_pipeline::player::PlayerRecord;
use youth_pipeline::predictive::{
    development_trajectory, future_star_potential, is_young_star, market_value_prediction,
    talent_scouting_score,
};
use youth_pipeline::state::load_text;

fn player(id: &str) -> PlayerRecord {
    PlayerRecord {
        player_id: id.to_string(),
        full_name: format!("Player {id}"),
        ..PlayerRecord::default()
    }
}

fn origin(id: &str, nationality: &str, youth_country: &str) -> PlayerRecord {
    PlayerRecord {
        nationality: Some(nationality.to_string()),
        youth_club_country: Some(youth_country.to_string()),
        ..player(id)
    }
}

fn at_club(id: &str, club: &str, age: u32, value: f64) -> PlayerRecord {
    PlayerRecord {
        youth_club: Some(club.to_string()),
        age: Some(age),
        market_value: value,
        ..player(id)
    }
}

fn names(rows: &[AggregationRow]) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

const SCENARIO: &str = "\
player_id,full_name,current_club,competition,youth_club,youth_club_country,nationality,position,date_of_birth,latest_market_value,latest_transfer_date,latest_fee,age,dominant_foot,youth_club_cleaned
P1,Alice,ClubA,League,YouthX,Brazil,Brazil,Forward,2004-01-01,€2m,,,20,right,
P2,Bob,ClubB,League,YouthY,Spain,Argentina,Midfield,2007-01-01,1.5m,,,17,left,
P3,Carol,ClubC,League,Not found,Not found,Brazil,Defender,1994-01-01,0,,,30,right,
";

#[test]
fn three_row_scenario_end_to_end() {
    let outcome = load_text(SCENARIO, CountryNormalizer::builtin()).expect("scenario loads");
    let repo = outcome.repository;
    assert_eq!(repo.total_players(), 3);
    assert_eq!(repo.players_with_youth_club(), 2);
    assert_eq!(repo.market_value_sum(), 3_500_000.0);

    let migration = talent_migration_patterns(repo.records());
    assert_eq!(names(&migration), ["Brazil", "Argentina", "Spain"]);
    assert_eq!(
        migration[0].detail,
        RowDetail::Migration {
            from: 1,
            to: 0,
            net: 1
        }
    );
    assert_eq!(
        migration[1].detail,
        RowDetail::Migration {
            from: 1,
            to: 0,
            net: -1
        }
    );
    assert_eq!(
        migration[2].detail,
        RowDetail::Migration {
            from: 0,
            to: 1,
            net: 1
        }
    );

    // Alice is 20, which sits in the 19..=21 bracket.
    let pipeline = talent_pipeline_strength(repo.records());
    let counts: Vec<(&str, usize)> = pipeline
        .iter()
        .map(|r| (r.name.as_str(), r.players))
        .collect();
    assert_eq!(
        counts,
        [("U18", 1), ("U21", 1), ("U30", 1), ("U25", 0), ("30+", 0)]
    );
}

#[test]
fn pipeline_ties_keep_bracket_order() {
    let records: Vec<PlayerRecord> = [10, 19, 22, 26, 31]
        .into_iter()
        .enumerate()
        .map(|(i, age)| PlayerRecord {
            age: Some(age),
            ..player(&format!("a{i}"))
        })
        .collect();
    let rows = talent_pipeline_strength(&records);
    assert_eq!(names(&rows), ["U18", "U21", "U25", "U30", "30+"]);
    assert!(rows.iter().all(|r| r.value == 1.0 && approx(r.percentage, 20.0)));
}

#[test]
fn pipeline_is_empty_without_records() {
    assert!(talent_pipeline_strength(&[]).is_empty());
}

#[test]
fn cross_border_requires_five_records() {
    let mut records = Vec::new();
    for i in 0..4 {
        records.push(origin(&format!("g{i}"), "Ghana", "England"));
    }
    for i in 0..4 {
        records.push(origin(&format!("f{i}"), "France", "France"));
    }
    records.push(origin("f9", "France", "Belgium"));

    let rows = cross_border_development(&records);
    assert_eq!(names(&rows), ["France"]);
    assert_eq!(rows[0].value, 1.0);
    assert!(approx(rows[0].score, 0.2));
    assert_eq!(rows[0].players, 5);
}

#[test]
fn retention_counts_home_trained_players() {
    let mut records = Vec::new();
    for i in 0..3 {
        records.push(origin(&format!("s{i}"), "Spain", "Spain"));
    }
    for i in 0..2 {
        records.push(origin(&format!("x{i}"), "Spain", "England"));
    }
    // Four fully retained Italians stay one short of the minimum.
    for i in 0..4 {
        records.push(origin(&format!("i{i}"), "Italy", "Italy"));
    }
    let rows = talent_retention_rate(&records);
    assert_eq!(names(&rows), ["Spain"]);
    assert_eq!(rows[0].value, 3.0);
    assert!(approx(rows[0].score, 60.0));
    assert!(approx(rows[0].percentage, 3.0 / 9.0 * 100.0));
}

#[test]
fn retention_keeps_only_top_ten_countries() {
    let mut records = Vec::new();
    for country in 0..12 {
        let nationality = format!("C{country:02}");
        for i in 0..12 {
            let youth_country = if i < country { nationality.as_str() } else { "Abroad" };
            records.push(origin(&format!("{nationality}-{i}"), &nationality, youth_country));
        }
    }
    let rows = talent_retention_rate(&records);
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].name, "C11");
    assert_eq!(rows[9].name, "C02");
    assert!(rows.iter().all(|r| r.name != "C01" && r.name != "C00"));
}

#[test]
fn value_prediction_drops_countries_below_five_valued_players() {
    let mut records = Vec::new();
    for i in 0..5 {
        records.push(PlayerRecord {
            market_value: 1_000_000.0,
            ..origin(&format!("n{i}"), "Netherlands", "Netherlands")
        });
    }
    for i in 0..4 {
        records.push(PlayerRecord {
            market_value: 90_000_000.0,
            ..origin(&format!("b{i}"), "Belgium", "Belgium")
        });
    }
    records.push(origin("b-free", "Belgium", "Belgium"));

    let rows = market_value_prediction(&records);
    assert_eq!(names(&rows), ["Netherlands"]);
}

#[test]
fn export_import_needs_three_moves() {
    let records = vec![
        origin("1", "Morocco", "France"),
        origin("2", "Morocco", "Spain"),
        origin("3", "Algeria", "France"),
        origin("4", "Senegal", "France"),
        origin("5", "Spain", "Spain"),
    ];
    let rows = talent_export_import_ratio(&records);
    assert_eq!(names(&rows), ["France"]);
    assert_eq!(
        rows[0].detail,
        RowDetail::Trade {
            exported: 0,
            imported: 3
        }
    );
    assert!(approx(rows[0].score, 3.0));
}

#[test]
fn regions_group_density_and_centers() {
    let records = vec![
        PlayerRecord {
            youth_club: Some("Santos".to_string()),
            ..origin("1", "Brazil", "Brazil")
        },
        PlayerRecord {
            youth_club: Some("Flamengo".to_string()),
            ..origin("2", "Brazil", "Brazil")
        },
        PlayerRecord {
            youth_club: Some("River Plate".to_string()),
            ..origin("3", "Argentina", "Argentina")
        },
        PlayerRecord {
            youth_club: Some("Reykjavik".to_string()),
            ..origin("4", "Iceland", "Iceland")
        },
    ];
    let density = geographic_talent_density(&records);
    assert_eq!(names(&density), ["South America", "Other"]);
    assert!(approx(density[0].score, 1.5));

    let centers = regional_development_centers(&records);
    assert_eq!(names(&centers), ["South America", "Other"]);
    assert_eq!(centers[0].value, 3.0);
    assert!(approx(centers[0].score, 1.5));
}

#[test]
fn every_region_fits_under_the_region_cut() {
    let countries = [
        "Brazil",
        "Spain",
        "United States",
        "Japan",
        "Australia",
        "Nigeria",
        "Iceland",
    ];
    let mut records = Vec::new();
    for (idx, country) in countries.iter().enumerate() {
        for i in 0..(countries.len() - idx) {
            records.push(PlayerRecord {
                youth_club: Some(format!("{country} Academy {i}")),
                ..origin(&format!("{country}-{i}"), country, country)
            });
        }
    }

    let centers = regional_development_centers(&records);
    assert_eq!(
        names(&centers),
        [
            "South America",
            "Europe",
            "North America",
            "Asia",
            "Oceania",
            "Africa",
            "Other"
        ]
    );
    assert_eq!(centers[6].value, 1.0);
    assert_eq!(geographic_talent_density(&records).len(), 7);
}

#[test]
fn youth_index_keeps_only_top_ten_countries() {
    let records: Vec<PlayerRecord> = (0..12)
        .map(|i| PlayerRecord {
            market_value: (i as f64 + 1.0) * 1_000_000.0,
            ..origin(&format!("{i}"), "Spain", &format!("Land {i:02}"))
        })
        .collect();
    let rows = youth_development_index(&records);
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].name, "Land 11");
    assert_eq!(rows[9].name, "Land 02");
}

#[test]
fn youth_index_is_capped_and_rounded() {
    let records = vec![
        PlayerRecord {
            youth_club: Some("La Masia".to_string()),
            age: Some(18),
            market_value: 200_000_000.0,
            ..origin("1", "Spain", "Spain")
        },
        PlayerRecord {
            youth_club: Some("Clairefontaine".to_string()),
            age: Some(24),
            market_value: 1_000_000.0,
            ..origin("2", "France", "France")
        },
    ];
    let rows = youth_development_index(&records);
    assert_eq!(names(&rows), ["Spain", "France"]);
    assert_eq!(rows[0].value, 100.0);
    // 50 + 10 + 2 + 1
    assert!(approx(rows[1].score, 63.0));
}

#[test]
fn club_metrics_skip_placeholder_clubs_and_prefer_cleaned_names() {
    let records = vec![
        at_club("1", "Ajax (U19)", 19, 5_000_000.0),
        PlayerRecord {
            youth_club_cleaned: Some("Ajax".to_string()),
            ..at_club("2", "AFC Ajax Youth", 20, 4_000_000.0)
        },
        at_club("3", "Ajax", 22, 0.0),
    ];
    let rows = club_development_score(&records);
    assert_eq!(names(&rows), ["Ajax"]);
    assert_eq!(rows[0].players, 2);
}

#[test]
fn efficiency_and_success_follow_support_thresholds() {
    let records = vec![
        at_club("1", "Santos", 20, 10_000_000.0),
        at_club("2", "Santos", 20, 20_000_000.0),
        at_club("3", "Santos", 20, 30_000_000.0),
        at_club("4", "Gremio", 25, 8_000_000.0),
        at_club("5", "Gremio", 25, 2_000_000.0),
    ];
    let efficiency = development_efficiency(&records);
    assert_eq!(names(&efficiency), ["Santos"]);
    assert!(approx(efficiency[0].score, 20_000_000.0 / 20.0 * 100.0));

    let success = club_success_correlation(&records);
    assert_eq!(names(&success), ["Santos", "Gremio"]);
    assert_eq!(success[1].value, 5_000_000.0);
    assert!(approx(success[1].score, 5_000_000.0 * 2f64.ln()));
}

#[test]
fn bracket_value_metrics_ignore_unknown_age_and_value() {
    let records = vec![
        PlayerRecord {
            age: Some(17),
            market_value: 9_000_000.0,
            ..player("1")
        },
        PlayerRecord {
            age: Some(17),
            market_value: 3_000_000.0,
            ..player("2")
        },
        PlayerRecord {
            age: Some(28),
            market_value: 0.0,
            ..player("3")
        },
        PlayerRecord {
            age: None,
            market_value: 50_000_000.0,
            ..player("4")
        },
    ];
    let ratio = age_to_value_ratio(&records);
    assert_eq!(names(&ratio), ["U18"]);
    assert!(approx(ratio[0].score, 6_000_000.0 / 18.0));

    let trajectory = development_trajectory(&records);
    assert_eq!(trajectory[0].value, 2.0);
    assert!(approx(trajectory[0].score, 18_000_000.0));
}

#[test]
fn future_stars_count_unknown_age_as_zero() {
    assert!(is_young_star(&at_club("1", "X", 25, 1_000_000.0)));
    assert!(!is_young_star(&at_club("2", "X", 26, 5_000_000.0)));
    assert!(is_young_star(&PlayerRecord {
        market_value: 5_000_000.0,
        ..player("3")
    }));

    let csv = "\
player_id,full_name,youth_club,youth_club_country,nationality,age,latest_market_value
b1,Rui,Benfica,Portugal,Portugal,,2m
b2,Joao,Benfica,Portugal,Portugal,0,2m
b3,Tiago,Benfica,Portugal,Portugal,20,500k
p1,Vitor,Porto,Portugal,Portugal,19,40m
";
    let outcome = load_text(csv, CountryNormalizer::builtin()).expect("csv loads");
    let rows = future_star_potential(outcome.repository.records());
    assert_eq!(names(&rows), ["Benfica"]);
    assert_eq!(rows[0].detail, RowDetail::YoungStars { young_stars: 2 });
    assert_eq!(rows[0].value, 66.67);
    assert!(approx(rows[0].percentage, 50.0));
}

#[test]
fn value_prediction_and_scouting() {
    let mut records = Vec::new();
    for i in 0..5 {
        records.push(PlayerRecord {
            market_value: 2_000_000.0,
            youth_club: Some("Lyon".to_string()),
            ..origin(&format!("f{i}"), if i % 2 == 0 { "France" } else { "Mali" }, "France")
        });
    }
    records.push(PlayerRecord {
        market_value: 0.0,
        ..origin("z", "France", "France")
    });

    let prediction = market_value_prediction(&records);
    assert_eq!(names(&prediction), ["France"]);
    assert_eq!(prediction[0].players, 5);
    assert!(approx(prediction[0].score, 2_000_000.0 * 1.05));

    let scouting = talent_scouting_score(&records);
    assert_eq!(names(&scouting), ["Lyon"]);
    assert_eq!(scouting[0].value, 2.0);
    assert!(approx(scouting[0].score, 2.0 * 5f64.ln() * 10.0));
}
