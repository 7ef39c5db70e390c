use std::fs;
use std::path::PathBuf;

use youth_pipeline::country::CountryNormalizer;
use youth_pipeline::error::{ErrorKind, PARSE_FAILURE_MESSAGE};
use youth_pipeline::ingest::{normalize_rows, parse_players_csv};
use youth_pipeline::player::parse_market_value;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_players_fixture() {
    let raw = read_fixture("players.csv");
    let parsed = parse_players_csv(&raw).expect("fixture should parse");
    assert_eq!(parsed.rows.len(), 7);
    assert_eq!(parsed.warnings.len(), 1);
    assert!(parsed.warnings[0].message.contains("expected 15 fields"));

    assert_eq!(parsed.rows[0].player_id, "p1");
    assert_eq!(parsed.rows[2].full_name, "Musiala, Jamal");
    let last = parsed.rows.last().expect("rows");
    assert_eq!(last.full_name, "Multi\nLine");
    assert_eq!(last.date_of_birth, "Mar 5, 2001");
}

#[test]
fn normalizes_fixture_rows() {
    let raw = read_fixture("players.csv");
    let parsed = parse_players_csv(&raw).expect("fixture should parse");
    let normalized = normalize_rows(parsed.rows, CountryNormalizer::builtin());
    assert_eq!(normalized.excluded, 1);
    assert_eq!(normalized.records.len(), 6);
    assert!(normalized.records.iter().all(|p| !p.player_id.is_empty()));

    let countries: Vec<Option<&str>> = normalized
        .records
        .iter()
        .map(|p| p.youth_club_country.as_deref())
        .collect();
    assert_eq!(
        countries,
        vec![
            Some("Spain"),
            Some("Brazil"),
            Some("England"),
            None,
            Some("Spain"),
            Some("Netherlands"),
        ]
    );

    let keeper = &normalized.records[3];
    assert_eq!(keeper.age, None);
    assert_eq!(keeper.date_of_birth, None);
    assert!(!keeper.has_real_youth_club());
    assert_eq!(keeper.market_value, 500_000.0);

    let ajax = &normalized.records[5];
    assert_eq!(
        ajax.date_of_birth.map(|d| d.to_string()).as_deref(),
        Some("2001-03-05")
    );
    assert_eq!(ajax.development_club(), Some("Ajax Youth"));
    assert_eq!(normalized.records[0].development_club(), Some("La Masia"));
}

#[test]
fn empty_payload_is_parse_failure() {
    for raw in ["", "   \n  \n"] {
        let err = parse_players_csv(raw).expect_err("empty payload must fail");
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
        assert_eq!(err.to_string(), PARSE_FAILURE_MESSAGE);
    }
}

#[test]
fn header_only_payload_has_no_rows() {
    let parsed = parse_players_csv("player_id,full_name\n").expect("header only parses");
    assert!(parsed.rows.is_empty());
    assert!(parsed.warnings.is_empty());
}

#[test]
fn missing_and_unknown_columns_are_tolerated() {
    let raw = "full_name,player_id,shirt_number\nAna,a1,10\n";
    let parsed = parse_players_csv(raw).expect("subset header parses");
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].player_id, "a1");
    assert_eq!(parsed.rows[0].full_name, "Ana");
    assert_eq!(parsed.rows[0].youth_club, "");
}

#[test]
fn whitespace_only_lines_are_skipped_silently() {
    let raw = "player_id,full_name\na1,Ana\n  ,  \nb2,Bea\n";
    let parsed = parse_players_csv(raw).expect("parses");
    assert_eq!(parsed.rows.len(), 2);
    assert!(parsed.warnings.is_empty());
}

#[test]
fn market_value_examples() {
    assert_eq!(parse_market_value("€1.2m"), 1_200_000.0);
    assert_eq!(parse_market_value("150k"), 150_000.0);
    assert_eq!(parse_market_value("150000"), 150_000.0);
    assert_eq!(parse_market_value(""), 0.0);
    assert_eq!(parse_market_value("garbage"), 0.0);
}

#[test]
fn market_value_suffix_and_separator_handling() {
    assert_eq!(parse_market_value("€2M"), 2_000_000.0);
    assert_eq!(parse_market_value("$750K"), 750_000.0);
    assert_eq!(parse_market_value("1,500,000"), 1_500_000.0);
    assert_eq!(parse_market_value("-"), 0.0);
    assert_eq!(parse_market_value("-5m"), 0.0);
    assert_eq!(parse_market_value("Not found"), 0.0);
}
