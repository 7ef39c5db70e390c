use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use youth_pipeline::config::Config;
use youth_pipeline::dashboard::{self, DashboardReport, Metric, MetricTable, Page};
use youth_pipeline::export;
use youth_pipeline::flags::flag_for_country;
use youth_pipeline::metrics::RowDetail;
use youth_pipeline::players::{
    PAGE_SIZE, PlayerQuery, display_birth_date, display_market_value, paginate, truncate_name,
    unique_positions,
};
use youth_pipeline::repository::Summary;
use youth_pipeline::state::{DataSource, DataState};

const VALUE_FLAGS: &[&str] = &["--page", "--xlsx", "--search", "--position", "--page-num"];

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = Config::from_env();
    let source = DataSource::parse(
        &positional_arg(&args).unwrap_or_else(|| cfg.data_source.clone()),
    );

    let mut state = DataState::new();
    state.reload(&source, &cfg);
    if let Some(err) = state.error.as_ref() {
        return Err(anyhow!("loading {source}: {err}"));
    }

    if has_flag(&args, "--players") {
        print_players(&state, &args);
        return Ok(());
    }

    let metrics = match string_arg(&args, "--page") {
        Some(name) => {
            let page = Page::from_name(&name).ok_or_else(|| anyhow!("unknown page: {name}"))?;
            page.metrics().collect::<Vec<_>>()
        }
        None => Metric::ALL.to_vec(),
    };
    let report = dashboard::build_report_for(&state.repository, &metrics, &cfg);

    if let Some(path) = string_arg(&args, "--xlsx").map(PathBuf::from) {
        let summary = export::export_report_xlsx(&path, &report, state.repository.records())?;
        println!(
            "Wrote {} ({} sheets, {} metric rows, {} players)",
            path.display(),
            summary.sheets,
            summary.metric_rows,
            summary.players
        );
        return Ok(());
    }

    if has_flag(&args, "--json") {
        let json = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{json}");
        return Ok(());
    }

    print_report(&report, &state);
    Ok(())
}

fn print_report(report: &DashboardReport, state: &DataState) {
    print_summary(&report.summary);
    if !state.warnings.is_empty() || state.excluded_rows > 0 {
        println!(
            "Skipped rows: {}  Excluded rows: {}",
            state.warnings.len(),
            state.excluded_rows
        );
    }
    let mut current_page = None;
    for table in &report.metrics {
        if current_page != Some(table.page) {
            current_page = Some(table.page);
            println!();
            println!("== {} ==", table.page.label());
        }
        print_table(table);
    }
}

fn print_summary(summary: &Summary) {
    println!("Total players: {}", summary.total_players);
    println!(
        "With youth club: {} ({:.1}%)",
        summary.players_with_youth_club, summary.youth_club_percentage
    );
    println!("Youth club countries: {}", summary.youth_club_countries);
    println!("Total market value: {}", format_money(summary.market_value_sum));
}

fn print_table(table: &MetricTable) {
    println!();
    println!("{}", table.title);
    if table.rows.is_empty() {
        println!("  (no groups)");
        return;
    }
    let width = if table.metric.groups_by_club() { 25 } else { 20 };
    for (idx, row) in table.rows.iter().enumerate() {
        let flag = flag_for_country(&row.name);
        let name = truncate_name(&row.name, width);
        let mut line = format!(
            "{:>2}. {:<w$} value={:<12} pct={:>6.2}% score={:<10.2} n={}",
            idx + 1,
            name,
            row.value,
            row.percentage,
            row.score,
            row.players,
            w = width + 3
        );
        match row.detail {
            RowDetail::None => {}
            RowDetail::Migration { from, to, net } => {
                line.push_str(&format!(" from={from} to={to} net={net}"));
            }
            RowDetail::Trade { exported, imported } => {
                line.push_str(&format!(" out={exported} in={imported}"));
            }
            RowDetail::YoungStars { young_stars } => {
                line.push_str(&format!(" young_stars={young_stars}"));
            }
        }
        if !flag.is_empty() {
            line.push(' ');
            line.push_str(&flag);
        }
        println!("{line}");
    }
}

fn print_players(state: &DataState, args: &[String]) {
    let query = PlayerQuery {
        search: string_arg(args, "--search").unwrap_or_default(),
        position: string_arg(args, "--position"),
    };
    let records = state.repository.records();
    let matches = query.apply(records);
    let page_num = usize_arg(args, "--page-num").unwrap_or(1);
    let page = paginate(&matches, page_num, PAGE_SIZE);

    println!(
        "Players {} of {} (page {}/{})",
        page.items.len(),
        page.total_items,
        page.page,
        page.total_pages
    );
    println!("Positions: {}", unique_positions(records).join(", "));
    for p in page.items {
        println!(
            "{:<28} {:<25} {:<20} {:<12} {:<10} {}",
            truncate_name(&p.full_name, 25),
            truncate_name(p.current_club.as_deref().unwrap_or("-"), 22),
            truncate_name(p.nationality.as_deref().unwrap_or("-"), 17),
            p.position.as_deref().unwrap_or("-"),
            display_birth_date(p),
            display_market_value(p)
        );
    }
}

fn format_money(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("€{:.2}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("€{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("€{:.0}K", value / 1_000.0)
    } else {
        format!("€{value:.0}")
    }
}

fn positional_arg(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        let trimmed = arg.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    None
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}

fn string_arg(args: &[String], name: &str) -> Option<String> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&format!("{name}=")) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

fn usize_arg(args: &[String], name: &str) -> Option<usize> {
    string_arg(args, name).and_then(|raw| raw.parse::<usize>().ok())
}
