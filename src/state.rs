use std::collections::VecDeque;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::country::CountryNormalizer;
use crate::error::{LoadError, Result};
use crate::http_client;
use crate::ingest::{self, ParseIssue};
use crate::repository::PlayerRepository;

const MAX_LOGS: usize = 200;

/// Where the player CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` prefixes select a URL, everything else is a path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::File(PathBuf::from(trimmed))
        }
    }

    pub fn fetch(&self, timeout_secs: u64) -> Result<String> {
        let bytes = match self {
            DataSource::File(path) => fs::read(path).map_err(|err| {
                LoadError::Fetch(format!("failed to read {}: {err}", path.display()))
            })?,
            DataSource::Url(url) => http_client::fetch_bytes(url, timeout_secs)
                .map_err(|err| LoadError::Fetch(format!("{err:#}")))?,
        };
        String::from_utf8(bytes).map_err(|err| LoadError::parse(format!("payload is not utf-8: {err}")))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Everything one successful load produced.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub repository: PlayerRepository,
    pub warnings: Vec<ParseIssue>,
    pub excluded_rows: usize,
}

/// Parse and normalize an in-memory payload.
pub fn load_text(raw: &str, countries: &CountryNormalizer) -> Result<LoadOutcome> {
    let parsed = ingest::parse_players_csv(raw)?;
    let normalized = ingest::normalize_rows(parsed.rows, countries);
    Ok(LoadOutcome {
        repository: PlayerRepository::new(normalized.records),
        warnings: parsed.warnings,
        excluded_rows: normalized.excluded,
    })
}

/// Fetch, parse and normalize one source with the built-in country table.
pub fn load_from(source: &DataSource, cfg: &Config) -> Result<LoadOutcome> {
    let raw = source.fetch(cfg.request_timeout_secs)?;
    load_text(&raw, CountryNormalizer::builtin())
}

#[derive(Debug)]
pub struct DataState {
    pub loading: bool,
    pub error: Option<LoadError>,
    pub repository: PlayerRepository,
    pub warnings: Vec<ParseIssue>,
    pub excluded_rows: usize,
    pub logs: VecDeque<String>,
}

impl Default for DataState {
    fn default() -> Self {
        Self::new()
    }
}

impl DataState {
    pub fn new() -> Self {
        Self {
            loading: true,
            error: None,
            repository: PlayerRepository::empty(),
            warnings: Vec::new(),
            excluded_rows: 0,
            logs: VecDeque::new(),
        }
    }

    pub fn begin_load(&mut self, source: &DataSource) {
        self.loading = true;
        self.error = None;
        self.push_log(format!("[INFO] Loading players from {source}"));
    }

    pub fn finish_load(&mut self, result: Result<LoadOutcome>) {
        self.loading = false;
        match result {
            Ok(outcome) => {
                info!(
                    records = outcome.repository.len(),
                    players = outcome.repository.total_players(),
                    warnings = outcome.warnings.len(),
                    excluded = outcome.excluded_rows,
                    "player data loaded"
                );
                self.push_log(format!(
                    "[INFO] Loaded {} records ({} skipped, {} excluded)",
                    outcome.repository.len(),
                    outcome.warnings.len(),
                    outcome.excluded_rows
                ));
                self.error = None;
                self.repository = outcome.repository;
                self.warnings = outcome.warnings;
                self.excluded_rows = outcome.excluded_rows;
            }
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "player data load failed");
                self.push_log(format!("[ERROR] {err}"));
                self.repository = PlayerRepository::empty();
                self.warnings.clear();
                self.excluded_rows = 0;
                self.error = Some(err);
            }
        }
    }

    /// Runs a whole load cycle against `source`.
    pub fn reload(&mut self, source: &DataSource, cfg: &Config) {
        self.begin_load(source);
        let result = load_from(source, cfg);
        self.finish_load(result);
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}
