use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const NOT_FOUND: &str = "Not found";

/// One CSV row exactly as it appears in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRow {
    pub player_id: String,
    pub full_name: String,
    pub current_club: String,
    pub competition: String,
    pub youth_club: String,
    pub youth_club_country: String,
    pub nationality: String,
    pub position: String,
    pub date_of_birth: String,
    pub latest_market_value: String,
    pub latest_transfer_date: String,
    pub latest_fee: String,
    pub age: String,
    pub dominant_foot: String,
    pub youth_club_cleaned: String,
}

/// A validated player. Sentinel and empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_id: String,
    pub full_name: String,
    pub current_club: Option<String>,
    pub competition: Option<String>,
    pub youth_club: Option<String>,
    pub youth_club_cleaned: Option<String>,
    pub youth_club_country: Option<String>,
    pub nationality: Option<String>,
    pub position: Option<String>,
    pub dominant_foot: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<u32>,
    pub latest_market_value: Option<String>,
    pub market_value: f64,
    pub latest_transfer_date: Option<String>,
    pub latest_fee: Option<String>,
}

impl PlayerRecord {
    /// Youth club usable for club groupings: present and not a `)` placeholder.
    pub fn has_real_youth_club(&self) -> bool {
        self.youth_club.as_deref().is_some_and(|club| !club.contains(')'))
    }

    /// Group name for club-based metrics; the cleaned variant wins when present.
    pub fn development_club(&self) -> Option<&str> {
        if !self.has_real_youth_club() {
            return None;
        }
        self.youth_club_cleaned
            .as_deref()
            .or(self.youth_club.as_deref())
    }

    pub fn age_or_zero(&self) -> u32 {
        self.age.unwrap_or(0)
    }

    /// Nationality and youth country, only when both are known.
    pub fn origin_pair(&self) -> Option<(&str, &str)> {
        let nationality = self.nationality.as_deref()?;
        let youth_country = self.youth_club_country.as_deref()?;
        Some((nationality, youth_country))
    }
}

pub fn present(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NOT_FOUND {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Total market value parser: "€1.2m", "150k", "1,000,000". Garbage reads as 0.
pub fn parse_market_value(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '€' | '$' | ','))
        .collect();

    let (body, multiplier) = if let Some(idx) = cleaned.find(['m', 'M']) {
        (remove_char_at(&cleaned, idx), 1_000_000.0)
    } else if let Some(idx) = cleaned.find(['k', 'K']) {
        (remove_char_at(&cleaned, idx), 1_000.0)
    } else {
        (cleaned, 1.0)
    };

    let Some(number) = parse_float_prefix(&body) else {
        return 0.0;
    };
    let value = number * multiplier;
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn remove_char_at(s: &str, idx: usize) -> String {
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..idx]);
    // 'm'/'k' are single-byte
    out.push_str(&s[idx + 1..]);
    out
}

/// Longest leading float literal, after leading whitespace.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0usize;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok()
}

/// Leading integer of the age cell; 0 and garbage are unknown.
pub fn parse_age(raw: &str) -> Option<u32> {
    let s = raw.trim_start();
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(age) => Some(age),
    }
}

pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("n/a") || s == NOT_FOUND {
        return None;
    }
    ["%Y-%m-%d", "%d/%m/%Y", "%b %d, %Y", "%d.%m.%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
