use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::player::NOT_FOUND;

const YOUTH_COUNTRY_ALIASES: &[(&str, &str)] = &[
    ("brasil", "Brazil"),
    ("usa", "United States"),
    ("us", "United States"),
    ("united states of america", "United States"),
    ("uk", "United Kingdom"),
    ("great britain", "United Kingdom"),
    ("england", "England"),
    ("scotland", "Scotland"),
    ("wales", "Wales"),
    ("northern ireland", "Northern Ireland"),
    ("korea south", "South Korea"),
    ("korea, south", "South Korea"),
    ("south korea", "South Korea"),
    ("korea north", "North Korea"),
    ("korea, north", "North Korea"),
    ("north korea", "North Korea"),
    ("bosnia-herzegovina", "Bosnia and Herzegovina"),
    ("bosnia & herzegovina", "Bosnia and Herzegovina"),
    ("czech republic", "Czech Republic"),
    ("czechia", "Czech Republic"),
    ("russian federation", "Russia"),
    ("russian fed.", "Russia"),
    ("congo dr", "Democratic Republic of the Congo"),
    ("congo, dr", "Democratic Republic of the Congo"),
    ("dr congo", "Democratic Republic of the Congo"),
    ("ivory coast", "Côte d'Ivoire"),
    ("cape verde", "Cape Verde"),
    ("cape verde islands", "Cape Verde"),
];

static DEFAULT_NORMALIZER: Lazy<CountryNormalizer> =
    Lazy::new(|| CountryNormalizer::from_pairs(YOUTH_COUNTRY_ALIASES.iter().copied()));

/// Maps free-text youth-club countries to one canonical spelling.
#[derive(Debug, Clone)]
pub struct CountryNormalizer {
    aliases: HashMap<String, String>,
}

impl CountryNormalizer {
    /// Keys match case-insensitively. Every canonical value also maps to itself so a second
    /// pass never rewrites it.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut aliases: HashMap<String, String> = HashMap::new();
        let mut canonical: Vec<String> = Vec::new();
        for (alias, value) in pairs {
            aliases
                .entry(alias.trim().to_lowercase())
                .or_insert_with(|| value.to_string());
            canonical.push(value.to_string());
        }
        for value in canonical {
            aliases.entry(value.to_lowercase()).or_insert(value);
        }
        Self { aliases }
    }

    pub fn builtin() -> &'static CountryNormalizer {
        &DEFAULT_NORMALIZER
    }

    pub fn normalize(&self, country: &str) -> String {
        if country.trim().is_empty() || country == NOT_FOUND {
            return country.to_string();
        }
        let trimmed = country.trim();
        if let Some(canonical) = self.aliases.get(&trimmed.to_lowercase()) {
            return canonical.clone();
        }
        capitalize_first(trimmed)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for CountryNormalizer {
    fn default() -> Self {
        DEFAULT_NORMALIZER.clone()
    }
}

/// Normalize with the built-in alias table.
pub fn normalize_country(country: &str) -> String {
    DEFAULT_NORMALIZER.normalize(country)
}

// Only the first character is raised; "south africa" stays "South africa".
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let mut out = String::with_capacity(s.len());
    out.extend(upper.next());
    // Multi-char expansions (ß -> SS) keep a single capital.
    for extra in upper {
        out.extend(extra.to_lowercase());
    }
    out.push_str(&chars.as_str().to_lowercase());
    out
}
