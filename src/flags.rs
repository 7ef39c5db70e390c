use std::collections::HashMap;

use celes::Country;
use once_cell::sync::Lazy;

/// Dataset spellings that the ISO registry does not know.
const FLAG_REPLACEMENTS: &[(&str, &str)] = &[
    ("Korea, South", "South Korea"),
    ("Korea, North", "North Korea"),
    ("Bosnia-Herzegovina", "Bosnia and Herzegovina"),
    ("Congo, DR", "Congo, The Democratic Republic of the"),
    ("Congo DR", "Congo, The Democratic Republic of the"),
    ("Czech Republic", "Czechia"),
    ("USA", "United States"),
    ("UK", "United Kingdom"),
];

static CODES_BY_NAME: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    Country::get_countries()
        .iter()
        .map(|country| (lookup_key(country.long_name), country.alpha2))
        .collect()
});

/// Regional-indicator emoji for a country name, or `""` when the name is not recognized.
///
/// Lookup goes through the `celes` ISO 3166-1 registry: long names first, then its aliases.
pub fn flag_for_country(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let normalized = FLAG_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == trimmed)
        .map(|(_, to)| *to)
        .unwrap_or(trimmed);

    let mut code = alpha2_code(normalized);
    if code.is_none() && normalized.contains('-') {
        code = alpha2_code(&normalized.replacen('-', " ", 1));
    }
    if code.is_none() && normalized.contains(',') {
        code = alpha2_code(&swap_comma_name(normalized));
    }
    code.map(code_to_flag).unwrap_or_default()
}

pub fn alpha2_code(name: &str) -> Option<&'static str> {
    let key = lookup_key(name);
    if key.is_empty() {
        return None;
    }
    if let Some(code) = CODES_BY_NAME
        .get(&key)
        .or_else(|| CODES_BY_NAME.get(&format!("the{key}")))
        .copied()
    {
        return Some(code);
    }
    Country::from_alias(name.trim())
        .or_else(|_| Country::from_alias(&key))
        .ok()
        .map(|country| country.alpha2)
}

// Registry names are compared without case, spacing or punctuation.
fn lookup_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// `"Congo, The Democratic Republic of the"` -> `"The Democratic Republic of the Congo"`.
fn swap_comma_name(name: &str) -> String {
    let mut parts = name.split(',');
    let head = parts.next().unwrap_or_default();
    let mut swapped: Vec<&str> = parts.collect();
    swapped.push(head);
    swapped.join(" ").trim().to_string()
}

fn code_to_flag(code: &str) -> String {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return String::new();
    }
    code.to_ascii_uppercase()
        .bytes()
        .filter_map(|b| char::from_u32(0x1F1E6 + u32::from(b - b'A')))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_names_are_reordered() {
        assert_eq!(swap_comma_name("Korea, South"), "South Korea");
        assert_eq!(
            swap_comma_name("Congo, The Democratic Republic of the"),
            "The Democratic Republic of the Congo"
        );
    }

    #[test]
    fn lookup_keys_ignore_case_and_punctuation() {
        assert_eq!(lookup_key("Bosnia and Herzegovina"), "bosniaandherzegovina");
        assert_eq!(lookup_key("Guinea-Bissau"), "guineabissau");
        assert_eq!(lookup_key(" - "), "");
    }

    #[test]
    fn registry_long_names_resolve() {
        assert_eq!(alpha2_code("spain"), Some("ES"));
        assert_eq!(alpha2_code("SIERRA LEONE"), Some("SL"));
        assert_eq!(alpha2_code("Atlantis"), None);
        assert_eq!(alpha2_code(""), None);
    }

    #[test]
    fn codes_become_regional_indicators() {
        assert_eq!(code_to_flag("fr"), "\u{1F1EB}\u{1F1F7}");
        assert_eq!(code_to_flag("F"), "");
        assert_eq!(code_to_flag("1A"), "");
    }
}
