use std::collections::HashMap;
use std::sync::OnceLock;

static TOWN_ALIASES: OnceLock<HashMap<String, &'static str>> = OnceLock::new();
static FLAT_TYPE_ALIASES: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

/// Lookup key: invisible characters stripped, whitespace collapsed, lowercase,
/// and spacing around `/` removed.
pub(crate) fn lookup_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace(" /", "/").replace("/ ", "/").to_ascii_lowercase()
}

/// Canonical town name used to join supply with demand statistics.
pub fn normalize_town(raw: &str) -> String {
    canonicalize(raw, town_aliases())
}

/// Canonical flat type. Legacy types that demand statistics fold into a
/// mainstream size are mapped onto it.
pub fn normalize_flat_type(raw: &str) -> String {
    canonicalize(raw, flat_type_aliases())
}

fn canonicalize(raw: &str, aliases: &HashMap<String, &'static str>) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    match aliases.get(&lookup_key(raw)) {
        Some(canonical) => (*canonical).to_string(),
        None => raw.to_string(),
    }
}

fn town_aliases() -> &'static HashMap<String, &'static str> {
    TOWN_ALIASES.get_or_init(|| {
        const ALIASES: &[(&str, &str)] = &[
            // Estates reported separately in listings, jointly in demand figures
            ("Bidadari", "Toa Payoh"),
            ("Potong Pasir", "Toa Payoh"),
            ("Toa Payoh", "Toa Payoh"),
            ("Kallang/Whampoa", "Kallang/Whampoa"),
            ("Kallang Whampoa", "Kallang/Whampoa"),
            ("Kallang-Whampoa", "Kallang/Whampoa"),
            ("Choa Chu Kang-Tengah", "Tengah"),
            ("Tengah", "Tengah"),
            ("Central Area", "Central"),
            ("Central", "Central"),
        ];
        build(ALIASES)
    })
}

fn flat_type_aliases() -> &'static HashMap<String, &'static str> {
    FLAT_TYPE_ALIASES.get_or_init(|| {
        const ALIASES: &[(&str, &str)] = &[
            ("3Gen", "5-Room"),
            ("3-Gen", "5-Room"),
            ("3Gen Flat", "5-Room"),
            ("Executive", "5-Room"),
            ("Executive Flat", "5-Room"),
        ];
        build(ALIASES)
    })
}

fn build(aliases: &[(&str, &'static str)]) -> HashMap<String, &'static str> {
    let mut map = HashMap::with_capacity(aliases.len());
    for (alias, canonical) in aliases {
        map.insert(lookup_key(alias), *canonical);
    }
    map
}
