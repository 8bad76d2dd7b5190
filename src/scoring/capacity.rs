use once_cell::sync::Lazy;
use regex::Regex;

/// Capacity assumed when nothing is known about a venue.
pub const DEFAULT_CAPACITY: u32 = 1000;

/// Known Nashville venues, checked in order.
const KNOWN_VENUES: &[(&str, u32)] = &[
    ("bridgestone arena", 20000),
    ("nissan stadium", 69143),
    ("ryman auditorium", 2362),
    ("grand ole opry", 4372),
    ("marathon music works", 1800),
    ("the fillmore", 2300),
    ("ascend amphitheater", 6800),
    ("municipal auditorium", 9700),
    ("vanderbilt stadium", 40350),
    ("memorial gymnasium", 14316),
    ("first horizon park", 10000),
    ("cannery hall", 1000),
    ("war memorial", 2044),
    ("brooklyn bowl", 1200),
    ("basement east", 500),
    ("mercy lounge", 500),
    ("listening room", 350),
    ("bluebird cafe", 90),
    ("tootsies", 200),
    ("roberts western world", 150),
];

/// Keyword fallback; first match wins.
const KEYWORD_CAPACITIES: &[(&[&str], u32)] = &[
    (&["stadium"], 40000),
    (&["arena"], 15000),
    (&["amphitheater"], 8000),
    (&["auditorium"], 3000),
    (&["theater", "theatre"], 1500),
    (&["hall"], 2000),
    (&["club", "bar"], 300),
    (&["cafe"], 150),
];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

fn normalize_venue_name(name: &str) -> String {
    WHITESPACE.replace_all(name.trim(), " ").to_lowercase()
}

/// Estimates a venue's capacity from its name.
///
/// Known venues match by substring in either direction, so "The Bluebird Cafe"
/// and "bluebird cafe nashville" both resolve to the Bluebird's 90 seats.
/// Unknown venues fall back to a keyword heuristic, then to [`DEFAULT_CAPACITY`].
pub fn estimate_capacity(venue_name: Option<&str>) -> u32 {
    let Some(name) = venue_name else {
        return DEFAULT_CAPACITY;
    };
    if let Some(capacity) = known_capacity(name) {
        return capacity;
    }

    let venue = normalize_venue_name(name);
    KEYWORD_CAPACITIES
        .iter()
        .find(|(keywords, _)| !venue.is_empty() && keywords.iter().any(|k| venue.contains(k)))
        .map(|(_, capacity)| *capacity)
        .unwrap_or(DEFAULT_CAPACITY)
}

/// Known capacity from the table, without the keyword fallback.
pub fn known_capacity(venue_name: &str) -> Option<u32> {
    let venue = normalize_venue_name(venue_name);
    if venue.is_empty() {
        return None;
    }
    KNOWN_VENUES
        .iter()
        .find(|(known, _)| venue.contains(known) || known.contains(venue.as_str()))
        .map(|(_, capacity)| *capacity)
}
