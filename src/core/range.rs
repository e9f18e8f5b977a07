use crate::models::ParsedRange;

/// Currency unit stripped from range text before number extraction
const CURRENCY_TOKEN: &str = "naira";

/// Phrases that turn a range string into a one-sided bound
///
/// Matched as case-insensitive substrings of the normalized text. Earlier
/// entries take precedence.
const KEYWORDS: [(RangeKeyword, &[&str]); 2] = [
    (RangeKeyword::LowerBound, &["greater than", "greater"]),
    (RangeKeyword::UpperBound, &["less than", "less"]),
];

/// One-sided range phrasing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKeyword {
    /// "Greater than N": bounded below, open above
    LowerBound,
    /// "Less than N": bounded above, open below
    UpperBound,
}

impl RangeKeyword {
    /// Find the first keyword present in already-normalized text
    pub fn detect(normalized: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|p| normalized.contains(p)))
            .map(|(keyword, _)| *keyword)
    }
}

/// Parse a human-entered range such as `"100,000 - 300,000 naira"`
///
/// Never fails: text that cannot be interpreted yields an unbounded range
/// and a warning.
///
/// # Examples
/// * `"Greater than 2,000,000 naira"` -> `(2000000, None)`
/// * `"Less than 50,000"` -> `(None, 50000)`
/// * `"300,000 - 100,000"` -> `(100000, 300000)`
/// * `"70,000 naira"` -> `(70000, 70000)`
pub fn parse_range(text: Option<&str>) -> ParsedRange {
    let raw = match text {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return ParsedRange::UNBOUNDED,
    };

    let normalized = normalize_range_text(raw);
    let numbers = extract_numbers(&normalized);

    match RangeKeyword::detect(&normalized) {
        Some(RangeKeyword::LowerBound) => return ParsedRange::new(numbers.first().copied(), None),
        Some(RangeKeyword::UpperBound) => return ParsedRange::new(None, numbers.first().copied()),
        None => {}
    }

    match numbers.as_slice() {
        [a, b] if normalized.contains('-') => ParsedRange::new(Some(*a.min(b)), Some(*a.max(b))),
        [n] => ParsedRange::exact(*n),
        _ => {
            tracing::warn!("Could not parse range string '{}', treating as unbounded", raw);
            ParsedRange::UNBOUNDED
        }
    }
}

/// Lowercase, drop thousands separators and the currency token, trim
fn normalize_range_text(raw: &str) -> String {
    raw.to_lowercase()
        .replace(',', "")
        .replace(CURRENCY_TOKEN, "")
        .trim()
        .to_string()
}

/// All maximal ASCII digit runs, in order of appearance
///
/// Runs too large for an `i64` are skipped.
fn extract_numbers(text: &str) -> Vec<i64> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse::<i64>().ok())
        .collect()
}
