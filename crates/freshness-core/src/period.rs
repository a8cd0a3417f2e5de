//! Page-level cache period keywords
//!
//! Content editors pick a cache period from a fixed list of labels. A label
//! that is not on the list means "no override".

use std::time::Duration;

/// Recognized period labels and the durations they stand for
pub const PERIOD_KEYWORDS: &[(&str, Duration)] = &[
    ("5 minutes", Duration::from_secs(5 * 60)),
    ("10 minutes", Duration::from_secs(10 * 60)),
    ("30 minutes", Duration::from_secs(30 * 60)),
    ("1 hour", Duration::from_secs(60 * 60)),
];

/// Parse a period label into a duration.
///
/// Matching is exact. Unrecognized or absent text yields [`Duration::ZERO`],
/// which callers treat as "use the default period".
#[must_use]
pub fn parse_period_keyword(text: Option<&str>) -> Duration {
    let Some(text) = text else {
        return Duration::ZERO;
    };
    PERIOD_KEYWORDS
        .iter()
        .find(|(label, _)| *label == text)
        .map_or(Duration::ZERO, |(_, period)| *period)
}

/// Pick the cache period for a page: its keyword override if recognized,
/// otherwise `default_period`.
#[must_use]
pub fn resolve_cache_period(default_period: Duration, keyword: Option<&str>) -> Duration {
    let period = parse_period_keyword(keyword);
    if period.is_zero() {
        default_period
    } else {
        period
    }
}
