// Core algorithm exports
pub mod filters;
pub mod interval;
pub mod matcher;
pub mod range;
pub mod scoring;

pub use filters::{matches_categories, matches_tuition};
pub use interval::{range_distance, ranges_overlap};
pub use matcher::{Matcher, MatchResult, DEFAULT_MAX_RESULTS};
pub use range::{parse_range, RangeKeyword};
pub use scoring::{calculate_fallback_score, calculate_match_score};
