// Core algorithm exports
pub mod category;
pub mod filters;
pub mod location;
pub mod matcher;
pub mod ranking;
pub mod scoring;
pub mod zones;

pub use category::{classify_business, type_score, BusinessCategory};
pub use filters::{accepted_len, is_rankable, meets_threshold};
pub use location::location_score;
pub use matcher::{MatchResult, Matcher, MIN_MATCH_INDEX};
pub use ranking::{RankedMatch, Ranker, RankingOutcome, Threshold};
pub use scoring::{brand_fit_index, budget_score, compose, normalize_monthly, property_fit_index, size_score, BudgetPolicy, ScoreError};
pub use zones::ZoneTable;
