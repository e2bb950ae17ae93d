// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Band, BrandProfile, FitScore, Listing, PriceType, PropertyType, Requirement, ScoreBreakdown, ScoredMatch, ScoringWeights};
pub use requests::{BatchRequest, RankingQuery};
pub use responses::{BatchResponse, BatchResult};
