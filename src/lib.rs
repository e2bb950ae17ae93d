//! Brandfit - bidirectional fit scoring for commercial space
//!
//! Scores commercial-space listings against a brand's requirements (Brand Fit
//! Index) and brands against a listing (Property Fit Index), then ranks the
//! results with progressive threshold relaxation.

pub mod config;
pub mod core;
pub mod models;

// Re-export commonly used types
pub use crate::core::{Matcher, Ranker, RankingOutcome, Threshold, ZoneTable, brand_fit_index, property_fit_index};
pub use crate::models::{BrandProfile, FitScore, Listing, PriceType, PropertyType, RankingQuery, Requirement, ScoreBreakdown, ScoringWeights};
