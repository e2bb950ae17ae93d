use crate::core::{
    filters::meets_threshold,
    scoring::{brand_fit_index, property_fit_index},
};
use crate::models::{BrandProfile, FitScore, Listing, Requirement, ScoredMatch, ScoringWeights};
use rayon::prelude::*;

/// Composite index below which a candidate is never returned
pub const MIN_MATCH_INDEX: u8 = 30;

/// Candidate count at which scoring fans out across the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult<T> {
    pub matches: Vec<ScoredMatch<T>>,
    pub total_candidates: usize,
}

/// Ranking primitive for both directions
///
/// # Pipeline Stages
/// 1. Score every candidate (BFI or PFI)
/// 2. Drop candidates below [`MIN_MATCH_INDEX`]
/// 3. Sort by index descending
///
/// No pagination or threshold relaxation happens here; see
/// [`Ranker`](crate::core::ranking::Ranker) for that.
#[derive(Debug, Clone)]
pub struct Matcher {
    brand_fit: ScoringWeights,
    property_fit: ScoringWeights,
    parallel_threshold: usize,
}

impl Matcher {
    pub fn new(brand_fit: ScoringWeights, property_fit: ScoringWeights) -> Self {
        Self {
            brand_fit,
            property_fit,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::brand_fit(), ScoringWeights::property_fit())
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn brand_fit_weights(&self) -> &ScoringWeights {
        &self.brand_fit
    }

    pub fn property_fit_weights(&self) -> &ScoringWeights {
        &self.property_fit
    }

    /// Rank listings for a brand's requirement (Brand Fit Index)
    pub fn find_listings(
        &self,
        requirement: &Requirement,
        listings: Vec<Listing>,
    ) -> MatchResult<Listing> {
        let total_candidates = listings.len();
        let weights = &self.brand_fit;

        let matches = self.score_and_sort(listings, |listing| {
            brand_fit_index(listing, requirement, weights)
        });

        tracing::debug!(
            "Brand fit: {} of {} listings at or above {}",
            matches.len(),
            total_candidates,
            MIN_MATCH_INDEX
        );

        MatchResult { matches, total_candidates }
    }

    /// Rank brands for a listing (Property Fit Index)
    pub fn find_brands(
        &self,
        listing: &Listing,
        brands: Vec<BrandProfile>,
    ) -> MatchResult<BrandProfile> {
        let total_candidates = brands.len();
        let weights = &self.property_fit;

        let matches = self.score_and_sort(brands, |brand| {
            property_fit_index(brand, listing, weights)
        });

        tracing::debug!(
            "Property fit for {}: {} of {} brands at or above {}",
            listing.id,
            matches.len(),
            total_candidates,
            MIN_MATCH_INDEX
        );

        MatchResult { matches, total_candidates }
    }

    fn score_and_sort<T, F>(&self, candidates: Vec<T>, score: F) -> Vec<ScoredMatch<T>>
    where
        T: Send,
        F: Fn(&T) -> FitScore + Sync,
    {
        let into_match = |candidate: T| {
            let fit = score(&candidate);
            ScoredMatch { candidate, fit }
        };

        // into_par_iter keeps input order on collect, so both paths agree
        let scored: Vec<ScoredMatch<T>> = if candidates.len() >= self.parallel_threshold {
            candidates.into_par_iter().map(into_match).collect()
        } else {
            candidates.into_iter().map(into_match).collect()
        };

        let mut matches: Vec<ScoredMatch<T>> = scored
            .into_iter()
            .filter(|scored| meets_threshold(scored, MIN_MATCH_INDEX))
            .collect();

        sort_by_index(&mut matches);
        matches
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Sort by index (descending), then location sub-score (descending)
///
/// The sort is stable, so remaining ties keep input order.
pub fn sort_by_index<T>(matches: &mut [ScoredMatch<T>]) {
    matches.sort_by(|a, b| {
        b.fit
            .index
            .cmp(&a.fit.index)
            .then_with(|| b.fit.breakdown.location.cmp(&a.fit.breakdown.location))
    });
}
