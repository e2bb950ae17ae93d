use crate::core::{
    filters::{accepted_len, is_rankable},
    location::{EXACT_LOCATION_SCORE, SAME_ZONE_SCORE},
    matcher::{MatchResult, Matcher},
};
use crate::models::{FitScore, Listing, RankingQuery, Requirement, ScoredMatch};
use serde::Serialize;

/// Default cap on results returned per request
pub const DEFAULT_MAX_RESULTS: usize = 50;
/// Rationale strings kept per match
pub const MAX_REASONS: usize = 5;

/// Acceptance threshold, relaxed one rung at a time: T60 -> T50 -> T40 -> T30
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum Threshold {
    T60,
    T50,
    T40,
    /// Terminal rung, equal to the matcher's own floor
    T30,
}

impl Threshold {
    pub const START: Self = Self::T60;

    pub fn min_index(self) -> u8 {
        match self {
            Self::T60 => 60,
            Self::T50 => 50,
            Self::T40 => 40,
            Self::T30 => 30,
        }
    }

    /// Next lower rung, `None` once the floor is reached
    pub fn relax(self) -> Option<Self> {
        match self {
            Self::T60 => Some(Self::T50),
            Self::T50 => Some(Self::T40),
            Self::T40 => Some(Self::T30),
            Self::T30 => None,
        }
    }
}

impl From<Threshold> for u8 {
    fn from(value: Threshold) -> Self {
        value.min_index()
    }
}

/// Walk the threshold ladder until `accepted_at` reports a non-empty set
///
/// Returns the rung that produced matches and how many it accepted. Lower
/// rungs are never consulted once one succeeds.
pub fn relax_until<F>(mut accepted_at: F) -> Option<(Threshold, usize)>
where
    F: FnMut(Threshold) -> usize,
{
    let mut state = Threshold::START;

    loop {
        let accepted = accepted_at(state);
        if accepted > 0 {
            return Some((state, accepted));
        }

        tracing::debug!("No matches at threshold {}, relaxing", state.min_index());
        state = state.relax()?;
    }
}

/// A listing accepted at request level, with display rationale
#[derive(Debug, Clone, Serialize)]
pub struct RankedMatch {
    pub listing: Listing,
    #[serde(flatten)]
    pub fit: FitScore,
    pub reasons: Vec<String>,
}

/// Outcome of a ranking request
#[derive(Debug, Clone, Serialize)]
pub struct RankingOutcome {
    pub matches: Vec<RankedMatch>,
    /// Rung that produced a non-empty set; `None` when nothing cleared the floor
    #[serde(rename = "thresholdUsed")]
    pub threshold: Option<Threshold>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    /// Accepted at `threshold` before the result cap
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    /// Requirement after query overrides were applied
    pub requirement: Requirement,
}

impl RankingOutcome {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Request-level ranking over the [`Matcher`]
///
/// # Pipeline Stages
/// 1. Apply query overrides to the requirement
/// 2. Availability pre-filter
/// 3. Brand fit scoring, floor and sort (matcher)
/// 4. Threshold relaxation
/// 5. Budget-first re-sort and result cap
/// 6. Rationale generation
#[derive(Debug, Clone)]
pub struct Ranker {
    matcher: Matcher,
    max_results: usize,
}

impl Ranker {
    pub fn new(matcher: Matcher, max_results: usize) -> Self {
        Self {
            matcher,
            max_results: max_results.max(1),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Matcher::with_default_weights(), DEFAULT_MAX_RESULTS)
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Rank `listings` for `requirement`, with optional per-request overrides
    pub fn rank(
        &self,
        requirement: &Requirement,
        query: &RankingQuery,
        listings: Vec<Listing>,
    ) -> RankingOutcome {
        let requirement = query.apply(requirement);
        let total_candidates = listings.len();

        let rankable: Vec<Listing> = listings.into_iter().filter(is_rankable).collect();
        if rankable.len() < total_candidates {
            tracing::debug!(
                "Skipped {} unavailable listings",
                total_candidates - rankable.len()
            );
        }

        let MatchResult { mut matches, .. } = self.matcher.find_listings(&requirement, rankable);

        let Some((threshold, accepted)) = relax_until(|t| accepted_len(&matches, t.min_index()))
        else {
            tracing::debug!("No listings cleared the floor ({} candidates)", total_candidates);
            return RankingOutcome {
                matches: Vec::new(),
                threshold: None,
                total_candidates,
                total_matches: 0,
                requirement,
            };
        };

        matches.truncate(accepted);
        sort_budget_first(&mut matches);

        let total_matches = matches.len();
        let limit = query
            .limit
            .map_or(self.max_results, |limit| limit.clamp(1, self.max_results));
        matches.truncate(limit);

        tracing::debug!(
            "Accepted {} listings at threshold {}, returning {}",
            total_matches,
            threshold.min_index(),
            matches.len()
        );

        let matches = matches
            .into_iter()
            .map(|scored| RankedMatch {
                reasons: match_reasons(&scored.candidate, &scored.fit),
                listing: scored.candidate,
                fit: scored.fit,
            })
            .collect();

        RankingOutcome {
            matches,
            threshold: Some(threshold),
            total_candidates,
            total_matches,
            requirement,
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Sort by budget sub-score (descending), then index (descending)
///
/// Closest-to-affordable first is product policy at request level.
pub fn sort_budget_first<T>(matches: &mut [ScoredMatch<T>]) {
    matches.sort_by(|a, b| {
        b.fit
            .breakdown
            .budget
            .cmp(&a.fit.breakdown.budget)
            .then_with(|| b.fit.index.cmp(&a.fit.index))
    });
}

/// Short display reasons driven by sub-score thresholds and amenities
pub fn match_reasons(listing: &Listing, fit: &FitScore) -> Vec<String> {
    let breakdown = &fit.breakdown;
    let mut reasons = Vec::with_capacity(MAX_REASONS);

    if breakdown.location == EXACT_LOCATION_SCORE {
        reasons.push("Perfect location match");
    } else if breakdown.location == SAME_ZONE_SCORE {
        reasons.push("Nearby area in the same zone");
    }
    if breakdown.budget >= 80 {
        reasons.push("Great value for your budget");
    }
    if breakdown.size >= 80 {
        reasons.push("Ideal size for your needs");
    }
    if breakdown.property_type >= 70 {
        reasons.push("Space type suits your business");
    }
    if listing.has_amenity("parking") {
        reasons.push("Parking available");
    }
    if listing.has_amenity("ground") {
        reasons.push("Ground floor visibility");
    }

    reasons
        .into_iter()
        .take(MAX_REASONS)
        .map(str::to_string)
        .collect()
}
