use crate::models::{Listing, ScoredMatch};

/// Check if a listing can be offered at all
///
/// This is the pre-filter stage of request-level ranking: unavailable
/// listings and records without an identifier never reach scoring.
#[inline]
pub fn is_rankable(listing: &Listing) -> bool {
    listing.available && !listing.id.trim().is_empty()
}

/// Check if a scored candidate clears a minimum composite index
#[inline]
pub fn meets_threshold<T>(scored: &ScoredMatch<T>, min_index: u8) -> bool {
    scored.fit.index >= min_index
}

/// Length of the leading run of `matches` at or above `min_index`
///
/// `matches` must be sorted by index descending, as the matcher returns them,
/// so the accepted set at any threshold is a prefix.
pub fn accepted_len<T>(matches: &[ScoredMatch<T>], min_index: u8) -> usize {
    matches.partition_point(|scored| meets_threshold(scored, min_index))
}
