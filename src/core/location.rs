use crate::core::zones::{contains_phrase, tokenize, ZoneTable};
use crate::models::Listing;

pub const EXACT_LOCATION_SCORE: u8 = 100;
pub const SAME_ZONE_SCORE: u8 = 70;
pub const OUT_OF_ZONE_SCORE: u8 = 30;

/// Score when a brand lists no preferred locations
pub const BRAND_FIT_FLEXIBLE_SCORE: u8 = 50;
/// Reverse direction treats "no preference" as slightly positive
pub const PROPERTY_FIT_FLEXIBLE_SCORE: u8 = 60;

/// Calculate location score (0-100) for a listing against preferred locations
///
/// Tiers, best over all preferred locations:
/// - 100: phrase hit in either direction
/// - 70: both sides resolve to the same zone
/// - 30: different zones, or either side unresolved
///
/// An empty (or all-blank) preference list yields `flexible_score`.
pub fn location_score(
    listing: &Listing,
    preferred_locations: &[String],
    flexible_score: u8,
    zones: &ZoneTable,
) -> u8 {
    let preferred: Vec<Vec<String>> = preferred_locations
        .iter()
        .map(|location| tokenize(location))
        .filter(|tokens| !tokens.is_empty())
        .collect();

    if preferred.is_empty() {
        return flexible_score;
    }

    let listing_tokens = tokenize(&listing.location_text());
    let listing_zone = zones.resolve_tokens(&listing_tokens);

    // Address segments ("1st Cross, Koramangala"), flagged when they name a zoned area
    let segments: Vec<(Vec<String>, bool)> = listing
        .address
        .split(',')
        .map(tokenize)
        .filter(|tokens| is_named_area(tokens))
        .map(|tokens| {
            let zoned = zones.resolve_tokens(&tokens).is_some();
            (tokens, zoned)
        })
        .collect();
    let city = tokenize(&listing.city);

    preferred
        .iter()
        .map(|wanted| {
            let wanted_zone = zones.resolve_tokens(wanted);

            let forward_hit = contains_phrase(&listing_tokens, wanted);
            // Street segments such as "1st Cross" repeat across areas; only a zoned
            // segment counts unless the preference itself names no zone
            let segment_hit = segments.iter().any(|(segment, zoned)| {
                (*zoned || wanted_zone.is_none()) && contains_phrase(wanted, segment)
            });
            // A city hit only counts for city-wide preferences; "Koramangala, Bangalore"
            // must not match every Bangalore listing
            let city_hit = wanted_zone.is_none() && contains_phrase(wanted, &city);

            if forward_hit || segment_hit || city_hit {
                return EXACT_LOCATION_SCORE;
            }

            match (listing_zone, wanted_zone) {
                (Some(have), Some(want)) if have == want => SAME_ZONE_SCORE,
                _ => OUT_OF_ZONE_SCORE,
            }
        })
        .max()
        .unwrap_or(flexible_score)
}

// Skip empty segments and bare numbers such as zip codes
fn is_named_area(tokens: &[String]) -> bool {
    tokens
        .iter()
        .any(|token| !token.chars().all(|c| c.is_ascii_digit()))
}
