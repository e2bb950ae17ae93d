use crate::core::category::type_score;
use crate::core::location::{location_score, BRAND_FIT_FLEXIBLE_SCORE, PROPERTY_FIT_FLEXIBLE_SCORE};
use crate::core::zones::ZoneTable;
use crate::models::{
    Band, BrandProfile, FitScore, Listing, PriceType, Requirement, ScoreBreakdown, ScoringWeights,
};
use thiserror::Error;

pub const PERFECT_SCORE: u8 = 100;
/// Missing or non-positive listing figures
pub const NEUTRAL_SCORE: u8 = 50;
/// Requirement places no constraint on the factor
pub const UNCONSTRAINED_SCORE: u8 = 80;
/// Substituted for a sub-score that could not be computed
pub const FALLBACK_SUBSCORE: u8 = 20;
/// Substituted for the composite when composition itself fails
pub const FALLBACK_INDEX: u8 = 20;

/// Errors raised inside the scoring path; never surfaced to callers
#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("non-finite {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("invalid scoring weights: {0:?}")]
    InvalidWeights(ScoringWeights),
}

/// Which side of the match is being served; selects the undershoot tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetPolicy {
    /// Listing scored for a brand
    BrandFit,
    /// Brand scored for a listing; cheaper-than-budget is a weaker negative
    PropertyFit,
}

impl BudgetPolicy {
    fn undershoot_score(self, percent: f64) -> u8 {
        match self {
            Self::BrandFit => {
                if percent <= 10.0 {
                    90
                } else if percent <= 20.0 {
                    80
                } else {
                    50
                }
            }
            Self::PropertyFit => {
                if percent <= 20.0 {
                    90
                } else if percent <= 40.0 {
                    80
                } else {
                    60
                }
            }
        }
    }

    fn overage_score(self, percent: f64) -> u8 {
        if percent <= 10.0 {
            70
        } else if percent <= 20.0 {
            40
        } else {
            0
        }
    }
}

/// Calculate size score (0-100)
///
/// Inside the band scores 100. Outside, the deviation from the band midpoint
/// (or the single present bound) is tiered: <=10% 100, <=20% 70, <=40% 40,
/// otherwise 0.
pub fn size_score(area_sqft: f64, band: Band) -> Result<u8, ScoreError> {
    if !area_sqft.is_finite() {
        return Err(ScoreError::NonFinite { field: "area", value: area_sqft });
    }
    if area_sqft <= 0.0 {
        return Ok(NEUTRAL_SCORE);
    }
    if band.is_unbounded() {
        return Ok(UNCONSTRAINED_SCORE);
    }
    if band.contains(area_sqft) {
        return Ok(PERFECT_SCORE);
    }

    let Some(reference) = band.midpoint().filter(|mid| *mid > 0.0) else {
        return Ok(UNCONSTRAINED_SCORE);
    };

    let deviation = (area_sqft - reference).abs() / reference * 100.0;

    Ok(if deviation <= 10.0 {
        100
    } else if deviation <= 20.0 {
        70
    } else if deviation <= 40.0 {
        40
    } else {
        0
    })
}

/// Normalize a quoted price to a monthly figure
///
/// Returns `None` when there is nothing meaningful to compare (no price, or a
/// per-sqft price on a listing without an area).
pub fn normalize_monthly(price: f64, price_type: PriceType, area_sqft: f64) -> Option<f64> {
    if price <= 0.0 {
        return None;
    }

    match price_type {
        PriceType::Monthly => Some(price),
        PriceType::Yearly => Some(price / 12.0),
        PriceType::PerSqft if area_sqft <= 0.0 => None,
        PriceType::PerSqft => Some(price * area_sqft),
    }
}

/// Monthly cost of a listing, see [`normalize_monthly`]
#[inline]
pub fn monthly_cost(listing: &Listing) -> Option<f64> {
    normalize_monthly(listing.price, listing.price_type, listing.area_sqft)
}

/// Calculate budget score (0-100)
///
/// Over budget: <=10% 70, <=20% 40, otherwise 0.
/// Under budget: tiers depend on `policy`.
pub fn budget_score(
    monthly_cost: Option<f64>,
    band: Band,
    policy: BudgetPolicy,
) -> Result<u8, ScoreError> {
    let Some(cost) = monthly_cost else {
        return Ok(NEUTRAL_SCORE);
    };
    if !cost.is_finite() {
        return Err(ScoreError::NonFinite { field: "monthly cost", value: cost });
    }
    if band.is_unbounded() {
        return Ok(UNCONSTRAINED_SCORE);
    }
    if band.contains(cost) {
        return Ok(PERFECT_SCORE);
    }

    if let Some(max) = band.max().filter(|max| cost > *max) {
        let overage = (cost - max) / max * 100.0;
        return Ok(policy.overage_score(overage));
    }

    if let Some(min) = band.min().filter(|min| cost < *min) {
        let undershoot = (min - cost) / min * 100.0;
        return Ok(policy.undershoot_score(undershoot));
    }

    Ok(PERFECT_SCORE)
}

/// Reject weights that cannot produce a meaningful composite
pub fn validate_weights(weights: &ScoringWeights) -> Result<(), ScoreError> {
    let parts = [weights.location, weights.size, weights.budget, weights.property_type];

    if parts.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.total() <= f64::EPSILON {
        return Err(ScoreError::InvalidWeights(*weights));
    }

    Ok(())
}

/// Weighted combination of the four sub-scores, rounded and clamped to 0-100
///
/// Weights are normalized by their sum, so they need not add up to exactly 1.
pub fn compose(breakdown: &ScoreBreakdown, weights: &ScoringWeights) -> Result<u8, ScoreError> {
    validate_weights(weights)?;

    let weighted = f64::from(breakdown.location) * weights.location
        + f64::from(breakdown.size) * weights.size
        + f64::from(breakdown.budget) * weights.budget
        + f64::from(breakdown.property_type) * weights.property_type;

    let index = weighted / weights.total();

    Ok(index.round().clamp(0.0, 100.0) as u8)
}

/// Brand Fit Index: how well `listing` fits `requirement`
pub fn brand_fit_index(
    listing: &Listing,
    requirement: &Requirement,
    weights: &ScoringWeights,
) -> FitScore {
    let breakdown = ScoreBreakdown {
        location: location_score(
            listing,
            &requirement.preferred_locations,
            BRAND_FIT_FLEXIBLE_SCORE,
            ZoneTable::builtin(),
        ),
        size: or_fallback(&listing.id, size_score(listing.area_sqft, requirement.size_band())),
        budget: or_fallback(
            &listing.id,
            budget_score(monthly_cost(listing), requirement.budget_band(), BudgetPolicy::BrandFit),
        ),
        property_type: type_score(listing, requirement.business_type.as_deref()),
    };

    finish(&listing.id, breakdown, weights)
}

/// Property Fit Index: how well `brand` fits `listing`, from the owner's side
pub fn property_fit_index(
    brand: &BrandProfile,
    listing: &Listing,
    weights: &ScoringWeights,
) -> FitScore {
    let requirement = &brand.requirement;

    let breakdown = ScoreBreakdown {
        location: location_score(
            listing,
            &requirement.preferred_locations,
            PROPERTY_FIT_FLEXIBLE_SCORE,
            ZoneTable::builtin(),
        ),
        size: or_fallback(&brand.id, size_score(listing.area_sqft, requirement.size_band())),
        budget: or_fallback(
            &brand.id,
            budget_score(monthly_cost(listing), requirement.budget_band(), BudgetPolicy::PropertyFit),
        ),
        property_type: type_score(listing, requirement.business_type.as_deref()),
    };

    finish(&brand.id, breakdown, weights)
}

fn or_fallback(candidate_id: &str, score: Result<u8, ScoreError>) -> u8 {
    score.unwrap_or_else(|e| {
        tracing::warn!("Sub-score failed for candidate {}, using fallback: {}", candidate_id, e);
        FALLBACK_SUBSCORE
    })
}

fn finish(candidate_id: &str, breakdown: ScoreBreakdown, weights: &ScoringWeights) -> FitScore {
    let index = compose(&breakdown, weights).unwrap_or_else(|e| {
        tracing::warn!("Composite failed for candidate {}, using fallback index: {}", candidate_id, e);
        FALLBACK_INDEX
    });

    FitScore { index, breakdown }
}
