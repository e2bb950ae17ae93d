use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{BrandProfile, Listing, Requirement};

/// Per-request overrides for ranking listings
///
/// Every field is optional. A supplied value replaces the base requirement's;
/// size and budget bands are replaced as a pair when either bound is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RankingQuery {
    #[validate(length(min = 1, max = 120))]
    #[serde(rename = "businessType", default)]
    pub business_type: Option<String>,
    #[validate(length(max = 25))]
    #[serde(default)]
    pub locations: Option<Vec<String>>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "minSize", default)]
    pub min_size: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "maxSize", default)]
    pub max_size: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "minBudget", default)]
    pub min_budget: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "maxBudget", default)]
    pub max_budget: Option<f64>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl RankingQuery {
    /// Effective requirement: this query's values over `base`
    pub fn apply(&self, base: &Requirement) -> Requirement {
        let (min_size, max_size) = if self.min_size.is_some() || self.max_size.is_some() {
            (self.min_size, self.max_size)
        } else {
            (base.min_size, base.max_size)
        };

        let (min_budget, max_budget) = if self.min_budget.is_some() || self.max_budget.is_some() {
            (self.min_budget, self.max_budget)
        } else {
            (base.min_budget, base.max_budget)
        };

        Requirement {
            preferred_locations: self
                .locations
                .clone()
                .unwrap_or_else(|| base.preferred_locations.clone()),
            min_size,
            max_size,
            min_budget,
            max_budget,
            business_type: self
                .business_type
                .clone()
                .or_else(|| base.business_type.clone()),
        }
    }
}

/// Input document for the batch runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum BatchRequest {
    /// Rank listings for one brand requirement
    BrandFit {
        requirement: Requirement,
        #[serde(default)]
        query: RankingQuery,
        listings: Vec<Listing>,
    },
    /// Rank brands for one listing
    PropertyFit {
        listing: Listing,
        brands: Vec<BrandProfile>,
    },
}
