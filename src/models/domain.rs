use serde::{Deserialize, Serialize};

/// How a listing's `price` is quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PriceType {
    #[default]
    Monthly,
    Yearly,
    PerSqft,
}

impl From<String> for PriceType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "yearly" | "annual" | "annually" | "per_year" => Self::Yearly,
            "per_sqft" | "per_sq_ft" | "sqft" | "per_area" | "psf" => Self::PerSqft,
            _ => Self::Monthly,
        }
    }
}

/// Listing category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum PropertyType {
    Office,
    Retail,
    Warehouse,
    Restaurant,
    Other,
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "office" => Self::Office,
            "retail" => Self::Retail,
            "warehouse" => Self::Warehouse,
            "restaurant" => Self::Restaurant,
            _ => Self::Other,
        }
    }
}

/// Commercial space listing supplied by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "zipCode", default)]
    pub zip_code: String,
    #[serde(rename = "areaSqft")]
    pub area_sqft: f64,
    pub price: f64,
    #[serde(rename = "priceType", default)]
    pub price_type: PriceType,
    #[serde(rename = "propertyType")]
    pub property_type: PropertyType,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

impl Listing {
    /// Address and city joined, the text location matching runs against
    pub fn location_text(&self) -> String {
        format!("{}, {}", self.address, self.city)
    }

    /// True if any amenity tag mentions `needle` (case-insensitive)
    pub fn has_amenity(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.amenities
            .iter()
            .any(|amenity| amenity.to_lowercase().contains(&needle))
    }
}

fn default_true() -> bool { true }

/// What a brand is looking for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(rename = "preferredLocations", default)]
    pub preferred_locations: Vec<String>,
    #[serde(rename = "minSize", default)]
    pub min_size: Option<f64>,
    #[serde(rename = "maxSize", default)]
    pub max_size: Option<f64>,
    #[serde(rename = "minBudget", default)]
    pub min_budget: Option<f64>,
    #[serde(rename = "maxBudget", default)]
    pub max_budget: Option<f64>,
    #[serde(rename = "businessType", default)]
    pub business_type: Option<String>,
}

impl Requirement {
    pub fn size_band(&self) -> Band {
        Band::new(self.min_size, self.max_size)
    }

    pub fn budget_band(&self) -> Band {
        Band::new(self.min_budget, self.max_budget)
    }
}

/// A brand and its stated requirement, scored from a listing's point of view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub requirement: Requirement,
}

/// Inclusive numeric range where either side may be unbounded.
///
/// Zero, negative and non-finite bounds mean "no limit on this side", and
/// reversed bounds are swapped, so every `Band` is well formed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Band {
    min: Option<f64>,
    max: Option<f64>,
}

impl Band {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let min = min.filter(|v| v.is_finite() && *v > 0.0);
        let max = max.filter(|v| v.is_finite() && *v > 0.0);

        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => Self { min: Some(hi), max: Some(lo) },
            _ => Self { min, max },
        }
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |lo| value >= lo) && self.max.map_or(true, |hi| value <= hi)
    }

    /// Centre of the band, or the single present bound
    pub fn midpoint(&self) -> Option<f64> {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
            (Some(bound), None) | (None, Some(bound)) => Some(bound),
            (None, None) => None,
        }
    }
}

/// Per-factor sub-scores, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub location: u8,
    pub size: u8,
    pub budget: u8,
    #[serde(rename = "type")]
    pub property_type: u8,
}

/// Composite fit index plus the breakdown it was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitScore {
    pub index: u8,
    pub breakdown: ScoreBreakdown,
}

/// A candidate paired with its fit score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch<T> {
    pub candidate: T,
    pub fit: FitScore,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub location: f64,
    pub size: f64,
    pub budget: f64,
    pub property_type: f64,
}

impl ScoringWeights {
    /// Brand Fit Index weighting (listing scored for a brand)
    pub const fn brand_fit() -> Self {
        Self {
            location: 0.30,
            size: 0.25,
            budget: 0.25,
            property_type: 0.20,
        }
    }

    /// Property Fit Index weighting (brand scored for a listing)
    pub const fn property_fit() -> Self {
        Self {
            location: 0.25,
            size: 0.20,
            budget: 0.30,
            property_type: 0.25,
        }
    }

    pub fn total(&self) -> f64 {
        self.location + self.size + self.budget + self.property_type
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::brand_fit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_drops_non_positive_bounds() {
        let band = Band::new(Some(0.0), Some(-5.0));
        assert!(band.is_unbounded());

        let band = Band::new(Some(100.0), Some(f64::INFINITY));
        assert_eq!(band.min(), Some(100.0));
        assert_eq!(band.max(), None);
    }

    #[test]
    fn test_band_swaps_reversed_bounds() {
        let band = Band::new(Some(200.0), Some(100.0));
        assert_eq!(band.min(), Some(100.0));
        assert_eq!(band.max(), Some(200.0));
        assert_eq!(band.midpoint(), Some(150.0));
    }

    #[test]
    fn test_band_contains_is_inclusive() {
        let band = Band::new(Some(100.0), Some(200.0));
        assert!(band.contains(100.0));
        assert!(band.contains(200.0));
        assert!(!band.contains(200.5));

        let open_top = Band::new(Some(100.0), None);
        assert!(open_top.contains(1_000_000.0));
    }

    #[test]
    fn test_tags_parse_case_insensitively() {
        assert_eq!(PropertyType::from("Retail".to_string()), PropertyType::Retail);
        assert_eq!(PropertyType::from("co-living".to_string()), PropertyType::Other);
        assert_eq!(PriceType::from("Per-Sqft".to_string()), PriceType::PerSqft);
        assert_eq!(PriceType::from("YEARLY".to_string()), PriceType::Yearly);
        assert_eq!(PriceType::from("whatever".to_string()), PriceType::Monthly);
    }

    #[test]
    fn test_listing_deserializes_with_defaults() {
        let listing: Listing = serde_json::from_str(
            r#"{"id":"l1","areaSqft":1200,"price":90000,"propertyType":"RETAIL"}"#,
        )
        .unwrap();

        assert_eq!(listing.property_type, PropertyType::Retail);
        assert_eq!(listing.price_type, PriceType::Monthly);
        assert!(listing.available);
        assert!(listing.amenities.is_empty());
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((ScoringWeights::brand_fit().total() - 1.0).abs() < 1e-9);
        assert!((ScoringWeights::property_fit().total() - 1.0).abs() < 1e-9);
    }
}
