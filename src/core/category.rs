use crate::core::zones::{contains_phrase, tokenize};
use crate::models::{Listing, PropertyType};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const FRONTAGE_MATCH_SCORE: u8 = 100;
pub const IDEAL_MATCH_SCORE: u8 = 70;
pub const ACCEPTABLE_MATCH_SCORE: u8 = 40;
pub const INCOMPATIBLE_SCORE: u8 = 0;
/// No business type given
pub const MISSING_BUSINESS_SCORE: u8 = 50;
/// Business type given but not recognised by any keyword
pub const UNRECOGNISED_BUSINESS_SCORE: u8 = 40;

static KEYWORDS: OnceLock<Vec<(Vec<String>, BusinessCategory)>> = OnceLock::new();
static COMPATIBILITY: OnceLock<HashMap<BusinessCategory, Compatibility>> = OnceLock::new();
static FRONTAGE: OnceLock<Vec<Vec<String>>> = OnceLock::new();

/// Canonical business categories that free-text business types resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessCategory {
    CafeQsr,
    Restaurant,
    Retail,
    Office,
    Warehouse,
}

/// Listing categories that suit a business category
#[derive(Debug, Clone)]
pub struct Compatibility {
    pub ideal: &'static [PropertyType],
    pub acceptable: &'static [PropertyType],
}

/// Amenity phrases that signal a high-visibility unit
const FRONTAGE_SIGNALS: &[&str] = &[
    "ground floor",
    "ground",
    "street facing",
    "street front",
    "high street",
    "main road",
    "corner",
];

fn keyword_table() -> &'static Vec<(Vec<String>, BusinessCategory)> {
    KEYWORDS.get_or_init(|| {
        use BusinessCategory::*;

        const KEYWORD_TO_CATEGORY: &[(&str, BusinessCategory)] = &[
            // Cafe & quick service
            ("cafe", CafeQsr),
            ("qsr", CafeQsr),
            ("quick service", CafeQsr),
            ("coffee", CafeQsr),
            ("bakery", CafeQsr),
            ("kiosk", CafeQsr),
            ("juice", CafeQsr),
            ("dessert", CafeQsr),
            ("ice cream", CafeQsr),
            // Dining
            ("restaurant", Restaurant),
            ("fine dining", Restaurant),
            ("dining", Restaurant),
            ("bar", Restaurant),
            ("pub", Restaurant),
            ("brewery", Restaurant),
            ("cloud kitchen", Restaurant),
            ("food", Restaurant),
            // Retail
            ("retail", Retail),
            ("store", Retail),
            ("shop", Retail),
            ("boutique", Retail),
            ("showroom", Retail),
            ("fashion", Retail),
            ("apparel", Retail),
            ("salon", Retail),
            ("pharmacy", Retail),
            ("supermarket", Retail),
            ("grocery", Retail),
            // Office
            ("office", Office),
            ("coworking", Office),
            ("co working", Office),
            ("it services", Office),
            ("tech", Office),
            ("consulting", Office),
            ("agency", Office),
            ("studio", Office),
            // Industrial
            ("warehouse", Warehouse),
            ("logistics", Warehouse),
            ("storage", Warehouse),
            ("distribution", Warehouse),
            ("manufacturing", Warehouse),
            ("industrial", Warehouse),
        ];

        let mut table: Vec<(Vec<String>, BusinessCategory)> = KEYWORD_TO_CATEGORY
            .iter()
            .map(|(keyword, category)| (tokenize(keyword), *category))
            .collect();
        // Longest phrase first; ties keep table order
        table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        table
    })
}

fn compatibility_table() -> &'static HashMap<BusinessCategory, Compatibility> {
    COMPATIBILITY.get_or_init(|| {
        use PropertyType::*;

        HashMap::from([
            (
                BusinessCategory::CafeQsr,
                Compatibility { ideal: &[Retail, Restaurant], acceptable: &[Office, Other] },
            ),
            (
                BusinessCategory::Restaurant,
                Compatibility { ideal: &[Restaurant, Retail], acceptable: &[Other] },
            ),
            (
                BusinessCategory::Retail,
                Compatibility { ideal: &[Retail], acceptable: &[Office] },
            ),
            (
                BusinessCategory::Office,
                Compatibility { ideal: &[Office], acceptable: &[Retail] },
            ),
            (
                BusinessCategory::Warehouse,
                Compatibility { ideal: &[Warehouse], acceptable: &[Other] },
            ),
        ])
    })
}

/// Lowercase and fold separators so "Cafe_QSR" and "café / qsr" read alike
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .replace('é', "e")
        .replace(['_', '-', '/'], " ")
}

/// Resolve free text to a canonical category, `None` when nothing matches
pub fn classify_business(text: &str) -> Option<BusinessCategory> {
    let tokens = tokenize(&normalize_text(text));

    keyword_table()
        .iter()
        .find(|(keyword, _)| contains_phrase(&tokens, keyword))
        .map(|(_, category)| *category)
}

pub fn compatibility(category: BusinessCategory) -> Option<&'static Compatibility> {
    compatibility_table().get(&category)
}

/// True if the listing advertises a ground-floor or street-facing unit
pub fn has_frontage(amenities: &[String]) -> bool {
    let signals = frontage_signals();

    amenities.iter().any(|amenity| {
        let tokens = tokenize(&normalize_text(amenity));
        signals.iter().any(|signal| contains_phrase(&tokens, signal))
    })
}

fn frontage_signals() -> &'static Vec<Vec<String>> {
    FRONTAGE.get_or_init(|| FRONTAGE_SIGNALS.iter().map(|signal| tokenize(signal)).collect())
}

/// Calculate type compatibility score (0-100)
///
/// - 100: ideal category with frontage
/// - 70: ideal category, no frontage
/// - 40: acceptable but not ideal
/// - 0: incompatible
pub fn type_score(listing: &Listing, business_type: Option<&str>) -> u8 {
    let Some(text) = business_type.map(str::trim).filter(|text| !text.is_empty()) else {
        return MISSING_BUSINESS_SCORE;
    };

    let Some(category) = classify_business(text) else {
        return UNRECOGNISED_BUSINESS_SCORE;
    };

    let Some(compat) = compatibility(category) else {
        return UNRECOGNISED_BUSINESS_SCORE;
    };

    if compat.ideal.contains(&listing.property_type) {
        if has_frontage(&listing.amenities) {
            FRONTAGE_MATCH_SCORE
        } else {
            IDEAL_MATCH_SCORE
        }
    } else if compat.acceptable.contains(&listing.property_type) {
        ACCEPTABLE_MATCH_SCORE
    } else {
        INCOMPATIBLE_SCORE
    }
}
