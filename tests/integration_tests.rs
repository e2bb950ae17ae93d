// Integration tests for Brandfit

use brandfit::config::Settings;
use brandfit::core::{Matcher, Ranker, Threshold, MIN_MATCH_INDEX};
use brandfit::models::{
    BatchRequest, BatchResponse, BatchResult, BrandProfile, Listing, PriceType, PropertyType,
    RankingQuery, Requirement,
};

fn create_test_listing(id: &str, address: &str, price: f64, area_sqft: f64) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Listing {}", id),
        address: address.to_string(),
        city: "Bangalore".to_string(),
        state: "Karnataka".to_string(),
        zip_code: String::new(),
        area_sqft,
        price,
        price_type: PriceType::Monthly,
        property_type: PropertyType::Retail,
        amenities: vec!["ground floor".to_string(), "parking".to_string()],
        available: true,
    }
}

fn create_test_requirement() -> Requirement {
    Requirement {
        preferred_locations: vec!["Koramangala".to_string()],
        min_size: Some(1400.0),
        max_size: Some(1600.0),
        min_budget: Some(100_000.0),
        max_budget: Some(200_000.0),
        business_type: Some("cafe_qsr".to_string()),
    }
}

/// A spread of listings across zones, sizes and prices
fn create_market(count: usize) -> Vec<Listing> {
    const AREAS: [&str; 6] = [
        "Koramangala",
        "HSR Layout",
        "Indiranagar",
        "Whitefield",
        "Jayanagar",
        "Hebbal",
    ];

    (0..count)
        .map(|i| {
            let mut listing = create_test_listing(
                &i.to_string(),
                AREAS[i % AREAS.len()],
                60_000.0 + 7_500.0 * (i % 40) as f64,
                800.0 + 90.0 * (i % 25) as f64,
            );
            if i % 4 == 0 {
                listing.property_type = PropertyType::Office;
            }
            if i % 7 == 0 {
                listing.amenities.clear();
            }
            listing
        })
        .collect()
}

#[test]
fn test_integration_end_to_end_ranking() {
    let ranker = Ranker::with_defaults();
    let listings = vec![
        create_test_listing("exact", "5th Block, Koramangala", 150_000.0, 1500.0),
        create_test_listing("zone", "HSR Layout", 150_000.0, 1500.0),
        create_test_listing("far", "Whitefield", 150_000.0, 1500.0),
        Listing {
            available: false,
            ..create_test_listing("gone", "Koramangala", 150_000.0, 1500.0)
        },
    ];

    let outcome = ranker.rank(&create_test_requirement(), &RankingQuery::default(), listings);

    assert_eq!(outcome.total_candidates, 4);
    assert_eq!(outcome.threshold, Some(Threshold::T60));
    assert_eq!(outcome.matches.len(), 3);
    assert_eq!(outcome.matches[0].listing.id, "exact");
    assert_eq!(outcome.matches[0].reasons[0], "Perfect location match");
    assert!(outcome.matches.iter().all(|m| m.listing.id != "gone"));
}

#[test]
fn test_integration_results_sorted_and_floored() {
    let matcher = Matcher::with_default_weights();
    let result = matcher.find_listings(&create_test_requirement(), create_market(300));

    assert_eq!(result.total_candidates, 300);
    for m in &result.matches {
        assert!(m.fit.index >= MIN_MATCH_INDEX);
    }
    for pair in result.matches.windows(2) {
        assert!(pair[0].fit.index >= pair[1].fit.index);
    }
}

#[test]
fn test_integration_ranked_output_is_budget_first() {
    let ranker = Ranker::with_defaults();
    let outcome = ranker.rank(&create_test_requirement(), &RankingQuery::default(), create_market(200));

    assert!(!outcome.is_empty());
    assert!(outcome.matches.len() <= 50);
    for pair in outcome.matches.windows(2) {
        let (a, b) = (&pair[0].fit, &pair[1].fit);
        assert!(
            a.breakdown.budget > b.breakdown.budget
                || (a.breakdown.budget == b.breakdown.budget && a.index >= b.index)
        );
    }
}

#[test]
fn test_integration_threshold_is_highest_non_empty_rung() {
    let ranker = Ranker::with_defaults();
    let matcher = Matcher::with_default_weights();
    let requirement = create_test_requirement();

    let outcome = ranker.rank(&requirement, &RankingQuery::default(), create_market(120));
    let threshold = outcome.threshold.expect("market should produce matches");
    let scored = matcher.find_listings(&requirement, create_market(120));

    // Nothing returned falls below the rung used
    for m in &outcome.matches {
        assert!(m.fit.index >= threshold.min_index());
    }
    // Every stricter rung was empty
    let mut rung = Threshold::START;
    while rung != threshold {
        assert!(scored.matches.iter().all(|m| m.fit.index < rung.min_index()));
        rung = rung.relax().expect("threshold is on the ladder");
    }
}

#[test]
fn test_integration_query_overrides() {
    let ranker = Ranker::with_defaults();
    let listings = vec![
        create_test_listing("kora", "Koramangala", 150_000.0, 1500.0),
        create_test_listing("indi", "Indiranagar", 150_000.0, 1500.0),
    ];

    let query = RankingQuery {
        locations: Some(vec!["Indiranagar".to_string()]),
        limit: Some(1),
        ..Default::default()
    };
    let outcome = ranker.rank(&create_test_requirement(), &query, listings);

    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches[0].listing.id, "indi");
    assert_eq!(outcome.requirement.preferred_locations, vec!["Indiranagar"]);
}

#[test]
fn test_integration_property_fit_direction() {
    let matcher = Matcher::with_default_weights();
    let listing = create_test_listing("l1", "Koramangala", 150_000.0, 1500.0);

    let brands = vec![
        BrandProfile {
            id: "cafe".to_string(),
            name: "Corner Cafe".to_string(),
            requirement: create_test_requirement(),
        },
        BrandProfile {
            id: "nearby".to_string(),
            name: "Nearby Retailer".to_string(),
            requirement: Requirement {
                preferred_locations: vec!["HSR Layout".to_string()],
                business_type: Some("fashion retail".to_string()),
                ..create_test_requirement()
            },
        },
        BrandProfile {
            id: "flexible".to_string(),
            name: "Flexible Brand".to_string(),
            requirement: Requirement::default(),
        },
    ];

    let result = matcher.find_brands(&listing, brands);

    assert_eq!(result.total_candidates, 3);
    assert_eq!(result.matches[0].candidate.id, "cafe");
    assert_eq!(result.matches[0].fit.index, 100);

    let nearby = result
        .matches
        .iter()
        .find(|m| m.candidate.id == "nearby")
        .expect("same-zone brand should match");
    assert_eq!(nearby.fit.breakdown.location, 70);

    // No preferences at all: flexible location, unconstrained size and budget
    let flexible = result
        .matches
        .iter()
        .find(|m| m.candidate.id == "flexible")
        .expect("flexible brand should match");
    assert_eq!(flexible.fit.breakdown.location, 60);
    assert_eq!(flexible.fit.breakdown.size, 80);
    assert_eq!(flexible.fit.breakdown.budget, 80);
    assert_eq!(flexible.fit.breakdown.property_type, 50);
}

#[test]
fn test_integration_batch_request_roundtrip() {
    let input = r#"{
        "direction": "brand_fit",
        "requirement": {
            "preferredLocations": ["Koramangala"],
            "minSize": 1400,
            "maxSize": 1600,
            "minBudget": 100000,
            "maxBudget": 200000,
            "businessType": "Cafe"
        },
        "listings": [
            {
                "id": "l1",
                "address": "Koramangala",
                "city": "Bangalore",
                "areaSqft": 1500,
                "price": 1800000,
                "priceType": "yearly",
                "propertyType": "retail",
                "amenities": ["Ground Floor"]
            }
        ]
    }"#;

    let request: BatchRequest = serde_json::from_str(input).unwrap();
    let ranker = Settings::default().build_ranker();

    let result = match request {
        BatchRequest::BrandFit { requirement, query, listings } => {
            BatchResult::BrandFit { outcome: ranker.rank(&requirement, &query, listings) }
        }
        BatchRequest::PropertyFit { .. } => panic!("expected brand_fit request"),
    };

    let json = serde_json::to_value(BatchResponse::new(result)).unwrap();

    assert_eq!(json["result"]["direction"], "brand_fit");
    assert_eq!(json["result"]["outcome"]["thresholdUsed"], 60);
    let first = &json["result"]["outcome"]["matches"][0];
    assert_eq!(first["index"], 100);
    assert_eq!(first["breakdown"]["type"], 100);
    assert_eq!(first["listing"]["priceType"], "yearly");
    assert!(json["runId"].is_string());
}

#[test]
fn test_integration_empty_market() {
    let ranker = Ranker::with_defaults();
    let outcome = ranker.rank(&create_test_requirement(), &RankingQuery::default(), vec![]);

    assert!(outcome.is_empty());
    assert_eq!(outcome.threshold, None);
    assert_eq!(outcome.total_candidates, 0);
}
