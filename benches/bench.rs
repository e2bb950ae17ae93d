// Criterion benchmarks for Brandfit

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use brandfit::core::{brand_fit_index, location_score, Matcher, Ranker, ZoneTable};
use brandfit::models::{
    BrandProfile, Listing, PriceType, PropertyType, RankingQuery, Requirement, ScoringWeights,
};

const AREAS: [&str; 8] = [
    "Koramangala",
    "HSR Layout",
    "Indiranagar",
    "Whitefield",
    "Jayanagar",
    "Hebbal",
    "MG Road",
    "Rajajinagar",
];

fn create_listing(id: usize) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Listing {}", id),
        address: format!("{} Main Street, {}", id, AREAS[id % AREAS.len()]),
        city: "Bangalore".to_string(),
        state: "Karnataka".to_string(),
        zip_code: "560001".to_string(),
        area_sqft: 800.0 + 50.0 * (id % 40) as f64,
        price: 60_000.0 + 5_000.0 * (id % 30) as f64,
        price_type: if id % 5 == 0 { PriceType::Yearly } else { PriceType::Monthly },
        property_type: if id % 3 == 0 { PropertyType::Office } else { PropertyType::Retail },
        amenities: vec!["parking".to_string(), "ground floor".to_string()],
        available: true,
    }
}

fn create_requirement() -> Requirement {
    Requirement {
        preferred_locations: vec!["Koramangala".to_string(), "Indiranagar".to_string()],
        min_size: Some(1200.0),
        max_size: Some(1800.0),
        min_budget: Some(100_000.0),
        max_budget: Some(180_000.0),
        business_type: Some("cafe_qsr".to_string()),
    }
}

fn bench_brand_fit_index(c: &mut Criterion) {
    let listing = create_listing(0);
    let requirement = create_requirement();
    let weights = ScoringWeights::brand_fit();

    c.bench_function("brand_fit_index", |b| {
        b.iter(|| brand_fit_index(black_box(&listing), black_box(&requirement), black_box(&weights)));
    });
}

fn bench_location_score(c: &mut Criterion) {
    let listing = create_listing(1);
    let preferred = create_requirement().preferred_locations;
    let zones = ZoneTable::builtin();

    c.bench_function("location_score", |b| {
        b.iter(|| location_score(black_box(&listing), black_box(&preferred), 50, zones));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let requirement = create_requirement();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let listings: Vec<Listing> = (0..*candidate_count).map(create_listing).collect();

        group.bench_with_input(
            BenchmarkId::new("find_listings", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| matcher.find_listings(black_box(&requirement), black_box(listings.clone())));
            },
        );
    }

    group.finish();
}

fn bench_find_brands(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let listing = create_listing(0);
    let brands: Vec<BrandProfile> = (0..500)
        .map(|i| BrandProfile {
            id: i.to_string(),
            name: format!("Brand {}", i),
            requirement: Requirement {
                preferred_locations: vec![AREAS[i % AREAS.len()].to_string()],
                ..create_requirement()
            },
        })
        .collect();

    c.bench_function("find_brands_500", |b| {
        b.iter(|| matcher.find_brands(black_box(&listing), black_box(brands.clone())));
    });
}

fn bench_ranking_pipeline(c: &mut Criterion) {
    let ranker = Ranker::with_defaults();
    let requirement = create_requirement();
    let query = RankingQuery::default();
    let listings: Vec<Listing> = (0..1000).map(create_listing).collect();

    c.bench_function("rank_1000_listings", |b| {
        b.iter(|| ranker.rank(black_box(&requirement), black_box(&query), black_box(listings.clone())));
    });
}

criterion_group!(
    benches,
    bench_brand_fit_index,
    bench_location_score,
    bench_matching,
    bench_find_brands,
    bench_ranking_pipeline
);

criterion_main!(benches);
