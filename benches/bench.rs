// Criterion benchmarks for FindMyUni

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use findmyuni::core::{interval::ranges_overlap, range::parse_range, Matcher};
use findmyuni::models::{preference_set, StudentPreferences, UniversityRecord};

const STATES: [&str; 6] = ["Lagos", "Ogun", "Oyo", "Kano", "Enugu", "Rivers"];
const REGIONS: [&str; 6] = ["South West", "South West", "South West", "North West", "South East", "South South"];

fn create_candidate(id: usize) -> UniversityRecord {
    let tuition = format!("{},000 - {},000 naira", 50 + (id % 40) * 25, 150 + (id % 40) * 25);
    let cost = format!("{},000 naira", 40 + (id % 20) * 5);

    UniversityRecord {
        id: id as i32,
        name: format!("University {}", id),
        geopolitical_region: REGIONS[id % REGIONS.len()].to_string(),
        state: STATES[id % STATES.len()].to_string(),
        specialty: if id % 4 == 0 { "Technology" } else { "Conventional" }.to_string(),
        ownership: ["Federal", "State", "Private"][id % 3].to_string(),
        university_type: None,
        academic_rigor: Some((id % 5) as i32 + 1),
        sports_facilities: Some((id % 3) as i32 + 1),
        hostel_quality: if id % 2 == 0 { Some(3) } else { None },
        social_life: Some(4),
        tuition: parse_range(Some(&tuition)),
        cost_of_living: parse_range(Some(&cost)),
        tuition_display: Some(tuition),
        cost_of_living_display: Some(cost),
        source_url_1: None,
        source_url_2: None,
    }
}

fn create_preferences(tuition: &str) -> StudentPreferences {
    StudentPreferences {
        specialties: preference_set(["Conventional"]),
        ownerships: preference_set(["Federal", "State"]),
        states: preference_set(["Lagos"]),
        regions: preference_set(["South West"]),
        academic_importance: 5,
        hostel_importance: 3,
        sports_importance: 1,
        social_life_importance: 2,
        tuition_range: Some(tuition.to_string()),
        cost_of_living_range: Some("50,000 - 80,000 naira".to_string()),
    }
}

fn bench_parse_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_range");

    for text in ["100,000 - 300,000 naira", "Greater than 2,000,000 naira", "70,000 naira"] {
        group.bench_with_input(BenchmarkId::from_parameter(text), text, |b, text| {
            b.iter(|| parse_range(black_box(Some(text))));
        });
    }

    group.finish();
}

fn bench_ranges_overlap(c: &mut Criterion) {
    c.bench_function("ranges_overlap", |b| {
        b.iter(|| {
            ranges_overlap(
                black_box(Some(100_000)),
                black_box(Some(300_000)),
                black_box(Some(250_000)),
                black_box(None),
            )
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 100, 500, 1000].iter() {
        let candidates: Vec<UniversityRecord> = (0..*candidate_count).map(create_candidate).collect();

        for (label, tuition) in [("primary", "100,000 - 300,000 naira"), ("fallback", "Less than 10,000 naira")] {
            let preferences = create_preferences(tuition);

            group.bench_with_input(
                BenchmarkId::new(label, candidate_count),
                candidate_count,
                |b, _| {
                    b.iter(|| matcher.find_matches(black_box(&preferences), black_box(&candidates)));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_range,
    bench_ranges_overlap,
    bench_matching
);

criterion_main!(benches);
