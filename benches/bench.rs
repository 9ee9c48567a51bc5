// Criterion benchmarks for SoulTribe Match

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use soultribe_match::core::{intersect_hourly_windows, score_pair, FixedClock, Matcher, PairFlags, RankOptions};
use soultribe_match::models::{Body, Houses, Interval, MatchProfile, RadixSnapshot};
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap()
}

fn create_radix(seed: usize) -> RadixSnapshot {
    let offset = (seed * 37 % 360) as f64;
    let asc = (offset + 15.0) % 360.0;
    RadixSnapshot::from_longitudes([
        (Body::Sun, offset),
        (Body::Moon, (offset + 123.0) % 360.0),
        (Body::Venus, (offset + 47.0) % 360.0),
        (Body::Mars, (offset + 211.0) % 360.0),
    ])
    .with_houses(Houses {
        system: Some("P".to_string()),
        cusps: Some((0..12).map(|i| Some((asc + 30.0 * i as f64) % 360.0)).collect()),
        asc: Some(asc),
        mc: Some((asc + 270.0) % 360.0),
    })
}

fn create_windows(seed: usize) -> Vec<Interval> {
    (0..6)
        .map(|i| {
            let start = now() + Duration::hours(i * 10) + Duration::minutes((seed % 60) as i64);
            Interval::new(start, start + Duration::hours(4))
        })
        .collect()
}

fn create_candidate(id: usize) -> MatchProfile {
    MatchProfile {
        user_id: id.to_string(),
        display_name: Some(format!("User {}", id)),
        birth_time_known: id % 4 != 0,
        lang_primary: Some(if id % 5 == 0 { "de" } else { "en" }.to_string()),
        lang_secondary: None,
        languages: vec![],
        last_login_at: Some(now() - Duration::days((id % 40) as i64)),
        radix: Some(create_radix(id)),
        availability: create_windows(id),
        live_tz: Some(if id % 3 == 0 { "Europe/Berlin" } else { "America/Chicago" }.to_string()),
    }
}

fn bench_score_pair(c: &mut Criterion) {
    let a = create_radix(1);
    let b = create_radix(2);
    let flags = PairFlags {
        moon_half_weight: true,
        lang_primary_equal: true,
        lang_secondary_equal: false,
    };

    c.bench_function("score_pair", |bench| {
        bench.iter(|| score_pair(black_box(&a), black_box(&b), black_box(flags)))
    });
}

fn bench_intersect(c: &mut Criterion) {
    let a = create_windows(15);
    let b = create_windows(40);

    c.bench_function("intersect_hourly_windows", |bench| {
        bench.iter(|| {
            intersect_hourly_windows(black_box(&a), black_box(&b), black_box(now()), 3, 5)
        })
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::new(Arc::new(FixedClock(now())));
    let target = create_candidate(1_000_000);
    let options = RankOptions::default();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<MatchProfile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    matcher.rank(
                        black_box(&target),
                        black_box(candidates.clone()),
                        black_box(&options),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_score_pair, bench_intersect, bench_ranking);

criterion_main!(benches);
