use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::ephemeris::{Angles, BodyPosition, HousePositions, HouseSystem};
use urania::points::{Point, BODIES};
use urania::zodiac::{project_longitude, ZodiacSystem};
use urania::{BirthRecord, ChartCalculator, FixedEphemeris, StaticGazetteer};

fn ephemeris() -> FixedEphemeris {
    let positions = BODIES
        .iter()
        .filter(|p| **p != Point::SouthNode)
        .enumerate()
        .map(|(i, point)| BodyPosition {
            point: *point,
            lon: (i as f64 * 47.3) % 360.0,
            lat: 0.0,
            speed_lon: if i % 4 == 3 { -0.2 } else { 1.0 },
        })
        .collect();
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = (123.0 + i as f64 * 30.0) % 360.0;
    }
    FixedEphemeris::new(
        positions,
        Some(HousePositions {
            system: HouseSystem::Placidus,
            cusps,
            angles: Angles::from_asc_mc(123.0, 33.0),
        }),
    )
}

fn record(time_known: bool) -> BirthRecord {
    BirthRecord::new(
        "Bench",
        NaiveDate::from_ymd_opt(1990, 5, 15).unwrap_or_default(),
        NaiveTime::from_hms_opt(8, 45, 0),
        "Paris",
        time_known,
    )
}

fn bench_project_longitude(c: &mut Criterion) {
    c.bench_function("project_longitude_constellational", |b| {
        b.iter(|| project_longitude(ZodiacSystem::Constellational, black_box(257.3)))
    });
}

fn bench_compute_chart(c: &mut Criterion) {
    let calculator = ChartCalculator::default();
    let ephemeris = ephemeris();
    let timed = record(true);
    let untimed = record(false);

    c.bench_function("compute_chart_timed", |b| {
        b.iter(|| calculator.compute(black_box(&timed), &ephemeris, &StaticGazetteer))
    });
    c.bench_function("compute_chart_untimed", |b| {
        b.iter(|| calculator.compute(black_box(&untimed), &ephemeris, &StaticGazetteer))
    });
}

criterion_group!(benches, bench_project_longitude, bench_compute_chart);
criterion_main!(benches);
