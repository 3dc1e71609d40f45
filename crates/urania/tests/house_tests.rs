mod common;

use urania::houses::{house_of, sign_segments};
use urania::points::Point;
use urania::zodiac::{Sign, ZodiacSystem, ALL_SYSTEMS};
use urania::{ChartCalculator, ChartResult, StaticGazetteer};

fn timed_chart() -> ChartResult {
    ChartCalculator::default()
        .compute(&common::timed_record(), &common::sample_ephemeris(), &StaticGazetteer)
        .unwrap()
}

#[test]
fn test_point_houses() {
    let chart = timed_chart();
    let houses = chart.houses().expect("timed chart has houses");
    let house = |point: Point| {
        houses
            .point_houses
            .iter()
            .find(|h| h.point == point)
            .map(|h| h.house)
    };
    assert_eq!(house(Point::Sun), Some(2));
    assert_eq!(house(Point::Saturn), Some(1));
    // Mars sits in the arc that wraps through 0 degrees
    assert_eq!(house(Point::Mars), Some(6));
    assert_eq!(house(Point::Ascendant), Some(1));
    assert_eq!(house(Point::Midheaven), Some(10));
}

#[test]
fn test_house_of_matches_cusp_arcs() {
    for (i, cusp) in common::SAMPLE_CUSPS.iter().enumerate() {
        assert_eq!(house_of(&common::SAMPLE_CUSPS, *cusp), i as u8 + 1);
        assert_eq!(house_of(&common::SAMPLE_CUSPS, cusp + 0.5), i as u8 + 1);
    }
}

#[test]
fn test_chart_ruler_per_table() {
    let chart = timed_chart();
    let houses = chart.houses().unwrap();

    // Ascendant at 200: Libra in the tropical table, Virgo among the constellations
    let tropical = houses.for_system(ZodiacSystem::Tropical).unwrap();
    assert_eq!(tropical.cusps[0].sign, Sign::Libra);
    let ruler = tropical.chart_ruler.as_ref().unwrap();
    assert_eq!(ruler.ruler, Point::Venus);
    assert_eq!(ruler.sign, Sign::Sagittarius);
    assert_eq!(ruler.house, 2);

    let constellational = houses.for_system(ZodiacSystem::Constellational).unwrap();
    assert_eq!(constellational.cusps[0].sign, Sign::Virgo);
    let ruler = constellational.chart_ruler.as_ref().unwrap();
    assert_eq!(ruler.ruler, Point::Mercury);
    assert_eq!(ruler.sign, Sign::Scorpio);
    assert_eq!(ruler.house, 2);

    assert_eq!(tropical.house_rulers.len(), 12);
    assert_eq!(constellational.house_rulers.len(), 12);
}

#[test]
fn test_house_spans_multiple_signs() {
    let chart = timed_chart();
    let houses = chart.houses().unwrap();

    let tropical = houses.for_system(ZodiacSystem::Tropical).unwrap();
    let second: Vec<Sign> = tropical.sign_distribution[1]
        .segments
        .iter()
        .map(|s| s.sign)
        .collect();
    assert_eq!(second, vec![Sign::Scorpio, Sign::Sagittarius]);

    let constellational = houses.for_system(ZodiacSystem::Constellational).unwrap();
    let second: Vec<Sign> = constellational.sign_distribution[1]
        .segments
        .iter()
        .map(|s| s.sign)
        .collect();
    assert_eq!(second, vec![Sign::Libra, Sign::Scorpio, Sign::Ophiuchus]);

    for system in ALL_SYSTEMS {
        let total: f64 = houses
            .for_system(system)
            .unwrap()
            .sign_distribution
            .iter()
            .flat_map(|h| h.segments.iter())
            .map(|s| s.span)
            .sum();
        assert!((total - 360.0).abs() < 1e-6);
    }
}

#[test]
fn test_segment_boundaries_are_clipped() {
    let segments = sign_segments(ZodiacSystem::Constellational, 228.0, 258.0);
    assert!((segments[0].start - 228.0).abs() < 1e-9);
    assert!((segments[0].end - 241.047).abs() < 1e-9);
    assert!((segments.last().unwrap().end - 258.0).abs() < 1e-9);
}

#[test]
fn test_angles_are_projected() {
    let chart = timed_chart();
    let tropical = chart
        .houses()
        .unwrap()
        .for_system(ZodiacSystem::Tropical)
        .unwrap();
    let points: Vec<Point> = tropical.angles.iter().map(|a| a.point).collect();
    assert_eq!(
        points,
        vec![Point::Ascendant, Point::Midheaven, Point::Descendant, Point::ImumCoeli]
    );
    let dc = &tropical.angles[2];
    assert!((dc.longitude - 20.0).abs() < 1e-9);
    assert_eq!(dc.sign, Sign::Aries);
    assert!(!dc.retrograde);
}

#[test]
fn test_house_stellium() {
    let chart = timed_chart();
    let stelliums = &chart.houses().unwrap().house_stelliums;
    assert_eq!(stelliums.len(), 1);
    assert_eq!(stelliums[0].house, Some(2));
    assert_eq!(
        stelliums[0].participants,
        vec![Point::Sun, Point::Mercury, Point::Venus]
    );
}
