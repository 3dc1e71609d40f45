mod common;

use std::io::Write;
use urania::aspects::AspectKind;
use urania::ephemeris::{EphemerisError, HouseSystem};
use urania::rulers::Rulership;
use urania::settings::{ChartConfig, ConfigError};
use urania::{ChartCalculator, ChartError, StaticGazetteer};

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
version = "1.2.0"
house_system = "placidus"
rulership = "traditional"
exact_orb = 0.25
neutral_time = "06:00:00"

[point_weights]
sun = 10.0

[fallback_location]
label = "Null Island"
lat = 0.0
lon = 0.0
timezone = "UTC"
utc_offset_minutes = 0
"#
    )
    .unwrap();

    let config = ChartConfig::load(file.path()).unwrap();
    assert_eq!(config.version, "1.2.0");
    assert_eq!(config.rulership, Rulership::Traditional);
    assert_eq!(config.exact_orb, 0.25);
    assert_eq!(config.point_weights.sun, 10.0);
    assert_eq!(config.point_weights.moon, 4.0);
    assert_eq!(config.fallback_location.label, "Null Island");
    assert_eq!(config.aspects.len(), 7);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ChartConfig::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_invalid_toml() {
    assert!(matches!(
        ChartConfig::from_toml_str("version = "),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_version_must_be_semver() {
    for bad in ["1.0", "v1.0.0", "1.0.0-beta", ""] {
        let text = format!("version = \"{}\"", bad);
        assert!(
            matches!(ChartConfig::from_toml_str(&text), Err(ConfigError::Validation(_))),
            "accepted {}",
            bad
        );
    }
}

#[test]
fn test_invalid_orb_rejected() {
    let result = ChartConfig::from_toml_str(
        r#"
        [[aspects]]
        kind = "conjunction"
        angle = 0.0
        max_orb = 0.0
        weight = 1.0
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn test_calculator_rejects_invalid_config() {
    let config = ChartConfig {
        min_stellium: 2,
        ..ChartConfig::default()
    };
    assert!(ChartCalculator::new(config).is_err());
}

#[test]
fn test_aspect_list_drives_chart() {
    let config = ChartConfig::from_toml_str(
        r#"
        [[aspects]]
        kind = "conjunction"
        angle = 0.0
        max_orb = 8.0
        weight = 1.0
        "#,
    )
    .unwrap();
    let chart = ChartCalculator::new(config)
        .unwrap()
        .compute(
            &common::untimed_record(),
            &common::sample_ephemeris(),
            &StaticGazetteer,
        )
        .unwrap();
    assert!(!chart.core().aspects.is_empty());
    assert!(chart
        .core()
        .aspects
        .iter()
        .all(|a| a.kind == AspectKind::Conjunction));
}

#[test]
fn test_house_system_reaches_provider() {
    let config = ChartConfig {
        house_system: HouseSystem::Koch,
        ..ChartConfig::default()
    };
    let result = ChartCalculator::new(config).unwrap().compute(
        &common::timed_record(),
        &common::sample_ephemeris(),
        &StaticGazetteer,
    );
    assert!(matches!(
        result,
        Err(ChartError::Ephemeris(EphemerisError::HouseSystemMismatch {
            requested: HouseSystem::Koch,
            ..
        }))
    ));
}

#[test]
fn test_sample_config_parses() {
    let text = include_str!("../../../configs/urania.toml");
    let config = ChartConfig::from_toml_str(text).unwrap();
    assert_eq!(config, ChartConfig::default());
}
