//! Versioned chart configuration.
//!
//! Aspect definitions, point weights and the other tunables that change
//! rankings and dominance results. Loaded from TOML; every field has a
//! default so a partial file only overrides what it names.

use crate::aspects::{AspectDefinition, AspectKind};
use crate::birth::ResolvedLocation;
use crate::ephemeris::{GeoLocation, HouseSystem};
use crate::points::Point;
use crate::rulers::Rulership;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_VERSION: &str = "1.0.0";

/// Paths probed by [`ChartConfig::discover`], relative to the working directory.
pub const CONFIG_PATHS: &[&str] = &["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {message}")]
    Io { path: String, message: String },
    #[error("Invalid TOML: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

lazy_static::lazy_static! {
    static ref VERSION_RE: regex::Regex =
        regex::Regex::new(r"^\d+\.\d+\.\d+$").expect("version pattern is valid");
}

/// Importance weight per point, shared by aspect scoring and dominance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointWeights {
    pub sun: f64,
    pub moon: f64,
    pub mercury: f64,
    pub venus: f64,
    pub mars: f64,
    pub jupiter: f64,
    pub saturn: f64,
    pub uranus: f64,
    pub neptune: f64,
    pub pluto: f64,
    pub north_node: f64,
    pub south_node: f64,
    pub chiron: f64,
    pub asc: f64,
    pub mc: f64,
    pub dc: f64,
    pub ic: f64,
}

impl Default for PointWeights {
    fn default() -> Self {
        Self {
            sun: 4.0,
            moon: 4.0,
            mercury: 2.0,
            venus: 2.0,
            mars: 2.0,
            jupiter: 1.5,
            saturn: 1.5,
            uranus: 1.0,
            neptune: 1.0,
            pluto: 1.0,
            north_node: 0.5,
            south_node: 0.5,
            chiron: 0.5,
            asc: 4.0,
            mc: 2.0,
            dc: 1.0,
            ic: 1.0,
        }
    }
}

impl PointWeights {
    pub fn weight(&self, point: Point) -> f64 {
        match point {
            Point::Sun => self.sun,
            Point::Moon => self.moon,
            Point::Mercury => self.mercury,
            Point::Venus => self.venus,
            Point::Mars => self.mars,
            Point::Jupiter => self.jupiter,
            Point::Saturn => self.saturn,
            Point::Uranus => self.uranus,
            Point::Neptune => self.neptune,
            Point::Pluto => self.pluto,
            Point::NorthNode => self.north_node,
            Point::SouthNode => self.south_node,
            Point::Chiron => self.chiron,
            Point::Ascendant => self.asc,
            Point::Midheaven => self.mc,
            Point::Descendant => self.dc,
            Point::ImumCoeli => self.ic,
        }
    }
}

/// Default aspect definitions, in priority order.
pub fn default_aspects() -> Vec<AspectDefinition> {
    [
        (AspectKind::Conjunction, 0.0, 8.0, 1.0),
        (AspectKind::Opposition, 180.0, 8.0, 0.9),
        (AspectKind::Trine, 120.0, 7.0, 0.8),
        (AspectKind::Square, 90.0, 6.0, 0.8),
        (AspectKind::Sextile, 60.0, 4.0, 0.6),
        (AspectKind::Quincunx, 150.0, 3.0, 0.4),
        (AspectKind::Semisextile, 30.0, 2.0, 0.3),
    ]
    .into_iter()
    .map(|(kind, angle, max_orb, weight)| AspectDefinition {
        kind,
        angle,
        max_orb,
        weight,
    })
    .collect()
}

fn default_fallback_location() -> ResolvedLocation {
    ResolvedLocation {
        label: "Greenwich".to_string(),
        location: GeoLocation {
            lat: 51.4779,
            lon: 0.0,
        },
        timezone: "UTC".to_string(),
        utc_offset_minutes: 0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Configuration version (major.minor.patch); bump when any coefficient changes
    pub version: String,
    pub house_system: HouseSystem,
    pub rulership: Rulership,
    /// |speed| at or below this (degrees/day) counts as stationary
    pub stationary_threshold: f64,
    /// Orb below which an aspect is flagged exact
    pub exact_orb: f64,
    /// Clock time substituted when the birth time is unknown
    pub neutral_time: NaiveTime,
    pub min_stellium: usize,
    pub fallback_location: ResolvedLocation,
    pub aspects: Vec<AspectDefinition>,
    pub point_weights: PointWeights,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            house_system: HouseSystem::Placidus,
            rulership: Rulership::Modern,
            stationary_threshold: 1e-5,
            exact_orb: 0.1,
            neutral_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default(),
            min_stellium: 3,
            fallback_location: default_fallback_location(),
            aspects: default_aspects(),
            point_weights: PointWeights::default(),
        }
    }
}

impl ChartConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ChartConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded chart config v{} from {}", config.version, path.display());
        Ok(config)
    }

    /// Try the common relative paths for `configs/urania.toml`.
    pub fn discover() -> Result<Option<(PathBuf, Self)>, ConfigError> {
        for p in CONFIG_PATHS {
            let path = PathBuf::from(p);
            if path.is_file() {
                let config = Self::load(&path)?;
                return Ok(Some((path, config)));
            }
        }
        log::debug!("No config found in {:?}", CONFIG_PATHS);
        Ok(None)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VERSION_RE.is_match(&self.version) {
            return Err(ConfigError::Validation(format!(
                "version must be in format major.minor.patch (e.g., \"1.0.0\"), got: {}",
                self.version
            )));
        }
        if self.aspects.is_empty() {
            return Err(ConfigError::Validation(
                "aspects must have at least one definition".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for (index, def) in self.aspects.iter().enumerate() {
            if !seen.insert(def.kind) {
                return Err(ConfigError::Validation(format!(
                    "aspects[{}]: duplicate definition for {}",
                    index, def.kind
                )));
            }
            if !(0.0..=180.0).contains(&def.angle) {
                return Err(ConfigError::Validation(format!(
                    "aspects[{}].angle must be between 0 and 180",
                    index
                )));
            }
            if !(def.max_orb > 0.0 && def.max_orb < 30.0) {
                return Err(ConfigError::Validation(format!(
                    "aspects[{}].max_orb must be in (0, 30)",
                    index
                )));
            }
            if !(def.weight >= 0.0 && def.weight.is_finite()) {
                return Err(ConfigError::Validation(format!(
                    "aspects[{}].weight must be a non-negative number",
                    index
                )));
            }
        }
        let weights = &self.point_weights;
        let all_points = crate::points::BODIES.iter().chain(crate::points::ANGLES.iter());
        for point in all_points {
            let w = weights.weight(*point);
            if !(w >= 0.0 && w.is_finite()) {
                return Err(ConfigError::Validation(format!(
                    "point_weights.{} must be a non-negative number",
                    point.id()
                )));
            }
        }
        if !(self.stationary_threshold >= 0.0 && self.stationary_threshold < 1.0) {
            return Err(ConfigError::Validation(
                "stationary_threshold must be in [0, 1)".to_string(),
            ));
        }
        if self.exact_orb < 0.0 {
            return Err(ConfigError::Validation(
                "exact_orb must not be negative".to_string(),
            ));
        }
        if self.min_stellium < 3 {
            return Err(ConfigError::Validation(
                "min_stellium must be at least 3".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ChartConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.aspects.first().map(|d| d.kind), Some(AspectKind::Conjunction));
        assert_eq!(config.aspects.len(), 7);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ChartConfig::from_toml_str(
            r#"
            version = "1.1.0"
            rulership = "traditional"

            [point_weights]
            sun = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(config.version, "1.1.0");
        assert_eq!(config.rulership, Rulership::Traditional);
        assert_eq!(config.point_weights.sun, 5.0);
        assert_eq!(config.point_weights.moon, 4.0);
        assert_eq!(config.aspects.len(), 7);
        assert_eq!(config.house_system, HouseSystem::Placidus);
    }

    #[test]
    fn test_bad_version_rejected() {
        let err = ChartConfig::from_toml_str(r#"version = "one""#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_duplicate_aspect_rejected() {
        let err = ChartConfig::from_toml_str(
            r#"
            [[aspects]]
            kind = "trine"
            angle = 120.0
            max_orb = 7.0
            weight = 0.8

            [[aspects]]
            kind = "trine"
            angle = 120.0
            max_orb = 5.0
            weight = 0.8
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
