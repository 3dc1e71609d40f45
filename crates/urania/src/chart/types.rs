use crate::analysis::DominanceSummary;
use crate::aspects::Aspect;
use crate::birth::ResolvedContext;
use crate::calendar_zodiac::CalendarZodiacProfile;
use crate::ephemeris::HouseSystem;
use crate::houses::{PointHouse, SystemHouses};
use crate::numerology::NumerologyProfile;
use crate::patterns::AspectPattern;
use crate::zodiac::{SystemPlacements, ZodiacSystem};
use serde::Serialize;

/// Fields every chart carries, whether or not the birth time is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartCore {
    pub subject: String,
    pub config_version: String,
    pub context: ResolvedContext,
    pub time_known: bool,
    pub location_degraded: bool,
    /// Body placements, one entry per sign table
    pub placements: Vec<SystemPlacements>,
    /// Sorted by score descending
    pub aspects: Vec<Aspect>,
    pub patterns: Vec<AspectPattern>,
    pub dominance: Vec<DominanceSummary>,
    pub numerology: NumerologyProfile,
    pub calendar_zodiac: CalendarZodiacProfile,
}

impl ChartCore {
    pub fn placements_for(&self, system: ZodiacSystem) -> Option<&SystemPlacements> {
        self.placements.iter().find(|p| p.system == system)
    }

    pub fn dominance_for(&self, system: ZodiacSystem) -> Option<&DominanceSummary> {
        self.dominance.iter().find(|d| d.system == system)
    }
}

/// House-dependent output; only exists when the birth time is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseData {
    pub house_system: HouseSystem,
    pub point_houses: Vec<PointHouse>,
    pub systems: Vec<SystemHouses>,
    pub house_stelliums: Vec<AspectPattern>,
}

impl HouseData {
    pub fn for_system(&self, system: ZodiacSystem) -> Option<&SystemHouses> {
        self.systems.iter().find(|s| s.system == system)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedChart {
    #[serde(flatten)]
    pub core: ChartCore,
    pub houses: HouseData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UntimedChart {
    #[serde(flatten)]
    pub core: ChartCore,
}

/// A computed chart. The variant is chosen once, at assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ChartResult {
    Timed(TimedChart),
    Untimed(UntimedChart),
}

impl ChartResult {
    pub fn core(&self) -> &ChartCore {
        match self {
            Self::Timed(chart) => &chart.core,
            Self::Untimed(chart) => &chart.core,
        }
    }

    pub fn houses(&self) -> Option<&HouseData> {
        match self {
            Self::Timed(chart) => Some(&chart.houses),
            Self::Untimed(_) => None,
        }
    }

    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Timed(_))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
