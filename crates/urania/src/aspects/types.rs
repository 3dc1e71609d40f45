use crate::points::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Quincunx,
    Semisextile,
}

impl AspectKind {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Opposition => "opposition",
            Self::Trine => "trine",
            Self::Square => "square",
            Self::Sextile => "sextile",
            Self::Quincunx => "quincunx",
            Self::Semisextile => "semisextile",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One entry of the ordered aspect definition list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    /// Exact angle for this aspect, in [0, 180]
    pub angle: f64,
    /// Largest accepted deviation from `angle`
    pub max_orb: f64,
    /// Importance weight used in scoring
    pub weight: f64,
}

/// A qualifying angular relationship between two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aspect {
    /// First point of the pair (`a < b` in point order)
    pub a: Point,
    pub b: Point,
    pub kind: AspectKind,
    pub exact_angle: f64,
    /// Observed separation, in [0, 180]
    pub separation: f64,
    /// Deviation from the exact angle
    pub orb: f64,
    pub max_orb: f64,
    pub score: f64,
    /// Whether the aspect is applying (approaching exact). `None` when an
    /// angle takes part or the two points move in step.
    pub applying: Option<bool>,
    /// Whether the orb is below the configured exactness threshold
    pub exact: bool,
    /// Opposition of an axis pair (nodes, Asc/Dc, Mc/Ic), exact by construction
    pub structural: bool,
}

impl Aspect {
    pub fn involves(&self, point: Point) -> bool {
        self.a == point || self.b == point
    }

    pub fn connects(&self, p: Point, q: Point) -> bool {
        (self.a == p && self.b == q) || (self.a == q && self.b == p)
    }
}
