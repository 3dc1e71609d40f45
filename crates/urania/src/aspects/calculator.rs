use crate::aspects::types::{Aspect, AspectDefinition};
use crate::points::Point;
use crate::settings::{ChartConfig, PointWeights};
use crate::zodiac::{angular_separation, PointPlacement};

/// Aspect calculator
pub struct AspectCalculator<'a> {
    definitions: &'a [AspectDefinition],
    weights: &'a PointWeights,
    exact_orb: f64,
}

impl<'a> AspectCalculator<'a> {
    pub fn new(definitions: &'a [AspectDefinition], weights: &'a PointWeights, exact_orb: f64) -> Self {
        Self {
            definitions,
            weights,
            exact_orb,
        }
    }

    pub fn from_config(config: &'a ChartConfig) -> Self {
        Self::new(&config.aspects, &config.point_weights, config.exact_orb)
    }

    /// Compute every qualifying aspect among `placements`, sorted by score.
    ///
    /// Aspects depend only on longitudes, so any one table's placements give
    /// the same result.
    pub fn compute(&self, placements: &[PointPlacement]) -> Vec<Aspect> {
        let mut ordered: Vec<&PointPlacement> = placements.iter().collect();
        ordered.sort_by_key(|p| p.point);

        let mut aspects = Vec::new();
        for i in 0..ordered.len() {
            for j in (i + 1)..ordered.len() {
                let (p1, p2) = (ordered[i], ordered[j]);
                if p1.point == p2.point {
                    continue;
                }
                if let Some(aspect) = self.calculate_aspect(
                    p1.point,
                    p2.point,
                    p1.longitude,
                    p2.longitude,
                    p1.speed,
                    p2.speed,
                ) {
                    aspects.push(aspect);
                }
            }
        }

        self.sort(&mut aspects);
        log::debug!(
            "Found {} aspects among {} points",
            aspects.len(),
            ordered.len()
        );
        aspects
    }

    /// Calculate aspect between two points using their speeds.
    ///
    /// Definitions are tried in priority order; the first whose orb accepts
    /// the separation wins.
    pub fn calculate_aspect(
        &self,
        a: Point,
        b: Point,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
    ) -> Option<Aspect> {
        let separation = angular_separation(lon1, lon2);

        for def in self.definitions {
            let orb = (separation - def.angle).abs();
            if orb > def.max_orb {
                continue;
            }

            let tightness = (def.max_orb - orb) / def.max_orb;
            let pair_weight = (self.weights.weight(a) + self.weights.weight(b)) / 2.0;
            // Angles are projected without a speed of their own
            let applying = if a.is_angle() || b.is_angle() {
                None
            } else {
                is_aspect_applying(lon1, lon2, speed1, speed2, def.angle, separation)
            };
            let structural = a.axis_partner() == Some(b);

            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            return Some(Aspect {
                a,
                b,
                kind: def.kind,
                exact_angle: def.angle,
                separation,
                orb,
                max_orb: def.max_orb,
                score: 100.0 * tightness * def.weight * pair_weight,
                applying,
                exact: orb < self.exact_orb,
                structural,
            });
        }

        None
    }

    /// Score descending, then kind priority, then point pair.
    pub fn sort(&self, aspects: &mut [Aspect]) {
        aspects.sort_by(|x, y| {
            y.score
                .total_cmp(&x.score)
                .then_with(|| self.priority(x).cmp(&self.priority(y)))
                .then_with(|| (x.a, x.b).cmp(&(y.a, y.b)))
        });
    }

    fn priority(&self, aspect: &Aspect) -> usize {
        self.definitions
            .iter()
            .position(|d| d.kind == aspect.kind)
            .unwrap_or(usize::MAX)
    }
}

/// Relative speeds below this (degrees per day) give no usable direction.
pub const MIN_RELATIVE_SPEED: f64 = 0.01;

/// Determine if an aspect is applying (approaching exact) or separating.
///
/// Returns `None` when the two points move too nearly in step to tell.
pub fn is_aspect_applying(
    lon1: f64,
    lon2: f64,
    speed1: f64,
    speed2: f64,
    aspect_angle: f64,
    current_angle: f64,
) -> Option<bool> {
    // Relative speed (degrees per day)
    let relative_speed = speed1 - speed2;
    if relative_speed.abs() < MIN_RELATIVE_SPEED {
        return None;
    }

    let signed_diff = wrap_signed(lon1 - lon2);
    let current_distance = (current_angle - aspect_angle).abs();

    // Project forward a small amount to see if we're getting closer to exact
    let time_step = 0.1;
    let future_signed_diff = wrap_signed(signed_diff + relative_speed * time_step);
    let future_distance = (future_signed_diff.abs() - aspect_angle).abs();

    Some(future_distance < current_distance)
}

fn wrap_signed(diff: f64) -> f64 {
    if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    }
}
