use crate::analysis::analyze_dominance;
use crate::aspects::AspectCalculator;
use crate::birth::{resolve_context, BirthInput, BirthRecord, LocationResolver};
use crate::calendar_zodiac::calendar_zodiac;
use crate::chart::types::{ChartCore, ChartResult, HouseData, TimedChart, UntimedChart};
use crate::ephemeris::{validate_houses, validate_positions, EphemerisProvider};
use crate::error::ChartError;
use crate::houses::HouseAssembler;
use crate::numerology::NumerologyProfile;
use crate::patterns::{AspectGraph, PatternDetector};
use crate::points::Point;
use crate::settings::{ChartConfig, ConfigError};
use crate::zodiac::{PointPlacement, SystemPlacements, ZodiacProjector, ZodiacSystem, ALL_SYSTEMS};

/// Runs the full chart pipeline. Holds only an immutable configuration, so
/// one calculator can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ChartCalculator {
    config: ChartConfig,
}

impl ChartCalculator {
    pub fn new(config: ChartConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Parse raw birth data, then compute.
    pub fn compute_input(
        &self,
        input: &BirthInput,
        ephemeris: &dyn EphemerisProvider,
        locations: &dyn LocationResolver,
    ) -> Result<ChartResult, ChartError> {
        let record = BirthRecord::parse(input)?;
        self.compute(&record, ephemeris, locations)
    }

    pub fn compute(
        &self,
        record: &BirthRecord,
        ephemeris: &dyn EphemerisProvider,
        locations: &dyn LocationResolver,
    ) -> Result<ChartResult, ChartError> {
        let config = &self.config;
        let context = resolve_context(record, locations, config)?;

        let positions = validate_positions(ephemeris.positions(context.instant)?)?;
        let projector = ZodiacProjector::new(config.stationary_threshold);
        let placements: Vec<SystemPlacements> = ALL_SYSTEMS
            .iter()
            .map(|system| projector.project_bodies(*system, &positions))
            .collect();
        log::debug!("Projected {} bodies onto {} tables", positions.bodies.len(), placements.len());

        let house_positions = if context.time_known {
            let houses =
                ephemeris.houses(context.instant, &context.location.location, config.house_system)?;
            validate_houses(&houses)?;
            Some(houses)
        } else {
            log::debug!("Birth time unknown; skipping houses");
            None
        };
        let house_assembler = house_positions
            .as_ref()
            .map(|houses| HouseAssembler::new(houses, projector, config.rulership));

        // Bodies plus, when known, the angles. Aspects only use longitudes, so
        // the tropical projection stands in for both tables.
        let with_angles = |system: ZodiacSystem| -> Vec<PointPlacement> {
            let mut points = placements
                .iter()
                .find(|p| p.system == system)
                .map(|p| p.placements.clone())
                .unwrap_or_default();
            if let Some(assembler) = &house_assembler {
                points.extend(assembler.angle_placements(system));
            }
            points
        };

        let aspect_points = with_angles(ZodiacSystem::Tropical);
        let aspects = AspectCalculator::from_config(config).compute(&aspect_points);

        let nodes: Vec<Point> = aspect_points.iter().map(|p| p.point).collect();
        let graph = AspectGraph::new(&nodes, &aspects);
        let detector = PatternDetector::new(&graph, config.min_stellium);
        let mut patterns = detector.detect();
        for system_placements in &placements {
            patterns.extend(detector.sign_stelliums(system_placements));
        }

        let dominance = ALL_SYSTEMS
            .iter()
            .filter_map(|system| {
                analyze_dominance(
                    *system,
                    &with_angles(*system),
                    &config.point_weights,
                    config.rulership,
                )
            })
            .collect();

        let house_data = house_assembler.map(|assembler| {
            let point_houses = assembler.point_houses(&aspect_points);
            let systems = placements
                .iter()
                .map(|p| assembler.assemble(p.system, &p.placements, &point_houses))
                .collect();
            let house_stelliums = detector.house_stelliums(&point_houses);
            HouseData {
                house_system: assembler.house_system(),
                point_houses,
                systems,
                house_stelliums,
            }
        });

        let core = ChartCore {
            subject: record.name().to_string(),
            config_version: config.version.clone(),
            time_known: context.time_known,
            location_degraded: context.location_degraded,
            numerology: NumerologyProfile::from_date(record.date()),
            calendar_zodiac: calendar_zodiac(record.date()),
            context,
            placements,
            aspects,
            patterns,
            dominance,
        };

        log::info!(
            "Computed chart for '{}': {} aspects, {} patterns (time_known={}, degraded={})",
            core.subject,
            core.aspects.len(),
            core.patterns.len(),
            core.time_known,
            core.location_degraded
        );

        Ok(match house_data {
            Some(houses) => ChartResult::Timed(TimedChart { core, houses }),
            None => ChartResult::Untimed(UntimedChart { core }),
        })
    }
}
