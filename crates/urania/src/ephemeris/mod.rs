#[cfg(feature = "swisseph")]
pub mod adapter;
pub mod provider;
pub mod types;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use provider::{
    validate_houses, validate_positions, EphemerisError, EphemerisProvider, FixedEphemeris,
};
pub use types::{
    Angles, BodyPosition, GeoLocation, HousePositions, HouseSystem, PositionSet,
};
