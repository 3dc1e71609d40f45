use crate::birth::BirthDataError;
use crate::ephemeris::EphemerisError;
use crate::settings::ConfigError;
use thiserror::Error;

/// Fatal chart computation failures. Unknown birth time and unresolvable
/// locations are not errors; they degrade the result instead.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid birth data: {0}")]
    InvalidBirthData(#[from] BirthDataError),
    #[error("Ephemeris error: {0}")]
    Ephemeris(#[from] EphemerisError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
