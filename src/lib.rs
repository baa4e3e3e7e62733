//! Starchart: astronomical positions and house systems for natal charts
//!
//! This crate computes geocentric ecliptic positions of the Sun, Moon and
//! planets from analytic models, places them in the zodiac and in houses for
//! an observer, and finds the aspects between them.
//!
//! ```
//! use starchart::{BirthData, Body, Engine};
//!
//! let engine = Engine::new();
//! let jd = Engine::julian_day(1992, 10, 13, 0, 0, 0.0);
//!
//! let sun = engine.body_position(Body::Sun, jd).unwrap();
//! assert!((sun.longitude - 199.91).abs() < 0.01);
//!
//! let chart = engine.natal_chart(BirthData::new(jd, 40.0, -74.0)).unwrap();
//! assert_eq!(chart.placements.len(), 9);
//! ```

use thiserror::Error;

pub mod aspects;
pub mod chart;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod houses;
pub mod planetlib;
pub mod retrograde;
pub mod time;
pub mod zodiac;

// Re-export commonly used types
pub use aspects::{Aspect, AspectAnalyzer, AspectKind, OrbTable};
pub use chart::{BirthData, BodyPlacement, NatalChart};
pub use config::{ConfigError, EngineConfig};
pub use coordinates::{EclipticCoordinates, EquatorialCoordinates, HorizontalCoordinates};
pub use houses::{HouseCusps, HouseError, HouseSystem};
pub use planetlib::{Body, Ephemeris, KeplerError, PlanetError};
pub use time::{CalendarTuple, TimeError};
pub use zodiac::{SignPosition, ZodiacSign};

/// Main error type for the starchart library
#[derive(Debug, Error)]
pub enum StarchartError {
    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    #[error("Planet error: {0}")]
    Planet(#[from] PlanetError),

    #[error("House error: {0}")]
    House(#[from] HouseError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<KeplerError> for StarchartError {
    fn from(err: KeplerError) -> Self {
        StarchartError::Planet(PlanetError::Kepler(err))
    }
}

/// Result type for starchart operations
pub type Result<T> = std::result::Result<T, StarchartError>;

/// Entry point bundling a validated configuration with the models it drives
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    ephemeris: Ephemeris,
    analyzer: AspectAnalyzer,
}

impl Engine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            ephemeris: Ephemeris::with_solver(config.kepler),
            analyzer: AspectAnalyzer::new(config.orbs),
            config,
        }
    }

    /// Create an engine from a configuration, validating it first
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ephemeris: Ephemeris::with_solver(config.kepler),
            analyzer: AspectAnalyzer::new(config.orbs),
            config,
        })
    }

    /// Create an engine from a JSON configuration file
    pub fn from_config_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::with_config(EngineConfig::from_file(path)?)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ephemeris(&self) -> &Ephemeris {
        &self.ephemeris
    }

    /// Julian Day for a proleptic Gregorian date and UT time of day
    pub fn julian_day(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
        time::julian_day(year, month, day, hour, minute, second)
    }

    /// Geocentric ecliptic position of a body looked up by name
    pub fn planet_position(&self, name: &str, jd: f64) -> Result<EclipticCoordinates> {
        self.body_position(name.parse::<Body>()?, jd)
    }

    /// Geocentric ecliptic position of a body
    pub fn body_position(&self, body: Body, jd: f64) -> Result<EclipticCoordinates> {
        Ok(self.ephemeris.position(body, jd)?)
    }

    pub fn sun_position(&self, jd: f64) -> EclipticCoordinates {
        planetlib::ephemeris::sun_position(jd)
    }

    pub fn moon_position(&self, jd: f64) -> EclipticCoordinates {
        planetlib::ephemeris::moon_position(jd)
    }

    /// House cusps under the configured house system
    pub fn house_cusps(&self, jd: f64, latitude: f64, longitude: f64) -> Result<HouseCusps> {
        self.house_cusps_with(self.config.house_system, jd, latitude, longitude)
    }

    /// House cusps under an explicit house system
    pub fn house_cusps_with(
        &self,
        system: HouseSystem,
        jd: f64,
        latitude: f64,
        longitude: f64,
    ) -> Result<HouseCusps> {
        Ok(houses::house_cusps(
            jd,
            latitude,
            longitude,
            system,
            self.config.polar_latitude_limit,
        )?)
    }

    pub fn house_of_longitude(longitude: f64, cusps: &HouseCusps) -> u8 {
        cusps.house_of(longitude)
    }

    /// Aspects among positions, pairs in the order given
    pub fn aspects_among<I>(&self, positions: I) -> Vec<Aspect>
    where
        I: IntoIterator<Item = (Body, EclipticCoordinates)>,
    {
        self.analyzer.aspects(positions)
    }

    pub fn is_retrograde(&self, body: Body, jd: f64) -> Result<bool> {
        Ok(retrograde::is_retrograde(&self.ephemeris, body, jd)?)
    }

    pub fn daily_motion(&self, body: Body, jd: f64) -> Result<f64> {
        Ok(retrograde::daily_motion(&self.ephemeris, body, jd)?)
    }

    pub fn zodiac_sign_and_degree(longitude: f64) -> SignPosition {
        SignPosition::from_longitude(longitude)
    }

    /// Altitude and azimuth of a body for an observer
    pub fn horizontal_position(
        &self,
        body: Body,
        jd: f64,
        latitude: f64,
        longitude: f64,
    ) -> Result<HorizontalCoordinates> {
        let ecliptic = self.body_position(body, jd)?;
        Ok(coordinates::horizontal_position(&ecliptic, jd, latitude, longitude))
    }

    pub fn natal_chart(&self, birth: BirthData) -> Result<NatalChart> {
        NatalChart::compute(self, birth)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
