//! Planetary ephemeris calculations module
//!
//! Bodies are a closed enumeration. The Sun and Moon use closed-form
//! low-precision series; every other body goes through its Keplerian
//! orbital elements and the Kepler solver.

pub mod elements;
pub mod ephemeris;
pub mod kepler;

pub use elements::{orbital_elements, OrbitalElements};
pub use ephemeris::{Ephemeris, EphemerisSnapshot};
pub use kepler::{KeplerError, KeplerSolver};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for planetary calculations
#[derive(Debug, Error)]
pub enum PlanetError {
    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Earth has no geocentric position; request it heliocentrically")]
    GeocentricEarth,

    #[error("Kepler solver failed: {0}")]
    Kepler(#[from] KeplerError),
}

/// Enum representing the bodies the engine can place in a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// Bodies with a closed-form ephemeris
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Luminary {
    Sun,
    Moon,
}

/// Bodies with tabulated Keplerian elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// How a body's position is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyModel {
    ClosedForm(Luminary),
    Keplerian(Planet),
}

impl Body {
    /// Every body in declaration order
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// Bodies that have a geocentric position (everything but Earth)
    pub const CHART_BODIES: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }

    /// Which ephemeris model computes this body
    pub fn model(&self) -> BodyModel {
        match self {
            Body::Sun => BodyModel::ClosedForm(Luminary::Sun),
            Body::Moon => BodyModel::ClosedForm(Luminary::Moon),
            Body::Mercury => BodyModel::Keplerian(Planet::Mercury),
            Body::Venus => BodyModel::Keplerian(Planet::Venus),
            Body::Earth => BodyModel::Keplerian(Planet::Earth),
            Body::Mars => BodyModel::Keplerian(Planet::Mars),
            Body::Jupiter => BodyModel::Keplerian(Planet::Jupiter),
            Body::Saturn => BodyModel::Keplerian(Planet::Saturn),
            Body::Uranus => BodyModel::Keplerian(Planet::Uranus),
            Body::Neptune => BodyModel::Keplerian(Planet::Neptune),
        }
    }
}

impl Planet {
    /// The matching [`Body`]
    pub fn body(&self) -> Body {
        match self {
            Planet::Mercury => Body::Mercury,
            Planet::Venus => Body::Venus,
            Planet::Earth => Body::Earth,
            Planet::Mars => Body::Mars,
            Planet::Jupiter => Body::Jupiter,
            Planet::Saturn => Body::Saturn,
            Planet::Uranus => Body::Uranus,
            Planet::Neptune => Body::Neptune,
        }
    }

    pub fn name(&self) -> &'static str {
        self.body().name()
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = PlanetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlanetError::UnknownBody(s.to_string()))
    }
}

impl FromStr for Planet {
    type Err = PlanetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Body>()?.model() {
            BodyModel::Keplerian(planet) => Ok(planet),
            BodyModel::ClosedForm(_) => Err(PlanetError::UnknownBody(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_names_round_trip() {
        for body in Body::ALL {
            assert_eq!(body.name().parse::<Body>().unwrap(), body);
        }
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        assert_eq!("  mars ".parse::<Body>().unwrap(), Body::Mars);
        assert_eq!("SATURN".parse::<Planet>().unwrap(), Planet::Saturn);
    }

    #[test]
    fn test_unknown_body_is_an_error() {
        match "Pluto".parse::<Body>() {
            Err(PlanetError::UnknownBody(name)) => assert_eq!(name, "Pluto"),
            other => panic!("expected UnknownBody, got {:?}", other),
        }
        // The Sun has no orbital elements
        assert!("Sun".parse::<Planet>().is_err());
    }

    #[test]
    fn test_models() {
        assert_eq!(Body::Moon.model(), BodyModel::ClosedForm(Luminary::Moon));
        assert_eq!(Body::Earth.model(), BodyModel::Keplerian(Planet::Earth));
        assert!(!Body::CHART_BODIES.contains(&Body::Earth));
        for planet in [Planet::Mercury, Planet::Neptune] {
            assert_eq!(planet.body().model(), BodyModel::Keplerian(planet));
        }
    }
}
