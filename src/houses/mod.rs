//! House cusps and house membership
//!
//! Every system starts from the right ascension of the meridian (RAMC, the
//! local sidereal time in degrees) and the Ascendant. The quadrant systems
//! split each arc between consecutive angles into three equal parts:
//!
//! ```text
//! Asc -> IC   : cusps 2, 3
//! IC  -> Dsc  : cusps 5, 6
//! Dsc -> MC   : cusps 8, 9
//! MC  -> Asc  : cusps 11, 12
//! ```
//!
//! [`HouseSystem::EqualTrisection`] takes the Midheaven to be RAMC itself.
//! This is a coarse stand-in for Placidus and is NOT the time-of-ascension
//! Placidus construction; it keeps its own name so consumers never mistake it
//! for one.
//!
//! Above the Arctic Circle (|latitude| > 90° - ε) the ecliptic can lie
//! wholly above or below the horizon, and for part of each sidereal day the
//! Ascendant formula returns a point west of the Midheaven. The four
//! quadrant arcs then no longer cover the circle once, so those instants are
//! refused with [`HouseError::DegenerateAngles`] for every system.

use crate::constants::{DEG2RAD, DEGREES_PER_HOUR, RAD2DEG, SIGN_WIDTH_DEG};
use crate::coordinates::{mean_obliquity, normalize_angle};
use crate::time::local_sidereal_time;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for house computations
#[derive(Debug, Error, PartialEq)]
pub enum HouseError {
    #[error("Latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Latitude {latitude} is beyond the polar limit of {limit} degrees")]
    PolarLatitude { latitude: f64, limit: f64 },

    #[error("Ascendant {ascendant} is not east of Midheaven {midheaven} at latitude {latitude}")]
    DegenerateAngles {
        latitude: f64,
        ascendant: f64,
        midheaven: f64,
    },

    #[error("House computation received a non-finite input")]
    NonFiniteInput,

    #[error("Unknown house system: {0}")]
    UnknownSystem(String),
}

/// Default absolute latitude at which quadrant systems are refused; just
/// inside the Arctic Circle for the present obliquity
pub const DEFAULT_POLAR_LIMIT: f64 = 66.5;

/// House division scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseSystem {
    /// Quadrants trisected, Midheaven = RAMC
    #[default]
    EqualTrisection,
    /// Quadrants trisected, true ecliptic Midheaven
    Porphyry,
    /// 30° houses from the Ascendant
    Equal,
    /// 30° houses from the start of the Ascendant's sign
    WholeSign,
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 4] = [
        HouseSystem::EqualTrisection,
        HouseSystem::Porphyry,
        HouseSystem::Equal,
        HouseSystem::WholeSign,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HouseSystem::EqualTrisection => "equal-trisection",
            HouseSystem::Porphyry => "porphyry",
            HouseSystem::Equal => "equal",
            HouseSystem::WholeSign => "whole-sign",
        }
    }

    /// Systems whose intermediate cusps depend on the Midheaven
    pub fn is_quadrant(&self) -> bool {
        matches!(self, HouseSystem::EqualTrisection | HouseSystem::Porphyry)
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = HouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        HouseSystem::ALL
            .iter()
            .copied()
            .find(|system| system.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| HouseError::UnknownSystem(s.to_string()))
    }
}

/// The twelve cusps of one chart, index 0 = 1st house.
///
/// Cusps increase cyclically, so a later index can hold a numerically
/// smaller longitude once the sequence passes 0°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    pub system: HouseSystem,
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

impl HouseCusps {
    /// Longitude of the cusp opening house `house` (1..=12)
    pub fn cusp(&self, house: u8) -> Option<f64> {
        match house {
            1..=12 => Some(self.cusps[house as usize - 1]),
            _ => None,
        }
    }

    /// House (1..=12) containing an ecliptic longitude
    pub fn house_of(&self, longitude: f64) -> u8 {
        house_of_longitude(longitude, &self.cusps)
    }
}

/// Ecliptic longitude of the Ascendant, degrees.
///
/// `ramc`, `latitude` and `obliquity` are in degrees.
pub fn ascendant(ramc: f64, latitude: f64, obliquity: f64) -> f64 {
    let r = ramc * DEG2RAD;
    let eps = obliquity * DEG2RAD;
    let phi = latitude * DEG2RAD;

    let y = r.cos();
    let x = -(r.sin() * eps.cos() + phi.tan() * eps.sin());
    normalize_angle(y.atan2(x) * RAD2DEG)
}

/// Ecliptic longitude culminating at a given RAMC, degrees
pub fn ecliptic_midheaven(ramc: f64, obliquity: f64) -> f64 {
    let r = ramc * DEG2RAD;
    normalize_angle(r.sin().atan2(r.cos() * (obliquity * DEG2RAD).cos()) * RAD2DEG)
}

fn quadrant_cusps(ascendant: f64, midheaven: f64) -> [f64; 12] {
    let ic = normalize_angle(midheaven + 180.0);
    let descendant = normalize_angle(ascendant + 180.0);

    let mut cusps = [0.0; 12];
    for (start, end, index) in [
        (ascendant, ic, 0),
        (ic, descendant, 3),
        (descendant, midheaven, 6),
        (midheaven, ascendant, 9),
    ] {
        let third = normalize_angle(end - start) / 3.0;
        cusps[index] = start;
        cusps[index + 1] = normalize_angle(start + third);
        cusps[index + 2] = normalize_angle(start + 2.0 * third);
    }
    cusps
}

fn uniform_cusps(first: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_angle(first + SIGN_WIDTH_DEG * i as f64);
    }
    cusps
}

/// Compute the house cusps for an instant and observer.
///
/// Quadrant systems are refused when `|latitude| >= polar_limit`, the uniform
/// systems only at the poles. Any system is refused when the Ascendant does
/// not lie east of the Midheaven (less than 180° ahead of it), which only
/// happens inside the polar circles.
pub fn house_cusps(
    jd: f64,
    latitude: f64,
    longitude: f64,
    system: HouseSystem,
    polar_limit: f64,
) -> Result<HouseCusps, HouseError> {
    if !(jd.is_finite() && latitude.is_finite() && longitude.is_finite()) {
        return Err(HouseError::NonFiniteInput);
    }
    if latitude.abs() > 90.0 {
        return Err(HouseError::InvalidLatitude(latitude));
    }

    let limit = if system.is_quadrant() { polar_limit } else { 90.0 };
    if latitude.abs() >= limit {
        warn!(
            "Refusing {} houses at latitude {} (limit {})",
            system, latitude, limit
        );
        return Err(HouseError::PolarLatitude { latitude, limit });
    }

    let ramc = local_sidereal_time(jd, longitude) * DEGREES_PER_HOUR;
    let obliquity = mean_obliquity(jd);
    let asc = ascendant(ramc, latitude, obliquity);

    let midheaven = match system {
        HouseSystem::EqualTrisection => ramc,
        _ => ecliptic_midheaven(ramc, obliquity),
    };

    // MC -> Asc must be a proper arc for the quadrants to sum to 360
    let east_of_mc = normalize_angle(asc - midheaven);
    if !(east_of_mc > 0.0 && east_of_mc < 180.0) {
        warn!(
            "Refusing {} houses at latitude {}: Ascendant {} lies {} degrees past the Midheaven {}",
            system, latitude, asc, east_of_mc, midheaven
        );
        return Err(HouseError::DegenerateAngles {
            latitude,
            ascendant: asc,
            midheaven,
        });
    }

    let cusps = match system {
        HouseSystem::EqualTrisection | HouseSystem::Porphyry => quadrant_cusps(asc, midheaven),
        HouseSystem::Equal => uniform_cusps(asc),
        HouseSystem::WholeSign => uniform_cusps((asc / SIGN_WIDTH_DEG).floor() * SIGN_WIDTH_DEG),
    };

    Ok(HouseCusps {
        system,
        cusps,
        ascendant: asc,
        midheaven,
    })
}

/// House number (1..=12) whose cyclic interval `[cusp[i], cusp[i+1])`
/// contains the longitude
pub fn house_of_longitude(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_angle(longitude);

    for i in 0..12 {
        let start = cusps[i];
        let span = normalize_angle(cusps[(i + 1) % 12] - start);
        if normalize_angle(lon - start) < span {
            return i as u8 + 1;
        }
    }

    // Only reachable with degenerate cusps (all equal); fall back to the
    // house with the nearest preceding cusp.
    let mut best = 0;
    let mut best_offset = f64::INFINITY;
    for (i, &cusp) in cusps.iter().enumerate() {
        let offset = normalize_angle(lon - cusp);
        if offset < best_offset {
            best_offset = offset;
            best = i;
        }
    }
    best as u8 + 1
}
