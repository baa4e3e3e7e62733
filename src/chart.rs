//! Natal chart: every configured body placed in sign and house for one
//! moment and location, plus the aspects between them

use crate::aspects::Aspect;
use crate::coordinates::{signed_angle_difference, EclipticCoordinates};
use crate::houses::HouseCusps;
use crate::planetlib::Body;
use crate::time::julian_day_from_datetime;
use crate::zodiac::SignPosition;
use crate::{Engine, Result};
use chrono::{DateTime, TimeZone};
use log::debug;
use serde::{Deserialize, Serialize};

/// Moment and place of birth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    /// Julian Day (UT)
    pub julian_day: f64,
    /// Geographic latitude in degrees, north positive
    pub latitude: f64,
    /// Geographic longitude in degrees, east positive
    pub longitude: f64,
}

impl BirthData {
    pub fn new(julian_day: f64, latitude: f64, longitude: f64) -> Self {
        Self {
            julian_day,
            latitude,
            longitude,
        }
    }

    /// Build from a zoned datetime; the offset is removed before conversion
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>, latitude: f64, longitude: f64) -> Self {
        Self::new(julian_day_from_datetime(datetime), latitude, longitude)
    }
}

/// Where one body falls in the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPlacement {
    pub body: Body,
    pub position: EclipticCoordinates,
    pub sign: SignPosition,
    /// 1..=12
    pub house: u8,
    pub retrograde: bool,
    /// Change in longitude over the following day, degrees
    pub daily_motion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub birth: BirthData,
    pub houses: HouseCusps,
    pub placements: Vec<BodyPlacement>,
    pub aspects: Vec<Aspect>,
}

impl NatalChart {
    /// Compute a chart for the engine's configured bodies and house system
    pub fn compute(engine: &Engine, birth: BirthData) -> Result<Self> {
        let config = engine.config();
        debug!(
            "Computing chart at JD {} ({}, {}) with {} houses",
            birth.julian_day, birth.latitude, birth.longitude, config.house_system
        );

        let houses = engine.house_cusps(birth.julian_day, birth.latitude, birth.longitude)?;

        let today = engine.ephemeris().snapshot(birth.julian_day)?;
        let tomorrow = engine.ephemeris().snapshot(birth.julian_day + 1.0)?;

        let mut placements = Vec::with_capacity(config.bodies.len());
        for &body in &config.bodies {
            let position = today.position(body)?;
            let next = tomorrow.position(body)?;
            let daily_motion = signed_angle_difference(position.longitude, next.longitude);

            placements.push(BodyPlacement {
                body,
                position,
                sign: SignPosition::from_longitude(position.longitude),
                house: houses.house_of(position.longitude),
                retrograde: daily_motion < 0.0,
                daily_motion,
            });
        }

        let aspects = engine.aspects_among(placements.iter().map(|p| (p.body, p.position)));
        debug!(
            "Chart has {} placements and {} aspects",
            placements.len(),
            aspects.len()
        );

        Ok(Self {
            birth,
            houses,
            placements,
            aspects,
        })
    }

    pub fn placement(&self, body: Body) -> Option<&BodyPlacement> {
        self.placements.iter().find(|p| p.body == body)
    }

    /// Aspects involving the given body
    pub fn aspects_of(&self, body: Body) -> impl Iterator<Item = &Aspect> {
        self.aspects
            .iter()
            .filter(move |a| a.body_a == body || a.body_b == body)
    }
}
