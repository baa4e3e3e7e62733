//! Coordinate types and frame transformations
//!
//! Ecliptic positions come out of the ephemeris; this module rotates them onto
//! the equator with the mean obliquity of the ecliptic and then onto the local
//! horizon with the observer's latitude and sidereal time.

pub mod cartesian;

pub use cartesian::Cartesian3;

use crate::constants::{DEG2RAD, DEGREES_PER_HOUR, RAD2DEG};
use crate::time::{centuries_since_epoch, local_sidereal_time, normalize_hours};
use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Reduce an angle in degrees into [0, 360)
///
/// Idempotent: `normalize_angle(normalize_angle(x)) == normalize_angle(x)`.
pub fn normalize_angle(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Signed shortest rotation from `from` to `to`, in degrees, range (-180, 180]
pub fn signed_angle_difference(from: f64, to: f64) -> f64 {
    let d = normalize_angle(to - from);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Unsigned angular separation of two longitudes, in degrees, range [0, 180]
///
/// Bitwise symmetric in its arguments.
pub fn angular_separation(a: f64, b: f64) -> f64 {
    normalize_angle(a - b).min(normalize_angle(b - a))
}

/// Position on the ecliptic sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticCoordinates {
    /// Ecliptic longitude in degrees, [0, 360)
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
}

impl EclipticCoordinates {
    /// Create ecliptic coordinates; the longitude is normalized to [0, 360)
    pub fn new(longitude: f64, latitude: f64, distance: f64) -> Self {
        Self {
            longitude: normalize_angle(longitude),
            latitude,
            distance,
        }
    }

    /// Rectangular ecliptic coordinates in AU
    pub fn to_cartesian(&self) -> Cartesian3 {
        Cartesian3::from_spherical(
            self.longitude * DEG2RAD,
            self.latitude * DEG2RAD,
            self.distance,
        )
    }

    /// Spherical form of a rectangular ecliptic vector
    pub fn from_cartesian(cart: Cartesian3) -> Self {
        let (lon, lat, distance) = cart.to_spherical();
        Self::new(lon * RAD2DEG, lat * RAD2DEG, distance)
    }
}

/// Position on the celestial equator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoordinates {
    /// Right ascension in hours, [0, 24)
    pub right_ascension: f64,
    /// Declination in degrees
    pub declination: f64,
}

/// Position relative to the observer's horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalCoordinates {
    /// Azimuth in degrees measured from North through East, [0, 360)
    pub azimuth: f64,
    /// Altitude above the horizon in degrees
    pub altitude: f64,
}

/// Mean obliquity of the ecliptic in degrees (Meeus eq. 22.2)
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = centuries_since_epoch(jd);
    23.439_291_11 - 0.013_004_167 * t - 0.000_000_163_9 * t * t + 0.000_000_503_6 * t * t * t
}

/// Rotate ecliptic coordinates onto the equator of date
pub fn ecliptic_to_equatorial(ecliptic: &EclipticCoordinates, jd: f64) -> EquatorialCoordinates {
    let eps = mean_obliquity(jd) * DEG2RAD;
    let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), eps);

    // Direction only; distance does not matter for RA/Dec
    let unit = Cartesian3::from_spherical(
        ecliptic.longitude * DEG2RAD,
        ecliptic.latitude * DEG2RAD,
        1.0,
    );
    let eq = Cartesian3::from_vector3(rotation * unit.to_vector3());
    let (ra, dec, _) = eq.to_spherical();

    EquatorialCoordinates {
        right_ascension: normalize_hours(ra * RAD2DEG / DEGREES_PER_HOUR),
        declination: dec * RAD2DEG,
    }
}

/// Altitude and azimuth from the hour angle
///
/// `latitude` is the observer's geographic latitude in degrees and
/// `local_sidereal_time` is in hours.
pub fn equatorial_to_horizontal(
    equatorial: &EquatorialCoordinates,
    latitude: f64,
    local_sidereal_time: f64,
) -> HorizontalCoordinates {
    let hour_angle = (local_sidereal_time - equatorial.right_ascension) * DEGREES_PER_HOUR * DEG2RAD;
    let phi = latitude * DEG2RAD;
    let dec = equatorial.declination * DEG2RAD;

    let sin_alt = phi.sin() * dec.sin() + phi.cos() * dec.cos() * hour_angle.cos();
    let altitude = sin_alt.clamp(-1.0, 1.0).asin();

    let azimuth = f64::atan2(
        -dec.cos() * hour_angle.sin(),
        dec.sin() * phi.cos() - dec.cos() * phi.sin() * hour_angle.cos(),
    );

    HorizontalCoordinates {
        azimuth: normalize_angle(azimuth * RAD2DEG),
        altitude: altitude * RAD2DEG,
    }
}

/// Chain ecliptic to equatorial to horizontal for an observer at
/// (`latitude`, `longitude`) in degrees, east longitude positive
pub fn horizontal_position(
    ecliptic: &EclipticCoordinates,
    jd: f64,
    latitude: f64,
    longitude: f64,
) -> HorizontalCoordinates {
    let equatorial = ecliptic_to_equatorial(ecliptic, jd);
    equatorial_to_horizontal(&equatorial, latitude, local_sidereal_time(jd, longitude))
}
