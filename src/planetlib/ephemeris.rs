//! Analytic positions of the Sun, Moon and planets
//!
//! Planets: Keplerian elements extrapolated to the requested instant, Kepler's
//! equation, then a rotation from the orbital plane into the J2000 ecliptic.
//! Geocentric planet longitudes are precessed to the mean equinox of date so
//! they share a frame with the Sun and Moon series below.
//!
//! Sun: mean longitude plus equation of center (Meeus ch. 25, low accuracy).
//! Moon: leading periodic terms of the lunar theory (Meeus ch. 47) with the
//! distance held at the mean Earth-Moon distance.
//!
//! Accuracy is arc-minute level over 1800-2050 for planets and better for the
//! Sun and Moon. Anything needing arc-second accuracy belongs on a numerically
//! integrated ephemeris instead.

use super::elements::orbital_elements;
use super::kepler::KeplerSolver;
use super::{Body, BodyModel, Luminary, Planet, PlanetError};
use crate::constants::{DEG2RAD, MOON_MEAN_DISTANCE_AU};
use crate::coordinates::{normalize_angle, Cartesian3, EclipticCoordinates};
use crate::time::centuries_since_epoch;
use nalgebra::{Matrix3, Vector3};

/// General precession in longitude, degrees, from J2000 to `t` centuries later
pub fn precession_in_longitude(t: f64) -> f64 {
    1.396_971_278 * t + 0.000_308_6 * t * t
}

/// Low-precision geocentric position of the Sun, mean equinox of date.
///
/// Latitude is zero by construction; distance in AU follows the
/// equation of center.
pub fn sun_position(jd: f64) -> EclipticCoordinates {
    let t = centuries_since_epoch(jd);

    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let mean_anomaly = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t;
    let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let m = mean_anomaly * DEG2RAD;
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let true_anomaly = (mean_anomaly + center) * DEG2RAD;
    let distance = 1.000_001_018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos());

    EclipticCoordinates::new(mean_longitude + center, 0.0, distance)
}

/// Low-precision geocentric position of the Moon, mean equinox of date.
///
/// Distance is fixed at the mean Earth-Moon distance; no parallax is applied.
pub fn moon_position(jd: f64) -> EclipticCoordinates {
    let t = centuries_since_epoch(jd);

    // Fundamental arguments, degrees
    let mean_longitude = 218.316_447_7 + 481_267.881_234_21 * t;
    let elongation = (297.850_192_1 + 445_267.111_403_4 * t) * DEG2RAD;
    let sun_anomaly = (357.529_109_2 + 35_999.050_290_9 * t) * DEG2RAD;
    let moon_anomaly = (134.963_396_4 + 477_198.867_505_5 * t) * DEG2RAD;
    let node_distance = (93.272_095_0 + 483_202.017_523_3 * t) * DEG2RAD;

    let (d, m, mp, f) = (elongation, sun_anomaly, moon_anomaly, node_distance);

    let longitude = mean_longitude
        + 6.288_774 * mp.sin()
        + 1.274_027 * (2.0 * d - mp).sin()
        + 0.658_314 * (2.0 * d).sin()
        + 0.213_618 * (2.0 * mp).sin()
        - 0.185_116 * m.sin()
        - 0.114_332 * (2.0 * f).sin()
        + 0.058_793 * (2.0 * d - 2.0 * mp).sin()
        + 0.057_066 * (2.0 * d - m - mp).sin()
        + 0.053_322 * (2.0 * d + mp).sin()
        + 0.045_758 * (2.0 * d - m).sin();

    let latitude = 5.128_122 * f.sin()
        + 0.280_602 * (mp + f).sin()
        + 0.277_693 * (mp - f).sin()
        + 0.173_237 * (2.0 * d - f).sin()
        + 0.055_413 * (2.0 * d - mp + f).sin()
        + 0.046_271 * (2.0 * d - mp - f).sin();

    EclipticCoordinates::new(longitude, latitude, MOON_MEAN_DISTANCE_AU)
}

/// Rotation from the orbital plane (x toward perihelion) to the ecliptic
fn orbital_plane_to_ecliptic(node: f64, inclination: f64, argument_of_perihelion: f64) -> Matrix3<f64> {
    let (sin_o, cos_o) = node.sin_cos();
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_w, cos_w) = argument_of_perihelion.sin_cos();

    Matrix3::new(
        cos_o * cos_w - sin_o * sin_w * cos_i,
        -cos_o * sin_w - sin_o * cos_w * cos_i,
        sin_o * sin_i,
        sin_o * cos_w + cos_o * sin_w * cos_i,
        -sin_o * sin_w + cos_o * cos_w * cos_i,
        -cos_o * sin_i,
        sin_w * sin_i,
        cos_w * sin_i,
        cos_i,
    )
}

/// Keplerian ephemeris for the planets, closed-form series for the Sun and Moon
#[derive(Debug, Clone, Copy, Default)]
pub struct Ephemeris {
    solver: KeplerSolver,
}

impl Ephemeris {
    /// Create an ephemeris with the default Kepler solver settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an ephemeris with custom Kepler solver settings
    pub fn with_solver(solver: KeplerSolver) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> &KeplerSolver {
        &self.solver
    }

    /// Heliocentric rectangular ecliptic position in AU (J2000 ecliptic)
    pub fn heliocentric_cartesian(&self, planet: Planet, jd: f64) -> Result<Cartesian3, PlanetError> {
        let t = centuries_since_epoch(jd);
        let el = orbital_elements(planet)?.at(t);

        let e = el.eccentricity;
        let mean_anomaly = normalize_angle(el.mean_anomaly()) * DEG2RAD;
        let ecc_anomaly = self.solver.solve(mean_anomaly, e)?;

        let true_anomaly = 2.0
            * f64::atan2(
                (1.0 + e).sqrt() * (ecc_anomaly / 2.0).sin(),
                (1.0 - e).sqrt() * (ecc_anomaly / 2.0).cos(),
            );
        let radius = el.semi_major_axis * (1.0 - e * ecc_anomaly.cos());

        let in_plane = Vector3::new(radius * true_anomaly.cos(), radius * true_anomaly.sin(), 0.0);
        let rotation = orbital_plane_to_ecliptic(
            el.node_longitude * DEG2RAD,
            el.inclination * DEG2RAD,
            el.argument_of_perihelion() * DEG2RAD,
        );

        Ok(Cartesian3::from_vector3(rotation * in_plane))
    }

    /// Heliocentric ecliptic coordinates of a planet (Earth included)
    pub fn heliocentric_ecliptic(&self, planet: Planet, jd: f64) -> Result<EclipticCoordinates, PlanetError> {
        Ok(EclipticCoordinates::from_cartesian(
            self.heliocentric_cartesian(planet, jd)?,
        ))
    }

    /// Geocentric ecliptic coordinates of a planet other than Earth
    pub fn geocentric_ecliptic(&self, planet: Planet, jd: f64) -> Result<EclipticCoordinates, PlanetError> {
        self.snapshot(jd)?.geocentric(planet)
    }

    /// Geocentric ecliptic coordinates of any chart body
    pub fn position(&self, body: Body, jd: f64) -> Result<EclipticCoordinates, PlanetError> {
        match body.model() {
            BodyModel::ClosedForm(Luminary::Sun) => Ok(sun_position(jd)),
            BodyModel::ClosedForm(Luminary::Moon) => Ok(moon_position(jd)),
            BodyModel::Keplerian(Planet::Earth) => Err(PlanetError::GeocentricEarth),
            BodyModel::Keplerian(planet) => self.geocentric_ecliptic(planet, jd),
        }
    }

    /// Fix an instant and compute Earth's heliocentric position once for a
    /// batch of geocentric queries
    pub fn snapshot(&self, jd: f64) -> Result<EphemerisSnapshot, PlanetError> {
        Ok(EphemerisSnapshot {
            ephemeris: *self,
            jd,
            earth: self.heliocentric_cartesian(Planet::Earth, jd)?,
        })
    }
}

/// Positions at a single instant sharing one Earth computation
#[derive(Debug, Clone, Copy)]
pub struct EphemerisSnapshot {
    ephemeris: Ephemeris,
    jd: f64,
    earth: Cartesian3,
}

impl EphemerisSnapshot {
    pub fn julian_day(&self) -> f64 {
        self.jd
    }

    /// Earth's heliocentric rectangular position in AU
    pub fn earth(&self) -> Cartesian3 {
        self.earth
    }

    /// Geocentric ecliptic coordinates of a planet other than Earth
    pub fn geocentric(&self, planet: Planet) -> Result<EclipticCoordinates, PlanetError> {
        if planet == Planet::Earth {
            return Err(PlanetError::GeocentricEarth);
        }

        let helio = self.ephemeris.heliocentric_cartesian(planet, self.jd)?;
        let geo = EclipticCoordinates::from_cartesian(helio - self.earth);
        let precession = precession_in_longitude(centuries_since_epoch(self.jd));

        Ok(EclipticCoordinates::new(
            geo.longitude + precession,
            geo.latitude,
            geo.distance,
        ))
    }

    /// Geocentric ecliptic coordinates of any chart body
    pub fn position(&self, body: Body) -> Result<EclipticCoordinates, PlanetError> {
        match body.model() {
            BodyModel::ClosedForm(Luminary::Sun) => Ok(sun_position(self.jd)),
            BodyModel::ClosedForm(Luminary::Moon) => Ok(moon_position(self.jd)),
            BodyModel::Keplerian(planet) => self.geocentric(planet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn test_sun_meeus_example_25a() {
        // 1992-10-13 0h TD: true longitude 199.90988, R = 0.99766 AU
        let sun = sun_position(2448908.5);
        assert_abs_diff_eq!(sun.longitude, 199.909_88, epsilon = 1e-3);
        assert_abs_diff_eq!(sun.distance, 0.997_66, epsilon = 1e-4);
        assert_eq!(sun.latitude, 0.0);
    }

    #[test]
    fn test_moon_meeus_example_47a() {
        // 1992-04-12 0h TD: lambda 133.162655, beta -3.229126 (full theory)
        let moon = moon_position(2448724.5);
        assert_abs_diff_eq!(moon.longitude, 133.162_655, epsilon = 0.2);
        assert_abs_diff_eq!(moon.latitude, -3.229_126, epsilon = 0.05);
        assert_abs_diff_eq!(moon.distance, MOON_MEAN_DISTANCE_AU);
    }

    #[test]
    fn test_moon_latitude_stays_within_orbit_inclination() {
        for day in 0..60 {
            let moon = moon_position(J2000 + day as f64 * 0.5);
            assert!(moon.latitude.abs() < 5.5, "latitude {}", moon.latitude);
        }
    }

    #[test]
    fn test_earth_is_opposite_the_sun() {
        let eph = Ephemeris::new();
        let earth = eph.heliocentric_ecliptic(Planet::Earth, J2000).unwrap();
        let sun = sun_position(J2000);

        assert_abs_diff_eq!(normalize_angle(earth.longitude + 180.0), sun.longitude, epsilon = 0.01);
        assert_abs_diff_eq!(earth.distance, sun.distance, epsilon = 1e-4);
        assert_abs_diff_eq!(earth.latitude, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_mars_heliocentric_j2000() {
        let mars = Ephemeris::new().heliocentric_ecliptic(Planet::Mars, J2000).unwrap();
        assert_abs_diff_eq!(mars.longitude, 359.45, epsilon = 0.02);
        assert_abs_diff_eq!(mars.latitude, -1.42, epsilon = 0.02);
        assert_abs_diff_eq!(mars.distance, 1.391, epsilon = 1e-3);
    }

    #[test]
    fn test_venus_meeus_example_33a() {
        // 1992-12-20 0h TD: apparent geocentric lambda 313.08102, beta -2.08474
        let venus = Ephemeris::new().geocentric_ecliptic(Planet::Venus, 2448976.5).unwrap();
        assert_abs_diff_eq!(venus.longitude, 313.081_02, epsilon = 0.05);
        assert_abs_diff_eq!(venus.latitude, -2.084_74, epsilon = 0.02);
        assert_abs_diff_eq!(venus.distance, 0.911, epsilon = 2e-3);
    }

    #[rstest]
    #[case(Planet::Mercury, 271.89)]
    #[case(Planet::Venus, 241.57)]
    #[case(Planet::Mars, 327.96)]
    #[case(Planet::Jupiter, 25.25)]
    #[case(Planet::Saturn, 40.40)]
    #[case(Planet::Uranus, 314.81)]
    #[case(Planet::Neptune, 303.19)]
    fn test_geocentric_longitudes_at_j2000(#[case] planet: Planet, #[case] expected: f64) {
        let pos = Ephemeris::new().geocentric_ecliptic(planet, J2000).unwrap();
        assert_abs_diff_eq!(pos.longitude, expected, epsilon = 0.3);
    }

    #[test]
    fn test_geocentric_earth_is_rejected() {
        let eph = Ephemeris::new();
        assert!(matches!(
            eph.geocentric_ecliptic(Planet::Earth, J2000),
            Err(PlanetError::GeocentricEarth)
        ));
        assert!(matches!(
            eph.position(Body::Earth, J2000),
            Err(PlanetError::GeocentricEarth)
        ));
    }

    #[test]
    fn test_snapshot_matches_direct_queries() {
        let eph = Ephemeris::new();
        let jd = 2460000.5;
        let snapshot = eph.snapshot(jd).unwrap();

        for body in Body::CHART_BODIES {
            let direct = eph.position(body, jd).unwrap();
            let batched = snapshot.position(body).unwrap();
            assert_eq!(direct, batched, "{}", body);
        }
        assert_eq!(snapshot.julian_day(), jd);
    }

    #[test]
    fn test_failing_solver_propagates() {
        let eph = Ephemeris::with_solver(KeplerSolver::new(0.0, 1));
        assert!(matches!(
            eph.heliocentric_ecliptic(Planet::Mercury, J2000 + 17.3),
            Err(PlanetError::Kepler(_))
        ));
    }

    #[test]
    fn test_precession_zero_at_epoch() {
        assert_eq!(precession_in_longitude(0.0), 0.0);
        assert_abs_diff_eq!(precession_in_longitude(1.0), 1.397_279_878, epsilon = 1e-9);
    }
}
