//! Apparent retrograde motion
//!
//! A body is retrograde when its geocentric longitude decreases over the
//! following day. Longitudes wrap at 360°, so the day's change is taken as
//! the shortest signed rotation rather than a plain subtraction.

use crate::coordinates::signed_angle_difference;
use crate::planetlib::{Body, Ephemeris, PlanetError};

/// Seam-aware sign test on two consecutive daily longitudes
///
/// ```
/// use starchart::retrograde::is_retrograde_motion;
///
/// assert!(!is_retrograde_motion(359.0, 1.0));
/// assert!(is_retrograde_motion(1.0, 359.0));
/// ```
pub fn is_retrograde_motion(longitude_today: f64, longitude_tomorrow: f64) -> bool {
    signed_angle_difference(longitude_today, longitude_tomorrow) < 0.0
}

/// Signed change in geocentric longitude from `jd` to `jd + 1`, degrees/day
pub fn daily_motion(ephemeris: &Ephemeris, body: Body, jd: f64) -> Result<f64, PlanetError> {
    let today = ephemeris.position(body, jd)?;
    let tomorrow = ephemeris.position(body, jd + 1.0)?;
    Ok(signed_angle_difference(today.longitude, tomorrow.longitude))
}

/// Whether a body's geocentric longitude is decreasing at `jd`
pub fn is_retrograde(ephemeris: &Ephemeris, body: Body, jd: f64) -> Result<bool, PlanetError> {
    Ok(daily_motion(ephemeris, body, jd)? < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case(359.0, 1.0, false)]
    #[case(1.0, 359.0, true)]
    #[case(100.0, 100.5, false)]
    #[case(100.5, 100.0, true)]
    #[case(42.0, 42.0, false)]
    fn test_motion_sign(#[case] today: f64, #[case] tomorrow: f64, #[case] retrograde: bool) {
        assert_eq!(is_retrograde_motion(today, tomorrow), retrograde);
    }

    #[rstest]
    // 2023-09-01
    #[case(Body::Mercury, 2460188.5, true)]
    // 2023-10-15
    #[case(Body::Mercury, 2460232.5, false)]
    // 2022-12-01
    #[case(Body::Mars, 2459914.5, true)]
    // 2023-03-01
    #[case(Body::Mars, 2460004.5, false)]
    #[case(Body::Jupiter, 2460232.5, true)]
    // 2023-08-01
    #[case(Body::Saturn, 2460157.5, true)]
    #[case(Body::Venus, 2460157.5, true)]
    fn test_known_stations(#[case] body: Body, #[case] jd: f64, #[case] retrograde: bool) {
        let eph = Ephemeris::new();
        assert_eq!(is_retrograde(&eph, body, jd).unwrap(), retrograde);
    }

    #[test]
    fn test_daily_motion_magnitudes() {
        let eph = Ephemeris::new();
        assert_abs_diff_eq!(daily_motion(&eph, Body::Mercury, 2460188.5).unwrap(), -0.81, epsilon = 0.05);
        assert_abs_diff_eq!(daily_motion(&eph, Body::Mercury, 2460232.5).unwrap(), 1.73, epsilon = 0.05);
    }

    #[test]
    fn test_luminaries_never_retrograde() {
        let eph = Ephemeris::new();
        for day in (0..400).step_by(7) {
            let jd = 2451545.0 + day as f64;
            let sun = daily_motion(&eph, Body::Sun, jd).unwrap();
            let moon = daily_motion(&eph, Body::Moon, jd).unwrap();
            assert!((0.9..1.1).contains(&sun), "sun {} at {}", sun, jd);
            assert!((11.0..16.0).contains(&moon), "moon {} at {}", moon, jd);
        }
    }

    #[test]
    fn test_earth_is_rejected() {
        let eph = Ephemeris::new();
        assert!(matches!(
            is_retrograde(&eph, Body::Earth, 2451545.0),
            Err(PlanetError::GeocentricEarth)
        ));
    }
}
