//! Keplerian orbital elements for the major planets
//!
//! Elements and their rates per Julian century come from the JPL table
//! "Keplerian Elements for Approximate Positions of the Major Planets"
//! (Standish, valid 1800 AD - 2050 AD), referred to the mean ecliptic and
//! equinox of J2000. The Earth row is the Earth-Moon barycenter.

use super::{Planet, PlanetError};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// One set of the six classical elements
///
/// Distances are in AU, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSet {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub mean_longitude: f64,
    pub perihelion_longitude: f64,
    pub node_longitude: f64,
}

impl ElementSet {
    /// Mean anomaly in degrees (mean longitude minus longitude of perihelion)
    pub fn mean_anomaly(&self) -> f64 {
        self.mean_longitude - self.perihelion_longitude
    }

    /// Argument of perihelion in degrees
    pub fn argument_of_perihelion(&self) -> f64 {
        self.perihelion_longitude - self.node_longitude
    }
}

/// Elements at J2000.0 plus their linear rates of change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub planet: Planet,
    /// Values at J2000.0
    pub epoch: ElementSet,
    /// Change per Julian century
    pub rates: ElementSet,
}

impl OrbitalElements {
    /// Elements linearly extrapolated to `t` Julian centuries from J2000.0
    pub fn at(&self, t: f64) -> ElementSet {
        let e = &self.epoch;
        let r = &self.rates;
        ElementSet {
            semi_major_axis: e.semi_major_axis + r.semi_major_axis * t,
            eccentricity: e.eccentricity + r.eccentricity * t,
            inclination: e.inclination + r.inclination * t,
            mean_longitude: e.mean_longitude + r.mean_longitude * t,
            perihelion_longitude: e.perihelion_longitude + r.perihelion_longitude * t,
            node_longitude: e.node_longitude + r.node_longitude * t,
        }
    }
}

const fn set(a: f64, e: f64, i: f64, l: f64, peri: f64, node: f64) -> ElementSet {
    ElementSet {
        semi_major_axis: a,
        eccentricity: e,
        inclination: i,
        mean_longitude: l,
        perihelion_longitude: peri,
        node_longitude: node,
    }
}

/// (planet, elements at J2000, rates per century)
const ELEMENT_ROWS: &[(Planet, ElementSet, ElementSet)] = &[
    (
        Planet::Mercury,
        set(0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93),
        set(0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81),
    ),
    (
        Planet::Venus,
        set(0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55),
        set(0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18),
    ),
    (
        Planet::Earth,
        set(1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0),
        set(0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0),
    ),
    (
        Planet::Mars,
        set(1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91),
        set(0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43),
    ),
    (
        Planet::Jupiter,
        set(5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09),
        set(-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06),
    ),
    (
        Planet::Saturn,
        set(9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48),
        set(-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94),
    ),
    (
        Planet::Uranus,
        set(19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03),
        set(-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89),
    ),
    (
        Planet::Neptune,
        set(30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74),
        set(0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64),
    ),
];

lazy_static! {
    /// Read-only element table, built once on first use
    static ref ORBITAL_ELEMENTS: HashMap<Planet, OrbitalElements> = {
        let mut m = HashMap::new();
        for &(planet, epoch, rates) in ELEMENT_ROWS.iter() {
            m.insert(planet, OrbitalElements { planet, epoch, rates });
        }
        m
    };
}

/// Look up the orbital elements of a planet
pub fn orbital_elements(planet: Planet) -> Result<&'static OrbitalElements, PlanetError> {
    ORBITAL_ELEMENTS
        .get(&planet)
        .ok_or_else(|| PlanetError::UnknownBody(planet.name().to_string()))
}

/// Look up orbital elements by planet name (case-insensitive)
pub fn orbital_elements_by_name(name: &str) -> Result<&'static OrbitalElements, PlanetError> {
    orbital_elements(name.parse::<Planet>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_every_planet_has_elements() {
        for planet in [
            Planet::Mercury,
            Planet::Venus,
            Planet::Earth,
            Planet::Mars,
            Planet::Jupiter,
            Planet::Saturn,
            Planet::Uranus,
            Planet::Neptune,
        ] {
            let el = orbital_elements(planet).unwrap();
            assert_eq!(el.planet, planet);
            assert!(el.epoch.eccentricity >= 0.0 && el.epoch.eccentricity < 0.3);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let mars = orbital_elements_by_name("mars").unwrap();
        assert_abs_diff_eq!(mars.epoch.semi_major_axis, 1.523_710_34);
        assert!(matches!(
            orbital_elements_by_name("Vulcan"),
            Err(PlanetError::UnknownBody(_))
        ));
        assert!(orbital_elements_by_name("Moon").is_err());
    }

    #[test]
    fn test_linear_extrapolation() {
        let earth = orbital_elements(Planet::Earth).unwrap();
        assert_eq!(earth.at(0.0), earth.epoch);

        let next = earth.at(1.0);
        assert_abs_diff_eq!(next.mean_longitude, 100.464_571_66 + 35_999.372_449_81, epsilon = 1e-9);
        assert_abs_diff_eq!(next.eccentricity, 0.016_711_23 - 0.000_043_92, epsilon = 1e-12);
    }

    #[test]
    fn test_derived_angles() {
        let jupiter = orbital_elements(Planet::Jupiter).unwrap().epoch;
        assert_abs_diff_eq!(jupiter.mean_anomaly(), 34.396_440_51 - 14.728_479_83, epsilon = 1e-12);
        assert_abs_diff_eq!(
            jupiter.argument_of_perihelion(),
            14.728_479_83 - 100.473_909_09,
            epsilon = 1e-12
        );
    }
}
