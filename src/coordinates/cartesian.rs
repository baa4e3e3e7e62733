//! # Cartesian Coordinate System Module
//!
//! Rectangular coordinates used as the intermediate form for every frame
//! change in the engine: orbital-plane to ecliptic rotations, the
//! heliocentric to geocentric vector subtraction, and the ecliptic to
//! equatorial obliquity rotation.
//!
//! ## Coordinate System Convention
//!
//! Right-handed, with the X axis toward the vernal equinox and the Z axis
//! toward the pole of whichever reference plane the caller is working in
//! (ecliptic or equator). Distances are in AU.
//!
//! ## Examples
//!
//! ```rust
//! use starchart::coordinates::cartesian::Cartesian3;
//!
//! let earth = Cartesian3::new(-0.18, 0.97, 0.0);
//! let mars = Cartesian3::new(1.39, -0.01, -0.03);
//! let earth_to_mars = mars - earth;
//! assert!((earth_to_mars.x - 1.57).abs() < 1e-12);
//! ```

use nalgebra::Vector3;
use std::f64::consts::PI;

/// Three-dimensional Cartesian coordinate representation
///
/// Represents a point or direction in 3D space. Compatible with nalgebra
/// `Vector3` so rotation matrices can be applied directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cartesian3 {
    /// X-component (toward vernal equinox)
    pub x: f64,
    /// Y-component (90° east of the equinox in the reference plane)
    pub y: f64,
    /// Z-component (toward the reference pole)
    pub z: f64,
}

impl Cartesian3 {
    /// Creates a new Cartesian coordinate
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Creates a Cartesian coordinate from spherical coordinates
    ///
    /// # Arguments
    ///
    /// * `lon` - Longitude (or right ascension) in radians
    /// * `lat` - Latitude (or declination) in radians
    /// * `distance` - Distance from origin
    ///
    /// # Mathematical Conversion
    ///
    /// - `x = distance * cos(lat) * cos(lon)`
    /// - `y = distance * cos(lat) * sin(lon)`
    /// - `z = distance * sin(lat)`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starchart::coordinates::cartesian::Cartesian3;
    /// use std::f64::consts::PI;
    ///
    /// let pole = Cartesian3::from_spherical(0.0, PI / 2.0, 1.0);
    /// assert!(pole.x.abs() < 1e-15);
    /// assert!(pole.y.abs() < 1e-15);
    /// assert!((pole.z - 1.0).abs() < 1e-15);
    /// ```
    pub fn from_spherical(lon: f64, lat: f64, distance: f64) -> Self {
        let cos_lat = lat.cos();
        Cartesian3 {
            x: distance * cos_lat * lon.cos(),
            y: distance * cos_lat * lon.sin(),
            z: distance * lat.sin(),
        }
    }

    /// Converts to spherical coordinates
    ///
    /// Returns `(lon, lat, distance)` with `lon` in [0, 2π) and `lat` in
    /// [-π/2, π/2], both in radians. The zero vector maps to `(0, 0, 0)`.
    pub fn to_spherical(&self) -> (f64, f64, f64) {
        let distance = self.magnitude();

        if distance == 0.0 {
            return (0.0, 0.0, 0.0);
        }

        let lat = (self.z / distance).clamp(-1.0, 1.0).asin();
        let lon = if self.x == 0.0 && self.y == 0.0 {
            0.0 // Arbitrary choice at poles
        } else {
            let mut lon = self.y.atan2(self.x);
            if lon < 0.0 {
                lon += 2.0 * PI;
            }
            // atan2 of a tiny negative y rounds up to exactly 2π
            if lon >= 2.0 * PI {
                lon = 0.0;
            }
            lon
        };

        (lon, lat, distance)
    }

    /// Euclidean length of the vector
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Converts to nalgebra Vector3 for linear algebra operations
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

// Arithmetic operations for convenience
impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}
