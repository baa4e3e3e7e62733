//! Constants module for astronomical calculations

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;
/// Mean Earth-Moon distance in kilometers
pub const MOON_MEAN_DISTANCE_KM: f64 = 384_400.0;
/// Mean Earth-Moon distance in AU
pub const MOON_MEAN_DISTANCE_AU: f64 = MOON_MEAN_DISTANCE_KM / AU_KM;

// Time constants
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;
/// Hours in a day
pub const HOURS_PER_DAY: f64 = 24.0;
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Degrees of right ascension per hour
pub const DEGREES_PER_HOUR: f64 = 15.0;
/// Width of one zodiac sign and of one equal house
pub const SIGN_WIDTH_DEG: f64 = 30.0;

// Calendar constants
/// First day of Gregorian calendar in Julian day number (1582-10-15)
pub const GREGORIAN_START: i64 = 2_299_161;
