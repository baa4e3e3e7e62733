//! Tropical zodiac partition of ecliptic longitude

use crate::constants::SIGN_WIDTH_DEG;
use crate::coordinates::normalize_angle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The twelve 30° signs, starting at the vernal equinox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing an ecliptic longitude (any real value, reduced mod 360)
    pub fn from_longitude(longitude: f64) -> Self {
        let index = (normalize_angle(longitude) / SIGN_WIDTH_DEG).floor() as usize;
        Self::ALL[index.min(11)]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Zero-based position in the zodiac (Aries = 0)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Ecliptic longitude where the sign begins
    pub fn start_longitude(&self) -> f64 {
        self.index() as f64 * SIGN_WIDTH_DEG
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees into the containing sign, range [0, 30)
pub fn degree_within_sign(longitude: f64) -> f64 {
    normalize_angle(longitude).rem_euclid(SIGN_WIDTH_DEG)
}

/// A longitude expressed as sign, whole degrees and whole arc-minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: ZodiacSign,
    pub degrees: u32,
    pub minutes: u32,
}

impl SignPosition {
    /// Truncating (never rounding) split of a longitude
    pub fn from_longitude(longitude: f64) -> Self {
        let within = degree_within_sign(longitude);
        let degrees = within.floor();
        let minutes = ((within - degrees) * 60.0).floor().min(59.0);

        Self {
            sign: ZodiacSign::from_longitude(longitude),
            degrees: degrees as u32,
            minutes: minutes as u32,
        }
    }
}

impl fmt::Display for SignPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:2}°{:02}' {}", self.degrees, self.minutes, self.sign)
    }
}
