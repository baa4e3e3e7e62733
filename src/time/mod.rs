//! Time module for astronomical time calculations
//!
//! Converts civil calendar dates to Julian Days and back, expresses an instant
//! as Julian centuries since J2000.0, and derives Greenwich and local mean
//! sidereal time. All calendar arithmetic uses the proleptic Gregorian
//! calendar; there is no Julian-calendar branch, so dates before the
//! Gregorian reform are extrapolated rather than rejected.

use crate::constants::{DAYS_PER_CENTURY, DAY_S, DEGREES_PER_HOUR, GREGORIAN_START, HOURS_PER_DAY, J2000};
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Julian Day of the Unix epoch (1970-01-01T00:00:00 UTC)
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Microseconds in a day, used to round calendar output to whole microseconds
const DAY_US: i64 = 86_400_000_000;

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Time out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// Calendar tuple for representing a date and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarTuple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CalendarTuple {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Seconds elapsed since the start of the calendar day
    pub fn seconds_of_day(&self) -> f64 {
        self.hour as f64 * 3600.0 + self.minute as f64 * 60.0 + self.second
    }
}

/// Normalize a month value to the range 1-12, adjusting the year as needed
fn normalize_month(year: i64, month: u32) -> (i64, u32) {
    if (1..=12).contains(&month) {
        return (year, month);
    }

    let month_0 = month as i64 - 1;
    (year + month_0.div_euclid(12), (month_0.rem_euclid(12) + 1) as u32)
}

/// Calculate the Julian Day Number (the integer day starting at noon) of a
/// proleptic Gregorian calendar date.
///
/// This follows the algorithm in the Explanatory Supplement to the
/// Astronomical Almanac 15.11, with 64-bit floor division so that every
/// `i32` year (negative years included) is extrapolated without overflow.
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let (year, month) = normalize_month(year as i64, month);

    let janfeb = month <= 2;
    let g = year + 4716 - if janfeb { 1 } else { 0 };
    let f = ((month + 9) % 12) as i64;
    let e = (1461 * g).div_euclid(4) + day as i64 - 1402;
    let j = e + (153 * f + 2) / 5;

    j + 38 - ((g + 184).div_euclid(100) * 3).div_euclid(4)
}

/// Convert a Julian Day Number back to a proleptic Gregorian date
pub fn calendar_date(jdn: i64) -> (i64, u32, u32) {
    // See the Explanatory Supplement to the Astronomical Almanac 15.11.
    let f = jdn + 1401 + ((4 * jdn + 274_277).div_euclid(146_097) * 3).div_euclid(4) - 38;

    let e = 4 * f + 3;
    let g = e.rem_euclid(1461) / 4;
    let h = 5 * g + 2;

    let day = (h % 153) / 5 + 1;
    let month = ((h / 153) + 2) % 12 + 1;
    let year = e.div_euclid(1461) - 4716 + (12 + 2 - month) / 12;

    (year, month as u32, day as u32)
}

/// Julian Day of a calendar date and time of day (UT).
///
/// 2000-01-01 12:00:00 maps exactly to 2451545.0.
pub fn julian_day(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
    let jdn = julian_day_number(year, month, day);
    if jdn < GREGORIAN_START {
        debug!(
            "{:04}-{:02}-{:02} precedes the Gregorian reform; extrapolating proleptically",
            year, month, day
        );
    }

    let day_fraction = (hour as f64 + minute as f64 / 60.0 + second / 3600.0) / HOURS_PER_DAY;

    // The day number starts at noon, the civil day at midnight
    jdn as f64 - 0.5 + day_fraction
}

/// Julian Day of a [`CalendarTuple`]
pub fn julian_day_from_calendar(cal: &CalendarTuple) -> f64 {
    julian_day(cal.year, cal.month, cal.day, cal.hour, cal.minute, cal.second)
}

/// Inverse of [`julian_day`], rounded to the nearest microsecond
pub fn calendar_from_julian_day(jd: f64) -> CalendarTuple {
    let jd_plus_half = jd + 0.5;
    let mut z = jd_plus_half.floor();
    let mut micros = ((jd_plus_half - z) * DAY_US as f64).round() as i64;
    if micros >= DAY_US {
        z += 1.0;
        micros -= DAY_US;
    }

    // Dates outside the i32 year range saturate to its first or last day
    let first = julian_day_number(i32::MIN, 1, 1);
    let last = julian_day_number(i32::MAX, 12, 31);
    let (year, month, day) = calendar_date((z as i64).clamp(first, last));
    let year = i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX });

    let hour = (micros / 3_600_000_000) as u32;
    let minute = ((micros % 3_600_000_000) / 60_000_000) as u32;
    let second = (micros % 60_000_000) as f64 / 1_000_000.0;

    CalendarTuple {
        year,
        month,
        day,
        hour,
        minute,
        second,
    }
}

/// Julian Day of a chrono datetime; the datetime's UTC offset is applied first
pub fn julian_day_from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    let utc = dt.with_timezone(&Utc);
    julian_day(
        utc.year(),
        utc.month(),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second() as f64 + utc.nanosecond() as f64 / 1_000_000_000.0,
    )
}

/// Convert a Julian Day to a UTC datetime
pub fn datetime_from_julian_day(jd: f64) -> Result<DateTime<Utc>> {
    if !jd.is_finite() {
        return Err(TimeError::InvalidTime(format!("non-finite Julian Day {}", jd)));
    }

    let seconds = (jd - UNIX_EPOCH_JD) * DAY_S;
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;

    DateTime::<Utc>::from_timestamp(whole as i64, nanos).ok_or_else(|| {
        TimeError::OutOfRange(format!("Julian Day {} cannot be represented as a datetime", jd))
    })
}

/// Julian centuries elapsed since J2000.0
pub fn centuries_since_epoch(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}

/// Greenwich Mean Sidereal Time in hours, range [0, 24).
///
/// Meeus, Astronomical Algorithms, eq. 12.4.
pub fn greenwich_mean_sidereal_time(jd: f64) -> f64 {
    let t = centuries_since_epoch(jd);
    let theta = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;

    normalize_hours(theta / DEGREES_PER_HOUR)
}

/// Local Mean Sidereal Time in hours for an east-positive longitude in degrees
pub fn local_sidereal_time(jd: f64, longitude_deg: f64) -> f64 {
    normalize_hours(greenwich_mean_sidereal_time(jd) + longitude_deg / DEGREES_PER_HOUR)
}

/// Reduce an hour value into [0, 24)
pub fn normalize_hours(hours: f64) -> f64 {
    let h = hours.rem_euclid(HOURS_PER_DAY);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs
    if h >= HOURS_PER_DAY {
        0.0
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::FixedOffset;
    use rstest::rstest;

    #[test]
    fn test_j2000_is_exact() {
        let jd = julian_day(2000, 1, 1, 12, 0, 0.0);
        assert_eq!(jd, J2000);
        assert_eq!(centuries_since_epoch(jd), 0.0);
    }

    #[rstest]
    #[case(2000, 1, 1, 2451545)]
    #[case(2020, 1, 1, 2458850)]
    #[case(1969, 7, 20, 2440423)]
    #[case(1900, 1, 1, 2415021)]
    #[case(-4713, 11, 24, 0)]
    #[case(3_000_000, 1, 1, 1_097_448_560)]
    fn test_julian_day_number(#[case] y: i32, #[case] m: u32, #[case] d: u32, #[case] jdn: i64) {
        assert_eq!(julian_day_number(y, m, d), jdn);
        assert_eq!(calendar_date(jdn), (y as i64, m, d));
    }

    #[rstest]
    #[case(i32::MAX, 12, 31)]
    #[case(2_000_000_000, 2, 28)]
    #[case(-10_000, 3, 1)]
    #[case(-2_000_000_000, 1, 1)]
    fn test_extreme_years_extrapolate(#[case] y: i32, #[case] m: u32, #[case] d: u32) {
        let jdn = julian_day_number(y, m, d);
        assert_eq!(calendar_date(jdn), (y as i64, m, d));
        assert_eq!(julian_day(y, m, d, 12, 0, 0.0), jdn as f64);
    }

    #[test]
    fn test_three_million_years_ahead() {
        let jd = julian_day(3_000_000, 1, 1, 0, 0, 0.0);
        assert_eq!(jd, 1_097_448_559.5);
        // 2,998,000 Gregorian years of 365.2425 days after J2000
        assert_abs_diff_eq!(jd + 0.5 - 2_451_545.0, 2_998_000.0 * 365.2425, epsilon = 1e-6);

        let cal = calendar_from_julian_day(jd);
        assert_eq!((cal.year, cal.month, cal.day), (3_000_000, 1, 1));

        let cal = calendar_from_julian_day(1e300);
        assert_eq!((cal.year, cal.month, cal.day), (i32::MAX, 12, 31));
        let cal = calendar_from_julian_day(-1e300);
        assert_eq!((cal.year, cal.month, cal.day), (i32::MIN, 1, 1));
    }

    #[test]
    fn test_month_overflow_rolls_into_next_year() {
        assert_eq!(julian_day_number(1999, 13, 1), julian_day_number(2000, 1, 1));
        assert_eq!(julian_day_number(2000, u32::MAX, 1), julian_day_number(357_915_941, 3, 1));
    }

    #[test]
    fn test_meeus_example_7a() {
        // Launch of Sputnik 1: 1957-10-04.81
        let jd = julian_day(1957, 10, 4, 19, 26, 24.0);
        assert_relative_eq!(jd, 2436116.31, epsilon = 1e-6);
    }

    #[rstest]
    #[case(1900, 1, 1, 0, 0, 0.0)]
    #[case(1957, 10, 4, 19, 26, 24.0)]
    #[case(1987, 4, 10, 19, 21, 0.0)]
    #[case(2000, 2, 29, 23, 59, 59.5)]
    #[case(2024, 12, 31, 6, 7, 8.25)]
    #[case(2100, 12, 31, 12, 0, 0.0)]
    fn test_calendar_round_trip(
        #[case] y: i32,
        #[case] mo: u32,
        #[case] d: u32,
        #[case] h: u32,
        #[case] mi: u32,
        #[case] s: f64,
    ) {
        let cal = CalendarTuple::new(y, mo, d, h, mi, s);
        let back = calendar_from_julian_day(julian_day_from_calendar(&cal));

        assert_eq!((back.year, back.month, back.day), (y, mo, d));
        assert_abs_diff_eq!(back.seconds_of_day(), cal.seconds_of_day(), epsilon = 1e-3);
    }

    #[test]
    fn test_utc_offset_is_applied() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2000, 1, 1, 14, 0, 0).unwrap();
        assert_relative_eq!(julian_day_from_datetime(&local), J2000, epsilon = 1e-9);
    }

    #[test]
    fn test_datetime_round_trip() {
        let dt = datetime_from_julian_day(J2000).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());
        assert!(datetime_from_julian_day(f64::NAN).is_err());
        assert!(datetime_from_julian_day(1e15).is_err());
    }

    #[test]
    fn test_gmst_meeus_examples() {
        // Meeus example 12.a: 1987-04-10 0h UT -> 13h10m46.3668s
        let gmst = greenwich_mean_sidereal_time(julian_day(1987, 4, 10, 0, 0, 0.0));
        assert_abs_diff_eq!(gmst, 13.0 + 10.0 / 60.0 + 46.3668 / 3600.0, epsilon = 1e-4);

        // Meeus example 12.b: 1987-04-10 19:21 UT -> 8h34m57.0896s
        let gmst = greenwich_mean_sidereal_time(julian_day(1987, 4, 10, 19, 21, 0.0));
        assert_abs_diff_eq!(gmst, 8.0 + 34.0 / 60.0 + 57.0896 / 3600.0, epsilon = 1e-4);
    }

    #[test]
    fn test_gmst_increases_with_time() {
        let jd = julian_day(2010, 6, 1, 3, 0, 0.0);
        let eps = 1e-4;
        let delta = greenwich_mean_sidereal_time(jd + eps) - greenwich_mean_sidereal_time(jd);
        // Sidereal time runs about 1.0027 times faster than solar time
        assert!(delta > 0.0);
        assert_relative_eq!(delta, eps * 24.0 * 1.002_737_9, max_relative = 1e-4);
    }

    #[test]
    fn test_local_sidereal_time_wraps() {
        let jd = julian_day(1987, 4, 10, 0, 0, 0.0);
        let gmst = greenwich_mean_sidereal_time(jd);
        let lst = local_sidereal_time(jd, 180.0);
        assert_abs_diff_eq!(lst, normalize_hours(gmst + 12.0), epsilon = 1e-12);
        assert!((0.0..24.0).contains(&local_sidereal_time(jd, -179.9)));
    }

    #[test]
    fn test_normalize_hours() {
        assert_eq!(normalize_hours(24.0), 0.0);
        assert_eq!(normalize_hours(-1.0), 23.0);
        assert!(normalize_hours(-1e-17) < 24.0);
    }
}
