//! Decimal and date/time values that remember how they were written.
//!
//! FHIR keeps the precision of `decimal` (`1.50` is not `1.5`) and of
//! `dateTime` (`2024` is a year, not midnight on January 1st), and a
//! `dateTime` carries the offset it was recorded in. The types here keep the
//! lexical form next to the parsed value, and compare and hash on value
//! *and* precision so that two nodes are only equal when they say the same
//! thing.

use chrono::{DateTime as ChronoDateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

static DECIMAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$").expect("valid decimal regex")
});

// groups: 1 year, 2 month, 3 day, 4-6 h:m:s, 7 fraction digits, 8 offset
static DATE_TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([0-9]{4})(?:-([0-9]{2})(?:-([0-9]{2})(?:T([0-9]{2}):([0-9]{2}):([0-9]{2})(?:\.([0-9]{1,9}))?(Z|[+-][0-9]{2}:[0-9]{2}))?)?)?$",
    )
    .expect("valid dateTime regex")
});

/// A `decimal` value together with its original text.
///
/// Equality and hashing use the numeric value and its scale, so `1.50`
/// equals `1.50` but neither `1.5` nor `1.500`.
#[derive(Debug, Clone)]
pub struct PreciseDecimal {
    value: Decimal,
    original: Arc<str>,
}

impl PreciseDecimal {
    /// Parses plain (`12.340`) or exponent (`1.2E3`) notation.
    pub fn parse(s: &str) -> Option<Self> {
        if !DECIMAL_PATTERN.is_match(s) {
            return None;
        }
        let value = if s.contains(['e', 'E']) {
            Decimal::from_scientific(&s.to_ascii_lowercase()).ok()?
        } else {
            s.parse::<Decimal>().ok()?
        };
        Some(Self {
            value,
            original: Arc::from(s),
        })
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Number of digits after the decimal point.
    pub fn scale(&self) -> u32 {
        self.value.scale()
    }

    pub fn original_string(&self) -> &str {
        &self.original
    }
}

impl From<Decimal> for PreciseDecimal {
    fn from(value: Decimal) -> Self {
        Self {
            original: Arc::from(value.to_string()),
            value,
        }
    }
}

impl PartialEq for PreciseDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.value.scale() == other.value.scale()
    }
}

impl Eq for PreciseDecimal {}

impl Hash for PreciseDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
        self.value.scale().hash(state);
    }
}

impl fmt::Display for PreciseDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// How much of a `dateTime` was written down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateTimePrecision {
    /// `YYYY`
    Year,
    /// `YYYY-MM`
    YearMonth,
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DDThh:mm:ss` plus offset
    Second,
    /// `YYYY-MM-DDThh:mm:ss.f` plus offset, one to nine fraction digits
    Fraction,
}

/// A FHIR `dateTime`: partial dates are kept partial and times keep the
/// offset they were written with.
///
/// `2024-01-01T10:00:00+01:00` and `2024-01-01T09:00:00Z` denote the same
/// instant but are different values; use [`to_chrono`](Self::to_chrono) to
/// compare instants.
#[derive(Debug, Clone)]
pub struct PrecisionDateTime {
    precision: DateTimePrecision,
    /// Missing month or day components are stored as 1.
    date: NaiveDate,
    time: Option<(NaiveTime, FixedOffset)>,
    original: Arc<str>,
}

impl PrecisionDateTime {
    pub fn parse(s: &str) -> Option<Self> {
        let caps = DATE_TIME_PATTERN.captures(s)?;
        let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

        let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
        let (month, day) = (number(2), number(3));
        let date = NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))?;

        let (precision, time) = match caps.get(4) {
            None => {
                let precision = match (month, day) {
                    (None, _) => DateTimePrecision::Year,
                    (Some(_), None) => DateTimePrecision::YearMonth,
                    (Some(_), Some(_)) => DateTimePrecision::Date,
                };
                (precision, None)
            }
            Some(_) => {
                let (precision, nanos) = match caps.get(7) {
                    Some(fraction) => {
                        let padded = format!("{:0<9}", fraction.as_str());
                        (DateTimePrecision::Fraction, padded.parse::<u32>().ok()?)
                    }
                    None => (DateTimePrecision::Second, 0),
                };
                let time = NaiveTime::from_hms_nano_opt(number(4)?, number(5)?, number(6)?, nanos)?;
                let offset = parse_offset(caps.get(8)?.as_str())?;
                (precision, Some((time, offset)))
            }
        };

        Some(Self {
            precision,
            date,
            time,
            original: Arc::from(s),
        })
    }

    pub fn precision(&self) -> DateTimePrecision {
        self.precision
    }

    pub fn original_string(&self) -> &str {
        &self.original
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Local time of day, when the value has one.
    pub fn time(&self) -> Option<NaiveTime> {
        self.time.map(|(time, _)| time)
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.time.map(|(_, offset)| offset)
    }

    /// The instant denoted, for values with a time component.
    pub fn to_chrono(&self) -> Option<ChronoDateTime<FixedOffset>> {
        let (time, offset) = self.time?;
        self.date.and_time(time).and_local_timezone(offset).single()
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    if s == "Z" {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = s.split_at(1);
    let (hours, minutes) = rest.split_once(':')?;
    let minutes = hours.parse::<i32>().ok()? * 60 + minutes.parse::<i32>().ok()?;
    if minutes > 14 * 60 {
        return None;
    }
    let seconds = minutes * 60;
    FixedOffset::east_opt(if sign == "-" { -seconds } else { seconds })
}

impl From<ChronoDateTime<FixedOffset>> for PrecisionDateTime {
    fn from(value: ChronoDateTime<FixedOffset>) -> Self {
        let precision = if value.nanosecond() == 0 {
            DateTimePrecision::Second
        } else {
            DateTimePrecision::Fraction
        };
        Self {
            precision,
            date: value.date_naive(),
            time: Some((value.time(), *value.offset())),
            original: Arc::from(value.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl PartialEq for PrecisionDateTime {
    fn eq(&self, other: &Self) -> bool {
        self.precision == other.precision && self.date == other.date && self.time == other.time
    }
}

impl Eq for PrecisionDateTime {}

impl Hash for PrecisionDateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.precision.hash(state);
        self.date.hash(state);
        self.time.hash(state);
    }
}

impl fmt::Display for PrecisionDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Serialize for PrecisionDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for PrecisionDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PrecisionDateTime::parse(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid FHIR dateTime: '{}'", s)))
    }
}

/// A FHIR `instant`: a `dateTime` with at least seconds and an offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrecisionInstant {
    inner: PrecisionDateTime,
}

impl PrecisionInstant {
    pub fn parse(s: &str) -> Option<Self> {
        let inner = PrecisionDateTime::parse(s)?;
        (inner.precision >= DateTimePrecision::Second).then_some(Self { inner })
    }

    pub fn as_datetime(&self) -> &PrecisionDateTime {
        &self.inner
    }

    pub fn original_string(&self) -> &str {
        self.inner.original_string()
    }

    pub fn to_chrono(&self) -> Option<ChronoDateTime<FixedOffset>> {
        self.inner.to_chrono()
    }
}

impl From<ChronoDateTime<FixedOffset>> for PrecisionInstant {
    fn from(value: ChronoDateTime<FixedOffset>) -> Self {
        Self {
            inner: PrecisionDateTime::from(value),
        }
    }
}

impl fmt::Display for PrecisionInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl Serialize for PrecisionInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.inner.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PrecisionInstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PrecisionInstant::parse(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid FHIR instant: '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frozen::structural_hash;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_keeps_scale() {
        let a = PreciseDecimal::parse("1.50").unwrap();
        let b = PreciseDecimal::parse("1.5").unwrap();
        assert_eq!(a.value(), b.value());
        assert_ne!(a, b);
        assert_eq!(a.scale(), 2);
        assert_eq!(a.original_string(), "1.50");
        assert_eq!(a, PreciseDecimal::from(dec!(1.50)));
        assert_eq!(structural_hash(&a), structural_hash(&PreciseDecimal::from(dec!(1.50))));
    }

    #[test]
    fn test_decimal_exponent_notation() {
        let d = PreciseDecimal::parse("1.2E3").unwrap();
        assert_eq!(d.value(), dec!(1200));
        assert_eq!(d.to_string(), "1.2E3");
        assert!(PreciseDecimal::parse("1.").is_none());
        assert!(PreciseDecimal::parse("01").is_none());
        assert!(PreciseDecimal::parse("abc").is_none());
    }

    #[test]
    fn test_partial_dates() {
        let year = PrecisionDateTime::parse("2024").unwrap();
        assert_eq!(year.precision(), DateTimePrecision::Year);
        assert!(year.time().is_none());

        let month = PrecisionDateTime::parse("2024-01").unwrap();
        assert_eq!(month.precision(), DateTimePrecision::YearMonth);
        let day = PrecisionDateTime::parse("2024-01-01").unwrap();
        assert_eq!(day.precision(), DateTimePrecision::Date);

        // same calendar start, different precision
        assert_eq!(year.date(), day.date());
        assert_ne!(year, month);
        assert_ne!(month, day);
    }

    #[test]
    fn test_offsets_are_part_of_the_value() {
        let plus_one = PrecisionDateTime::parse("2024-01-01T10:00:00+01:00").unwrap();
        let utc = PrecisionDateTime::parse("2024-01-01T09:00:00Z").unwrap();
        assert_ne!(plus_one, utc);
        assert_ne!(structural_hash(&plus_one), structural_hash(&utc));
        assert_eq!(plus_one.to_chrono(), utc.to_chrono());
        assert_eq!(plus_one.offset(), FixedOffset::east_opt(3600));

        // "+00:00" and "Z" are the same offset
        let zero = PrecisionDateTime::parse("2024-01-01T09:00:00+00:00").unwrap();
        assert_eq!(zero, utc);
        assert_eq!(zero.original_string(), "2024-01-01T09:00:00+00:00");
    }

    #[test]
    fn test_fraction_and_invalid_values() {
        let dt = PrecisionDateTime::parse("2024-03-01T10:00:00.25-05:00").unwrap();
        assert_eq!(dt.precision(), DateTimePrecision::Fraction);
        assert_eq!(dt.time().map(|t| t.nanosecond()), Some(250_000_000));

        assert!(PrecisionDateTime::parse("2024-02-30").is_none());
        assert!(PrecisionDateTime::parse("2024-01-01T10:00").is_none());
        assert!(PrecisionDateTime::parse("2024-01-01T10:00:00").is_none());
        assert!(PrecisionDateTime::parse("2024-01-01T10:00:00+15:00").is_none());
    }

    #[test]
    fn test_instant_needs_seconds() {
        assert!(PrecisionInstant::parse("2024-01-01").is_none());
        let i = PrecisionInstant::parse("2024-01-01T09:00:00Z").unwrap();
        assert_eq!(i.as_datetime().precision(), DateTimePrecision::Second);
    }

    #[test]
    fn test_from_chrono() {
        let chrono = ChronoDateTime::parse_from_rfc3339("2024-03-01T10:00:00+01:00").unwrap();
        let dt = PrecisionDateTime::from(chrono);
        assert_eq!(dt.original_string(), "2024-03-01T10:00:00+01:00");
        assert_eq!(dt, PrecisionDateTime::parse("2024-03-01T10:00:00+01:00").unwrap());
        assert_eq!(dt.to_chrono(), Some(chrono));
    }

    #[test]
    fn test_serde_uses_original_text() {
        let dt: PrecisionDateTime = serde_json::from_str("\"2024-05\"").unwrap();
        assert_eq!(dt.precision(), DateTimePrecision::YearMonth);
        assert_eq!(serde_json::to_string(&dt).unwrap(), "\"2024-05\"");
        assert!(serde_json::from_str::<PrecisionInstant>("\"2024-05\"").is_err());
    }
}
