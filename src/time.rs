use crate::schedule::ValidationError;
use core::fmt;
use core::str::FromStr;
use num::{Integer, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub const MINUTES_PER_HOUR: u16 = 60;
pub const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// Minutes since midnight, always within `0..1440`.
///
/// Parses from and formats to `"HH:MM"`.
///
/// # Examples
/// ```
/// use hangout_libs::time::TimeOfDay;
///
/// let evening: TimeOfDay = "18:30".parse().unwrap();
///
/// assert_eq!(evening.minutes(), 18 * 60 + 30);
/// assert_eq!(evening.to_string(), "18:30");
/// assert!("24:00".parse::<TimeOfDay>().is_err());
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Only for constants known to be in range.
    pub(crate) const fn hm(hours: u16, minutes: u16) -> TimeOfDay {
        TimeOfDay(hours * MINUTES_PER_HOUR + minutes)
    }

    /// Builds a time from an offset in minutes since midnight.
    ///
    /// # Errors
    /// `ValidationError::InvalidTime` if `minutes >= 1440`.
    pub fn from_minutes(minutes: u16) -> Result<TimeOfDay, ValidationError> {
        if minutes < MINUTES_PER_DAY {
            Ok(TimeOfDay(minutes))
        } else {
            Err(ValidationError::InvalidTime {
                value: minutes.to_string(),
            })
        }
    }

    /// Parses a zero padded `"HH:MM"` string.
    ///
    /// # Examples
    /// ```
    /// use hangout_libs::time::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::parse("00:00").unwrap().minutes(), 0);
    /// assert_eq!(TimeOfDay::parse("23:59").unwrap().minutes(), 1439);
    ///
    /// assert!(TimeOfDay::parse("9:00").is_err());
    /// assert!(TimeOfDay::parse("12:60").is_err());
    /// assert!(TimeOfDay::parse("noon").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<TimeOfDay, ValidationError> {
        let invalid = || ValidationError::InvalidTime {
            value: value.to_string(),
        };

        let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2
            || minutes.len() != 2
            || !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let hours: u16 = hours.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes.parse().map_err(|_| invalid())?;

        if hours > 23 || minutes >= MINUTES_PER_HOUR {
            Err(invalid())
        } else {
            Ok(TimeOfDay::hm(hours, minutes))
        }
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hours(self) -> u16 {
        self.0 / MINUTES_PER_HOUR
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse(value)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}",
            self.0 / MINUTES_PER_HOUR,
            self.0 % MINUTES_PER_HOUR
        )
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for TimeOfDay {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(TimeOfDay(u.int_in_range(0..=MINUTES_PER_DAY - 1)?))
    }
}

/// Half open [start, end) time range
/// <N>: Any integer type
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimeRange<N>(pub N, pub N);

impl<N> TimeRange<N>
where
    N: Integer + Copy,
{
    /// Construct a new Time Range
    /// Range is half open on [start, end)
    /// # Examples
    /// ```
    /// use hangout_libs::time::TimeRange;
    ///
    /// let test = TimeRange::new(0, 100);
    ///
    /// assert_eq!(test.0, 0);
    /// assert_eq!(test.1, 100);
    /// ```
    pub fn new(start: N, end: N) -> TimeRange<N> {
        TimeRange(start, end)
    }

    pub fn start(self) -> N {
        self.0
    }

    pub fn end(self) -> N {
        self.1
    }

    /// Length of the range, zero for empty or inverted ranges
    ///
    /// # Examples
    /// ```
    /// use hangout_libs::time::TimeRange;
    ///
    /// assert_eq!(TimeRange::new(540, 660).len(), 120);
    /// assert_eq!(TimeRange::new(5, 5).len(), 0);
    /// ```
    pub fn len(self) -> N {
        if self.1 > self.0 {
            self.1 - self.0
        } else {
            N::zero()
        }
    }

    pub fn is_empty(self) -> bool {
        self.1 <= self.0
    }

    /// Two half open ranges overlap when each starts before the other ends.
    /// Touching ranges do not overlap.
    ///
    /// # Examples
    /// ```
    /// use hangout_libs::time::TimeRange;
    ///
    /// let busy = TimeRange::new(540, 1080);
    ///
    /// assert!(busy.overlaps(&TimeRange::new(1000, 1100)));
    /// assert!(!busy.overlaps(&TimeRange::new(1080, 1200)));
    /// assert!(!busy.overlaps(&TimeRange::new(420, 540)));
    /// ```
    pub fn overlaps(&self, other: &TimeRange<N>) -> bool {
        self.0 < other.1 && other.0 < self.1
    }

    /// True when `other` lies entirely within `self`
    pub fn contains_range(&self, other: &TimeRange<N>) -> bool {
        self.0 <= other.0 && other.1 <= self.1
    }

    /// True when `value` is inside the closed range [start, end]
    pub fn contains_inclusive(&self, value: N) -> bool {
        self.0 <= value && value <= self.1
    }
}

impl From<(TimeOfDay, TimeOfDay)> for TimeRange<u16> {
    fn from((start, end): (TimeOfDay, TimeOfDay)) -> Self {
        TimeRange::new(start.minutes(), end.minutes())
    }
}
