use crate::schedule::ValidationError;
use crate::time::{TimeOfDay, TimeRange};
use chrono::Weekday;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed, locale independent weekday labels. The week starts on Sunday.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One day of a member's recurring week.
/// `busy_start` and `busy_end` only matter when `is_busy` is set.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    #[serde(alias = "isWorking")]
    pub is_busy: bool,
    #[serde(default, alias = "startTime")]
    pub busy_start: TimeOfDay,
    #[serde(default, alias = "endTime")]
    pub busy_end: TimeOfDay,
}

impl DayAvailability {
    pub fn free() -> Self {
        DayAvailability::default()
    }

    pub fn busy(busy_start: TimeOfDay, busy_end: TimeOfDay) -> Self {
        DayAvailability {
            is_busy: true,
            busy_start,
            busy_end,
        }
    }

    /// The busy interval in minutes, `None` on a free day
    pub fn busy_range(&self) -> Option<TimeRange<u16>> {
        if self.is_busy {
            Some((self.busy_start, self.busy_end).into())
        } else {
            None
        }
    }
}

pub type WeeklySchedule = BTreeMap<DayOfWeek, DayAvailability>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default, alias = "name")]
    pub display_name: String,
    #[serde(default, alias = "schedule")]
    pub weekly_schedule: WeeklySchedule,
}

impl Member {
    /// Constructs a new Member with the specified weekly schedule.
    /// Days missing from the schedule are free all day.
    pub fn new(id: &str, display_name: &str, weekly_schedule: WeeklySchedule) -> Member {
        Member {
            id: id.to_string(),
            display_name: display_name.to_string(),
            weekly_schedule,
        }
    }

    /// Returns this member with `day` set to `availability`
    ///
    /// # Examples
    /// ```
    /// use hangout_libs::member::{DayAvailability, DayOfWeek, Member};
    ///
    /// let office_hours = DayAvailability::busy("09:00".parse()?, "18:00".parse()?);
    /// let anna = Member::new("anna", "Anna", Default::default())
    ///     .with_day(DayOfWeek::Monday, office_hours);
    ///
    /// assert_eq!(anna.availability_on(DayOfWeek::Monday), office_hours);
    /// assert_eq!(anna.availability_on(DayOfWeek::Tuesday), DayAvailability::free());
    /// # Ok::<(), hangout_libs::schedule::ValidationError>(())
    /// ```
    pub fn with_day(mut self, day: DayOfWeek, availability: DayAvailability) -> Member {
        self.weekly_schedule.insert(day, availability);
        self
    }

    pub fn availability_on(&self, day: DayOfWeek) -> DayAvailability {
        self.weekly_schedule
            .get(&day)
            .copied()
            .unwrap_or_else(DayAvailability::free)
    }

    pub fn busy_on(&self, day: DayOfWeek) -> Option<TimeRange<u16>> {
        self.availability_on(day).busy_range()
    }

    /// A member is free for `range` when they are not busy that day, or their
    /// busy interval does not overlap `range`.
    pub fn is_free(&self, day: DayOfWeek, range: &TimeRange<u16>) -> bool {
        match self.busy_on(day) {
            Some(busy) => !busy.overlaps(range),
            None => true,
        }
    }

    /// Checks that every busy day has `busy_start < busy_end`
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self
            .weekly_schedule
            .iter()
            .find(|(_, availability)| {
                availability.is_busy && availability.busy_start >= availability.busy_end
            }) {
            Some((&day, availability)) => Err(ValidationError::InvalidBusyInterval {
                member: self.id.clone(),
                day,
                start: availability.busy_start,
                end: availability.busy_end,
            }),
            None => Ok(()),
        }
    }
}
