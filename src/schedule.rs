use crate::interval::common_free_intervals;
use crate::member::{DayOfWeek, Member};
use crate::slot::{ScoringWeights, Slot, SlotScorer};
use crate::time::{TimeOfDay, TimeRange};
use chrono::{Datelike, Days, Local, NaiveDate};
use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{self, AtomicBool};
use thiserror::Error;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Serialize, Error, Debug, Clone, Eq, PartialEq)]
pub enum ValidationError {
    #[error("Invalid time of day {value:?}, expected HH:MM between 00:00 and 23:59")]
    InvalidTime { value: String },
    #[error("Meetup duration must be at least one hour, got {hours}")]
    InvalidDuration { hours: u32 },
    #[error("Preferred window must start before it ends, got {start}-{end}")]
    InvalidWindow { start: TimeOfDay, end: TimeOfDay },
    #[error("Must search at least one day ahead, got {days_ahead}")]
    InvalidHorizon { days_ahead: u32 },
    #[error("Searching {days_ahead} days from {today} runs past the end of the calendar")]
    HorizonOutOfRange { today: NaiveDate, days_ahead: u32 },
    #[error("Member {member} is busy on {day} from {start} until {end}, which is not a valid interval")]
    InvalidBusyInterval {
        member: String,
        day: DayOfWeek,
        start: TimeOfDay,
        end: TimeOfDay,
    },
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum FinderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Search was cancelled")]
    Cancelled,
}

/// What to look for: who, for how long, at which time of day, and how far ahead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub selected_member_ids: Vec<String>,
    pub duration_hours: u32,
    #[serde(alias = "preferredWindowStart")]
    pub preferred_start: TimeOfDay,
    #[serde(alias = "preferredWindowEnd")]
    pub preferred_end: TimeOfDay,
    pub days_ahead: u32,
}

impl Query {
    pub fn new(
        selected_member_ids: Vec<String>,
        duration_hours: u32,
        preferred_start: TimeOfDay,
        preferred_end: TimeOfDay,
        days_ahead: u32,
    ) -> Query {
        Query {
            selected_member_ids,
            duration_hours,
            preferred_start,
            preferred_end,
            days_ahead,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinderConfig {
    pub max_results: usize,
    pub weights: ScoringWeights,
}

impl Default for FinderConfig {
    fn default() -> Self {
        FinderConfig {
            max_results: 10,
            weights: ScoringWeights::default(),
        }
    }
}

/// Finds the best times for a group of members to meet.
///
/// Holds no state between searches; the same finder can serve any number of
/// queries, from any number of threads.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use hangout_libs::member::Member;
/// use hangout_libs::schedule::{OptimalTimeFinder, Query};
///
/// let members = vec![
///     Member::new("anna", "Anna", Default::default()),
///     Member::new("ben", "Ben", Default::default()),
/// ];
/// let query = Query::new(
///     vec!["anna".to_string(), "ben".to_string()],
///     2,
///     "18:00".parse()?,
///     "22:00".parse()?,
///     1,
/// );
/// // A Monday
/// let today = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
///
/// let slots = OptimalTimeFinder::new(&members).find(&query, today)?;
///
/// assert_eq!(slots.len(), 1);
/// assert_eq!(slots[0].start_time.to_string(), "18:00");
/// assert_eq!(slots[0].end_time.to_string(), "20:00");
/// assert_eq!(slots[0].score, 145.0);
/// # Ok::<(), hangout_libs::schedule::ValidationError>(())
/// ```
pub struct OptimalTimeFinder<'a> {
    members: &'a [Member],
    config: FinderConfig,
}

impl<'a> OptimalTimeFinder<'a> {
    pub fn new(members: &'a [Member]) -> Self {
        OptimalTimeFinder::with_config(members, FinderConfig::default())
    }

    pub fn with_config(members: &'a [Member], config: FinderConfig) -> Self {
        OptimalTimeFinder { members, config }
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Searches `query.days_ahead` days starting at `today` and returns the
    /// best slots, best first.
    ///
    /// An empty selection, or one matching nobody in the roster, is not an
    /// error: it finds nothing.
    ///
    /// # Errors
    /// A `ValidationError` for a zero duration or horizon, a window that does
    /// not start before it ends, a horizon past the end of the calendar, or a
    /// selected member with an inverted busy interval. Nothing is searched in
    /// that case.
    pub fn find(&self, query: &Query, today: NaiveDate) -> Result<Vec<Slot>, ValidationError> {
        Ok(match self.plan(query, today)? {
            Some(search) => search.run(),
            None => vec![],
        })
    }

    /// Like `find`, but gives up with `FinderError::Cancelled` once
    /// `cancelled` is set. The flag is checked before each day.
    pub fn find_until(
        &self,
        query: &Query,
        today: NaiveDate,
        cancelled: &AtomicBool,
    ) -> Result<Vec<Slot>, FinderError> {
        match self.plan(query, today)? {
            Some(search) => search.run_until(cancelled),
            None => Ok(vec![]),
        }
    }

    fn plan<'q>(
        &'q self,
        query: &Query,
        today: NaiveDate,
    ) -> Result<Option<Search<'q>>, ValidationError> {
        if query.selected_member_ids.is_empty() {
            return Ok(None);
        }

        if query.duration_hours == 0 {
            return Err(ValidationError::InvalidDuration {
                hours: query.duration_hours,
            });
        }

        if query.preferred_start >= query.preferred_end {
            return Err(ValidationError::InvalidWindow {
                start: query.preferred_start,
                end: query.preferred_end,
            });
        }

        if query.days_ahead == 0 {
            return Err(ValidationError::InvalidHorizon {
                days_ahead: query.days_ahead,
            });
        }

        today
            .checked_add_days(Days::new(u64::from(query.days_ahead - 1)))
            .ok_or(ValidationError::HorizonOutOfRange {
                today,
                days_ahead: query.days_ahead,
            })?;

        let selected_ids: HashSet<&str> = query
            .selected_member_ids
            .iter()
            .map(String::as_str)
            .collect();

        let members = self
            .members
            .iter()
            .filter(|member| selected_ids.contains(member.id.as_str()))
            .unique_by(|&member| member.id.as_str())
            .collect_vec();

        for member in &members {
            member.validate()?;
        }

        if members.is_empty() {
            debug!("None of the {} selected ids are in the roster", selected_ids.len());
            return Ok(None);
        }

        debug!(
            "Searching {} days from {} for {} members between {} and {}",
            query.days_ahead,
            today,
            members.len(),
            query.preferred_start,
            query.preferred_end
        );

        Ok(Some(Search {
            members,
            config: &self.config,
            window: (query.preferred_start, query.preferred_end).into(),
            duration_hours: query.duration_hours,
            days_ahead: query.days_ahead,
            today,
        }))
    }
}

/// A validated query, ready to run.
struct Search<'a> {
    members: Vec<&'a Member>,
    config: &'a FinderConfig,
    window: TimeRange<u16>,
    duration_hours: u32,
    days_ahead: u32,
    today: NaiveDate,
}

impl<'a> Search<'a> {
    fn run(&self) -> Vec<Slot> {
        #[cfg(feature = "rayon")]
        let days = (0..self.days_ahead).into_par_iter();
        #[cfg(not(feature = "rayon"))]
        let days = 0..self.days_ahead;

        let slots = days.flat_map(|offset| self.day_slots(offset)).collect();

        self.rank(slots)
    }

    fn run_until(&self, cancelled: &AtomicBool) -> Result<Vec<Slot>, FinderError> {
        #[cfg(feature = "rayon")]
        let days = (0..self.days_ahead).into_par_iter();
        #[cfg(not(feature = "rayon"))]
        let days = 0..self.days_ahead;

        let per_day = days
            .map(|offset| {
                if cancelled.load(atomic::Ordering::Relaxed) {
                    Err(FinderError::Cancelled)
                } else {
                    Ok(self.day_slots(offset))
                }
            })
            .collect::<Result<Vec<Vec<Slot>>, FinderError>>()?;

        Ok(self.rank(per_day.into_iter().flatten().collect()))
    }

    fn day_slots(&self, offset: u32) -> Vec<Slot> {
        // The last day of the horizon was checked while planning.
        let date = match self.today.checked_add_days(Days::new(u64::from(offset))) {
            Some(date) => date,
            None => return vec![],
        };
        let day = DayOfWeek::from(date.weekday());

        let intervals = common_free_intervals(&self.members, day, self.window);
        let scorer = SlotScorer::new(&self.config.weights, self.duration_hours, self.members.len());

        let slots = intervals
            .iter()
            .filter_map(|interval| scorer.score(date, day, interval))
            .collect_vec();

        debug!(
            "{} ({}): {} merged intervals, {} slots",
            date,
            day,
            intervals.len(),
            slots.len()
        );

        slots
    }

    fn rank(&self, mut slots: Vec<Slot>) -> Vec<Slot> {
        let candidates = slots.len();

        slots.sort_by(Slot::cmp_by_rank);
        slots.truncate(self.config.max_results);

        info!("Found {} candidate slots, returning {}", candidates, slots.len());

        slots
    }
}

/// Finds the best times over the next `days_ahead` days, starting today in the
/// local calendar, with the default scoring.
///
/// # Errors
/// `ValidationError::InvalidTime` when either window bound is not `"HH:MM"`,
/// plus everything `OptimalTimeFinder::find` rejects.
pub fn find_optimal_times<S>(
    members: &[Member],
    selected_member_ids: &[S],
    duration_hours: u32,
    preferred_start: &str,
    preferred_end: &str,
    days_ahead: u32,
) -> Result<Vec<Slot>, ValidationError>
where
    S: AsRef<str>,
{
    if selected_member_ids.is_empty() {
        return Ok(vec![]);
    }

    let query = Query::new(
        selected_member_ids
            .iter()
            .map(|id| id.as_ref().to_string())
            .collect(),
        duration_hours,
        preferred_start.parse()?,
        preferred_end.parse()?,
        days_ahead,
    );

    OptimalTimeFinder::new(members).find(&query, Local::now().date_naive())
}
