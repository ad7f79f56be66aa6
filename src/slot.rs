use crate::interval::Interval;
use crate::member::DayOfWeek;
use crate::time::{TimeOfDay, MINUTES_PER_HOUR};
use chrono::NaiveDate;
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// A candidate meetup: `duration` minutes starting at the beginning of a
/// merged interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub available_member_ids: Vec<String>,
    pub total_members: usize,
    /// `100 * available / total`
    pub availability_percentage: f64,
    pub day_of_week: DayOfWeek,
    pub is_weekend: bool,
    pub score: f64,
}

impl Slot {
    pub fn duration_minutes(&self) -> u16 {
        self.end_time.minutes() - self.start_time.minutes()
    }

    pub fn is_full_attendance(&self) -> bool {
        self.available_member_ids.len() == self.total_members
    }

    /// Best first: higher score, then earlier date, then higher availability,
    /// then earlier start.
    ///
    /// Availability is compared on member counts so equal ratios from
    /// different group sizes tie exactly.
    pub fn cmp_by_rank(&self, other: &Slot) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.date.cmp(&other.date))
            .then_with(|| {
                let ours = self.available_member_ids.len() * other.total_members;
                let theirs = other.available_member_ids.len() * self.total_members;
                theirs.cmp(&ours)
            })
            .then_with(|| self.start_time.cmp(&other.start_time))
    }
}

/// Bonuses and penalties added on top of the availability percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringWeights {
    pub weekend_bonus: f64,
    pub full_attendance_bonus: f64,
    pub evening_start: TimeOfDay,
    pub evening_bonus: f64,
    /// Stacks with `evening_bonus`
    pub late_evening_start: TimeOfDay,
    pub late_evening_bonus: f64,
    pub early_start: TimeOfDay,
    pub early_penalty: f64,
    pub min_preferred_duration_hours: u32,
    pub max_preferred_duration_hours: u32,
    pub preferred_duration_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            weekend_bonus: 20.0,
            full_attendance_bonus: 30.0,
            evening_start: TimeOfDay::hm(18, 0),
            evening_bonus: 10.0,
            late_evening_start: TimeOfDay::hm(19, 0),
            late_evening_bonus: 5.0,
            early_start: TimeOfDay::hm(10, 0),
            early_penalty: 15.0,
            min_preferred_duration_hours: 2,
            max_preferred_duration_hours: 4,
            preferred_duration_bonus: 5.0,
        }
    }
}

/// Turns the merged intervals of one date into scored slots.
pub struct SlotScorer<'w> {
    weights: &'w ScoringWeights,
    duration_hours: u32,
    duration_minutes: u32,
    total_members: usize,
}

impl<'w> SlotScorer<'w> {
    pub fn new(weights: &'w ScoringWeights, duration_hours: u32, total_members: usize) -> Self {
        SlotScorer {
            weights,
            duration_hours,
            duration_minutes: duration_hours.saturating_mul(u32::from(MINUTES_PER_HOUR)),
            total_members,
        }
    }

    /// `None` when nobody is free or the interval is shorter than the meetup.
    pub fn score(&self, date: NaiveDate, day: DayOfWeek, interval: &Interval<'_>) -> Option<Slot> {
        let available = interval.available.len();
        if available == 0
            || self.total_members == 0
            || u32::from(interval.duration()) < self.duration_minutes
        {
            return None;
        }

        let start = interval.range.start();
        // Fits inside the interval, which ends before midnight.
        let end = start + self.duration_minutes as u16;
        let start_time = TimeOfDay::from_minutes(start).ok()?;
        let end_time = TimeOfDay::from_minutes(end).ok()?;

        let availability_percentage = 100.0 * available as f64 / self.total_members as f64;
        let weights = self.weights;

        let mut score = availability_percentage;
        if day.is_weekend() {
            score += weights.weekend_bonus;
        }
        if available == self.total_members {
            score += weights.full_attendance_bonus;
        }
        if start_time >= weights.evening_start {
            score += weights.evening_bonus;
        }
        if start_time >= weights.late_evening_start {
            score += weights.late_evening_bonus;
        }
        if start_time < weights.early_start {
            score -= weights.early_penalty;
        }
        if (weights.min_preferred_duration_hours..=weights.max_preferred_duration_hours)
            .contains(&self.duration_hours)
        {
            score += weights.preferred_duration_bonus;
        }

        Some(Slot {
            date,
            start_time,
            end_time,
            available_member_ids: interval.available.iter().map(|id| id.to_string()).collect(),
            total_members: self.total_members,
            availability_percentage,
            day_of_week: day,
            is_weekend: day.is_weekend(),
            score,
        })
    }
}
