use crate::member::{DayOfWeek, Member};
use crate::time::TimeRange;
use itertools::Itertools;
use log::trace;
use std::collections::BTreeSet;

/// A stretch of one day during which exactly `available` members are free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval<'a> {
    pub range: TimeRange<u16>,
    pub available: BTreeSet<&'a str>,
}

impl<'a> Interval<'a> {
    pub fn duration(&self) -> u16 {
        self.range.len()
    }
}

/// Sorted, distinct boundaries inside `window` for one day.
///
/// Always holds both window edges. Busy edges strictly outside the window are
/// dropped; edges landing exactly on the window edges are kept.
///
/// # Examples
/// ```
/// use hangout_libs::interval::breakpoints;
/// use hangout_libs::member::{DayAvailability, DayOfWeek, Member};
/// use hangout_libs::time::{TimeOfDay, TimeRange};
///
/// let anna = Member::new("anna", "Anna", Default::default()).with_day(
///     DayOfWeek::Monday,
///     DayAvailability::busy("08:00".parse()?, "12:00".parse()?),
/// );
/// let window = TimeRange::new(540, 1260);
///
/// assert_eq!(breakpoints(&[&anna], DayOfWeek::Monday, window), vec![540, 720, 1260]);
/// assert_eq!(breakpoints(&[&anna], DayOfWeek::Tuesday, window), vec![540, 1260]);
/// # Ok::<(), hangout_libs::schedule::ValidationError>(())
/// ```
pub fn breakpoints(members: &[&Member], day: DayOfWeek, window: TimeRange<u16>) -> Vec<u16> {
    members
        .iter()
        .filter_map(|member| member.busy_on(day))
        .flat_map(|busy| [busy.start(), busy.end()])
        .filter(|&edge| window.contains_inclusive(edge))
        .chain([window.start(), window.end()])
        .sorted_unstable()
        .dedup()
        .collect_vec()
}

/// Splits the day at every breakpoint and records who is free for the whole
/// of each piece. Pieces nobody is free for are kept.
pub fn evaluate<'a>(members: &[&'a Member], day: DayOfWeek, breakpoints: &[u16]) -> Vec<Interval<'a>> {
    breakpoints
        .iter()
        .tuple_windows()
        .map(|(&start, &end)| {
            let range = TimeRange::new(start, end);
            Interval {
                range,
                available: members
                    .iter()
                    .filter(|member| member.is_free(day, &range))
                    .map(|member| member.id.as_str())
                    .collect(),
            }
        })
        .collect_vec()
}

pub trait AvailabilityMerge<'a> {
    fn availability_merge(self) -> Vec<Interval<'a>>;
}

impl<'a, T> AvailabilityMerge<'a> for T
where
    T: Iterator<Item = Interval<'a>>,
{
    /// Combines touching Intervals that have the same members available
    ///
    /// # Examples
    /// ```
    /// use hangout_libs::interval::{AvailabilityMerge, Interval};
    /// use hangout_libs::time::TimeRange;
    ///
    /// let both: std::collections::BTreeSet<&str> = ["a", "b"].into_iter().collect();
    /// let only_b: std::collections::BTreeSet<&str> = ["b"].into_iter().collect();
    ///
    /// let pieces = vec![
    ///     Interval { range: TimeRange::new(0, 10), available: both.clone() },
    ///     Interval { range: TimeRange::new(10, 20), available: both.clone() },
    ///     Interval { range: TimeRange::new(20, 30), available: only_b.clone() },
    /// ];
    ///
    /// assert_eq!(
    ///     pieces.into_iter().availability_merge(),
    ///     vec![
    ///         Interval { range: TimeRange::new(0, 20), available: both },
    ///         Interval { range: TimeRange::new(20, 30), available: only_b },
    ///     ]
    /// );
    /// ```
    fn availability_merge(self) -> Vec<Interval<'a>> {
        let size_hint = self.size_hint().1.unwrap_or(0);
        let (last, mut acc) = self.fold(
            (None, Vec::with_capacity(size_hint)),
            |(last, mut acc): (Option<Interval<'a>>, Vec<Interval<'a>>), curr| match last {
                None => (Some(curr), acc),
                Some(open) => {
                    if open.range.end() == curr.range.start() && open.available == curr.available {
                        (
                            Some(Interval {
                                range: TimeRange::new(open.range.start(), curr.range.end()),
                                available: open.available,
                            }),
                            acc,
                        )
                    } else {
                        acc.push(open);
                        (Some(curr), acc)
                    }
                }
            },
        );

        if let Some(open) = last {
            acc.push(open);
        }

        acc
    }
}

/// Runs breakpoints, evaluation and merging for one day of the week.
pub fn common_free_intervals<'a>(
    members: &[&'a Member],
    day: DayOfWeek,
    window: TimeRange<u16>,
) -> Vec<Interval<'a>> {
    let points = breakpoints(members, day, window);
    let merged = evaluate(members, day, &points)
        .into_iter()
        .availability_merge();

    for interval in &merged {
        trace!(
            "{} {}..{} free: {:?}",
            day,
            interval.range.start(),
            interval.range.end(),
            interval.available
        );
    }

    merged
}
