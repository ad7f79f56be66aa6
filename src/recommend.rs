use crate::slot::Slot;
use crate::time::TimeOfDay;
use core::fmt;
use serde::{Deserialize, Serialize};

const MOSTLY_AVAILABLE_PERCENTAGE: f64 = 80.0;
const EVENING: TimeOfDay = TimeOfDay::hm(18, 0);

/// Hints shown next to a ranked slot list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Recommendation {
    WidenSearch,
    EveryoneAvailable,
    MostAvailable,
    ConsiderAlternatives,
    WeekendsFavoured,
    EveningsPopular,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Recommendation::WidenSearch => "Try a wider time window or fewer friends",
            Recommendation::EveryoneAvailable => "Found a time when everyone is free!",
            Recommendation::MostAvailable => "Great option: most of the group is free",
            Recommendation::ConsiderAlternatives => "Consider another time or a different group",
            Recommendation::WeekendsFavoured => "Weekends have the best availability",
            Recommendation::EveningsPopular => "Evenings are popular with the group",
        })
    }
}

/// Summarises `slots`, which must already be ranked best first.
///
/// # Examples
/// ```
/// use hangout_libs::recommend::{recommend, Recommendation};
///
/// assert_eq!(recommend(&[]), vec![Recommendation::WidenSearch]);
/// ```
pub fn recommend(slots: &[Slot]) -> Vec<Recommendation> {
    let top = match slots.first() {
        Some(top) => top,
        None => return vec![Recommendation::WidenSearch],
    };

    let mut recommendations = vec![if top.is_full_attendance() {
        Recommendation::EveryoneAvailable
    } else if top.availability_percentage >= MOSTLY_AVAILABLE_PERCENTAGE {
        Recommendation::MostAvailable
    } else {
        Recommendation::ConsiderAlternatives
    }];

    if slots.iter().any(|slot| slot.is_weekend) {
        recommendations.push(Recommendation::WeekendsFavoured);
    }

    if slots.iter().any(|slot| slot.start_time >= EVENING) {
        recommendations.push(Recommendation::EveningsPopular);
    }

    recommendations
}
