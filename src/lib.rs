pub mod interval;
pub mod member;
pub mod recommend;
pub mod schedule;
pub mod slot;
pub mod time;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use member::{DayAvailability, DayOfWeek, Member, WeeklySchedule};
pub use recommend::{recommend, Recommendation};
pub use schedule::{
    find_optimal_times, FinderConfig, FinderError, OptimalTimeFinder, Query, ValidationError,
};
pub use slot::{ScoringWeights, Slot};
pub use time::{TimeOfDay, TimeRange};
