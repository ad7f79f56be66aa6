#![no_main]
use chrono::NaiveDate;
use hangout_libs::{
    interval::common_free_intervals, Member, OptimalTimeFinder, Query, TimeOfDay, TimeRange,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<Member>, u8, TimeOfDay, TimeOfDay, u8)| {
    #[cfg(feature = "log")]
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply();

    let (members, duration_hours, preferred_start, preferred_end, days_ahead) = data;
    let duration_hours = u32::from(duration_hours % 12);
    let days_ahead = u32::from(days_ahead % 15);

    let query = Query::new(
        members.iter().map(|m| m.id.clone()).collect(),
        duration_hours,
        preferred_start,
        preferred_end,
        days_ahead,
    );
    let today = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
    let finder = OptimalTimeFinder::new(&members);

    let slots = match finder.find(&query, today) {
        Ok(slots) => slots,
        Err(_) => return,
    };

    assert!(slots.len() <= finder.config().max_results);
    assert_eq!(
        Ok(slots.clone()),
        finder.find(&query, today),
        "Searching twice should give the same result"
    );

    for (better, worse) in slots.iter().zip(slots.iter().skip(1)) {
        assert!(better.score >= worse.score, "Slots out of order");
    }

    for slot in &slots {
        let range = TimeRange::new(slot.start_time.minutes(), slot.end_time.minutes());

        assert_eq!(u32::from(slot.duration_minutes()), duration_hours * 60);
        assert!(preferred_start <= slot.start_time && slot.end_time <= preferred_end);

        for id in &slot.available_member_ids {
            let member = members.iter().find(|m| &m.id == id).unwrap();
            assert!(
                member.is_free(slot.day_of_week, &range),
                "Member {} is busy during {:?}",
                id,
                slot
            );
        }
    }

    if preferred_start < preferred_end {
        let selected = members.iter().collect::<Vec<_>>();
        for day in hangout_libs::DayOfWeek::ALL {
            let merged = common_free_intervals(&selected, day, (preferred_start, preferred_end).into());
            for (left, right) in merged.iter().zip(merged.iter().skip(1)) {
                assert_eq!(left.range.end(), right.range.start(), "Gap between intervals");
                assert_ne!(left.available, right.available, "Unmerged neighbours");
            }
        }
    }
});
