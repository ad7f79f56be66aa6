#![no_main]
use hangout_libs::time::{TimeOfDay, MINUTES_PER_DAY};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (TimeOfDay, String)| {
    let (time, text) = data;

    assert!(time.minutes() < MINUTES_PER_DAY);
    assert_eq!(
        time.to_string().parse::<TimeOfDay>(),
        Ok(time),
        "Formatting then parsing should give back the same time"
    );

    if let Ok(parsed) = text.parse::<TimeOfDay>() {
        assert_eq!(
            parsed.to_string(),
            text,
            "Only zero padded HH:MM strings should parse"
        );
    }
});
