#![no_main]

use libfuzzer_sys::fuzz_target;
use tempora_core::{DateTime, TimeSpan};

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let millis = i64::from_le_bytes(data[..8].try_into().unwrap());

    // Decomposition must recompose exactly and negation must flip every
    // component, for the full i64 range.
    let c = TimeSpan::to_components(millis);
    assert_eq!(c.total_milliseconds(), millis);
    if millis != 0 && millis != i64::MIN {
        let n = TimeSpan::to_components(-millis);
        assert_eq!(n.days, -c.days);
        assert_eq!(n.hours, -c.hours);
        assert_eq!(n.minutes, -c.minutes);
        assert_eq!(n.seconds, -c.seconds);
        assert_eq!(n.milliseconds, -c.milliseconds);
    }
    let _ = TimeSpan::from_milliseconds(millis).to_string();

    // Timestamp decomposition must not panic anywhere in the i64 range.
    let dt = DateTime::from_timestamp_millis(millis);
    let _ = dt.to_components();
});
