#![no_main]

use libfuzzer_sys::fuzz_target;
use tempora_core::{DateTime, DEFAULT_FORMAT};

fuzz_target!(|data: &[u8]| {
    if data.len() > 4 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // First line is the input, second (if any) the format string.
    let mut lines = text.splitn(2, '\n');
    let input = lines.next().unwrap_or("");
    let fmt = lines.next().unwrap_or(DEFAULT_FORMAT);

    // Must never panic, and a successful parse must survive a
    // format/reparse round trip at the same precision.
    if let Ok(dt) = DateTime::parse_with_format(input, fmt) {
        let rendered = dt.format_with_millis(DEFAULT_FORMAT);
        let reparsed = DateTime::parse(&rendered).expect("rendered datetime must reparse");
        assert_eq!(reparsed, dt);
    }
    let _ = DateTime::parse(input);
});
