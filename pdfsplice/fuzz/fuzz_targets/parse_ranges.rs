#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfsplice::range::RangeSet;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(ranges) = RangeSet::parse(text, 1000) else {
        return;
    };

    // Accepted input is never empty, stays in bounds and reparses to itself.
    assert!(!ranges.is_empty());
    for range in &ranges {
        assert!(range.start() >= 1);
        assert!(range.start() <= range.end());
        assert!(range.end() <= 1000);
    }
    let reparsed = RangeSet::parse(&ranges.to_string(), 1000).unwrap();
    assert_eq!(reparsed, ranges);
});
