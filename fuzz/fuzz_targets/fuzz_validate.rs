#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Ok(doc) = lotabot_config::parse(&s) {
        let first = lotabot_config::validate(&doc);
        assert_eq!(first.is_valid(), first.errors().is_empty());
        assert_eq!(first, lotabot_config::validate(&doc));
    }
});
