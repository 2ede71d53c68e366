#![no_main]
use deploynotify_core::parse_deployment;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = std::str::from_utf8(data) {
        if let Some(details) = parse_deployment(message) {
            assert!(!details.domain.is_empty());
            assert!(!details.service.is_empty());
            assert!(!details.version.is_empty());
        }
    }
});
