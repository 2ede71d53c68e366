#![no_main]
use deploynotify_core::composer::{channel_name, compose_message, compose_reply, reply_body};
use deploynotify_core::{parse_deployment, Commit};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // First line = url, rest = commit message
        let (url, message) = s.split_once('\n').unwrap_or(("", s));
        let commit = Commit {
            url: url.to_string(),
            message: message.to_string(),
            ..Default::default()
        };

        if let Some(details) = parse_deployment(&commit.message) {
            let channel = channel_name("deploys", &details);
            assert!(channel.starts_with("deploys-"));
            let _ = compose_message(&commit, &details);
        }
        if let Some(body) = reply_body(&commit.message) {
            assert_eq!(body, body.trim());
            let _ = compose_reply(body);
        }
    }
});
