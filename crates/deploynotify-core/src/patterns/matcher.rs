//! Deployment commit detection

use crate::patterns::formats::FORMATS;
use crate::types::{Commit, CommitMessageDetails};

/// First line of a commit message, without a trailing `\r`
#[inline]
pub fn commit_title(message: &str) -> &str {
    let line = match memchr::memchr(b'\n', message.as_bytes()) {
        Some(pos) => &message[..pos],
        None => message,
    };
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse the title of a commit message as a deployment announcement.
///
/// Only the first line is examined. `None` means "not a deployment commit",
/// which callers treat as a normal skip rather than an error.
pub fn parse_deployment(message: &str) -> Option<CommitMessageDetails> {
    let title = commit_title(message);
    if title.is_empty() {
        return None;
    }

    FORMATS.iter().find_map(|format| {
        let caps = format.regex.captures(title)?;
        let details = (format.extract)(&caps)?;
        tracing::debug!(
            format = format.name,
            matched = %caps.get(0).map_or("", |m| m.as_str()),
            ?details,
            "matched deployment commit"
        );
        Some(details)
    })
}

/// Check whether a commit announces a deployment
#[inline]
pub fn is_deployment_commit(commit: &Commit) -> Option<CommitMessageDetails> {
    parse_deployment(&commit.message)
}
