//! Slack message composition

use crate::types::{Commit, CommitMessageDetails};

/// Destination channel: `<prefix>-<domain>-<environment>`
#[inline]
pub fn channel_name(prefix: &str, details: &CommitMessageDetails) -> String {
    format!("{}-{}-{}", prefix, details.domain, details.environment)
}

/// Primary notification text.
///
/// Links the environment to the commit when a URL is known and credits the
/// author when a username is known.
pub fn compose_message(commit: &Commit, details: &CommitMessageDetails) -> String {
    let mut message = format!(
        ":rocket: Deployed {} `{}` version `{}` to ",
        details.domain, details.service, details.version
    );

    if commit.url.is_empty() {
        message.push_str(details.environment.as_str());
    } else {
        message.push_str(&format!("<{}|{}>", commit.url, details.environment));
    }

    if !commit.author_username.is_empty() {
        message.push_str(&format!(" by _{}_", commit.author_username));
    }

    message
}

/// Everything after the first line, trimmed. `None` when there is no body.
pub fn reply_body(message: &str) -> Option<&str> {
    let pos = memchr::memchr(b'\n', message.as_bytes())?;
    let body = message[pos + 1..].trim();
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

/// Wrap a commit body in a code block for the threaded reply
#[inline]
pub fn compose_reply(body: &str) -> String {
    format!("```{}```", body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeploymentKind, Environment};

    fn details(domain: &str, environment: Environment) -> CommitMessageDetails {
        CommitMessageDetails {
            domain: domain.to_string(),
            service: "api-billing".to_string(),
            version: "v1.37.1".to_string(),
            environment,
            kind: DeploymentKind::Version,
        }
    }

    #[test]
    fn test_channel_name() {
        assert_eq!(
            channel_name("deploys", &details("mas-billing", Environment::Prod)),
            "deploys-mas-billing-prod"
        );
        assert_eq!(
            channel_name("alerts", &details("mas-billing", Environment::Dev)),
            "alerts-mas-billing-dev"
        );
    }

    #[test]
    fn test_compose_message_full() {
        let commit = Commit {
            url: "https://github.com/org/repo/commit/abc123".to_string(),
            author_username: "octocat".to_string(),
            ..Default::default()
        };
        assert_eq!(
            compose_message(&commit, &details("mas-billing", Environment::Sta)),
            ":rocket: Deployed mas-billing `api-billing` version `v1.37.1` to \
             <https://github.com/org/repo/commit/abc123|sta> by _octocat_"
        );
    }

    #[test]
    fn test_compose_message_without_url_or_author() {
        let commit = Commit::default();
        assert_eq!(
            compose_message(&commit, &details("mas-billing", Environment::Prod)),
            ":rocket: Deployed mas-billing `api-billing` version `v1.37.1` to prod"
        );
    }

    #[test]
    fn test_reply_body() {
        assert_eq!(reply_body("title"), None);
        assert_eq!(reply_body("title\n"), None);
        assert_eq!(reply_body("title\n\n   \n"), None);
        assert_eq!(reply_body("title\n\nline one\nline two\n\n"), Some("line one\nline two"));
        assert_eq!(reply_body("title\r\n\r\n  body\r\n"), Some("body"));
    }

    #[test]
    fn test_compose_reply() {
        assert_eq!(compose_reply("a\nb"), "```a\nb```");
    }
}
