//! Core type definitions

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt;

/// Default Slack Web API base URL
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// Default channel prefix, producing `deploys-<domain>-<environment>`
pub const DEFAULT_CHANNEL_PREFIX: &str = "deploys";

/// Raw commit metadata handed over by the CI job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    /// Link to the commit
    pub url: String,
    /// Author login
    pub author_username: String,
    /// Author email
    pub author_email: String,
    /// Full commit message, possibly multi-line
    pub message: String,
}

/// Deployment target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Environment {
    /// Production
    Prod,
    /// Staging
    Sta,
    /// Development
    Dev,
}

impl Environment {
    /// Parse the exact token used in commit titles
    #[inline]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "prod" => Some(Self::Prod),
            "sta" => Some(Self::Sta),
            "dev" => Some(Self::Dev),
            _ => None,
        }
    }

    /// Get string representation
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::Sta => "sta",
            Self::Dev => "dev",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a deployment commit announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DeploymentKind {
    /// A single service rolled to a new version
    Version,
    /// Configuration-only change
    Config,
    /// Several services at once
    Multiple,
}

impl DeploymentKind {
    /// Get string representation
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Config => "config",
            Self::Multiple => "multiple",
        }
    }
}

/// Fields extracted from a deployment commit title.
///
/// Only the parser builds these, so `domain`, `service` and `version` are
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessageDetails {
    /// Product area, e.g. `mas-billing`
    pub domain: String,
    /// Service name, e.g. `api-billing`
    pub service: String,
    /// Version tag such as `v1.37.1`, or a placeholder for non-version kinds
    pub version: String,
    /// Deployment target
    pub environment: Environment,
    /// Kind of deployment
    pub kind: DeploymentKind,
}

/// Slack message timestamp, used as the thread anchor for replies
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

impl MessageId {
    /// Borrow the raw `ts` value
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the `seconds.micros` timestamp Slack uses as a message id
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        let (secs, micros) = self.0.split_once('.').unwrap_or((self.0.as_str(), "0"));
        let secs: i64 = secs.parse().ok()?;
        let micros: u32 = micros.parse().ok()?;
        DateTime::from_timestamp(secs, micros.checked_mul(1_000)?)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runtime configuration, built once at startup
#[derive(Clone)]
pub struct NotifyConfig<'a> {
    /// Slack bot token
    pub slack_token: Option<Cow<'a, str>>,
    /// Slack Web API base URL
    pub slack_api_url: Cow<'a, str>,
    /// Channel name prefix
    pub channel_prefix: Cow<'a, str>,
    /// When set, only these domains are announced
    pub only_domains: Option<Vec<Cow<'a, str>>>,
    /// Log instead of posting
    pub dry_run: bool,
}

impl<'a> NotifyConfig<'a> {
    /// Whether a parsed domain passes the configured allow-list
    #[inline]
    pub fn allows_domain(&self, domain: &str) -> bool {
        match &self.only_domains {
            Some(domains) => domains.iter().any(|d| d == domain),
            None => true,
        }
    }
}

impl<'a> Default for NotifyConfig<'a> {
    fn default() -> Self {
        Self {
            slack_token: None,
            slack_api_url: Cow::Borrowed(DEFAULT_SLACK_API_URL),
            channel_prefix: Cow::Borrowed(DEFAULT_CHANNEL_PREFIX),
            only_domains: None,
            dry_run: false,
        }
    }
}

impl fmt::Debug for NotifyConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("slack_token", &self.slack_token.as_ref().map(|_| "<redacted>"))
            .field("slack_api_url", &self.slack_api_url)
            .field("channel_prefix", &self.channel_prefix)
            .field("only_domains", &self.only_domains)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

/// Why a commit produced no notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// First line does not announce a deployment
    NotDeployment,
    /// Domain is not in the configured allow-list
    DomainFiltered(String),
}

/// Result of the threaded follow-up
#[derive(Debug)]
pub enum ReplyStatus {
    /// Commit message has no body
    NotNeeded,
    /// Reply posted
    Sent(MessageId),
    /// Reply failed; the primary message stands
    Failed(crate::Error),
}

/// Result of one notifier run
#[derive(Debug)]
pub enum NotifyOutcome {
    /// Nothing was sent
    Skipped(SkipReason),
    /// Primary message posted
    Posted {
        /// Destination channel
        channel: String,
        /// Primary message id
        id: MessageId,
        /// Threaded reply outcome
        reply: ReplyStatus,
    },
    /// Primary post failed, no reply attempted
    Failed {
        /// Destination channel
        channel: String,
        /// Transport error
        error: crate::Error,
    },
}

impl NotifyOutcome {
    /// True when the primary message reached Slack
    #[inline]
    pub fn is_posted(&self) -> bool {
        matches!(self, NotifyOutcome::Posted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_token() {
        assert_eq!(Environment::from_token("prod"), Some(Environment::Prod));
        assert_eq!(Environment::from_token("sta"), Some(Environment::Sta));
        assert_eq!(Environment::from_token("dev"), Some(Environment::Dev));
        assert_eq!(Environment::from_token("PROD"), None);
        assert_eq!(Environment::from_token("staging"), None);
        assert_eq!(Environment::from_token(""), None);
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Sta.to_string(), "sta");
        assert_eq!(DeploymentKind::Config.as_str(), "config");
    }

    #[test]
    fn test_message_id_sent_at() {
        let id = MessageId("1234567890.123456".to_string());
        let at = id.sent_at().unwrap();
        assert_eq!(at.timestamp(), 1_234_567_890);
        assert_eq!(at.timestamp_subsec_micros(), 123_456);

        assert!(MessageId("dry-run".to_string()).sent_at().is_none());
        assert_eq!(MessageId("42".to_string()).sent_at().unwrap().timestamp(), 42);
    }

    #[test]
    fn test_notify_config_default() {
        let config = NotifyConfig::default();
        assert_eq!(config.slack_api_url, DEFAULT_SLACK_API_URL);
        assert_eq!(config.channel_prefix, "deploys");
        assert!(config.only_domains.is_none());
        assert!(!config.dry_run);
        assert!(config.allows_domain("anything"));
    }

    #[test]
    fn test_notify_config_domain_filter() {
        let config = NotifyConfig {
            only_domains: Some(vec![Cow::Borrowed("mas-billing")]),
            ..Default::default()
        };
        assert!(config.allows_domain("mas-billing"));
        assert!(!config.allows_domain("mas-payments"));
    }

    #[test]
    fn test_notify_config_debug_redacts_token() {
        let config = NotifyConfig {
            slack_token: Some(Cow::Borrowed("xoxb-secret")),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("xoxb-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
