#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod logging;

use clap::Parser;
use deploynotify_core::types::{DEFAULT_CHANNEL_PREFIX, DEFAULT_SLACK_API_URL};
use deploynotify_core::{Commit, NotifyConfig, NotifyOutcome, ReplyStatus};
use std::borrow::Cow;

/// Announce deployment commits in Slack
#[derive(Parser)]
#[command(name = "deploynotify", version, about = "Post deployment commits to Slack")]
struct Cli {
    /// Slack bot token
    #[arg(long, env = "SLACK_ACCESS_TOKEN", hide_env_values = true)]
    slack_token: Option<String>,

    /// Link to the commit being deployed
    #[arg(long, env = "COMMIT_URL")]
    commit_url: Option<String>,

    /// Commit author login
    #[arg(long, env = "COMMIT_AUTHOR_USERNAME")]
    commit_author_username: Option<String>,

    /// Commit author email
    #[arg(long, env = "COMMIT_AUTHOR_EMAIL")]
    commit_author_email: Option<String>,

    /// Full commit message
    #[arg(long, env = "COMMIT_MESSAGE")]
    commit_message: Option<String>,

    /// Slack Web API base URL
    #[arg(long, env = "SLACK_API_URL")]
    slack_api_url: Option<String>,

    /// Channel prefix; messages go to <prefix>-<domain>-<environment>
    #[arg(long, env = "DEPLOYNOTIFY_CHANNEL_PREFIX")]
    channel_prefix: Option<String>,

    /// Only announce these domains (comma-separated)
    #[arg(long, env = "DEPLOYNOTIFY_ONLY_DOMAINS", value_delimiter = ',')]
    only_domains: Option<Vec<String>>,

    /// Log messages instead of posting them
    #[arg(
        long,
        env = "DEPLOYNOTIFY_DRY_RUN",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    dry_run: bool,

    /// Log format: text or json
    #[arg(long, env = "DEPLOYNOTIFY_LOG_FORMAT", default_value = "text")]
    log_format: String,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version land here too. Everything goes to stdout and
            // the exit status stays 0 either way.
            println!("{}", parse_error_text(&e));
            return;
        }
    };

    logging::init(logging::LogFormat::detect(&cli.log_format));
    tracing::info!("Running deploynotify");

    run(cli);
}

/// Plain-text rendering of a clap error or help page, for stdout
fn parse_error_text(e: &clap::Error) -> String {
    e.render().to_string()
}

/// Filter empty strings from Vec (env vars may produce [""] for empty values)
fn clean_vec(v: &Option<Vec<String>>) -> Option<Vec<&str>> {
    v.as_ref().and_then(|v| {
        let cleaned: Vec<&str> = v
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    })
}

/// Filter empty string from Option (env vars may produce "" for empty values)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn build_config(cli: &Cli) -> NotifyConfig<'_> {
    NotifyConfig {
        slack_token: clean_opt(&cli.slack_token).map(Cow::Borrowed),
        slack_api_url: Cow::Borrowed(clean_opt(&cli.slack_api_url).unwrap_or(DEFAULT_SLACK_API_URL)),
        channel_prefix: Cow::Borrowed(
            clean_opt(&cli.channel_prefix).unwrap_or(DEFAULT_CHANNEL_PREFIX),
        ),
        only_domains: clean_vec(&cli.only_domains)
            .map(|v| v.into_iter().map(Cow::Borrowed).collect()),
        dry_run: cli.dry_run,
    }
}

fn build_commit(cli: &Cli) -> Commit {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    Commit {
        url: field(&cli.commit_url),
        author_username: field(&cli.commit_author_username),
        author_email: field(&cli.commit_author_email),
        message: field(&cli.commit_message),
    }
}

fn run(cli: Cli) {
    let config = build_config(&cli);
    let commit = build_commit(&cli);
    tracing::debug!(?config, url = %commit.url, author = %commit.author_username, "configuration loaded");

    if config.slack_token.is_none() && !config.dry_run {
        tracing::warn!("SLACK_ACCESS_TOKEN is not set, posting will fail");
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "failed to create runtime");
            return;
        }
    };

    let outcome = rt.block_on(deploynotify_core::notify(&config, &commit));
    report(&outcome);
}

fn report(outcome: &NotifyOutcome) {
    match outcome {
        NotifyOutcome::Skipped(reason) => {
            tracing::info!(?reason, "nothing to announce");
        }
        NotifyOutcome::Posted { channel, id, reply } => {
            let reply = match reply {
                ReplyStatus::NotNeeded => "none",
                ReplyStatus::Sent(_) => "sent",
                ReplyStatus::Failed(_) => "failed",
            };
            tracing::info!(channel = %channel, ts = %id, reply, "deployment announced");
        }
        NotifyOutcome::Failed { channel, error } => {
            tracing::warn!(channel = %channel, kind = ?error.kind(), "deployment not announced");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["deploynotify"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_clean_helpers() {
        assert_eq!(clean_opt(&Some(String::new())), None);
        assert_eq!(clean_opt(&Some("x".to_string())), Some("x"));
        assert_eq!(clean_vec(&Some(vec![String::new()])), None);
        assert_eq!(
            clean_vec(&Some(vec!["a".to_string(), " b ".to_string(), String::new()])),
            Some(vec!["a", "b"])
        );
    }

    #[test]
    fn test_build_config_from_flags() {
        let cli = parse(&[
            "--slack-token",
            "xoxb-test",
            "--channel-prefix",
            "releases",
            "--only-domains",
            "mas-billing,mas-payments",
            "--dry-run",
        ]);
        let config = build_config(&cli);
        assert_eq!(config.slack_token.as_deref(), Some("xoxb-test"));
        assert_eq!(config.channel_prefix, "releases");
        assert_eq!(config.slack_api_url, DEFAULT_SLACK_API_URL);
        assert_eq!(config.only_domains.as_ref().map(|d| d.len()), Some(2));
        assert!(config.dry_run);
    }

    #[test]
    fn test_build_config_empty_values_fall_back() {
        let cli = parse(&["--channel-prefix", "", "--slack-api-url", "", "--only-domains", ""]);
        let config = build_config(&cli);
        assert_eq!(config.channel_prefix, DEFAULT_CHANNEL_PREFIX);
        assert_eq!(config.slack_api_url, DEFAULT_SLACK_API_URL);
        assert!(config.only_domains.is_none());
    }

    #[test]
    fn test_dry_run_env_values() {
        // Single test so the env var is not raced by parallel cases.
        let cases = [
            ("", false),
            ("false", false),
            ("0", false),
            ("no", false),
            ("1", true),
            ("true", true),
            ("yes", true),
        ];
        for (value, expected) in cases {
            std::env::set_var("DEPLOYNOTIFY_DRY_RUN", value);
            let cli = Cli::try_parse_from(["deploynotify"]);
            assert!(cli.is_ok(), "DEPLOYNOTIFY_DRY_RUN={:?} rejected", value);
            assert_eq!(cli.unwrap().dry_run, expected, "DEPLOYNOTIFY_DRY_RUN={:?}", value);
        }
        std::env::remove_var("DEPLOYNOTIFY_DRY_RUN");
    }

    #[test]
    fn test_parse_errors_render_as_text() {
        let err = Cli::try_parse_from(["deploynotify", "--no-such-flag"])
            .err()
            .expect("unknown flag rejected");
        assert!(parse_error_text(&err).contains("--no-such-flag"));

        let help = Cli::try_parse_from(["deploynotify", "--help"])
            .err()
            .expect("help short-circuits parsing");
        assert!(parse_error_text(&help).contains("DEPLOYNOTIFY_DRY_RUN"));
    }

    #[test]
    fn test_build_commit() {
        let cli = parse(&[
            "--commit-url",
            "https://github.com/org/repo/commit/abc",
            "--commit-message",
            "Deployed a b version v1.0.0 to dev",
        ]);
        let commit = build_commit(&cli);
        assert_eq!(commit.url, "https://github.com/org/repo/commit/abc");
        assert_eq!(commit.message, "Deployed a b version v1.0.0 to dev");
        assert_eq!(commit.author_email, "");
    }
}
