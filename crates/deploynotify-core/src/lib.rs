//! # deploynotify core
//!
//! Turns deployment commits into Slack notifications.
//!
//! A commit whose first line reads like
//! `Deployed mas-billing api-billing version v1.37.1 to sta` is announced in
//! `#deploys-mas-billing-sta`; the rest of the commit message goes into a
//! threaded reply. Anything else is skipped silently.
//!
//! ## Example
//!
//! ```no_run
//! use deploynotify_core::{notify, Commit, NotifyConfig};
//! use std::borrow::Cow;
//!
//! # async fn example() {
//! let config = NotifyConfig {
//!     slack_token: Some(Cow::Borrowed("xoxb-...")),
//!     ..Default::default()
//! };
//! let commit = Commit {
//!     message: "Deployed mas-billing api-billing version v1.37.1 to sta".to_string(),
//!     ..Default::default()
//! };
//!
//! let outcome = notify(&config, &commit).await;
//! println!("posted: {}", outcome.is_posted());
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod composer;
pub mod error;
pub mod notifier;
pub mod patterns;
pub mod slack;
pub mod traits;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use notifier::Notifier;
pub use patterns::{is_deployment_commit, parse_deployment};
pub use slack::{DryRunTransport, SlackClient};
pub use traits::ChatTransport;
pub use types::{
    Commit, CommitMessageDetails, DeploymentKind, Environment, MessageId, NotifyConfig,
    NotifyOutcome, ReplyStatus, SkipReason,
};

/// Notify Slack about `commit` using the transport selected by `config`.
///
/// With `dry_run` set, messages are logged instead of posted.
pub async fn notify(config: &NotifyConfig<'_>, commit: &Commit) -> NotifyOutcome {
    if config.dry_run {
        let transport = DryRunTransport::new();
        Notifier::new(&transport, config).notify(commit).await
    } else {
        let transport = SlackClient::from_config(config);
        Notifier::new(&transport, config).notify(commit).await
    }
}

/// Synchronous variant of [`notify`]
///
/// Builds a current-thread Tokio runtime and blocks on the async version.
pub fn notify_sync(config: &NotifyConfig<'_>, commit: &Commit) -> Result<NotifyOutcome> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Runtime(e.to_string()))?;
    Ok(rt.block_on(notify(config, commit)))
}
