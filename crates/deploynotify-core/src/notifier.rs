//! Deployment notification pipeline

use crate::composer::{channel_name, compose_message, compose_reply, reply_body};
use crate::patterns::parse_deployment;
use crate::traits::ChatTransport;
use crate::types::{Commit, NotifyConfig, NotifyOutcome, ReplyStatus, SkipReason};

/// Parses a commit and posts the notification through a transport
pub struct Notifier<'a, T> {
    transport: &'a T,
    config: &'a NotifyConfig<'a>,
}

impl<'a, T: ChatTransport> Notifier<'a, T> {
    /// Create a new notifier
    pub fn new(transport: &'a T, config: &'a NotifyConfig<'a>) -> Self {
        Self { transport, config }
    }

    /// Run the pipeline once for `commit`.
    ///
    /// Never fails: a transport error ends up in the outcome and the reply is
    /// only attempted after the primary message went through.
    pub async fn notify(&self, commit: &Commit) -> NotifyOutcome {
        // Step 1: Parse the commit title
        let Some(details) = parse_deployment(&commit.message) else {
            tracing::info!(title = %crate::patterns::commit_title(&commit.message), "commit is not a deployment commit");
            return NotifyOutcome::Skipped(SkipReason::NotDeployment);
        };

        // Step 2: Domain allow-list
        if !self.config.allows_domain(&details.domain) {
            tracing::info!(domain = %details.domain, "domain not in allow-list, skipping");
            return NotifyOutcome::Skipped(SkipReason::DomainFiltered(details.domain));
        }

        // Step 3: Primary message
        let channel = channel_name(&self.config.channel_prefix, &details);
        let message = compose_message(commit, &details);
        let id = match self.transport.post(&channel, &message).await {
            Ok(id) => id,
            Err(error) => {
                tracing::error!(channel = %channel, %error, "failed to post message to Slack");
                return NotifyOutcome::Failed { channel, error };
            }
        };

        // Step 4: Threaded reply with the rest of the commit message
        let reply = match reply_body(&commit.message) {
            None => ReplyStatus::NotNeeded,
            Some(body) => {
                let text = compose_reply(body);
                match self.transport.reply(&channel, &id, &text).await {
                    Ok(reply_id) => ReplyStatus::Sent(reply_id),
                    Err(error) => {
                        tracing::error!(channel = %channel, thread_ts = %id, %error, "failed to post reply to Slack");
                        ReplyStatus::Failed(error)
                    }
                }
            }
        };

        NotifyOutcome::Posted { channel, id, reply }
    }
}
