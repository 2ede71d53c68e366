//! Transport that logs messages instead of posting them

use crate::error::Result;
use crate::traits::ChatTransport;
use crate::types::MessageId;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};

/// Logs every message at `info` and hands out synthetic ids
#[derive(Debug, Default)]
pub struct DryRunTransport {
    sent: AtomicU32,
}

impl DryRunTransport {
    /// Create a new dry-run transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages "sent" so far
    pub fn sent(&self) -> u32 {
        self.sent.load(Ordering::Relaxed)
    }

    fn next_id(&self) -> MessageId {
        let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        MessageId(format!("dry-run.{:06}", n))
    }
}

impl ChatTransport for DryRunTransport {
    fn post<'a>(
        &'a self,
        channel: &'a str,
        text: &'a str,
    ) -> impl Future<Output = Result<MessageId>> + Send + 'a {
        async move {
            let id = self.next_id();
            tracing::info!(channel, ts = %id, text, "dry run: would post message");
            Ok(id)
        }
    }

    fn reply<'a>(
        &'a self,
        channel: &'a str,
        thread: &'a MessageId,
        text: &'a str,
    ) -> impl Future<Output = Result<MessageId>> + Send + 'a {
        async move {
            let id = self.next_id();
            tracing::info!(channel, thread_ts = %thread, ts = %id, text, "dry run: would post reply");
            Ok(id)
        }
    }
}
