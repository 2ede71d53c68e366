//! Chat transport capability

use crate::error::Result;
use crate::types::MessageId;
use std::future::Future;

/// Minimal chat posting capability.
///
/// The notifier only ever needs these two calls, which keeps parsing and
/// composition testable without a network.
pub trait ChatTransport {
    /// Post a top-level message, returning its id
    fn post<'a>(
        &'a self,
        channel: &'a str,
        text: &'a str,
    ) -> impl Future<Output = Result<MessageId>> + Send + 'a;

    /// Post a reply in the thread anchored at `thread`
    fn reply<'a>(
        &'a self,
        channel: &'a str,
        thread: &'a MessageId,
        text: &'a str,
    ) -> impl Future<Output = Result<MessageId>> + Send + 'a;
}
