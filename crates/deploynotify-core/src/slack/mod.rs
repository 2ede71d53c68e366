//! Slack transports

pub mod client;
pub mod dry_run;

pub use client::SlackClient;
pub use dry_run::DryRunTransport;
