//! Deployment commit title patterns

pub mod formats;
pub mod matcher;

pub use formats::{DeploymentFormat, FORMATS};
pub use matcher::{commit_title, is_deployment_commit, parse_deployment};
