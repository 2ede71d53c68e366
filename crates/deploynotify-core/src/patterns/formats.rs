//! Recognised deployment commit title formats, in priority order

use crate::types::{CommitMessageDetails, DeploymentKind, Environment};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// `<domain>` and `<service>` are non-whitespace runs starting with a word
// character. Titles are anchored at the start. The two version formats accept
// trailing text after the environment (GitHub appends ` (#123)` to squash
// merges); the others must end after the environment. The `Deploy` formats
// are case-insensitive, the `Deployed` format is not.

static DEPLOYED_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Deployed\s+(\w\S*)\s+(\w\S*)\s+version\s+(v\d+\.\d+\.\d+)\s+to\s+(prod|sta|dev)(?:\s.*)?$")
        .expect("Invalid regex pattern")
});

static DEPLOY_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^Deploy\s+(\w\S*)\s+(\w\S*)\s+version\s+(v?\d+\.\d+\.\d+\S*)\s+to\s+(prod|sta|dev)(?:\s.*)?$",
    )
    .expect("Invalid regex pattern")
});

static DEPLOY_CONFIG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Deploy\s+(\w\S*)\s+(\w\S*)\s+config\s+changes\s+to\s+(prod|sta|dev)\s*$")
        .expect("Invalid regex pattern")
});

static DEPLOY_SERVICES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Deploy\s+(\w\S*)\s+services\s+to\s+(prod|sta|dev)\s*$")
        .expect("Invalid regex pattern")
});

static DEPLOY_SERVICES_MULTI_ENV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^Deploy\s+(\w\S*)\s+services\s+to\s+((?:prod|sta|dev)(?:\s+and\s+(?:prod|sta|dev))+)\s*$",
    )
    .expect("Invalid regex pattern")
});

static DEPLOY_CONFIG_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Deploy\s+config\s+changes\s+to\s+(prod|sta|dev)\s*$")
        .expect("Invalid regex pattern")
});

/// A named title format with its extraction rule
pub struct DeploymentFormat {
    /// Format name, used in logs
    pub name: &'static str,
    /// Compiled title pattern
    pub regex: &'static LazyLock<Regex>,
    /// Build details from a successful match
    pub extract: fn(&Captures<'_>) -> Option<CommitMessageDetails>,
}

/// All formats, tried first to last
pub static FORMATS: [DeploymentFormat; 6] = [
    DeploymentFormat {
        name: "deployed_version",
        regex: &DEPLOYED_VERSION,
        extract: extract_version,
    },
    DeploymentFormat {
        name: "deploy_version",
        regex: &DEPLOY_VERSION,
        extract: extract_version,
    },
    DeploymentFormat {
        name: "deploy_config",
        regex: &DEPLOY_CONFIG,
        extract: extract_config,
    },
    DeploymentFormat {
        name: "deploy_services",
        regex: &DEPLOY_SERVICES,
        extract: extract_services,
    },
    DeploymentFormat {
        name: "deploy_services_multi_env",
        regex: &DEPLOY_SERVICES_MULTI_ENV,
        extract: extract_services_multi_env,
    },
    DeploymentFormat {
        name: "deploy_config_only",
        regex: &DEPLOY_CONFIG_ONLY,
        extract: extract_config_only,
    },
];

// Case-insensitive formats may capture `STA`; normalise before lookup.
#[inline]
fn environment(token: &str) -> Option<Environment> {
    Environment::from_token(&token.to_ascii_lowercase())
}

#[inline]
fn group<'h>(caps: &Captures<'h>, i: usize) -> Option<&'h str> {
    caps.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty())
}

fn details(
    domain: &str,
    service: &str,
    version: &str,
    environment: Environment,
    kind: DeploymentKind,
) -> CommitMessageDetails {
    CommitMessageDetails {
        domain: domain.to_string(),
        service: service.to_string(),
        version: version.to_string(),
        environment,
        kind,
    }
}

fn extract_version(caps: &Captures<'_>) -> Option<CommitMessageDetails> {
    Some(details(
        group(caps, 1)?,
        group(caps, 2)?,
        group(caps, 3)?,
        environment(group(caps, 4)?)?,
        DeploymentKind::Version,
    ))
}

fn extract_config(caps: &Captures<'_>) -> Option<CommitMessageDetails> {
    Some(details(
        group(caps, 1)?,
        group(caps, 2)?,
        "config",
        environment(group(caps, 3)?)?,
        DeploymentKind::Config,
    ))
}

fn extract_services(caps: &Captures<'_>) -> Option<CommitMessageDetails> {
    Some(details(
        group(caps, 1)?,
        "services",
        "multiple",
        environment(group(caps, 2)?)?,
        DeploymentKind::Multiple,
    ))
}

fn extract_services_multi_env(caps: &Captures<'_>) -> Option<CommitMessageDetails> {
    // Environment list looks like "sta and prod"; the first one names the channel.
    let first_env = group(caps, 2)?.split_whitespace().next()?;
    Some(details(
        group(caps, 1)?,
        "services",
        "multiple-envs",
        environment(first_env)?,
        DeploymentKind::Multiple,
    ))
}

fn extract_config_only(caps: &Captures<'_>) -> Option<CommitMessageDetails> {
    Some(details(
        "multiple",
        "config",
        "config",
        environment(group(caps, 1)?)?,
        DeploymentKind::Config,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_unique() {
        let mut names: Vec<&str> = FORMATS.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FORMATS.len());
    }

    #[test]
    fn test_all_patterns_compile() {
        for format in &FORMATS {
            assert!(!format.regex.as_str().is_empty(), "{}", format.name);
        }
    }

    #[test]
    fn test_deployed_version_rejects_prerelease() {
        assert!(!DEPLOYED_VERSION.is_match("Deployed a b version v1.2.3-rc.1 to prod"));
        assert!(DEPLOY_VERSION.is_match("Deploy a b version v1.2.3-rc.1 to prod"));
    }

    #[test]
    fn test_version_formats_accept_trailing_text() {
        assert!(DEPLOYED_VERSION.is_match("Deployed a b version v1.2.3 to sta (#123)"));
        assert!(DEPLOY_VERSION.is_match("Deploy a b version v1.2.3 to sta (#123)"));
        assert!(!DEPLOYED_VERSION.is_match("Deployed a b version v1.2.3 to production"));
        assert!(!DEPLOYED_VERSION.is_match("Deployed a b version v1.2.3 to prod-eu"));
    }

    #[test]
    fn test_deploy_formats_ignore_case() {
        assert!(DEPLOY_VERSION.is_match("deploy a b VERSION 1.2.3 to STA"));
        assert!(DEPLOY_SERVICES.is_match("Deploy a Services to Prod"));
        assert!(DEPLOY_CONFIG_ONLY.is_match("DEPLOY CONFIG CHANGES TO DEV"));
        assert!(!DEPLOYED_VERSION.is_match("Deployed a b version v1.2.3 to PROD"));
    }
}
