use serde::Deserialize;
use thiserror::Error;

use crate::manager::{ManagerSpec, UpgradeStrategy};

pub const SPEC: ManagerSpec = ManagerSpec {
    name: "npm",
    program: "npm",
    strategy: UpgradeStrategy::NpmOutdated,
    needs_sudo: true,
    env: &[],
};

pub const OUTDATED_ARGS: &[&str] = &["outdated", "--global", "--json"];

/// `npm outdated` exits 1 whenever something is outdated.
pub const OUTDATED_OK_CODES: &[i32] = &[0, 1];

#[derive(Error, Debug)]
pub enum OutdatedParseError {
    #[error("invalid JSON from npm outdated: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object from npm outdated")]
    NotAnObject,
    #[error("unexpected entry for package '{0}'")]
    BadEntry(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedPackage {
    pub name: String,
    pub current: Option<String>,
    pub latest: String,
}

impl OutdatedPackage {
    pub fn install_args(&self) -> Vec<String> {
        vec![
            "install".to_string(),
            "--global".to_string(),
            "--no-audit".to_string(),
            "--no-fund".to_string(),
            "--silent".to_string(),
            format!("{}@{}", self.name, self.latest),
        ]
    }
}

#[derive(Deserialize)]
struct Versions {
    current: Option<String>,
    latest: String,
}

/// Parse the output of `npm outdated --global --json`, keeping npm's order.
pub fn parse_outdated(stdout: &str) -> Result<Vec<OutdatedPackage>, OutdatedParseError> {
    // npm prints nothing at all when every package is current
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(stdout)?;
    let serde_json::Value::Object(entries) = value else {
        return Err(OutdatedParseError::NotAnObject);
    };

    entries
        .into_iter()
        .map(|(name, versions)| {
            let versions: Versions = serde_json::from_value(versions)
                .map_err(|_| OutdatedParseError::BadEntry(name.clone()))?;
            Ok(OutdatedPackage {
                name,
                current: versions.current,
                latest: versions.latest,
            })
        })
        .collect()
}
