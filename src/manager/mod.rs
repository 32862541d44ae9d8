pub mod apt;
pub mod npm;
pub mod pipx;
pub mod snap;

use serde::Serialize;
use std::fmt;

/// How a manager performs its upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeStrategy {
    /// A single invocation of the detected program with fixed arguments.
    Single(&'static [&'static str]),
    /// List outdated global packages, then install each at its latest version.
    NpmOutdated,
}

/// Static capability record of a supported package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerSpec {
    pub name: &'static str,
    /// Program resolved on the search path to decide whether the manager is present.
    pub program: &'static str,
    pub strategy: UpgradeStrategy,
    pub needs_sudo: bool,
    pub env: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Apt,
    Snap,
    Npm,
    Pipx,
}

impl PackageManager {
    /// Every supported manager, in the order upgrades run.
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Apt,
        PackageManager::Snap,
        PackageManager::Npm,
        PackageManager::Pipx,
    ];

    pub fn spec(&self) -> &'static ManagerSpec {
        match self {
            PackageManager::Apt => &apt::SPEC,
            PackageManager::Snap => &snap::SPEC,
            PackageManager::Npm => &npm::SPEC,
            PackageManager::Pipx => &pipx::SPEC,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec().name
    }

    pub fn program(&self) -> &'static str {
        self.spec().program
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
