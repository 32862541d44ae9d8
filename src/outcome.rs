use serde::Serialize;
use std::fmt;

use crate::error::ExecutionError;
use crate::exec::Completion;
use crate::manager::PackageManager;

/// Exit code reported when the run was cut short by SIGINT.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeStatus {
    Succeeded,
    Failed,
    Skipped,
}

impl fmt::Display for UpgradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeStatus::Succeeded => write!(f, "succeeded"),
            UpgradeStatus::Failed => write!(f, "failed"),
            UpgradeStatus::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpgradeOutcome {
    pub manager: PackageManager,
    pub status: UpgradeStatus,
    pub exit_code: Option<i32>,
    pub diagnostic: Option<String>,
}

impl UpgradeOutcome {
    pub fn succeeded(manager: PackageManager) -> Self {
        Self {
            manager,
            status: UpgradeStatus::Succeeded,
            exit_code: Some(0),
            diagnostic: None,
        }
    }

    pub fn failed(manager: PackageManager, exit_code: Option<i32>, diagnostic: String) -> Self {
        Self {
            manager,
            status: UpgradeStatus::Failed,
            exit_code,
            diagnostic: Some(diagnostic),
        }
    }

    pub fn skipped(manager: PackageManager) -> Self {
        Self {
            manager,
            status: UpgradeStatus::Skipped,
            exit_code: None,
            diagnostic: Some("not attempted: run interrupted".to_string()),
        }
    }

    pub fn from_completion(manager: PackageManager, completion: &Completion) -> Self {
        if completion.success() {
            Self::succeeded(manager)
        } else {
            Self::failed(manager, completion.code(), completion.failure_detail())
        }
    }

    pub fn launch_failed(manager: PackageManager, err: &ExecutionError) -> Self {
        Self::failed(manager, None, format!("could not launch: {}", err))
    }

    pub fn is_success(&self) -> bool {
        self.status == UpgradeStatus::Succeeded
    }

    /// Short explanation shown next to a non-successful status.
    pub fn detail(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        match (&self.diagnostic, self.exit_code) {
            (Some(diagnostic), _) => Some(diagnostic.clone()),
            (None, Some(code)) => Some(format!("exit status {}", code)),
            (None, None) => None,
        }
    }
}

/// Everything one run of the upgrade pass produced, in upgrade order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Report {
    pub outcomes: Vec<UpgradeOutcome>,
    pub interrupted: bool,
    pub reboot_required: bool,
}

impl Report {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(UpgradeOutcome::is_success)
    }

    pub fn exit_code(&self) -> u8 {
        if self.interrupted {
            INTERRUPTED_EXIT_CODE
        } else if self.all_succeeded() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_exits_zero() {
        let report = Report::default();
        assert!(report.all_succeeded());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_any_failure_exits_one() {
        let report = Report {
            outcomes: vec![
                UpgradeOutcome::succeeded(PackageManager::Apt),
                UpgradeOutcome::failed(PackageManager::Pipx, Some(2), "exit status 2".to_string()),
            ],
            ..Report::default()
        };
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_interrupted_exit_code() {
        let report = Report {
            outcomes: vec![
                UpgradeOutcome::succeeded(PackageManager::Apt),
                UpgradeOutcome::skipped(PackageManager::Snap),
            ],
            interrupted: true,
            reboot_required: false,
        };
        assert_eq!(report.exit_code(), INTERRUPTED_EXIT_CODE);
    }

    #[test]
    fn test_launch_failure_has_distinct_diagnostic() {
        let err = ExecutionError::SudoUnavailable;
        let outcome = UpgradeOutcome::launch_failed(PackageManager::Snap, &err);
        assert_eq!(outcome.status, UpgradeStatus::Failed);
        assert_eq!(outcome.exit_code, None);
        assert!(outcome.diagnostic.unwrap().starts_with("could not launch:"));
    }

    #[test]
    fn test_detail_only_for_unsuccessful() {
        assert_eq!(UpgradeOutcome::succeeded(PackageManager::Npm).detail(), None);

        let failed = UpgradeOutcome {
            manager: PackageManager::Npm,
            status: UpgradeStatus::Failed,
            exit_code: Some(1),
            diagnostic: None,
        };
        assert_eq!(failed.detail().as_deref(), Some("exit status 1"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(UpgradeStatus::Succeeded.to_string(), "succeeded");
        assert_eq!(UpgradeStatus::Failed.to_string(), "failed");
        assert_eq!(UpgradeStatus::Skipped.to_string(), "skipped");
    }
}
