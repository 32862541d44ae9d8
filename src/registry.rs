use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, error, info, warn};

use crate::error::{DetectionError, ExecutionError};
use crate::exec::Invocation;
use crate::interrupt;
use crate::manager::{apt, npm, PackageManager, UpgradeStrategy};
use crate::outcome::{Report, UpgradeOutcome};

/// Host-facing knobs for a run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directories searched for package manager programs, in `PATH` syntax.
    pub search_path: Option<OsString>,
    pub use_sudo: bool,
    pub verbose: bool,
    pub reboot_marker: PathBuf,
}

impl Settings {
    pub fn from_env(verbose: bool, no_sudo: bool) -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
            use_sudo: !no_sudo && !is_root(),
            verbose,
            reboot_marker: PathBuf::from(apt::REBOOT_REQUIRED_FILE),
        }
    }
}

fn is_root() -> bool {
    nix::unistd::Uid::effective().is_root()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub manager: PackageManager,
    pub location: Option<PathBuf>,
}

/// Which managers are installed, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    entries: Vec<Detection>,
}

impl DetectionResult {
    #[cfg(test)]
    pub fn is_present(&self, manager: PackageManager) -> bool {
        self.location(manager).is_some()
    }

    #[cfg(test)]
    pub fn location(&self, manager: PackageManager) -> Option<&Path> {
        self.entries
            .iter()
            .find(|d| d.manager == manager)
            .and_then(|d| d.location.as_deref())
    }

    pub fn present(&self) -> impl Iterator<Item = (PackageManager, &Path)> {
        self.entries
            .iter()
            .filter_map(|d| d.location.as_deref().map(|loc| (d.manager, loc)))
    }
}

pub struct PackageManagerRegistry {
    settings: Settings,
    stop: &'static AtomicBool,
}

impl PackageManagerRegistry {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            stop: &interrupt::INTERRUPTED,
        }
    }

    /// Use a different flag to decide when the upgrade pass should stop early.
    #[cfg(test)]
    pub fn with_stop_flag(mut self, stop: &'static AtomicBool) -> Self {
        self.stop = stop;
        self
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    fn locate(&self, program: &str) -> Result<Option<PathBuf>, DetectionError> {
        let search_path = self
            .settings
            .search_path
            .as_ref()
            .ok_or(DetectionError::NoSearchPath)?;
        let cwd = std::env::current_dir().map_err(DetectionError::CurrentDir)?;

        match which::which_in(program, Some(search_path), cwd) {
            Ok(path) => Ok(Some(path)),
            Err(e) => {
                debug!("{} not found: {}", program, e);
                Ok(None)
            }
        }
    }

    /// Check every supported manager against the search path.
    pub fn detect(&self) -> Result<DetectionResult, DetectionError> {
        let mut entries = Vec::with_capacity(PackageManager::ALL.len());
        for manager in PackageManager::ALL {
            let location = self.locate(manager.program())?;
            if let Some(path) = &location {
                debug!("detected {} at {}", manager, path.display());
            }
            entries.push(Detection { manager, location });
        }
        Ok(DetectionResult { entries })
    }

    fn sudo_for(&self, manager: PackageManager) -> Result<Option<PathBuf>, ExecutionError> {
        if !manager.spec().needs_sudo || !self.settings.use_sudo {
            return Ok(None);
        }
        match self.locate("sudo") {
            Ok(Some(sudo)) => Ok(Some(sudo)),
            Ok(None) => Err(ExecutionError::SudoUnavailable),
            Err(e) => Err(ExecutionError::SudoLookup(e)),
        }
    }

    /// Run one manager's upgrade. A non-zero exit is a failed outcome, not an error.
    pub fn upgrade(
        &self,
        manager: PackageManager,
        program: &Path,
    ) -> Result<UpgradeOutcome, ExecutionError> {
        let spec = manager.spec();
        let sudo = self.sudo_for(manager)?;

        match spec.strategy {
            UpgradeStrategy::Single(args) => {
                let completion = Invocation::new(program, args.iter().copied())
                    .sudo(sudo.as_deref())
                    .env(spec.env)
                    .verbose(self.settings.verbose)
                    .run()?;
                Ok(UpgradeOutcome::from_completion(manager, &completion))
            }
            UpgradeStrategy::NpmOutdated => self.upgrade_npm(program, sudo.as_deref()),
        }
    }

    fn upgrade_npm(
        &self,
        program: &Path,
        sudo: Option<&Path>,
    ) -> Result<UpgradeOutcome, ExecutionError> {
        let manager = PackageManager::Npm;

        let listing = Invocation::new(program, npm::OUTDATED_ARGS.iter().copied())
            .verbose(self.settings.verbose)
            .capture_stdout()
            .run()?;
        if !listing
            .code()
            .is_some_and(|code| npm::OUTDATED_OK_CODES.contains(&code))
        {
            return Ok(UpgradeOutcome::failed(
                manager,
                listing.code(),
                format!("npm outdated: {}", listing.failure_detail()),
            ));
        }

        // A crash can also exit 1, and then silence is not "nothing outdated"
        if listing.code() != Some(0) && listing.stdout.trim().is_empty() {
            return Ok(UpgradeOutcome::failed(
                manager,
                listing.code(),
                format!("npm outdated: {}", listing.failure_detail()),
            ));
        }

        let packages = match npm::parse_outdated(&listing.stdout) {
            Ok(packages) => packages,
            Err(e) => return Ok(UpgradeOutcome::failed(manager, listing.code(), e.to_string())),
        };

        if packages.is_empty() {
            info!("All packages are up-to-date.");
            return Ok(UpgradeOutcome::succeeded(manager));
        }

        for (done, package) in packages.iter().enumerate() {
            if self.stop_requested() {
                return Ok(UpgradeOutcome::failed(
                    manager,
                    None,
                    format!(
                        "interrupted after {} of {} package upgrades",
                        done,
                        packages.len()
                    ),
                ));
            }
            info!(
                "Upgrading {}: {} -> {}",
                package.name,
                package.current.as_deref().unwrap_or("missing"),
                package.latest
            );
            let install = Invocation::new(program, package.install_args())
                .sudo(sudo)
                .verbose(self.settings.verbose)
                .run()?;
            if !install.success() {
                return Ok(UpgradeOutcome::failed(
                    manager,
                    install.code(),
                    format!(
                        "npm install {}@{}: {}",
                        package.name,
                        package.latest,
                        install.failure_detail()
                    ),
                ));
            }
        }

        Ok(UpgradeOutcome::succeeded(manager))
    }

    /// Detect, then upgrade every present manager once, in declaration order.
    pub fn run_all(&self) -> Result<Report, DetectionError> {
        let detection = self.detect()?;
        let mut report = Report::default();

        for (manager, program) in detection.present() {
            if !report.interrupted && self.stop_requested() {
                warn!("interrupted, skipping remaining package managers");
                report.interrupted = true;
            }
            if report.interrupted {
                report.outcomes.push(UpgradeOutcome::skipped(manager));
                continue;
            }

            info!("{}", manager);
            let outcome = match self.upgrade(manager, program) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("{}: {}", manager, e);
                    UpgradeOutcome::launch_failed(manager, &e)
                }
            };
            if let Some(detail) = outcome.detail() {
                debug!("{} failed: {}", manager, detail);
            }
            report.outcomes.push(outcome);
        }

        // Ctrl+C during the last upgrade, or before anything was found to run
        if !report.interrupted && self.stop_requested() {
            report.interrupted = true;
        }

        report.reboot_required = self.post_upgrade(&report.outcomes);
        Ok(report)
    }

    /// Checks that only make sense once a manager has upgraded. Returns whether a reboot is needed.
    fn post_upgrade(&self, outcomes: &[UpgradeOutcome]) -> bool {
        let apt_upgraded = outcomes
            .iter()
            .any(|o| o.manager == PackageManager::Apt && o.is_success());

        if apt_upgraded && apt::reboot_required(&self.settings.reboot_marker) {
            warn!("A reboot is required.");
            return true;
        }
        false
    }
}
