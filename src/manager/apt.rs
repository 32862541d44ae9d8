use std::path::Path;

use crate::manager::{ManagerSpec, UpgradeStrategy};

pub const SPEC: ManagerSpec = ManagerSpec {
    name: "APT",
    program: "apt-get",
    strategy: UpgradeStrategy::Single(&["upgrade", "--update", "--assume-yes", "--verbose-versions"]),
    needs_sudo: true,
    env: &[],
};

/// Written by package hooks when an installed update needs a reboot.
pub const REBOOT_REQUIRED_FILE: &str = "/run/reboot-required";

pub fn reboot_required(marker: &Path) -> bool {
    marker.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reboot_required_when_marker_exists() {
        let tmp = TempDir::new().unwrap();
        let marker = tmp.path().join("reboot-required");
        fs::write(&marker, "*** System restart required ***\n").unwrap();
        assert!(reboot_required(&marker));
    }

    #[test]
    fn test_no_reboot_without_marker() {
        let tmp = TempDir::new().unwrap();
        assert!(!reboot_required(&tmp.path().join("reboot-required")));
    }

    #[test]
    fn test_directory_is_not_a_marker() {
        let tmp = TempDir::new().unwrap();
        assert!(!reboot_required(tmp.path()));
    }
}
