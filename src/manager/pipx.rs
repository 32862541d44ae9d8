use crate::manager::{ManagerSpec, UpgradeStrategy};

pub const SPEC: ManagerSpec = ManagerSpec {
    name: "pipx",
    program: "pipx",
    strategy: UpgradeStrategy::Single(&["upgrade-all"]),
    needs_sudo: false,
    // pipx decorates its progress output with emoji otherwise
    env: &[("USE_EMOJI", "0")],
};
