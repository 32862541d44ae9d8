use crate::manager::{ManagerSpec, UpgradeStrategy};

pub const SPEC: ManagerSpec = ManagerSpec {
    name: "Snap",
    program: "snap",
    strategy: UpgradeStrategy::Single(&["refresh"]),
    needs_sudo: true,
    env: &[],
};
