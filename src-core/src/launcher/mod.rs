//! Launcher Bridge
//!
//! Starts separately installed applications (the VPN client) on request.

mod bridge;
mod system;

pub use bridge::{LaunchIntent, LauncherBridge, PackageManager};
pub use system::SystemPackageManager;

#[cfg(test)]
pub(crate) use bridge::tests::FakePackages;
