//! Launcher Commands
//!
//! Method-channel style entry point for opening the VPN client.

use serde::{Deserialize, Serialize};
use crate::AppState;

/// Method name the host shell sends to open the VPN client
pub const LAUNCH_NEKO_RAY: &str = "launchNekoRay";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MethodResult {
    Success(bool),
    NotImplemented,
}

/// Open the configured VPN client; false if it is not installed
pub fn launch_neko_ray(state: &AppState) -> bool {
    state.launcher.launch(&state.config.launcher.target_app_id)
}

/// Open any installed app by id
pub fn launch_app(state: &AppState, app_id: &str) -> bool {
    state.launcher.launch(app_id)
}

/// Dispatch a launcher method call by name
pub fn handle_launcher_call(state: &AppState, method: &str) -> MethodResult {
    match method {
        LAUNCH_NEKO_RAY => MethodResult::Success(launch_neko_ray(state)),
        other => {
            log::warn!("Unknown launcher method: {}", other);
            MethodResult::NotImplemented
        }
    }
}
