//! System Package Manager
//!
//! Resolves app ids from the configured registry and hands the target to the
//! platform opener.

use std::collections::BTreeMap;
use std::path::Path;

use super::bridge::{LaunchIntent, PackageManager};

pub struct SystemPackageManager {
    /// app id -> executable path or URI
    apps: BTreeMap<String, String>,
}

impl SystemPackageManager {
    pub fn new(apps: BTreeMap<String, String>) -> Self {
        Self { apps }
    }

    fn is_uri(target: &str) -> bool {
        target.contains("://")
    }
}

impl PackageManager for SystemPackageManager {
    fn launch_intent_for(&self, app_id: &str) -> Option<LaunchIntent> {
        let target = self.apps.get(app_id)?.trim();
        if target.is_empty() {
            return None;
        }
        // Paths must exist on disk; URIs are left to the opener
        if !Self::is_uri(target) && !Path::new(target).exists() {
            return None;
        }
        Some(LaunchIntent {
            app_id: app_id.to_string(),
            target: target.to_string(),
        })
    }

    fn start(&self, intent: &LaunchIntent) -> std::io::Result<()> {
        open::that_detached(&intent.target)
    }
}
