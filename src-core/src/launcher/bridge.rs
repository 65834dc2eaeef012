//! Launch Bridge
//!
//! A missing or unlaunchable target is a normal `false`, never an error.

use std::sync::Arc;

/// Everything needed to start an installed app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchIntent {
    pub app_id: String,
    /// Executable path or URI handed to the platform opener
    pub target: String,
}

/// Platform lookup and start of installed applications
pub trait PackageManager: Send + Sync {
    /// Launch intent for `app_id`, or `None` if it is not installed
    fn launch_intent_for(&self, app_id: &str) -> Option<LaunchIntent>;

    /// Start the activity described by `intent`
    fn start(&self, intent: &LaunchIntent) -> std::io::Result<()>;
}

#[derive(Clone)]
pub struct LauncherBridge {
    packages: Arc<dyn PackageManager>,
}

impl LauncherBridge {
    pub fn new(packages: Arc<dyn PackageManager>) -> Self {
        Self { packages }
    }

    /// Try to start `app_id`; true if the start was issued
    pub fn launch(&self, app_id: &str) -> bool {
        let Some(intent) = self.packages.launch_intent_for(app_id) else {
            log::warn!("Launch skipped, {} is not installed", app_id);
            return false;
        };

        match self.packages.start(&intent) {
            Ok(()) => {
                log::info!("Launched {}", app_id);
                true
            }
            Err(e) => {
                log::error!("Failed to launch {}: {}", app_id, e);
                false
            }
        }
    }

    pub fn is_installed(&self, app_id: &str) -> bool {
        self.packages.launch_intent_for(app_id).is_some()
    }
}
