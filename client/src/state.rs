use crate::config::AppConfig;
use std::sync::Arc;
use swingsfab_profiles::ProfileStore;

/// Process-wide state shared by every session.
#[derive(Debug)]
pub struct AppState {
    config: AppConfig,
    profiles: Arc<ProfileStore>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Self::with_profiles(config, ProfileStore::seeded())
    }

    pub fn with_profiles(config: AppConfig, profiles: ProfileStore) -> Arc<Self> {
        Arc::new(Self {
            config,
            profiles: Arc::new(profiles),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn profiles(&self) -> &Arc<ProfileStore> {
        &self.profiles
    }

    pub fn build_id(&self) -> &str {
        &self.config.build_id
    }
}
