//! Domain service - orchestrates settings and quality profile downloads

use super::codec::SettingsCodec;
use super::events::FetchObserver;
use super::quality_profiles::QualityProfileFetcher;
use super::settings::SettingsFetcher;
use super::transport::Transport;
use super::version::ServerVersion;
use crate::contract::{
    GlobalSettingsSnapshot, ProjectConfiguration, QualityProfileRef, ServerSyncApi, SyncError,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Domain service for pulling configuration from the analysis server
#[derive(Clone)]
pub struct SyncService {
    settings: SettingsFetcher,
    quality_profiles: QualityProfileFetcher,
}

impl SyncService {
    /// Create a new service instance
    pub fn new(
        transport: Arc<dyn Transport>,
        codec: Arc<dyn SettingsCodec>,
        organization_key: Option<String>,
    ) -> Self {
        Self {
            settings: SettingsFetcher::new(transport.clone(), codec.clone()),
            quality_profiles: QualityProfileFetcher::new(transport, codec, organization_key),
        }
    }

    /// Route fetch timings of both fetchers to `observer`
    pub fn with_observer(self, observer: Arc<dyn FetchObserver>) -> Self {
        Self {
            settings: self.settings.with_observer(observer.clone()),
            quality_profiles: self.quality_profiles.with_observer(observer),
        }
    }

    pub fn settings_fetcher(&self) -> &SettingsFetcher {
        &self.settings
    }

    pub fn quality_profile_fetcher(&self) -> &QualityProfileFetcher {
        &self.quality_profiles
    }
}

#[async_trait]
impl ServerSyncApi for SyncService {
    async fn fetch_global_settings(
        &self,
        server_version: &ServerVersion,
    ) -> Result<GlobalSettingsSnapshot, SyncError> {
        let mut builder = GlobalSettingsSnapshot::builder();
        self.settings
            .fetch(server_version, None, None, &mut builder)
            .await?;

        let global = builder.build();
        info!(count = global.len(), %server_version, "Fetched global settings");
        Ok(global)
    }

    async fn fetch_project_settings(
        &self,
        server_version: &ServerVersion,
        project_key: &str,
        global: &GlobalSettingsSnapshot,
    ) -> Result<ProjectConfiguration, SyncError> {
        let mut builder = ProjectConfiguration::builder(project_key);
        self.settings
            .fetch(server_version, Some(project_key), Some(global), &mut builder)
            .await?;

        let project = builder.build();
        info!(project_key, count = project.len(), "Fetched project settings");
        Ok(project)
    }

    async fn fetch_project_quality_profiles(
        &self,
        server_version: &ServerVersion,
        project_key: &str,
    ) -> Result<Vec<QualityProfileRef>, SyncError> {
        let profiles = self.quality_profiles.fetch(project_key, server_version).await?;
        info!(project_key, count = profiles.len(), "Fetched project quality profiles");
        Ok(profiles)
    }
}
