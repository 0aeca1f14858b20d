//! Module declaration - wires configuration, transport and service

use crate::config::Config;
use crate::contract::{
    GlobalSettingsSnapshot, ProjectConfiguration, QualityProfileRef, ServerSyncApi, SyncError,
};
use crate::domain::events::FetchObserver;
use crate::domain::transport::Transport;
use crate::domain::version::ServerVersion;
use crate::domain::SyncService;
use crate::infra::{JsonCodec, ReqwestTransport};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Everything downloaded for one project during a sync session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSync {
    pub global: GlobalSettingsSnapshot,
    pub project: ProjectConfiguration,
    pub quality_profiles: Vec<QualityProfileRef>,
}

/// Settings sync module
pub struct SettingsSyncModule {
    config: Config,
    service: Arc<SyncService>,
}

impl SettingsSyncModule {
    /// Build the module with the HTTP transport described by `config`
    pub fn from_config(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)
            .with_context(|| format!("cannot set up HTTP transport for '{}'", config.server_url))?;
        let module = Self::with_transport(config, Arc::new(transport));

        tracing::info!(
            server_url = %module.config.server_url,
            organization = module.config.organization.as_deref(),
            "Settings sync module initialized"
        );
        Ok(module)
    }

    /// Load configuration (see [`Config::load`]) and build the module
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = Config::load(path).context("invalid settings sync configuration")?;
        Self::from_config(config)
    }

    /// Build the module over an arbitrary transport, decoding JSON payloads
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let service = SyncService::new(
            transport,
            Arc::new(JsonCodec),
            config.organization.clone(),
        );
        Self {
            config,
            service: Arc::new(service),
        }
    }

    /// Route fetch timings to `observer` instead of the log
    pub fn with_observer(self, observer: Arc<dyn FetchObserver>) -> Self {
        let service = SyncService::clone(&self.service).with_observer(observer);
        Self {
            config: self.config,
            service: Arc::new(service),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Native client for other modules
    pub fn client(&self) -> Arc<dyn ServerSyncApi> {
        self.service.clone()
    }

    /// Download global settings, project settings and quality profiles of
    /// one project. The first failure aborts the whole session.
    pub async fn sync_project(
        &self,
        server_version: &ServerVersion,
        project_key: &str,
    ) -> Result<ProjectSync, SyncError> {
        let global = self.service.fetch_global_settings(server_version).await?;
        let project = self
            .service
            .fetch_project_settings(server_version, project_key, &global)
            .await?;
        let quality_profiles = self
            .service
            .fetch_project_quality_profiles(server_version, project_key)
            .await?;

        Ok(ProjectSync {
            global,
            project,
            quality_profiles,
        })
    }
}
