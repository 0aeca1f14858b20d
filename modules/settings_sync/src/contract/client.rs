//! Native client trait and sink abstraction
//!
//! `ServerSyncApi` is the API other modules use to pull configuration from
//! the analysis server. `SettingsSink` is where fetched settings end up.

use super::{
    error::SyncError,
    model::{GlobalSettingsBuilder, GlobalSettingsSnapshot, ProjectConfiguration,
        ProjectConfigurationBuilder, QualityProfileRef},
};
use crate::domain::version::ServerVersion;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

/// Caller-owned accumulator receiving flattened settings
pub trait SettingsSink: Send {
    /// Store one setting, replacing any previous value for the key
    fn put(&mut self, key: String, value: String);
}

impl SettingsSink for GlobalSettingsBuilder {
    fn put(&mut self, key: String, value: String) {
        self.put_property(key, value);
    }
}

impl SettingsSink for ProjectConfigurationBuilder {
    fn put(&mut self, key: String, value: String) {
        self.put_property(key, value);
    }
}

impl SettingsSink for BTreeMap<String, String> {
    fn put(&mut self, key: String, value: String) {
        self.insert(key, value);
    }
}

impl SettingsSink for HashMap<String, String> {
    fn put(&mut self, key: String, value: String) {
        self.insert(key, value);
    }
}

/// Settings sync API for inter-module communication
#[async_trait]
pub trait ServerSyncApi: Send + Sync {
    /// Download global settings
    async fn fetch_global_settings(
        &self,
        server_version: &ServerVersion,
    ) -> Result<GlobalSettingsSnapshot, SyncError>;

    /// Download project settings, keeping only values that differ from `global`
    async fn fetch_project_settings(
        &self,
        server_version: &ServerVersion,
        project_key: &str,
        global: &GlobalSettingsSnapshot,
    ) -> Result<ProjectConfiguration, SyncError>;

    /// Download the quality profiles used by a project
    async fn fetch_project_quality_profiles(
        &self,
        server_version: &ServerVersion,
        project_key: &str,
    ) -> Result<Vec<QualityProfileRef>, SyncError>;
}
