//! Quality profiles used by a project

use super::codec::SettingsCodec;
use super::events::{FetchObserver, FetchResource, Stopwatch, TracingFetchObserver};
use super::transport::{Transport, TransportError};
use super::version::{
    select_protocol, Protocol, ServerVersion, QUALITY_PROFILE_PROJECT_PARAM_MIN_VERSION,
};
use crate::contract::{QualityProfileRef, SyncError};
use std::sync::Arc;

const API_QUALITY_PROFILES_PATH: &str = "/api/qualityprofiles/search";

/// Downloads the quality profiles associated with a project
#[derive(Clone)]
pub struct QualityProfileFetcher {
    transport: Arc<dyn Transport>,
    codec: Arc<dyn SettingsCodec>,
    organization_key: Option<String>,
    observer: Arc<dyn FetchObserver>,
}

impl QualityProfileFetcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        codec: Arc<dyn SettingsCodec>,
        organization_key: Option<String>,
    ) -> Self {
        Self {
            transport,
            codec,
            organization_key,
            observer: Arc::new(TracingFetchObserver),
        }
    }

    /// Replace the default timing observer
    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn organization_key(&self) -> Option<&str> {
        self.organization_key.as_deref()
    }

    /// Server-relative request path for `project_key`
    pub fn request_path(&self, project_key: &str, server_version: &ServerVersion) -> String {
        let param = match select_protocol(server_version, &QUALITY_PROFILE_PROJECT_PARAM_MIN_VERSION) {
            Protocol::Modern => "project",
            Protocol::Legacy => "projectKey",
        };

        let mut path = format!(
            "{API_QUALITY_PROFILES_PATH}?{param}={}",
            urlencoding::encode(project_key)
        );
        if let Some(organization) = &self.organization_key {
            path.push_str("&organization=");
            path.push_str(&urlencoding::encode(organization));
        }
        path
    }

    /// Fetch the profiles, in the order returned by the server
    pub async fn fetch(
        &self,
        project_key: &str,
        server_version: &ServerVersion,
    ) -> Result<Vec<QualityProfileRef>, SyncError> {
        let stopwatch = Stopwatch::start();
        let path = self.request_path(project_key, server_version);

        let response = self.transport.get(&path).await.map_err(|e| match e {
            TransportError::NotFound { .. } => SyncError::ProjectNotFound {
                project_key: project_key.to_string(),
                organization_key: self.organization_key.clone(),
            },
            other => SyncError::Transport(other),
        })?;
        let profiles = self.codec.decode_quality_profiles(&response.body)?;

        stopwatch.finish(
            self.observer.as_ref(),
            FetchResource::QualityProfiles {
                project_key: project_key.to_string(),
            },
        );
        Ok(profiles)
    }
}
