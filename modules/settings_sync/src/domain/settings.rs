//! Settings download
//!
//! Servers from 6.3 on expose `/api/settings/values`, which flags values
//! inherited from the global scope and carries structured values. Older
//! servers only offer `/api/properties`, a flat list of key/value pairs; for
//! those the project values equal to global ones are dropped client-side.

use super::codec::SettingsCodec;
use super::diff::DiffFilter;
use super::events::{FetchObserver, FetchResource, Stopwatch, TracingFetchObserver};
use super::flatten::flatten_into;
use super::transport::Transport;
use super::version::{select_protocol, Protocol, ServerVersion, SETTINGS_API_MIN_VERSION};
use crate::contract::{
    GlobalSettingsSnapshot, LegacyProperty, RemoteSetting, SettingsSink, SyncError,
};
use std::sync::Arc;
use tracing::debug;

const API_SETTINGS_PATH: &str = "/api/settings/values";
const API_PROPERTIES_PATH: &str = "/api/properties?format=json";

/// Settings web service flavour, resolved once per fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsProtocol {
    /// `/api/properties`: flat pairs, diffed against the global snapshot
    LegacyProperties,
    /// `/api/settings/values`: structured values with an inherited flag
    SettingsValues,
}

impl SettingsProtocol {
    pub fn select(server_version: &ServerVersion) -> Self {
        Self::from(select_protocol(server_version, &SETTINGS_API_MIN_VERSION))
    }

    pub fn generation(self) -> Protocol {
        match self {
            Self::LegacyProperties => Protocol::Legacy,
            Self::SettingsValues => Protocol::Modern,
        }
    }

    /// Server-relative request path, optionally scoped to a project
    pub fn request_path(self, project_key: Option<&str>) -> String {
        match (self, project_key) {
            (Self::SettingsValues, None) => API_SETTINGS_PATH.to_string(),
            (Self::SettingsValues, Some(key)) => {
                format!("{API_SETTINGS_PATH}?component={}", urlencoding::encode(key))
            }
            (Self::LegacyProperties, None) => API_PROPERTIES_PATH.to_string(),
            (Self::LegacyProperties, Some(key)) => {
                format!("{API_PROPERTIES_PATH}&resource={}", urlencoding::encode(key))
            }
        }
    }
}

impl From<Protocol> for SettingsProtocol {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Legacy => Self::LegacyProperties,
            Protocol::Modern => Self::SettingsValues,
        }
    }
}

/// Downloads settings and feeds them, flattened, into a sink
#[derive(Clone)]
pub struct SettingsFetcher {
    transport: Arc<dyn Transport>,
    codec: Arc<dyn SettingsCodec>,
    observer: Arc<dyn FetchObserver>,
}

impl SettingsFetcher {
    pub fn new(transport: Arc<dyn Transport>, codec: Arc<dyn SettingsCodec>) -> Self {
        Self {
            transport,
            codec,
            observer: Arc::new(TracingFetchObserver),
        }
    }

    /// Replace the default timing observer
    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Fetch settings using the protocol matching `server_version`.
    ///
    /// `project_key` scopes the request to a project. `reference` holds the
    /// global settings a project fetch is diffed against; it only matters for
    /// the legacy protocol.
    pub async fn fetch(
        &self,
        server_version: &ServerVersion,
        project_key: Option<&str>,
        reference: Option<&GlobalSettingsSnapshot>,
        sink: &mut dyn SettingsSink,
    ) -> Result<(), SyncError> {
        let protocol = SettingsProtocol::select(server_version);
        self.fetch_with(protocol, project_key, reference, sink).await
    }

    /// Fetch settings with an explicitly chosen protocol
    pub async fn fetch_with(
        &self,
        protocol: SettingsProtocol,
        project_key: Option<&str>,
        reference: Option<&GlobalSettingsSnapshot>,
        sink: &mut dyn SettingsSink,
    ) -> Result<(), SyncError> {
        let stopwatch = Stopwatch::start();
        let path = protocol.request_path(project_key);
        let response = self.transport.get(&path).await?;

        let delivered = match protocol {
            SettingsProtocol::SettingsValues => {
                let settings = self.codec.decode_settings_values(&response.body)?;
                consume_settings_values(settings, sink)?
            }
            SettingsProtocol::LegacyProperties => {
                let properties = self.codec.decode_properties(&response.body)?;
                consume_properties(properties, DiffFilter::from_reference(reference), sink)
            }
        };

        debug!(?protocol, project_key, delivered, "settings delivered to sink");
        stopwatch.finish(
            self.observer.as_ref(),
            FetchResource::Settings {
                protocol: protocol.generation(),
                project_key: project_key.map(str::to_string),
            },
        );
        Ok(())
    }
}

/// Flatten every non-inherited setting into the sink; returns the number of pairs delivered
fn consume_settings_values(
    settings: Vec<RemoteSetting>,
    sink: &mut dyn SettingsSink,
) -> Result<usize, SyncError> {
    let mut delivered = 0;
    for setting in settings {
        // Storage optimisation: inherited values are already known from the global scope
        if setting.inherited {
            continue;
        }
        let record = setting.into_record()?;
        delivered += flatten_into(&record, sink);
    }
    Ok(delivered)
}

/// Push the properties the filter keeps into the sink; returns the number delivered
fn consume_properties(
    properties: Vec<LegacyProperty>,
    filter: DiffFilter<'_>,
    sink: &mut dyn SettingsSink,
) -> usize {
    let mut delivered = 0;
    for property in properties {
        if !filter.keep(&property.key, property.value.as_deref()) {
            continue;
        }
        match property.value {
            Some(value) => {
                sink.put(property.key, value);
                delivered += 1;
            }
            None => debug!(key = %property.key, "skipping property without value"),
        }
    }
    delivered
}
