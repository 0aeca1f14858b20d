//! Settings Sync Module
//!
//! Downloads analysis settings and quality profiles from a remote analysis
//! server and reshapes them into a flat key/value model. Two generations of
//! the settings web API are supported; the server version decides which one
//! is spoken.

// Public exports
pub mod contract;
pub use contract::{
    client::{ServerSyncApi, SettingsSink},
    error::SyncError,
    FieldGroup, FlatSetting, GlobalSettingsBuilder, GlobalSettingsSnapshot, LegacyProperty,
    ProjectConfiguration, ProjectConfigurationBuilder, QualityProfileRef, RemoteSetting,
    SettingRecord, SettingValue,
};

pub mod domain;
pub use domain::{
    events::{FetchEvent, FetchObserver, FetchResource, TracingFetchObserver},
    transport::{MockTransport, Transport, TransportError, TransportResponse},
    version::{select_protocol, Protocol, ServerVersion, VersionParseError},
    DiffFilter, QualityProfileFetcher, SettingsCodec, SettingsFetcher, SettingsProtocol,
    SyncService,
};

pub mod module;
pub use module::{ProjectSync, SettingsSyncModule};

pub mod config;
pub use config::Config;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod infra;
pub use infra::JsonCodec;
