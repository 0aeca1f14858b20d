//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models, the sink abstraction and
//! the native client trait.

pub mod client;
pub mod error;
pub mod model;

pub use client::{ServerSyncApi, SettingsSink};
pub use error::{SyncError, TransportError};
pub use model::{
    FieldGroup, FlatSetting, GlobalSettingsBuilder, GlobalSettingsSnapshot, LegacyProperty,
    ProjectConfiguration, ProjectConfigurationBuilder, QualityProfileRef, RemoteSetting,
    SettingRecord, SettingValue,
};
