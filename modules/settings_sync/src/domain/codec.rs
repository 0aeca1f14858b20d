//! Payload codec seam
//!
//! Fetchers hand raw response bodies to a [`SettingsCodec`] and only ever see
//! contract models. The JSON implementation lives in `infra::wire`.

use crate::contract::{LegacyProperty, QualityProfileRef, RemoteSetting, SyncError};

/// Decodes server responses into contract models
///
/// Implementations keep the order in which the server sent records and report
/// malformed payloads as [`SyncError::Decode`].
pub trait SettingsCodec: Send + Sync {
    /// Decode a settings values response
    fn decode_settings_values(&self, payload: &[u8]) -> Result<Vec<RemoteSetting>, SyncError>;

    /// Decode a legacy properties response
    fn decode_properties(&self, payload: &[u8]) -> Result<Vec<LegacyProperty>, SyncError>;

    /// Decode a quality profile search response
    fn decode_quality_profiles(&self, payload: &[u8])
        -> Result<Vec<QualityProfileRef>, SyncError>;
}
