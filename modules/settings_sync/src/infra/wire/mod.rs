//! JSON wire codec for the server web services, behind [`SettingsCodec`]
//!
//! Decoding keeps the order in which the server sent records. Any payload
//! that does not match the expected shape is reported as
//! [`SyncError::Decode`] carrying the raw payload.

pub mod dto;
pub mod mapper;

use crate::contract::{LegacyProperty, QualityProfileRef, RemoteSetting, SyncError};
use crate::domain::codec::SettingsCodec;
use dto::{PropertyDto, SearchProfilesResponseDto, ValuesResponseDto};

/// JSON codec for the server web services
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl SettingsCodec for JsonCodec {
    fn decode_settings_values(&self, payload: &[u8]) -> Result<Vec<RemoteSetting>, SyncError> {
        decode_settings_values(payload)
    }

    fn decode_properties(&self, payload: &[u8]) -> Result<Vec<LegacyProperty>, SyncError> {
        decode_properties(payload)
    }

    fn decode_quality_profiles(
        &self,
        payload: &[u8],
    ) -> Result<Vec<QualityProfileRef>, SyncError> {
        decode_quality_profiles(payload)
    }
}

/// Decode a `/api/settings/values` response
pub fn decode_settings_values(payload: &[u8]) -> Result<Vec<RemoteSetting>, SyncError> {
    let response: ValuesResponseDto = serde_json::from_slice(payload)
        .map_err(|e| SyncError::decode("settings", e, payload))?;

    if let Some(setting) = response.settings.iter().find(|s| s.key.is_empty()) {
        return Err(SyncError::decode(
            "settings",
            format!("setting without key (inherited={})", setting.inherited),
            payload,
        ));
    }

    Ok(response.settings.into_iter().map(Into::into).collect())
}

/// Decode a `/api/properties?format=json` response
pub fn decode_properties(payload: &[u8]) -> Result<Vec<LegacyProperty>, SyncError> {
    let properties: Vec<PropertyDto> = serde_json::from_slice(payload)
        .map_err(|e| SyncError::decode("properties", e, payload))?;

    if properties.iter().any(|p| p.key.is_empty()) {
        return Err(SyncError::decode("properties", "property without key", payload));
    }

    Ok(properties.into_iter().map(Into::into).collect())
}

/// Decode a `/api/qualityprofiles/search` response
pub fn decode_quality_profiles(payload: &[u8]) -> Result<Vec<QualityProfileRef>, SyncError> {
    let response: SearchProfilesResponseDto = serde_json::from_slice(payload)
        .map_err(|e| SyncError::decode("quality profiles", e, payload))?;

    Ok(response.profiles.into_iter().map(Into::into).collect())
}
