//! Conversions between wire DTOs and contract models

use super::dto::{PropertyDto, QualityProfileDto, SettingDto};
use crate::contract::{LegacyProperty, QualityProfileRef, RemoteSetting, SettingValue};

// ===== Setting conversions =====

impl From<SettingDto> for RemoteSetting {
    fn from(dto: SettingDto) -> Self {
        let value = match (dto.value, dto.values, dto.field_values) {
            (Some(value), None, None) => Some(SettingValue::Scalar(value)),
            (None, Some(values), None) => Some(SettingValue::Multi(values)),
            (None, None, Some(groups)) => Some(SettingValue::FieldSet(groups)),
            _ => None,
        };

        Self {
            key: dto.key,
            inherited: dto.inherited,
            value,
        }
    }
}

impl From<PropertyDto> for LegacyProperty {
    fn from(dto: PropertyDto) -> Self {
        Self {
            key: dto.key,
            value: dto.value,
        }
    }
}

// ===== Quality profile conversions =====

impl From<QualityProfileDto> for QualityProfileRef {
    fn from(dto: QualityProfileDto) -> Self {
        Self {
            key: dto.key,
            name: dto.name,
            language: dto.language,
            language_name: dto.language_name,
            is_default: dto.is_default,
            is_inherited: dto.is_inherited,
            parent_key: dto.parent_key,
            active_rule_count: dto.active_rule_count,
            rules_updated_at: dto.rules_updated_at,
            user_updated_at: dto.user_updated_at,
        }
    }
}
