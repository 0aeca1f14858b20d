//! Wire DTOs with serde derives for the server web services

use indexmap::IndexMap;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ===== Settings values web service =====

/// Response of `/api/settings/values`
#[derive(Debug, Clone, Deserialize)]
pub struct ValuesResponseDto {
    #[serde(default)]
    pub settings: Vec<SettingDto>,
}

/// One setting; exactly one of `value`, `values`, `field_values` is expected
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDto {
    pub key: String,

    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub values: Option<Vec<String>>,

    /// Field groups keep the server's field order
    #[serde(default)]
    pub field_values: Option<Vec<IndexMap<String, String>>>,

    #[serde(default)]
    pub inherited: bool,
}

// ===== Legacy properties web service =====

/// One entry of `/api/properties?format=json`
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDto {
    pub key: String,

    /// Numbers are kept as their textual form
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::invalid_type(
            Unexpected::Other(&other.to_string()),
            &"a string or a number",
        )),
    }
}

// ===== Quality profiles web service =====

/// Response of `/api/qualityprofiles/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchProfilesResponseDto {
    #[serde(default)]
    pub profiles: Vec<QualityProfileDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfileDto {
    pub key: String,
    pub name: String,
    pub language: String,

    #[serde(default)]
    pub language_name: Option<String>,

    #[serde(default)]
    pub is_default: bool,

    #[serde(default)]
    pub is_inherited: bool,

    #[serde(default)]
    pub parent_key: Option<String>,

    #[serde(default)]
    pub active_rule_count: Option<u64>,

    #[serde(default)]
    pub rules_updated_at: Option<String>,

    #[serde(default)]
    pub user_updated_at: Option<String>,
}
