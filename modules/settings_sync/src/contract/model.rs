//! Contract models for settings sync
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - wire representations live in `infra::wire`.

use indexmap::IndexMap;
use std::collections::BTreeMap;

/// One repeated group of a field-set setting, in declaration order
pub type FieldGroup = IndexMap<String, String>;

/// Value shapes a setting can take on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// Single string value
    Scalar(String),
    /// Ordered list of values
    Multi(Vec<String>),
    /// Ordered list of field groups (a "property set")
    FieldSet(Vec<FieldGroup>),
}

/// A setting with a resolved value shape, ready to be flattened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRecord {
    /// Setting key (non-empty, unique within one response)
    pub key: String,
    /// Setting value
    pub value: SettingValue,
}

impl SettingRecord {
    pub fn scalar(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: SettingValue::Scalar(value.into()),
        }
    }

    pub fn multi<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            value: SettingValue::Multi(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn field_set(key: impl Into<String>, groups: Vec<FieldGroup>) -> Self {
        Self {
            key: key.into(),
            value: SettingValue::FieldSet(groups),
        }
    }
}

/// A setting as decoded from the settings values web service
///
/// `value` is `None` when the payload carried no value shape at all, or
/// several of them at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSetting {
    /// Setting key
    pub key: String,
    /// Whether the server reports the value as inherited from a parent scope
    pub inherited: bool,
    /// Resolved value shape
    pub value: Option<SettingValue>,
}

/// A key/value pair as returned by the legacy properties web service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyProperty {
    /// Property key
    pub key: String,
    /// Property value, absent when the server omitted it
    pub value: Option<String>,
}

/// A flattened key/value pair of the persisted model
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlatSetting {
    pub key: String,
    pub value: String,
}

impl FlatSetting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Immutable view of global-scope settings
///
/// Used as the reference when computing which project settings are worth
/// persisting. Never mutated once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalSettingsSnapshot {
    properties: BTreeMap<String, String>,
}

impl GlobalSettingsSnapshot {
    pub fn builder() -> GlobalSettingsBuilder {
        GlobalSettingsBuilder::default()
    }

    /// Value of a global setting
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate settings in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

impl<K, V> FromIterator<(K, V)> for GlobalSettingsSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Accumulates global settings during a fetch
#[derive(Debug, Default)]
pub struct GlobalSettingsBuilder {
    properties: BTreeMap<String, String>,
}

impl GlobalSettingsBuilder {
    pub fn put_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn build(self) -> GlobalSettingsSnapshot {
        GlobalSettingsSnapshot {
            properties: self.properties,
        }
    }
}

/// Project-scope settings that differ from the global ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfiguration {
    /// Project key
    pub project_key: String,
    properties: BTreeMap<String, String>,
}

impl ProjectConfiguration {
    pub fn builder(project_key: impl Into<String>) -> ProjectConfigurationBuilder {
        ProjectConfigurationBuilder {
            project_key: project_key.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Value stored at project scope
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Value a consumer sees: the project value, falling back to the global one
    pub fn effective_value<'a>(
        &'a self,
        key: &str,
        global: &'a GlobalSettingsSnapshot,
    ) -> Option<&'a str> {
        self.get(key).or_else(|| global.get(key))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}

/// Accumulates project settings during a fetch
#[derive(Debug)]
pub struct ProjectConfigurationBuilder {
    project_key: String,
    properties: BTreeMap<String, String>,
}

impl ProjectConfigurationBuilder {
    pub fn put_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn build(self) -> ProjectConfiguration {
        ProjectConfiguration {
            project_key: self.project_key,
            properties: self.properties,
        }
    }
}

/// Quality profile associated with a project, as reported by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityProfileRef {
    /// Profile key
    pub key: String,
    /// Profile display name
    pub name: String,
    /// Language key (e.g. "java")
    pub language: String,
    /// Language display name
    pub language_name: Option<String>,
    /// Whether this is the default profile of its language
    pub is_default: bool,
    /// Whether the profile inherits from a parent profile
    pub is_inherited: bool,
    /// Parent profile key, when inherited
    pub parent_key: Option<String>,
    /// Number of active rules
    pub active_rule_count: Option<u64>,
    /// Last time rules were updated, as sent by the server
    pub rules_updated_at: Option<String>,
    /// Last time a user edited the profile, as sent by the server
    pub user_updated_at: Option<String>,
}
