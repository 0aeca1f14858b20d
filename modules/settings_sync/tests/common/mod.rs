//! Common test utilities: server versions, payload fixtures and a recording observer

#![allow(dead_code)]

use parking_lot::Mutex;
use settings_sync::{
    FetchEvent, FetchObserver, JsonCodec, MockTransport, QualityProfileFetcher, ServerVersion,
    SettingsFetcher,
};
use std::sync::Arc;

pub const PROJECT_KEY: &str = "org.example:my-project";
pub const PROJECT_KEY_ENCODED: &str = "org.example%3Amy-project";

/// Route `tracing` output to the test harness; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn version(s: &str) -> ServerVersion {
    ServerVersion::parse(s).unwrap()
}

pub fn settings_fetcher(transport: &MockTransport) -> SettingsFetcher {
    SettingsFetcher::new(Arc::new(transport.clone()), Arc::new(JsonCodec))
}

pub fn quality_profile_fetcher(
    transport: &MockTransport,
    organization: Option<&str>,
) -> QualityProfileFetcher {
    QualityProfileFetcher::new(
        Arc::new(transport.clone()),
        Arc::new(JsonCodec),
        organization.map(str::to_string),
    )
}

/// Global settings as returned by a modern server
pub const MODERN_GLOBAL_SETTINGS: &str = r#"{
  "settings": [
    {"key": "sonar.core.serverBaseURL", "value": "https://sonar.example.com", "inherited": false},
    {"key": "sonar.java.file.suffixes", "values": [".java", ".jav"], "inherited": false},
    {"key": "sonar.issue.ignore.multicriteria", "fieldValues": [
      {"ruleKey": "java:S100", "resourceKey": "**/generated/**"},
      {"ruleKey": "*", "resourceKey": "**/test/**"}
    ]}
  ]
}"#;

/// Project settings of a modern server: one value inherited, one overridden
pub const MODERN_PROJECT_SETTINGS: &str = r#"{
  "settings": [
    {"key": "debt", "value": "5", "inherited": true},
    {"key": "foo", "value": "bar", "inherited": false}
  ]
}"#;

pub const LEGACY_GLOBAL_PROPERTIES: &str = r#"[
  {"key": "x", "value": "1"},
  {"key": "sonar.exclusions", "value": "**/gen/**"}
]"#;

pub const LEGACY_PROJECT_PROPERTIES: &str = r#"[
  {"key": "x", "value": "1"},
  {"key": "y", "value": "2"}
]"#;

pub const QUALITY_PROFILES: &str = r#"{
  "profiles": [
    {"key": "java-sonar-way-12345", "name": "Sonar way", "language": "java",
     "languageName": "Java", "isDefault": true, "activeRuleCount": 290},
    {"key": "js-strict-67890", "name": "Strict", "language": "js",
     "languageName": "JavaScript", "isInherited": true, "parentKey": "js-sonar-way-1"}
  ]
}"#;

/// Observer collecting every fetch event
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<FetchEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FetchEvent> {
        self.events.lock().clone()
    }
}

impl FetchObserver for RecordingObserver {
    fn on_fetch(&self, event: &FetchEvent) {
        self.events.lock().push(event.clone());
    }
}
