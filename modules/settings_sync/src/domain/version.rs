//! Server versions and the protocol gate
//!
//! Versions compare on their numeric components only. Qualifiers such as
//! `-RC1` or `-SNAPSHOT` never influence which protocol gets selected.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// First server version exposing the settings values web service
pub const SETTINGS_API_MIN_VERSION: ServerVersion = ServerVersion::from_parts(6, 3, 0, 0);

/// First server version expecting `project` instead of `projectKey` when
/// searching quality profiles
pub const QUALITY_PROFILE_PROJECT_PARAM_MIN_VERSION: ServerVersion =
    ServerVersion::from_parts(6, 5, 0, 0);

const MAX_COMPONENTS: usize = 4;

/// Error returned when a version string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("version string is empty")]
    Empty,

    #[error("invalid version component '{component}' in '{version}'")]
    InvalidComponent { version: String, component: String },

    #[error("version '{0}' has more than 4 numeric components")]
    TooManyComponents(String),
}

/// Dotted server version with an optional qualifier (e.g. `6.3-RC1`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerVersion {
    /// major, minor, patch, build; missing components are zero
    numbers: [u64; MAX_COMPONENTS],
    /// Text after the first `-`, empty when absent
    qualifier: String,
}

impl ServerVersion {
    pub const fn from_parts(major: u64, minor: u64, patch: u64, build: u64) -> Self {
        Self {
            numbers: [major, minor, patch, build],
            qualifier: String::new(),
        }
    }

    pub fn parse(version: &str) -> Result<Self, VersionParseError> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let (numeric, qualifier) = match trimmed.split_once('-') {
            Some((numeric, qualifier)) => (numeric, qualifier),
            None => (trimmed, ""),
        };

        let mut numbers = [0u64; MAX_COMPONENTS];
        for (i, component) in numeric.split('.').enumerate() {
            if i >= MAX_COMPONENTS {
                return Err(VersionParseError::TooManyComponents(trimmed.to_string()));
            }
            numbers[i] = component
                .parse()
                .map_err(|_| VersionParseError::InvalidComponent {
                    version: trimmed.to_string(),
                    component: component.to_string(),
                })?;
        }

        Ok(Self {
            numbers,
            qualifier: qualifier.to_string(),
        })
    }

    pub fn major(&self) -> u64 {
        self.numbers[0]
    }

    pub fn minor(&self) -> u64 {
        self.numbers[1]
    }

    pub fn patch(&self) -> u64 {
        self.numbers[2]
    }

    pub fn build(&self) -> u64 {
        self.numbers[3]
    }

    pub fn qualifier(&self) -> Option<&str> {
        (!self.qualifier.is_empty()).then_some(self.qualifier.as_str())
    }

    /// Numeric ordering, ignoring qualifiers
    pub fn compare_ignore_qualifier(&self, other: &Self) -> Ordering {
        self.numbers.cmp(&other.numbers)
    }

    /// `self >= threshold`, ignoring qualifiers
    pub fn is_at_least(&self, threshold: &Self) -> bool {
        self.compare_ignore_qualifier(threshold) != Ordering::Less
    }
}

impl FromStr for ServerVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, patch, build] = self.numbers;
        write!(f, "{major}.{minor}")?;
        if patch != 0 || build != 0 {
            write!(f, ".{patch}")?;
        }
        if build != 0 {
            write!(f, ".{build}")?;
        }
        if !self.qualifier.is_empty() {
            write!(f, "-{}", self.qualifier)?;
        }
        Ok(())
    }
}

/// Wire protocol generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Spoken by servers older than the threshold
    Legacy,
    /// Spoken by servers at or above the threshold
    Modern,
}

/// Choose the protocol generation for `server_version` given the version
/// that introduced the modern variant.
pub fn select_protocol(server_version: &ServerVersion, threshold: &ServerVersion) -> Protocol {
    if server_version.is_at_least(threshold) {
        Protocol::Modern
    } else {
        Protocol::Legacy
    }
}
