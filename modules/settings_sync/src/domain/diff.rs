//! Storage optimisation: skip project settings equal to the global ones

use crate::contract::GlobalSettingsSnapshot;

/// Decides whether a fetched setting is worth persisting
#[derive(Debug, Clone, Copy)]
pub enum DiffFilter<'a> {
    /// Global fetch: everything is kept
    KeepAll,
    /// Project fetch: values identical to the reference are dropped
    Reference(&'a GlobalSettingsSnapshot),
}

impl<'a> DiffFilter<'a> {
    pub fn from_reference(reference: Option<&'a GlobalSettingsSnapshot>) -> Self {
        reference.map_or(Self::KeepAll, Self::Reference)
    }

    /// Whether the pair should reach the sink.
    ///
    /// An absent value matches an absent reference entry, so such a pair is
    /// dropped. The server is assumed never to send an empty string in place
    /// of omitting a key.
    pub fn keep(&self, key: &str, value: Option<&str>) -> bool {
        match self {
            Self::KeepAll => true,
            Self::Reference(global) => value != global.get(key),
        }
    }
}
