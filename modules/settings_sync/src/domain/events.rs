//! Fetch timing events
//!
//! Every completed download produces one [`FetchEvent`] handed to the
//! configured [`FetchObserver`]. The default observer writes a log line;
//! callers can plug in their own to collect metrics.

use super::version::Protocol;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::Level;

/// What was downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResource {
    /// Settings, global or for one project
    Settings {
        protocol: Protocol,
        project_key: Option<String>,
    },
    /// Quality profiles of one project
    QualityProfiles { project_key: String },
}

impl fmt::Display for FetchResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings {
                project_key: Some(key),
                ..
            } => write!(f, "project settings of '{key}'"),
            Self::Settings { .. } => write!(f, "global settings"),
            Self::QualityProfiles { project_key } => {
                write!(f, "quality profiles of '{project_key}'")
            }
        }
    }
}

/// A completed download and how long it took (request and decoding)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchEvent {
    pub resource: FetchResource,
    pub elapsed: Duration,
}

impl FetchEvent {
    /// Elapsed time in milliseconds, saturating at `u64::MAX`
    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Observer notified after every successful fetch
pub trait FetchObserver: Send + Sync {
    fn on_fetch(&self, event: &FetchEvent);
}

impl<F> FetchObserver for F
where
    F: Fn(&FetchEvent) + Send + Sync,
{
    fn on_fetch(&self, event: &FetchEvent) {
        self(event)
    }
}

/// Logs every fetch through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFetchObserver;

impl TracingFetchObserver {
    /// Modern settings downloads are reported at INFO, everything else at DEBUG
    pub fn level(resource: &FetchResource) -> Level {
        match resource {
            FetchResource::Settings {
                protocol: Protocol::Modern,
                ..
            } => Level::INFO,
            _ => Level::DEBUG,
        }
    }
}

impl FetchObserver for TracingFetchObserver {
    fn on_fetch(&self, event: &FetchEvent) {
        let elapsed_ms = event.elapsed_millis();
        if Self::level(&event.resource) == Level::INFO {
            tracing::info!(elapsed_ms, "Downloaded {} in {}ms", event.resource, elapsed_ms);
        } else {
            tracing::debug!(elapsed_ms, "Downloaded {} in {}ms", event.resource, elapsed_ms);
        }
    }
}

/// Measures the time between creation and [`Stopwatch::finish`]
pub(crate) struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub(crate) fn finish(self, observer: &dyn FetchObserver, resource: FetchResource) {
        observer.on_fetch(&FetchEvent {
            resource,
            elapsed: self.started.elapsed(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_closure_observer_receives_event() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let observer = move |event: &FetchEvent| sink.lock().push(event.clone());

        Stopwatch::start().finish(
            &observer,
            FetchResource::QualityProfiles {
                project_key: "p".to_string(),
            },
        );

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].resource,
            FetchResource::QualityProfiles {
                project_key: "p".to_string()
            }
        );
    }

    #[test]
    fn test_resource_display() {
        let global = FetchResource::Settings {
            protocol: Protocol::Modern,
            project_key: None,
        };
        assert_eq!(global.to_string(), "global settings");

        let project = FetchResource::Settings {
            protocol: Protocol::Legacy,
            project_key: Some("p".to_string()),
        };
        assert_eq!(project.to_string(), "project settings of 'p'");
    }

    #[test]
    fn test_log_level_per_resource() {
        let modern = FetchResource::Settings {
            protocol: Protocol::Modern,
            project_key: Some("p".to_string()),
        };
        let legacy = FetchResource::Settings {
            protocol: Protocol::Legacy,
            project_key: None,
        };
        let profiles = FetchResource::QualityProfiles {
            project_key: "p".to_string(),
        };

        assert_eq!(TracingFetchObserver::level(&modern), Level::INFO);
        assert_eq!(TracingFetchObserver::level(&legacy), Level::DEBUG);
        assert_eq!(TracingFetchObserver::level(&profiles), Level::DEBUG);
    }

    #[test]
    fn test_elapsed_millis_saturates() {
        let event = |elapsed: Duration| FetchEvent {
            resource: FetchResource::QualityProfiles {
                project_key: "p".to_string(),
            },
            elapsed,
        };

        assert_eq!(event(Duration::from_millis(1500)).elapsed_millis(), 1500);
        assert_eq!(event(Duration::MAX).elapsed_millis(), u64::MAX);
    }

    #[test]
    fn test_tracing_observer_does_not_panic_without_subscriber() {
        TracingFetchObserver.on_fetch(&FetchEvent {
            resource: FetchResource::Settings {
                protocol: Protocol::Modern,
                project_key: None,
            },
            elapsed: Duration::from_millis(12),
        });
    }
}
