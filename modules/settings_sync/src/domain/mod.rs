//! Domain layer - protocol selection, flattening, diffing and fetchers

pub mod codec;
pub mod diff;
pub mod events;
pub mod flatten;
pub mod quality_profiles;
pub mod service;
pub mod settings;
pub mod transport;
pub mod version;

pub use codec::SettingsCodec;
pub use diff::DiffFilter;
pub use events::{FetchEvent, FetchObserver, FetchResource, TracingFetchObserver};
pub use quality_profiles::QualityProfileFetcher;
pub use service::SyncService;
pub use settings::{SettingsFetcher, SettingsProtocol};
pub use transport::{MockTransport, Transport, TransportError, TransportResponse};
pub use version::{select_protocol, Protocol, ServerVersion};
