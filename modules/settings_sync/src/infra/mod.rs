//! Infrastructure layer - HTTP transport and wire codecs

pub mod http;
pub mod wire;

pub use http::ReqwestTransport;
pub use wire::JsonCodec;
