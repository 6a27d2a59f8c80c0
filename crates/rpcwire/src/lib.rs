//! Content-Length framing for JSON-RPC byte streams.
//!
//! rpcwire turns an arbitrarily chunked byte stream into complete messages
//! and, optionally, decodes message bodies into a closed command vocabulary.
//!
//! # Crate Structure
//!
//! - [`frame`]: header parser, incremental framer and blocking reader/writer
//! - [`protocol`]: JSON-RPC envelopes and editor commands (behind `protocol` feature)

/// Re-export frame types.
pub mod frame {
    pub use rpcwire_frame::*;
}

/// Re-export protocol types (requires `protocol` feature).
#[cfg(feature = "protocol")]
pub mod protocol {
    pub use rpcwire_protocol::*;
}
