//! JSON-RPC 2.0 envelopes and the editor command vocabulary.
//!
//! Takes the opaque bodies produced by `rpcwire-frame` and turns them into
//! [`Command`] values, and builds outgoing messages from typed values.

pub mod command;
pub mod decode;
pub mod encode;
pub mod envelope;
pub mod error;

pub use command::{methods, Command};
pub use decode::decode_command;
pub use encode::{encode_error, encode_notification, encode_request, encode_response};
pub use envelope::{Envelope, RequestId, ResponseError, JSONRPC_VERSION};
pub use error::{ProtocolError, Result};
