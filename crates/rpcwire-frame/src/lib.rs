//! Incremental `Content-Length` message framing for JSON-RPC byte streams.
//!
//! Every message on the wire is a header block followed by a body:
//!
//! ```text
//! Content-Length: 17\r\n
//! Content-Type: application/vscode-jsonrpc; charset=utf-8\r\n
//! \r\n
//! {"method":"exit"}
//! ```
//!
//! [`Framer`] turns arbitrarily chunked input into complete [`Message`]s.
//! Bodies are opaque; interpreting them is left to the caller.
//!
//! ```
//! use rpcwire_frame::Framer;
//!
//! let mut framer = Framer::new();
//! assert!(framer.feed(b"Content-Le").unwrap().is_empty());
//!
//! let messages = framer.feed(b"ngth: 5\r\n\r\nhello").unwrap();
//! assert_eq!(messages[0].body().as_ref(), b"hello");
//! ```

#[cfg(feature = "async")]
pub mod codec;
pub mod config;
pub mod error;
pub mod framer;
pub mod header;
pub mod message;
pub mod reader;
pub mod writer;

#[cfg(feature = "async")]
pub use codec::MessageCodec;
pub use config::{FrameConfig, DEFAULT_BUFFER_CAPACITY, DEFAULT_READ_CHUNK_SIZE};
pub use error::{FrameError, Result};
pub use framer::{decode_message, Framer};
pub use header::{parse_header, Header, CONTENT_LENGTH, CONTENT_TYPE, DEFAULT_CONTENT_TYPE};
pub use message::{encode_message, Message};
pub use reader::MessageReader;
pub use writer::MessageWriter;
