//! Minimal language-server loop over stdin/stdout.
//!
//! Run with:
//!   cargo run --example stdio-server
//!
//! Then pipe framed requests into it, for example:
//!   cargo run --features cli -- encode \
//!     --json '{"jsonrpc":"2.0","id":1,"method":"shutdown"}' \
//!     | cargo run --example stdio-server

use std::io;

use rpcwire::frame::{FrameError, MessageReader, MessageWriter};
use rpcwire::protocol::{
    decode_command, encode_error, encode_response, error::METHOD_NOT_FOUND, Command,
};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = MessageReader::new(io::stdin().lock());
    let mut writer = MessageWriter::new(io::stdout().lock());

    loop {
        let message = match reader.read_message() {
            Ok(message) => message,
            Err(FrameError::ConnectionClosed) => break,
            Err(err) => return Err(err.into()),
        };

        let command = match decode_command(&message) {
            Ok(command) => command,
            Err(err) => {
                writer.write_message(&encode_error(None, err.rpc_code(), err.to_string())?)?;
                continue;
            }
        };

        let reply = match command {
            Command::Initialize { id, .. } => {
                Some(encode_response(id, json!({"capabilities": {}}))?)
            }
            Command::Shutdown { id } => Some(encode_response(id, serde_json::Value::Null)?),
            Command::Exit => break,
            Command::Other { id: Some(id), method, .. } => Some(encode_error(
                Some(id),
                METHOD_NOT_FOUND,
                format!("unhandled method {method}"),
            )?),
            other => {
                eprintln!("ignoring {}", other.method().unwrap_or("response"));
                None
            }
        };

        if let Some(reply) = reply {
            writer.write_message(&reply)?;
        }
    }

    writer.flush()?;
    Ok(())
}
