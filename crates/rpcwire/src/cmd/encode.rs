use std::fs;

use rpcwire_frame::{Message, MessageWriter};

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, SUCCESS, USAGE};

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let message = build_message(&args)?;

    let mut writer = MessageWriter::new(std::io::stdout().lock());
    writer
        .write_message(&message)
        .map_err(|err| frame_error("write failed", err))?;
    writer
        .flush()
        .map_err(|err| frame_error("flush failed", err))?;

    tracing::debug!(bytes = message.wire_size(), "message written");
    Ok(SUCCESS)
}

fn build_message(args: &EncodeArgs) -> CliResult<Message> {
    let payload = resolve_payload(args)?;
    let message = match &args.content_type {
        Some(content_type) => Message::with_content_type(payload, content_type),
        None => Message::new(payload),
    };
    message.map_err(|err| frame_error("invalid message", err))
}

fn resolve_payload(args: &EncodeArgs) -> CliResult<Vec<u8>> {
    if let Some(json) = &args.json {
        serde_json::from_str::<serde_json::Value>(json)
            .map_err(|err| CliError::new(USAGE, format!("--json is not valid JSON: {err}")))?;
        return Ok(json.as_bytes().to_vec());
    }
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "one of --json, --data or --file is required"))
}
