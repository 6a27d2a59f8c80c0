use std::fs::File;
use std::io::Read;

use rpcwire_frame::{FrameConfig, FrameError, Message, MessageReader};
use rpcwire_protocol::decode_command;

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_message, CommandSummary, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    if args.chunk_size == 0 {
        return Err(CliError::new(USAGE, "--chunk-size must be greater than zero"));
    }

    let input: Box<dyn Read> = match &args.file {
        Some(path) => Box::new(File::open(path).map_err(|err| {
            io_error(&format!("failed opening {}", path.display()), err)
        })?),
        None => Box::new(std::io::stdin().lock()),
    };
    let config = FrameConfig {
        read_chunk_size: args.chunk_size,
        ..FrameConfig::default()
    };

    let printed = decode_stream(input, config, &args, format)?;
    tracing::debug!(messages = printed, "decode finished");
    Ok(SUCCESS)
}

fn decode_stream<R: Read>(
    input: R,
    config: FrameConfig,
    args: &DecodeArgs,
    format: OutputFormat,
) -> CliResult<usize> {
    let mut reader = MessageReader::with_config(input, config);
    let mut printed = 0usize;

    loop {
        if args.count.is_some_and(|count| printed >= count) {
            return Ok(printed);
        }

        let message = match reader.read_message() {
            Ok(message) => message,
            Err(FrameError::ConnectionClosed) => {
                let buffered = reader.buffered_len();
                if buffered > 0 {
                    return Err(CliError::new(
                        DATA_INVALID,
                        format!("input ended inside a message ({buffered} bytes buffered)"),
                    ));
                }
                return Ok(printed);
            }
            Err(err) => return Err(frame_error("decode failed", err)),
        };

        let summary = args.commands.then(|| summarize(&message));
        print_message(printed, &message, summary.as_ref(), format);
        printed = printed.saturating_add(1);
    }
}

fn summarize(message: &Message) -> CommandSummary {
    match decode_command(message) {
        Ok(command) => {
            let kind = if command.is_request() {
                "request"
            } else if command.method().is_some() {
                "notification"
            } else {
                "response"
            };
            CommandSummary {
                kind,
                method: command.method().map(str::to_string),
                id: command.id().map(ToString::to_string),
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, rpc_code = err.rpc_code(), "body is not a valid command");
            CommandSummary {
                kind: "invalid",
                method: None,
                id: None,
                error: Some(err.to_string()),
            }
        }
    }
}
