use rpcwire_frame::Message;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::command::{methods, Command};
use crate::envelope::{Envelope, RequestId, JSONRPC_VERSION};
use crate::error::{ProtocolError, Result};

/// Decode a framed message body into a [`Command`].
pub fn decode_command(message: &Message) -> Result<Command> {
    check_charset(message.content_type())?;

    let envelope: Envelope = serde_json::from_slice(message.body())?;
    if envelope.jsonrpc != JSONRPC_VERSION {
        return Err(ProtocolError::InvalidEnvelope(format!(
            "unsupported jsonrpc version {:?}",
            envelope.jsonrpc
        )));
    }

    let command = command_from_envelope(envelope)?;
    tracing::debug!(
        method = command.method().unwrap_or("<response>"),
        id = ?command.id(),
        "command decoded"
    );
    Ok(command)
}

/// Accept a `Content-Type` whose charset is absent or UTF-8.
fn check_charset(content_type: &str) -> Result<()> {
    let charset = content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    });

    match charset {
        None => Ok(()),
        Some(cs) if cs.eq_ignore_ascii_case("utf-8") || cs.eq_ignore_ascii_case("utf8") => Ok(()),
        Some(cs) => Err(ProtocolError::UnsupportedCharset(cs.to_string())),
    }
}

fn command_from_envelope(envelope: Envelope) -> Result<Command> {
    let Envelope {
        id,
        method,
        params,
        result,
        error,
        ..
    } = envelope;

    let Some(method) = method else {
        let id = id.ok_or_else(|| {
            ProtocolError::InvalidEnvelope("message has neither method nor id".to_string())
        })?;
        if result.is_some() == error.is_some() {
            return Err(ProtocolError::InvalidEnvelope(format!(
                "response {} must carry exactly one of result and error",
                id.as_ref().map_or_else(|| "null".to_string(), ToString::to_string)
            )));
        }
        return Ok(Command::Response { id, result, error });
    };
    let id = id.flatten();

    let command = match method.as_str() {
        methods::INITIALIZE => Command::Initialize {
            id: require_id(&method, id)?,
            params: parse_params(&method, params)?,
        },
        methods::INITIALIZED => Command::Initialized,
        methods::SHUTDOWN => Command::Shutdown {
            id: require_id(&method, id)?,
        },
        methods::EXIT => Command::Exit,
        methods::CANCEL_REQUEST => Command::CancelRequest(parse_params(&method, params)?),
        methods::DID_OPEN => Command::DidOpen(parse_params(&method, params)?),
        methods::DID_CHANGE => Command::DidChange(parse_params(&method, params)?),
        methods::DID_CLOSE => Command::DidClose(parse_params(&method, params)?),
        methods::DID_SAVE => Command::DidSave(parse_params(&method, params)?),
        methods::HOVER => Command::Hover {
            id: require_id(&method, id)?,
            params: parse_params(&method, params)?,
        },
        methods::COMPLETION => Command::Completion {
            id: require_id(&method, id)?,
            params: parse_params(&method, params)?,
        },
        methods::DEFINITION => Command::Definition {
            id: require_id(&method, id)?,
            params: parse_params(&method, params)?,
        },
        _ => Command::Other { id, method, params },
    };
    Ok(command)
}

fn require_id(method: &str, id: Option<RequestId>) -> Result<RequestId> {
    id.ok_or_else(|| ProtocolError::InvalidEnvelope(format!("request {method} is missing an id")))
}

fn parse_params<T: DeserializeOwned>(method: &str, params: Option<Value>) -> Result<T> {
    serde_json::from_value(params.unwrap_or(Value::Null)).map_err(|source| {
        ProtocolError::InvalidParams {
            method: method.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use rpcwire_frame::Framer;

    use super::*;
    use crate::command::{Position, TextDocumentIdentifier};

    fn command(body: &str) -> Result<Command> {
        decode_command(&Message::new(body.to_string()).unwrap())
    }

    #[test]
    fn decodes_initialize_request() {
        let cmd = command(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize",
                "params":{"processId":42,"rootUri":"file:///ws","capabilities":{}}}"#,
        )
        .unwrap();

        match cmd {
            Command::Initialize { id, params } => {
                assert_eq!(id, RequestId::Number(1));
                assert_eq!(params.process_id, Some(42));
                assert_eq!(params.root_uri.as_deref(), Some("file:///ws"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn decodes_notifications_without_params() {
        assert_eq!(
            command(r#"{"jsonrpc":"2.0","method":"initialized","params":{}}"#).unwrap(),
            Command::Initialized
        );
        assert_eq!(
            command(r#"{"jsonrpc":"2.0","method":"exit"}"#).unwrap(),
            Command::Exit
        );
    }

    #[test]
    fn decodes_did_change() {
        let cmd = command(
            r#"{"jsonrpc":"2.0","method":"textDocument/didChange","params":{
                "textDocument":{"uri":"file:///a.rs","version":3},
                "contentChanges":[{"text":"fn main() {}"}]}}"#,
        )
        .unwrap();

        let Command::DidChange(params) = cmd else {
            panic!("expected didChange");
        };
        assert_eq!(params.text_document.version, 3);
        assert_eq!(params.content_changes.len(), 1);
        assert!(params.content_changes[0].range.is_none());
    }

    #[test]
    fn decodes_hover_with_string_id() {
        let cmd = command(
            r#"{"jsonrpc":"2.0","id":"h-1","method":"textDocument/hover","params":{
                "textDocument":{"uri":"file:///a.rs"},"position":{"line":4,"character":2}}}"#,
        )
        .unwrap();

        assert!(cmd.is_request());
        assert_eq!(cmd.method(), Some(methods::HOVER));
        match cmd {
            Command::Hover { id, params } => {
                assert_eq!(id, RequestId::from("h-1"));
                assert_eq!(
                    params.text_document,
                    TextDocumentIdentifier {
                        uri: "file:///a.rs".to_string()
                    }
                );
                assert_eq!(
                    params.position,
                    Position {
                        line: 4,
                        character: 2
                    }
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn decodes_response() {
        let cmd = command(r#"{"jsonrpc":"2.0","id":9,"result":null}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Response {
                id: Some(RequestId::Number(9)),
                result: Some(Value::Null),
                error: None
            }
        );
        assert_eq!(cmd.method(), None);
        assert_eq!(cmd.id(), Some(&RequestId::Number(9)));
        assert!(!cmd.is_request());
    }

    #[test]
    fn decodes_error_response_with_null_id() {
        let cmd = command(
            r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32700,"message":"parse error"}}"#,
        )
        .unwrap();

        match cmd {
            Command::Response { id, result, error } => {
                assert_eq!(id, None);
                assert!(result.is_none());
                assert_eq!(error.unwrap().code, crate::error::PARSE_ERROR);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn response_needs_exactly_one_outcome() {
        let err = command(r#"{"jsonrpc":"2.0","id":3}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidEnvelope(_)));

        let err = command(
            r#"{"jsonrpc":"2.0","id":3,"result":1,"error":{"code":1,"message":"x"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidEnvelope(_)));
    }

    #[test]
    fn request_with_null_id_rejected() {
        let err = command(r#"{"jsonrpc":"2.0","id":null,"method":"shutdown"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidEnvelope(_)));
    }

    #[test]
    fn unknown_method_is_kept() {
        let cmd = command(r#"{"jsonrpc":"2.0","id":5,"method":"custom/ping","params":[1]}"#)
            .unwrap();
        assert_eq!(cmd.method(), Some("custom/ping"));
        assert_eq!(cmd.id(), Some(&RequestId::Number(5)));
    }

    #[test]
    fn request_without_id_rejected() {
        let err = command(r#"{"jsonrpc":"2.0","method":"shutdown"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidEnvelope(_)));
    }

    #[test]
    fn bad_params_rejected() {
        let err = command(r#"{"jsonrpc":"2.0","method":"textDocument/didClose","params":{}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidParams { ref method, .. } if method == methods::DID_CLOSE
        ));
        assert_eq!(err.rpc_code(), crate::error::INVALID_PARAMS);
    }

    #[test]
    fn wrong_version_rejected() {
        let err = command(r#"{"jsonrpc":"1.0","method":"exit"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidEnvelope(_)));
    }

    #[test]
    fn invalid_json_rejected() {
        let err = command("{not json").unwrap_err();
        assert!(matches!(err, ProtocolError::Json(_)));
        assert_eq!(err.rpc_code(), crate::error::PARSE_ERROR);
    }

    #[test]
    fn charset_checks() {
        assert!(check_charset("application/vscode-jsonrpc; charset=utf-8").is_ok());
        assert!(check_charset("application/json; charset=\"UTF8\"").is_ok());
        assert!(check_charset("application/json").is_ok());
        assert!(matches!(
            check_charset("application/json; charset=latin1"),
            Err(ProtocolError::UnsupportedCharset(ref cs)) if cs == "latin1"
        ));
    }

    #[test]
    fn decodes_framed_stream() {
        let body = r#"{"jsonrpc":"2.0","method":"exit"}"#;
        let wire = format!("Content-Length: {}\r\n\r\n{body}", body.len());

        let messages = Framer::new().feed(wire.as_bytes()).unwrap();
        assert_eq!(decode_command(&messages[0]).unwrap(), Command::Exit);
    }
}
