use rpcwire_frame::Message;
use serde::Serialize;
use serde_json::Value;

use crate::envelope::{Envelope, RequestId, ResponseError};
use crate::error::Result;

fn to_message(envelope: &Envelope) -> Result<Message> {
    let body = serde_json::to_vec(envelope)?;
    Ok(Message::new(body)?)
}

fn to_params<P: Serialize>(params: Option<P>) -> Result<Option<Value>> {
    params
        .map(serde_json::to_value)
        .transpose()
        .map_err(Into::into)
}

/// Frame a request expecting a response.
pub fn encode_request<P: Serialize>(
    id: RequestId,
    method: &str,
    params: Option<P>,
) -> Result<Message> {
    to_message(&Envelope::request(id, method, to_params(params)?))
}

/// Frame a notification.
pub fn encode_notification<P: Serialize>(method: &str, params: Option<P>) -> Result<Message> {
    to_message(&Envelope::notification(method, to_params(params)?))
}

/// Frame a successful response.
pub fn encode_response<R: Serialize>(id: RequestId, result: R) -> Result<Message> {
    to_message(&Envelope::response(id, serde_json::to_value(result)?))
}

/// Frame an error response. `id` is `None` when the request id is unknown,
/// and is then written as `"id": null`.
pub fn encode_error(
    id: Option<RequestId>,
    code: i64,
    message: impl Into<String>,
) -> Result<Message> {
    to_message(&Envelope::error(
        id,
        ResponseError {
            code,
            message: message.into(),
            data: None,
        },
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::command::Command;
    use crate::decode::decode_command;
    use crate::error::{METHOD_NOT_FOUND, PARSE_ERROR};

    #[test]
    fn response_body_and_length() {
        let message = encode_response(RequestId::Number(1), json!({"ok": true})).unwrap();

        assert_eq!(
            message.body().as_ref(),
            br#"{"jsonrpc":"2.0","id":1,"result":{"ok":true}}"#
        );
        assert_eq!(
            message.header().content_length(),
            message.body().len() as i64
        );
    }

    #[test]
    fn null_result_is_written() {
        let message = encode_response(RequestId::Number(2), Value::Null).unwrap();
        assert_eq!(
            message.body().as_ref(),
            br#"{"jsonrpc":"2.0","id":2,"result":null}"#
        );

        assert_eq!(
            decode_command(&message).unwrap(),
            Command::Response {
                id: Some(RequestId::Number(2)),
                result: Some(Value::Null),
                error: None
            }
        );
    }

    #[test]
    fn error_without_request_id_writes_null_id() {
        let message = encode_error(None, PARSE_ERROR, "parse error").unwrap();
        assert_eq!(
            message.body().as_ref(),
            br#"{"jsonrpc":"2.0","id":null,"error":{"code":-32700,"message":"parse error"}}"#
        );

        match decode_command(&message).unwrap() {
            Command::Response { id, result, error } => {
                assert_eq!(id, None);
                assert!(result.is_none());
                assert_eq!(error.unwrap().code, PARSE_ERROR);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn error_response_decodes() {
        let message = encode_error(
            Some(RequestId::from("x")),
            METHOD_NOT_FOUND,
            "no such method",
        )
        .unwrap();

        match decode_command(&message).unwrap() {
            Command::Response { id, result, error } => {
                assert_eq!(id, Some(RequestId::from("x")));
                assert!(result.is_none());
                let error = error.unwrap();
                assert_eq!(error.code, METHOD_NOT_FOUND);
                assert_eq!(error.message, "no such method");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn notification_and_request_decode() {
        let exit = encode_notification::<Value>("exit", None).unwrap();
        assert_eq!(decode_command(&exit).unwrap(), Command::Exit);

        let shutdown = encode_request::<Value>(RequestId::Number(3), "shutdown", None).unwrap();
        assert_eq!(
            decode_command(&shutdown).unwrap(),
            Command::Shutdown {
                id: RequestId::Number(3)
            }
        );
    }
}
