//! Closed vocabulary of editor/server commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::{RequestId, ResponseError};

/// Method names recognised by [`decode_command`](crate::decode_command).
pub mod methods {
    pub const INITIALIZE: &str = "initialize";
    pub const INITIALIZED: &str = "initialized";
    pub const SHUTDOWN: &str = "shutdown";
    pub const EXIT: &str = "exit";
    pub const CANCEL_REQUEST: &str = "$/cancelRequest";
    pub const DID_OPEN: &str = "textDocument/didOpen";
    pub const DID_CHANGE: &str = "textDocument/didChange";
    pub const DID_CLOSE: &str = "textDocument/didClose";
    pub const DID_SAVE: &str = "textDocument/didSave";
    pub const HOVER: &str = "textDocument/hover";
    pub const COMPLETION: &str = "textDocument/completion";
    pub const DEFINITION: &str = "textDocument/definition";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDocumentIdentifier {
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedTextDocumentIdentifier {
    pub uri: String,
    pub version: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDocumentItem {
    pub uri: String,
    pub language_id: String,
    pub version: i32,
    pub text: String,
}

/// A full-document replacement when `range` is absent, otherwise an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default)]
    pub process_id: Option<u32>,
    #[serde(default)]
    pub root_uri: Option<String>,
    #[serde(default)]
    pub capabilities: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelParams {
    pub id: RequestId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidOpenParams {
    pub text_document: TextDocumentItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidChangeParams {
    pub text_document: VersionedTextDocumentIdentifier,
    pub content_changes: Vec<ContentChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidCloseParams {
    pub text_document: TextDocumentIdentifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidSaveParams {
    pub text_document: TextDocumentIdentifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDocumentPositionParams {
    pub text_document: TextDocumentIdentifier,
    pub position: Position,
}

/// A decoded message body.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Initialize {
        id: RequestId,
        params: InitializeParams,
    },
    Initialized,
    Shutdown {
        id: RequestId,
    },
    Exit,
    CancelRequest(CancelParams),
    DidOpen(DidOpenParams),
    DidChange(DidChangeParams),
    DidClose(DidCloseParams),
    DidSave(DidSaveParams),
    Hover {
        id: RequestId,
        params: TextDocumentPositionParams,
    },
    Completion {
        id: RequestId,
        params: TextDocumentPositionParams,
    },
    Definition {
        id: RequestId,
        params: TextDocumentPositionParams,
    },
    /// Reply to an earlier request; carries either `result` or `error`.
    ///
    /// `id` is `None` for an error reply to a request whose id was unknown,
    /// and `result` is `Some(Value::Null)` for an explicit `null` result.
    Response {
        id: Option<RequestId>,
        result: Option<Value>,
        error: Option<ResponseError>,
    },
    /// Any method outside the vocabulary, kept verbatim.
    Other {
        id: Option<RequestId>,
        method: String,
        params: Option<Value>,
    },
}

impl Command {
    /// Method name, or `None` for responses.
    pub fn method(&self) -> Option<&str> {
        let method = match self {
            Command::Initialize { .. } => methods::INITIALIZE,
            Command::Initialized => methods::INITIALIZED,
            Command::Shutdown { .. } => methods::SHUTDOWN,
            Command::Exit => methods::EXIT,
            Command::CancelRequest(_) => methods::CANCEL_REQUEST,
            Command::DidOpen(_) => methods::DID_OPEN,
            Command::DidChange(_) => methods::DID_CHANGE,
            Command::DidClose(_) => methods::DID_CLOSE,
            Command::DidSave(_) => methods::DID_SAVE,
            Command::Hover { .. } => methods::HOVER,
            Command::Completion { .. } => methods::COMPLETION,
            Command::Definition { .. } => methods::DEFINITION,
            Command::Response { .. } => return None,
            Command::Other { method, .. } => method.as_str(),
        };
        Some(method)
    }

    /// Request id, or `None` for notifications.
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            Command::Initialize { id, .. }
            | Command::Shutdown { id }
            | Command::Hover { id, .. }
            | Command::Completion { id, .. }
            | Command::Definition { id, .. } => Some(id),
            Command::Response { id, .. } | Command::Other { id, .. } => id.as_ref(),
            Command::Initialized
            | Command::Exit
            | Command::CancelRequest(_)
            | Command::DidOpen(_)
            | Command::DidChange(_)
            | Command::DidClose(_)
            | Command::DidSave(_) => None,
        }
    }

    /// Whether the sender expects a response.
    pub fn is_request(&self) -> bool {
        !matches!(self, Command::Response { .. }) && self.id().is_some()
    }
}
