/// JSON-RPC error code: invalid JSON was received.
pub const PARSE_ERROR: i64 = -32700;
/// JSON-RPC error code: the JSON sent is not a valid request object.
pub const INVALID_REQUEST: i64 = -32600;
/// JSON-RPC error code: the method does not exist.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC error code: invalid method parameters.
pub const INVALID_PARAMS: i64 = -32602;
/// JSON-RPC error code: internal error.
pub const INTERNAL_ERROR: i64 = -32603;

/// Errors that can occur while decoding or encoding message bodies.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The message declares a charset other than UTF-8.
    #[error("unsupported charset {0:?}")]
    UnsupportedCharset(String),

    /// The body is not valid JSON, or could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is JSON but not a usable JSON-RPC 2.0 envelope.
    #[error("invalid JSON-RPC envelope: {0}")]
    InvalidEnvelope(String),

    /// The encoded body could not be framed.
    #[error("framing error: {0}")]
    Frame(#[from] rpcwire_frame::FrameError),

    /// A known method carried parameters of the wrong shape.
    #[error("invalid params for {method}: {source}")]
    InvalidParams {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ProtocolError {
    /// The JSON-RPC error code a server should answer with.
    pub fn rpc_code(&self) -> i64 {
        match self {
            ProtocolError::UnsupportedCharset(_) => INVALID_REQUEST,
            ProtocolError::Json(_) => PARSE_ERROR,
            ProtocolError::InvalidEnvelope(_) => INVALID_REQUEST,
            ProtocolError::InvalidParams { .. } => INVALID_PARAMS,
            ProtocolError::Frame(_) => INTERNAL_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
