/// Errors that can occur while framing messages.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The header block contains a byte that is not allowed at its position.
    #[error("malformed header: unexpected byte 0x{byte:02x} at offset {position}")]
    MalformedHeader { byte: u8, position: usize },

    /// A header field has a value that is empty after trimming.
    #[error("empty value for header field {field:?} at offset {position}")]
    EmptyHeaderValue { field: String, position: usize },

    /// `Content-Length` is missing, not a number, or not positive.
    #[error("invalid Content-Length ({})", .value.as_deref().unwrap_or("missing"))]
    InvalidContentLength { value: Option<String> },

    /// An outgoing header field cannot be written as a valid header line.
    #[error("invalid header field {field:?}: {reason}")]
    InvalidField { field: String, reason: &'static str },

    /// An outgoing message has no body; `Content-Length: 0` is never framed.
    #[error("message body is empty")]
    EmptyBody,

    /// The framer hit a fatal error earlier and no longer accepts input.
    #[error("framer is faulted by an earlier framing error")]
    Faulted,

    /// An I/O error occurred while reading or writing messages.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete message was received.
    #[error("connection closed (incomplete message)")]
    ConnectionClosed,
}

impl FrameError {
    /// Whether this error invalidates the stream's message boundaries.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FrameError::MalformedHeader { .. }
                | FrameError::EmptyHeaderValue { .. }
                | FrameError::InvalidContentLength { .. }
                | FrameError::Faulted
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
