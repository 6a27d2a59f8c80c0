use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};
use crate::header::{Header, CONTENT_LENGTH, CONTENT_TYPE};

/// A framed message: decoded header plus an opaque body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    header: Header,
    body: Bytes,
}

impl Message {
    /// Create an outgoing message with only `Content-Length` set.
    ///
    /// Fails with [`FrameError::EmptyBody`] for an empty body.
    pub fn new(body: impl Into<Bytes>) -> Result<Self> {
        Self::from_parts(Header::new(), body)
    }

    /// Create an outgoing message with an explicit `Content-Type`.
    pub fn with_content_type(
        body: impl Into<Bytes>,
        content_type: impl AsRef<str>,
    ) -> Result<Self> {
        let mut header = Header::new();
        header.insert(CONTENT_TYPE, content_type)?;
        Self::from_parts(header, body)
    }

    /// Assemble a message, overwriting `Content-Length` with the body length.
    ///
    /// Every field of a [`Header`] is valid by construction, so the only
    /// check left is that the body is not empty.
    pub fn from_parts(mut header: Header, body: impl Into<Bytes>) -> Result<Self> {
        let body = body.into();
        if body.is_empty() {
            return Err(FrameError::EmptyBody);
        }
        header.insert_trusted(CONTENT_LENGTH.to_string(), body.len().to_string());
        Ok(Self { header, body })
    }

    /// Used by the decoder, where the header already matches the body.
    pub(crate) fn decoded(header: Header, body: Bytes) -> Self {
        Self { header, body }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Declared body media type.
    pub fn content_type(&self) -> &str {
        self.header.content_type()
    }

    pub fn into_parts(self) -> (Header, Bytes) {
        (self.header, self.body)
    }

    /// Total size of the message on the wire in canonical form.
    pub fn wire_size(&self) -> usize {
        self.header.to_string().len() + self.body.len()
    }
}

/// Encode a message into canonical wire form.
///
/// ```text
/// Content-Length: <n>\r\n
/// <other fields>\r\n
/// \r\n
/// <n body bytes>
/// ```
pub fn encode_message(message: &Message, dst: &mut BytesMut) {
    let header = message.header.to_string();
    dst.reserve(header.len() + message.body.len());
    dst.put_slice(header.as_bytes());
    dst.put_slice(&message.body);
}
