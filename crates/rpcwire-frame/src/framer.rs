//! Incremental message framing.
//!
//! [`Framer`] accepts arbitrarily chunked input and hands back every message
//! that is complete so far. Only raw bytes persist between calls: each
//! extraction attempt re-parses the header from the front of the buffer.

use bytes::{Buf, BytesMut};

use crate::config::FrameConfig;
use crate::error::{FrameError, Result};
use crate::header::{parse_header, CONTENT_LENGTH};
use crate::message::Message;

/// Extract one message from the front of `src`.
///
/// Returns `Ok(None)` if the header or body has not fully arrived; `src` is
/// left untouched in that case. On success the message bytes are removed
/// from `src`.
pub fn decode_message(src: &mut BytesMut) -> Result<Option<Message>> {
    let Some((header, header_len)) = parse_header(&src[..])? else {
        tracing::trace!(buffered = src.len(), "header incomplete");
        return Ok(None);
    };

    let declared = header.content_length();
    if declared <= 0 {
        return Err(FrameError::InvalidContentLength {
            value: header.get(CONTENT_LENGTH).map(str::to_owned),
        });
    }
    let body_len = usize::try_from(declared).map_err(|_| FrameError::InvalidContentLength {
        value: header.get(CONTENT_LENGTH).map(str::to_owned),
    })?;

    let total = header_len.saturating_add(body_len);
    if src.len() < total {
        tracing::trace!(buffered = src.len(), needed = total, "body incomplete");
        return Ok(None);
    }

    src.advance(header_len);
    let body = src.split_to(body_len).freeze();
    tracing::debug!(
        header_len,
        body_len,
        content_type = header.content_type(),
        "message framed"
    );

    Ok(Some(Message::decoded(header, body)))
}

/// Buffers a byte stream and splits it into [`Message`]s.
///
/// A framer belongs to one connection. After a fatal framing error it stays
/// faulted and rejects further input until [`reset`](Framer::reset).
///
/// Messages that precede the fault are always delivered: when a feed
/// completes some messages and then hits an error, the messages are returned
/// and the error is reported by the next `feed`.
#[derive(Debug)]
pub struct Framer {
    buf: BytesMut,
    faulted: bool,
    held: Option<FrameError>,
}

impl Framer {
    /// Create a framer with default configuration.
    pub fn new() -> Self {
        Self::with_config(&FrameConfig::default())
    }

    /// Create a framer with explicit configuration.
    pub fn with_config(config: &FrameConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(config.initial_buffer_capacity),
            faulted: false,
            held: None,
        }
    }

    /// Append `bytes` and return every message completed by them, in order.
    ///
    /// An empty result means more input is needed.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<Message>> {
        if let Some(err) = self.held.take() {
            return Err(err);
        }
        if self.faulted {
            return Err(FrameError::Faulted);
        }

        self.buf.extend_from_slice(bytes);

        let mut messages = Vec::new();
        loop {
            match decode_message(&mut self.buf) {
                Ok(Some(message)) => messages.push(message),
                Ok(None) => return Ok(messages),
                Err(err) => {
                    self.faulted = true;
                    tracing::warn!(
                        error = %err,
                        buffered = self.buf.len(),
                        delivered = messages.len(),
                        "fatal framing error"
                    );
                    if messages.is_empty() {
                        return Err(err);
                    }
                    self.held = Some(err);
                    return Ok(messages);
                }
            }
        }
    }

    /// Whether a fatal error has been seen, including one not yet returned.
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Bytes received but not yet returned as part of a message.
    pub fn buffered_len(&self) -> usize {
        self.buf.len()
    }

    /// Discard buffered bytes and clear the fault.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.faulted = false;
        self.held = None;
    }
}

impl Default for Framer {
    fn default() -> Self {
        Self::new()
    }
}
