//! `tokio-util` codec for framed message streams.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{FrameError, Result};
use crate::framer::decode_message;
use crate::message::{encode_message, Message};

/// Decodes and encodes [`Message`]s for `FramedRead`/`FramedWrite`.
///
/// Shares the framer's extraction logic and, like [`Framer`](crate::Framer),
/// refuses to decode further once a framing error has been returned.
#[derive(Debug, Default)]
pub struct MessageCodec {
    faulted: bool,
}

impl MessageCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }
}

impl Decoder for MessageCodec {
    type Item = Message;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Message>> {
        if self.faulted {
            return Err(FrameError::Faulted);
        }
        decode_message(src).inspect_err(|err| {
            self.faulted = true;
            tracing::warn!(error = %err, buffered = src.len(), "fatal framing error");
        })
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Message>> {
        match self.decode(src)? {
            Some(message) => Ok(Some(message)),
            None if src.is_empty() => Ok(None),
            None => Err(FrameError::ConnectionClosed),
        }
    }
}

impl Encoder<&Message> for MessageCodec {
    type Error = FrameError;

    fn encode(&mut self, item: &Message, dst: &mut BytesMut) -> Result<()> {
        encode_message(item, dst);
        Ok(())
    }
}

impl Encoder<Message> for MessageCodec {
    type Error = FrameError;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<()> {
        encode_message(&item, dst);
        Ok(())
    }
}
