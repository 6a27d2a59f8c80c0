use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use crate::config::FrameConfig;
use crate::error::{FrameError, Result};
use crate::framer::Framer;
use crate::message::Message;

/// Reads complete messages from any `Read` stream.
///
/// Handles partial reads internally; callers always get complete messages.
pub struct MessageReader<T> {
    inner: T,
    framer: Framer,
    pending: VecDeque<Message>,
    config: FrameConfig,
}

impl<T: Read> MessageReader<T> {
    /// Create a new message reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new message reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            framer: Framer::with_config(&config),
            pending: VecDeque::new(),
            config,
        }
    }

    /// Read the next complete message (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached, and
    /// `Err(FrameError::Faulted)` on every call after a framing error.
    pub fn read_message(&mut self) -> Result<Message> {
        let mut chunk = vec![0u8; self.config.read_chunk_size.max(1)];
        loop {
            if let Some(message) = self.pending.pop_front() {
                return Ok(message);
            }
            if self.framer.is_faulted() {
                // Surfaces an error held behind delivered messages, then `Faulted`.
                return Err(self.framer.feed(&[]).err().unwrap_or(FrameError::Faulted));
            }

            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                if self.framer.buffered_len() > 0 {
                    tracing::debug!(
                        buffered = self.framer.buffered_len(),
                        "stream ended inside a message"
                    );
                }
                return Err(FrameError::ConnectionClosed);
            }

            self.pending.extend(self.framer.feed(&chunk[..read])?);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Bytes read from the stream that do not yet form a complete message.
    pub fn buffered_len(&self) -> usize {
        self.framer.buffered_len()
    }
}

impl<T: Read> Iterator for MessageReader<T> {
    type Item = Result<Message>;

    /// Yields messages until the stream closes cleanly.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_message() {
            Ok(message) => Some(Ok(message)),
            Err(FrameError::ConnectionClosed) => None,
            Err(FrameError::Faulted) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
