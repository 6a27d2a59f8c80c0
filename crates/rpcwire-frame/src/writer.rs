use std::io::{ErrorKind, Write};

use bytes::{Bytes, BytesMut};

use crate::config::FrameConfig;
use crate::error::{FrameError, Result};
use crate::message::{encode_message, Message};

/// Consecutive `WouldBlock` results tolerated, yielding between attempts,
/// before the error is handed to the caller.
const WOULD_BLOCK_RETRIES: u32 = 64;

/// Writes complete messages to any `Write` stream.
pub struct MessageWriter<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Write> MessageWriter<T> {
    /// Create a new message writer with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new message writer with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(config.initial_buffer_capacity),
            config,
        }
    }

    /// Frame `body` with a `Content-Length` header and send it.
    ///
    /// Nothing is written when the body is empty.
    pub fn send(&mut self, body: impl Into<Bytes>) -> Result<()> {
        self.write_message(&Message::new(body)?)
    }

    /// Frame `body` with `Content-Length` and `Content-Type` headers and send it.
    pub fn send_with_content_type(
        &mut self,
        body: impl Into<Bytes>,
        content_type: impl AsRef<str>,
    ) -> Result<()> {
        self.write_message(&Message::with_content_type(body, content_type)?)
    }

    /// Write a complete message (blocking).
    ///
    /// A non-blocking stream that keeps reporting `WouldBlock` fails with
    /// that error; part of the message may already have been written, so
    /// the stream should be abandoned.
    pub fn write_message(&mut self, message: &Message) -> Result<()> {
        self.buf.clear();
        encode_message(message, &mut self.buf);

        let mut offset = 0usize;
        let mut stalls = 0u32;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => {
                    offset += n;
                    stalls = 0;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => stall(&mut stalls, err)?,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
        tracing::debug!(bytes = self.buf.len(), "message written");

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        let mut stalls = 0u32;
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => stall(&mut stalls, err)?,
                Err(err) => return Err(FrameError::Io(err)),
            }
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

fn stall(stalls: &mut u32, err: std::io::Error) -> Result<()> {
    *stalls += 1;
    if *stalls > WOULD_BLOCK_RETRIES {
        return Err(FrameError::Io(err));
    }
    std::thread::yield_now();
    Ok(())
}
