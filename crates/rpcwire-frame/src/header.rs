//! Header block parsing.
//!
//! A header block is a run of `field: value` lines closed by a blank line.
//! `\r\n`, `\n` and a bare `\r` are all accepted as line terminators; a `\r`
//! immediately followed by `\n` counts as a single terminator.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{FrameError, Result};

/// Field carrying the body length in bytes.
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Field carrying the body media type.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Media type assumed when `Content-Type` is absent.
pub const DEFAULT_CONTENT_TYPE: &str = "application/vscode-jsonrpc; charset=utf-8";

/// Decoded header fields. Names are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: BTreeMap<String, String>,
}

impl Header {
    /// Create an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field value by exact name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Build a header from `(field, value)` pairs, validating each one.
    pub fn from_fields<K, V, I>(fields: I) -> Result<Self>
    where
        K: Into<String>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut header = Self::new();
        for (field, value) in fields {
            header.insert(field, value)?;
        }
        Ok(header)
    }

    /// Set a field, replacing any previous value.
    ///
    /// The value is trimmed. The pair is rejected unless it renders as a line
    /// that [`parse_header`] reads back unchanged: the field must be non-empty
    /// printable ASCII without `:`, and the value non-empty ASCII without
    /// line terminators.
    pub fn insert(&mut self, field: impl Into<String>, value: impl AsRef<str>) -> Result<()> {
        let field = field.into();
        let value = value.as_ref().trim();

        let reason = if field.is_empty() {
            Some("empty field name")
        } else if !field.bytes().all(|b| (0x20..=0x7E).contains(&b) && b != b':') {
            Some("field name must be printable ASCII without ':'")
        } else if value.is_empty() {
            Some("empty value")
        } else if !value.is_ascii() {
            Some("value must be ASCII")
        } else if value.bytes().any(|b| b == b'\r' || b == b'\n') {
            Some("value contains a line terminator")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(FrameError::InvalidField { field, reason });
        }

        self.fields.insert(field, value.to_string());
        Ok(())
    }

    /// Insert a pair already known to be well formed.
    pub(crate) fn insert_trusted(&mut self, field: String, value: String) {
        self.fields.insert(field, value);
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    /// Declared body length.
    ///
    /// Absent or non-numeric values read as `0`; rejecting them is the
    /// framer's job, not the header's.
    pub fn content_length(&self) -> i64 {
        self.get(CONTENT_LENGTH)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
    }

    /// Declared body media type, or [`DEFAULT_CONTENT_TYPE`].
    pub fn content_type(&self) -> &str {
        self.get(CONTENT_TYPE).unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Renders the block in canonical wire form: `Content-Length` first, then the
/// remaining fields, each line ending in `\r\n`, followed by a blank line.
impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(length) = self.get(CONTENT_LENGTH) {
            write!(f, "{CONTENT_LENGTH}: {length}\r\n")?;
        }
        for (field, value) in self.iter().filter(|(field, _)| *field != CONTENT_LENGTH) {
            write!(f, "{field}: {value}\r\n")?;
        }
        f.write_str("\r\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Field,
    Value,
}

/// Forward-only byte cursor with one byte of lookahead.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn next(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }
}

enum Newline {
    /// A complete terminator was consumed.
    Done,
    /// A `\r` ended the window; the next byte may still be its `\n`.
    Pending,
}

/// Consume the rest of a terminator whose first byte has been read.
fn finish_newline(first: u8, cursor: &mut Cursor<'_>) -> Newline {
    if first == b'\r' {
        match cursor.peek() {
            Some(b'\n') => {
                cursor.next();
            }
            Some(_) => {}
            None => return Newline::Pending,
        }
    }
    Newline::Done
}

/// Parse one header block from the start of `window`.
///
/// Returns the header and the number of bytes it occupies (terminator
/// included), or `Ok(None)` when the window ends before the blank line.
pub fn parse_header(window: &[u8]) -> Result<Option<(Header, usize)>> {
    let mut cursor = Cursor::new(window);
    let mut state = State::Field;
    let mut header = Header::new();
    let mut field = String::new();
    let mut value = String::new();

    while let Some(byte) = cursor.next() {
        let position = cursor.pos - 1;
        match state {
            State::Field => match byte {
                b':' => {
                    state = State::Value;
                    value.clear();
                }
                b'\r' | b'\n' if field.is_empty() => {
                    return match finish_newline(byte, &mut cursor) {
                        Newline::Done => Ok(Some((header, cursor.pos))),
                        Newline::Pending => Ok(None),
                    };
                }
                0x20..=0x7E => field.push(byte as char),
                _ => return Err(FrameError::MalformedHeader { byte, position }),
            },
            State::Value => match byte {
                b'\r' | b'\n' => {
                    if let Newline::Pending = finish_newline(byte, &mut cursor) {
                        return Ok(None);
                    }
                    let trimmed = value.trim();
                    if trimmed.is_empty() {
                        return Err(FrameError::EmptyHeaderValue {
                            field: std::mem::take(&mut field),
                            position,
                        });
                    }
                    header.insert_trusted(std::mem::take(&mut field), trimmed.to_string());
                    state = State::Field;
                }
                _ if byte.is_ascii() => value.push(byte as char),
                _ => return Err(FrameError::MalformedHeader { byte, position }),
            },
        }
    }

    Ok(None)
}
