//! HTTP/1.x Parser.
//!
//! [`Tokenizer`] works on a growing buffer. Each call splits off the next complete line, if no
//! line terminator is found it returns [`ParseResult::Pending`] and remembers how far it
//! scanned, so the next call on the extended buffer resumes from there instead of rescanning.
//!
//! [`HeadParser`] pulls tokens until the empty line that ends the header section, enforcing the
//! head size and header count limits on the way.
//!
//! [`ParseResult::Pending`]: crate::common::ParseResult::Pending
mod error;

#[cfg(test)]
mod test;

use bytes::{Bytes, BytesMut};

use super::matches;
use crate::common::ParseResult;
use crate::http::{Method, Version};

pub use error::ParseError;

const VERSION_SIZE: usize = b"HTTP/1.1".len();

macro_rules! ready {
    ($e:expr) => {
        match $e {
            ParseResult::Ok(ok) => ok,
            ParseResult::Err(err) => return ParseResult::Err(err),
            ParseResult::Pending => return ParseResult::Pending,
        }
    };
}

// ===== Tokens =====

/// Parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reqline {
    pub method: Method,
    pub path: String,
    pub version: Version,
}

/// Single header field, name is lowercased.
#[derive(Clone, PartialEq, Eq)]
pub struct Header {
    name: String,
    value: Bytes,
}

impl Header {
    /// Lowercased field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field value with surrounding whitespace removed.
    #[inline]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    #[inline]
    pub(crate) fn value_bytes(&self) -> Bytes {
        self.value.clone()
    }

    /// Field value as str, `None` if it contains obs-text.
    #[inline]
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}

impl std::fmt::Debug for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Header")
            .field(&self.name)
            .field(&String::from_utf8_lossy(&self.value))
            .finish()
    }
}

// ===== Tokenizer =====

/// Resumable line tokenizer.
#[derive(Debug, Default)]
pub struct Tokenizer {
    /// bytes of the current line already scanned without finding `\n`
    searched: usize,
    /// bytes consumed by completed lines
    consumed: usize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes of the completed lines split so far, terminators included.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Split the next line, terminator excluded. Both `\r\n` and a bare `\n` end a line.
    fn split_line(&mut self, bytes: &mut BytesMut) -> ParseResult<BytesMut, ParseError> {
        let from = self.searched.min(bytes.len());
        let Some(nth) = matches::find_lf(&bytes[from..]) else {
            self.searched = bytes.len();
            return ParseResult::Pending;
        };

        let lf = from + nth;
        self.searched = 0;
        self.consumed += lf + 1;

        let mut line = bytes.split_to(lf + 1);
        line.truncate(lf);
        if let [.., b'\r'] = line[..] {
            line.truncate(lf - 1);
        }
        if line.contains(&b'\r') {
            return ParseResult::Err(ParseError::InvalidSeparator);
        }

        ParseResult::Ok(line)
    }

    /// Parse request line, empty lines preceding it are skipped.
    pub fn reqline(&mut self, bytes: &mut BytesMut) -> ParseResult<Reqline, ParseError> {
        loop {
            let line = ready!(self.split_line(bytes));
            if !line.is_empty() {
                return parse_reqline(&line).into();
            }
        }
    }

    /// Parse header field, returns `Ok(None)` on the empty line ending the header section.
    pub fn header(&mut self, bytes: &mut BytesMut) -> ParseResult<Option<Header>, ParseError> {
        let line = ready!(self.split_line(bytes));
        if line.is_empty() {
            return ParseResult::Ok(None);
        }
        parse_header(line.freeze()).map(Some).into()
    }
}

fn parse_reqline(line: &[u8]) -> Result<Reqline, ParseError> {
    let Some(sp) = line.iter().position(|&b| b == b' ') else {
        return Err(ParseError::InvalidSeparator);
    };

    let (method, rest) = (&line[..sp], &line[sp + 1..]);
    if method.is_empty() || !method.iter().copied().all(matches::is_token) {
        return Err(ParseError::InvalidMethod);
    }
    let method = Method::from_bytes(method).ok_or(ParseError::UnknownMethod)?;

    let Some(([target @ .., b' '], version)) = rest.split_last_chunk::<VERSION_SIZE>() else {
        return Err(ParseError::InvalidSeparator);
    };
    let version = Version::from_bytes(version).ok_or(ParseError::UnsupportedVersion)?;

    if target.is_empty() || !target.iter().copied().all(matches::is_target) {
        return Err(ParseError::InvalidTarget);
    }
    let path = String::from_utf8(target.to_vec()).map_err(|_| ParseError::InvalidTarget)?;

    Ok(Reqline { method, path, version })
}

fn parse_header(line: Bytes) -> Result<Header, ParseError> {
    let Some(colon) = line.iter().position(|&b| b == b':') else {
        return Err(ParseError::InvalidHeader);
    };

    // whitespace before the colon and obs-fold both fail the token check
    let name = &line[..colon];
    if name.is_empty() || !name.iter().copied().all(matches::is_token) {
        return Err(ParseError::InvalidHeader);
    }

    let value = matches::trim_ows(&line[colon + 1..]);
    let value = line.slice(colon + 1 + value.start..colon + 1 + value.end);
    if !value.iter().copied().all(matches::is_field_value) {
        return Err(ParseError::InvalidHeader);
    }

    let name = String::from_utf8(name.to_ascii_lowercase()).map_err(|_| ParseError::InvalidHeader)?;

    Ok(Header { name, value })
}

// ===== Head =====

/// Parsed request head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: Method,
    pub path: String,
    pub version: Version,
    /// Header fields in the order the client sent them, duplicates preserved.
    pub headers: Vec<Header>,
}

impl RequestHead {
    /// Returns the first field named `name`, which must be lowercase.
    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.name == name)
    }

    /// Returns every field named `name` in order.
    pub fn header_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Header> {
        self.headers.iter().filter(move |h| h.name == name)
    }
}

/// Incremental request head parser.
#[derive(Debug)]
pub struct HeadParser {
    tokenizer: Tokenizer,
    reqline: Option<Reqline>,
    headers: Vec<Header>,
    max_head_size: usize,
    max_headers: usize,
}

impl HeadParser {
    pub fn new(max_head_size: usize, max_headers: usize) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            reqline: None,
            headers: Vec::with_capacity(max_headers.min(16)),
            max_head_size,
            max_headers,
        }
    }

    /// Advance parsing on `bytes`, which must only have been extended since the last call.
    ///
    /// On success, `bytes` holds whatever followed the head.
    pub fn parse(&mut self, bytes: &mut BytesMut) -> ParseResult<RequestHead, ParseError> {
        let result = self.parse_inner(bytes);
        match result {
            ParseResult::Pending if self.tokenizer.consumed() + bytes.len() > self.max_head_size => {
                ParseResult::Err(ParseError::TooLarge)
            }
            ParseResult::Ok(_) if self.tokenizer.consumed() > self.max_head_size => {
                ParseResult::Err(ParseError::TooLarge)
            }
            result => result,
        }
    }

    fn parse_inner(&mut self, bytes: &mut BytesMut) -> ParseResult<RequestHead, ParseError> {
        let Reqline { method, path, version } = match self.reqline.take() {
            Some(reqline) => reqline,
            None => ready!(self.tokenizer.reqline(bytes)),
        };

        loop {
            match self.tokenizer.header(bytes) {
                ParseResult::Ok(Some(header)) => {
                    if self.headers.len() >= self.max_headers {
                        return ParseResult::Err(ParseError::TooManyHeaders);
                    }
                    self.headers.push(header);
                }
                ParseResult::Ok(None) => break,
                ParseResult::Err(err) => return ParseResult::Err(err),
                ParseResult::Pending => {
                    self.reqline = Some(Reqline { method, path, version });
                    return ParseResult::Pending;
                }
            }
        }

        ParseResult::Ok(RequestHead {
            method,
            path,
            version,
            headers: std::mem::take(&mut self.headers),
        })
    }
}

/// Parse a `Content-Length` value, repeated values must agree.
pub(crate) fn content_length<'a>(
    mut values: impl Iterator<Item = &'a [u8]>,
) -> Result<Option<u64>, ParseError> {
    fn atou(value: &[u8]) -> Option<u64> {
        if value.is_empty() {
            return None;
        }
        value.iter().try_fold(0u64, |acc, &b| match b {
            b'0'..=b'9' => acc.checked_mul(10)?.checked_add(u64::from(b - b'0')),
            _ => None,
        })
    }

    let Some(first) = values.next() else {
        return Ok(None);
    };
    let len = atou(first).ok_or(ParseError::InvalidContentLength)?;
    for value in values {
        if atou(value) != Some(len) {
            return Err(ParseError::InvalidContentLength);
        }
    }
    Ok(Some(len))
}
