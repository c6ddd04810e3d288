//! Adapter errors.
use std::io;

use crate::h1::ParseError;

/// Adapter error.
#[derive(Debug)]
pub enum Error {
    /// Operation called in a state that forbids it, a bug in the caller.
    State(StateError),
    /// Transport failure, timeouts included.
    Io(io::Error),
    /// Malformed request head.
    Parse(ParseError),
    /// Capability this adapter does not provide.
    Unsupported(Unsupported),
    /// Response header name is not a token, or its value contains CR, LF or NUL.
    InvalidResponseHeader,
}

/// Request lifecycle violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// Body read before the head.
    UnreadHeaders,
    /// Head or body read a second time.
    AlreadyRead,
    /// A response was already sent or is being streamed.
    AlreadySent,
    /// Chunk written without an open chunked response.
    NotChunking,
}

/// Unsupported capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    /// `1xx` responses.
    Informational,
    /// Server push.
    Push,
    /// Protocol upgrade.
    Upgrade,
    /// `Transfer-Encoding` framed request body.
    ChunkedRequestBody,
}

impl Error {
    /// Returns `true` for a capability check failure, nothing was sent.
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::State(err) => std::fmt::Display::fmt(err, f),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Parse(err) => write!(f, "parse error: {err}"),
            Self::Unsupported(err) => std::fmt::Display::fmt(err, f),
            Self::InvalidResponseHeader => f.write_str("invalid response header"),
        }
    }
}

impl std::error::Error for StateError {}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::UnreadHeaders => f.write_str("request headers not read yet"),
            Self::AlreadyRead => f.write_str("request already read"),
            Self::AlreadySent => f.write_str("response already sent"),
            Self::NotChunking => f.write_str("no chunked response is open"),
        }
    }
}

impl std::error::Error for Unsupported {}

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Informational => f.write_str("informational responses are not supported"),
            Self::Push => f.write_str("server push is not supported"),
            Self::Upgrade => f.write_str("protocol upgrade is not supported"),
            Self::ChunkedRequestBody => f.write_str("chunked request body is not supported"),
        }
    }
}

macro_rules! from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Error {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

from! {
    StateError => State,
    io::Error => Io,
    ParseError => Parse,
    Unsupported => Unsupported,
}

impl From<io::ErrorKind> for Error {
    #[inline]
    fn from(value: io::ErrorKind) -> Self {
        Self::Io(value.into())
    }
}
