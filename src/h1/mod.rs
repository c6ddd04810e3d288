//! HTTP/1.x Protocol.
//!
//! - [`parser`] incremental request head parser
//! - [`Request`] request lifecycle, body reader and response writer over a [`Socket`]
//!
//! [`Socket`]: crate::socket::Socket
mod matches;
pub mod parser;
mod options;
mod request;
mod write;

#[cfg(test)]
mod mock;

pub use options::{BodyOptions, HeadLimits};
pub use parser::{Header, ParseError, RequestHead};
pub use request::{ReadBody, Request, State};
