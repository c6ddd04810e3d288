//! HTTP/1.x request/response adapter.
//!
//! Turns a connected byte stream into a parsed request head and a bounded body, and frames the
//! application's response back onto the wire, one request per [`h1::Request`].
//!
//! ```no_run
//! use h1_adapter::{h1::{BodyOptions, Request}, http::StatusCode};
//!
//! # async fn handle(mut io: tokio::net::TcpStream) -> Result<(), h1_adapter::Error> {
//! let (head, req) = Request::new(&mut io).read_headers().await?;
//! let (body, req) = req.read_body(&BodyOptions::default()).await?;
//! let req = req
//!     .send_response(StatusCode::OK, &[("content-type", "text/plain")], b"hello")
//!     .await?;
//! # let _ = (head, body, req);
//! # Ok(())
//! # }
//! ```
#![warn(missing_debug_implementations)]

mod log;

pub mod common;
pub mod http;
pub mod socket;
pub mod h1;
pub mod adapter;
mod error;

pub use adapter::{HttpAdapter, ResponseAdapter};
pub use error::{Error, StateError, Unsupported};
pub use socket::Socket;
