//! Protocol independent request adapter interface.
//!
//! Applications written against [`HttpAdapter`] and [`ResponseAdapter`] do not depend on the
//! wire protocol. [`h1::Request`] is the HTTP/1.x implementation.
//!
//! [`h1::Request`]: crate::h1::Request
use std::{io, net::SocketAddr};

use crate::error::Error;
use crate::h1::{BodyOptions, ReadBody, Request, RequestHead};
use crate::http::{StatusCode, Version};
use crate::socket::Socket;

/// Connection level helpers.
pub trait HttpAdapter {
    /// Negotiated protocol version.
    fn protocol_version(&self) -> Version;

    /// Returns `true` if the connection may serve another request.
    fn keepalive_eligible(&self) -> bool;

    /// Remote address.
    fn peer_info(&self) -> io::Result<SocketAddr>;

    /// Local address.
    fn local_info(&self) -> io::Result<SocketAddr>;
}

/// Request reading and response writing.
///
/// Operations take the adapter by value and hand it back on success.
pub trait ResponseAdapter: HttpAdapter + Sized {
    /// Read request line and headers.
    fn read_headers(self) -> impl Future<Output = Result<(RequestHead, Self), Error>>;

    /// Read the next part of the request body.
    fn read_body(self, options: &BodyOptions) -> impl Future<Output = Result<(ReadBody, Self), Error>>;

    /// Send a complete response.
    fn send_response(
        self,
        status: StatusCode,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> impl Future<Output = Result<Self, Error>>;

    /// Start a streamed response.
    fn open_chunked(
        self,
        status: StatusCode,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<Self, Error>>;

    /// Stream a chunk, empty `data` ends the response.
    fn write_chunk(self, data: &[u8]) -> impl Future<Output = Result<Self, Error>>;

    /// Send a `1xx` response.
    fn send_informational(&self, status: StatusCode, headers: &[(&str, &str)]) -> Result<(), Error>;

    /// Push a resource.
    fn push(&self, path: &str, headers: &[(&str, &str)]) -> Result<(), Error>;
}

impl<S: Socket> HttpAdapter for Request<'_, S> {
    #[inline]
    fn protocol_version(&self) -> Version {
        self.version()
    }

    #[inline]
    fn keepalive_eligible(&self) -> bool {
        Request::keepalive_eligible(self)
    }

    #[inline]
    fn peer_info(&self) -> io::Result<SocketAddr> {
        self.peer_addr()
    }

    #[inline]
    fn local_info(&self) -> io::Result<SocketAddr> {
        self.local_addr()
    }
}

impl<S: Socket> ResponseAdapter for Request<'_, S> {
    fn read_headers(self) -> impl Future<Output = Result<(RequestHead, Self), Error>> {
        Request::read_headers(self)
    }

    fn read_body(self, options: &BodyOptions) -> impl Future<Output = Result<(ReadBody, Self), Error>> {
        Request::read_body(self, options)
    }

    fn send_response(
        self,
        status: StatusCode,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> impl Future<Output = Result<Self, Error>> {
        Request::send_response(self, status, headers, body)
    }

    fn open_chunked(
        self,
        status: StatusCode,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<Self, Error>> {
        Request::open_chunked(self, status, headers)
    }

    fn write_chunk(self, data: &[u8]) -> impl Future<Output = Result<Self, Error>> {
        Request::write_chunk(self, data)
    }

    fn send_informational(&self, status: StatusCode, headers: &[(&str, &str)]) -> Result<(), Error> {
        Request::send_informational(self, status, headers)
    }

    fn push(&self, path: &str, headers: &[(&str, &str)]) -> Result<(), Error> {
        Request::push(self, path, headers)
    }
}
