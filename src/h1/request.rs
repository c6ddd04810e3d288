//! HTTP/1.x request lifecycle.
use bytes::{Bytes, BytesMut};
use std::{cmp, io, net::SocketAddr};

use super::options::{BodyOptions, HeadLimits};
use super::parser::{self, HeadParser, Header, ParseError, RequestHead};
use super::write::{self, Framing};
use crate::common::ParseResult;
use crate::error::{Error, StateError, Unsupported};
use crate::http::{Method, StatusCode, Version};
use crate::log::{debug, trace};
use crate::socket::Socket;

/// Request lifecycle state.
///
/// ```text
/// New -> HeadersRead -> BodyRead -> Sent
///            |             |
///            +-------------+-> ChunkingOut -> Sent
/// ```
///
/// A response may be sent straight from `HeadersRead` as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    New,
    HeadersRead,
    BodyRead,
    Sent,
    ChunkingOut,
}

/// Outcome of a successful [`Request::read_body`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadBody {
    /// Last part of the body.
    Done(Bytes),
    /// Part of the body, call again for the rest.
    More(Bytes),
}

impl ReadBody {
    /// Returns `true` if this is the last part.
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Returns the delivered bytes.
    #[inline]
    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::Done(bytes) | Self::More(bytes) => bytes,
        }
    }
}

/// Single HTTP/1.x request over a borrowed socket.
///
/// Every operation consumes the request and returns it back on success, a failed operation
/// drops it and the connection must be closed.
#[derive(Debug)]
pub struct Request<'s, S> {
    state: State,
    socket: &'s mut S,
    /// bytes read but not consumed by the current phase
    buffer: BytesMut,
    limits: HeadLimits,
    method: Method,
    version: Version,
    /// remaining declared body bytes, only ever decreases
    body_size: Option<u64>,
    body_encoding: Option<Bytes>,
    transfer_encoding: Option<Bytes>,
    connection: Option<Bytes>,
    keep_alive: bool,
    /// streamed response content is written to the socket
    res_body: bool,
    /// streamed response is delimited by connection close
    close_delimited: bool,
}

const _: () = {
    const fn is_send<T: Send>() {}
    is_send::<Request<'static, tokio::net::TcpStream>>();
};

impl<'s, S> Request<'s, S> {
    /// Create request on a freshly accepted socket.
    pub fn new(socket: &'s mut S) -> Self {
        Self::with_buffer(socket, BytesMut::new())
    }

    /// Create request with bytes already read from the socket, e.g. from [`Request::finish`].
    pub fn with_buffer(socket: &'s mut S, buffer: BytesMut) -> Self {
        Self {
            state: State::New,
            socket,
            buffer,
            limits: HeadLimits::default(),
            method: Method::GET,
            version: Version::HTTP_11,
            body_size: None,
            body_encoding: None,
            transfer_encoding: None,
            connection: None,
            keep_alive: false,
            res_body: true,
            close_delimited: false,
        }
    }

    /// Replace head limits, only meaningful before [`Request::read_headers`].
    pub fn with_limits(mut self, limits: HeadLimits) -> Self {
        self.limits = limits;
        self
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Request method, `GET` until the head is read.
    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Negotiated protocol version.
    #[inline]
    pub fn version(&self) -> Version {
        self.version
    }

    /// Remaining declared body bytes, `None` without `Content-Length`.
    #[inline]
    pub fn body_size(&self) -> Option<u64> {
        self.body_size
    }

    /// Raw `Content-Encoding` value, not decoded here.
    #[inline]
    pub fn content_encoding(&self) -> Option<&[u8]> {
        self.body_encoding.as_deref()
    }

    /// Raw `Connection` value.
    #[inline]
    pub fn connection(&self) -> Option<&[u8]> {
        self.connection.as_deref()
    }

    /// Returns `true` if the connection may serve another request after this one.
    ///
    /// Only `HTTP/1.1` without a `Connection: close` token qualifies. `HTTP/1.0` responses never
    /// announce `keep-alive`, so those connections always close.
    #[inline]
    pub fn keepalive_eligible(&self) -> bool {
        self.keep_alive
    }

    /// Give back the unconsumed read buffer if the connection can be reused.
    ///
    /// Returns `None` unless the response was sent, the request body was fully drained, the
    /// response was not close delimited, and the connection is keep-alive eligible.
    pub fn finish(self) -> Option<BytesMut> {
        let drained = self.transfer_encoding.is_none() && self.body_size.unwrap_or(0) == 0;
        let reusable =
            self.state == State::Sent && self.keep_alive && drained && !self.close_delimited;
        reusable.then_some(self.buffer)
    }

    fn check_unsent(&self) -> Result<(), Error> {
        match self.state {
            State::Sent | State::ChunkingOut => Err(StateError::AlreadySent.into()),
            _ => Ok(()),
        }
    }

    fn apply_head(&mut self, head: &RequestHead) -> Result<(), Error> {
        let body_size = parser::content_length(head.header_all("content-length").map(Header::value))?;
        let transfer_encoding = head.header("transfer-encoding").map(Header::value_bytes);
        if body_size.is_some() && transfer_encoding.is_some() {
            return Err(ParseError::AmbiguousLength.into());
        }

        let close = head.header_all("connection").any(|value| {
            value
                .value()
                .split(|&b| b == b',')
                .any(|token| token.trim_ascii().eq_ignore_ascii_case(b"close"))
        });
        let keep_alive = head.version.is_persistent_default() && !close;

        self.method = head.method;
        self.version = head.version;
        self.body_size = body_size;
        self.transfer_encoding = transfer_encoding;
        self.body_encoding = head.header("content-encoding").map(Header::value_bytes);
        self.connection = head.header("connection").map(Header::value_bytes);
        self.keep_alive = keep_alive;
        Ok(())
    }
}

impl<'s, S: Socket> Request<'s, S> {
    /// Read the request line and header section.
    ///
    /// Bytes following the head stay buffered as the start of the body.
    pub async fn read_headers(mut self) -> Result<(RequestHead, Self), Error> {
        if self.state != State::New {
            return Err(StateError::AlreadyRead.into());
        }

        let mut parser = HeadParser::new(self.limits.max_head_size, self.limits.max_headers);
        let head = loop {
            match parser.parse(&mut self.buffer) {
                ParseResult::Ok(head) => break head,
                ParseResult::Err(err) => return Err(err.into()),
                ParseResult::Pending => {
                    let bytes = self
                        .socket
                        .receive_max(self.limits.read_size, self.limits.read_timeout)
                        .await?;
                    if bytes.is_empty() {
                        return Err(io::ErrorKind::UnexpectedEof.into());
                    }
                    trace!("head read {} bytes", bytes.len());
                    self.buffer.extend_from_slice(&bytes);
                }
            }
        };

        self.apply_head(&head)?;
        self.state = State::HeadersRead;
        debug!("{} {} {}", head.method, head.path, head.version);

        Ok((head, self))
    }

    /// Read the next part of a `Content-Length` delimited body.
    ///
    /// Delivers at most `options.max_length` bytes, returning [`ReadBody::More`] while declared
    /// bytes remain. Without a declared body, returns an empty [`ReadBody::Done`] without
    /// touching the socket.
    pub async fn read_body(mut self, options: &BodyOptions) -> Result<(ReadBody, Self), Error> {
        match self.state {
            State::New => return Err(StateError::UnreadHeaders.into()),
            State::HeadersRead => {}
            _ => return Err(StateError::AlreadyRead.into()),
        }

        if self.transfer_encoding.is_some() {
            return Err(Unsupported::ChunkedRequestBody.into());
        }

        let Some(remaining) = self.body_size else {
            self.state = State::BodyRead;
            return Ok((ReadBody::Done(Bytes::new()), self));
        };

        let max_length = options.max_length.max(1);
        let read_increment = options.read_increment.max(1);

        // fits usize, bounded by `max_length`
        let want = cmp::min(remaining, max_length as u64) as usize;

        while self.buffer.len() < want {
            let need = cmp::min(want - self.buffer.len(), read_increment);
            let bytes = self.socket.receive_max(need, options.read_timeout).await?;
            if bytes.is_empty() {
                return Err(io::ErrorKind::UnexpectedEof.into());
            }
            self.buffer.extend_from_slice(&bytes);
        }

        let chunk = self.buffer.split_to(want).freeze();
        let remaining = remaining - want as u64;
        self.body_size = Some(remaining);

        if remaining == 0 {
            self.state = State::BodyRead;
            debug!("body drained");
            Ok((ReadBody::Done(chunk), self))
        } else {
            Ok((ReadBody::More(chunk), self))
        }
    }

    /// Send a `content-length` delimited response in a single write.
    pub async fn send_response(
        mut self,
        status: StatusCode,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<Self, Error> {
        self.check_unsent()?;
        if status.is_informational() {
            return Err(Unsupported::Informational.into());
        }

        let (framing, with_body) = if status.allows_body() {
            (Framing::Length(body.len() as u64), self.method != Method::HEAD)
        } else {
            (Framing::Empty, false)
        };

        let mut buf = BytesMut::with_capacity(128 + if with_body { body.len() } else { 0 });
        write::write_head(&mut buf, self.version, status, framing, headers)?;
        if with_body {
            buf.extend_from_slice(body);
        }

        self.socket.send(buf.freeze()).await?;
        self.state = State::Sent;
        debug!("response {} sent", status.as_u16());

        Ok(self)
    }

    /// Send the response head of a streamed response.
    ///
    /// `HTTP/1.1` responses are chunked, `HTTP/1.0` responses are delimited by closing the
    /// connection.
    pub async fn open_chunked(
        mut self,
        status: StatusCode,
        headers: &[(&str, &str)],
    ) -> Result<Self, Error> {
        self.check_unsent()?;
        if status.is_informational() {
            return Err(Unsupported::Informational.into());
        }

        let framing = if !status.allows_body() {
            Framing::Empty
        } else if self.version == Version::HTTP_10 {
            Framing::Close
        } else {
            Framing::Chunked
        };

        let mut buf = BytesMut::with_capacity(128);
        write::write_head(&mut buf, self.version, status, framing, headers)?;

        self.socket.send(buf.freeze()).await?;
        self.res_body = status.allows_body() && self.method != Method::HEAD;
        self.close_delimited = framing == Framing::Close;
        self.state = State::ChunkingOut;
        debug!("response {} streaming", status.as_u16());

        Ok(self)
    }

    /// Write one chunk of a streamed response, empty `data` ends the stream.
    pub async fn write_chunk(mut self, data: &[u8]) -> Result<Self, Error> {
        match self.state {
            State::ChunkingOut => {}
            State::Sent => return Err(StateError::AlreadySent.into()),
            _ => return Err(StateError::NotChunking.into()),
        }

        let last = data.is_empty();
        if self.res_body {
            let mut buf = BytesMut::new();
            match (self.close_delimited, last) {
                (true, true) => {}
                (true, false) => buf.extend_from_slice(data),
                (false, true) => write::write_last_chunk(&mut buf),
                (false, false) => write::write_chunk(&mut buf, data),
            }
            if !buf.is_empty() {
                self.socket.send(buf.freeze()).await?;
            }
        }

        if last {
            self.state = State::Sent;
            debug!("response stream closed");
        }

        Ok(self)
    }

    /// Remote address of the connection.
    #[inline]
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.socket.peer_addr()
    }

    /// Local address of the connection.
    #[inline]
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

/// Capabilities HTTP/1.x does not offer through this adapter, nothing is written.
impl<S> Request<'_, S> {
    /// `1xx` responses.
    pub fn send_informational(&self, _: StatusCode, _: &[(&str, &str)]) -> Result<(), Error> {
        Err(Unsupported::Informational.into())
    }

    /// Server push.
    pub fn push(&self, _: &str, _: &[(&str, &str)]) -> Result<(), Error> {
        Err(Unsupported::Push.into())
    }

    /// Protocol upgrade.
    pub fn upgrade(&self, _: &str) -> Result<(), Error> {
        Err(Unsupported::Upgrade.into())
    }
}
