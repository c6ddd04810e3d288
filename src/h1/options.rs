use std::time::Duration;

/// Limits applied while reading the request head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadLimits {
    /// Maximum bytes of request line and header section combined.
    pub max_head_size: usize,
    /// Maximum number of header fields.
    pub max_headers: usize,
    /// Maximum bytes requested from the socket per read.
    pub read_size: usize,
    /// Timeout of each socket read.
    pub read_timeout: Duration,
}

impl Default for HeadLimits {
    fn default() -> Self {
        Self {
            max_head_size: 8 * 1024,
            max_headers: 64,
            read_size: 4 * 1024,
            read_timeout: Duration::from_secs(15),
        }
    }
}

/// Options of a single [`read_body`] call.
///
/// [`read_body`]: super::Request::read_body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyOptions {
    /// Maximum bytes delivered by one call, the rest is left for the next call.
    pub max_length: usize,
    /// Maximum bytes requested from the socket per read.
    ///
    /// The socket may return less, [`TcpStream`] reads at most [`READ_CAP`] at a time.
    ///
    /// [`TcpStream`]: tokio::net::TcpStream
    /// [`READ_CAP`]: crate::socket::READ_CAP
    pub read_increment: usize,
    /// Timeout of each socket read.
    pub read_timeout: Duration,
}

impl BodyOptions {
    pub const DEFAULT_MAX_LENGTH: usize = 8_000_000;
    pub const DEFAULT_READ_INCREMENT: usize = 1_000_000;
    pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(15);

    /// Set `max_length`.
    #[inline]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Set `read_increment`.
    #[inline]
    pub fn read_increment(mut self, read_increment: usize) -> Self {
        self.read_increment = read_increment;
        self
    }

    /// Set `read_timeout`.
    #[inline]
    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }
}

impl Default for BodyOptions {
    fn default() -> Self {
        Self {
            max_length: Self::DEFAULT_MAX_LENGTH,
            read_increment: Self::DEFAULT_READ_INCREMENT,
            read_timeout: Self::DEFAULT_READ_TIMEOUT,
        }
    }
}
