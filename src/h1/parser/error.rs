/// HTTP/1.x head parsing error.
///
/// Any of these leaves the connection in an unknown framing state, it must be closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Head exceeds the configured size limit.
    TooLarge,
    /// Too many header fields.
    TooManyHeaders,
    /// Line have invalid separator.
    InvalidSeparator,
    /// Unknown Method.
    UnknownMethod,
    /// Invalid character in method.
    InvalidMethod,
    /// Invalid character in request target.
    InvalidTarget,
    /// Unsupported version.
    UnsupportedVersion,
    /// Malformed header field.
    InvalidHeader,
    /// `Content-Length` is not a decimal integer, or repeated with different values.
    InvalidContentLength,
    /// Both `Content-Length` and `Transfer-Encoding` are present.
    AmbiguousLength,
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::TooLarge => f.write_str("request head too large"),
            Self::TooManyHeaders => f.write_str("too many headers"),
            Self::InvalidSeparator => f.write_str("invalid separator"),
            Self::UnknownMethod => f.write_str("unknown method"),
            Self::InvalidMethod => f.write_str("invalid method"),
            Self::InvalidTarget => f.write_str("invalid request target"),
            Self::UnsupportedVersion => f.write_str("unsupported version"),
            Self::InvalidHeader => f.write_str("invalid header"),
            Self::InvalidContentLength => f.write_str("invalid content length"),
            Self::AmbiguousLength => f.write_str("both content-length and transfer-encoding present"),
        }
    }
}
