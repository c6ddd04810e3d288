//! Response serialization.
use bytes::{BufMut, BytesMut};

use super::matches;
use crate::error::Error;
use crate::http::{StatusCode, Version};
use crate::log::warning;

/// How the response content is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Framing {
    /// `content-length`
    Length(u64),
    /// `transfer-encoding: chunked`
    Chunked,
    /// Content runs until the connection closes, HTTP/1.0 streaming.
    Close,
    /// Status forbids content.
    Empty,
}

/// Write status line and header section.
///
/// The framing header comes first, application supplied `content-length` and
/// `transfer-encoding` are dropped in its favor.
pub(crate) fn write_head(
    buf: &mut BytesMut,
    version: Version,
    status: StatusCode,
    framing: Framing,
    headers: &[(&str, &str)],
) -> Result<(), Error> {
    buf.reserve(64 + headers.len() * 32);

    buf.put_slice(version.as_str().as_bytes());
    buf.put_slice(b" ");
    buf.put_slice(itoa::Buffer::new().format(status.as_u16()).as_bytes());
    buf.put_slice(b"\r\n");

    match framing {
        Framing::Length(len) => {
            buf.put_slice(b"content-length: ");
            buf.put_slice(itoa::Buffer::new().format(len).as_bytes());
            buf.put_slice(b"\r\n");
        }
        Framing::Chunked => buf.put_slice(b"transfer-encoding: chunked\r\n"),
        Framing::Close | Framing::Empty => {}
    }

    for &(name, value) in headers {
        if !is_valid_name(name.as_bytes()) || !is_valid_value(value.as_bytes()) {
            return Err(Error::InvalidResponseHeader);
        }
        if name.eq_ignore_ascii_case("content-length")
            || name.eq_ignore_ascii_case("transfer-encoding")
        {
            warning!("dropping framing header from response: {name}");
            continue;
        }
        buf.put_slice(name.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(value.as_bytes());
        buf.put_slice(b"\r\n");
    }

    buf.put_slice(b"\r\n");
    Ok(())
}

/// Write `<hex-len>\r\n<data>\r\n`, `data` must not be empty.
pub(crate) fn write_chunk(buf: &mut BytesMut, data: &[u8]) {
    debug_assert!(!data.is_empty(), "empty chunk is the terminator");
    buf.reserve(data.len() + 2 * size_of::<usize>() + 4);
    put_hex(buf, data.len());
    buf.put_slice(b"\r\n");
    buf.put_slice(data);
    buf.put_slice(b"\r\n");
}

/// Write the terminating chunk, no trailers.
pub(crate) fn write_last_chunk(buf: &mut BytesMut) {
    buf.put_slice(b"0\r\n\r\n");
}

fn put_hex(buf: &mut BytesMut, mut value: usize) {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut digits = [0u8; 2 * size_of::<usize>()];
    let mut at = digits.len();
    loop {
        at -= 1;
        digits[at] = HEX[value & 0xF];
        value >>= 4;
        if value == 0 {
            break;
        }
    }
    buf.put_slice(&digits[at..]);
}

fn is_valid_name(name: &[u8]) -> bool {
    !name.is_empty() && name.iter().copied().all(matches::is_token)
}

fn is_valid_value(value: &[u8]) -> bool {
    !value.iter().any(|b| matches!(b, b'\r' | b'\n' | b'\0'))
}
