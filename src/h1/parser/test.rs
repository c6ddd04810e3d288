use bytes::BytesMut;

use super::{HeadParser, ParseError, RequestHead, Tokenizer, content_length};
use crate::common::ParseResult;
use crate::http::{Method, Version};

macro_rules! ready {
    ($e:expr) => {
        match $e {
            ParseResult::Ok(ok) => ok,
            ParseResult::Err(err) => panic!("unexpected `ParseResult::Err`: {err:?}"),
            ParseResult::Pending => panic!("unexpected `ParseResult::Pending`"),
        }
    };
}

#[test]
fn test_parse_reqline() {
    macro_rules! test {
        (#[pending] $input:literal) => {
            let mut bytes = BytesMut::from(&$input[..]);
            assert!(Tokenizer::new().reqline(&mut bytes).is_pending());
            assert_eq!(&bytes[..], $input);
        };
        (#[error] $input:literal, $err:ident) => {
            let mut bytes = BytesMut::from(&$input[..]);
            match Tokenizer::new().reqline(&mut bytes) {
                ParseResult::Err(err) => assert_eq!(err, ParseError::$err, "{:?}", $input),
                other => panic!("expected `Err`, found {other:?}"),
            }
        };
        {
            $input:literal;
            $m:ident, $path:literal, $v:ident;
            $rest:literal
        } => {
            let mut bytes = BytesMut::from(&$input[..]);
            let reqline = ready!(Tokenizer::new().reqline(&mut bytes));
            assert_eq!(reqline.method, Method::$m);
            assert_eq!(reqline.path, $path);
            assert_eq!(reqline.version, Version::$v);
            assert_eq!(&bytes[..], $rest, "invalid remaining bytes");
        };
    }

    test! {
        b"GET / HTTP/1.1\r\n";
        GET, "/", HTTP_11;
        b""
    };
    test! {
        b"GET / HTTP/1.1\n";
        GET, "/", HTTP_11;
        b""
    };
    test! {
        b"GET /index.html HTTP/1.1\r\nContent-Type: text/html\r\n";
        GET, "/index.html", HTTP_11;
        b"Content-Type: text/html\r\n"
    };
    test! {
        b"POST /search?q=adequate&filter=available HTTP/1.1\r\n";
        POST, "/search?q=adequate&filter=available", HTTP_11;
        b""
    };
    test! {
        b"OPTIONS * HTTP/1.1\r\n";
        OPTIONS, "*", HTTP_11;
        b""
    };
    test! {
        b"GET /old-page HTTP/1.0\r\nConnection: close\r\n";
        GET, "/old-page", HTTP_10;
        b"Connection: close\r\n"
    };
    test! {
        b"\r\n\r\nGET /x HTTP/1.1\r\n";
        GET, "/x", HTTP_11;
        b""
    };

    test!(#[error] b"GET / HTTP/1.1\rContent-Ty\n", InvalidSeparator);
    test!(#[error] b"GET\n", InvalidSeparator);
    test!(#[error] b"GET /\n", InvalidSeparator);
    test!(#[error] b"GET HTTP/1.1\n", InvalidSeparator);
    test!(#[error] b"GET  / HTTP/1.1\n", InvalidTarget);
    test!(#[error] b"GET /a b HTTP/1.1\n", InvalidTarget);
    test!(#[error] b"G(T / HTTP/1.1\n", InvalidMethod);
    test!(#[error] b"FETCH / HTTP/1.1\n", UnknownMethod);
    test!(#[error] b"GET / HTTP/2.0\n", UnsupportedVersion);
    test!(#[error] b"GET / http/1.1\n", UnsupportedVersion);

    test!(#[pending] b"");
    test!(#[pending] b"GET / HTTP/1.1");
    test!(#[pending] b"GET / HTTP/1.1\r");
    test!(#[pending] b"GET / ");
}

#[test]
fn test_parse_header() {
    macro_rules! test {
        (#[end] $input:literal, $remain:literal) => {
            let mut bytes = BytesMut::from(&$input[..]);
            assert!(ready!(Tokenizer::new().header(&mut bytes)).is_none());
            assert_eq!(&bytes[..], $remain);
        };
        (#[pending] $input:literal) => {
            let mut bytes = BytesMut::from(&$input[..]);
            assert!(Tokenizer::new().header(&mut bytes).is_pending());
            assert_eq!(&bytes[..], $input);
        };
        (#[error] $input:literal) => {
            let mut bytes = BytesMut::from(&$input[..]);
            assert!(Tokenizer::new().header(&mut bytes).is_err(), "{:?}", $input);
        };
        {
            $input:literal;
            $name:literal, $value:literal;
            $rest:literal
        } => {
            let mut bytes = BytesMut::from(&$input[..]);
            let header = ready!(Tokenizer::new().header(&mut bytes)).unwrap();
            assert_eq!(header.name(), $name);
            assert_eq!(header.value(), &$value[..]);
            assert_eq!(&bytes[..], $rest, "invalid remaining bytes");
        };
    }

    test! {
        b"Content-Length: 1224\r\nContent-Type: text/html\r\n\r\n";
        "content-length", b"1224";
        b"Content-Type: text/html\r\n\r\n"
    }
    test! {
        b"Content-Length: 1224\nContent-Type: text/html\n\r\n";
        "content-length", b"1224";
        b"Content-Type: text/html\n\r\n"
    }
    test! {
        b"X-Empty:\r\n";
        "x-empty", b"";
        b""
    }
    test! {
        b"X-Padded: \t spaced value \t\r\n";
        "x-padded", b"spaced value";
        b""
    }
    test! {
        b"X-Obs-Text: caf\xc3\xa9\r\n";
        "x-obs-text", b"caf\xc3\xa9";
        b""
    }

    test!(#[end] b"\r\nHello World!", b"Hello World!");
    test!(#[end] b"\nHello World!", b"Hello World!");

    test!(#[pending] b"Content-Length: 12");
    test!(#[pending] b"");

    test!(#[error] b"Content-Length : 12\r\n");
    test!(#[error] b" folded: value\r\n");
    test!(#[error] b"no-colon\r\n");
    test!(#[error] b": no-name\r\n");
    test!(#[error] b"X-Nul: a\0b\r\n");
    test!(#[error] b"X-Cr: a\rb\r\n");
}

#[test]
fn test_tokenizer_resumes() {
    let mut tokenizer = Tokenizer::new();
    let mut bytes = BytesMut::from(&b"GET /resume HT"[..]);

    assert!(tokenizer.reqline(&mut bytes).is_pending());
    assert_eq!(tokenizer.searched, bytes.len());

    bytes.extend_from_slice(b"TP/1.1\r\nHost: a\r\n");
    let reqline = ready!(tokenizer.reqline(&mut bytes));
    assert_eq!(reqline.path, "/resume");
    assert_eq!(tokenizer.searched, 0);
    assert_eq!(tokenizer.consumed(), b"GET /resume HTTP/1.1\r\n".len());
    assert_eq!(&bytes[..], b"Host: a\r\n");
}

/// Feed `input` in `size` fragments, `input` must end with `body`.
fn parse_split(input: &[u8], size: usize) -> RequestHead {
    let mut parser = HeadParser::new(8 * 1024, 64);
    let mut bytes = BytesMut::new();
    let mut fed = 0;
    for fragment in input.chunks(size) {
        bytes.extend_from_slice(fragment);
        fed += fragment.len();
        match parser.parse(&mut bytes) {
            ParseResult::Ok(head) => {
                bytes.extend_from_slice(&input[fed..]);
                assert_eq!(&bytes[..], b"body");
                return head;
            }
            ParseResult::Err(err) => panic!("unexpected error: {err:?}"),
            ParseResult::Pending => {}
        }
    }
    panic!("head incomplete")
}

#[test]
fn test_fragmentation_invariance() {
    const INPUT: &[u8] = b"POST /upload?id=7 HTTP/1.1\r\n\
        Host: example.com\r\n\
        Accept: text/html\r\n\
        X-Dup: one\r\n\
        accept: */*\r\n\
        X-Dup: two\r\n\
        Content-Length: 4\r\n\
        \r\n\
        body";

    let whole = parse_split(INPUT, INPUT.len());
    assert_eq!(whole.method, Method::POST);
    assert_eq!(whole.path, "/upload?id=7");
    assert_eq!(whole.version, Version::HTTP_11);

    let names: Vec<_> = whole.headers.iter().map(|h| h.name()).collect();
    assert_eq!(names, ["host", "accept", "x-dup", "accept", "x-dup", "content-length"]);

    let dups: Vec<_> = whole.header_all("x-dup").map(|h| h.value()).collect();
    assert_eq!(dups, [&b"one"[..], &b"two"[..]]);
    assert_eq!(whole.header("accept").map(|h| h.value()), Some(&b"text/html"[..]));

    for size in [1, 2, 3, 5, 7, 16, 64] {
        assert_eq!(parse_split(INPUT, size), whole, "split {size}");
    }
}

#[test]
fn test_fragmentation_invariance_bytewise() {
    const INPUT: &[u8] = b"GET /x HTTP/1.0\r\nConnection: keep-alive\r\nX-A: 1\r\n\r\nbody";

    let whole = parse_split(INPUT, INPUT.len());
    for size in 1..INPUT.len() {
        assert_eq!(parse_split(INPUT, size), whole, "split {size}");
    }
}

#[test]
fn test_head_limits() {
    let mut parser = HeadParser::new(32, 64);
    let mut bytes = BytesMut::from(&b"GET / HTTP/1.1\r\nX-Long: aaaaaaaaaaaaaaaaaaaa"[..]);
    assert_eq!(
        parser.parse(&mut bytes).into_poll_result(),
        std::task::Poll::Ready(Err(ParseError::TooLarge))
    );

    let mut parser = HeadParser::new(1024, 2);
    let mut bytes = BytesMut::from(&b"GET / HTTP/1.1\r\nA: 1\r\nB: 2\r\nC: 3\r\n\r\n"[..]);
    assert!(matches!(parser.parse(&mut bytes), ParseResult::Err(ParseError::TooManyHeaders)));

    let mut parser = HeadParser::new(16, 64);
    let mut bytes = BytesMut::from(&b"\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n\r\n"[..]);
    assert!(matches!(parser.parse(&mut bytes), ParseResult::Err(ParseError::TooLarge)));
}

#[test]
fn test_content_length() {
    fn parse(values: &[&[u8]]) -> Result<Option<u64>, ParseError> {
        content_length(values.iter().copied())
    }

    assert_eq!(parse(&[]), Ok(None));
    assert_eq!(parse(&[b"0"]), Ok(Some(0)));
    assert_eq!(parse(&[b"1224"]), Ok(Some(1224)));
    assert_eq!(parse(&[b"5", b"5"]), Ok(Some(5)));
    assert_eq!(parse(&[b"5", b"6"]), Err(ParseError::InvalidContentLength));
    assert_eq!(parse(&[b""]), Err(ParseError::InvalidContentLength));
    assert_eq!(parse(&[b"-1"]), Err(ParseError::InvalidContentLength));
    assert_eq!(parse(&[b"+1"]), Err(ParseError::InvalidContentLength));
    assert_eq!(parse(&[b"0x10"]), Err(ParseError::InvalidContentLength));
    assert_eq!(parse(&[b"99999999999999999999999"]), Err(ParseError::InvalidContentLength));
}
