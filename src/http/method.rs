/// HTTP Method.
///
/// Covers the methods of [RFC9110] and PATCH from [RFC5789]. Extension methods are rejected
/// while parsing the request line.
///
/// [RFC5789]: https://www.rfc-editor.org/rfc/rfc5789
/// [RFC9110]: <https://www.rfc-editor.org/rfc/rfc9110.html#name-methods>
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Method(Inner);

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
enum Inner {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl Method {
    /// `GET`
    pub const GET: Method = Method(Inner::Get);
    /// `HEAD`, the response carries no content.
    pub const HEAD: Method = Method(Inner::Head);
    /// `POST`
    pub const POST: Method = Method(Inner::Post);
    /// `PUT`
    pub const PUT: Method = Method(Inner::Put);
    /// `DELETE`
    pub const DELETE: Method = Method(Inner::Delete);
    /// `CONNECT`
    pub const CONNECT: Method = Method(Inner::Connect);
    /// `OPTIONS`
    pub const OPTIONS: Method = Method(Inner::Options);
    /// `TRACE`
    pub const TRACE: Method = Method(Inner::Trace);
    /// `PATCH`
    pub const PATCH: Method = Method(Inner::Patch);

    /// Create [`Method`] from bytes, method names are case-sensitive.
    #[inline]
    pub const fn from_bytes(src: &[u8]) -> Option<Method> {
        let inner = match src {
            b"GET" => Inner::Get,
            b"HEAD" => Inner::Head,
            b"POST" => Inner::Post,
            b"PUT" => Inner::Put,
            b"DELETE" => Inner::Delete,
            b"CONNECT" => Inner::Connect,
            b"OPTIONS" => Inner::Options,
            b"TRACE" => Inner::Trace,
            b"PATCH" => Inner::Patch,
            _ => return None,
        };
        Some(Method(inner))
    }

    /// Returns string representation of the method.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            Inner::Get => "GET",
            Inner::Head => "HEAD",
            Inner::Post => "POST",
            Inner::Put => "PUT",
            Inner::Delete => "DELETE",
            Inner::Connect => "CONNECT",
            Inner::Options => "OPTIONS",
            Inner::Trace => "TRACE",
            Inner::Patch => "PATCH",
        }
    }
}

impl std::fmt::Debug for Method {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self.as_str(), f)
    }
}

impl std::fmt::Display for Method {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
