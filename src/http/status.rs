use std::num::NonZeroU16;

/// HTTP [Status Code][rfc].
///
/// Any three digit code is accepted, the constants below cover the common ones.
///
/// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#name-status-codes>
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusCode(NonZeroU16);

impl Default for StatusCode {
    #[inline]
    fn default() -> Self {
        Self::OK
    }
}

impl StatusCode {
    /// Create [`StatusCode`] from integer, returns `None` if the code is not three digits.
    #[inline]
    pub const fn from_u16(code: u16) -> Option<StatusCode> {
        match code {
            100..=999 => match NonZeroU16::new(code) {
                Some(nonzero) => Some(Self(nonzero)),
                None => None,
            },
            _ => None,
        }
    }

    /// Returns status code value, e.g: `200`.
    #[inline]
    pub const fn as_u16(&self) -> u16 {
        self.0.get()
    }

    /// Returns `true` for `1xx` codes.
    #[inline]
    pub const fn is_informational(&self) -> bool {
        self.0.get() < 200
    }

    /// Returns `true` if a response with this status may carry content.
    ///
    /// `1xx`, `204` and `304` responses never have content or `content-length`.
    ///
    /// [rfc](https://www.rfc-editor.org/rfc/rfc9110.html#name-content-length)
    #[inline]
    pub const fn allows_body(&self) -> bool {
        !matches!(self.0.get(), 100..=199 | 204 | 304)
    }
}

impl StatusCode {
    /// `100`
    pub const CONTINUE: Self = Self::new(100);

    /// `101`
    pub const SWITCHING_PROTOCOLS: Self = Self::new(101);

    /// `200`
    pub const OK: Self = Self::new(200);

    /// `201`
    pub const CREATED: Self = Self::new(201);

    /// `204`, response carries no content.
    pub const NO_CONTENT: Self = Self::new(204);

    /// `301`
    pub const MOVED_PERMANENTLY: Self = Self::new(301);

    /// `302`
    pub const FOUND: Self = Self::new(302);

    /// `304`, response carries no content.
    pub const NOT_MODIFIED: Self = Self::new(304);

    /// `400`
    pub const BAD_REQUEST: Self = Self::new(400);

    /// `404`
    pub const NOT_FOUND: Self = Self::new(404);

    /// `405`
    pub const METHOD_NOT_ALLOWED: Self = Self::new(405);

    /// `408`
    pub const REQUEST_TIMEOUT: Self = Self::new(408);

    /// `411`
    pub const LENGTH_REQUIRED: Self = Self::new(411);

    /// `413`
    pub const CONTENT_TOO_LARGE: Self = Self::new(413);

    /// `431`
    pub const REQUEST_HEADER_FIELDS_TOO_LARGE: Self = Self::new(431);

    /// `500`
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(500);

    /// `501`
    pub const NOT_IMPLEMENTED: Self = Self::new(501);

    /// `505`
    pub const HTTP_VERSION_NOT_SUPPORTED: Self = Self::new(505);

    const fn new(code: u16) -> Self {
        match Self::from_u16(code) {
            Some(status) => status,
            None => panic!("status code must be three digits"),
        }
    }
}

impl std::fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("StatusCode").field(&self.as_u16()).finish()
    }
}
