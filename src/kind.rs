use crate::error::SentinelError;
use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// https://www.rfc-editor.org/rfc/rfc9110#name-status-codes
macro_rules! for_each_kind {
    ($m:ident) => {
        $m! {
            (BadRequest, bad_request, 400, "BadRequest"),
            (Unauthorized, unauthorized, 401, "Unauthorized"),
            (PaymentRequired, payment_required, 402, "PaymentRequired"),
            (Forbidden, forbidden, 403, "Forbidden"),
            (NotFound, not_found, 404, "NotFound"),
            (MethodNotAllowed, method_not_allowed, 405, "MethodNotAllowed"),
            (NotAcceptable, not_acceptable, 406, "NotAcceptable"),
            (ProxyAuthenticationRequired, proxy_authentication_required, 407, "ProxyAuthenticationRequired"),
            (RequestTimeout, request_timeout, 408, "RequestTimeout"),
            (Conflict, conflict, 409, "Conflict"),
            (Gone, gone, 410, "Gone"),
            (LengthRequired, length_required, 411, "LengthRequired"),
            (PreconditionFailed, precondition_failed, 412, "PreconditionFailed"),
            (PayloadTooLarge, payload_too_large, 413, "PayloadTooLarge"),
            (UriTooLong, uri_too_long, 414, "URITooLong"),
            (UnsupportedMediaType, unsupported_media_type, 415, "UnsupportedMediaType"),
            (RangeNotSatisfiable, range_not_satisfiable, 416, "RangeNotSatisfiable"),
            (ExpectationFailed, expectation_failed, 417, "ExpectationFailed"),
            (ImATeapot, im_a_teapot, 418, "ImATeapot"),
            (MisdirectedRequest, misdirected_request, 421, "MisdirectedRequest"),
            (UnprocessableEntity, unprocessable_entity, 422, "UnprocessableEntity"),
            (Locked, locked, 423, "Locked"),
            (FailedDependency, failed_dependency, 424, "FailedDependency"),
            (TooEarly, too_early, 425, "TooEarly"),
            (UpgradeRequired, upgrade_required, 426, "UpgradeRequired"),
            (PreconditionRequired, precondition_required, 428, "PreconditionRequired"),
            (TooManyRequests, too_many_requests, 429, "TooManyRequests"),
            (RequestHeaderFieldsTooLarge, request_header_fields_too_large, 431, "RequestHeaderFieldsTooLarge"),
            (UnavailableForLegalReasons, unavailable_for_legal_reasons, 451, "UnavailableForLegalReasons"),
            (InternalServer, internal_server, 500, "InternalServer"),
            (NotImplemented, not_implemented, 501, "NotImplemented"),
            (BadGateway, bad_gateway, 502, "BadGateway"),
            (ServiceUnavailable, service_unavailable, 503, "ServiceUnavailable"),
            (GatewayTimeout, gateway_timeout, 504, "GatewayTimeout"),
            (HttpVersionNotSupported, http_version_not_supported, 505, "HTTPVersionNotSupported"),
            (VariantAlsoNegotiates, variant_also_negotiates, 506, "VariantAlsoNegotiates"),
            (InsufficientStorage, insufficient_storage, 507, "InsufficientStorage"),
            (LoopDetected, loop_detected, 508, "LoopDetected"),
            (NotExtended, not_extended, 510, "NotExtended"),
            (NetworkAuthenticationRequired, network_authentication_required, 511, "NetworkAuthenticationRequired"),
            (Unknown, unknown_error, 0, "UnknownError"),
        }
    };
}
pub(crate) use for_each_kind;

macro_rules! define_error_kinds {
    ($(($variant:ident, $fn_name:ident, $code:literal, $name:literal)),* $(,)?) => {
        /// The built-in HTTP error taxonomy.
        ///
        /// One variant per registered status code, plus [`ErrorKind::Unknown`] (status `0`)
        /// for anything absent from the registry.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ErrorKind {
            $(
                #[doc = concat!("`", stringify!($code), "` ", $name)]
                $variant,
            )*
        }

        impl ErrorKind {
            /// Every built-in kind, in status code order with `Unknown` last.
            pub const ALL: &'static [ErrorKind] = &[$(ErrorKind::$variant),*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(ErrorKind::$variant => $name,)*
                }
            }

            pub const fn status_code(self) -> u16 {
                match self {
                    $(ErrorKind::$variant => $code,)*
                }
            }

            /// Built-in kinds use their name as the default message.
            pub const fn default_message(self) -> &'static str {
                self.name()
            }

            /// Exact lookup in the registry. No range fallback.
            pub const fn from_status_code(status_code: u16) -> Option<Self> {
                match status_code {
                    $($code => Some(ErrorKind::$variant),)*
                    _ => None,
                }
            }
        }
    };
}
for_each_kind!(define_error_kinds);

impl ErrorKind {
    pub fn error(self) -> SentinelError {
        SentinelError::new(&self)
    }

    pub fn error_with<M>(self, message: M) -> SentinelError
    where
        M: Into<Cow<'static, str>>,
    {
        SentinelError::with_message(&self, message)
    }
}

impl From<http::StatusCode> for ErrorKind {
    fn from(value: http::StatusCode) -> Self {
        Self::from_status_code(value.as_u16()).unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ErrorKind::name(*self))
    }
}

/// Opaque identity of a kind, carried by every [`SentinelError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Discriminant(Repr);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Repr {
    Builtin(ErrorKind),
    Custom(u64),
}

impl Discriminant {
    pub(crate) fn builtin(self) -> Option<ErrorKind> {
        match self.0 {
            Repr::Builtin(kind) => Some(kind),
            Repr::Custom(_) => None,
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::ErrorKind {}
    impl Sealed for super::CustomKind {}
}

/// Anything that can construct a [`SentinelError`].
pub trait Kind: sealed::Sealed {
    fn discriminant(&self) -> Discriminant;
    fn name(&self) -> Cow<'static, str>;
    fn status_code(&self) -> u16;
    fn default_message(&self) -> Cow<'static, str>;
}

impl Kind for ErrorKind {
    fn discriminant(&self) -> Discriminant {
        Discriminant(Repr::Builtin(*self))
    }

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(ErrorKind::name(*self))
    }

    fn status_code(&self) -> u16 {
        ErrorKind::status_code(*self)
    }

    fn default_message(&self) -> Cow<'static, str> {
        Cow::Borrowed(ErrorKind::default_message(*self))
    }
}

static NEXT_CUSTOM_ID: AtomicU64 = AtomicU64::new(0);

/// A kind defined outside the built-in registry.
///
/// Each call to [`define_error_kind`] yields a distinct kind, even when the name and
/// status code collide with another one. Clones share the identity of the original.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CustomKind {
    id: u64,
    name: Cow<'static, str>,
    status_code: u16,
    default_message: Cow<'static, str>,
}

pub fn define_error_kind<N, M>(name: N, status_code: u16, default_message: M) -> CustomKind
where
    N: Into<Cow<'static, str>>,
    M: Into<Cow<'static, str>>,
{
    CustomKind {
        id: NEXT_CUSTOM_ID.fetch_add(1, Ordering::Relaxed),
        name: name.into(),
        status_code,
        default_message: default_message.into(),
    }
}

impl CustomKind {
    pub fn error(&self) -> SentinelError {
        SentinelError::new(self)
    }

    pub fn error_with<M>(&self, message: M) -> SentinelError
    where
        M: Into<Cow<'static, str>>,
    {
        SentinelError::with_message(self, message)
    }
}

impl Kind for CustomKind {
    fn discriminant(&self) -> Discriminant {
        Discriminant(Repr::Custom(self.id))
    }

    fn name(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    fn status_code(&self) -> u16 {
        self.status_code
    }

    fn default_message(&self) -> Cow<'static, str> {
        self.default_message.clone()
    }
}
