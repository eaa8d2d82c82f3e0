use crate::error::SentinelError;
use crate::kind::{ErrorKind, Kind};
use std::error::Error;

/// Maps a status code to its kind, falling back to [`ErrorKind::Unknown`].
///
/// The result is returned, not raised. Callers decide whether to `return Err(..)` it.
pub fn resolve_error_kind(status_code: Option<u16>) -> SentinelError {
    status_code
        .and_then(ErrorKind::from_status_code)
        .unwrap_or(ErrorKind::Unknown)
        .error()
}

/// Whether `error` was built from one of the built-in kinds.
///
/// Errors from [`define_error_kind`](crate::define_error_kind) and foreign types with the
/// same fields are never members.
pub fn is_sentinel_error(error: &(dyn Error + 'static)) -> bool {
    error
        .downcast_ref::<SentinelError>()
        .is_some_and(|e| e.kind().is_some())
}

pub fn is_kind<K>(error: &(dyn Error + 'static), kind: &K) -> bool
where
    K: Kind + ?Sized,
{
    error
        .downcast_ref::<SentinelError>()
        .is_some_and(|e| e.is(kind))
}

#[cfg(test)]
mod tests {
    use super::{is_kind, is_sentinel_error, resolve_error_kind};
    use crate::kind::{define_error_kind, ErrorKind};
    use std::error::Error;
    use std::fmt;
    use std::io;

    #[derive(Debug)]
    struct LookAlike {
        name: &'static str,
        status_code: u16,
    }
    impl fmt::Display for LookAlike {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{} ({})", self.name, self.status_code)
        }
    }
    impl Error for LookAlike {}

    #[test]
    fn test_resolve_registered() {
        for kind in ErrorKind::ALL {
            if *kind == ErrorKind::Unknown {
                continue;
            }
            let e = resolve_error_kind(Some(kind.status_code()));
            assert_eq!(e.status_code(), kind.status_code());
            assert_eq!(e.name(), kind.name());
            assert_eq!(e.message(), kind.name());
            assert!(e.is(kind));
        }
    }

    #[test]
    fn test_resolve_unknown() {
        for status_code in [None, Some(0), Some(200), Some(302), Some(499), Some(509), Some(999)] {
            let e = resolve_error_kind(status_code);
            assert_eq!(e.status_code(), 0);
            assert_eq!(e.name(), "UnknownError");
            assert_eq!(e.message(), "UnknownError");
            assert_eq!(e.kind(), Some(ErrorKind::Unknown));
        }
    }

    #[test]
    fn test_is_sentinel_error() {
        for kind in ErrorKind::ALL {
            assert!(is_sentinel_error(&kind.error()));
        }
        assert!(is_sentinel_error(&ErrorKind::BadRequest.error_with(
            "Invalid request format"
        )));

        let custom = define_error_kind("CustomError", 400, "Example message");
        assert!(!is_sentinel_error(&custom.error()));
        assert!(!is_sentinel_error(&LookAlike {
            name: "NotFound",
            status_code: 404,
        }));
        assert!(!is_sentinel_error(&io::Error::other("NotFound")));
    }

    #[test]
    fn test_is_sentinel_error_boxed() {
        let e: Box<dyn Error + Send + Sync> = Box::new(ErrorKind::NotFound.error());
        assert!(is_sentinel_error(&*e));
        assert!(is_kind(&*e, &ErrorKind::NotFound));
    }

    #[test]
    fn test_is_kind() {
        let e = resolve_error_kind(Some(400));
        assert!(is_kind(&e, &ErrorKind::BadRequest));
        assert!(!is_kind(&e, &ErrorKind::Unauthorized));

        let e = resolve_error_kind(None);
        assert!(is_kind(&e, &ErrorKind::Unknown));

        let custom = define_error_kind("BadRequest", 400, "BadRequest");
        assert!(!is_kind(&e, &custom));
        assert!(is_kind(&custom.error(), &custom));
        assert!(!is_kind(&custom.error(), &ErrorKind::BadRequest));
        assert!(!is_kind(
            &LookAlike {
                name: "BadRequest",
                status_code: 400,
            },
            &ErrorKind::BadRequest,
        ));
    }
}
