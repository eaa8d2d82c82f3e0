//! One function per built-in kind that always fails with that kind.
//!
//! ```
//! use http_sentinel::raise;
//! use http_sentinel::SentinelError;
//!
//! fn lookup(id: u32) -> Result<&'static str, SentinelError> {
//!     if id != 1 {
//!         raise::not_found(Some("no such user"))?;
//!     }
//!     Ok("alice")
//! }
//!
//! assert_eq!(lookup(2).unwrap_err().status_code(), 404);
//! ```

use crate::error::SentinelError;
use crate::kind::{for_each_kind, ErrorKind};
use std::convert::Infallible;

fn raise(kind: ErrorKind, message: Option<&str>) -> Result<Infallible, SentinelError> {
    Err(match message {
        Some(message) => kind.error_with(message.to_owned()),
        None => kind.error(),
    })
}

macro_rules! define_raise {
    ($(($variant:ident, $fn_name:ident, $code:literal, $name:literal)),* $(,)?) => {
        $(
            #[doc = concat!("Fails with [`ErrorKind::", stringify!($variant), "`].")]
            pub fn $fn_name(message: Option<&str>) -> Result<Infallible, SentinelError> {
                raise(ErrorKind::$variant, message)
            }
        )*
    };
}
for_each_kind!(define_raise);
