pub mod classify;
pub mod error;
pub mod header;
pub mod kind;
pub mod raise;
pub mod request;

pub use classify::{is_kind, is_sentinel_error, resolve_error_kind};
pub use error::{RequestError, SentinelError};
pub use kind::{define_error_kind, CustomKind, ErrorKind, Kind};
pub use request::{ApiResponse, Options, Payload};
