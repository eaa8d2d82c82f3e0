use crate::kind::{Discriminant, ErrorKind, Kind};
use std::borrow::Cow;

pub const ABORT_ERROR_NAME: &str = "AbortError";
pub const ABORT_ERROR_MESSAGE: &str = "Request was aborted by the client";

/// An error value belonging to the taxonomy.
///
/// The name and status code are fixed by the kind it was built from; only the message
/// can vary per instance. Two values are the same kind iff their discriminants match,
/// regardless of what the name or code say.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SentinelError {
    discriminant: Discriminant,
    name: Cow<'static, str>,
    message: Cow<'static, str>,
    status_code: u16,
}

impl SentinelError {
    pub fn new<K>(kind: &K) -> Self
    where
        K: Kind + ?Sized,
    {
        Self {
            discriminant: kind.discriminant(),
            name: kind.name(),
            message: kind.default_message(),
            status_code: kind.status_code(),
        }
    }

    pub fn with_message<K, M>(kind: &K, message: M) -> Self
    where
        K: Kind + ?Sized,
        M: Into<Cow<'static, str>>,
    {
        Self {
            message: message.into(),
            ..Self::new(kind)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The built-in kind, or `None` for errors made from a [`CustomKind`](crate::CustomKind).
    pub fn kind(&self) -> Option<ErrorKind> {
        self.discriminant.builtin()
    }

    pub fn is<K>(&self, kind: &K) -> bool
    where
        K: Kind + ?Sized,
    {
        self.discriminant == kind.discriminant()
    }
}

impl From<ErrorKind> for SentinelError {
    fn from(value: ErrorKind) -> Self {
        Self::new(&value)
    }
}

/// Transport-agnostic view of a failed request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{name}: {message}")]
pub struct RequestError {
    pub message: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl RequestError {
    pub fn aborted() -> Self {
        Self {
            message: ABORT_ERROR_MESSAGE.to_owned(),
            name: ABORT_ERROR_NAME.to_owned(),
            status_code: None,
        }
    }

    /// Flattens `error` with its message replaced by the kind's name.
    pub fn canonical(error: &SentinelError) -> Self {
        Self {
            message: error.name().to_owned(),
            name: error.name().to_owned(),
            status_code: Some(error.status_code()),
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.name == ABORT_ERROR_NAME && self.status_code.is_none()
    }
}

impl From<SentinelError> for RequestError {
    fn from(value: SentinelError) -> Self {
        Self {
            message: value.message.into_owned(),
            name: value.name.into_owned(),
            status_code: Some(value.status_code),
        }
    }
}
