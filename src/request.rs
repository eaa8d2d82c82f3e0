mod future;

pub use future::Future;

use crate::error::RequestError;
use bytes::Bytes;
use futures::future::AbortRegistration;
use futures::FutureExt;
use headers::{Header, HeaderMapExt};
use http::header::IntoHeaderName;
use http::{Extensions, HeaderMap, HeaderValue, Method, Request, Response, Uri};
use http_body::Body;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tower::Service;

#[derive(Debug, thiserror::Error)]
pub enum Error<S, B> {
    #[error(transparent)]
    Body(B),
    #[error(transparent)]
    Http(http::Error),
    #[error(transparent)]
    Json(serde_json::Error),
    #[error(transparent)]
    Service(S),
}

/// Outcome of a request: either data or a normalized error, never both.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse<T>(Result<T, RequestError>);

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self(Ok(data))
    }

    pub fn err(error: RequestError) -> Self {
        Self(Err(error))
    }

    pub fn aborted() -> Self {
        Self::err(RequestError::aborted())
    }

    pub fn success(&self) -> bool {
        self.0.is_ok()
    }

    pub fn data(&self) -> Option<&T> {
        self.0.as_ref().ok()
    }

    pub fn error(&self) -> Option<&RequestError> {
        self.0.as_ref().err()
    }

    pub fn into_data(self) -> Option<T> {
        self.0.ok()
    }

    pub fn into_result(self) -> Result<T, RequestError> {
        self.0
    }

    pub fn map<F, V>(self, f: F) -> ApiResponse<V>
    where
        F: FnOnce(T) -> V,
    {
        ApiResponse(self.0.map(f))
    }
}

impl<T> From<Result<T, RequestError>> for ApiResponse<T> {
    fn from(value: Result<T, RequestError>) -> Self {
        Self(value)
    }
}

impl<T> serde::Serialize for ApiResponse<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(serde::Serialize)]
        struct Repr<'a, T> {
            success: bool,
            data: Option<&'a T>,
            error: Option<&'a RequestError>,
        }
        let repr = Repr {
            success: self.success(),
            data: self.data(),
            error: self.error(),
        };
        serde::Serialize::serialize(&repr, serializer)
    }
}

/// A successful response body, shaped by its content type.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}

impl Payload {
    fn parse(headers: &HeaderMap, body: Bytes) -> Result<Self, serde_json::Error> {
        // an empty body has nothing to parse, whatever the content type claims
        if body.is_empty() || !crate::header::is_json(headers) {
            Ok(Self::Text(String::from_utf8_lossy(&body).into_owned()))
        } else {
            serde_json::from_slice(&body).map(Self::Json)
        }
    }

    /// Deserializes into `T`. Text is presented as a JSON string, never parsed.
    pub fn json<T>(&self) -> Result<T, serde_json::Error>
    where
        T: DeserializeOwned,
    {
        match self {
            Self::Json(value) => T::deserialize(value),
            Self::Text(text) => T::deserialize(serde_json::Value::from(text.as_str())),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text.as_str()),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Text(_) => "text",
        }
    }
}

/// Caller-supplied request parts, passed to the transport unchanged.
///
/// `extensions` is where transport-specific options go.
pub struct Options<T> {
    pub headers: HeaderMap,
    pub body: Option<T>,
    pub extensions: Extensions,
}

impl<T> Default for Options<T> {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            body: None,
            extensions: Extensions::new(),
        }
    }
}

impl<T> fmt::Debug for Options<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("extensions", &self.extensions)
            .finish()
    }
}

impl<T> Options<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header<K>(mut self, name: K, value: HeaderValue) -> Self
    where
        K: IntoHeaderName,
    {
        self.headers.insert(name, value);
        self
    }

    pub fn typed_header<H>(mut self, header: H) -> Self
    where
        H: Header,
    {
        self.headers.typed_insert(header);
        self
    }

    pub fn body(mut self, body: T) -> Self {
        self.body = Some(body);
        self
    }

    pub fn extension<X>(mut self, extension: X) -> Self
    where
        X: Clone + Send + Sync + 'static,
    {
        self.extensions.insert(extension);
        self
    }
}

pub fn request<R, T>(method: Method, target: R, options: Options<T>) -> Builder<T>
where
    Uri: TryFrom<R>,
    <Uri as TryFrom<R>>::Error: Into<http::Error>,
{
    Builder {
        method,
        uri: Uri::try_from(target).map_err(Into::into),
        options,
        timeout: None,
        abort: None,
    }
}

macro_rules! verbs {
    ($($name:ident => $method:ident,)*) => {
        $(
            pub fn $name<R, T>(target: R, options: Options<T>) -> Builder<T>
            where
                Uri: TryFrom<R>,
                <Uri as TryFrom<R>>::Error: Into<http::Error>,
            {
                request(Method::$method, target, options)
            }
        )*
    };
}
verbs! {
    get => GET,
    post => POST,
    put => PUT,
    patch => PATCH,
    delete => DELETE,
    head => HEAD,
    options => OPTIONS,
}

pub struct Builder<T> {
    method: Method,
    uri: Result<Uri, http::Error>,
    options: Options<T>,
    timeout: Option<Duration>,
    abort: Option<AbortRegistration>,
}

impl<T> Builder<T> {
    /// Resolves to an aborted response if the transport has not finished within `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolves to an aborted response once the paired `AbortHandle` is aborted.
    pub fn abortable(mut self, registration: AbortRegistration) -> Self {
        self.abort = Some(registration);
        self
    }

    pub fn send<S, U>(self, service: S) -> Future<S, T, U>
    where
        S: Service<Request<T>, Response = Response<U>>,
        T: Default,
        U: Body,
    {
        let Self {
            method,
            uri,
            options,
            timeout,
            abort,
        } = self;
        let Options {
            headers,
            body,
            extensions,
        } = options;
        let span = match &uri {
            Ok(uri) => tracing::debug_span!("request", %method, %uri),
            Err(_) => tracing::debug_span!("request", %method),
        };
        let request = uri.and_then(|uri| {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(h) = builder.headers_mut() {
                *h = headers;
            }
            if let Some(e) = builder.extensions_mut() {
                *e = extensions;
            }
            builder.body(body.unwrap_or_default())
        });
        future::send(service, request.map_err(Error::Http), timeout, abort, span)
    }

    /// Like [`send`](Self::send), but deserializes the payload into `D`.
    ///
    /// A payload that does not fit `D` is an `Err(Error::Json)`. Text payloads are
    /// presented as a JSON string.
    pub fn send_json<S, U, D>(
        self,
        service: S,
    ) -> impl std::future::Future<Output = Result<ApiResponse<D>, Error<S::Error, U::Error>>>
    where
        S: Service<Request<T>, Response = Response<U>>,
        T: Default,
        U: Body,
        D: DeserializeOwned,
    {
        self.send(service)
            .map(|result| match result.map(ApiResponse::into_result) {
                Ok(Ok(payload)) => payload.json().map(ApiResponse::ok).map_err(Error::Json),
                Ok(Err(e)) => Ok(ApiResponse::err(e)),
                Err(e) => Err(e),
            })
    }
}
