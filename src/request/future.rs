use super::{ApiResponse, Error, Payload};
use crate::classify::resolve_error_kind;
use crate::error::RequestError;
use futures::future::{pending, AbortRegistration, Abortable, Pending};
use http_body_util::BodyExt;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::Sleep;
use tower::ServiceExt;

pub(super) fn send<S, T, U>(
    service: S,
    request: Result<http::Request<T>, Error<S::Error, U::Error>>,
    timeout: Option<Duration>,
    abort: Option<AbortRegistration>,
    span: tracing::Span,
) -> Future<S, T, U>
where
    S: tower::Service<http::Request<T>>,
    U: http_body::Body,
{
    let state = match request {
        Ok(request) => State::S0(service.oneshot(request)),
        Err(e) => State::S1(Some(e)),
    };
    Future {
        state,
        timeout,
        deadline: None,
        abort: abort.map(|registration| Abortable::new(pending(), registration)),
        span,
    }
}

/// Resolves to an [`ApiResponse`] for every classified outcome.
///
/// The timer starts on first poll and needs a Tokio runtime with time enabled.
#[pin_project::pin_project]
pub struct Future<S, T, U>
where
    S: tower::Service<http::Request<T>>,
    U: http_body::Body,
{
    #[pin]
    state: State<S, T, U>,
    timeout: Option<Duration>,
    #[pin]
    deadline: Option<Sleep>,
    #[pin]
    abort: Option<Abortable<Pending<()>>>,
    span: tracing::Span,
}

#[pin_project::pin_project(project = StateProj)]
#[allow(clippy::large_enum_variant)]
enum State<S, T, U>
where
    S: tower::Service<http::Request<T>>,
    U: http_body::Body,
{
    S0(#[pin] tower::util::Oneshot<S, http::Request<T>>),
    S1(Option<Error<S::Error, U::Error>>),
    S2(
        #[pin] http_body_util::combinators::Collect<U>,
        Option<http::response::Parts>,
    ),
}

impl<S, T, U> std::future::Future for Future<S, T, U>
where
    S: tower::Service<http::Request<T>, Response = http::Response<U>>,
    U: http_body::Body,
{
    type Output = Result<ApiResponse<Payload>, Error<S::Error, U::Error>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        let _enter = this.span.enter();
        if let Some(timeout) = this.timeout.take() {
            this.deadline.set(Some(tokio::time::sleep(timeout)));
        }
        loop {
            match this.state.as_mut().project() {
                StateProj::S0(f) => match std::future::Future::poll(f, cx) {
                    Poll::Ready(response) => {
                        let response = match response {
                            Ok(response) => response,
                            Err(e) => return Poll::Ready(Err(Error::Service(e))),
                        };
                        let status = response.status();
                        if !status.is_success() {
                            let e = resolve_error_kind(Some(status.as_u16()));
                            tracing::debug!(%status, kind = e.name(), "request failed");
                            return Poll::Ready(Ok(ApiResponse::err(RequestError::canonical(&e))));
                        }
                        let (parts, body) = response.into_parts();
                        this.state.set(State::S2(body.collect(), Some(parts)));
                    }
                    Poll::Pending => break,
                },
                StateProj::S1(state) => {
                    let e = state.take().expect("polled after completion");
                    return Poll::Ready(Err(e));
                }
                StateProj::S2(f, state) => match std::future::Future::poll(f, cx) {
                    Poll::Ready(body) => {
                        let body = match body {
                            Ok(body) => body.to_bytes(),
                            Err(e) => return Poll::Ready(Err(Error::Body(e))),
                        };
                        let parts = state.take().expect("polled after completion");
                        let payload = match Payload::parse(&parts.headers, body) {
                            Ok(payload) => payload,
                            Err(e) => return Poll::Ready(Err(Error::Json(e))),
                        };
                        tracing::debug!(status = %parts.status, payload = payload.kind(), "request succeeded");
                        return Poll::Ready(Ok(ApiResponse::ok(payload)));
                    }
                    Poll::Pending => break,
                },
            }
        }

        let timed_out = this
            .deadline
            .as_mut()
            .as_pin_mut()
            .is_some_and(|f| std::future::Future::poll(f, cx).is_ready());
        let aborted = timed_out
            || this
                .abort
                .as_mut()
                .as_pin_mut()
                .is_some_and(|f| std::future::Future::poll(f, cx).is_ready());
        if aborted {
            tracing::debug!(timed_out, "request aborted");
            // drops the in-flight transport future
            this.state.set(State::S1(None));
            return Poll::Ready(Ok(ApiResponse::aborted()));
        }
        Poll::Pending
    }
}
