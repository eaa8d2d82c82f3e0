use headers::{ContentType, HeaderMapExt};
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use mime::Mime;

// application/json, application/problem+json, application/x-json, ...
pub fn is_json(headers: &HeaderMap) -> bool {
    let typed = headers
        .typed_get::<ContentType>()
        .map(Mime::from)
        .is_some_and(|mime| mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON));
    typed
        || headers.get_all(CONTENT_TYPE).iter().any(|value| {
            value
                .as_bytes()
                .windows(4)
                .any(|w| w.eq_ignore_ascii_case(b"json"))
        })
}
