//! JSON responses and cookie instructions.
//!
//! Every JSON body leaves in the same envelope, `{"data": …}`. The status is
//! on the status line and nowhere else. Handlers do not build bodies by hand
//! and do not see encoding errors: a payload that will not serialize becomes
//! a 500 with a fixed body, and the reason goes to the log.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, SET_COOKIE};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use http_body_util::Full;
use serde::Serialize;
use tracing::{Dispatch, Level};

use crate::context::RequestContext;
use crate::cookies::{CookieOptions, removal_header_value};
use crate::logger::{Record, emit};

/// The outgoing response type, ready to hand to hyper.
pub type Response = http::Response<Full<Bytes>>;

/// Body sent whenever the payload cannot be encoded.
pub const FALLBACK_BODY: &str = r#"{"data":"internal server error"}"#;

#[derive(Serialize)]
struct Envelope<'a, T: ?Sized> {
    data: &'a T,
}

// ── ResponseWriter ────────────────────────────────────────────────────────────

/// Collects headers and cookies, then finishes with exactly one JSON body.
///
/// [`json`](Self::json) takes `self`, so nothing can be written after the
/// body. Obtain one from [`HttpLib::writer`](crate::HttpLib::writer), or from
/// [`RequestLogger::writer`](crate::RequestLogger::writer) to have the
/// outcome logged with the request's context.
///
/// ```rust
/// use http::StatusCode;
/// use httplib::{CookieOptions, HttpLib};
///
/// let lib = HttpLib::default();
/// let mut w = lib.writer();
/// w.set_cookie(&CookieOptions::new("session", "abc123").http_only(true));
/// let res = w.json(StatusCode::CREATED, &["alice", "bob"]);
///
/// assert_eq!(res.status(), StatusCode::CREATED);
/// assert_eq!(res.headers()["content-type"], "application/json");
/// ```
#[derive(Debug)]
pub struct ResponseWriter {
    headers: HeaderMap,
    dispatch: Dispatch,
    context: Option<RequestContext>,
}

impl ResponseWriter {
    /// An unbound writer logging through the current default dispatcher.
    pub fn new() -> Self {
        Self::with_dispatch(tracing::dispatcher::get_default(Dispatch::clone))
    }

    pub(crate) fn with_dispatch(dispatch: Dispatch) -> Self {
        Self { headers: HeaderMap::new(), dispatch, context: None }
    }

    pub(crate) fn bound(dispatch: Dispatch, context: RequestContext) -> Self {
        Self { headers: HeaderMap::new(), dispatch, context: Some(context) }
    }

    /// Appends a response header. Names or values the `http` crate rejects
    /// are dropped with a warning.
    pub fn header(&mut self, name: &str, value: &str) {
        let name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(n) => n,
            Err(e) => return self.warn("invalid header name dropped", &e),
        };
        match HeaderValue::from_str(value) {
            Ok(v) => { self.headers.append(name, v); }
            Err(e) => self.warn("invalid header value dropped", &e),
        }
    }

    /// Appends one `Set-Cookie` header for `cookie`. A cookie with an invalid
    /// name is dropped with a warning.
    pub fn set_cookie(&mut self, cookie: &CookieOptions) {
        match cookie.to_header_value() {
            Ok(value) => self.append_set_cookie(value),
            Err(e) => self.warn("invalid cookie dropped", &e),
        }
    }

    /// Tells the client to delete the cookie `name`. Calling it twice
    /// appends two identical headers.
    pub fn remove_cookie(&mut self, name: &str) {
        self.append_set_cookie(removal_header_value(name));
    }

    /// Finishes the response: `status`, `Content-Type: application/json`,
    /// body `{"data": data}`.
    ///
    /// If `data` fails to serialize the response is [`FALLBACK_BODY`] with
    /// `500 Internal Server Error` instead, and the encoder's error is logged.
    /// Headers and cookies set earlier are kept either way.
    pub fn json<T: Serialize + ?Sized>(self, status: StatusCode, data: &T) -> Response {
        let (status, body) = match serde_json::to_vec(&Envelope { data }) {
            Ok(body) => (status, Bytes::from(body)),
            Err(e) => {
                self.log(Record {
                    level: Level::ERROR,
                    message: "response encoding failed",
                    event_id: None,
                    status: Some(status.as_u16()),
                    error: Some(&e),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Bytes::from_static(FALLBACK_BODY.as_bytes()))
            }
        };

        if self.context.is_some() {
            self.log(Record {
                level: Level::DEBUG,
                message: "response written",
                event_id: None,
                status: Some(status.as_u16()),
                error: None,
            });
        }

        let mut response = http::Response::new(Full::new(body));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers;
        response.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }

    fn append_set_cookie(&mut self, value: String) {
        match HeaderValue::try_from(value) {
            Ok(v) => { self.headers.append(SET_COOKIE, v); }
            Err(e) => self.warn("invalid Set-Cookie header dropped", &e),
        }
    }

    fn warn(&self, message: &str, err: &dyn std::fmt::Display) {
        self.log(Record { level: Level::WARN, message, event_id: None, status: None, error: Some(err) });
    }

    fn log(&self, record: Record<'_>) {
        match &self.context {
            Some(ctx) => emit(&self.dispatch, ctx, record),
            None => emit(&self.dispatch, &RequestContext::default(), record),
        }
    }
}

impl Default for ResponseWriter {
    fn default() -> Self { Self::new() }
}
