//! Request-scoped structured logging.
//!
//! A [`RequestLogger`] is built once per request. It captures the request
//! context up front and stamps it onto every record it emits, so all lines
//! belonging to one request can be correlated by `ip`, `method` and `path`
//! without the handler repeating them.
//!
//! Records are emitted through the [`Dispatch`] injected into
//! [`HttpLib`](crate::HttpLib), not through whatever subscriber happens to be
//! the thread default.

use std::fmt;

use tracing::{Dispatch, Level};

use crate::context::RequestContext;
use crate::event::Event;
use crate::request::Request;
use crate::response::ResponseWriter;

/// A logger pre-bound with the context of one request.
///
/// Exposes the named events of the [`Event`] catalog rather than a general
/// logging interface. Cheap to build, never shared between requests.
#[derive(Clone, Debug)]
pub struct RequestLogger {
    context: RequestContext,
    dispatch: Dispatch,
}

impl RequestLogger {
    pub(crate) fn new<B>(dispatch: Dispatch, req: &Request<B>) -> Self {
        Self { context: RequestContext::from_request(req), dispatch }
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// `bad input`, at INFO.
    pub fn bad_input(&self) {
        self.event(Event::BadInput);
    }

    /// `bad credentials`, at INFO.
    pub fn bad_credentials(&self) {
        self.event(Event::BadCredentials);
    }

    /// `function error`, at ERROR, with `error` set to `err`'s display text.
    ///
    /// The error is only recorded. It stays the caller's to handle.
    pub fn function_error<E: fmt::Display + ?Sized>(&self, err: &E) {
        emit(&self.dispatch, &self.context, Record {
            error: Some(&err),
            ..Record::event(Event::FunctionError)
        });
    }

    /// Emits any catalog event with the bound context.
    pub fn event(&self, event: Event) {
        emit(&self.dispatch, &self.context, Record::event(event));
    }

    /// A response writer whose outcome is logged with this request's context.
    pub fn writer(&self) -> ResponseWriter {
        ResponseWriter::bound(self.dispatch.clone(), self.context.clone())
    }
}

// ── Record emission ───────────────────────────────────────────────────────────

/// One structured record on top of the request context.
pub(crate) struct Record<'a> {
    pub(crate) level: Level,
    pub(crate) message: &'a str,
    pub(crate) event_id: Option<u16>,
    pub(crate) status: Option<u16>,
    pub(crate) error: Option<&'a dyn fmt::Display>,
}

impl Record<'_> {
    pub(crate) fn event(event: Event) -> Self {
        Self {
            level: event.level(),
            message: event.message(),
            event_id: Some(event.id()),
            status: None,
            error: None,
        }
    }
}

// `tracing` needs the level as a constant at each callsite.
macro_rules! record {
    ($level:expr, $ctx:ident, $rec:ident) => {
        tracing::event!(
            $level,
            ip = %$ctx.ip,
            method = %$ctx.method,
            path = %$ctx.path,
            host = %$ctx.host,
            scheme = %$ctx.scheme,
            user_agent = %$ctx.user_agent,
            event_id = $rec.event_id,
            status = $rec.status,
            error = $rec.error.map(tracing::field::display),
            "{}",
            $rec.message
        )
    };
}

pub(crate) fn emit(dispatch: &Dispatch, ctx: &RequestContext, rec: Record<'_>) {
    tracing::dispatcher::with_default(dispatch, || {
        if rec.level == Level::ERROR {
            record!(Level::ERROR, ctx, rec);
        } else if rec.level == Level::WARN {
            record!(Level::WARN, ctx, rec);
        } else if rec.level == Level::INFO {
            record!(Level::INFO, ctx, rec);
        } else if rec.level == Level::DEBUG {
            record!(Level::DEBUG, ctx, rec);
        } else {
            record!(Level::TRACE, ctx, rec);
        }
    });
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::logging::capture::Capture;

    fn logger(capture: &Capture) -> RequestLogger {
        let inner = http::Request::builder()
            .method("POST")
            .uri("/login")
            .header("host", "api.example.com")
            .header("user-agent", "curl/8.5.0")
            .body(())
            .unwrap();
        RequestLogger::new(capture.dispatch(), &Request::new(inner, "203.0.113.7:54321"))
    }

    #[test]
    fn bad_credentials_carries_the_request_context() {
        let capture = Capture::default();
        logger(&capture).bad_credentials();

        let records = capture.records();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec["level"], "INFO");
        assert_eq!(rec["fields"]["message"], "bad credentials");
        assert_eq!(rec["fields"]["event_id"], 2);
        assert_eq!(rec["fields"]["ip"], "203.0.113.7");
        assert_eq!(rec["fields"]["method"], "POST");
        assert_eq!(rec["fields"]["path"], "/login");
        assert_eq!(rec["fields"]["host"], "api.example.com");
        assert_eq!(rec["fields"]["scheme"], "");
        assert_eq!(rec["fields"]["user_agent"], "curl/8.5.0");
        assert!(rec["fields"].get("error").is_none());
    }

    #[test]
    fn bad_input_is_info() {
        let capture = Capture::default();
        logger(&capture).bad_input();

        let records = capture.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["level"], "INFO");
        assert_eq!(records[0]["fields"]["message"], "bad input");
        assert_eq!(records[0]["fields"]["event_id"], 1);
    }

    #[test]
    fn function_error_records_the_error_text() {
        let capture = Capture::default();
        let err = io::Error::new(io::ErrorKind::NotFound, "user 42 not found");
        logger(&capture).function_error(&err);

        let records = capture.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["level"], "ERROR");
        assert_eq!(records[0]["fields"]["message"], "function error");
        assert_eq!(records[0]["fields"]["event_id"], 3);
        assert_eq!(records[0]["fields"]["error"], "user 42 not found");
        assert_eq!(records[0]["fields"]["ip"], "203.0.113.7");
    }

    #[test]
    fn function_error_accepts_unsized_messages() {
        let capture = Capture::default();
        logger(&capture).function_error("connection reset");

        assert_eq!(capture.records()[0]["fields"]["error"], "connection reset");
    }

    #[test]
    fn context_is_fixed_at_construction() {
        let capture = Capture::default();
        let log = logger(&capture);

        log.bad_input();
        log.bad_credentials();

        let records = capture.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["fields"]["ip"], records[1]["fields"]["ip"]);
        assert_eq!(log.context().path, "/login");
    }
}
