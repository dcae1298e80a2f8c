//! The application-wide handle.

use std::net::IpAddr;

use http::StatusCode;
use serde::Serialize;
use tracing::Dispatch;

use crate::client_ip::client_ip;
use crate::logger::RequestLogger;
use crate::request::Request;
use crate::response::{Response, ResponseWriter};

/// Entry point for handlers: response writers, request loggers and client IP
/// extraction, all logging through one injected [`Dispatch`].
///
/// Build it once at startup and clone it into every connection task. Cloning
/// is a reference-count bump; there is no other state.
#[derive(Clone, Debug)]
pub struct HttpLib {
    dispatch: Dispatch,
}

impl HttpLib {
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// An unbound response writer. Only encoding failures and rejected
    /// headers are logged.
    pub fn writer(&self) -> ResponseWriter {
        ResponseWriter::with_dispatch(self.dispatch.clone())
    }

    /// Shortcut for `self.writer().json(status, data)`.
    pub fn json<T: Serialize + ?Sized>(&self, status: StatusCode, data: &T) -> Response {
        self.writer().json(status, data)
    }

    /// A logger bound to `req`'s context. The client IP is computed here,
    /// once.
    pub fn request_logger<B>(&self, req: &Request<B>) -> RequestLogger {
        RequestLogger::new(self.dispatch.clone(), req)
    }

    pub fn client_ip<B>(&self, req: &Request<B>) -> Option<IpAddr> {
        client_ip(req.remote_addr())
    }
}

/// Logs through whatever dispatcher is the default at construction time.
impl Default for HttpLib {
    fn default() -> Self {
        Self::new(tracing::dispatcher::get_default(Dispatch::clone))
    }
}
