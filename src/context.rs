//! Request-derived logging context.

use crate::client_ip::client_ip;
use crate::request::Request;

/// The per-request fields attached to every record a [`RequestLogger`]
/// emits.
///
/// Extracted once when the logger is built and never updated. Values that
/// could not be determined are empty strings, so the field set in a log
/// record is the same for every request.
///
/// [`RequestLogger`]: crate::RequestLogger
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestContext {
    pub ip: String,
    pub method: String,
    pub path: String,
    pub host: String,
    pub scheme: String,
    pub user_agent: String,
}

impl RequestContext {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        Self {
            ip: client_ip(req.remote_addr()).map(|ip| ip.to_string()).unwrap_or_default(),
            method: req.method().as_str().to_owned(),
            path: req.path().to_owned(),
            host: req.host().to_owned(),
            scheme: req.scheme().to_owned(),
            user_agent: req.user_agent().to_owned(),
        }
    }
}
