//! Incoming HTTP request view.

use http::header::{HOST, USER_AGENT};
use http::Method;

/// An incoming HTTP request paired with the peer address it arrived from.
///
/// The `http` crate has no notion of a remote address, so the server loop
/// hands it over as text, exactly what it saw on `accept()`. Keeping it as
/// text means a malformed address is still representable; [`client_ip`]
/// decides what to make of it.
///
/// [`client_ip`]: crate::client_ip
pub struct Request<B> {
    inner: http::Request<B>,
    remote_addr: String,
}

impl<B> Request<B> {
    pub fn new(inner: http::Request<B>, remote_addr: impl Into<String>) -> Self {
        Self { inner, remote_addr: remote_addr.into() }
    }

    pub fn method(&self) -> &Method { self.inner.method() }
    pub fn path(&self) -> &str { self.inner.uri().path() }
    pub fn query(&self) -> Option<&str> { self.inner.uri().query() }
    pub fn headers(&self) -> &http::HeaderMap { self.inner.headers() }
    pub fn body(&self) -> &B { self.inner.body() }
    pub fn remote_addr(&self) -> &str { &self.remote_addr }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name).and_then(|v| v.to_str().ok())
    }

    /// Target host, `host[:port]`.
    ///
    /// Absolute-form targets and HTTP/2 `:authority` win over the `Host`
    /// header, matching how origin servers resolve it.
    pub fn host(&self) -> &str {
        self.inner.uri().authority()
            .map(|a| a.as_str())
            .or_else(|| self.inner.headers().get(HOST).and_then(|v| v.to_str().ok()))
            .unwrap_or("")
    }

    /// URI scheme. Empty for origin-form targets, which is most of them.
    pub fn scheme(&self) -> &str {
        self.inner.uri().scheme_str().unwrap_or("")
    }

    pub fn user_agent(&self) -> &str {
        self.inner.headers().get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    /// Gives the underlying request back, e.g. to consume the body.
    pub fn into_inner(self) -> http::Request<B> {
        self.inner
    }
}
