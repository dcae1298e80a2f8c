//! Cookie descriptors and their `Set-Cookie` rendering.

use std::net::Ipv4Addr;

use cookie::Cookie;
use time::{Duration, OffsetDateTime};

use crate::error::Error;

pub use cookie::SameSite;

/// Everything needed to set one cookie.
///
/// Built per call and rendered into at most one `Set-Cookie` header. Empty
/// `path`/`domain` and unset optional attributes are left out of the header.
///
/// Rendering never lets a field spill into another attribute: bytes that
/// cannot appear in a cookie value or path are dropped, a value containing a
/// space or comma is quoted, and a malformed domain is omitted. A name that
/// is not an HTTP token makes the whole cookie invalid.
///
/// ```rust
/// use httplib::{CookieOptions, SameSite};
///
/// let session = CookieOptions::new("session", "abc123")
///     .path("/")
///     .secure(true)
///     .http_only(true)
///     .same_site(SameSite::Lax);
/// let header = session.to_header_value()?;
/// assert!(header.starts_with("session=abc123"));
/// assert!(header.contains("; Path=/"));
/// assert!(header.contains("; SameSite=Lax"));
/// # Ok::<(), httplib::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CookieOptions {
    pub name: String,
    pub value: String,
    pub path: String,
    pub domain: String,
    pub expires: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
}

impl CookieOptions {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: String::new(),
            domain: String::new(),
            expires: None,
            secure: false,
            http_only: false,
            same_site: None,
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn expires(mut self, at: OffsetDateTime) -> Self {
        self.expires = Some(at);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn same_site(mut self, policy: SameSite) -> Self {
        self.same_site = Some(policy);
        self
    }

    /// The `Set-Cookie` header value for this descriptor.
    ///
    /// Fails only when `name` is empty or not an HTTP token.
    pub fn to_header_value(&self) -> Result<String, Error> {
        if !is_valid_name(&self.name) {
            return Err(Error::CookieName(self.name.clone()));
        }

        let mut c = Cookie::new(self.name.as_str(), sanitize_value(&self.value));
        let path = sanitize_path(&self.path);
        if !path.is_empty() {
            c.set_path(path);
        }
        if is_valid_domain(&self.domain) {
            c.set_domain(self.domain.as_str());
        }
        if let Some(at) = self.expires {
            c.set_expires(at);
        }
        // Explicit `Some(false)` keeps the crate from adding `Secure` to
        // `SameSite=None` cookies on its own.
        c.set_secure(self.secure);
        c.set_http_only(self.http_only);
        if let Some(policy) = self.same_site {
            c.set_same_site(policy);
        }
        Ok(c.to_string())
    }
}

// RFC 7230 tchar.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

// RFC 6265 cookie-octet, relaxed to allow space and comma inside quotes.
fn sanitize_value(value: &str) -> String {
    let clean: String = value.chars()
        .filter(|&c| (' '..='~').contains(&c) && !matches!(c, '"' | ';' | '\\'))
        .collect();
    if clean.contains([' ', ',']) {
        format!("\"{clean}\"")
    } else {
        clean
    }
}

fn sanitize_path(path: &str) -> String {
    path.chars().filter(|&c| (' '..='~').contains(&c) && c != ';').collect()
}

fn is_valid_domain(domain: &str) -> bool {
    let domain = domain.strip_prefix('.').unwrap_or(domain);
    if domain.is_empty() || domain.len() > 255 {
        return false;
    }
    if domain.parse::<Ipv4Addr>().is_ok() {
        return true;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    })
}

/// `Set-Cookie` value telling the client to drop `name` right away.
///
/// No value, `Max-Age=0`, no timestamp, so repeated calls
/// render the same bytes.
pub(crate) fn removal_header_value(name: &str) -> String {
    let mut c = Cookie::new(name, "");
    c.set_max_age(Duration::ZERO);
    c.to_string()
}
