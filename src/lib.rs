//! # httplib
//!
//! The thin layer between an HTTP server and its handlers. Three jobs:
//!
//! - **JSON responses**: one envelope, `{"data": …}`, status on the status
//!   line. Unencodable payloads become a fixed 500, never a panic.
//! - **Cookies**: one `Set-Cookie` per call, removal by `Max-Age=0`.
//! - **Request logs**: a logger pre-bound with `ip`, `method`, `path`,
//!   `host`, `scheme` and `user_agent`, speaking a small catalog of named
//!   events so the same situation reads the same in every handler.
//!
//! Routing, transport, TLS and middleware belong to the server. httplib
//! takes an `http::Request` plus the peer address and hands back an
//! `http::Response`.
//!
//! ## Quick start
//!
//! ```rust
//! use http::StatusCode;
//! use httplib::{HttpLib, Request, Response};
//!
//! fn login(lib: &HttpLib, req: Request<()>) -> Response {
//!     let log = lib.request_logger(&req);
//!     let mut w = log.writer();
//!
//!     let Some(user) = req.query().and_then(|q| q.strip_prefix("user=")) else {
//!         log.bad_input();
//!         return w.json(StatusCode::BAD_REQUEST, "missing user");
//!     };
//!     if user != "alice" {
//!         log.bad_credentials();
//!         w.remove_cookie("session");
//!         return w.json(StatusCode::UNAUTHORIZED, "bad credentials");
//!     }
//!     w.json(StatusCode::OK, &serde_json::json!({ "user": user }))
//! }
//!
//! let lib = HttpLib::default();
//! let inner = http::Request::builder().uri("/login?user=bob").body(()).unwrap();
//! let res = login(&lib, Request::new(inner, "203.0.113.7:54321"));
//! assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
//! ```

mod client_ip;
mod context;
mod cookies;
mod error;
mod event;
mod helper;
mod logger;
mod logging;
mod request;
mod response;

pub use client_ip::client_ip;
pub use context::RequestContext;
pub use cookies::{CookieOptions, SameSite};
pub use error::Error;
pub use event::Event;
pub use helper::HttpLib;
pub use logger::RequestLogger;
pub use logging::{LogConfig, LogFormat};
pub use request::Request;
pub use response::{FALLBACK_BODY, Response, ResponseWriter};
