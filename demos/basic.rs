//! Minimal httplib demo: a hyper server wiring JSON responses, cookies and
//! request-scoped event logs into a few handlers.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!   LOG_FORMAT=json cargo run --example basic
//!
//! Try:
//!   curl -i 'http://localhost:3000/login?user=alice&password=hunter2'
//!   curl -i 'http://localhost:3000/login?user=alice&password=nope'
//!   curl -i  http://localhost:3000/login
//!   curl -i -X POST http://localhost:3000/logout
//!   curl -i  http://localhost:3000/report

use std::convert::Infallible;
use std::net::SocketAddr;

use http::{Method, StatusCode};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use httplib::{CookieOptions, HttpLib, LogConfig, Request, Response, SameSite};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let lib = HttpLib::new(LogConfig::from_env()?.init()?);

    let addr: SocketAddr = "127.0.0.1:3000".parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "httplib demo listening");

    let mut tasks = tokio::task::JoinSet::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, remote_addr) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                let lib = lib.clone();
                tasks.spawn(async move {
                    let svc = service_fn(move |req| {
                        let lib = lib.clone();
                        async move {
                            let req = Request::new(req, remote_addr.to_string());
                            Ok::<_, Infallible>(dispatch(&lib, req))
                        }
                    });

                    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                        .serve_connection(TokioIo::new(stream), svc)
                        .await
                    {
                        error!(peer = %remote_addr, "connection error: {e}");
                    }
                });
            }

            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    while tasks.join_next().await.is_some() {}
    info!("httplib demo stopped");
    Ok(())
}

fn dispatch(lib: &HttpLib, req: Request<Incoming>) -> Response {
    match (req.method(), req.path()) {
        (&Method::GET, "/login")   => login(lib, &req),
        (&Method::POST, "/logout") => logout(lib, &req),
        (&Method::GET, "/report")  => report(lib, &req),
        _ => lib.request_logger(&req).writer().json(StatusCode::NOT_FOUND, "not found"),
    }
}

// GET /login?user=…&password=…
//
// Missing parameters are bad input, a wrong password is bad credentials.
// Both are logged with the caller's IP; neither detail reaches the body.
fn login(lib: &HttpLib, req: &Request<Incoming>) -> Response {
    let log = lib.request_logger(req);
    let mut w = log.writer();

    let (Some(user), Some(password)) = (query_param(req, "user"), query_param(req, "password")) else {
        log.bad_input();
        return w.json(StatusCode::BAD_REQUEST, "user and password are required");
    };
    if password != "hunter2" {
        log.bad_credentials();
        return w.json(StatusCode::UNAUTHORIZED, "invalid credentials");
    }

    w.set_cookie(
        &CookieOptions::new("session", format!("demo-{user}"))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .expires(time::OffsetDateTime::now_utc() + time::Duration::hours(1)),
    );
    w.json(StatusCode::OK, &serde_json::json!({ "user": user }))
}

// POST /logout
fn logout(lib: &HttpLib, req: &Request<Incoming>) -> Response {
    let mut w = lib.request_logger(req).writer();
    w.remove_cookie("session");
    w.json(StatusCode::OK, "logged out")
}

// GET /report always fails, to show the function-error record.
fn report(lib: &HttpLib, req: &Request<Incoming>) -> Response {
    let log = lib.request_logger(req);
    match std::fs::read_to_string("/nonexistent/report.json") {
        Ok(report) => log.writer().json(StatusCode::OK, &report),
        Err(e) => {
            log.function_error(&e);
            log.writer().json(StatusCode::INTERNAL_SERVER_ERROR, "report unavailable")
        }
    }
}

fn query_param<'a, B>(req: &'a Request<B>, key: &str) -> Option<&'a str> {
    req.query()?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
