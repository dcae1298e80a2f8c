//! Property tests for the response envelope and client IP extraction.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use http::StatusCode;
use http::header::SET_COOKIE;
use http_body_util::BodyExt;
use httplib::{HttpLib, Response, client_ip};
use proptest::prelude::*;
use serde_json::Value;

fn body(res: Response) -> Value {
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let bytes = runtime.block_on(res.into_body().collect()).unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// Strategy: any registered-looking status code
fn arb_status() -> impl Strategy<Value = StatusCode> {
    (100u16..=599).prop_map(|code| StatusCode::from_u16(code).unwrap())
}

// Strategy: JSON-shaped payloads, nested a couple of levels
fn arb_payload() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        ".{0,24}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    /// Property: the body is `{"data": payload}` and the status line is the
    /// requested status, for any encodable payload.
    #[test]
    fn envelope_carries_payload_and_status(status in arb_status(), payload in arb_payload()) {
        let res = HttpLib::default().json(status, &payload);

        prop_assert_eq!(res.status(), status);
        let decoded = body(res);
        let object = decoded.as_object().unwrap();
        prop_assert_eq!(object.len(), 1);
        prop_assert!(!object.contains_key("code"));
        prop_assert_eq!(&decoded["data"], &payload);
    }

    /// Property: unencodable payloads always yield the fixed 500, whatever
    /// status was asked for.
    #[test]
    fn unencodable_payload_always_yields_fallback(status in arb_status(), key in any::<(u8, u8)>()) {
        let payload = std::collections::HashMap::from([(key, 0)]);
        let res = HttpLib::default().json(status, &payload);

        prop_assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        prop_assert_eq!(body(res), serde_json::json!({ "data": "internal server error" }));
    }

    /// Property: any `ip:port` rendered by the standard library comes back
    /// as the same IP.
    #[test]
    fn socket_addresses_yield_their_ip(ip in any::<IpAddr>(), port in any::<u16>()) {
        let addr = SocketAddr::new(ip, port).to_string();
        prop_assert_eq!(client_ip(&addr), Some(ip.to_canonical()));
    }

    /// Property: a bare IP without a port is never accepted.
    #[test]
    fn bare_ips_yield_nothing(v4 in any::<Ipv4Addr>(), v6 in any::<Ipv6Addr>()) {
        prop_assert_eq!(client_ip(&v4.to_string()), None);
        prop_assert_eq!(client_ip(&v6.to_string()), None);
    }

    /// Property: hostnames are never resolved.
    #[test]
    fn hostnames_yield_nothing(host in "[a-z][a-z0-9-]{0,20}(\\.[a-z]{2,6})?", port in any::<u16>()) {
        prop_assert_eq!(client_ip(&format!("{host}:{port}")), None);
    }

    /// Property: extraction never panics, whatever the peer string.
    #[test]
    fn arbitrary_peer_strings_never_panic(addr in ".{0,64}") {
        let _ = client_ip(&addr);
    }

    /// Property: cookie removal is stateless.
    #[test]
    fn removal_headers_are_identical(name in "[A-Za-z0-9_]{1,16}") {
        let mut w = HttpLib::default().writer();
        w.remove_cookie(&name);
        w.remove_cookie(&name);
        let res = w.json(StatusCode::OK, &());

        let cookies: Vec<_> = res.headers().get_all(SET_COOKIE).iter().collect();
        prop_assert_eq!(cookies.len(), 2);
        prop_assert_eq!(cookies[0], cookies[1]);
        prop_assert_eq!(cookies[0].to_str().unwrap(), format!("{name}=; Max-Age=0"));
    }
}
