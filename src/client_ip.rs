//! Best-effort client IP extraction from a peer address.

use std::net::IpAddr;

/// Extracts the client IP from a textual `host:port` peer address.
///
/// IPv6 hosts must be bracketed (`[2001:db8::1]:443`). The port is split off
/// but not validated. IPv4-mapped IPv6 addresses come back as plain IPv4.
///
/// Returns `None` when the address has no port, the host is not an IP
/// literal (hostnames are not resolved), or the brackets are unbalanced.
/// There is no error case.
///
/// ```rust
/// use std::net::{IpAddr, Ipv4Addr};
///
/// assert_eq!(
///     httplib::client_ip("203.0.113.7:54321"),
///     Some(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7))),
/// );
/// assert_eq!(httplib::client_ip("203.0.113.7"), None);
/// assert_eq!(httplib::client_ip("localhost:80"), None);
/// ```
pub fn client_ip(remote_addr: &str) -> Option<IpAddr> {
    let (host, _port) = split_host_port(remote_addr)?;
    host.parse::<IpAddr>().ok().map(|ip| ip.to_canonical())
}

fn split_host_port(addr: &str) -> Option<(&str, &str)> {
    let (host, port) = addr.rsplit_once(':')?;
    if port.contains(['[', ']']) {
        return None;
    }
    let host = match host.strip_prefix('[') {
        Some(rest) => rest.strip_suffix(']')?,
        // An unbracketed host with a colon is a bare IPv6 address without a port.
        None if host.contains([':', '[', ']']) => return None,
        None => host,
    };
    Some((host, port))
}
