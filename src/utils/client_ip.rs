//! Client address resolution for click tracking.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Resolves the client address recorded with a click.
///
/// When `trust_forwarded` is set (the service runs behind a reverse proxy),
/// the left-most `X-Forwarded-For` entry wins, then `X-Real-IP`. Header
/// values that do not parse as an address are ignored. Otherwise, or when no
/// usable header is present, the socket peer address is used.
///
/// Returns `None` when no address is known at all.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = client_ip(&headers, None, true);
/// assert_eq!(ip.as_deref(), Some("203.0.113.7"));
/// ```
pub fn client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded: bool,
) -> Option<String> {
    if trust_forwarded {
        let forwarded = header_str(headers, X_FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .and_then(parse_addr)
            .or_else(|| header_str(headers, X_REAL_IP).and_then(parse_addr));

        if let Some(ip) = forwarded {
            return Some(ip.to_string());
        }
    }

    peer.map(|addr| addr.ip().to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Parses a bare address or an `addr:port` / `[v6]:port` pair.
fn parse_addr(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    value
        .parse::<IpAddr>()
        .ok()
        .or_else(|| value.parse::<SocketAddr>().ok().map(|s| s.ip()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("127.0.0.1:12345".parse().unwrap())
    }

    #[test]
    fn test_peer_address_without_proxy() {
        let headers = HeaderMap::new();

        let ip = client_ip(&headers, peer(), false);
        assert_eq!(ip.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_forwarded_header_ignored_when_untrusted() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("1.1.1.1"));

        let ip = client_ip(&headers, peer(), false);
        assert_eq!(ip.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_forwarded_for_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static("203.0.113.7, 10.0.0.1, 10.0.0.2"),
        );

        let ip = client_ip(&headers, peer(), true);
        assert_eq!(ip.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REAL_IP, HeaderValue::from_static("198.51.100.4"));

        let ip = client_ip(&headers, peer(), true);
        assert_eq!(ip.as_deref(), Some("198.51.100.4"));
    }

    #[test]
    fn test_forwarded_with_port() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("1.2.3.4:5678"));

        let ip = client_ip(&headers, None, true);
        assert_eq!(ip.as_deref(), Some("1.2.3.4"));
    }

    #[test]
    fn test_forwarded_ipv6() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("2001:db8::1"));

        let ip = client_ip(&headers, None, true);
        assert_eq!(ip.as_deref(), Some("2001:db8::1"));
    }

    #[test]
    fn test_garbage_header_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("not-an-ip"));

        let ip = client_ip(&headers, peer(), true);
        assert_eq!(ip.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_no_address_known() {
        let headers = HeaderMap::new();

        assert!(client_ip(&headers, None, true).is_none());
        assert!(client_ip(&headers, None, false).is_none());
    }
}
