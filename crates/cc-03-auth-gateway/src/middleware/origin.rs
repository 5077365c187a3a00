//! Client origin extraction.

use axum::http::HeaderMap;
use cc_02_abuse_limiter::UNKNOWN_ORIGIN;
use std::net::{IpAddr, SocketAddr};

/// Identify the client for rate limiting.
///
/// Order: first `X-Forwarded-For` entry, then `X-Real-IP`, then the socket
/// peer, then `"unknown"`. Header values that are not IP addresses are
/// ignored so arbitrary text never lands in a limiter key or a log line.
pub fn client_origin(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    // Try X-Forwarded-For header first (for proxied requests)
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(parse_ip)
    {
        return ip.to_string();
    }

    // Try X-Real-IP header
    if let Some(ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .and_then(parse_ip)
    {
        return ip.to_string();
    }

    // Fall back to connection info
    peer.map_or_else(|| UNKNOWN_ORIGIN.to_string(), |addr| addr.ip().to_string())
}

fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.trim().parse().ok()
}
