//! 公共工具模块

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// 解析客户端 IP
///
/// 优先取 `X-Forwarded-For` 第一个逗号分隔项（去除空白），
/// 没有该头或内容为空时回退到连接的对端地址。
pub fn client_ip(headers: &HeaderMap, remote: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| remote.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn remote() -> SocketAddr {
        "203.0.113.9:44444".parse().unwrap()
    }

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("1.2.3.4, 5.6.7.8"),
        );
        assert_eq!(client_ip(&headers, remote()), "1.2.3.4");
    }

    #[test]
    fn test_forwarded_for_trims_whitespace() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("  9.9.9.9 , 5.6.7.8"),
        );
        assert_eq!(client_ip(&headers, remote()), "9.9.9.9");
    }

    #[test]
    fn test_missing_header_falls_back_to_remote() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, remote()), "203.0.113.9");
    }

    #[test]
    fn test_empty_header_falls_back_to_remote() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));
        assert_eq!(client_ip(&headers, remote()), "203.0.113.9");
    }
}
