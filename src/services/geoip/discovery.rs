//! 公网地址探测
//!
//! 向 echo 服务（默认 ipify）发一次请求，读取响应中的 `ip` 字段。
//! 不重试，任何失败都由调用方转成"无地址"。

use std::time::Duration;

use serde::Deserialize;

use super::transport::Transport;
use super::types::{AddressFamily, PublicAddress};
use crate::errors::{IpFinderError, Result};

/// echo 服务响应：`{"ip": "203.0.113.7"}`
#[derive(Deserialize)]
struct EchoResponse {
    ip: Option<String>,
}

/// 查询 echo 服务，返回调用方在 `family` 下的公网地址
pub(crate) fn fetch_public_address(
    transport: &dyn Transport,
    url: &str,
    timeout: Duration,
    family: AddressFamily,
) -> Result<PublicAddress> {
    let body = transport.get(url, timeout)?;
    parse_echo_body(&body, family)
}

fn parse_echo_body(body: &str, family: AddressFamily) -> Result<PublicAddress> {
    let response: EchoResponse = serde_json::from_str(body)?;

    match response.ip.as_deref().map(str::trim) {
        Some(ip) if !ip.is_empty() => Ok(PublicAddress::new(family, ip)),
        _ => Err(IpFinderError::malformed_response(
            "echo response has no `ip` field",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_echo_body() {
        let addr = parse_echo_body(r#"{"ip":"203.0.113.7"}"#, AddressFamily::V4).unwrap();
        assert_eq!(addr.value(), "203.0.113.7");
        assert_eq!(addr.family(), AddressFamily::V4);
    }

    #[test]
    fn test_parse_echo_body_keeps_requested_family() {
        let addr = parse_echo_body(r#"{"ip":"2001:db8::1"}"#, AddressFamily::V6).unwrap();
        assert_eq!(addr.family(), AddressFamily::V6);
    }

    #[test]
    fn test_parse_echo_body_missing_field() {
        let err = parse_echo_body(r#"{"address":"203.0.113.7"}"#, AddressFamily::V4).unwrap_err();
        assert!(matches!(err, IpFinderError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_echo_body_empty_ip() {
        assert!(parse_echo_body(r#"{"ip":""}"#, AddressFamily::V4).is_err());
        assert!(parse_echo_body(r#"{"ip":null}"#, AddressFamily::V4).is_err());
    }

    #[test]
    fn test_parse_echo_body_not_json() {
        let err = parse_echo_body("203.0.113.7", AddressFamily::V4).unwrap_err();
        assert!(matches!(err, IpFinderError::MalformedResponse(_)));
    }
}
