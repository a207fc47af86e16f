//! 主 provider（默认 ipapi.co）
//!
//! 主 provider 的字段即为统一记录的字段，成功时直接返回。
//! 响应体分三类：
//! - 含 `error`：provider 明确报错，附带 `reason`
//! - 含 `ip`：有效记录
//! - 其他：无法判断，按传输类错误处理

use std::time::Duration;

use serde_json::Value;

use super::transport::Transport;
use super::types::GeoRecord;
use crate::errors::{IpFinderError, Result};

/// 主 provider 的查询结果（内部使用，不对外暴露）
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ProviderOutcome {
    Success(GeoRecord),
    ProviderError(String),
    TransportError(IpFinderError),
}

/// 用 `{ip}` 占位符构造请求地址
pub(crate) fn build_url(template: &str, address: &str) -> String {
    template.replace("{ip}", address)
}

/// 查询主 provider 并分类结果
pub(crate) fn query_primary(
    transport: &dyn Transport,
    url_template: &str,
    address: &str,
    timeout: Duration,
) -> ProviderOutcome {
    let url = build_url(url_template, address);
    match transport.get(&url, timeout) {
        Ok(body) => classify_body(&body),
        Err(e) => ProviderOutcome::TransportError(e),
    }
}

fn classify_body(body: &str) -> ProviderOutcome {
    match parse_body(body) {
        Ok(outcome) => outcome,
        Err(e) => ProviderOutcome::TransportError(e),
    }
}

// ipapi.co 返回格式: {"ip": "8.8.8.8", "city": "Mountain View", ...}
// 失败时返回: {"error": true, "reason": "RateLimited", ...}
// 先按字段是否存在分类，再逐个映射字段
fn parse_body(body: &str) -> Result<ProviderOutcome> {
    let json: Value = serde_json::from_str(body)?;

    // `error` 字段存在且不为 false/null
    if !matches!(json["error"], Value::Null | Value::Bool(false)) {
        let reason = json["reason"].as_str().unwrap_or("Unknown error");
        return Ok(ProviderOutcome::ProviderError(reason.to_string()));
    }

    if json["ip"].is_null() {
        return Err(IpFinderError::malformed_response(
            "primary response has neither `error` nor `ip`",
        ));
    }

    Ok(ProviderOutcome::Success(record_from_json(&json)))
}

/// 类型不符的字段视为缺失，不影响其余字段
fn record_from_json(json: &Value) -> GeoRecord {
    GeoRecord {
        ip: text(&json["ip"]),
        city: text(&json["city"]),
        region: text(&json["region"]),
        country: text(&json["country"]),
        country_name: text(&json["country_name"]),
        latitude: number(&json["latitude"]),
        longitude: number(&json["longitude"]),
        timezone: text(&json["timezone"]),
        org: text(&json["org"]),
        asn: text(&json["asn"]),
        postal: text(&json["postal"]),
    }
}

/// 字符串原样保留，数字（如邮编）转为字符串
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
