//! 备用 provider（默认 ip-api.com）及字段映射
//!
//! ip-api.com 返回格式: `{"status": "success", "query": "8.8.8.8", "regionName": ..., "lat": ..., ...}`
//! 失败时返回: `{"status": "fail", "message": "invalid query", ...}`
//!
//! 字段映射到统一记录：
//!
//! | ip-api.com    | GeoRecord      |
//! |---------------|----------------|
//! | `query`       | `ip`（缺失时用请求的地址） |
//! | `city`        | `city`         |
//! | `regionName`  | `region`       |
//! | `countryCode` | `country`      |
//! | `country`     | `country_name` |
//! | `lat` / `lon` | `latitude` / `longitude` |
//! | `timezone`    | `timezone`     |
//! | `isp`         | `org`          |
//! | `as`          | `asn`（只取第一个空白分隔的 token） |
//! | `zip`         | `postal`       |

use std::time::Duration;

use serde::Deserialize;

use super::primary::build_url;
use super::transport::Transport;
use super::types::GeoRecord;
use crate::errors::{IpFinderError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FallbackResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region_name: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    isp: Option<String>,
    #[serde(default, rename = "as")]
    as_field: Option<String>,
    #[serde(default)]
    zip: Option<String>,
}

impl FallbackResponse {
    fn into_record(self, requested: &str) -> GeoRecord {
        GeoRecord {
            ip: Some(self.query.unwrap_or_else(|| requested.to_string())),
            city: self.city,
            region: self.region_name,
            country: self.country_code,
            country_name: self.country,
            latitude: self.lat,
            longitude: self.lon,
            timezone: self.timezone,
            org: self.isp,
            asn: self
                .as_field
                .as_deref()
                .and_then(|s| s.split_whitespace().next())
                .map(String::from),
            postal: self.zip,
        }
    }
}

/// 解析备用 provider 的响应体并映射为统一记录
///
/// `status != "success"` 时返回 `ProviderRejected`，附带 provider 的 `message`。
pub fn normalize_fallback(body: &str, requested: &str) -> Result<GeoRecord> {
    let response: FallbackResponse = serde_json::from_str(body)?;

    if response.status.as_deref() != Some("success") {
        let message = response
            .message
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(IpFinderError::provider_rejected(message));
    }

    Ok(response.into_record(requested))
}

/// 查询备用 provider，失败即终止，不再有下一级
pub(crate) fn query_fallback(
    transport: &dyn Transport,
    url_template: &str,
    address: &str,
    timeout: Duration,
) -> Result<GeoRecord> {
    let url = build_url(url_template, address);
    let body = transport.get(&url, timeout)?;
    normalize_fallback(&body, address)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS_BODY: &str = r#"{
        "status": "success", "query": "8.8.8.8", "city": "Mountain View",
        "regionName": "California", "countryCode": "US", "country": "United States",
        "lat": 37.4, "lon": -122.1, "timezone": "America/Los_Angeles",
        "isp": "Google LLC", "as": "AS15169 Google LLC", "zip": "94043",
        "org": "Google Public DNS", "region": "CA"
    }"#;

    #[test]
    fn test_full_mapping() {
        let record = normalize_fallback(SUCCESS_BODY, "8.8.8.8").unwrap();
        assert_eq!(
            record,
            GeoRecord {
                ip: Some("8.8.8.8".into()),
                city: Some("Mountain View".into()),
                region: Some("California".into()),
                country: Some("US".into()),
                country_name: Some("United States".into()),
                latitude: Some(37.4),
                longitude: Some(-122.1),
                timezone: Some("America/Los_Angeles".into()),
                org: Some("Google LLC".into()),
                asn: Some("AS15169".into()),
                postal: Some("94043".into()),
            }
        );
    }

    #[test]
    fn test_missing_query_uses_requested_address() {
        let record = normalize_fallback(r#"{"status":"success"}"#, "1.1.1.1").unwrap();
        assert_eq!(record.ip.as_deref(), Some("1.1.1.1"));
        // 其余字段全部缺失，不编造
        assert_eq!(
            record,
            GeoRecord {
                ip: Some("1.1.1.1".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_asn_token_edge_cases() {
        let empty = normalize_fallback(r#"{"status":"success","as":""}"#, "1.1.1.1").unwrap();
        assert_eq!(empty.asn, None);

        let blank = normalize_fallback(r#"{"status":"success","as":"   "}"#, "1.1.1.1").unwrap();
        assert_eq!(blank.asn, None);

        let bare = normalize_fallback(r#"{"status":"success","as":"AS13335"}"#, "1.1.1.1").unwrap();
        assert_eq!(bare.asn.as_deref(), Some("AS13335"));
    }

    #[test]
    fn test_fail_status() {
        let err = normalize_fallback(
            r#"{"status":"fail","message":"reserved range","query":"10.0.0.1"}"#,
            "10.0.0.1",
        )
        .unwrap_err();
        assert_eq!(err, IpFinderError::ProviderRejected("reserved range".into()));
    }

    #[test]
    fn test_missing_status_is_failure() {
        let err = normalize_fallback(r#"{"query":"1.1.1.1"}"#, "1.1.1.1").unwrap_err();
        assert_eq!(err, IpFinderError::ProviderRejected("Unknown error".into()));
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let first = normalize_fallback(SUCCESS_BODY, "8.8.8.8").unwrap();
        let second = normalize_fallback(SUCCESS_BODY, "8.8.8.8").unwrap();
        assert_eq!(first, second);
    }
}
