//! 解析引擎的数据模型
//!
//! - `PublicAddress`: 探测到的或用户输入的地址（带地址族）
//! - `GeoRecord`: 统一的地理位置记录（与 provider 无关）
//! - `LookupMode` / `ResolutionResult`: 编排层的输入与输出

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// 地址族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr)]
pub enum AddressFamily {
    #[serde(rename = "ipv4")]
    #[strum(serialize = "IPv4")]
    V4,
    #[serde(rename = "ipv6")]
    #[strum(serialize = "IPv6")]
    V6,
}

impl std::fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// 公网地址
///
/// 只由地址探测或对用户输入做分类产生，创建后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAddress {
    family: AddressFamily,
    value: String,
}

impl PublicAddress {
    pub(crate) fn new(family: AddressFamily, value: impl Into<String>) -> Self {
        Self {
            family,
            value: value.into(),
        }
    }

    /// 对用户输入的地址分类：含冒号为 IPv6，否则为 IPv4
    ///
    /// 不校验地址是否合法，合法性由 provider 判断。
    pub fn classify(input: &str) -> Self {
        let family = if input.contains(':') {
            AddressFamily::V6
        } else {
            AddressFamily::V4
        };
        Self::new(family, input)
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for PublicAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// 统一的地理位置记录
///
/// 字段名与主 provider（ipapi.co）一致。provider 没有给出的字段为 `None`，
/// 序列化时输出 `null`，不会编造值。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// ISO 3166-1 alpha-2 国家代码 (e.g., "US")
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    /// ISP / 组织名称
    #[serde(default)]
    pub org: Option<String>,
    /// 形如 "AS15169"
    #[serde(default)]
    pub asn: Option<String>,
    #[serde(default)]
    pub postal: Option<String>,
}

impl GeoRecord {
    /// OpenStreetMap 链接，坐标缺失或为 0 时返回 None
    pub fn map_url(&self) -> Option<String> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => Some(format!(
                "https://www.openstreetmap.org/?mlat={}&mlon={}&zoom=12",
                lat, lon
            )),
            _ => None,
        }
    }
}

/// 解析模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupMode {
    /// 未提供地址：先探测调用方自己的公网地址
    AutoDetect,
    /// 查询用户给定的地址
    Explicit(String),
}

impl LookupMode {
    /// 由可选输入构造模式，去掉首尾空白后为空视为自动探测
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            Some(address) if !address.is_empty() => LookupMode::Explicit(address.to_string()),
            _ => LookupMode::AutoDetect,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, LookupMode::Explicit(_))
    }
}

/// 一次解析的结果，交给展示层后即丢弃
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionResult {
    pub ipv4: Option<PublicAddress>,
    pub ipv6: Option<PublicAddress>,
    pub record: Option<GeoRecord>,
    pub lookup_failed: bool,
    pub auto_detect_failed: bool,
    /// 仅用于展示
    pub resolved_at: DateTime<Local>,
}

impl ResolutionResult {
    pub(crate) fn new(
        mode: &LookupMode,
        ipv4: Option<PublicAddress>,
        ipv6: Option<PublicAddress>,
        record: Option<GeoRecord>,
    ) -> Self {
        let failed = record.is_none();
        Self {
            ipv4,
            ipv6,
            record,
            lookup_failed: failed && mode.is_explicit(),
            auto_detect_failed: failed && !mode.is_explicit(),
            resolved_at: Local::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.record.is_some()
    }

    /// 显式查询时用户输入的地址
    pub fn requested_address(&self) -> Option<&PublicAddress> {
        self.ipv4.as_ref().or(self.ipv6.as_ref())
    }
}
