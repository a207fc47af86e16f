#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ipfinder::config::ProviderConfig;
use ipfinder::errors::{IpFinderError, Result};
use ipfinder::services::IpResolver;
use ipfinder::services::geoip::{AddressFamily, ResolutionObserver, ProviderTier, Transport};

pub const ECHO_V4: &str = "http://echo4.test/?format=json";
pub const ECHO_V6: &str = "http://echo6.test/?format=json";
pub const PRIMARY_HOST: &str = "primary.test";
pub const FALLBACK_HOST: &str = "fallback.test";

pub fn test_providers() -> ProviderConfig {
    ProviderConfig {
        ipv4_echo_url: ECHO_V4.to_string(),
        ipv6_echo_url: ECHO_V6.to_string(),
        primary_url: "http://primary.test/{ip}/json/".to_string(),
        fallback_url: "http://fallback.test/json/{ip}".to_string(),
        ..Default::default()
    }
}

enum Reply {
    Body(String),
    Fail(IpFinderError),
}

/// 桩 transport：按 URL 子串匹配返回预设响应，并记录每次请求
#[derive(Default)]
pub struct StubTransport {
    routes: Vec<(String, Reply)>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 匹配 `pattern` 的请求返回 `body`
    pub fn reply(mut self, pattern: &str, body: &str) -> Self {
        self.routes
            .push((pattern.to_string(), Reply::Body(body.to_string())));
        self
    }

    /// 匹配 `pattern` 的请求返回错误
    pub fn fail(mut self, pattern: &str, error: IpFinderError) -> Self {
        self.routes.push((pattern.to_string(), Reply::Fail(error)));
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    pub fn timeouts(&self) -> Vec<(String, Duration)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.calls().iter().filter(|url| url.contains(pattern)).count()
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<String> {
        self.calls.lock().unwrap().push((url.to_string(), timeout));

        match self.routes.iter().find(|(pattern, _)| url.contains(pattern.as_str())) {
            Some((_, Reply::Body(body))) => Ok(body.clone()),
            Some((_, Reply::Fail(error))) => Err(error.clone()),
            None => Err(IpFinderError::transport(format!("connection refused: {}", url))),
        }
    }
}

pub fn resolver(stub: &Arc<StubTransport>) -> IpResolver {
    IpResolver::with_transport(test_providers(), stub.clone())
}

/// 记录 observer 事件，用于断言诊断钩子的调用
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ResolutionObserver for RecordingObserver {
    fn on_discovery_failed(&self, family: AddressFamily, _error: &IpFinderError) {
        self.push(format!("discovery_failed:{}", family));
    }

    fn on_transport_failure(&self, tier: ProviderTier, address: &str, _error: &IpFinderError) {
        self.push(format!("transport_failure:{}:{}", tier.as_ref(), address));
    }

    fn on_provider_error(&self, address: &str, reason: &str) {
        self.push(format!("provider_error:{}:{}", address, reason));
    }

    fn on_fallback_triggered(&self, address: &str, _cause: &IpFinderError) {
        self.push(format!("fallback_triggered:{}", address));
    }

    fn on_fallback_used(&self, address: &str) {
        self.push(format!("fallback_used:{}", address));
    }

    fn on_terminal_error(&self, tier: ProviderTier, address: &str, _error: &IpFinderError) {
        self.push(format!("terminal_error:{}:{}", tier.as_ref(), address));
    }
}

pub const PRIMARY_GOOGLE: &str = r#"{
    "ip": "8.8.8.8", "network": "8.8.8.0/24", "version": "IPv4",
    "city": "Mountain View", "region": "California", "region_code": "CA",
    "country": "US", "country_name": "United States", "country_code": "US",
    "postal": "94043", "latitude": 37.42301, "longitude": -122.083352,
    "timezone": "America/Los_Angeles", "utc_offset": "-0800",
    "asn": "AS15169", "org": "GOOGLE"
}"#;

pub const PRIMARY_RATE_LIMITED: &str = r#"{"error":"true","reason":"Rate limit exceeded"}"#;

pub const PRIMARY_INVALID_IP: &str =
    r#"{"ip":"999.999.999.999","error":true,"reason":"Invalid IP Address"}"#;

pub const FALLBACK_GOOGLE: &str = r#"{"status":"success","query":"8.8.8.8","city":"Mountain View","regionName":"California","countryCode":"US","country":"United States","lat":37.4,"lon":-122.1,"timezone":"America/Los_Angeles","isp":"Google LLC","as":"AS15169 Google LLC","zip":"94043"}"#;

pub const FALLBACK_FAIL: &str = r#"{"status":"fail","message":"invalid query","query":"999.999.999.999"}"#;
