//! IP 信息解析器
//!
//! 统一入口，串起地址探测、主 provider 查询、错误分类与 fallback：
//! 1. 显式查询：按是否含冒号分类地址，查询一次
//! 2. 自动探测：分别探测 IPv4 / IPv6，优先用 IPv4 查询，失败再用 IPv6
//!
//! 每次调用相互独立、无共享可变状态，可以在任意线程上并发调用；
//! 调用会阻塞当前线程直到请求完成或超时。

use std::sync::Arc;
use std::time::Duration;

use super::discovery::fetch_public_address;
use super::fallback::query_fallback;
use super::observer::{ProviderTier, ResolutionObserver, TracingObserver};
use super::primary::{ProviderOutcome, query_primary};
use super::transport::{Transport, UreqTransport};
use super::types::{AddressFamily, GeoRecord, LookupMode, PublicAddress, ResolutionResult};
use crate::config::{ProviderConfig, get_config};
use crate::errors::IpFinderError;

#[derive(Clone)]
pub struct IpResolver {
    transport: Arc<dyn Transport>,
    observer: Arc<dyn ResolutionObserver>,
    providers: ProviderConfig,
}

impl IpResolver {
    /// 使用 ureq transport 和 tracing observer 创建
    pub fn new(providers: ProviderConfig) -> Self {
        let transport = Arc::new(UreqTransport::new(&providers.user_agent));
        Self::with_transport(providers, transport)
    }

    /// 根据全局配置创建
    pub fn from_config() -> Self {
        Self::new(get_config().providers.clone())
    }

    /// 注入自定义 transport（测试用桩实现）
    pub fn with_transport(providers: ProviderConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            observer: Arc::new(TracingObserver),
            providers,
        }
    }

    /// 替换 observer
    pub fn with_observer(mut self, observer: Arc<dyn ResolutionObserver>) -> Self {
        self.observer = observer;
        self
    }

    fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.providers.discovery_timeout_secs)
    }

    fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.providers.lookup_timeout_secs)
    }

    /// 探测调用方在指定地址族下的公网地址
    ///
    /// 一次请求，不重试；任何失败都返回 None。
    pub fn discover(&self, family: AddressFamily) -> Option<PublicAddress> {
        let url = match family {
            AddressFamily::V4 => &self.providers.ipv4_echo_url,
            AddressFamily::V6 => &self.providers.ipv6_echo_url,
        };

        match fetch_public_address(self.transport.as_ref(), url, self.discovery_timeout(), family) {
            Ok(address) => Some(address),
            Err(e) => {
                self.observer.on_discovery_failed(family, &e);
                None
            }
        }
    }

    /// 查询地址的地理位置信息
    ///
    /// - 地址为空：直接返回 None，不发请求
    /// - 主 provider 成功：原样返回
    /// - 主 provider 限流、传输失败或响应无法判断：查询备用 provider
    /// - 主 provider 其他明确错误（如非法 IP）：返回 None，不升级
    pub fn lookup(&self, address: Option<&str>) -> Option<GeoRecord> {
        let address = address.map(str::trim).filter(|a| !a.is_empty())?;

        let outcome = query_primary(
            self.transport.as_ref(),
            &self.providers.primary_url,
            address,
            self.lookup_timeout(),
        );

        let cause = match outcome {
            ProviderOutcome::Success(record) => return Some(record),
            ProviderOutcome::ProviderError(reason) => {
                self.observer.on_provider_error(address, &reason);
                let error = IpFinderError::classify_provider_reason(&reason);
                if !error.is_recoverable() {
                    self.observer
                        .on_terminal_error(ProviderTier::Primary, address, &error);
                    return None;
                }
                error
            }
            ProviderOutcome::TransportError(error) => {
                self.observer
                    .on_transport_failure(ProviderTier::Primary, address, &error);
                error
            }
        };

        self.observer.on_fallback_triggered(address, &cause);
        self.lookup_fallback(address)
    }

    /// 直接查询备用 provider 并映射为统一记录
    ///
    /// 失败即终止，返回 None。
    pub fn lookup_fallback(&self, address: &str) -> Option<GeoRecord> {
        let address = address.trim();
        if address.is_empty() {
            return None;
        }

        match query_fallback(
            self.transport.as_ref(),
            &self.providers.fallback_url,
            address,
            self.lookup_timeout(),
        ) {
            Ok(record) => {
                self.observer.on_fallback_used(address);
                Some(record)
            }
            Err(e) if e.is_recoverable() => {
                self.observer
                    .on_transport_failure(ProviderTier::Fallback, address, &e);
                None
            }
            Err(e) => {
                self.observer
                    .on_terminal_error(ProviderTier::Fallback, address, &e);
                None
            }
        }
    }

    /// 按模式完成一次解析
    pub fn resolve(&self, mode: &LookupMode) -> ResolutionResult {
        match mode {
            LookupMode::Explicit(address) => {
                let address = address.trim();
                let classified = PublicAddress::classify(address);
                let record = self.lookup(Some(address));
                let (ipv4, ipv6) = match classified.family() {
                    AddressFamily::V4 => (Some(classified), None),
                    AddressFamily::V6 => (None, Some(classified)),
                };
                ResolutionResult::new(mode, ipv4, ipv6, record)
            }
            LookupMode::AutoDetect => {
                let ipv4 = self.discover(AddressFamily::V4);
                let ipv6 = self.discover(AddressFamily::V6);

                // 优先 IPv4，失败再用 IPv6
                let record = ipv4
                    .as_ref()
                    .and_then(|addr| self.lookup(Some(addr.value())))
                    .or_else(|| {
                        ipv6.as_ref()
                            .and_then(|addr| self.lookup(Some(addr.value())))
                    });

                ResolutionResult::new(mode, ipv4, ipv6, record)
            }
        }
    }

    /// 由可选输入决定模式并解析
    pub fn resolve_input(&self, input: Option<&str>) -> ResolutionResult {
        self.resolve(&LookupMode::from_input(input))
    }
}
