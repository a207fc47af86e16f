//! HTTP 传输层
//!
//! 解析引擎只依赖 `Transport` trait，生产环境用 ureq 的阻塞 Agent，
//! 测试中替换为桩实现以断言请求次数。

use std::time::Duration;

use tracing::trace;
use ureq::Agent;

use crate::errors::{IpFinderError, Result};

/// 阻塞式 HTTP GET
///
/// 实现必须无内部可变共享状态，可在多个线程中同时调用。
pub trait Transport: Send + Sync {
    /// 发起一次 GET 请求，返回 2xx 响应体
    ///
    /// 连接失败、超时、非 2xx 都返回错误，且每次调用最多一次出站请求。
    fn get(&self, url: &str, timeout: Duration) -> Result<String>;
}

/// 基于 ureq 的 Transport
///
/// ureq 的 Agent 是 Send + Sync，内部连接池只在 Agent 生命周期内有效。
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(user_agent: &str) -> Self {
        let agent = Agent::config_builder()
            .user_agent(user_agent)
            .http_status_as_error(true)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(concat!("ipfinder/", env!("CARGO_PKG_VERSION")))
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<String> {
        trace!("GET {} (timeout {:?})", url, timeout);

        let mut resp = self
            .agent
            .get(url)
            .config()
            .timeout_global(Some(timeout))
            .build()
            .call()?;

        resp.body_mut()
            .read_to_string()
            .map_err(|e| IpFinderError::transport(format!("failed to read body from {}: {}", url, e)))
    }
}
