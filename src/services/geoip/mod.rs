//! GeoIP 解析模块
//!
//! 提供公网地址探测与 IP 地理位置查询功能，支持：
//! - ipify 探测 IPv4 / IPv6 公网地址
//! - ipapi.co 主 provider
//! - ip-api.com fallback（限流、传输失败时启用）

mod discovery;
mod fallback;
mod observer;
mod primary;
mod resolver;
mod transport;
mod types;

pub use fallback::normalize_fallback;
pub use observer::{NoopObserver, ProviderTier, ResolutionObserver, TracingObserver};
pub use resolver::IpResolver;
pub use transport::{Transport, UreqTransport};
pub use types::{AddressFamily, GeoRecord, LookupMode, PublicAddress, ResolutionResult};
