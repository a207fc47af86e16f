//! 后台解析
//!
//! 解析引擎是阻塞的。交互式前端（事件循环、TUI 等）不能在自己的线程上直接调用，
//! 需要把一次解析放到独立线程，再通过 channel 取回结果。

use crossbeam_channel::{Receiver, bounded};
use tracing::{debug, warn};

use crate::services::geoip::{IpResolver, LookupMode, ResolutionResult};

/// 在新线程上执行一次解析，结果通过返回的 Receiver 送达
///
/// Receiver 只会收到一条消息。若工作线程 panic，Receiver 在 `recv()` 时返回断开错误。
pub fn spawn_resolution(
    resolver: IpResolver,
    mode: LookupMode,
) -> std::io::Result<Receiver<ResolutionResult>> {
    let (tx, rx) = bounded(1);

    std::thread::Builder::new()
        .name("ipfinder-resolve".to_string())
        .spawn(move || {
            debug!("Resolution worker started: {:?}", mode);
            let result = resolver.resolve(&mode);
            if tx.send(result).is_err() {
                // 调用方已放弃等待
                warn!("Resolution result dropped: receiver disconnected");
            }
        })?;

    Ok(rx)
}
