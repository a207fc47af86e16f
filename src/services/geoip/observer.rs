//! ResolutionObserver trait for diagnostics injection
//!
//! The resolution engine never writes log output itself. It reports
//! well-defined events to an observer:
//! - Production use with `TracingObserver` (structured `tracing` events)
//! - Testing with `NoopObserver` or a recording mock

use crate::errors::IpFinderError;

use super::types::AddressFamily;

/// Geolocation provider tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
pub enum ProviderTier {
    #[strum(serialize = "primary")]
    Primary,
    #[strum(serialize = "fallback")]
    Fallback,
}

/// Trait for observing resolution events.
///
/// All methods are no-op by default, allowing partial implementation.
/// Implementations must be thread-safe (Send + Sync).
#[allow(unused_variables)]
pub trait ResolutionObserver: Send + Sync {
    /// Address echo service did not yield an address
    fn on_discovery_failed(&self, family: AddressFamily, error: &IpFinderError) {}

    /// Transport-class failure talking to a geolocation provider
    /// (network, timeout, non-2xx, unparseable body)
    fn on_transport_failure(&self, tier: ProviderTier, address: &str, error: &IpFinderError) {}

    /// Primary provider answered with an explicit error
    fn on_provider_error(&self, address: &str, reason: &str) {}

    /// Fallback provider is about to be queried
    fn on_fallback_triggered(&self, address: &str, cause: &IpFinderError) {}

    /// Fallback provider produced the record
    fn on_fallback_used(&self, address: &str) {}

    /// Resolution of `address` ended without a record and without escalation
    fn on_terminal_error(&self, tier: ProviderTier, address: &str, error: &IpFinderError) {}
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ResolutionObserver for NoopObserver {}

/// Observer that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ResolutionObserver for TracingObserver {
    fn on_discovery_failed(&self, family: AddressFamily, error: &IpFinderError) {
        tracing::debug!(family = %family, code = error.code(), "public address discovery failed: {}", error);
    }

    fn on_transport_failure(&self, tier: ProviderTier, address: &str, error: &IpFinderError) {
        tracing::warn!(
            provider = tier.as_ref(),
            ip = address,
            code = error.code(),
            "geolocation request failed: {}",
            error
        );
    }

    fn on_provider_error(&self, address: &str, reason: &str) {
        tracing::warn!(provider = "primary", ip = address, "provider error: {}", reason);
    }

    fn on_fallback_triggered(&self, address: &str, cause: &IpFinderError) {
        tracing::info!(ip = address, cause = cause.error_type(), "falling back to secondary provider");
    }

    fn on_fallback_used(&self, address: &str) {
        tracing::info!(ip = address, "using fallback provider result");
    }

    fn on_terminal_error(&self, tier: ProviderTier, address: &str, error: &IpFinderError) {
        tracing::warn!(
            provider = tier.as_ref(),
            ip = address,
            code = error.code(),
            "lookup failed: {}",
            error
        );
    }
}
