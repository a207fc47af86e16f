//! ipfinder - Public IP discovery and geolocation lookup
//!
//! This library discovers the caller's public IPv4/IPv6 address and
//! resolves it (or any supplied address) to location and network-ownership
//! data, falling back to a secondary provider when the primary one is
//! rate limited or unreachable.
//!
//! # Features
//! - **cli**: Command-line interface (default)
//!
//! # Architecture
//! - `services`: Resolution engine (`geoip`) and background dispatch (`worker`)
//! - `interfaces`: Presentation shells (CLI)
//! - `config`: Configuration management
//! - `system`: Logging and panic handling
//!
//! # Example
//! ```no_run
//! use ipfinder::services::{IpResolver, LookupMode};
//! use ipfinder::config::ProviderConfig;
//!
//! let resolver = IpResolver::new(ProviderConfig::default());
//! let result = resolver.resolve(&LookupMode::Explicit("8.8.8.8".to_string()));
//! if let Some(record) = result.record {
//!     println!("{:?}", record.city);
//! }
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
#[cfg(feature = "cli")]
pub mod interfaces;
pub mod services;
pub mod system;
