//! Service layer
//!
//! This module provides the resolution engine shared by every interface,
//! plus the helper that runs it off the caller's thread.

pub mod geoip;
pub mod worker;

pub use geoip::{
    AddressFamily, GeoRecord, IpResolver, LookupMode, PublicAddress, ResolutionResult,
};
pub use worker::spawn_resolution;
