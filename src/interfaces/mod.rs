//! User interfaces
//!
//! Thin presentation shells over the resolution engine.

pub mod cli;
