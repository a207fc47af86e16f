//! Panic handler module
//!
//! Replaces the default panic output with a short message on stderr and
//! a `tracing` error event carrying the location, so panics inside a
//! resolution worker thread still end up in the configured log.

use std::panic;

/// Install custom panic hook
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let payload = panic_info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "Unknown location".to_string());

        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("<unnamed>");

        tracing::error!(
            thread = thread_name,
            location = %location,
            "panic: {}",
            message
        );

        display_simple_panic(&message, thread_name);
    }));
}

fn display_simple_panic(message: &str, thread_name: &str) {
    eprintln!();
    eprintln!("Program panicked in thread '{}': {}", thread_name, message);
    eprintln!("Run with RUST_LOG=debug for more details");
    eprintln!();
}
