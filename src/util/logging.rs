//! Standardized logging utility for Madrona
//!
//! This module provides the `mlog!` macro which ensures all operator-facing
//! log lines follow the `YYYY-MM-DD HH:MM:SS [MODULE] Message` format.

#[macro_export]
macro_rules! mlog {
    ($module:expr, $($arg:tt)*) => {{
        let now = chrono::Local::now();
        eprintln!("{} [{}] {}",
            now.format("%Y-%m-%d %H:%M:%S"),
            $module,
            format!($($arg)*)
        );
    }};
}

/// Standardized module identifiers
pub const MAIN: &str = "MAIN";
pub const CORE: &str = "CORE";
pub const WAYLAND: &str = "WAYLAND";
pub const PLASMA: &str = "PLASMA";
pub const SOCKET: &str = "SOCKET";
pub const STATE: &str = "STATE";
