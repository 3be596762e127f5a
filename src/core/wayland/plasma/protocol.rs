//! Generated server bindings for the bundled plasma-shell protocol.
//!
//! The published plasma protocol crates do not carry the downstream
//! additions this compositor speaks (set_window_type, set_visible), so the
//! XML is bundled under protocols/ and run through wayland-scanner.

pub use generated::{org_kde_plasma_shell, org_kde_plasma_surface};

#[allow(
    non_snake_case,
    non_upper_case_globals,
    non_camel_case_types,
    dead_code,
    unused_imports
)]
mod generated {
    use wayland_server;
    use wayland_server::protocol::*;

    pub mod __interfaces {
        use wayland_backend;
        use wayland_server::protocol::__interfaces::*;
        wayland_scanner::generate_interfaces!("protocols/plasma-shell.xml");
    }
    use self::__interfaces::*;

    wayland_scanner::generate_server_code!("protocols/plasma-shell.xml");
}
