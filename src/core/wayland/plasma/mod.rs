//! Plasma shell surface extension (org_kde_plasma_shell).
//!
//! The factory global creates one org_kde_plasma_surface per wl_surface,
//! `surface` holds the per-surface state and enums, and `shell` carries the
//! dispatch impls plus the compositor-facing API.

pub mod protocol;
pub mod shell;
pub mod surface;

#[cfg(test)]
mod tests;

pub use shell::register_plasma_shell;
