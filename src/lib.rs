// Madrona
// Copyright (c) 2026
//
// Compositor core for the plasma shell surface extension: a wayland-server
// based factory/resource pair that stores per-surface desktop-shell state
// and relays every change to the embedding compositor as events.

pub mod core;
pub mod util;

pub use crate::core::compositor::{Compositor, CompositorConfig, ShellEvent};
pub use crate::core::state::ShellState;

#[cfg(test)]
mod tests;
