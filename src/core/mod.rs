pub mod errors;
pub mod state;
pub mod compositor;
pub mod socket_manager;
pub mod surface;
pub mod wayland;

// Re-export key types
pub use compositor::{Compositor, CompositorConfig, ShellEvent};
pub use state::ShellState;
