//! Wayland protocol implementations for the Madrona core.
//!
//! Each protocol lives in its own module with `GlobalDispatch`/`Dispatch`
//! impls on `ShellState`. Globals are registered through `register()`.

pub mod compositor;
pub mod plasma;

use wayland_server::backend::GlobalId;
use wayland_server::DisplayHandle;

/// Register all protocol globals
pub fn register(display: &DisplayHandle) -> Vec<GlobalId> {
    vec![
        compositor::register_compositor(display),
        plasma::register_plasma_shell(display),
    ]
}
