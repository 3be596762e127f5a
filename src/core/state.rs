//! Central compositor-side state.
//!
//! `ShellState` is the single dispatch target for every protocol object in
//! this crate. All request handling, event emission and compositor-facing
//! calls happen on the one logical thread that drives `Display::dispatch_clients`,
//! so an observer never sees a `ShellEvent` for state it cannot already read.

use std::collections::HashMap;
use std::time::Instant;

use crate::core::compositor::ShellEvent;
use crate::core::surface::Surface;
use crate::core::wayland::plasma::shell::PlasmaShellState;

/// Compositor core state: surface registry, plasma extension state and the
/// pending event queue drained by the embedder.
pub struct ShellState {
    /// Live surfaces keyed by internal surface ID
    pub surfaces: HashMap<u32, Surface>,

    /// Plasma shell extension state (one record per bound surface)
    pub plasma: PlasmaShellState,

    /// Events pending delivery to the embedding compositor
    pub pending_shell_events: Vec<ShellEvent>,

    /// Creation time, used for frame callback timestamps
    started: Instant,

    next_surface_id: u32,
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            surfaces: HashMap::new(),
            plasma: PlasmaShellState::default(),
            pending_shell_events: Vec::new(),
            started: Instant::now(),
            next_surface_id: 1,
        }
    }

    /// Generate a globally unique surface ID (not dependent on the client's
    /// protocol IDs, which repeat across clients)
    pub fn next_surface_id(&mut self) -> u32 {
        let id = self.next_surface_id;
        self.next_surface_id += 1;
        id
    }

    pub fn add_surface(&mut self, surface: Surface) {
        let id = surface.id;
        self.surfaces.insert(id, surface);
        self.pending_shell_events
            .push(ShellEvent::SurfaceCreated { surface_id: id });
        tracing::debug!("Surface {} registered", id);
    }

    pub fn get_surface(&self, id: u32) -> Option<&Surface> {
        self.surfaces.get(&id)
    }

    /// Tear down a surface. Invalidates any plasma surface bound to it
    /// before the surface record itself goes away, so the extension never
    /// holds a dangling back-reference.
    pub fn remove_surface(&mut self, id: u32) {
        self.invalidate_plasma_surface(id);
        if self.surfaces.remove(&id).is_some() {
            self.pending_shell_events
                .push(ShellEvent::SurfaceDestroyed { surface_id: id });
            tracing::debug!("Surface {} removed", id);
        }
    }

    /// Milliseconds since state creation, for wl_callback.done timestamps
    pub fn time_ms(&self) -> u32 {
        self.started.elapsed().as_millis() as u32
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn push_event(&mut self, event: ShellEvent) {
        self.pending_shell_events.push(event);
    }

    /// Take all pending events (clears the internal queue)
    pub fn take_events(&mut self) -> Vec<ShellEvent> {
        std::mem::take(&mut self.pending_shell_events)
    }

    pub fn has_events(&self) -> bool {
        !self.pending_shell_events.is_empty()
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}
