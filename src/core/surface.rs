//! Minimal underlying-surface record.
//!
//! The plasma surface extension only needs an opaque handle to the surface
//! it augments plus a destruction notification. Buffers, damage and commit
//! semantics are not this crate's concern.

use wayland_server::protocol::wl_surface::WlSurface;

/// A wl_surface known to the compositor core.
#[derive(Debug, Clone)]
pub struct Surface {
    /// Internal surface ID (globally unique, not the client's protocol id)
    pub id: u32,
    /// Protocol resource backing this surface, if any
    pub resource: Option<WlSurface>,
}

impl Surface {
    pub fn new(id: u32, resource: Option<WlSurface>) -> Self {
        Self { id, resource }
    }
}
