//! wl_compositor and wl_surface protocol implementation.
//!
//! This hosts the minimum surface machinery the plasma extension needs:
//! surface creation with globally unique internal IDs, frame callbacks and
//! a destruction notification that feeds the extension's lifecycle binding.
//! Buffers, damage tracking and rendering are out of scope.

use wayland_server::{
    protocol::{
        wl_callback::{self, WlCallback},
        wl_compositor::{self, WlCompositor},
        wl_region::{self, WlRegion},
        wl_surface::{self, WlSurface},
    },
    Client, DataInit, Dispatch, DisplayHandle, GlobalDispatch, New,
};

use crate::core::state::ShellState;
use crate::core::surface::Surface;

// ============================================================================
// wl_compositor
// ============================================================================

impl GlobalDispatch<WlCompositor, ()> for ShellState {
    fn bind(
        _state: &mut Self,
        _handle: &DisplayHandle,
        _client: &Client,
        resource: New<WlCompositor>,
        _global_data: &(),
        data_init: &mut DataInit<'_, Self>,
    ) {
        data_init.init(resource, ());
        tracing::debug!("Bound wl_compositor");
    }
}

impl Dispatch<WlCompositor, ()> for ShellState {
    fn request(
        state: &mut Self,
        _client: &Client,
        _resource: &WlCompositor,
        request: wl_compositor::Request,
        _data: &(),
        _dhandle: &DisplayHandle,
        data_init: &mut DataInit<'_, Self>,
    ) {
        match request {
            wl_compositor::Request::CreateSurface { id } => {
                // Internal IDs are globally unique; protocol IDs repeat
                // across clients
                let internal_id = state.next_surface_id();
                let surface = data_init.init(id, internal_id);
                state.add_surface(Surface::new(internal_id, Some(surface)));
            }
            wl_compositor::Request::CreateRegion { id } => {
                data_init.init(id, ());
            }
            _ => {}
        }
    }
}

// ============================================================================
// wl_surface
// ============================================================================

impl Dispatch<WlSurface, u32> for ShellState {
    fn request(
        state: &mut Self,
        _client: &Client,
        _resource: &WlSurface,
        request: wl_surface::Request,
        data: &u32,
        _dhandle: &DisplayHandle,
        data_init: &mut DataInit<'_, Self>,
    ) {
        let surface_id = *data;
        match request {
            wl_surface::Request::Commit => {
                tracing::trace!("Surface {} committed", surface_id);
            }
            wl_surface::Request::Frame { callback } => {
                // No render loop here; answer immediately so clients
                // waiting on a frame callback keep making progress
                let callback = data_init.init(callback, ());
                callback.done(state.time_ms());
            }
            wl_surface::Request::Destroy => {
                // Teardown happens in destroyed(), which also covers
                // client disconnect
            }
            _ => {}
        }
    }

    fn destroyed(
        state: &mut Self,
        _client: wayland_server::backend::ClientId,
        _resource: &WlSurface,
        data: &u32,
    ) {
        state.remove_surface(*data);
    }
}

// ============================================================================
// wl_callback / wl_region
// ============================================================================

impl Dispatch<WlCallback, ()> for ShellState {
    fn request(
        _state: &mut Self,
        _client: &Client,
        _resource: &WlCallback,
        _request: wl_callback::Request,
        _data: &(),
        _dhandle: &DisplayHandle,
        _data_init: &mut DataInit<'_, Self>,
    ) {
        // wl_callback has no requests
    }
}

impl Dispatch<WlRegion, ()> for ShellState {
    fn request(
        _state: &mut Self,
        _client: &Client,
        _resource: &WlRegion,
        request: wl_region::Request,
        _data: &(),
        _dhandle: &DisplayHandle,
        _data_init: &mut DataInit<'_, Self>,
    ) {
        match request {
            wl_region::Request::Destroy => {}
            // Region contents are irrelevant to the shell extension
            _ => {}
        }
    }
}

/// Register the wl_compositor global
pub fn register_compositor(display: &DisplayHandle) -> wayland_server::backend::GlobalId {
    display.create_global::<ShellState, WlCompositor, ()>(6, ())
}
