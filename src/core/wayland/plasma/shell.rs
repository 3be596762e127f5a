//! org_kde_plasma_shell protocol implementation.
//!
//! The global is the sole construction path for plasma surfaces and
//! enforces the one-extension-per-surface invariant. Every inbound request
//! mutates `ShellState` and immediately queues the paired `ShellEvent`, so
//! the embedder never observes an event for state it cannot read yet.
//! Confirmation of auto-hide transitions flows the other way through
//! `hide_auto_hiding_panel` / `show_auto_hiding_panel`.

use std::collections::HashMap;

use wayland_server::{
    Client, DataInit, Dispatch, DisplayHandle, GlobalDispatch, New, Resource,
};

use super::protocol::{
    org_kde_plasma_shell::{self, OrgKdePlasmaShell},
    org_kde_plasma_surface::{self, OrgKdePlasmaSurface},
};
use super::surface::{PanelBehavior, PlasmaSurfaceData, Role, WindowType};
use crate::core::compositor::ShellEvent;
use crate::core::errors::ShellError;
use crate::core::state::ShellState;

// ============================================================================
// State
// ============================================================================

/// Registry of plasma surfaces, keyed by internal surface ID.
///
/// One record per bound wl_surface; the map key itself carries the
/// uniqueness invariant. Records and wire resources are tracked separately
/// because they die at different times: the record goes dead when the
/// surface does, the resource lives until the client drops it.
#[derive(Debug, Default)]
pub struct PlasmaShellState {
    pub surfaces: HashMap<u32, PlasmaSurfaceData>,
    pub resources: HashMap<u32, OrgKdePlasmaSurface>,
}

impl PlasmaShellState {
    /// Resolve a surface ID to its plasma record. Absence is a benign
    /// stale-handle condition, not an error.
    pub fn get(&self, surface_id: u32) -> Option<&PlasmaSurfaceData> {
        self.surfaces.get(&surface_id)
    }
}

// ============================================================================
// State transitions (driven by dispatch below, unit-testable directly)
// ============================================================================

impl ShellState {
    fn plasma_entry_mut(&mut self, surface_id: u32) -> Result<&mut PlasmaSurfaceData, ShellError> {
        match self.plasma.surfaces.get_mut(&surface_id) {
            None => Err(ShellError::UnknownHandle(surface_id)),
            Some(data) if !data.alive => Err(ShellError::Invalidated(surface_id)),
            Some(data) => Ok(data),
        }
    }

    /// Read accessor for the compositor collaborator
    pub fn plasma_surface(&self, surface_id: u32) -> Option<&PlasmaSurfaceData> {
        self.plasma.get(surface_id)
    }

    /// Iterate all plasma surfaces, for diagnostics
    pub fn plasma_surfaces(&self) -> impl Iterator<Item = &PlasmaSurfaceData> {
        self.plasma.surfaces.values()
    }

    /// Bind a plasma record to a surface. Sole construction path; fails
    /// with `AlreadyBound` while the surface still has a record.
    pub fn create_plasma_surface(&mut self, surface_id: u32) -> Result<(), ShellError> {
        if self.plasma.surfaces.contains_key(&surface_id) {
            return Err(ShellError::AlreadyBound(surface_id));
        }
        self.plasma
            .surfaces
            .insert(surface_id, PlasmaSurfaceData::new(surface_id));
        self.push_event(ShellEvent::PlasmaSurfaceCreated { surface_id });
        Ok(())
    }

    pub fn plasma_set_position(&mut self, surface_id: u32, x: i32, y: i32) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        data.position = Some((x, y));
        self.push_event(ShellEvent::PositionChanged { surface_id, x, y });
        Ok(())
    }

    pub fn plasma_set_role(&mut self, surface_id: u32, raw: u32) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        let role = Role::from_wire(raw)?;
        // A role change away from Panel leaves panel_behavior untouched
        data.role = role;
        self.push_event(ShellEvent::RoleChanged { surface_id, role });
        Ok(())
    }

    /// Accepted and stored for any role; only effective under role Panel
    pub fn plasma_set_panel_behavior(&mut self, surface_id: u32, raw: u32) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        let behavior = PanelBehavior::from_wire(raw)?;
        data.panel_behavior = behavior;
        self.push_event(ShellEvent::PanelBehaviorChanged { surface_id, behavior });
        Ok(())
    }

    pub fn plasma_set_skip_taskbar(&mut self, surface_id: u32, skip: bool) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        data.skip_taskbar = skip;
        self.push_event(ShellEvent::SkipTaskbarChanged { surface_id, skip });
        Ok(())
    }

    pub fn plasma_set_skip_switcher(&mut self, surface_id: u32, skip: bool) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        data.skip_switcher = skip;
        self.push_event(ShellEvent::SkipSwitcherChanged { surface_id, skip });
        Ok(())
    }

    pub fn plasma_set_panel_takes_focus(
        &mut self,
        surface_id: u32,
        takes_focus: bool,
    ) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        data.panel_takes_focus = takes_focus;
        self.push_event(ShellEvent::PanelTakesFocusChanged { surface_id, takes_focus });
        Ok(())
    }

    pub fn plasma_set_window_type(&mut self, surface_id: u32, raw: u32) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        let window_type = WindowType::from_wire(raw)?;
        data.window_type = window_type;
        self.push_event(ShellEvent::WindowTypeChanged { surface_id, window_type });
        Ok(())
    }

    pub fn plasma_set_visible(&mut self, surface_id: u32, visible: bool) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        data.visible = visible;
        self.push_event(ShellEvent::VisibleChanged { surface_id, visible });
        Ok(())
    }

    pub fn plasma_open_under_cursor(&mut self, surface_id: u32) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        data.open_under_cursor = true;
        self.push_event(ShellEvent::OpenUnderCursorRequested { surface_id });
        Ok(())
    }

    /// Client asks for an auto-hiding panel to hide. Advisory: the
    /// compositor decides whether and when it actually happens.
    pub fn plasma_panel_auto_hide_hide(&mut self, surface_id: u32) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        if !data.is_auto_hiding_panel() {
            return Err(ShellError::PanelNotAutoHidden(surface_id));
        }
        self.push_event(ShellEvent::PanelAutoHideHideRequested { surface_id });
        Ok(())
    }

    pub fn plasma_panel_auto_hide_show(&mut self, surface_id: u32) -> Result<(), ShellError> {
        let data = self.plasma_entry_mut(surface_id)?;
        if !data.is_auto_hiding_panel() {
            return Err(ShellError::PanelNotAutoHidden(surface_id));
        }
        self.push_event(ShellEvent::PanelAutoHideShowRequested { surface_id });
        Ok(())
    }

    // =========================================================================
    // Compositor-facing confirmations (server -> client)
    // =========================================================================

    /// Tell the client its auto-hiding panel is now hidden.
    ///
    /// Never fails: the compositor may confirm for any reason (including
    /// triggers unrelated to a request), repeatedly, and racing teardown.
    /// Unknown or invalidated surfaces are silently ignored.
    pub fn hide_auto_hiding_panel(&self, surface_id: u32) {
        self.confirm_auto_hide(surface_id, true);
    }

    /// Tell the client its auto-hiding panel is shown again
    pub fn show_auto_hiding_panel(&self, surface_id: u32) {
        self.confirm_auto_hide(surface_id, false);
    }

    fn confirm_auto_hide(&self, surface_id: u32, hidden: bool) {
        match self.plasma.surfaces.get(&surface_id) {
            Some(data) if data.alive => {}
            _ => {
                tracing::trace!(
                    "Auto-hide confirmation for unknown/invalidated surface {} ignored",
                    surface_id
                );
                return;
            }
        }
        if let Some(resource) = self.plasma.resources.get(&surface_id) {
            if hidden {
                if resource.version() >= org_kde_plasma_surface::EVT_AUTO_HIDDEN_PANEL_HIDDEN_SINCE {
                    resource.auto_hidden_panel_hidden();
                }
            } else if resource.version() >= org_kde_plasma_surface::EVT_AUTO_HIDDEN_PANEL_SHOWN_SINCE {
                resource.auto_hidden_panel_shown();
            }
            tracing::debug!(
                "Surface {} auto-hide confirmation: {}",
                surface_id,
                if hidden { "hidden" } else { "shown" }
            );
        }
    }

    // =========================================================================
    // Lifecycle binding
    // =========================================================================

    /// The underlying surface is gone: mark the record dead. The record
    /// lingers until the client drops its handle, rejecting every request
    /// with `Invalidated` in the meantime.
    pub fn invalidate_plasma_surface(&mut self, surface_id: u32) {
        let newly_dead = match self.plasma.surfaces.get_mut(&surface_id) {
            Some(data) if data.alive => {
                data.alive = false;
                true
            }
            _ => false,
        };
        // The alive check above makes invalidation exactly-once; whichever
        // of surface-death and resource-death fires second is a no-op
        if newly_dead {
            self.push_event(ShellEvent::PlasmaSurfaceDestroyed { surface_id });
            tracing::debug!("Plasma surface for surface {} invalidated", surface_id);
        }
    }

    /// The client dropped its plasma surface (destroy request or
    /// disconnect): remove the record and free the surface for rebinding.
    pub fn release_plasma_surface(&mut self, surface_id: u32) {
        self.plasma.resources.remove(&surface_id);
        if let Some(data) = self.plasma.surfaces.remove(&surface_id) {
            if data.alive {
                self.push_event(ShellEvent::PlasmaSurfaceDestroyed { surface_id });
            }
            tracing::debug!("Plasma surface for surface {} released", surface_id);
        }
    }
}

// ============================================================================
// org_kde_plasma_shell
// ============================================================================

impl GlobalDispatch<OrgKdePlasmaShell, ()> for ShellState {
    fn bind(
        _state: &mut Self,
        _handle: &DisplayHandle,
        _client: &Client,
        resource: New<OrgKdePlasmaShell>,
        _global_data: &(),
        data_init: &mut DataInit<'_, Self>,
    ) {
        data_init.init(resource, ());
        tracing::debug!("Bound org_kde_plasma_shell");
    }
}

impl Dispatch<OrgKdePlasmaShell, ()> for ShellState {
    fn request(
        state: &mut Self,
        _client: &Client,
        resource: &OrgKdePlasmaShell,
        request: org_kde_plasma_shell::Request,
        _data: &(),
        _dhandle: &DisplayHandle,
        data_init: &mut DataInit<'_, Self>,
    ) {
        match request {
            org_kde_plasma_shell::Request::GetSurface { id, surface } => {
                // Internal surface IDs start at 1; 0 marks a resource that
                // was initialized but never bound, so its destroyed()
                // callback cannot tear down someone else's record
                let surface_id = match surface.data::<u32>().copied() {
                    Some(sid) => sid,
                    None => {
                        data_init.init(id, 0);
                        tracing::warn!("get_surface: wl_surface has no internal record, ignoring");
                        return;
                    }
                };

                match state.create_plasma_surface(surface_id) {
                    Ok(()) => {
                        let plasma_surface = data_init.init(id, surface_id);
                        state.plasma.resources.insert(surface_id, plasma_surface);
                        crate::mlog!(crate::util::logging::PLASMA,
                            "Created plasma surface for surface {}", surface_id);
                    }
                    Err(_already_bound) => {
                        // The new_id must be initialized even though the
                        // client is about to be killed
                        data_init.init(id, 0);
                        resource.post_error(
                            org_kde_plasma_shell::Error::AlreadyBound,
                            format!("wl_surface {} already has a plasma surface", surface_id),
                        );
                    }
                }
            }
            _ => {}
        }
    }
}

// ============================================================================
// org_kde_plasma_surface
// ============================================================================

impl Dispatch<OrgKdePlasmaSurface, u32> for ShellState {
    fn request(
        state: &mut Self,
        _client: &Client,
        resource: &OrgKdePlasmaSurface,
        request: org_kde_plasma_surface::Request,
        data: &u32,
        _dhandle: &DisplayHandle,
        _data_init: &mut DataInit<'_, Self>,
    ) {
        let surface_id = *data;

        match request {
            org_kde_plasma_surface::Request::Destroy => {
                // Teardown happens in destroyed(), which also covers
                // client disconnect
            }
            org_kde_plasma_surface::Request::SetOutput { .. } => {
                // Output hints are accepted and ignored
                tracing::trace!("Surface {} set_output ignored", surface_id);
            }
            org_kde_plasma_surface::Request::SetPosition { x, y } => {
                note(state.plasma_set_position(surface_id, x, y), "set_position", surface_id);
            }
            org_kde_plasma_surface::Request::SetRole { role } => {
                note(state.plasma_set_role(surface_id, role), "set_role", surface_id);
            }
            org_kde_plasma_surface::Request::SetPanelBehavior { flag } => {
                note(
                    state.plasma_set_panel_behavior(surface_id, flag),
                    "set_panel_behavior",
                    surface_id,
                );
            }
            org_kde_plasma_surface::Request::SetSkipTaskbar { skip } => {
                note(
                    state.plasma_set_skip_taskbar(surface_id, skip != 0),
                    "set_skip_taskbar",
                    surface_id,
                );
            }
            org_kde_plasma_surface::Request::SetSkipSwitcher { skip } => {
                note(
                    state.plasma_set_skip_switcher(surface_id, skip != 0),
                    "set_skip_switcher",
                    surface_id,
                );
            }
            org_kde_plasma_surface::Request::SetPanelTakesFocus { takes_focus } => {
                note(
                    state.plasma_set_panel_takes_focus(surface_id, takes_focus != 0),
                    "set_panel_takes_focus",
                    surface_id,
                );
            }
            org_kde_plasma_surface::Request::SetWindowType { window_type } => {
                note(
                    state.plasma_set_window_type(surface_id, window_type),
                    "set_window_type",
                    surface_id,
                );
            }
            org_kde_plasma_surface::Request::SetVisible { visible } => {
                note(
                    state.plasma_set_visible(surface_id, visible != 0),
                    "set_visible",
                    surface_id,
                );
            }
            org_kde_plasma_surface::Request::OpenUnderCursor => {
                note(state.plasma_open_under_cursor(surface_id), "open_under_cursor", surface_id);
            }
            org_kde_plasma_surface::Request::PanelAutoHideHide => {
                match state.plasma_panel_auto_hide_hide(surface_id) {
                    Err(ShellError::PanelNotAutoHidden(_)) => {
                        resource.post_error(
                            org_kde_plasma_surface::Error::PanelNotAutoHidden,
                            format!("surface {} is not an auto-hiding panel", surface_id),
                        );
                    }
                    other => note(other, "panel_auto_hide_hide", surface_id),
                }
            }
            org_kde_plasma_surface::Request::PanelAutoHideShow => {
                match state.plasma_panel_auto_hide_show(surface_id) {
                    Err(ShellError::PanelNotAutoHidden(_)) => {
                        resource.post_error(
                            org_kde_plasma_surface::Error::PanelNotAutoHidden,
                            format!("surface {} is not an auto-hiding panel", surface_id),
                        );
                    }
                    other => note(other, "panel_auto_hide_show", surface_id),
                }
            }
            _ => {}
        }
    }

    fn destroyed(
        state: &mut Self,
        _client: wayland_server::backend::ClientId,
        _resource: &OrgKdePlasmaSurface,
        data: &u32,
    ) {
        state.release_plasma_surface(*data);
    }
}

/// Log the outcome of a request. Out-of-range wire values are noisy enough
/// to warn about; stale or invalidated handles are expected races.
fn note(result: Result<(), ShellError>, what: &str, surface_id: u32) {
    match result {
        Ok(()) => {}
        Err(ShellError::ValueOutOfRange { what: field, value }) => {
            tracing::warn!(
                "Surface {}: {} ignoring out-of-range {} value {}",
                surface_id, what, field, value
            );
        }
        Err(e) => {
            tracing::trace!("Surface {}: {} dropped: {}", surface_id, what, e);
        }
    }
}

/// Register the org_kde_plasma_shell global
pub fn register_plasma_shell(display: &DisplayHandle) -> wayland_server::backend::GlobalId {
    display.create_global::<ShellState, OrgKdePlasmaShell, ()>(8, ())
}
