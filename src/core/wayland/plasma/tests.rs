use super::surface::{PanelBehavior, PlasmaSurfaceData, Role, WindowType};
use crate::core::compositor::ShellEvent;
use crate::core::errors::ShellError;
use crate::core::state::ShellState;
use crate::core::surface::Surface;

/// A state with one registered surface and a plasma record bound to it,
/// with the creation events already drained.
fn state_with_plasma_surface() -> (ShellState, u32) {
    let mut state = ShellState::new();
    let id = state.next_surface_id();
    state.add_surface(Surface::new(id, None));
    state.create_plasma_surface(id).unwrap();
    state.take_events();
    (state, id)
}

#[test]
fn test_create_emits_and_registers() {
    let mut state = ShellState::new();
    let id = state.next_surface_id();
    state.add_surface(Surface::new(id, None));

    state.create_plasma_surface(id).unwrap();

    let events = state.take_events();
    assert!(events.contains(&ShellEvent::PlasmaSurfaceCreated { surface_id: id }));
    let data = state.plasma_surface(id).unwrap();
    assert_eq!(data.surface_id, id);
    assert_eq!(data.role, Role::Normal);
    assert_eq!(data.panel_behavior, PanelBehavior::AlwaysVisible);
    assert_eq!(data.window_type, WindowType::Unknown);
    assert!(!data.is_position_set());
    assert!(data.visible);
}

#[test]
fn test_second_creation_is_already_bound() {
    let (mut state, id) = state_with_plasma_surface();

    assert_eq!(
        state.create_plasma_surface(id),
        Err(ShellError::AlreadyBound(id))
    );
    // The failed attempt must not disturb the live record or emit anything
    assert!(state.plasma_surface(id).unwrap().alive);
    assert!(!state.has_events());
}

#[test]
fn test_setters_store_and_notify_once() {
    let (mut state, id) = state_with_plasma_surface();

    state.plasma_set_position(id, 120, -40).unwrap();
    let events = state.take_events();
    assert_eq!(events, vec![ShellEvent::PositionChanged { surface_id: id, x: 120, y: -40 }]);
    assert_eq!(state.plasma_surface(id).unwrap().position, Some((120, -40)));
    assert!(state.plasma_surface(id).unwrap().is_position_set());

    state.plasma_set_role(id, 2).unwrap();
    assert_eq!(
        state.take_events(),
        vec![ShellEvent::RoleChanged { surface_id: id, role: Role::Panel }]
    );

    state.plasma_set_skip_taskbar(id, true).unwrap();
    assert_eq!(
        state.take_events(),
        vec![ShellEvent::SkipTaskbarChanged { surface_id: id, skip: true }]
    );
    assert!(state.plasma_surface(id).unwrap().skip_taskbar);

    state.plasma_set_skip_switcher(id, true).unwrap();
    assert_eq!(
        state.take_events(),
        vec![ShellEvent::SkipSwitcherChanged { surface_id: id, skip: true }]
    );

    state.plasma_set_panel_takes_focus(id, true).unwrap();
    assert_eq!(
        state.take_events(),
        vec![ShellEvent::PanelTakesFocusChanged { surface_id: id, takes_focus: true }]
    );

    state.plasma_set_window_type(id, 2010).unwrap();
    assert_eq!(
        state.take_events(),
        vec![ShellEvent::WindowTypeChanged { surface_id: id, window_type: WindowType::Dock }]
    );

    state.plasma_set_visible(id, false).unwrap();
    assert_eq!(
        state.take_events(),
        vec![ShellEvent::VisibleChanged { surface_id: id, visible: false }]
    );
    assert!(!state.plasma_surface(id).unwrap().visible);
}

#[test]
fn test_identical_request_reemits() {
    // Downstream behavior (re-raising a panel) may depend on repetition,
    // so no suppression of unchanged values
    let (mut state, id) = state_with_plasma_surface();

    state.plasma_set_role(id, 2).unwrap();
    state.plasma_set_role(id, 2).unwrap();
    let role_events: Vec<_> = state
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, ShellEvent::RoleChanged { .. }))
        .collect();
    assert_eq!(role_events.len(), 2);
}

#[test]
fn test_panel_behavior_survives_role_change() {
    let (mut state, id) = state_with_plasma_surface();

    // Behavior is accepted while the role is still Normal
    state.plasma_set_panel_behavior(id, 2).unwrap();
    assert_eq!(
        state.plasma_surface(id).unwrap().panel_behavior,
        PanelBehavior::AutoHide
    );

    state.plasma_set_role(id, 2).unwrap();
    assert!(state.plasma_surface(id).unwrap().is_auto_hiding_panel());

    // Moving the role away does not reset the stored behavior
    state.plasma_set_role(id, 0).unwrap();
    assert_eq!(
        state.plasma_surface(id).unwrap().panel_behavior,
        PanelBehavior::AutoHide
    );
    assert!(!state.plasma_surface(id).unwrap().is_auto_hiding_panel());
}

#[test]
fn test_out_of_range_values_rejected() {
    let (mut state, id) = state_with_plasma_surface();

    assert_eq!(
        state.plasma_set_role(id, 99),
        Err(ShellError::ValueOutOfRange { what: "role", value: 99 })
    );
    assert_eq!(
        state.plasma_set_panel_behavior(id, 0),
        Err(ShellError::ValueOutOfRange { what: "panel_behavior", value: 0 })
    );
    assert_eq!(
        state.plasma_set_window_type(id, 1234),
        Err(ShellError::ValueOutOfRange { what: "window_type", value: 1234 })
    );

    // State untouched, nothing emitted
    assert_eq!(state.plasma_surface(id).unwrap().role, Role::Normal);
    assert_eq!(
        state.plasma_surface(id).unwrap().panel_behavior,
        PanelBehavior::AlwaysVisible
    );
    assert!(!state.has_events());
}

#[test]
fn test_auto_hide_request_needs_auto_hiding_panel() {
    let (mut state, id) = state_with_plasma_surface();

    assert_eq!(
        state.plasma_panel_auto_hide_hide(id),
        Err(ShellError::PanelNotAutoHidden(id))
    );
    assert_eq!(
        state.plasma_panel_auto_hide_show(id),
        Err(ShellError::PanelNotAutoHidden(id))
    );

    // Role Panel alone is not enough
    state.plasma_set_role(id, 2).unwrap();
    assert_eq!(
        state.plasma_panel_auto_hide_hide(id),
        Err(ShellError::PanelNotAutoHidden(id))
    );

    state.plasma_set_panel_behavior(id, 2).unwrap();
    state.take_events();

    state.plasma_panel_auto_hide_hide(id).unwrap();
    assert_eq!(
        state.take_events(),
        vec![ShellEvent::PanelAutoHideHideRequested { surface_id: id }]
    );
    state.plasma_panel_auto_hide_show(id).unwrap();
    assert_eq!(
        state.take_events(),
        vec![ShellEvent::PanelAutoHideShowRequested { surface_id: id }]
    );
}

#[test]
fn test_auto_hide_confirmations_never_fail() {
    let (mut state, id) = state_with_plasma_surface();

    // Repeatedly, in any order, without a prior request
    state.hide_auto_hiding_panel(id);
    state.hide_auto_hiding_panel(id);
    state.show_auto_hiding_panel(id);
    state.hide_auto_hiding_panel(id);

    // Unknown surfaces are silently ignored
    state.hide_auto_hiding_panel(4242);
    state.show_auto_hiding_panel(4242);

    // Confirmations do not touch the visible flag
    assert!(state.plasma_surface(id).unwrap().visible);

    // Racing teardown: confirmation after invalidation is a no-op
    state.remove_surface(id);
    state.hide_auto_hiding_panel(id);
    state.show_auto_hiding_panel(id);
}

#[test]
fn test_surface_destruction_invalidates() {
    let (mut state, id) = state_with_plasma_surface();
    state.plasma_set_position(id, 5, 5).unwrap();
    state.take_events();

    state.remove_surface(id);
    let events = state.take_events();
    assert!(events.contains(&ShellEvent::PlasmaSurfaceDestroyed { surface_id: id }));
    assert!(events.contains(&ShellEvent::SurfaceDestroyed { surface_id: id }));

    // Every further request fails with Invalidated and emits nothing
    assert_eq!(state.plasma_set_position(id, 9, 9), Err(ShellError::Invalidated(id)));
    assert_eq!(state.plasma_set_role(id, 2), Err(ShellError::Invalidated(id)));
    assert_eq!(state.plasma_set_visible(id, false), Err(ShellError::Invalidated(id)));
    assert_eq!(
        state.plasma_panel_auto_hide_hide(id),
        Err(ShellError::Invalidated(id))
    );
    assert!(!state.has_events());

    // The stored value was not half-written by the teardown
    assert_eq!(state.plasma_surface(id).unwrap().position, Some((5, 5)));
}

#[test]
fn test_release_frees_surface_for_rebinding() {
    let (mut state, id) = state_with_plasma_surface();

    state.release_plasma_surface(id);
    let events = state.take_events();
    assert!(events.contains(&ShellEvent::PlasmaSurfaceDestroyed { surface_id: id }));
    assert!(state.plasma_surface(id).is_none());

    // A fresh record defaults everything, including panel behavior
    state.create_plasma_surface(id).unwrap();
    assert_eq!(
        state.plasma_surface(id).unwrap().panel_behavior,
        PanelBehavior::AlwaysVisible
    );
}

#[test]
fn test_teardown_is_exactly_once() {
    // Surface death first, client release second: one destroyed event
    let (mut state, id) = state_with_plasma_surface();
    state.remove_surface(id);
    state.take_events();

    state.release_plasma_surface(id);
    assert!(!state.has_events());

    // And the other order: release first, then surface death
    let (mut state, id) = state_with_plasma_surface();
    state.release_plasma_surface(id);
    state.take_events();

    state.remove_surface(id);
    let events = state.take_events();
    assert!(!events.contains(&ShellEvent::PlasmaSurfaceDestroyed { surface_id: id }));
    assert!(events.contains(&ShellEvent::SurfaceDestroyed { surface_id: id }));
}

#[test]
fn test_requests_on_released_record_are_stale() {
    let (mut state, id) = state_with_plasma_surface();
    state.release_plasma_surface(id);
    state.take_events();

    assert_eq!(state.plasma_set_position(id, 1, 1), Err(ShellError::UnknownHandle(id)));
    assert!(!state.has_events());
}

#[test]
fn test_auto_hide_negotiation_scenario() {
    let (mut state, id) = state_with_plasma_surface();

    state.plasma_set_role(id, 2).unwrap();
    state.plasma_set_panel_behavior(id, 2).unwrap();
    state.take_events();

    state.plasma_panel_auto_hide_hide(id).unwrap();
    assert_eq!(
        state.take_events(),
        vec![ShellEvent::PanelAutoHideHideRequested { surface_id: id }]
    );

    // Compositor confirms; no error, and visible stays as separately set
    state.hide_auto_hiding_panel(id);
    assert!(state.plasma_surface(id).unwrap().visible);

    state.show_auto_hiding_panel(id);
    assert!(state.plasma_surface(id).unwrap().visible);
}

#[test]
fn test_plasma_surface_data_defaults() {
    let data = PlasmaSurfaceData::new(7);
    assert_eq!(data.surface_id, 7);
    assert_eq!(data.role, Role::Normal);
    assert_eq!(data.panel_behavior, PanelBehavior::AlwaysVisible);
    assert_eq!(data.window_type, WindowType::Unknown);
    assert!(data.position.is_none());
    assert!(!data.skip_taskbar);
    assert!(!data.skip_switcher);
    assert!(!data.panel_takes_focus);
    assert!(!data.open_under_cursor);
    assert!(data.visible);
    assert!(data.alive);
}

#[test]
fn test_diagnostics_iteration() {
    let mut state = ShellState::new();
    for _ in 0..3 {
        let id = state.next_surface_id();
        state.add_surface(Surface::new(id, None));
        state.create_plasma_surface(id).unwrap();
    }
    assert_eq!(state.plasma_surfaces().count(), 3);
}
