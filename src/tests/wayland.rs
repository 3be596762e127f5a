use crate::core::compositor::CompositorConfig;
use crate::core::state::ShellState;
use crate::core::surface::Surface;
use crate::core::wayland::plasma::surface::{PanelBehavior, Role, WindowType};

#[test]
fn test_shell_state_init() {
    let state = ShellState::new();
    assert!(state.surfaces.is_empty());
    assert!(state.plasma.surfaces.is_empty());
    assert!(!state.has_events());
}

#[test]
fn test_id_generation() {
    let mut state = ShellState::new();
    let id1 = state.next_surface_id();
    let id2 = state.next_surface_id();
    assert_eq!(id1 + 1, id2);
}

#[test]
fn test_surface_registration() {
    let mut state = ShellState::new();
    let id = state.next_surface_id();
    state.add_surface(Surface::new(id, None));
    assert!(state.get_surface(id).is_some());

    state.remove_surface(id);
    assert!(state.get_surface(id).is_none());
}

#[test]
fn test_config_defaults() {
    let config = CompositorConfig::default();
    assert_eq!(config.socket_name, "wayland-0");
}

#[test]
fn test_globals_register_on_headless_display() {
    use wayland_server::Display;

    let display = Display::<ShellState>::new().unwrap();
    let globals = crate::core::wayland::register(&display.handle());
    // wl_compositor + org_kde_plasma_shell
    assert_eq!(globals.len(), 2);
}

#[test]
fn test_role_wire_table() {
    assert_eq!(Role::from_wire(0).unwrap(), Role::Normal);
    assert_eq!(Role::from_wire(1).unwrap(), Role::Desktop);
    assert_eq!(Role::from_wire(2).unwrap(), Role::Panel);
    assert_eq!(Role::from_wire(3).unwrap(), Role::OnScreenDisplay);
    assert_eq!(Role::from_wire(4).unwrap(), Role::Notification);
    assert_eq!(Role::from_wire(5).unwrap(), Role::ToolTip);
    assert_eq!(Role::from_wire(6).unwrap(), Role::CriticalNotification);
    assert!(Role::from_wire(7).is_err());
}

#[test]
fn test_panel_behavior_wire_table() {
    assert!(PanelBehavior::from_wire(0).is_err());
    assert_eq!(PanelBehavior::from_wire(1).unwrap(), PanelBehavior::AlwaysVisible);
    assert_eq!(PanelBehavior::from_wire(2).unwrap(), PanelBehavior::AutoHide);
    assert_eq!(PanelBehavior::from_wire(3).unwrap(), PanelBehavior::WindowsCanCover);
    assert_eq!(PanelBehavior::from_wire(4).unwrap(), PanelBehavior::WindowsGoBelow);
    assert!(PanelBehavior::from_wire(5).is_err());
}

#[test]
fn test_window_type_wire_table() {
    assert_eq!(WindowType::from_wire(1).unwrap(), WindowType::BaseApplication);
    assert_eq!(WindowType::from_wire(2).unwrap(), WindowType::Application);
    assert_eq!(WindowType::from_wire(99).unwrap(), WindowType::LastApplicationWindow);
    assert_eq!(WindowType::from_wire(2000).unwrap(), WindowType::Wallpaper);
    assert_eq!(WindowType::from_wire(2022).unwrap(), WindowType::Pointer);
    assert_eq!(WindowType::from_wire(2099).unwrap(), WindowType::LastSysLayer);
    // Gaps in the table are rejected, not clamped
    assert!(WindowType::from_wire(0).is_err());
    assert!(WindowType::from_wire(100).is_err());
    assert!(WindowType::from_wire(2023).is_err());
    assert_eq!(WindowType::Unknown as i32, -1);
}
