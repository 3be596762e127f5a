//! Per-surface plasma shell state and its closed enumerations.
//!
//! Wire values are attacker-controllable, so every enum decodes through
//! `from_wire` with an explicit out-of-range error instead of a lossy cast.

use crate::core::errors::ShellError;

// ============================================================================
// Enumerations
// ============================================================================

/// Shell role of a surface. The role drives compositor stacking policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// A normal surface
    #[default]
    Normal,
    /// Desktop background, stacked below all other surfaces
    Desktop,
    /// A panel (dock), stacked above normal surfaces
    Panel,
    /// On screen display, like a volume changed notification
    OnScreenDisplay,
    /// A notification
    Notification,
    /// A tooltip
    ToolTip,
    /// A critical notification, like battery running out
    CriticalNotification,
}

impl Role {
    pub fn from_wire(value: u32) -> Result<Self, ShellError> {
        match value {
            0 => Ok(Role::Normal),
            1 => Ok(Role::Desktop),
            2 => Ok(Role::Panel),
            3 => Ok(Role::OnScreenDisplay),
            4 => Ok(Role::Notification),
            5 => Ok(Role::ToolTip),
            6 => Ok(Role::CriticalNotification),
            _ => Err(ShellError::ValueOutOfRange { what: "role", value }),
        }
    }
}

/// Visibility policy for a surface with role `Panel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelBehavior {
    /// The panel is always visible
    #[default]
    AlwaysVisible,
    /// The panel hides at a screen edge and returns on edge trigger
    AutoHide,
    /// Windows may be raised above the panel
    WindowsCanCover,
    /// Windows may slide below the panel
    WindowsGoBelow,
}

impl PanelBehavior {
    pub fn from_wire(value: u32) -> Result<Self, ShellError> {
        match value {
            1 => Ok(PanelBehavior::AlwaysVisible),
            2 => Ok(PanelBehavior::AutoHide),
            3 => Ok(PanelBehavior::WindowsCanCover),
            4 => Ok(PanelBehavior::WindowsGoBelow),
            _ => Err(ShellError::ValueOutOfRange {
                what: "panel_behavior",
                value,
            }),
        }
    }
}

/// Window classification codes.
///
/// Application windows use the 1-99 range, system surfaces 2000-2099.
/// `Unknown` (-1) is the distinguished "not classified" value and never
/// appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum WindowType {
    BaseApplication = 1,
    Application = 2,
    ApplicationStarting = 3,
    ApplicationOverlay = 4,
    LastApplicationWindow = 99,
    Wallpaper = 2000,
    Desktop = 2001,
    Dialog = 2002,
    SysSplash = 2003,
    SearchBar = 2004,
    Notification = 2005,
    CriticalNotification = 2006,
    InputMethod = 2007,
    InputMethodDialog = 2008,
    Dnd = 2009,
    Dock = 2010,
    StatusBar = 2011,
    StatusBarPanel = 2012,
    Toast = 2013,
    Keyguard = 2014,
    Phone = 2015,
    SystemDialog = 2016,
    SystemError = 2017,
    VoiceInteraction = 2018,
    SystemOverlay = 2019,
    Screenshot = 2020,
    BootProgress = 2021,
    Pointer = 2022,
    LastSysLayer = 2099,
    #[default]
    Unknown = -1,
}

impl WindowType {
    pub fn from_wire(value: u32) -> Result<Self, ShellError> {
        match value {
            1 => Ok(WindowType::BaseApplication),
            2 => Ok(WindowType::Application),
            3 => Ok(WindowType::ApplicationStarting),
            4 => Ok(WindowType::ApplicationOverlay),
            99 => Ok(WindowType::LastApplicationWindow),
            2000 => Ok(WindowType::Wallpaper),
            2001 => Ok(WindowType::Desktop),
            2002 => Ok(WindowType::Dialog),
            2003 => Ok(WindowType::SysSplash),
            2004 => Ok(WindowType::SearchBar),
            2005 => Ok(WindowType::Notification),
            2006 => Ok(WindowType::CriticalNotification),
            2007 => Ok(WindowType::InputMethod),
            2008 => Ok(WindowType::InputMethodDialog),
            2009 => Ok(WindowType::Dnd),
            2010 => Ok(WindowType::Dock),
            2011 => Ok(WindowType::StatusBar),
            2012 => Ok(WindowType::StatusBarPanel),
            2013 => Ok(WindowType::Toast),
            2014 => Ok(WindowType::Keyguard),
            2015 => Ok(WindowType::Phone),
            2016 => Ok(WindowType::SystemDialog),
            2017 => Ok(WindowType::SystemError),
            2018 => Ok(WindowType::VoiceInteraction),
            2019 => Ok(WindowType::SystemOverlay),
            2020 => Ok(WindowType::Screenshot),
            2021 => Ok(WindowType::BootProgress),
            2022 => Ok(WindowType::Pointer),
            2099 => Ok(WindowType::LastSysLayer),
            _ => Err(ShellError::ValueOutOfRange {
                what: "window_type",
                value,
            }),
        }
    }
}

// ============================================================================
// Per-surface state
// ============================================================================

/// Negotiated shell state for one bound wl_surface.
///
/// The record back-references its surface by internal ID only; the surface
/// never references the record, so teardown in either order cannot cycle.
#[derive(Debug, Clone)]
pub struct PlasmaSurfaceData {
    /// Internal ID of the wl_surface this record is bound to
    pub surface_id: u32,
    /// Requested absolute position, unset until the first set_position
    pub position: Option<(i32, i32)>,
    pub role: Role,
    /// Stored for any role. Only effective while role is `Panel`, and
    /// deliberately NOT reset when the role moves away from `Panel`:
    /// clients rely on it surviving a role round-trip.
    pub panel_behavior: PanelBehavior,
    pub skip_taskbar: bool,
    pub skip_switcher: bool,
    pub panel_takes_focus: bool,
    pub window_type: WindowType,
    pub visible: bool,
    pub open_under_cursor: bool,
    /// Cleared when the underlying surface is destroyed. A dead record
    /// rejects every request with `Invalidated` and emits nothing.
    pub alive: bool,
}

impl PlasmaSurfaceData {
    pub fn new(surface_id: u32) -> Self {
        Self {
            surface_id,
            position: None,
            role: Role::default(),
            panel_behavior: PanelBehavior::default(),
            skip_taskbar: false,
            skip_switcher: false,
            panel_takes_focus: false,
            window_type: WindowType::default(),
            visible: true,
            open_under_cursor: false,
            alive: true,
        }
    }

    /// Whether a global position has been requested
    pub fn is_position_set(&self) -> bool {
        self.position.is_some()
    }

    /// Whether this surface is an auto-hiding panel right now
    pub fn is_auto_hiding_panel(&self) -> bool {
        self.role == Role::Panel && self.panel_behavior == PanelBehavior::AutoHide
    }
}
