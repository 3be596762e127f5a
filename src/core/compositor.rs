//! Compositor orchestration.
//!
//! The `Compositor` struct owns the Wayland display and listening sockets,
//! accepts client connections and dispatches protocol events into
//! `ShellState`. The embedding compositor drives `dispatch()` from its own
//! loop and drains `ShellState::take_events()` after each pass.

use std::collections::HashMap;
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use wayland_server::backend::{ClientData, ClientId, DisconnectReason};
use wayland_server::{Display, DisplayHandle};

use crate::core::errors::ShellError;
use crate::core::socket_manager::SocketManager;
use crate::core::state::ShellState;
use crate::core::wayland::plasma::surface::{PanelBehavior, Role, WindowType};

// ============================================================================
// Client Data
// ============================================================================

/// Per-client data stored with each Wayland connection
#[derive(Debug, Clone)]
pub struct MadronaClientData {
    /// Unique client identifier (internal)
    pub id: u32,
    /// Connection timestamp
    pub connected_at: Instant,
}

impl MadronaClientData {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            connected_at: Instant::now(),
        }
    }
}

impl ClientData for MadronaClientData {
    fn initialized(&self, client_id: ClientId) {
        tracing::info!("Client {} initialized (backend id: {:?})", self.id, client_id);
    }

    fn disconnected(&self, client_id: ClientId, reason: DisconnectReason) {
        let reason_str = match reason {
            DisconnectReason::ConnectionClosed => "connection closed",
            DisconnectReason::ProtocolError(_) => "protocol error",
        };
        tracing::info!("Client {} disconnected: {} (backend id: {:?})",
            self.id, reason_str, client_id);
    }
}

// ============================================================================
// Compositor Configuration
// ============================================================================

/// Configuration for the compositor core
#[derive(Debug, Clone)]
pub struct CompositorConfig {
    /// Socket name (e.g., "wayland-0")
    pub socket_name: String,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            socket_name: "wayland-0".to_string(),
        }
    }
}

// ============================================================================
// Shell Events
// ============================================================================

/// Events emitted by the core for the embedding compositor to handle.
///
/// Every plasma surface request re-emits its event even when the stored
/// value did not change; downstream behavior (re-raising a panel, for
/// example) may depend on the repetition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// A wl_surface was created
    SurfaceCreated { surface_id: u32 },
    /// A wl_surface was destroyed
    SurfaceDestroyed { surface_id: u32 },
    /// A plasma surface was bound to a wl_surface
    PlasmaSurfaceCreated { surface_id: u32 },
    /// A plasma surface was released or invalidated
    PlasmaSurfaceDestroyed { surface_id: u32 },
    /// An absolute position was requested
    PositionChanged { surface_id: u32, x: i32, y: i32 },
    /// A shell role was requested
    RoleChanged { surface_id: u32, role: Role },
    /// A panel visibility policy was requested
    PanelBehaviorChanged { surface_id: u32, behavior: PanelBehavior },
    SkipTaskbarChanged { surface_id: u32, skip: bool },
    SkipSwitcherChanged { surface_id: u32, skip: bool },
    PanelTakesFocusChanged { surface_id: u32, takes_focus: bool },
    WindowTypeChanged { surface_id: u32, window_type: WindowType },
    VisibleChanged { surface_id: u32, visible: bool },
    /// An auto-hiding panel asked to be hidden; confirm with
    /// `ShellState::hide_auto_hiding_panel` once it actually is
    PanelAutoHideHideRequested { surface_id: u32 },
    /// An auto-hiding panel asked to be shown again; confirm with
    /// `ShellState::show_auto_hiding_panel`
    PanelAutoHideShowRequested { surface_id: u32 },
    /// The surface asked to be mapped under the pointer
    OpenUnderCursorRequested { surface_id: u32 },
}

// ============================================================================
// Main Compositor
// ============================================================================

/// The compositor core object.
///
/// Manages the Wayland display lifecycle:
/// - Creating and binding the listening socket
/// - Accepting client connections
/// - Dispatching protocol requests into `ShellState`
pub struct Compositor {
    /// Wayland display
    display: Display<ShellState>,

    /// Socket manager (primary + additional sockets)
    socket_manager: SocketManager,

    /// Compositor configuration
    config: CompositorConfig,

    /// Next client ID
    next_client_id: u32,

    /// Connected clients
    clients: HashMap<u32, MadronaClientData>,

    /// Running state
    running: bool,
}

impl Compositor {
    /// Create a new compositor core with the given configuration
    pub fn new(config: CompositorConfig) -> Result<Self> {
        tracing::info!("Creating compositor with socket: {}", config.socket_name);

        let display = Display::new().context("Failed to create Wayland display")?;

        let runtime_dir = Self::runtime_dir();
        let mut socket_manager = SocketManager::new(&runtime_dir)?;
        socket_manager.bind_primary(&config.socket_name)?;

        tracing::info!(
            "Compositor listening on: {}",
            socket_manager.primary_socket_path().display()
        );

        Ok(Self {
            display,
            socket_manager,
            config,
            next_client_id: 1,
            clients: HashMap::new(),
            running: false,
        })
    }

    /// Create compositor with default configuration
    pub fn new_default() -> Result<Self> {
        Self::new(CompositorConfig::default())
    }

    /// Get the display handle for registering globals
    pub fn display_handle(&self) -> DisplayHandle {
        self.display.handle()
    }

    /// Get the primary socket path
    pub fn socket_path(&self) -> String {
        self.socket_manager
            .primary_socket_path()
            .to_string_lossy()
            .to_string()
    }

    /// Get the socket name
    pub fn socket_name(&self) -> &str {
        self.socket_manager.primary_socket_name()
    }

    /// Get the socket file descriptors for polling
    pub fn socket_fds(&self) -> Vec<RawFd> {
        self.socket_manager.poll_fds()
    }

    /// Get the display file descriptor for polling
    pub fn display_fd(&mut self) -> RawFd {
        self.display.backend().poll_fd().as_raw_fd()
    }

    /// Check if the compositor is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get configuration
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    fn runtime_dir() -> PathBuf {
        std::env::var_os("XDG_RUNTIME_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/tmp/madrona"))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start the compositor.
    ///
    /// Registers all protocol globals and prepares for client connections.
    pub fn start(&mut self, _state: &mut ShellState) -> Result<()> {
        if self.running {
            return Err(ShellError::state_error("Compositor already running").into());
        }

        tracing::info!("Starting compositor");

        let dh = self.display.handle();
        crate::core::wayland::register(&dh);

        self.running = true;

        tracing::info!("Compositor started successfully");
        Ok(())
    }

    /// Stop the compositor
    pub fn stop(&mut self) -> Result<()> {
        if !self.running {
            return Err(ShellError::state_error("Compositor not running").into());
        }

        let client_count = self.clients.len();
        tracing::info!("Stopping compositor - disconnecting {} clients", client_count);
        self.clients.clear();

        // Flush pending events so clients observe the disconnect cleanly
        if let Err(e) = self.display.flush_clients() {
            tracing::warn!("Error flushing clients during shutdown: {}", e);
        }

        self.socket_manager.close_all();
        self.running = false;

        tracing::info!("Compositor stopped ({} clients disconnected)", client_count);
        Ok(())
    }

    // =========================================================================
    // Event Processing
    // =========================================================================

    /// Accept pending client connections from all sockets
    pub fn accept_connections(&mut self) {
        let mut display_handle = self.display.handle();
        while let Some(stream) = self.socket_manager.accept_any() {
            let next_id = self.next_client_id;
            self.next_client_id += 1;

            let client_data = MadronaClientData::new(next_id);
            match display_handle.insert_client(stream, Arc::new(client_data.clone())) {
                Ok(client) => {
                    tracing::info!(
                        "Accepted client connection: {} (backend={:?})",
                        next_id,
                        client.id()
                    );
                    self.clients.insert(next_id, client_data);
                }
                Err(e) => {
                    tracing::error!("Failed to insert client: {}", e);
                }
            }
        }
    }

    /// Dispatch pending Wayland events into `state`
    pub fn dispatch(&mut self, state: &mut ShellState) -> Result<usize> {
        if !self.running {
            return Ok(0);
        }

        self.accept_connections();

        let dispatched = self
            .display
            .dispatch_clients(state)
            .context("Failed to dispatch Wayland events")?;

        self.display
            .flush_clients()
            .context("Failed to flush clients")?;

        Ok(dispatched)
    }

    /// Flush all client event queues
    pub fn flush(&mut self) -> Result<()> {
        self.display
            .flush_clients()
            .context("Failed to flush clients")?;
        Ok(())
    }
}
