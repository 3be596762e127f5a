//! Socket manager - handles the listening sockets for Wayland connections.
//!
//! Supports a primary socket in the runtime directory plus any number of
//! additional Unix domain sockets (e.g. for waypipe).

use std::os::unix::io::{AsRawFd, RawFd};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use wayland_server::ListeningSocket;

/// Information about a bound socket
#[derive(Debug)]
pub struct SocketInfo {
    /// Path the socket is bound at
    pub path: PathBuf,
    /// Whether this is the primary socket
    pub primary: bool,
}

/// Manages the listening sockets for the compositor
pub struct SocketManager {
    sockets: Vec<(ListeningSocket, SocketInfo)>,

    /// Primary socket identifier (e.g., "wayland-0")
    primary_socket: String,

    /// Runtime directory for Unix sockets
    runtime_dir: PathBuf,
}

impl SocketManager {
    /// Create a new socket manager
    pub fn new(runtime_dir: impl AsRef<Path>) -> Result<Self> {
        let runtime_dir = runtime_dir.as_ref().to_path_buf();

        if !runtime_dir.exists() {
            std::fs::create_dir_all(&runtime_dir)
                .context("Failed to create runtime directory")?;
        }

        Ok(Self {
            sockets: Vec::new(),
            primary_socket: String::new(),
            runtime_dir,
        })
    }

    /// Bind the primary Wayland socket
    pub fn bind_primary(&mut self, socket_name: &str) -> Result<()> {
        let socket_path = self.runtime_dir.join(socket_name);

        // Remove a stale socket from a previous run
        let _ = std::fs::remove_file(&socket_path);

        tracing::info!("Binding primary socket: {}", socket_path.display());

        let socket = ListeningSocket::bind(&socket_path)
            .context(format!("Failed to bind primary socket at {}", socket_path.display()))?;

        let info = SocketInfo {
            path: socket_path,
            primary: true,
        };

        self.sockets.push((socket, info));
        self.primary_socket = socket_name.to_string();

        Ok(())
    }

    /// Add an additional Unix domain socket
    pub fn add_unix_socket(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let _ = std::fs::remove_file(path);

        tracing::info!("Binding additional Unix socket: {}", path.display());

        let socket = ListeningSocket::bind(path)
            .context(format!("Failed to bind Unix socket at {}", path.display()))?;

        let info = SocketInfo {
            path: path.to_path_buf(),
            primary: false,
        };

        self.sockets.push((socket, info));

        Ok(())
    }

    /// Accept a pending connection from any socket, if one is waiting
    pub fn accept_any(&mut self) -> Option<UnixStream> {
        for (socket, info) in &mut self.sockets {
            match socket.accept() {
                Ok(Some(stream)) => {
                    tracing::debug!("Accepted connection on {}", info.path.display());
                    return Some(stream);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Accept failed on {}: {}", info.path.display(), e);
                }
            }
        }
        None
    }

    /// Get the path of the primary socket
    pub fn primary_socket_path(&self) -> PathBuf {
        self.runtime_dir.join(&self.primary_socket)
    }

    /// Get the name of the primary socket
    pub fn primary_socket_name(&self) -> &str {
        &self.primary_socket
    }

    /// File descriptors of all listening sockets, for poll-based loops
    pub fn poll_fds(&self) -> Vec<RawFd> {
        self.sockets
            .iter()
            .map(|(socket, _)| socket.as_raw_fd())
            .collect()
    }

    /// Close all sockets and remove their filesystem entries
    pub fn close_all(&mut self) {
        for (_, info) in self.sockets.drain(..) {
            tracing::debug!("Closing socket: {}", info.path.display());
            let _ = std::fs::remove_file(&info.path);
        }
    }
}
