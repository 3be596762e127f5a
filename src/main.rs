use anyhow::Result;
use madrona::core::compositor::{Compositor, CompositorConfig};
use madrona::core::state::ShellState;
use madrona::mlog;
use madrona::util::logging;

fn main() -> Result<()> {
    // Initialize logging
    // Set default log level to info
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,madrona=debug");
    }
    // Initialize logging with standardized format
    tracing_subscriber::fmt()
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
            "%Y-%m-%d %H:%M:%S".to_string(),
        ))
        .with_ansi(false)
        .init();

    let mut state = ShellState::new();
    let mut compositor = Compositor::new(CompositorConfig::default())?;
    compositor.start(&mut state)?;

    mlog!(logging::MAIN, "madrona listening on {}", compositor.socket_path());

    // Headless loop: dispatch clients and surface the shell events an
    // embedding compositor would consume. Proper epoll-based dispatch
    // belongs to the embedder's event loop.
    loop {
        compositor.dispatch(&mut state)?;
        for event in state.take_events() {
            tracing::info!("shell event: {:?}", event);
        }
        std::thread::sleep(std::time::Duration::from_millis(4));
    }
}
