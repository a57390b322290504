//! Profiling utilities based on the `puffin` crate.

use std::sync::OnceLock;

pub use puffin::{GlobalProfiler, profile_function, profile_scope};

/// Address the puffin HTTP server binds to.
pub const PUFFIN_ADDR: &str = "0.0.0.0:8585";

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Collect scopes in-process only.
    InProcess,
    /// Also serve profiling data to puffin_viewer via HTTP.
    PuffinHttp,
}

static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Enable puffin scopes, optionally starting the HTTP server.
///
/// # Example
/// ```no_run
/// use tessera_core::profiling::{init_profiling, ProfilingBackend};
///
/// init_profiling(ProfilingBackend::PuffinHttp);
/// ```
pub fn init_profiling(backend: ProfilingBackend) {
    puffin::set_scopes_on(true);
    if backend != ProfilingBackend::PuffinHttp || PROFILING_SERVER.get().is_some() {
        return;
    }

    match puffin_http::Server::new(PUFFIN_ADDR) {
        Ok(server) => {
            tracing::info!("Puffin profiler server started on http://{PUFFIN_ADDR}");
            let _ = PROFILING_SERVER.set(server);
        }
        Err(e) => {
            tracing::error!("Failed to start puffin server: {}", e);
        }
    }
}

pub fn is_enabled() -> bool {
    puffin::are_scopes_on()
}

/// Mark the start of a new profiling frame. Called once per form cycle.
#[inline]
pub fn new_frame() {
    puffin::GlobalProfiler::lock().new_frame();
}
