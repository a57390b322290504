use crate::profiling::{ProfilingBackend, init_profiling};

/// Runtime-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub profiling: ProfilingMode,
    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            profiling: ProfilingMode::Off,
            log_filter: crate::logging::DEFAULT_FILTER.to_owned(),
        }
    }
}

impl Config {
    /// Install logging and start profiling as configured.
    ///
    /// Logging is installed with `try_init`, so an already present subscriber
    /// is kept.
    pub fn apply(&self) {
        crate::logging::try_init_with_filter(&self.log_filter);

        match self.profiling {
            ProfilingMode::Off => {}
            ProfilingMode::On => init_profiling(ProfilingBackend::InProcess),
            ProfilingMode::WithWebServer => init_profiling(ProfilingBackend::PuffinHttp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling is disabled
    #[default]
    Off,
    /// Scopes are recorded in-process
    On,
    /// Scopes are recorded and served to external tools such as 'puffin_viewer'
    WithWebServer,
}
