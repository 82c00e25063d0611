//! Zearch: a search client running as a Zellij plugin.
//!
//! Type a query, submit it, and browse the results of a search endpoint as
//! cards showing title, snippet and URL. Results come either from a real HTTP
//! endpoint or from a built-in mock catalog served by a background worker.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Query store and search trigger                   │
//! │  - Fetch controller                                 │
//! │  - Event handling, render projection                │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Backend       │   │ Worker Layer  │
//! │ (ui/)         │   │ (backend/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - HTTP / mock │   │ - Mock search │
//! │ - Theming     │   │ - Request URL │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/): results, response contract,      │
//! │  errors. Infrastructure: sandbox paths.             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/zearch.wasm" {
//!         backend "http"
//!         endpoint "http://localhost:8000/api/search"
//!         initial_query "mallorca"
//!         open_command "xdg-open"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Flow
//!
//! 1. On load the plugin asks for web access. Once answered, `Event::Mount`
//!    fires the initial search with trigger value 0.
//! 2. `Enter` in the query input bumps the trigger; the fetch controller reads
//!    the query store and issues one request per trigger advance.
//! 3. The response (web request result or worker message) settles the
//!    request. Settlements for superseded triggers are dropped.
//! 4. `render` projects the state: loading, error, empty, or cards.
//!
//! # Example
//!
//! ```rust
//! use zearch::{handle_event, initialize, Config, Event};
//!
//! let config = Config {
//!     backend: Some("mock".to_string()),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let (_render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), zearch::ZearchError>(())
//! ```

pub mod app;
pub mod backend;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, Focus};
pub use backend::Backend;
pub use domain::{FetchError, Result, SearchResult, ZearchError};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Query shown in the input when the plugin starts.
pub const DEFAULT_INITIAL_QUERY: &str = "mallorca";

/// Program used to open result URLs.
pub const DEFAULT_OPEN_COMMAND: &str = "xdg-open";

/// Plugin configuration, parsed from the Zellij layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `http` (default) or `mock`.
    pub backend: Option<String>,
    /// Search endpoint for the HTTP backend.
    pub endpoint: Option<String>,
    pub initial_query: String,
    pub open_command: String,
    /// Built-in theme name.
    pub theme_name: Option<String>,
    /// Path to a TOML theme. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,
    /// `EnvFilter` directive for tracing.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: None,
            endpoint: None,
            initial_query: DEFAULT_INITIAL_QUERY.to_string(),
            open_command: DEFAULT_OPEN_COMMAND.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Reads the plugin's configuration map. Missing keys take their defaults.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        Self {
            backend: non_blank("backend"),
            endpoint: non_blank("endpoint"),
            initial_query: config
                .get("initial_query")
                .cloned()
                .unwrap_or_else(|| DEFAULT_INITIAL_QUERY.to_string()),
            open_command: non_blank("open_command").unwrap_or_else(|| DEFAULT_OPEN_COMMAND.to_string()),
            theme_name: non_blank("theme"),
            theme_file: non_blank("theme_file"),
            trace_level: non_blank("trace_level"),
        }
    }

    /// Resolves the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ZearchError::Config`] for an unknown backend kind.
    pub fn resolve_backend(&self) -> Result<Backend> {
        Backend::from_config(self.backend.as_deref(), self.endpoint.as_deref())
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    /// Failures are logged and fall back to the default theme.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            return Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_deref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial, unmounted application state.
///
/// An invalid backend setting is logged and replaced by the default HTTP
/// backend rather than failing the plugin load.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(?config, "initializing zearch plugin");

    let backend = config.resolve_backend().unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid backend configuration, using default");
        Backend::default()
    });
    tracing::info!(backend = ?backend, "search backend selected");

    AppState::new(
        config.initial_query.clone(),
        backend,
        config.resolve_theme(),
        config.open_command.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config, Config::default());
        assert_eq!(config.resolve_backend().unwrap(), Backend::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("backend", "mock"),
            ("endpoint", " https://search.example.com/api "),
            ("initial_query", "ibiza"),
            ("open_command", "open"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.backend.as_deref(), Some("mock"));
        assert_eq!(config.endpoint.as_deref(), Some("https://search.example.com/api"));
        assert_eq!(config.initial_query, "ibiza");
        assert_eq!(config.open_command, "open");
        assert_eq!(config.resolve_theme().name, "catppuccin-latte");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn blank_initial_query_is_kept() {
        let config = Config::from_zellij(&map(&[("initial_query", "")]));
        assert_eq!(config.initial_query, "");
    }

    #[test]
    fn invalid_backend_falls_back_to_http() {
        let config = Config::from_zellij(&map(&[("backend", "carrier-pigeon")]));
        assert!(matches!(config.resolve_backend(), Err(ZearchError::Config(_))));

        let state = initialize(&config);
        assert_eq!(state.backend, Backend::default());
    }

    #[test]
    fn theme_file_wins_over_name() {
        let mut theme = Theme::default();
        theme.name = "from-file".to_string();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&theme).unwrap().as_bytes()).unwrap();

        let config = Config {
            theme_name: Some("catppuccin-latte".to_string()),
            theme_file: Some(file.path().display().to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve_theme().name, "from-file");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("neon".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve_theme(), Theme::default());
    }

    #[test]
    fn initialize_is_unmounted_with_initial_query() {
        let state = initialize(&Config::default());
        assert!(!state.mounted);
        assert_eq!(state.query.query(), DEFAULT_INITIAL_QUERY);
        assert!(!state.fetch_state().loading);
    }
}
