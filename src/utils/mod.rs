pub mod build_info;

use std::{path::PathBuf, sync::Once};

static TRACING_INIT: Once = Once::new();

/// Default log directive; `RUST_LOG` adds to or overrides it.
const DEFAULT_DIRECTIVE: &str = "fintrack=info";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }

        // Logs go to stderr so command output on stdout stays clean.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Root directory for config, records and backups.
///
/// `$FINTRACK_HOME` when set, otherwise `~/.fintrack`.
pub fn app_data_dir() -> PathBuf {
    fintrack_config::model::default_data_root()
}
