use std::sync::Once;

/// How `init_logging` builds the `env_logger` filter.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "tiny3d_engine=debug,wgpu_core=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Filter actually applied: explicit filter, else `RUST_LOG`, else `None`
    /// (meaning the info-level default).
    fn resolved_filter(&self) -> Option<String> {
        pick_filter(self.env_filter.as_deref(), std::env::var("RUST_LOG").ok())
    }
}

/// First non-blank of `explicit` and `from_env`.
fn pick_filter(explicit: Option<&str>, from_env: Option<String>) -> Option<String> {
    let explicit = explicit.filter(|f| !f.trim().is_empty()).map(str::to_owned);
    explicit.or_else(|| from_env.filter(|f| !f.trim().is_empty()))
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.resolved_filter() {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                // wgpu is chatty at info.
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);

        if let Err(e) = builder.try_init() {
            // Another logger was installed by the embedding application.
            eprintln!("tiny3d: logger already set: {e}");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_env() {
        assert_eq!(
            pick_filter(Some("tiny3d_engine=trace"), Some("warn".into())).as_deref(),
            Some("tiny3d_engine=trace")
        );
    }

    #[test]
    fn blank_explicit_filter_falls_back_to_env() {
        assert_eq!(pick_filter(Some("  "), Some("warn".into())).as_deref(), Some("warn"));
        assert_eq!(pick_filter(None, Some("debug".into())).as_deref(), Some("debug"));
    }

    #[test]
    fn nothing_usable_selects_default() {
        assert_eq!(pick_filter(None, None), None);
        assert_eq!(pick_filter(Some(""), Some(" \t".into())), None);
    }

    #[test]
    fn config_filter_is_used_verbatim() {
        let config = LoggingConfig {
            env_filter: Some("tiny3d_engine=trace".into()),
            ..LoggingConfig::default()
        };
        assert_eq!(config.resolved_filter().as_deref(), Some("tiny3d_engine=trace"));
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
