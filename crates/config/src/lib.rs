pub mod schema;

pub use schema::{
    DisplayConfig, IfchartConfig, LinkConfig, OutputFormat, SamplerConfig, ServerConfig,
    SortOrder,
};

use ifchart_core::{IfchartError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `IfchartConfig::default()`
/// if the file doesn't exist so both run modes always have sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<IfchartConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(IfchartConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| IfchartError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<IfchartConfig> {
    let config: IfchartConfig =
        toml::from_str(raw).map_err(|e| IfchartError::Config(format!("TOML parse error: {e}")))?;

    if config.sampler.interval_ms == 0 {
        return Err(IfchartError::Config("sampler.interval_ms must be positive".into()));
    }
    if config.server.broadcast_capacity == 0 || config.link.channel_capacity == 0 {
        return Err(IfchartError::Config("channel capacities must be positive".into()));
    }

    Ok(config)
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("ifchart").join("ifchart.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.link.address, "127.0.0.1:8000");
        assert_eq!(config.server.broadcast_capacity, 1024);
        assert_eq!(config.display.format, OutputFormat::Text);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = parse(
            r#"
            [sampler]
            interval_ms = 500
            ignore = ["docker0"]

            [display]
            format = "json"
            sort = "name"
            "#,
        )
        .unwrap();
        assert_eq!(config.sampler.interval_ms, 500);
        assert!(config.sampler.include_loopback);
        assert_eq!(config.sampler.ignore, ["docker0"]);
        assert_eq!(config.display.sort, SortOrder::Name);
        assert_eq!(config.display.format, OutputFormat::Json);
        assert_eq!(config.link.reconnect_secs, 2);
    }

    #[test]
    fn rejects_zero_interval() {
        let err = parse("[sampler]\ninterval_ms = 0\n").unwrap_err();
        assert!(matches!(err, IfchartError::Config(_)));
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(parse("[link\naddress = 1").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("ifchart-does-not-exist").join("ifchart.toml");
        let config = load(path).unwrap();
        assert_eq!(config.server.name, "ifchart");
    }
}
