use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `ifchart.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IfchartConfig {
    /// Where `watch` connects to.
    pub link: LinkConfig,
    /// Where `serve` listens.
    pub server: ServerConfig,
    /// Counter polling for `serve`.
    pub sampler: SamplerConfig,
    /// Output of `watch`.
    pub display: DisplayConfig,
}

/// Stream subscriber settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// `host:port` of the publisher.
    pub address: String,
    /// Delay before reconnecting after the stream drops.
    pub reconnect_secs: u64,
    /// Capacity of the event-bus channel between listener and reducer loop.
    pub channel_capacity: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            address:          "127.0.0.1:8000".to_string(),
            reconnect_secs:   2,
            channel_capacity: 32,
        }
    }
}

/// Publisher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Reported by the `info` request.
    pub name: String,
    /// Messages buffered per subscriber before it starts lagging.
    pub broadcast_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind:               "127.0.0.1:8000".to_string(),
            name:               "ifchart".to_string(),
            broadcast_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Poll interval in milliseconds.
    pub interval_ms: u64,
    pub include_loopback: bool,
    /// Interface names never reported.
    pub ignore: Vec<String>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms:      1_000,
            include_loopback: true,
            ignore:           Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub format: OutputFormat,
    pub sort:   SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Header, per-interface summary and sparkline.
    #[default]
    Text,
    /// One JSON array of chart series per tick.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Keep the publisher's order.
    #[default]
    Snapshot,
    Name,
}
