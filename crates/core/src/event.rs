use crate::snapshot::Snapshot;
use crate::state::ConnectionStatus;
use crate::wire::ServerInfo;

/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - Stream listener   → `Snapshot`, `StreamStatus`
/// - Metadata fetch    → `InfoLoading`, `InfoLoaded`, `InfoFailed`
/// - Ctrl-C handler    → `Shutdown`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Stream ────────────────────────────────────────────────────────────────
    /// A validated snapshot; drives exactly one reducer tick.
    Snapshot(Snapshot),
    /// The stream connection opened, dropped, or is being retried.
    StreamStatus(ConnectionStatus),

    // ── Metadata ──────────────────────────────────────────────────────────────
    /// Metadata request sent.
    InfoLoading,
    /// Metadata arrived; the page counts as loaded.
    InfoLoaded(ServerInfo),
    /// Metadata request failed (carries the reason).
    InfoFailed(String),

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}
