use ifchart_core::{Snapshot, WireMessage};

/// Outcome of parsing one line from the event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamLine {
    Snapshot(Snapshot),
    /// Blank line, keep-alive comment, or non-data SSE field.
    Ignored,
    /// A line that could not be turned into a snapshot; carries the reason.
    Rejected(String),
}

/// Parse one line of a `text/event-stream` body into a validated [`Snapshot`].
///
/// Each event carries its whole JSON payload on a single `data:` line; bare
/// JSON lines are accepted too.
pub fn parse_line(line: &str) -> StreamLine {
    let line = line.trim();
    if line.is_empty() || line.starts_with(':') {
        return StreamLine::Ignored;
    }

    let payload = match line.strip_prefix("data:") {
        Some(data) => data.trim_start(),
        None if line.starts_with('{') => line,
        // `event:`, `id:`, `retry:` and friends
        None => return StreamLine::Ignored,
    };

    let message: WireMessage = match serde_json::from_str(payload) {
        Ok(m) => m,
        Err(e) => return StreamLine::Rejected(format!("malformed JSON: {e}")),
    };

    match Snapshot::try_from(message) {
        Ok(snapshot) => StreamLine::Snapshot(snapshot),
        Err(e) => StreamLine::Rejected(e.to_string()),
    }
}

/// Serialise a message as a single-line event payload.
pub fn encode_payload(message: &WireMessage) -> serde_json::Result<String> {
    serde_json::to_string(message)
}

/// Splits a chunked response body into lines.
///
/// Chunk boundaries fall anywhere, so a partial line is held until its
/// newline arrives.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Next complete line without its terminator.
    pub fn next_line(&mut self) -> Option<String> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=end).collect();
        let text = String::from_utf8_lossy(&line[..end]);
        Some(text.trim_end_matches('\r').to_string())
    }
}
