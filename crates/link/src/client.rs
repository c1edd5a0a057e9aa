use crate::events::{parse_line, LineBuffer, StreamLine};
use crate::protocol::{url, EVENTS_PATH, INFO_PATH};
use futures::StreamExt;
use ifchart_core::{ConnectionStatus, IfchartError, Message, Result, ServerInfo};
use reqwest::header::ACCEPT;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const INFO_TIMEOUT: Duration = Duration::from_secs(10);

fn link_error(context: &str, e: reqwest::Error) -> IfchartError {
    IfchartError::Link(format!("{context}: {e}"))
}

/// Subscriber side of the snapshot stream.
///
/// Opens `GET /api/events` on a publisher and turns each SSE `data:` event
/// into a [`Message`]. Automatically reconnects if the connection drops.
#[derive(Debug, Clone)]
pub struct StreamListener {
    address:   String,
    http:      reqwest::Client,
    reconnect: Duration,
    capacity:  usize,
}

impl StreamListener {
    pub fn new(address: impl Into<String>, reconnect: Duration, capacity: usize) -> Result<Self> {
        // No overall timeout: the body of an event stream never completes.
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| link_error("building HTTP client", e))?;

        Ok(Self {
            address: address.into(),
            http,
            reconnect,
            capacity: capacity.max(1),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Spawn a background task that reads the event stream and forwards
    /// snapshots and connection-status changes on the returned channel, in
    /// arrival order.
    ///
    /// The task stops when the receiver is dropped.
    pub fn spawn(self) -> mpsc::Receiver<Message> {
        let (tx, rx) = mpsc::channel(self.capacity);
        tokio::spawn(self.run(tx));
        rx
    }

    /// Same as [`spawn`](Self::spawn) but feeding an existing event bus.
    pub fn spawn_into(self, tx: mpsc::Sender<Message>) {
        tokio::spawn(self.run(tx));
    }

    async fn run(self, tx: mpsc::Sender<Message>) {
        loop {
            if tx.send(Message::StreamStatus(ConnectionStatus::Connecting)).await.is_err() {
                return;
            }

            match self.stream(&tx).await {
                Ok(true) => return, // all receivers dropped
                Ok(false) => {
                    warn!(
                        "Stream from {} closed; reconnecting in {}s…",
                        self.address,
                        self.reconnect.as_secs()
                    );
                }
                Err(e) => {
                    error!(
                        "Cannot stream from {}: {e}; retrying in {}s…",
                        self.address,
                        self.reconnect.as_secs()
                    );
                }
            }

            if tx.send(Message::StreamStatus(ConnectionStatus::Closed)).await.is_err() {
                return;
            }
            tokio::time::sleep(self.reconnect).await;
        }
    }

    /// Read one response body to completion. `Ok(true)` means the consumer is gone.
    async fn stream(&self, tx: &mpsc::Sender<Message>) -> Result<bool> {
        let response = self
            .http
            .get(url(&self.address, EVENTS_PATH))
            .header(ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| link_error("connect", e))?
            .error_for_status()
            .map_err(|e| link_error("subscribe", e))?;

        info!("Connected to snapshot stream at {}", self.address);
        if tx.send(Message::StreamStatus(ConnectionStatus::Open)).await.is_err() {
            return Ok(true);
        }

        let mut body = response.bytes_stream();
        let mut lines = LineBuffer::default();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| link_error("read", e))?;
            lines.push(&chunk);

            while let Some(line) = lines.next_line() {
                match parse_line(&line) {
                    StreamLine::Snapshot(snapshot) => {
                        if tx.send(Message::Snapshot(snapshot)).await.is_err() {
                            return Ok(true);
                        }
                    }
                    StreamLine::Ignored => {}
                    StreamLine::Rejected(reason) => warn!("Skipping stream event: {reason}"),
                }
            }
        }

        debug!("publisher closed the stream");
        Ok(false)
    }
}

/// Ask the publisher at `address` for its metadata (`GET /api/info`).
pub async fn fetch_info(address: &str) -> Result<ServerInfo> {
    let http = reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(INFO_TIMEOUT)
        .build()
        .map_err(|e| link_error("building HTTP client", e))?;

    http.get(url(address, INFO_PATH))
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| link_error("request info", e))?
        .error_for_status()
        .map_err(|e| link_error("request info", e))?
        .json()
        .await
        .map_err(|e| link_error("parse info", e))
}
