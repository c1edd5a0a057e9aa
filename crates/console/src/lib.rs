//! Run modes for `ifchart`.
//!
//! Wires together all background tasks:
//! - `serve`: interface sampler → broadcast publisher → HTTP/SSE subscribers
//! - `watch`: stream listener + metadata fetch → event bus → rolling window
//!   → renderer

pub mod render;

use chrono::Local;
use ifchart_config::{DisplayConfig, IfchartConfig, OutputFormat};
use ifchart_core::{IfchartError, Message, Result, ServerInfo, ViewState, WindowFeed, WindowStore};
use ifchart_link::{fetch_info, Publisher, StreamListener};
use ifchart_system::{spawn_sampler, InterfaceFilter};
use std::io::Write;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

// ── Serve ─────────────────────────────────────────────────────────────────────

/// Sample local interfaces and publish a snapshot per tick until Ctrl-C.
pub async fn serve(config: IfchartConfig) -> Result<()> {
    let publisher = Publisher::new(
        ServerInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name:    config.server.name.clone(),
        },
        config.server.broadcast_capacity,
    );

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .map_err(|e| IfchartError::Link(format!("bind {}: {e}", config.server.bind)))?;

    let filter = InterfaceFilter::new(
        config.sampler.include_loopback,
        config.sampler.ignore.iter().cloned(),
    );
    let mut samples = spawn_sampler(config.sampler.interval_ms, filter);

    let server = publisher.clone();
    let server_task = tokio::spawn(async move { server.serve(listener).await });

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            sample = samples.recv() => match sample {
                Some(message) => {
                    let delivered = publisher.publish(&message)?;
                    debug!(interfaces = message.info.len(), delivered, "snapshot published");
                }
                None => {
                    warn!("Sampler stopped; shutting down");
                    break;
                }
            },
            _ = &mut shutdown => {
                info!("Ctrl-C received; shutting down");
                break;
            }
        }
    }

    publisher.shutdown();
    server_task
        .await
        .map_err(|e| IfchartError::System(format!("publisher task: {e}")))?
}

// ── Watch ─────────────────────────────────────────────────────────────────────

/// Reducer-loop state: the rolling window plus the page state around it.
///
/// Messages are handled strictly one at a time in arrival order.
pub struct Session {
    feed: WindowFeed,
    view: watch::Sender<ViewState>,
}

impl Session {
    pub fn new() -> Self {
        let (view, _) = watch::channel(ViewState::default());
        Self { feed: WindowFeed::new(), view }
    }

    pub fn stores(&self) -> watch::Receiver<Arc<WindowStore>> {
        self.feed.subscribe()
    }

    pub fn views(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    pub fn store(&self) -> Arc<WindowStore> {
        self.feed.current()
    }

    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    pub fn handle(&mut self, msg: Message) -> ControlFlow<()> {
        match msg {
            Message::Snapshot(snapshot) => {
                self.feed.apply(&snapshot);
            }
            Message::StreamStatus(status) => {
                debug!(?status, "stream status");
                self.view.send_modify(|v| v.status = status);
            }
            Message::InfoLoading => {
                self.view.send_modify(ViewState::begin_load);
            }
            Message::InfoLoaded(info) => {
                info!("Connected to {} v{}", info.name, info.version);
                self.view.send_modify(|v| v.load_succeeded(info));
            }
            Message::InfoFailed(error) => {
                warn!("Metadata fetch failed: {error}");
                self.view.send_modify(|v| v.load_failed(error));
            }
            Message::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscribe to a publisher and render its rolling window until Ctrl-C.
pub async fn watch(config: IfchartConfig) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(config.link.channel_capacity.max(1));

    let listener = StreamListener::new(
        config.link.address.clone(),
        Duration::from_secs(config.link.reconnect_secs),
        config.link.channel_capacity,
    )?;
    info!("Watching publisher at {}", listener.address());
    listener.spawn_into(tx.clone());

    tokio::spawn(load_info(config.link.address.clone(), tx.clone()));

    let stop = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = stop.send(Message::Shutdown).await;
        }
    });
    drop(tx);

    let mut session = Session::new();
    let renderer = tokio::spawn(render_loop(
        session.stores(),
        session.views(),
        config.display,
        std::io::stdout(),
    ));

    while let Some(msg) = rx.recv().await {
        if session.handle(msg).is_break() {
            info!("Shutting down");
            break;
        }
    }

    renderer.abort();
    Ok(())
}

async fn load_info(address: String, tx: mpsc::Sender<Message>) {
    if tx.send(Message::InfoLoading).await.is_err() {
        return;
    }
    let msg = match fetch_info(&address).await {
        Ok(info) => Message::InfoLoaded(info),
        Err(e) => Message::InfoFailed(e.to_string()),
    };
    let _ = tx.send(msg).await;
}

/// Write every published store to `out`; in text mode also on status changes.
async fn render_loop<W: Write + Send>(
    mut stores: watch::Receiver<Arc<WindowStore>>,
    mut views: watch::Receiver<ViewState>,
    display: DisplayConfig,
    mut out: W,
) {
    loop {
        let woke_on_store = tokio::select! {
            changed = stores.changed() => {
                if changed.is_err() { break; }
                true
            }
            changed = views.changed() => {
                if changed.is_err() { break; }
                false
            }
        };
        // Both may be ready at once; a store published alongside a status
        // change must not be marked seen without being written.
        let store_changed = woke_on_store || stores.has_changed().unwrap_or(false);

        let store = stores.borrow_and_update().clone();
        let view = views.borrow_and_update().clone();

        let written = match display.format {
            OutputFormat::Text => {
                let stamp = Local::now().format("%H:%M:%S").to_string();
                writeln!(out, "{}", render::render_text(&store, &view, display.sort, &stamp))
            }
            OutputFormat::Json if store_changed => match render::render_json(&store, display.sort) {
                Ok(line) => writeln!(out, "{line}"),
                Err(e) => {
                    warn!("Cannot encode window: {e}");
                    Ok(())
                }
            },
            OutputFormat::Json => Ok(()),
        };

        if let Err(e) = written.and_then(|()| out.flush()) {
            warn!("Cannot write output: {e}; stopping renderer");
            break;
        }
    }
}
