use crate::events::encode_payload;
use crate::protocol::{EVENTS_PATH, INFO_PATH};
use axum::extract::{ConnectInfo, State};
use axum::http::header::CACHE_CONTROL;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use futures::stream::{self, Stream};
use ifchart_core::{IfchartError, Result, ServerInfo, WireMessage};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Publishing side of the snapshot stream.
///
/// Serves `GET /api/info` and `GET /api/events`. Each published message is
/// encoded once and fanned out to every event-stream subscriber through a
/// broadcast buffer. Subscribers that fall behind skip what they missed and
/// carry on with the newest messages.
#[derive(Debug, Clone)]
pub struct Publisher {
    info:   Arc<ServerInfo>,
    sender: broadcast::Sender<Arc<str>>,
    cancel: CancellationToken,
}

impl Publisher {
    pub fn new(info: ServerInfo, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            info: Arc::new(info),
            sender,
            cancel: CancellationToken::new(),
        }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Fan a message out to current subscribers; returns how many received it.
    /// Having no subscribers is not an error.
    pub fn publish(&self, message: &WireMessage) -> Result<usize> {
        let payload = encode_payload(message)
            .map_err(|e| IfchartError::Link(format!("encode snapshot: {e}")))?;
        Ok(self.sender.send(Arc::from(payload)).unwrap_or(0))
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Stop accepting and end every open stream.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(INFO_PATH, get(info_handler))
            .route(EVENTS_PATH, get(events_handler))
            .with_state(self.clone())
    }

    /// Serve HTTP on `listener` until [`shutdown`](Self::shutdown).
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, "Publishing snapshots for {} v{}", self.info.name, self.info.version);

        let cancel = self.cancel.clone();
        axum::serve(
            listener,
            self.router().into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await?;

        info!("Publisher stopped");
        Ok(())
    }

    fn events(&self) -> impl Stream<Item = std::result::Result<Event, Infallible>> {
        let rx = self.sender.subscribe();
        let cancel = self.cancel.clone();

        stream::unfold((rx, cancel), |(mut rx, cancel)| async move {
            loop {
                tokio::select! {
                    msg = rx.recv() => match msg {
                        Ok(payload) => {
                            let event = Event::default().data(&*payload);
                            return Some((Ok(event), (rx, cancel)));
                        }
                        Err(RecvError::Closed) => return None,
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Subscriber lagged; skipped {skipped} snapshots");
                            continue;
                        }
                    },
                    _ = cancel.cancelled() => return None,
                }
            }
        })
    }
}

/// GET /api/info
async fn info_handler(State(publisher): State<Publisher>) -> Json<ServerInfo> {
    Json(publisher.info().clone())
}

/// GET /api/events
async fn events_handler(
    State(publisher): State<Publisher>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    info!("Subscriber {peer} connected");
    (
        [(CACHE_CONTROL, "no-transform")],
        Sse::new(publisher.events()).keep_alive(KeepAlive::default()),
    )
}
