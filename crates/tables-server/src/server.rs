//! WebSocket endpoint
//!
//! Each upgraded socket runs one task that multiplexes inbound handshake
//! frames and outbound events. The task is the only owner of its
//! [`Session`], so every exit path (client close, socket error, failed send,
//! server shutdown) goes through the same `session.close()`.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::session::Session;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures::{SinkExt, StreamExt};
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tables_core::MutationEvent;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::Instrument;

/// Events buffered per connection before new ones are dropped
pub const OUTBOUND_BUFFER: usize = 256;

/// Shared state for the upgrade handler
#[derive(Debug, Clone)]
struct AppState {
    config: Arc<ServerConfig>,
}

/// Bound, not yet serving, push server
#[derive(Debug)]
pub struct TableServer {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl TableServer {
    /// Bind the listener on `host:config.port`
    ///
    /// # Errors
    /// `ServerError::Bind` if the address is unavailable
    pub async fn bind(config: ServerConfig, host: IpAddr) -> Result<Self, ServerError> {
        let addr = SocketAddr::new(host, config.port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    /// Address actually bound (resolves port 0)
    ///
    /// # Errors
    /// If the OS cannot report the socket address
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener.local_addr().map_err(ServerError::Serve)
    }

    /// Router serving the WebSocket endpoint at `/`
    pub fn router(config: Arc<ServerConfig>) -> Router {
        Router::new()
            .route("/", get(upgrade))
            .with_state(AppState { config })
    }

    /// Serve until the process ends
    ///
    /// # Errors
    /// `ServerError::Serve` if the accept loop fails
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves
    ///
    /// # Errors
    /// `ServerError::Serve` if the accept loop fails
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = Self::router(self.config);
        axum::serve(
            self.listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
    }
}

async fn upgrade(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, peer, state.config))
}

async fn handle_socket(socket: WebSocket, peer: SocketAddr, config: Arc<ServerConfig>) {
    let (outbound, events) = mpsc::channel(OUTBOUND_BUFFER);
    let session = Session::new(&config, outbound);
    let span = tracing::info_span!("session", id = %session.id(), %peer);

    drive(socket, session, events).instrument(span).await;
}

async fn drive(
    socket: WebSocket,
    mut session: Session,
    mut events: mpsc::Receiver<MutationEvent>,
) {
    tracing::info!("Connection opened");
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    session.on_frame(text.as_str());
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::warn!("Channel error: {}", err);
                    break;
                }
            },
            Some(event) = events.recv() => {
                let frame = match event.to_json() {
                    Ok(frame) => frame,
                    Err(err) => {
                        tracing::error!("Failed to encode event: {}", err);
                        continue;
                    }
                };
                if let Err(err) = sink.send(Message::Text(frame.into())).await {
                    tracing::warn!("Send failed, closing: {}", err);
                    break;
                }
            }
        }
    }

    session.close();
    tracing::info!("Connection closed");
}
