//! Per-connection session
//!
//! Owns the handshake state and, once streaming, the ticker that drives the
//! connection's mutation generator. Generated events go into an mpsc queue
//! that the connection task drains onto the socket; the session never touches
//! the socket itself.
//!
//! State machine:
//!
//! ```text
//! AwaitingReady --"init"--> Streaming --close()/drop--> Closed
//! ```
//!
//! Any other frame leaves the state unchanged. Closing cancels the ticker
//! synchronously; a tick that raced with the close finds the queue gone and
//! sends nothing.

use crate::config::ServerConfig;
use crate::generator::MutationGenerator;
use crate::ticker::{spawn_every, TickerHandle};
use std::num::NonZeroU32;
use std::ops::ControlFlow;
use std::time::Duration;
use tables_core::{Handshake, MutationEvent};
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

/// Handshake state of one connection
#[derive(Debug)]
enum SessionState {
    /// Connected, table not ready yet
    AwaitingReady,
    /// Ticker running
    Streaming(TickerHandle),
    /// Ticker released
    Closed,
}

/// One client connection's server-side state
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    period: Duration,
    num_items: NonZeroU32,
    outbound: mpsc::Sender<MutationEvent>,
    state: SessionState,
}

impl Session {
    /// New session waiting for the ready token
    #[must_use]
    pub fn new(config: &ServerConfig, outbound: mpsc::Sender<MutationEvent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            period: config.tick_period(),
            num_items: config.num_items,
            outbound,
            state: SessionState::AwaitingReady,
        }
    }

    /// Session id (for logs)
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether the ready token has been accepted and the session not closed
    #[inline]
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        matches!(self.state, SessionState::Streaming(_))
    }

    /// Whether the ticker is still alive
    ///
    /// False before the handshake, after close, and once the ticker noticed
    /// the outbound queue was dropped.
    #[must_use]
    pub fn generator_running(&self) -> bool {
        match &self.state {
            SessionState::Streaming(ticker) => !ticker.is_finished(),
            SessionState::AwaitingReady | SessionState::Closed => false,
        }
    }

    /// Handle one inbound text frame
    ///
    /// Must be called within a tokio runtime (the ready token spawns the ticker).
    pub fn on_frame(&mut self, frame: &str) -> Handshake {
        let token = Handshake::parse(frame);

        match token {
            Handshake::Ready => match self.state {
                SessionState::AwaitingReady => self.start(),
                SessionState::Streaming(_) => tracing::debug!("Ignoring repeated ready token"),
                SessionState::Closed => tracing::debug!("Ignoring ready token on closed session"),
            },
            Handshake::NotReady => tracing::debug!("Client not ready yet"),
            Handshake::Unknown => {
                tracing::debug!("Ignoring unknown frame ({} bytes)", frame.len());
            }
        }

        token
    }

    /// Stop streaming; idempotent
    pub fn close(&mut self) {
        let previous = std::mem::replace(&mut self.state, SessionState::Closed);
        if let SessionState::Streaming(ticker) = previous {
            ticker.cancel();
            tracing::info!("Mutation stream stopped");
        }
    }

    fn start(&mut self) {
        let mut generator = MutationGenerator::from_entropy(self.num_items);
        let outbound = self.outbound.clone();

        let ticker = spawn_every(self.period, move || {
            std::future::ready(emit(&outbound, &mut generator))
        });

        tracing::info!("Client ready, streaming every {:?}", self.period);
        self.state = SessionState::Streaming(ticker);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

/// One tick: check liveness, then queue one event
fn emit(
    outbound: &mpsc::Sender<MutationEvent>,
    generator: &mut MutationGenerator,
) -> ControlFlow<()> {
    if outbound.is_closed() {
        return ControlFlow::Break(());
    }

    match outbound.try_send(generator.next_event()) {
        Ok(()) => ControlFlow::Continue(()),
        Err(TrySendError::Full(event)) => {
            tracing::debug!("Outbound queue full, dropping event for row {}", event.id);
            ControlFlow::Continue(())
        }
        Err(TrySendError::Closed(_)) => ControlFlow::Break(()),
    }
}
