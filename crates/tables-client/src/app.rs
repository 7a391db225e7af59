//! Client session
//!
//! Seeding and connecting run concurrently. If the channel opens first the
//! client announces `not ready`; the ready token is only sent after the store
//! is seeded, sorted and painted once. A seed failure ends the session before
//! the ready token goes out, so the server never starts streaming.
//!
//! After the handshake one task drives the socket, the batched refresh timer
//! (batched-sorted mode only) and the [`Reconciler`]; nothing is shared.

use crate::error::ClientError;
use crate::options::ClientOptions;
use crate::seed::{seed, SeedSource};
use futures::{SinkExt, StreamExt};
use std::future::Future;
use tables_core::{Reconciler, Repaint, NOT_READY_TOKEN, READY_TOKEN};
use tokio::time::{Instant, Interval};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Run one client session until the server closes the channel or `shutdown`
/// resolves
///
/// Returns the reconciler so callers can inspect the final table, counters
/// and painter.
///
/// # Errors
/// - `ClientError::Channel` if connecting or sending fails
/// - `ClientError::Seed` if seeding fails (the ready token is not sent)
pub async fn run<S, P, F>(
    url: &str,
    options: &ClientOptions,
    source: S,
    painter: P,
    shutdown: F,
) -> Result<Reconciler<P>, ClientError>
where
    S: SeedSource + 'static,
    P: Repaint,
    F: Future,
{
    let size = options.data_size;
    let seeding = tokio::spawn(async move { seed(&source, size).await });

    let (socket, _) = match connect_async(url).await {
        Ok(connected) => connected,
        Err(err) => {
            seeding.abort();
            tracing::error!("Failed to connect to {}: {}", url, err);
            return Err(err.into());
        }
    };
    tracing::info!("Connected to {}", url);
    let (mut sink, mut stream) = socket.split();

    if !seeding.is_finished() {
        sink.send(Message::Text(NOT_READY_TOKEN.into())).await?;
    }

    let store = match seeding.await? {
        Ok(store) => store,
        Err(err) => {
            tracing::error!("Not sending ready token: {}", err);
            let _ = sink.close().await;
            return Err(err.into());
        }
    };

    let mut reconciler = Reconciler::new(store, options.mode, painter);
    reconciler.render();
    sink.send(Message::Text(READY_TOKEN.into())).await?;
    tracing::info!(
        "Ready: {} rows, {:?} mode",
        reconciler.store().len(),
        reconciler.mode()
    );

    let mut refresh = options.mode.is_batched().then(|| {
        let period = options.refresh_period();
        tokio::time::interval_at(Instant::now() + period, period)
    });

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    // rejections are logged and counted by the reconciler
                    let _ = reconciler.apply_payload(text.as_str());
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the channel");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    tracing::error!("Channel error: {}", err);
                    break;
                }
            },
            () = next_refresh(&mut refresh) => {
                reconciler.refresh();
            }
            _ = &mut shutdown => {
                tracing::info!("Shutting down");
                let _ = sink.close().await;
                break;
            }
        }
    }

    let stats = reconciler.stats();
    tracing::info!(
        "Session ended: {} applied, {} rejected, {} malformed, {} repaints",
        stats.applied,
        stats.rejected,
        stats.malformed,
        stats.repaints
    );
    Ok(reconciler)
}

/// Next batched refresh tick; never resolves in immediate mode
async fn next_refresh(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
