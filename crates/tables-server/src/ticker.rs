//! Self-correcting repeating timer
//!
//! The handler runs immediately, then every `period` measured from the
//! *start* of the previous run: after each run the ticker sleeps for
//! `period - elapsed`, floored at zero. A handler that takes `d < period`
//! therefore still starts every `period`, not every `period + d`.
//!
//! The ticker runs on its own task. The returned [`TickerHandle`] aborts it
//! on [`cancel`](TickerHandle::cancel) or drop, so a handle that goes out of
//! scope never leaves a timer behind.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::Instrument;

/// Owner of a running ticker
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Stop the ticker; no handler run starts after this returns
    #[inline]
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the ticker has stopped (cancelled or handler broke out)
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Run `handler` every `period` until it returns `ControlFlow::Break`
/// or the handle is cancelled
///
/// Must be called within a tokio runtime. The ticker task inherits the
/// caller's tracing span.
pub fn spawn_every<F, Fut>(period: Duration, mut handler: F) -> TickerHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ControlFlow<()>> + Send + 'static,
{
    let task = tokio::spawn(
        async move {
            loop {
                let started = Instant::now();
                if handler().await.is_break() {
                    tracing::debug!("Ticker stopped by handler");
                    break;
                }
                tokio::time::sleep(period.saturating_sub(started.elapsed())).await;
            }
        }
        .in_current_span(),
    );

    TickerHandle { task }
}
