use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::Result;

/// Capacity of the handoff channel between a walk and its consumer.
///
/// One slot is the closest tokio gets to an unbuffered rendezvous: a slow
/// consumer throttles the walk.
pub(crate) const HANDOFF_CAPACITY: usize = 1;

/// Receiving end of a background pick.
///
/// Paths arrive in walk order. The sequence ends when the producer finishes,
/// either normally or after logging an error. Dropping the stream closes the
/// channel and the producer stops at its next entry.
pub struct PathStream<S> {
    rx: mpsc::Receiver<PathBuf>,
    handle: JoinHandle<Result<S>>,
}

impl<S: Send + 'static> PathStream<S> {
    /// Runs `producer` on the blocking pool, handing it the sending half.
    pub(crate) fn spawn_blocking<F>(producer: F) -> Self
    where
        F: FnOnce(mpsc::Sender<PathBuf>) -> Result<S> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(HANDOFF_CAPACITY);
        let handle = tokio::task::spawn_blocking(move || producer(tx));
        Self { rx, handle }
    }

    /// Next path, or `None` once the producer is done
    pub async fn recv(&mut self) -> Option<PathBuf> {
        self.rx.recv().await
    }

    /// Blocking variant of [`recv`](Self::recv) for synchronous consumers.
    ///
    /// Panics if called from within an async context.
    pub fn blocking_recv(&mut self) -> Option<PathBuf> {
        self.rx.blocking_recv()
    }

    /// Drains the whole sequence.
    pub async fn collect_paths(&mut self) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        while let Some(path) = self.rx.recv().await {
            paths.push(path);
        }
        paths
    }

    /// Stops receiving and waits for the producer.
    ///
    /// Paths not yet received are discarded. Returns the producer's summary,
    /// or the error that ended it early.
    pub async fn finish(self) -> Result<S> {
        let PathStream { mut rx, handle } = self;
        rx.close();
        drop(rx);
        handle.await?
    }
}

impl<S> Stream for PathStream<S> {
    type Item = PathBuf;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<PathBuf>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
