//! Subscription - Realtime change-notification handle
//!
//! The one contract every store watch method shares: the current value is
//! delivered immediately on subscribe (where one exists), then every
//! subsequent change, until the owner disposes the handle.

use tokio::sync::mpsc;

/// A disposer unregisters the subscription from whatever registry feeds it.
pub type Disposer = Box<dyn FnOnce() + Send>;

/// A live feed of values from a store watch.
///
/// Dropping the handle disposes it; calling [`dispose`](Self::dispose)
/// early is always safe and idempotent. After disposal no further value is
/// delivered, on any path.
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<T>,
    disposer: Option<Disposer>,
}

impl<T> Subscription<T> {
    pub fn new(rx: mpsc::UnboundedReceiver<T>, disposer: Disposer) -> Self {
        Self {
            rx,
            disposer: Some(disposer),
        }
    }

    /// Wait for the next notification.
    ///
    /// Returns `None` once the subscription has been disposed or the store
    /// side has gone away.
    pub async fn next(&mut self) -> Option<T> {
        if self.disposer.is_none() {
            return None;
        }
        self.rx.recv().await
    }

    /// Take a notification without waiting, if one is already queued.
    pub fn try_next(&mut self) -> Option<T> {
        if self.disposer.is_none() {
            return None;
        }
        self.rx.try_recv().ok()
    }

    /// Unregister from the store. Idempotent; also runs on drop.
    pub fn dispose(&mut self) {
        if let Some(disposer) = self.disposer.take() {
            disposer();
        }
        self.rx.close();
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counted_subscription(
        counter: Arc<AtomicUsize>,
    ) -> (mpsc::UnboundedSender<u32>, Subscription<u32>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sub = Subscription::new(
            rx,
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        (tx, sub)
    }

    #[tokio::test]
    async fn delivers_in_order() {
        let (tx, mut sub) = counted_subscription(Arc::new(AtomicUsize::new(0)));

        tx.send(1).unwrap();
        tx.send(2).unwrap();

        assert_eq!(sub.next().await, Some(1));
        assert_eq!(sub.next().await, Some(2));
    }

    #[tokio::test]
    async fn dispose_is_idempotent_and_stops_delivery() {
        let disposals = Arc::new(AtomicUsize::new(0));
        let (tx, mut sub) = counted_subscription(disposals.clone());

        tx.send(1).unwrap();
        sub.dispose();
        sub.dispose();

        assert_eq!(disposals.load(Ordering::SeqCst), 1);
        assert_eq!(sub.next().await, None);
        assert!(sub.try_next().is_none());
    }

    #[tokio::test]
    async fn drop_runs_the_disposer_once() {
        let disposals = Arc::new(AtomicUsize::new(0));
        let (_tx, sub) = counted_subscription(disposals.clone());

        drop(sub);
        assert_eq!(disposals.load(Ordering::SeqCst), 1);
    }
}
