//! Cancel-and-reschedule timer for coalescing bursts of input.
//!
//! Every [`Debouncer::schedule`] call drops whatever value was still waiting and
//! restarts the delay. Only a value that survives a full quiet period reaches
//! the receiver. The filter pipeline itself has no notion of time; UIs push each
//! edited [`FilterState`](crate::filter::FilterState) through a debouncer and
//! re-filter when a state comes out the other end.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Must be called from within a tokio runtime.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            tx,
            pending: None,
        };
        (debouncer, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Emit `value` after the delay unless another value is scheduled first.
    pub fn schedule(&mut self, value: T) {
        self.cancel();
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means nobody cares anymore
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_emits_after_quiet_period() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();

        debouncer.schedule("ca");
        assert_eq!(rx.recv().await, Some("ca"));
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule("c");
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule("ca");
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule("can");

        assert_eq!(rx.recv().await, Some("can"));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_restarts_the_delay() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();

        debouncer.schedule(1);
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.schedule(2);

        assert_eq!(rx.recv().await, Some(2));
        assert!(start.elapsed() >= Duration::from_millis(900));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_value() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(100));
        debouncer.schedule(7);
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_emission() {
        let (mut debouncer, mut rx) = Debouncer::new(Duration::from_millis(100));
        debouncer.schedule(1);
        drop(debouncer);

        // Channel closes once the aborted task releases its sender
        assert_eq!(rx.recv().await, None);
    }
}
