//! Timed candle reveal used by the prediction game.
//!
//! The visible count lives in a shared atomic so the render side can read it
//! without awaiting. The ticking task is aborted on `stop()` and on drop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

pub struct RevealAnimation {
    visible: Arc<AtomicUsize>,
    total: usize,
    task: Option<JoinHandle<()>>,
}

impl RevealAnimation {
    /// Start revealing from `initial` candles up to `total`, one per `period`.
    /// Must be called inside a tokio runtime.
    pub fn start(total: usize, initial: usize, period: Duration) -> Self {
        let initial = initial.min(total);
        let visible = Arc::new(AtomicUsize::new(initial));

        let task = (initial < total).then(|| {
            let visible = Arc::clone(&visible);
            tokio::spawn(async move {
                let mut ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // First tick completes immediately
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    let shown = visible.fetch_add(1, Ordering::SeqCst) + 1;
                    if shown >= total {
                        debug!(total, "reveal finished");
                        break;
                    }
                }
            })
        });

        debug!(total, initial, period_ms = period.as_millis() as u64, "reveal started");
        Self { visible, total, task }
    }

    pub fn visible(&self) -> usize {
        self.visible.load(Ordering::SeqCst).min(self.total)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.visible() >= self.total
    }

    /// Stop ticking and keep the current count
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(visible = self.visible(), "reveal stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for RevealAnimation {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
