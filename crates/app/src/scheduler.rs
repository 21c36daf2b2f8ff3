//! Periodic job scheduling with cancellation.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Runs one job periodically on its own task.
///
/// The first run starts immediately. Runs never overlap: the job is awaited
/// before the next tick, and ticks missed while it was busy are skipped.
#[derive(Debug, Clone)]
pub struct Poller {
    name: &'static str,
    period: Duration,
}

impl Poller {
    /// A poller named `name` (used in logs) ticking every `period`.
    ///
    /// A zero period is raised to one millisecond.
    #[must_use]
    pub fn new(name: &'static str, period: Duration) -> Self {
        Self {
            name,
            period: period.max(Duration::from_millis(1)),
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawn the polling loop. It stops when `cancel` is cancelled, even in
    /// the middle of a run.
    pub fn start<F, Fut>(self, cancel: CancellationToken, job: F) -> JoinHandle<()>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::info!(
                poller = self.name,
                period_ms = u64::try_from(self.period.as_millis()).unwrap_or(u64::MAX),
                "poller started"
            );

            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    _ = interval.tick() => {}
                }

                let started = Instant::now();
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    () = job() => {}
                }

                if started.elapsed() > self.period {
                    tracing::debug!(
                        poller = self.name,
                        "run overran its period; skipping missed ticks"
                    );
                }
            }

            tracing::info!(poller = self.name, "poller stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_job(
        count: &Arc<AtomicUsize>,
    ) -> impl Fn() -> std::future::Ready<()> + Send + 'static {
        let count = Arc::clone(count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_run_immediately_then_every_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = Poller::new("test", Duration::from_millis(4000))
            .start(cancel.clone(), counting_job(&count));

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(4000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_millis(8000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 4);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_when_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = Poller::new("test", Duration::from_millis(100))
            .start(cancel.clone(), counting_job(&count));

        tokio::time::sleep(Duration::from_millis(1)).await;
        cancel.cancel();
        handle.await.unwrap();
        let after_cancel = count.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[tokio::test(start_paused = true)]
    async fn should_never_overlap_slow_runs() {
        let running = Arc::new(AtomicUsize::new(0));
        let max_running = Arc::new(AtomicUsize::new(0));
        let runs = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();

        let job = {
            let running = Arc::clone(&running);
            let max_running = Arc::clone(&max_running);
            let runs = Arc::clone(&runs);
            move || {
                let running = Arc::clone(&running);
                let max_running = Arc::clone(&max_running);
                let runs = Arc::clone(&runs);
                async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    max_running.fetch_max(now, Ordering::SeqCst);
                    runs.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(250)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                }
            }
        };

        let handle = Poller::new("slow", Duration::from_millis(100)).start(cancel.clone(), job);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(max_running.load(Ordering::SeqCst), 1);
        let runs = runs.load(Ordering::SeqCst);
        assert!(runs < 10, "expected skipped ticks, got {runs} runs");
        assert!(runs >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_abandon_in_flight_run_on_cancel() {
        let cancel = CancellationToken::new();
        let finished = Arc::new(AtomicUsize::new(0));
        let job = {
            let finished = Arc::clone(&finished);
            move || {
                let finished = Arc::clone(&finished);
                async move {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    finished.fetch_add(1, Ordering::SeqCst);
                }
            }
        };

        let handle = Poller::new("stuck", Duration::from_millis(100)).start(cancel.clone(), job);
        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn should_raise_zero_period() {
        assert_eq!(
            Poller::new("zero", Duration::ZERO).period(),
            Duration::from_millis(1)
        );
    }
}
