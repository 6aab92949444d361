//! Tokio driver for assistant reply schedules.
//!
//! A [`RevealTimer`] turns a [`Schedule`] into [`TimerEvent`]s on an
//! unbounded channel. At most one schedule runs at a time: starting a new one
//! aborts the previous task, and dropping the timer aborts whatever is left.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::trace;

use crate::reply::Schedule;

/// Shortest tick period; `tokio::time::interval` panics on zero.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Event delivered for a scheduled reply, tagged with its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One reveal step.
    Tick(u64),
    /// The reply delay has passed.
    Elapsed(u64),
}

impl TimerEvent {
    pub fn generation(self) -> u64 {
        match self {
            Self::Tick(g) | Self::Elapsed(g) => g,
        }
    }
}

/// Owns the task backing the current schedule.
#[derive(Debug)]
pub struct RevealTimer {
    tx: UnboundedSender<TimerEvent>,
    handle: Option<JoinHandle<()>>,
}

impl RevealTimer {
    pub fn new(tx: UnboundedSender<TimerEvent>) -> Self {
        Self { tx, handle: None }
    }

    /// Start `schedule`, replacing any running one. `Schedule::None` leaves
    /// the running schedule alone. Must be called inside a tokio runtime.
    pub fn start(&mut self, schedule: Schedule) {
        if schedule == Schedule::None {
            return;
        }
        self.cancel();
        let tx = self.tx.clone();
        let handle = match schedule {
            Schedule::None => return,
            Schedule::Ticks {
                generation,
                interval,
            } => tokio::spawn(async move {
                let interval = interval.max(MIN_INTERVAL);
                let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    trace!(generation, "reveal tick");
                    if tx.send(TimerEvent::Tick(generation)).is_err() {
                        break;
                    }
                }
            }),
            Schedule::Delay { generation, delay } => tokio::spawn(async move {
                time::sleep(delay).await;
                let _ = tx.send(TimerEvent::Elapsed(generation));
            }),
        };
        self.handle = Some(handle);
    }

    /// Stop the running schedule, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::{AssistantSession, TickOutcome, REFUND_REPLY};
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::{timeout, Instant};

    #[tokio::test(start_paused = true)]
    async fn test_ticks_repeat_at_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = RevealTimer::new(tx);
        let start = Instant::now();
        timer.start(Schedule::Ticks {
            generation: 3,
            interval: Duration::from_millis(18),
        });

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(TimerEvent::Tick(3)));
        }
        assert!(start.elapsed() >= Duration::from_millis(54));
        assert!(timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_fires_once() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = RevealTimer::new(tx);
        let start = Instant::now();
        timer.start(Schedule::Delay {
            generation: 7,
            delay: Duration::from_secs(1),
        });

        assert_eq!(rx.recv().await, Some(TimerEvent::Elapsed(7)));
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = RevealTimer::new(tx);
        timer.start(Schedule::Delay {
            generation: 1,
            delay: Duration::from_millis(10),
        });
        timer.cancel();
        assert!(!timer.is_running());
        assert!(timeout(Duration::from_secs(1), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_schedule() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = RevealTimer::new(tx);
        timer.start(Schedule::Delay {
            generation: 1,
            delay: Duration::from_millis(10),
        });
        timer.start(Schedule::Delay {
            generation: 2,
            delay: Duration::from_millis(20),
        });
        assert_eq!(rx.recv().await, Some(TimerEvent::Elapsed(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_schedule_keeps_running_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = RevealTimer::new(tx);
        timer.start(Schedule::Ticks {
            generation: 4,
            interval: Duration::from_millis(18),
        });
        timer.start(Schedule::None);

        assert!(timer.is_running());
        assert_eq!(rx.recv().await, Some(TimerEvent::Tick(4)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_still_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = RevealTimer::new(tx);
        let mut session = AssistantSession::new(
            crate::reply::ReplyRules::default(),
            crate::reply::SessionTiming {
                reveal_interval: Duration::ZERO,
                suggestion_delay: Duration::ZERO,
            },
        );
        timer.start(session.ask("refund"));

        let event = timeout(Duration::from_secs(1), rx.recv()).await.unwrap();
        assert_eq!(event, Some(TimerEvent::Tick(session.generation())));
        assert_eq!(
            session.handle_timer(TimerEvent::Tick(session.generation())),
            TickOutcome::Continue
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_closes_channel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = RevealTimer::new(tx);
        timer.start(Schedule::Ticks {
            generation: 1,
            interval: Duration::from_millis(18),
        });
        drop(timer);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_settles_through_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = RevealTimer::new(tx);
        let mut session = AssistantSession::default();
        timer.start(session.ask("I want a refund"));

        let mut ticks = 0;
        while let Some(event) = rx.recv().await {
            ticks += 1;
            if session.handle_timer(event) == TickOutcome::Settled {
                timer.cancel();
                break;
            }
        }
        assert_eq!(ticks, REFUND_REPLY.chars().count());
        assert_eq!(
            session.entries().last().map(|e| e.text.as_str()),
            Some(REFUND_REPLY)
        );
    }
}
