//! Fixed-interval tick driver.
//!
//! One clock owns one thread and one schedule. The next tick is scheduled
//! one period after the previous scheduled time, never after completion,
//! so ticks can run late or be skipped but can never overlap. Stopping is
//! idempotent, joins the thread, and guarantees no further ticks fire.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// What the tick callback wants the clock to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    /// Keep ticking.
    Continue,
    /// Stop the clock from inside the callback.
    Halt,
}

/// A fixed-interval driver running a callback on its own thread.
///
/// Instances are fully independent: each owns its thread, stop flag, and
/// schedule. Dropping a clock stops it.
pub struct SimulationClock {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
    name: String,
}

impl SimulationClock {
    /// Spawn a clock firing `on_tick` every `period`, starting immediately.
    pub fn start<F>(name: &str, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> ClockSignal + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let thread_name = format!("vantage-clock-{name}");

        let thread = thread::Builder::new()
            .name(thread_name)
            .spawn(move || {
                let mut next_tick_time = Instant::now();
                loop {
                    if flag.load(Ordering::SeqCst) {
                        return;
                    }
                    if on_tick() == ClockSignal::Halt {
                        return;
                    }

                    next_tick_time += period;
                    let now = Instant::now();
                    if next_tick_time > now {
                        thread::sleep(next_tick_time - now);
                    } else if now - next_tick_time > period * 2 {
                        // Too far behind: reset to avoid a catch-up spiral.
                        next_tick_time = now;
                    }
                }
            })
            .expect("failed to spawn clock thread");

        debug!(clock = name, ?period, "clock started");
        Self {
            stop,
            thread: Some(thread),
            name: name.to_string(),
        }
    }

    /// Stop the clock and release its thread.
    ///
    /// Idempotent. Blocks until the in-flight tick (if any) completes, so
    /// after this returns no further ticks fire and no partially-applied
    /// update is visible. A panic in the tick thread is logged, never
    /// propagated.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!(clock = %self.name, "tick thread panicked; swallowed at teardown");
            } else {
                debug!(clock = %self.name, "clock stopped");
            }
        }
    }

    /// Whether the tick thread is still alive.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    fn wait_until(deadline_ms: u64, mut done: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_millis(deadline_ms);
        while Instant::now() < deadline {
            if done() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        done()
    }

    #[test]
    fn test_clock_ticks_then_stops_cleanly() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);
        let mut clock = SimulationClock::start("test", Duration::from_millis(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ClockSignal::Continue
        });

        assert!(wait_until(1000, || count.load(Ordering::SeqCst) >= 5));
        clock.stop();
        let after_stop = count.load(Ordering::SeqCst);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(
            count.load(Ordering::SeqCst),
            after_stop,
            "no ticks may fire after stop() returns"
        );
        assert!(!clock.is_running());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut clock =
            SimulationClock::start("idem", Duration::from_millis(2), || ClockSignal::Continue);
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
    }

    #[test]
    fn test_halt_from_callback_ends_exactly_on_signal() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);
        let clock = SimulationClock::start("halt", Duration::from_millis(1), move || {
            if counter.fetch_add(1, Ordering::SeqCst) + 1 >= 3 {
                ClockSignal::Halt
            } else {
                ClockSignal::Continue
            }
        });

        assert!(wait_until(1000, || !clock.is_running()));
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_clocks_are_independent() {
        let count_a = Arc::new(AtomicU32::new(0));
        let count_b = Arc::new(AtomicU32::new(0));

        let counter = Arc::clone(&count_a);
        let mut clock_a = SimulationClock::start("a", Duration::from_millis(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ClockSignal::Continue
        });
        let counter = Arc::clone(&count_b);
        let clock_b = SimulationClock::start("b", Duration::from_millis(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ClockSignal::Continue
        });

        assert!(wait_until(1000, || count_a.load(Ordering::SeqCst) >= 3
            && count_b.load(Ordering::SeqCst) >= 3));

        clock_a.stop();
        let frozen = count_a.load(Ordering::SeqCst);
        let resumed_from = count_b.load(Ordering::SeqCst);

        assert!(
            wait_until(1000, || count_b.load(Ordering::SeqCst) > resumed_from),
            "stopping one clock must not stall the other"
        );
        assert_eq!(count_a.load(Ordering::SeqCst), frozen);
        drop(clock_b);
    }
}
