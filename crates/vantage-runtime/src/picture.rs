//! Picture loop: one engine driven by one clock, reached only through a
//! command channel.
//!
//! The engine is moved onto the clock thread, so toggles and selections
//! are serialized by the channel and applied at tick boundaries; every
//! tick publishes a fresh immutable snapshot behind an `Arc`, which
//! subscribers must treat as read-only.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::warn;

use vantage_core::commands::PictureCommand;
use vantage_core::state::PictureSnapshot;
use vantage_sim::SimulationEngine;

use crate::clock::{ClockSignal, SimulationClock};

/// Commands sent from callers to the picture loop thread.
#[derive(Debug)]
enum LoopCommand {
    /// A picture command to forward to the engine queue.
    Picture(PictureCommand),
    /// Shut down the loop gracefully.
    Shutdown,
}

/// Fan-out of published snapshots to any number of subscribers.
struct SnapshotPublisher {
    subscribers: Mutex<Vec<Sender<Arc<PictureSnapshot>>>>,
}

impl SnapshotPublisher {
    fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn subscribe(&self) -> Receiver<Arc<PictureSnapshot>> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }

    /// Send to every live subscriber, dropping the ones that hung up.
    fn publish(&self, snapshot: &Arc<PictureSnapshot>) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|tx| tx.send(Arc::clone(snapshot)).is_ok());
        }
    }
}

/// A running picture: engine + clock + command channel.
///
/// Each widget owns its own `PictureLoop`; instances share nothing.
pub struct PictureLoop {
    command_tx: Sender<LoopCommand>,
    latest: Arc<Mutex<Option<Arc<PictureSnapshot>>>>,
    publisher: Arc<SnapshotPublisher>,
    clock: SimulationClock,
}

impl PictureLoop {
    /// Move `engine` onto a new clock thread ticking every `period`.
    pub fn spawn(mut engine: SimulationEngine, period: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<LoopCommand>();
        let latest: Arc<Mutex<Option<Arc<PictureSnapshot>>>> = Arc::new(Mutex::new(None));
        let publisher = Arc::new(SnapshotPublisher::new());

        let thread_latest = Arc::clone(&latest);
        let thread_publisher = Arc::clone(&publisher);

        let clock = SimulationClock::start("picture", period, move || {
            // Drain all pending commands before the tick reads conditions.
            loop {
                match command_rx.try_recv() {
                    Ok(LoopCommand::Picture(command)) => engine.queue_command(command),
                    Ok(LoopCommand::Shutdown) => return ClockSignal::Halt,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return ClockSignal::Halt,
                }
            }

            let snapshot = Arc::new(engine.tick());
            if let Ok(mut lock) = thread_latest.lock() {
                *lock = Some(Arc::clone(&snapshot));
            }
            thread_publisher.publish(&snapshot);
            ClockSignal::Continue
        });

        Self {
            command_tx,
            latest,
            publisher,
            clock,
        }
    }

    /// Queue a command for the next tick boundary.
    pub fn command(&self, command: PictureCommand) {
        if self
            .command_tx
            .send(LoopCommand::Picture(command))
            .is_err()
        {
            warn!("picture loop is gone; command dropped");
        }
    }

    /// Flip a route between passable and blocked.
    pub fn toggle_route(&self, route: usize) {
        self.command(PictureCommand::ToggleRoute { route });
    }

    /// Select an entity for detail display.
    pub fn select(&self, entity: u32) {
        self.command(PictureCommand::Select { entity });
    }

    /// Clear the selection.
    pub fn clear_selection(&self) {
        self.command(PictureCommand::ClearSelection);
    }

    /// Latest published snapshot, for synchronous polling.
    pub fn latest(&self) -> Option<Arc<PictureSnapshot>> {
        self.latest.lock().ok().and_then(|lock| lock.clone())
    }

    /// Subscribe to every future snapshot.
    pub fn subscribe(&self) -> Receiver<Arc<PictureSnapshot>> {
        self.publisher.subscribe()
    }

    /// Whether the loop thread is still ticking.
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Stop the loop and release the clock. Idempotent; teardown failures
    /// are logged, never propagated.
    pub fn shutdown(&mut self) {
        let _ = self.command_tx.send(LoopCommand::Shutdown);
        self.clock.stop();
    }
}

impl Drop for PictureLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}
