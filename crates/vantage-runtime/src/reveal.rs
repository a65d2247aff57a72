//! Progressive reveal of dispatch text.
//!
//! A display effect, not cryptography: the state machine discloses one
//! code point per tick until the buffer is complete. The engine drives it
//! on its own `SimulationClock` instance; restarting always cancels the
//! in-flight clock first, so two timers can never feed one buffer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::{ClockSignal, SimulationClock};

/// Reveal lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    #[default]
    Idle,
    Revealing,
    Complete,
}

/// The pure reveal state machine. One `advance` call discloses exactly one
/// code point.
#[derive(Debug, Default)]
pub struct RevealSequence {
    target: Vec<char>,
    revealed: String,
    cursor: usize,
    phase: RevealPhase,
}

impl RevealSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the start of `text` and enter `Revealing`.
    pub fn start(&mut self, text: &str) {
        self.target = text.chars().collect();
        self.revealed = String::with_capacity(text.len());
        self.cursor = 0;
        self.phase = if self.target.is_empty() {
            RevealPhase::Complete
        } else {
            RevealPhase::Revealing
        };
    }

    /// Disclose the next code point. Past the end this is a no-op.
    pub fn advance(&mut self) -> RevealPhase {
        if self.phase == RevealPhase::Revealing {
            if let Some(&c) = self.target.get(self.cursor) {
                self.revealed.push(c);
                self.cursor += 1;
            }
            if self.cursor >= self.target.len() {
                self.phase = RevealPhase::Complete;
            }
        }
        self.phase
    }

    pub fn revealed(&self) -> &str {
        &self.revealed
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }
}

/// Revealed-text buffer published to the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSnapshot {
    pub phase: RevealPhase,
    pub text: String,
}

/// Drives a `RevealSequence` on its own clock, one instance per viewer.
pub struct RevealEngine {
    period: Duration,
    state: Arc<Mutex<RevealSequence>>,
    clock: Option<SimulationClock>,
}

impl RevealEngine {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            state: Arc::new(Mutex::new(RevealSequence::new())),
            clock: None,
        }
    }

    /// Begin revealing `text` from the start.
    ///
    /// Always cancels the in-flight clock (joining its thread) before the
    /// buffer is reset, so characters from an abandoned reveal can never
    /// interleave with the new one.
    pub fn start(&mut self, text: &str) {
        self.release_clock();

        if let Ok(mut sequence) = self.state.lock() {
            sequence.start(text);
        }

        let shared = Arc::clone(&self.state);
        self.clock = Some(SimulationClock::start("reveal", self.period, move || {
            let Ok(mut sequence) = shared.lock() else {
                return ClockSignal::Halt;
            };
            match sequence.advance() {
                RevealPhase::Complete => ClockSignal::Halt,
                _ => ClockSignal::Continue,
            }
        }));
    }

    /// Abandon the current reveal and return to `Idle`. Idempotent.
    pub fn cancel(&mut self) {
        self.release_clock();
        if let Ok(mut sequence) = self.state.lock() {
            *sequence = RevealSequence::new();
        }
    }

    /// Current buffer and phase.
    pub fn snapshot(&self) -> RevealSnapshot {
        match self.state.lock() {
            Ok(sequence) => RevealSnapshot {
                phase: sequence.phase(),
                text: sequence.revealed().to_string(),
            },
            Err(_) => RevealSnapshot {
                phase: RevealPhase::Idle,
                text: String::new(),
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.snapshot().phase == RevealPhase::Complete
    }

    fn release_clock(&mut self) {
        if let Some(mut clock) = self.clock.take() {
            clock.stop();
        }
    }
}

impl Drop for RevealEngine {
    fn drop(&mut self) {
        // Disposal must always release the timer.
        self.release_clock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn wait_until(deadline_ms: u64, mut done: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_millis(deadline_ms);
        while Instant::now() < deadline {
            if done() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        done()
    }

    // ---- Pure state machine ----

    #[test]
    fn test_sequence_reveals_one_code_point_per_advance() {
        let mut sequence = RevealSequence::new();
        assert_eq!(sequence.phase(), RevealPhase::Idle);

        sequence.start("ABC");
        assert_eq!(sequence.phase(), RevealPhase::Revealing);
        assert_eq!(sequence.revealed(), "");

        sequence.advance();
        assert_eq!(sequence.revealed(), "A");
        sequence.advance();
        assert_eq!(sequence.revealed(), "AB");
        let phase = sequence.advance();
        assert_eq!(sequence.revealed(), "ABC");
        assert_eq!(phase, RevealPhase::Complete);

        // Ticking past the end changes nothing.
        sequence.advance();
        assert_eq!(sequence.revealed(), "ABC");
        assert_eq!(sequence.phase(), RevealPhase::Complete);
    }

    #[test]
    fn test_sequence_restart_discards_old_buffer() {
        let mut sequence = RevealSequence::new();
        sequence.start("OLD DISPATCH");
        sequence.advance();
        sequence.advance();
        assert_eq!(sequence.revealed(), "OL");

        sequence.start("NEW");
        assert_eq!(sequence.revealed(), "");
        sequence.advance();
        assert_eq!(sequence.revealed(), "N");
    }

    #[test]
    fn test_sequence_handles_multibyte_code_points() {
        let mut sequence = RevealSequence::new();
        sequence.start("Δ9");
        sequence.advance();
        assert_eq!(sequence.revealed(), "Δ");
        sequence.advance();
        assert_eq!(sequence.revealed(), "Δ9");
        assert_eq!(sequence.phase(), RevealPhase::Complete);
    }

    #[test]
    fn test_sequence_empty_text_completes_immediately() {
        let mut sequence = RevealSequence::new();
        sequence.start("");
        assert_eq!(sequence.phase(), RevealPhase::Complete);
        sequence.advance();
        assert_eq!(sequence.revealed(), "");
    }

    // ---- Clock-driven engine ----

    #[test]
    fn test_engine_reveals_full_text_and_halts() {
        let mut engine = RevealEngine::new(Duration::from_millis(1));
        engine.start("FLASH TRAFFIC");

        assert!(wait_until(2000, || engine.is_complete()));
        assert_eq!(engine.snapshot().text, "FLASH TRAFFIC");

        // The clock halted itself at Complete.
        assert!(wait_until(
            2000,
            || engine.clock.as_ref().is_none_or(|c| !c.is_running())
        ));
    }

    #[test]
    fn test_engine_restart_cancels_in_flight_reveal() {
        let mut engine = RevealEngine::new(Duration::from_millis(5));
        engine.start("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
        assert!(wait_until(2000, || !engine.snapshot().text.is_empty()));

        engine.start("BBB");
        assert!(wait_until(2000, || engine.is_complete()));
        assert_eq!(
            engine.snapshot().text,
            "BBB",
            "no character of the abandoned reveal may survive"
        );
    }

    #[test]
    fn test_engine_cancel_is_idempotent() {
        let mut engine = RevealEngine::new(Duration::from_millis(1));
        engine.start("ABC");
        engine.cancel();
        engine.cancel();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, RevealPhase::Idle);
        assert_eq!(snapshot.text, "");
    }
}
