//! Wall-clock drivers for the VANTAGE picture.
//!
//! The simulation crates are headless; this crate owns threads and timers:
//! `SimulationClock` (the fixed-interval tick driver), `PictureLoop`
//! (engine + clock + command channel + snapshot fan-out), and
//! `RevealEngine` (progressive dispatch-text reveal on its own clock).
//! Every widget gets its own instances; nothing here is global.

pub mod clock;
pub mod picture;
pub mod reveal;

pub use clock::{ClockSignal, SimulationClock};
pub use picture::PictureLoop;
pub use reveal::RevealEngine;
pub use vantage_sim as sim;
