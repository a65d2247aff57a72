//! ECS systems that operate on the picture world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for
//! read-only). They do not own state; all state lives in components and
//! the condition snapshot passed in.

pub mod motion;
pub mod snapshot;
pub mod status;
