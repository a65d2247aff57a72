//! Core types and definitions for the VANTAGE operational picture.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, routes, condition snapshots, picture views,
//! errors, and constants. It has no dependency on the ECS or on any
//! runtime framework.

pub mod commands;
pub mod components;
pub mod conditions;
pub mod constants;
pub mod enums;
pub mod error;
pub mod route;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
