//! Domain model for the daily-note fill workflow.
//!
//! # Responsibility
//! - Define canonical data structures shared by the renderer and services.
//! - Keep parsing/normalization of raw host values close to the types.
//!
//! # Invariants
//! - Serialized shapes use camelCase keys to match host settings payloads.
//! - Models hold no I/O; vault access stays behind the vault traits.

pub mod dialect;
pub mod event;
pub mod settings;
pub mod token;
