//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate the renderer, pattern facility and vault into the
//!   daily-note fill workflow.
//! - Keep host/embedding layers decoupled from storage details.

pub mod companion;
pub mod fill_service;
