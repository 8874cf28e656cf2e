//! Companion readiness gate.
//!
//! # Responsibility
//! - Wait, bounded, for the collaborating daily-note subsystem to finish
//!   loading before the fill workflow subscribes to events.
//!
//! # Invariants
//! - The wait always terminates: ready, or `CompanionUnavailable` once the
//!   timeout elapses.
//! - Readiness is probed through a trait so hosts and tests control it.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread;
use std::time::{Duration, Instant};

/// Default bounded wait for the companion to come up.
pub const DEFAULT_COMPANION_TIMEOUT: Duration = Duration::from_millis(1000);
/// Default pause between readiness probes.
pub const DEFAULT_COMPANION_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Readiness probe for the collaborating subsystem.
pub trait CompanionProbe {
    /// Returns `true` once the companion can serve requests.
    fn is_ready(&self) -> bool;
}

/// Companion readiness errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionError {
    /// Bounded wait elapsed without a ready signal. Non-fatal; callers
    /// disable the fill feature for the session and warn the user.
    Unavailable { waited: Duration },
}

impl Display for CompanionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { waited } => write!(
                f,
                "companion not ready after {}ms",
                waited.as_millis()
            ),
        }
    }
}

impl Error for CompanionError {}

/// Polls `probe` until ready or until `timeout` elapses.
///
/// The first probe happens immediately, so an already-loaded companion
/// returns without sleeping. A zero timeout degenerates to that single
/// probe. Blocks the calling thread between polls.
pub fn wait_for_companion<P: CompanionProbe>(
    probe: &P,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<(), CompanionError> {
    let started_at = Instant::now();

    loop {
        if probe.is_ready() {
            info!(
                "event=companion_wait module=service status=ok waited_ms={}",
                started_at.elapsed().as_millis()
            );
            return Ok(());
        }

        if started_at.elapsed() >= timeout {
            break;
        }
        thread::sleep(poll_interval);
    }

    let waited = started_at.elapsed();
    warn!(
        "event=companion_wait module=service status=error error_code=companion_unavailable timeout_ms={}",
        timeout.as_millis()
    );
    Err(CompanionError::Unavailable { waited })
}
