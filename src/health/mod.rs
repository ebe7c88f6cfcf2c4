//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Active probe (active.rs):
//!     Periodic timer
//!     → detached GET to the log collector
//!     → status or error reported via `tracing`
//! ```
//!
//! # Design Decisions
//! - Raw unconditional poll: no thresholds, backoff or circuit breaking
//! - Results never reach the structured logger or the request path
//! - Shares only the collector address with the log sink

pub mod active;

pub use active::{CollectorProber, ProbeOutcome};
