//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Diagnostics → Logger + sinks → Bind → Prober → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop prober → Drain requests → Flush sinks → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: config and bind errors are fatal before serving
//! - Logger flushes last so the final request records still ship

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use signals::wait_for_signal;
