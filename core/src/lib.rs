//! Probing engine for `reachr`.
//!
//! * **[`checker`]**: the DNS, HTTP and ping probes behind narrow async traits.
//! * **[`orchestrator`]**: runs the probes per host and a whole target list through a bounded pool.
//! * **[`report`]**: the incremental JSON Lines error report.

pub mod checker;
pub mod orchestrator;
pub mod report;
