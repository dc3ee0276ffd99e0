//! End-to-end tests for the probing engine.
//!
//! Real checkers run against a local mock HTTP server, the orchestrator runs
//! against stubs injected through the checker traits.

#[cfg(test)]
mod http;
#[cfg(test)]
mod run;
#[cfg(test)]
mod support;
