//! Shared models and configuration for `reachr`.
//!
//! * **[`network::target`]**: parsing raw inputs into normalized [`network::target::HostTarget`]s.
//! * **[`check`]**: the outcome of a single probe.
//! * **[`report`]**: per-host and per-run aggregates.
//! * **[`input`]**: loading target lists from arguments or files.
//! * **[`config`]**: runtime settings shared by the checkers and the CLI.

pub mod check;
pub mod config;
pub mod input;
pub mod network;
pub mod report;
