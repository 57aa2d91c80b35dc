//! # optimizeql
//!
//! Ranking of SQL optimization suggestions and result-equivalence checks for
//! query rewrites.
//!
//! - [`suggestions`] - analysis data model, impact ranking, section
//!   composition and payload decoding
//! - [`compare`] - row diff, comparison orchestration and the execution
//!   service adapter
//! - [`session`] - analysis session and per-rewrite comparison cards
//! - [`output`] - text, JSON and YAML rendering
//! - [`config`], [`error`], [`logging`], [`cli`], [`app`] - command-line
//!   tooling

pub mod app;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod session;
pub mod suggestions;
