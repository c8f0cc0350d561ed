//! Word-level n-th order Markov chain text generation.
//!
//! This crate provides:
//! - Table construction from a space-tokenized corpus
//! - JSON persistence of the table, reused across runs
//! - Random walk generation with a caller-supplied RNG
//! - A `Workspace` tying source, table and output directories together
//!
//! File helpers stay internal; everything else is reached through
//! `model` and `workspace`.

/// Core Markov model: corpus, order, table and generator.
pub mod model;

/// Directory configuration and the end-to-end run.
pub mod workspace;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{MarkovError, Result};
pub use model::chain::GeneratedChain;
pub use model::corpus::Corpus;
pub use model::generator::{ChainGenerator, WindowPolicy};
pub use model::order::Order;
pub use model::table::{MarkovTable, TableBuilder};
pub use workspace::{Request, RunReport, Workspace};
