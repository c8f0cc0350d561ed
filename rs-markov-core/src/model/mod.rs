//! Word-level Markov chain model.
//!
//! - Corpus tokenization (`Corpus`)
//! - Validated chain order (`Order`)
//! - Table construction and persistence (`TableBuilder`, `MarkovTable`)
//! - Random walk generation (`ChainGenerator`, `GeneratedChain`)

/// Corpus loading and literal space tokenization.
pub mod corpus;

/// Chain order, constrained to `[1, 5]`.
pub mod order;

/// Context key to successors table, built from a corpus and stored as JSON.
pub mod table;

/// Seed selection and the sampling loop over a table.
pub mod generator;

/// Output of one generation run.
pub mod chain;
