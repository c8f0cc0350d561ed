use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure the table builder, the chain generator and the pipeline can report.
///
/// None of these are retried: they surface to the caller and end the run.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// The corpus file named for a table build does not exist.
	#[error("source file {} does not exist", .0.display())]
	SourceNotFound(PathBuf),

	/// Order outside of `[1, 5]`.
	#[error("order should be between 1 and 5, got {0}")]
	InvalidOrder(usize),

	/// The seed does not split into the number of tokens the rolling window tracks.
	#[error("seed {seed:?} must contain exactly {expected} space separated tokens")]
	InvalidSeed { seed: String, expected: usize },

	/// The rolling window formed a key the table has never seen.
	#[error("key {0:?} not found in the markov table")]
	KeyNotFound(String),

	/// No key available to seed a generation.
	#[error("markov table is empty")]
	EmptyTable,

	/// One of the fixed working directories is absent.
	#[error("{role} directory {} does not exist", .path.display())]
	MissingDirectory { role: &'static str, path: PathBuf },

	#[error(transparent)]
	Io(#[from] io::Error),

	#[error("malformed table file: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
