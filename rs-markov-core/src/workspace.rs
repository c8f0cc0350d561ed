use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::info;
use rand::Rng;

use crate::error::Result;
use crate::io::{prefixed_path, require_dir};
use crate::model::chain::GeneratedChain;
use crate::model::corpus::Corpus;
use crate::model::generator::{ChainGenerator, WindowPolicy};
use crate::model::order::Order;
use crate::model::table::{MarkovTable, TableBuilder};

/// Format of the timestamp prefixing output file names.
pub const TIMESTAMP_FORMAT: &str = "%d_%m_%Y_%H_%M_%S";

/// The three directories a run works with.
///
/// - `source_dir`: corpus files, looked up by name
/// - `table_dir`: cached tables, `{order}_{file}`
/// - `output_dir`: generated texts, `{timestamp}_Order_{order}_{file}`
///
/// None of them is created: they must exist before a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
	pub source_dir: PathBuf,
	pub table_dir: PathBuf,
	pub output_dir: PathBuf,
}

impl Default for Workspace {
	fn default() -> Self {
		Self {
			source_dir: PathBuf::from("Source"),
			table_dir: PathBuf::from("Table"),
			output_dir: PathBuf::from("Output"),
		}
	}
}

/// Parameters of one generation run.
#[derive(Debug, Clone)]
pub struct Request {
	/// Corpus file name, resolved inside the source directory.
	pub file: String,
	pub order: Order,
	/// Number of tokens to sample after the seed. Negative means none.
	pub n_words: i64,
	pub window: WindowPolicy,
}

/// What a completed run did.
#[derive(Debug, Clone)]
pub struct RunReport {
	pub table_path: PathBuf,
	/// True when an existing table file was reused instead of rebuilt.
	pub table_cached: bool,
	pub seed: String,
	pub chain: GeneratedChain,
	pub output_path: PathBuf,
}

impl Workspace {
	/// Same three directories, all under `root`.
	pub fn under<P: AsRef<Path>>(root: P) -> Self {
		let defaults = Self::default();
		let root = root.as_ref();
		Self {
			source_dir: root.join(defaults.source_dir),
			table_dir: root.join(defaults.table_dir),
			output_dir: root.join(defaults.output_dir),
		}
	}

	pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.source_dir = dir.into();
		self
	}

	pub fn with_table_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.table_dir = dir.into();
		self
	}

	pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.output_dir = dir.into();
		self
	}

	/// Checks that the three directories exist.
	///
	/// # Errors
	/// `MissingDirectory` naming the first absent one.
	pub fn verify(&self) -> Result<()> {
		require_dir("source", &self.source_dir)?;
		require_dir("table", &self.table_dir)?;
		require_dir("output", &self.output_dir)
	}

	pub fn source_path(&self, file: &str) -> PathBuf {
		self.source_dir.join(file)
	}

	/// `table_dir/{order}_{file}`
	pub fn table_path(&self, order: Order, file: &str) -> PathBuf {
		prefixed_path(&self.table_dir, &order.to_string(), file)
	}

	/// `output_dir/{DD_MM_YYYY_HH_MM_SS}_Order_{order}_{file}`
	///
	/// Two runs within the same second on the same file and order share a path.
	pub fn output_path(&self, timestamp: NaiveDateTime, order: Order, file: &str) -> PathBuf {
		let prefix = format!("{}_Order_{}", timestamp.format(TIMESTAMP_FORMAT), order);
		prefixed_path(&self.output_dir, &prefix, file)
	}

	/// Builds the table of `file` at `order` and saves it to its table path.
	///
	/// # Errors
	/// - `SourceNotFound` if the corpus file is absent; nothing is written.
	/// - I/O or JSON errors while saving.
	pub fn build_table(&self, file: &str, order: Order) -> Result<MarkovTable> {
		let corpus = Corpus::load(self.source_path(file))?;
		let table = TableBuilder::new(order).build(&corpus);
		table.save(self.table_path(order, file))?;
		Ok(table)
	}

	/// Reuses the cached table if its file exists, builds it otherwise.
	///
	/// The cached file is trusted as is: it is not checked against the
	/// current corpus. Returns the table and whether it came from the cache.
	pub fn load_or_build_table(&self, file: &str, order: Order) -> Result<(MarkovTable, bool)> {
		let path = self.table_path(order, file);
		if path.is_file() {
			info!("Reusing markov table {}", path.display());
			Ok((MarkovTable::load(&path)?, true))
		} else {
			info!("Building order {} markov table for {}", order, file);
			Ok((self.build_table(file, order)?, false))
		}
	}

	/// Runs the whole pipeline: table, seed, generation, output file.
	///
	/// `now` names the output file. Every failure stops the run; the output
	/// file is only written once the full chain is generated.
	pub fn run<R: Rng + ?Sized>(&self, request: &Request, rng: &mut R, now: NaiveDateTime) -> Result<RunReport> {
		self.verify()?;

		let (table, table_cached) = self.load_or_build_table(&request.file, request.order)?;
		let generator = ChainGenerator::new(&table, request.order, request.window);
		let seed = generator.pick_seed(rng)?.to_owned();
		let chain = generator.generate(&seed, request.n_words, rng)?;

		let output_path = self.output_path(now, request.order, &request.file);
		chain.save(&output_path)?;

		Ok(RunReport {
			table_path: self.table_path(request.order, &request.file),
			table_cached,
			seed,
			chain,
			output_path,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn order(n: usize) -> Order {
		Order::new(n).unwrap()
	}

	#[test]
	fn derives_file_names() {
		let ws = Workspace::default();
		assert_eq!(ws.table_path(order(2), "book.txt"), Path::new("Table").join("2_book.txt"));

		let ts = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap().and_hms_opt(9, 5, 1).unwrap();
		assert_eq!(
			ws.output_path(ts, order(3), "book.txt"),
			Path::new("Output").join("07_03_2024_09_05_01_Order_3_book.txt")
		);
	}

	#[test]
	fn overrides_and_root() {
		let ws = Workspace::under("/data").with_output_dir("/tmp/out");
		assert_eq!(ws.source_dir, Path::new("/data").join("Source"));
		assert_eq!(ws.table_dir, Path::new("/data").join("Table"));
		assert_eq!(ws.output_dir, PathBuf::from("/tmp/out"));
		assert_eq!(ws.source_path("a.txt"), Path::new("/data").join("Source").join("a.txt"));
	}
}
