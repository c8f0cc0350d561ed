use std::fmt;
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::io::write_text;

/// Text produced by one generation run.
///
/// The first element is the whole seed key (several words joined by a space),
/// every following element is a single sampled token. Joining the elements with
/// a space gives the output text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedChain {
	elements: Vec<String>,
}

impl GeneratedChain {
	pub(crate) fn new(seed: &str) -> Self {
		Self { elements: vec![seed.to_owned()] }
	}

	pub(crate) fn push(&mut self, token: String) {
		self.elements.push(token);
	}

	/// Number of elements, seed included.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Always false: a chain holds at least its seed.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	pub fn seed(&self) -> &str {
		&self.elements[0]
	}

	pub fn elements(&self) -> &[String] {
		&self.elements
	}

	pub fn to_text(&self) -> String {
		self.elements.join(" ")
	}

	/// Writes the joined chain to `path` (no trailing newline).
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		write_text(&path, &self.to_text())?;
		info!("Wrote {} words to {}", self.len(), path.as_ref().display());
		Ok(())
	}
}

impl fmt::Display for GeneratedChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_text())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn joins_seed_and_tokens() {
		let mut chain = GeneratedChain::new("a b");
		chain.push("c".to_owned());
		chain.push("d".to_owned());
		assert_eq!(chain.len(), 3);
		assert_eq!(chain.seed(), "a b");
		assert_eq!(chain.to_string(), "a b c d");
	}

	#[test]
	fn saves_without_newline() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.txt");
		let mut chain = GeneratedChain::new("x y");
		chain.push("z".to_owned());
		chain.save(&path).unwrap();
		assert_eq!(std::fs::read_to_string(&path).unwrap(), "x y z");
	}
}
