use std::path::Path;

use crate::error::Result;
use crate::io::read_source;

/// Splits raw text into tokens on the literal space character.
///
/// Only `' '` separates tokens: newlines and tabs stay inside tokens and
/// consecutive spaces produce empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
	text.split(' ').map(str::to_owned).collect()
}

/// An ordered sequence of tokens read from a source text.
///
/// The corpus only lives for the duration of a table build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Corpus {
	tokens: Vec<String>,
}

impl Corpus {
	/// Tokenizes `text` with [`tokenize`].
	pub fn from_text(text: &str) -> Self {
		Self { tokens: tokenize(text) }
	}

	/// Reads and tokenizes a corpus file.
	///
	/// # Errors
	/// - `SourceNotFound` if the file does not exist.
	/// - `Io` for any other read failure.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let text = read_source(path)?;
		Ok(Self::from_text(&text))
	}

	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

impl From<Vec<String>> for Corpus {
	fn from(tokens: Vec<String>) -> Self {
		Self { tokens }
	}
}

impl<'a> FromIterator<&'a str> for Corpus {
	fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
		Self { tokens: iter.into_iter().map(str::to_owned).collect() }
	}
}
