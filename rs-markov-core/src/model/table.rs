use std::collections::HashMap;
use std::{fmt, fs};
use std::path::Path;

use log::{debug, info};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::corpus::Corpus;
use super::order::Order;
use crate::error::Result;
use crate::io::write_text;

/// Yields every `(context key, successor)` pair of a corpus, in scan order.
///
/// For each index `i` in `order..len - 1` the key is the `order` tokens
/// before `i` joined by a single space and the successor is token `i`.
/// The last token of the corpus is never a successor.
pub fn make_pairs(corpus: &Corpus, order: Order) -> impl Iterator<Item = (String, String)> + '_ {
	let tokens = corpus.tokens();
	let k = order.get();
	(k..tokens.len().saturating_sub(1)).map(move |i| (tokens[i - k..i].join(" "), tokens[i].clone()))
}

/// Mapping from context key to every successor observed after it.
///
/// Keys keep their insertion order (first occurrence in the corpus) and each
/// successor list keeps duplicates in corpus order, so a uniform draw over a
/// list follows the empirical frequencies.
///
/// # Invariants
/// - Every stored successor list is non-empty
/// - `index[key]` is the position of `key` in `entries`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkovTable {
	entries: Vec<(String, Vec<String>)>,
	index: HashMap<String, usize>,
}

impl MarkovTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `successor` to the list of `key`, creating the key if needed.
	pub fn push(&mut self, key: String, successor: String) {
		match self.index.get(&key) {
			Some(&pos) => self.entries[pos].1.push(successor),
			None => {
				self.index.insert(key.clone(), self.entries.len());
				self.entries.push((key, vec![successor]));
			}
		}
	}

	/// Appends a whole list of successors to `key`.
	///
	/// An empty list never creates a key.
	pub fn extend(&mut self, key: String, successors: Vec<String>) {
		if successors.is_empty() {
			return;
		}
		match self.index.get(&key) {
			Some(&pos) => self.entries[pos].1.extend(successors),
			None => {
				self.index.insert(key.clone(), self.entries.len());
				self.entries.push((key, successors));
			}
		}
	}

	pub fn get(&self, key: &str) -> Option<&[String]> {
		self.index.get(key).map(|&pos| self.entries[pos].1.as_slice())
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.index.contains_key(key)
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Total number of recorded successors across all keys.
	pub fn successor_count(&self) -> usize {
		self.entries.iter().map(|(_, successors)| successors.len()).sum()
	}

	/// Keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(key, _)| key.as_str())
	}

	/// The first `limit` keys in insertion order.
	pub fn head_keys(&self, limit: usize) -> Vec<&str> {
		self.keys().take(limit).collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.entries.iter().map(|(key, successors)| (key.as_str(), successors.as_slice()))
	}

	/// Writes the table as a JSON object, keys in insertion order.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let json = serde_json::to_string(self)?;
		write_text(&path, &json)?;
		info!("Wrote markov table ({} keys) to {}", self.len(), path.as_ref().display());
		Ok(())
	}

	/// Reads a table previously written by [`MarkovTable::save`].
	///
	/// Nothing checks that the file matches the corpus or order it is used with.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
		let json = fs::read_to_string(&path)?;
		let table: Self = serde_json::from_str(&json)?;
		debug!(
			"Loaded markov table from {}: {} keys, {} successors",
			path.as_ref().display(),
			table.len(),
			table.successor_count()
		);
		Ok(table)
	}
}

impl Serialize for MarkovTable {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (key, successors) in &self.entries {
			map.serialize_entry(key, successors)?;
		}
		map.end()
	}
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
	type Value = MarkovTable;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("an object mapping context keys to arrays of successors")
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<MarkovTable, A::Error> {
		let mut table = MarkovTable::new();
		while let Some((key, successors)) = access.next_entry::<String, Vec<String>>()? {
			table.extend(key, successors);
		}
		Ok(table)
	}
}

impl<'de> Deserialize<'de> for MarkovTable {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		deserializer.deserialize_map(TableVisitor)
	}
}

/// Builds a [`MarkovTable`] of a fixed order from a corpus.
#[derive(Debug, Clone, Copy)]
pub struct TableBuilder {
	order: Order,
}

impl TableBuilder {
	pub fn new(order: Order) -> Self {
		Self { order }
	}

	pub fn order(&self) -> Order {
		self.order
	}

	/// Accumulates every pair from [`make_pairs`] into a fresh table.
	///
	/// A corpus of `order + 1` tokens or fewer gives an empty table.
	pub fn build(&self, corpus: &Corpus) -> MarkovTable {
		let mut table = MarkovTable::new();
		for (key, successor) in make_pairs(corpus, self.order) {
			table.push(key, successor);
		}
		debug!(
			"Built order {} table: {} keys, {} successors from {} tokens",
			self.order,
			table.len(),
			table.successor_count(),
			corpus.len()
		);
		table
	}
}
