use std::collections::VecDeque;

use log::debug;
use rand::Rng;

use super::chain::GeneratedChain;
use super::order::Order;
use super::table::MarkovTable;
use crate::error::{MarkovError, Result};

/// Seeds are drawn among this many keys, taken in table insertion order.
pub const SEED_POOL: usize = 500;

/// Width of the rolling window used to form lookup keys while generating.
///
/// A table is keyed by `order` tokens, but the historical generator always
/// tracked exactly two. Both behaviors are available and the caller picks one
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPolicy {
	/// Always two tokens, whatever the table order. Only order 2 tables can
	/// get past the first lookup.
	#[default]
	Pair,
	/// As many tokens as the table order.
	Order,
}

impl WindowPolicy {
	/// Number of tokens in the window for a table of the given order.
	pub fn width(self, order: Order) -> usize {
		match self {
			WindowPolicy::Pair => 2,
			WindowPolicy::Order => order.get(),
		}
	}
}

/// Random walk over a [`MarkovTable`].
///
/// # Responsibilities
/// - Choose a starting key among the first [`SEED_POOL`] keys
/// - Sample successors uniformly from the (duplicate carrying) successor lists
/// - Slide the rolling window and stop hard on an unknown key
#[derive(Debug, Clone, Copy)]
pub struct ChainGenerator<'a> {
	table: &'a MarkovTable,
	order: Order,
	policy: WindowPolicy,
}

impl<'a> ChainGenerator<'a> {
	pub fn new(table: &'a MarkovTable, order: Order, policy: WindowPolicy) -> Self {
		Self { table, order, policy }
	}

	/// Picks a seed key uniformly among the first [`SEED_POOL`] keys.
	///
	/// # Errors
	/// Returns `EmptyTable` if the table has no key.
	pub fn pick_seed<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&'a str> {
		let pool = self.table.head_keys(SEED_POOL);
		if pool.is_empty() {
			return Err(MarkovError::EmptyTable);
		}
		let seed = pool[rng.random_range(0..pool.len())];
		debug!("Picked seed {:?} among {} candidate keys", seed, pool.len());
		Ok(seed)
	}

	/// Starts a walk from `seed`.
	///
	/// # Errors
	/// Returns `InvalidSeed` if `seed` does not split on `' '` into exactly
	/// the window width.
	pub fn walk<'r, R: Rng + ?Sized>(&self, seed: &str, rng: &'r mut R) -> Result<Walk<'a, 'r, R>> {
		let expected = self.policy.width(self.order);
		let window: VecDeque<String> = seed.split(' ').map(str::to_owned).collect();
		if window.len() != expected {
			return Err(MarkovError::InvalidSeed { seed: seed.to_owned(), expected });
		}
		Ok(Walk { table: self.table, window, rng, done: false })
	}

	/// Generates a chain of `length` sampled tokens after the seed.
	///
	/// Negative lengths take no step. Any lookup failure aborts the whole
	/// generation, nothing of the partial chain is returned.
	pub fn generate<R: Rng + ?Sized>(&self, seed: &str, length: i64, rng: &mut R) -> Result<GeneratedChain> {
		let steps = usize::try_from(length).unwrap_or(0);
		let mut chain = GeneratedChain::new(seed);
		for token in self.walk(seed, rng)?.take(steps) {
			chain.push(token?);
		}
		Ok(chain)
	}
}

/// Iterator over the tokens sampled by a [`ChainGenerator`].
///
/// Yields `Err(KeyNotFound)` once when the window leaves the table, then ends.
pub struct Walk<'a, 'r, R: ?Sized> {
	table: &'a MarkovTable,
	window: VecDeque<String>,
	rng: &'r mut R,
	done: bool,
}

impl<R: Rng + ?Sized> Walk<'_, '_, R> {
	/// Current lookup key, oldest token first.
	pub fn key(&self) -> String {
		self.window.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
	}
}

impl<R: Rng + ?Sized> Iterator for Walk<'_, '_, R> {
	type Item = Result<String>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		let key = self.key();
		let Some(successors) = self.table.get(&key) else {
			self.done = true;
			return Some(Err(MarkovError::KeyNotFound(key)));
		};

		let next = successors[self.rng.random_range(0..successors.len())].clone();
		self.window.pop_front();
		self.window.push_back(next.clone());
		Some(Ok(next))
	}
}
