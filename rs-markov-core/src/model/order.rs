use std::fmt;

use crate::error::{MarkovError, Result};

/// Number of preceding tokens used as context, always within `[1, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Order(usize);

impl Order {
	pub const MIN: usize = 1;
	pub const MAX: usize = 5;

	/// # Errors
	/// Returns `InvalidOrder` if `n` is outside `[MIN, MAX]`.
	pub fn new(n: usize) -> Result<Self> {
		if (Self::MIN..=Self::MAX).contains(&n) {
			Ok(Self(n))
		} else {
			Err(MarkovError::InvalidOrder(n))
		}
	}

	pub fn get(self) -> usize {
		self.0
	}
}

impl TryFrom<usize> for Order {
	type Error = MarkovError;

	fn try_from(n: usize) -> Result<Self> {
		Self::new(n)
	}
}

impl fmt::Display for Order {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}
