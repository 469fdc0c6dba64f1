use std::collections::HashMap;

/// Frequency distribution of the tokens observed after one context.
///
/// A `FreqDist` is one cell of a conditional frequency table: it counts how
/// often each candidate token followed a given context, and remembers the
/// order in which candidates were first observed.
///
/// ## Responsibilities
/// - Accumulate observation counts during model construction
/// - Produce candidate rankings by descending count
/// - Merge with another distribution for the same context (parallel builds)
///
/// ## Invariants
/// - Every stored count is strictly positive
/// - `index` maps each candidate to its slot in `entries`
/// - `entries` keeps first-observed order; a stable sort by descending count
///   therefore breaks ties in favor of the candidate seen first, which makes
///   every ranking deterministic
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FreqDist {
	/// Candidates with their counts, in first-observed order.
	entries: Vec<(String, usize)>,
	/// Candidate -> position in `entries`.
	index: HashMap<String, usize>,
}

impl FreqDist {
	/// Creates an empty distribution.
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			index: HashMap::new(),
		}
	}

	/// Records one observation of `token`.
	///
	/// - If the candidate was seen before, its count is increased.
	/// - Otherwise it is appended with an initial count of 1.
	pub fn observe(&mut self, token: &str) {
		match self.index.get(token) {
			Some(&slot) => self.entries[slot].1 += 1,
			None => {
				self.index.insert(token.to_owned(), self.entries.len());
				self.entries.push((token.to_owned(), 1));
			}
		}
	}

	/// Returns the number of observations recorded for `token` (0 if unseen).
	pub fn count(&self, token: &str) -> usize {
		self.index.get(token).map_or(0, |&slot| self.entries[slot].1)
	}

	/// Number of distinct candidates.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True if no observation was ever recorded.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// All candidates ranked by descending count.
	///
	/// The sort is stable: candidates with equal counts keep their
	/// first-observed order.
	pub fn ranked(&self) -> Vec<(String, usize)> {
		let mut ranked = self.entries.clone();
		ranked.sort_by(|a, b| b.1.cmp(&a.1));
		ranked
	}

	/// The `n` most frequent candidates, ordered like [`ranked`](Self::ranked).
	pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
		let mut ranked = self.ranked();
		ranked.truncate(n);
		ranked
	}

	/// Merges another distribution into this one.
	///
	/// Counts of shared candidates are summed. Candidates unknown to `self`
	/// are appended in the order they hold in `other`, so merging partial
	/// distributions in stream order reproduces the first-observed order of
	/// a single sequential pass.
	pub fn merge(&mut self, other: &Self) {
		for (token, occurrences) in &other.entries {
			match self.index.get(token) {
				Some(&slot) => self.entries[slot].1 += *occurrences,
				None => {
					self.index.insert(token.clone(), self.entries.len());
					self.entries.push((token.clone(), *occurrences));
				}
			}
		}
	}
}
