use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use super::completion::{complete_candidates, Completion};
use super::freq_dist::FreqDist;

/// How many ranked next words a prediction may return.
pub const MAX_PREDICTIONS: usize = 5;

/// Next-word frequency model conditioned on bigram and trigram contexts.
///
/// The `NGramModel` stores, for every context observed in the training
/// stream, the frequency distribution of the tokens that followed it. A
/// context is either a single token (bigram table) or an ordered pair of
/// consecutive tokens (trigram table).
///
/// # Responsibilities
/// - Build both tables from a token stream, sequentially or in parallel
/// - Answer ranked next-word predictions for whole-word input
/// - Answer partial-word completions through the bigram table
/// - Merge with partial models built from chunks of the same stream
///
/// # Invariants
/// - Every stored distribution is non-empty (only observed contexts exist)
/// - Counts never change after construction; the model is shared read-only
/// - Lookup of an absent context is a normal "no entries" case, never an error
#[derive(Debug, Default, PartialEq)]
pub struct NGramModel {
	/// Single preceding token -> distribution of the tokens that followed it.
	bigrams: HashMap<String, FreqDist>,
	/// Ordered pair of preceding tokens -> distribution of the tokens that followed.
	trigrams: HashMap<(String, String), FreqDist>,
}

impl NGramModel {
	/// Builds both frequency tables from a token stream in a single pass.
	///
	/// Streams of length 0 or 1 contain no adjacent pairs and yield valid,
	/// empty tables.
	pub fn build(tokens: &[String]) -> Self {
		let mut model = Self::default();
		model.observe_windows(tokens, 0, tokens.len());
		model
	}

	/// Builds the model on worker threads, one chunk of the stream each.
	///
	/// Every chunk keeps two tokens of lookahead so windows crossing a cut
	/// are counted exactly once, and partial models are merged in chunk
	/// order so first-observed tie-break order matches the sequential
	/// build. The result is identical to [`build`](Self::build).
	pub fn build_parallel(tokens: &[String]) -> Self {
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = (tokens.len() + chunks - 1) / chunks;
		if chunk_size == 0 || tokens.len() <= chunk_size {
			return Self::build(tokens);
		}

		let (tx, rx) = mpsc::channel();
		for (chunk_index, start) in (0..tokens.len()).step_by(chunk_size).enumerate() {
			let end = (start + chunk_size).min(tokens.len());
			let lookahead_end = (end + 2).min(tokens.len());
			let chunk: Vec<String> = tokens[start..lookahead_end].to_vec();
			let window_count = end - start;
			let tx = tx.clone();

			thread::spawn(move || {
				let mut partial = NGramModel::default();
				partial.observe_windows(&chunk, 0, window_count);
				tx.send((chunk_index, partial)).expect("Failed to send from thread");
			});
		}
		drop(tx);

		let mut partials: Vec<(usize, NGramModel)> = rx.iter().collect();
		partials.sort_by_key(|(chunk_index, _)| *chunk_index);

		let mut model = Self::default();
		for (_, partial) in &partials {
			model.merge(partial);
		}
		model
	}

	/// Counts every bigram and trigram window starting in `start..end`.
	///
	/// Windows may read up to two tokens past `end` (never past the slice),
	/// which is what lets chunked builds count boundary-spanning windows.
	fn observe_windows(&mut self, tokens: &[String], start: usize, end: usize) {
		for i in start..end {
			if i + 1 < tokens.len() {
				self.bigrams
					.entry(tokens[i].clone())
					.or_default()
					.observe(&tokens[i + 1]);
			}
			if i + 2 < tokens.len() {
				self.trigrams
					.entry((tokens[i].clone(), tokens[i + 1].clone()))
					.or_default()
					.observe(&tokens[i + 2]);
			}
		}
	}

	/// Merges a partial model into this one.
	///
	/// Distributions for shared contexts are merged count-wise; new contexts
	/// are adopted as-is. Intended for combining chunked builds of one
	/// stream, in chunk order.
	pub fn merge(&mut self, other: &Self) {
		for (context, dist) in &other.bigrams {
			self.bigrams.entry(context.clone()).or_default().merge(dist);
		}
		for (context, dist) in &other.trigrams {
			self.trigrams.entry(context.clone()).or_default().merge(dist);
		}
	}

	/// Distribution of the tokens observed after a single-token context.
	pub fn bigram_candidates(&self, context: &str) -> Option<&FreqDist> {
		self.bigrams.get(context)
	}

	/// Distribution of the tokens observed after a two-token context.
	pub fn trigram_candidates(&self, first: &str, second: &str) -> Option<&FreqDist> {
		self.trigrams.get(&(first.to_owned(), second.to_owned()))
	}

	/// Number of distinct bigram contexts.
	pub fn bigram_context_count(&self) -> usize {
		self.bigrams.len()
	}

	/// Number of distinct trigram contexts.
	pub fn trigram_context_count(&self) -> usize {
		self.trigrams.len()
	}

	/// Predicts up to [`MAX_PREDICTIONS`] next words for the given input.
	///
	/// The input is trimmed and split on whitespace. A single word is looked
	/// up as a bigram context; two or more words form a trigram context from
	/// the last two. Blank input and unknown contexts yield an empty list;
	/// what to display in that case is the caller's decision.
	pub fn predict(&self, input_text: &str) -> Vec<String> {
		let words: Vec<&str> = input_text.split_whitespace().collect();

		let candidates = match words.as_slice() {
			[] => return Vec::new(),
			[only] => self.bigrams.get(*only),
			[.., before_last, last] => self
				.trigrams
				.get(&((*before_last).to_owned(), (*last).to_owned())),
		};

		candidates
			.map(|dist| {
				dist.most_common(MAX_PREDICTIONS)
					.into_iter()
					.map(|(token, _)| token)
					.collect()
			})
			.unwrap_or_default()
	}

	/// Suggests completions for a partially typed word.
	///
	/// `words[position - 1]` is the partial word and `words[position - 2]`
	/// supplies the bigram context. At least two words must precede the
	/// cursor: with `position <= 1`, or a cursor outside the slice, there is
	/// nothing to complete and the result is empty.
	pub fn complete(&self, words: &[String], position: usize) -> Vec<Completion> {
		if position <= 1 || position > words.len() {
			return Vec::new();
		}

		let context = &words[position - 2];
		let partial = &words[position - 1];
		match self.bigrams.get(context) {
			Some(dist) => complete_candidates(&dist.ranked(), partial),
			None => Vec::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::completion::CompletionScore;

	fn stream(text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn build_counts_adjacent_windows() {
		let tokens = stream("the cat sat on the cat");
		let model = NGramModel::build(&tokens);

		let after_the = model.bigram_candidates("the").unwrap();
		assert_eq!(after_the.count("cat"), 2);

		let after_cat = model.bigram_candidates("cat").unwrap();
		assert_eq!(after_cat.count("sat"), 1);

		let after_the_cat = model.trigram_candidates("the", "cat").unwrap();
		assert_eq!(after_the_cat.count("sat"), 1);
		assert_eq!(model.trigram_candidates("on", "the").unwrap().count("cat"), 1);
	}

	#[test]
	fn degenerate_streams_yield_empty_tables() {
		let empty = NGramModel::build(&[]);
		assert_eq!(empty.bigram_context_count(), 0);
		assert_eq!(empty.trigram_context_count(), 0);

		let single = NGramModel::build(&stream("alone"));
		assert_eq!(single.bigram_context_count(), 0);
		assert_eq!(single.trigram_context_count(), 0);

		// Lookups on empty tables are a defined miss, not a failure
		assert!(single.predict("alone").is_empty());
		assert!(single.complete(&stream("a b c"), 2).is_empty());
	}

	#[test]
	fn single_word_input_queries_the_bigram_table() {
		let tokens = stream("the cat the dog the cat");
		let model = NGramModel::build(&tokens);

		assert_eq!(model.predict("the"), vec!["cat", "dog"]);
	}

	#[test]
	fn multi_word_input_queries_the_trigram_table() {
		// After "quick" alone the most common next word is "red", but after
		// the pair ("the", "quick") it is "brown"
		let tokens = stream(
			"so quick red so quick red the quick brown the quick brown the quick fox",
		);
		let model = NGramModel::build(&tokens);

		assert_eq!(model.predict("the quick"), vec!["brown", "fox"]);
		assert_eq!(model.predict("quick"), vec!["red", "brown", "fox"]);

		// Longer input keeps only the last two words as context
		assert_eq!(model.predict("over there the quick"), vec!["brown", "fox"]);
	}

	#[test]
	fn predictions_are_capped_at_five() {
		let tokens = stream("a b a c a d a e a f a g");
		let model = NGramModel::build(&tokens);

		let predictions = model.predict("a");
		assert_eq!(predictions.len(), MAX_PREDICTIONS);
		assert_eq!(predictions, vec!["b", "c", "d", "e", "f"]);
	}

	#[test]
	fn prediction_ranking_is_non_increasing() {
		let tokens = stream("x a x b x b x c x c x c");
		let model = NGramModel::build(&tokens);

		let ranked = model.bigram_candidates("x").unwrap().ranked();
		for pair in ranked.windows(2) {
			assert!(pair[0].1 >= pair[1].1);
		}
		assert_eq!(model.predict("x"), vec!["c", "b", "a"]);
	}

	#[test]
	fn blank_and_unknown_input_predict_nothing() {
		let model = NGramModel::build(&stream("the cat sat"));

		assert!(model.predict("").is_empty());
		assert!(model.predict("   ").is_empty());
		assert!(model.predict("unseen").is_empty());
		assert!(model.predict("never observed").is_empty());
	}

	#[test]
	fn predictions_are_deterministic() {
		let tokens = stream("a b a c a b a d a c a b");
		let first_build = NGramModel::build(&tokens);
		let second_build = NGramModel::build(&tokens);

		for _ in 0..5 {
			assert_eq!(first_build.predict("a"), second_build.predict("a"));
		}
		assert_eq!(first_build, second_build);
	}

	#[test]
	fn counts_grow_monotonically_with_the_corpus() {
		let full = stream("a b a b a c d e a b");
		let prefix = &full[..6];

		let small = NGramModel::build(prefix);
		let large = NGramModel::build(&full);

		for (context, dist) in &small.bigrams {
			let larger_dist = large.bigram_candidates(context).unwrap();
			for (token, count) in dist.ranked() {
				assert!(count <= larger_dist.count(&token));
			}
		}
	}

	#[test]
	fn parallel_build_matches_sequential_build() {
		// Long repetitive stream so several chunks are actually spawned
		let mut text = String::new();
		for i in 0..400 {
			text.push_str(match i % 5 {
				0 => "the quick brown fox ",
				1 => "jumps over the lazy dog ",
				2 => "the quick red fox ",
				3 => "a cat sat on the mat ",
				_ => "the dog barks at the cat ",
			});
		}
		let tokens = stream(&text);

		let sequential = NGramModel::build(&tokens);
		let parallel = NGramModel::build_parallel(&tokens);

		assert_eq!(sequential, parallel);
		assert_eq!(sequential.predict("the"), parallel.predict("the"));
		assert_eq!(sequential.predict("the quick"), parallel.predict("the quick"));
	}

	#[test]
	fn complete_requires_two_preceding_words() {
		let model = NGramModel::build(&stream("the cat sat on the mat"));
		let words = stream("the ca");

		assert!(model.complete(&words, 0).is_empty());
		assert!(model.complete(&words, 1).is_empty());
		assert!(!model.complete(&words, 2).is_empty());

		// A cursor past the end of the slice is malformed input, not a panic
		assert!(model.complete(&words, 3).is_empty());
	}

	#[test]
	fn complete_uses_the_context_before_the_partial_word() {
		let tokens = stream("the cat sat the cap sat the can sat the dog ran");
		let model = NGramModel::build(&tokens);

		let words = stream("sat the ca");
		let completions = model.complete(&words, 3);

		let suggested: Vec<&str> = completions.iter().map(|c| c.token.as_str()).collect();
		assert_eq!(suggested, vec!["cat", "cap", "can"]);
		for completion in &completions {
			assert!(matches!(completion.score, CompletionScore::Frequency(_)));
		}
	}

	#[test]
	fn complete_with_unknown_context_is_empty() {
		let model = NGramModel::build(&stream("the cat sat"));
		assert!(model.complete(&stream("unknown context wo"), 3).is_empty());
	}

	#[test]
	fn completions_never_repeat_a_token() {
		let tokens = stream("a cat a cat a car a care a dog");
		let model = NGramModel::build(&tokens);

		let completions = model.complete(&stream("x a ca"), 3);
		let mut tokens_seen: Vec<&str> = completions.iter().map(|c| c.token.as_str()).collect();
		let before = tokens_seen.len();
		tokens_seen.dedup();
		assert_eq!(tokens_seen.len(), before);
	}
}
