//! Top-level module for the next-word prediction model.
//!
//! This crate provides a frequency-based word prediction system, including:
//! - Per-context frequency distributions (`FreqDist`)
//! - The combined bigram/trigram model (`NGramModel`)
//! - Partial-word completion with edit-distance fallback (`completion`)

/// Per-context frequency distribution.
///
/// Counts how often each candidate token followed one context and produces
/// deterministic rankings (descending count, ties in first-observed order).
pub mod freq_dist;

/// Bigram/trigram frequency model (`NGramModel`).
///
/// Handles table construction (sequential and parallel), context lookup,
/// next-word prediction and the completion entry point.
pub mod ngram_model;

/// Partial-word completion.
///
/// Two-phase pipeline: literal prefix matches first, then candidates ranked
/// by edit distance to the partial word.
pub mod completion;
