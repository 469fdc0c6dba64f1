//! N-gram-based next-word prediction library.
//!
//! This crate provides the statistical core of the prediction service:
//! - Bigram- and trigram-conditioned frequency tables built from a token stream
//! - Ranked next-word prediction for whole-word input
//! - Partial-word completion using prefix matching with an edit-distance fallback
//! - Corpus loading and tokenization utilities
//!
//! The model is built once, up front, and never mutated afterwards, so any
//! number of concurrent readers can query it without synchronization.

/// Core model types and the prediction/completion logic.
///
/// This module exposes the frequency tables, the model builder and the two
/// query engines (prediction and completion).
pub mod model;

/// Corpus utilities (plaintext loading, tokenization).
///
/// Turns one or more `.txt` corpus files into the ordered token stream the
/// model builder consumes.
pub mod corpus;
