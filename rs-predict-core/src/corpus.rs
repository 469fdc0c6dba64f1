use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::{fs, io};

/// A token stream assembled from one or more plaintext corpora.
///
/// `tokens` is the concatenation of all source files in `sources` order.
/// Sources are visited in sorted file-name order, so rebuilding from the
/// same directory always yields the same stream.
pub struct Corpus {
	/// All tokens, in reading order.
	pub tokens: Vec<String>,
	/// Corpus file names (without extension), in concatenation order.
	pub sources: Vec<String>,
}

/// Reads a text file into a single string.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/brown.txt"` → `"brown"`
/// - `"brown.txt"` → `"brown"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted so concatenation order is
/// independent of directory enumeration order.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

/// Splits raw text into word and punctuation tokens.
///
/// Chunks are separated on whitespace; leading and trailing punctuation is
/// peeled off into tokens of its own, so `"Hello, world!"` becomes
/// `["Hello", ",", "world", "!"]`. Inner punctuation (apostrophes, hyphens)
/// stays attached. No case folding or stemming is applied; tokens are
/// compared by exact equality everywhere downstream.
pub fn tokenize(text: &str) -> Vec<String> {
	let mut tokens = Vec::new();
	for chunk in text.split_whitespace() {
		push_chunk_tokens(chunk, &mut tokens);
	}
	tokens
}

/// Splits one whitespace-free chunk into edge punctuation and the word core.
fn push_chunk_tokens(chunk: &str, tokens: &mut Vec<String>) {
	let chars: Vec<char> = chunk.chars().collect();
	let mut start = 0;
	let mut end = chars.len();

	while start < end && !chars[start].is_alphanumeric() {
		tokens.push(chars[start].to_string());
		start += 1;
	}

	let mut trailing = Vec::new();
	while end > start && !chars[end - 1].is_alphanumeric() {
		trailing.push(chars[end - 1].to_string());
		end -= 1;
	}

	if start < end {
		tokens.push(chars[start..end].iter().collect());
	}
	tokens.extend(trailing.into_iter().rev());
}

/// Loads every `.txt` corpus file in a directory and concatenates their
/// token streams in sorted file-name order.
///
/// # Errors
/// Fails if the path is not a directory or a corpus file cannot be read.
pub fn load_corpus<P: AsRef<Path>>(dir: P) -> Result<Corpus, Box<dyn std::error::Error>> {
	let dir = dir.as_ref();
	if !dir.is_dir() {
		return Err(format!("Expected a directory, got: {}", dir.display()).into());
	}

	let mut tokens = Vec::new();
	let mut sources = Vec::new();
	for file in list_files(dir, "txt")? {
		let contents = read_file(dir.join(&file))?;
		tokens.extend(tokenize(&contents));
		sources.push(get_filename(&file)?);
	}

	Ok(Corpus { tokens, sources })
}
