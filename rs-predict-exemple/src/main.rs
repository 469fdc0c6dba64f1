use std::io::{self, Write};

use rs_predict_core::corpus;
use rs_predict_core::model::ngram_model::NGramModel;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load all corpora from the data directory (.txt files, concatenated
    // in sorted file-name order)
    let dir = std::env::args().nth(1).unwrap_or_else(|| "./data".to_owned());
    let corpus = corpus::load_corpus(&dir)?;
    println!(
        "Loaded {} tokens from: {}",
        corpus.tokens.len(),
        corpus.sources.join(", ")
    );

    // Build both frequency tables once; the model is read-only afterwards
    let model = NGramModel::build_parallel(&corpus.tokens);
    println!(
        "Model ready ({} bigram contexts, {} trigram contexts)",
        model.bigram_context_count(),
        model.trigram_context_count()
    );

    println!("Type some text, :q to quit");
    println!("  trailing space     -> predict the next word");
    println!("  no trailing space  -> complete the last word");

    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let line = input.trim_end_matches(['\r', '\n']);
        if line.trim() == ":q" {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        if line.ends_with(char::is_whitespace) {
            let predictions = model.predict(line);
            if predictions.is_empty() {
                println!("  no prediction");
            } else {
                println!("  next: {}", predictions.join(", "));
            }
        } else {
            let words: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
            let completions = model.complete(&words, words.len());
            if completions.is_empty() {
                println!("  no completion");
            } else {
                let suggestions: Vec<String> =
                    completions.into_iter().map(|c| c.token).collect();
                println!("  complete: {}", suggestions.join(", "));
            }
        }
    }
    Ok(())
}
