use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};

use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};

use rs_predict_core::corpus;
use rs_predict_core::model::ngram_model::NGramModel;

/// Command line options for the prediction server.
#[derive(Parser, Debug)]
#[command(about = "Next-word prediction HTTP server")]
struct Args {
	/// Directory holding the .txt corpus files the model is built from
	#[arg(long, default_value = "./data")]
	corpus_dir: String,

	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(long, default_value_t = 5000)]
	port: u16,
}

/// Request body for the `/v1/predict` endpoint.
#[derive(Deserialize)]
struct PredictRequest {
	text: String,
}

/// Response body for the `/v1/predict` endpoint.
#[derive(Serialize)]
struct PredictResponse {
	input: String,
	predictions: Vec<String>,
}

/// Query parameters for the `/v1/complete` endpoint.
#[derive(Deserialize)]
struct CompleteParams {
	/// Whitespace-separated words, `position` pointing at the word being typed
	words: String,
	position: usize,
}

/// Read-only state shared across workers.
///
/// The model is fully built before the server starts and never mutated
/// afterwards, so handlers read it concurrently without any locking.
struct SharedData {
	model: NGramModel,
	corpus_names: Vec<String>,
}

/// Placeholder shown when a non-empty input has no prediction.
///
/// This substitution is presentation-only; the model itself reports an
/// empty list for unknown contexts.
fn no_prediction_placeholder(input: &str) -> String {
	format!("No prediction found for '{}'", input)
}

/// HTTP POST endpoint `/v1/predict`
///
/// Returns up to 5 ranked next words for the submitted text. A blank input
/// yields an empty list; a non-blank input with no known context yields the
/// human-readable placeholder instead.
#[post("/v1/predict")]
async fn post_predict(
	data: web::Data<SharedData>,
	request: web::Json<PredictRequest>,
) -> impl Responder {
	let input = request.text.trim().to_owned();

	let mut predictions = Vec::new();
	if !input.is_empty() {
		predictions = data.model.predict(&input);
		if predictions.is_empty() {
			predictions.push(no_prediction_placeholder(&input));
		}
	}

	HttpResponse::Ok().json(PredictResponse { input, predictions })
}

/// HTTP GET endpoint `/v1/complete`
///
/// Returns up to 3 ranked completions for the partially typed word at
/// `position`, each with the count or edit distance that ranked it.
/// Malformed positions yield an empty list rather than an error.
#[get("/v1/complete")]
async fn get_complete(
	data: web::Data<SharedData>,
	query: web::Query<CompleteParams>,
) -> impl Responder {
	let words: Vec<String> = query.words.split_whitespace().map(str::to_owned).collect();
	HttpResponse::Ok().json(data.model.complete(&words, query.position))
}

/// HTTP GET endpoint `/v1/corpora`
///
/// Lists the corpus files the model was built from.
#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().json(&data.corpus_names)
}

/// Main entry point for the server.
///
/// Builds the n-gram model from the corpus directory, then serves it
/// read-only. Construction finishes before the first worker starts, which
/// is the only synchronization the model needs.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let corpus = corpus::load_corpus(&args.corpus_dir).map_err(|e| {
		std::io::Error::new(
			std::io::ErrorKind::InvalidInput,
			format!("Failed to load corpus from {}: {e}", args.corpus_dir),
		)
	})?;
	info!(
		"Loaded {} tokens from {} corpus files",
		corpus.tokens.len(),
		corpus.sources.len()
	);

	let model = NGramModel::build_parallel(&corpus.tokens);
	info!(
		"Built frequency tables: {} bigram contexts, {} trigram contexts",
		model.bigram_context_count(),
		model.trigram_context_count()
	);

	let shared_data = web::Data::new(SharedData {
		model,
		corpus_names: corpus.sources,
	});

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(post_predict)
			.service(get_complete)
			.service(get_corpora)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
