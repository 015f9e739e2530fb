//! Remote embedding calls against an OpenAI-compatible HTTP endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
	data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
	#[serde(default)]
	index: Option<usize>,
	embedding: Vec<f32>,
}

/// Embeds `texts` in a single request and returns one vector per input, in input order.
pub async fn embed(
	cfg: &compass_config::EmbeddingProviderConfig,
	texts: &[String],
) -> Result<Vec<Vec<f32>>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = json!({
		"model": cfg.model,
		"input": texts,
		"dimensions": cfg.dimensions,
	});
	let response = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?
		.error_for_status()?
		.json::<EmbeddingResponse>()
		.await?;
	let vectors = in_input_order(response);

	if vectors.len() != texts.len() {
		return Err(Error::InvalidResponse {
			message: format!(
				"Expected {} embeddings but the provider returned {}.",
				texts.len(),
				vectors.len()
			),
		});
	}

	Ok(vectors)
}

// Rows may arrive out of order. `index` wins over list position where present.
fn in_input_order(response: EmbeddingResponse) -> Vec<Vec<f32>> {
	let mut rows = response
		.data
		.into_iter()
		.enumerate()
		.map(|(position, row)| (row.index.unwrap_or(position), row.embedding))
		.collect::<Vec<_>>();

	rows.sort_by_key(|(index, _)| *index);

	rows.into_iter().map(|(_, embedding)| embedding).collect()
}
