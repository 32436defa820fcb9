use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use recall_config::EmbeddingConfig;

/// One embedded input: the vector plus the share of the request's token
/// usage attributed to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Embedding {
	pub vector: Vec<f32>,
	pub tokens: u32,
}

/// Embeds every input in one request. Inputs are trimmed before submission
/// and the output sequence follows the input order regardless of the order
/// the provider answered in.
pub async fn embed(cfg: &EmbeddingConfig, texts: &[String]) -> Result<Vec<Embedding>> {
	if texts.is_empty() {
		return Ok(Vec::new());
	}

	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let input = texts.iter().map(|text| text.trim()).collect::<Vec<_>>();
	let body = serde_json::json!({
		"model": cfg.model,
		"input": input,
		"dimensions": cfg.dimensions,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_embedding_response(json, texts.len())
}

fn parse_embedding_response(json: Value, expected: usize) -> Result<Vec<Embedding>> {
	let data = json.get("data").and_then(|v| v.as_array()).ok_or_else(|| Error::InvalidResponse {
		message: "Embedding response is missing data array.".to_string(),
	})?;

	if data.len() != expected {
		return Err(Error::InvalidResponse {
			message: format!(
				"Embedding response carries {} items for {expected} inputs.",
				data.len()
			),
		});
	}

	let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());

	for (fallback_index, item) in data.iter().enumerate() {
		let index = item
			.get("index")
			.and_then(|v| v.as_u64())
			.map(|v| v as usize)
			.unwrap_or(fallback_index);
		let embedding =
			item.get("embedding").and_then(|v| v.as_array()).ok_or_else(|| {
				Error::InvalidResponse {
					message: "Embedding item missing embedding array.".to_string(),
				}
			})?;
		let mut vec = Vec::with_capacity(embedding.len());

		for value in embedding {
			let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
				message: "Embedding value must be numeric.".to_string(),
			})?;

			vec.push(number as f32);
		}

		indexed.push((index, vec));
	}

	indexed.sort_by_key(|(index, _)| *index);

	let total_tokens = json
		.get("usage")
		.and_then(|usage| usage.get("total_tokens"))
		.and_then(|v| v.as_u64())
		.unwrap_or(0) as u32;
	let tokens = split_tokens(total_tokens, indexed.len());

	Ok(indexed
		.into_iter()
		.zip(tokens)
		.map(|((_, vector), tokens)| Embedding { vector, tokens })
		.collect())
}

// Usage is reported per request, not per item; attribute it evenly and give
// the remainder to the first item.
fn split_tokens(total: u32, count: usize) -> Vec<u32> {
	if count == 0 {
		return Vec::new();
	}

	let share = total / count as u32;
	let remainder = total % count as u32;
	let mut out = vec![share; count];

	out[0] += remainder;

	out
}
