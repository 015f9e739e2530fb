use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub matching: Matching,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Matching {
	/// Result-list cap used when a request does not carry its own limit.
	pub recommendation_limit: u32,
	pub cache_ttl_days: i64,
	#[serde(default)]
	pub weights: ScoringWeights,
}

/// Component weights are pre-scaled: each sub-score lands in [0, 1] and the
/// weighted pieces sum directly to the final score.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
	pub semantic: f32,
	pub meeting_format: f32,
	pub hours: f32,
	pub load: f32,
	pub semantic_blend: SemanticBlend,
}
impl Default for ScoringWeights {
	fn default() -> Self {
		Self {
			semantic: 0.5,
			meeting_format: 0.15,
			hours: 0.15,
			load: 0.2,
			semantic_blend: SemanticBlend::default(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SemanticBlend {
	pub profile: f32,
	pub goal_alignment: f32,
	pub interest_overlap: f32,
	/// Flat score used for the whole semantic component when any required
	/// vector is missing on either side.
	pub missing_fallback: f32,
}
impl Default for SemanticBlend {
	fn default() -> Self {
		Self { profile: 0.5, goal_alignment: 0.3, interest_overlap: 0.2, missing_fallback: 0.3 }
	}
}
