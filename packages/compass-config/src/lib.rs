mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, Matching, Postgres, Providers, ScoringWeights, SemanticBlend,
	Service, Storage,
};

use std::{fs, path::Path};

const WEIGHT_SUM_TOLERANCE: f32 = 1e-4;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.matching.recommendation_limit == 0 {
		return Err(Error::Validation {
			message: "matching.recommendation_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.matching.cache_ttl_days <= 0 {
		return Err(Error::Validation {
			message: "matching.cache_ttl_days must be greater than zero.".to_string(),
		});
	}

	let weights = &cfg.matching.weights;

	for (label, value) in [
		("matching.weights.semantic", weights.semantic),
		("matching.weights.meeting_format", weights.meeting_format),
		("matching.weights.hours", weights.hours),
		("matching.weights.load", weights.load),
		("matching.weights.semantic_blend.profile", weights.semantic_blend.profile),
		("matching.weights.semantic_blend.goal_alignment", weights.semantic_blend.goal_alignment),
		(
			"matching.weights.semantic_blend.interest_overlap",
			weights.semantic_blend.interest_overlap,
		),
		(
			"matching.weights.semantic_blend.missing_fallback",
			weights.semantic_blend.missing_fallback,
		),
	] {
		if !value.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if !(0.0..=1.0).contains(&value) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0."),
			});
		}
	}

	let component_sum = weights.semantic + weights.meeting_format + weights.hours + weights.load;

	if component_sum > 1.0 + WEIGHT_SUM_TOLERANCE {
		return Err(Error::Validation {
			message: "matching.weights components must sum to 1.0 or less.".to_string(),
		});
	}

	let blend = &weights.semantic_blend;
	let blend_sum = blend.profile + blend.goal_alignment + blend.interest_overlap;

	if blend_sum > 1.0 + WEIGHT_SUM_TOLERANCE {
		return Err(Error::Validation {
			message: "matching.weights.semantic_blend terms must sum to 1.0 or less.".to_string(),
		});
	}

	Ok(())
}
