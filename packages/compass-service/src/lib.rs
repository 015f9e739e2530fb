pub mod matches;
pub mod mentors;
pub mod profiles;
pub mod recommend;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

use compass_config::{Config, EmbeddingProviderConfig};
use compass_domain::types::{EmbeddingField, EmbeddingSet};
use compass_providers::embedding;
use compass_storage::{db::Db, models::ProfileEmbedding};
pub use error::{Error, Result};
pub use matches::{MatchDecisionRequest, MatchResponse, MentorRequest};
pub use mentors::{MentorDirectoryEntry, MentorDirectoryResponse};
pub use profiles::{MenteeProfileUpsert, MentorProfileUpsert, ProfileUpsertResponse};
pub use recommend::{RecommendationItem, RecommendationRequest, RecommendationResponse};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, compass_providers::Result<Vec<Vec<f32>>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
}

pub struct CompassService {
	pub cfg: Config,
	pub db: Db,
	pub providers: Providers,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, compass_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { embedding }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { embedding: Arc::new(DefaultProviders) }
	}
}

impl CompassService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, db: Db, providers: Providers) -> Self {
		Self { cfg, db, providers }
	}
}

/// Folds one user's embedding rows into the shape the scorer consumes.
/// Unknown field names are skipped rather than rejected.
pub(crate) fn embedding_set(rows: &[ProfileEmbedding]) -> Option<EmbeddingSet> {
	let mut set = EmbeddingSet::default();

	for row in rows {
		match EmbeddingField::parse(&row.field) {
			Some(EmbeddingField::Profile) => set.profile = Some(row.vec.clone()),
			Some(EmbeddingField::WhyInterested) => set.why_interested = Some(row.vec.clone()),
			Some(EmbeddingField::HopeToGain) => set.hope_to_gain = Some(row.vec.clone()),
			None => {},
		}
	}

	(!set.is_empty()).then_some(set)
}
