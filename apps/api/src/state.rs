use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::recommender::Recommender;
use crate::profiles::extraction::{LlmProfileExtractor, ProfileExtractor};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Pluggable ranking engine. Default: CosineRecommender.
    pub recommender: Arc<dyn Recommender>,
    /// Resume-to-profile extraction. Default: LlmProfileExtractor.
    pub extractor: Arc<dyn ProfileExtractor>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        s3: S3Client,
        llm: LlmClient,
        config: Config,
        recommender: Arc<dyn Recommender>,
    ) -> Self {
        AppState {
            db,
            s3,
            config,
            recommender,
            extractor: Arc::new(LlmProfileExtractor(llm)),
        }
    }
}
