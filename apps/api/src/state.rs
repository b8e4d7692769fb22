use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;

/// Shared application state injected into all route handlers via Axum
/// extractors. The scoring engine is deliberately absent here: scorer and
/// vectorizer instances are constructed per request, never shared, because
/// a fitted vectorizer is only valid for the corpus it was fit on.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable document-to-text extractor. Default: `FileTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
}
