//! Shared handler state and the full route tree.

use crate::cache::ViewCache;
use crate::config::Config;
use crate::error::AppError;
use crate::lifecycle::{LocalApi, LocalApiProvider};
use crate::preview::{DraftMode, PreviewAuth};
use crate::{api, pages, preview};
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<LocalApiProvider>,
    pub draft_mode: DraftMode,
    pub views: ViewCache,
    pub preview: PreviewAuth,
}

impl AppState {
    /// State whose Local API starts on first use.
    pub fn new(config: Config) -> Self {
        Self::with_provider(Arc::new(LocalApiProvider::new(config)))
    }

    pub fn with_provider(provider: Arc<LocalApiProvider>) -> Self {
        let config = provider.config();
        let preview = PreviewAuth::new(config.secret.as_bytes(), config.preview_ttl_secs);
        Self {
            api: provider,
            draft_mode: DraftMode::new(),
            views: ViewCache::new(),
            preview,
        }
    }

    /// The memoized Local API.
    pub async fn local_api(&self) -> Result<&LocalApi, AppError> {
        Ok(self.api.get().await?)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes())
        .merge(pages::routes())
        .merge(preview::routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .into_inner(),
        )
}
