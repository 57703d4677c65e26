use crate::app::AppState;
use crate::clients::CollectionApi;
use crate::error::AppError;
use crate::framework::DocumentEntity;
use crate::model::{Post, Product};
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::{info, warn};

pub const TOKEN_COOKIE: &str = "payload-token";
const DEFAULT_REDIRECT: &str = "/next";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/next/preview", get(preview))
        .route("/next/exit-draft", get(exit_draft))
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub path: Option<String>,
    pub collection: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExitQuery {
    pub path: Option<String>,
}

/// Accepts only same-origin relative paths. `//host` and `/\host` are rejected, as
/// is any control character or whitespace, which browsers strip from a `Location`.
pub fn redirect_target(path: Option<&str>) -> Result<&str, AppError> {
    let path = match path.filter(|p| !p.is_empty()) {
        None => return Ok(DEFAULT_REDIRECT),
        Some(path) => path,
    };
    let mut chars = path.chars();
    let leading_slash = chars.next() == Some('/');
    if !leading_slash
        || matches!(chars.next(), Some('/') | Some('\\'))
        || path.chars().any(|c| c.is_ascii_control() || c.is_whitespace())
    {
        return Err(AppError::BadRequest(format!(
            "Invalid redirect path: {path}"
        )));
    }
    Ok(path)
}

/// `GET /next/preview?path&collection&slug`
pub async fn preview(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<PreviewQuery>,
) -> Result<Redirect, AppError> {
    let Some(token) = jar.get(TOKEN_COOKIE).map(|c| c.value().to_string()) else {
        return Err(AppError::Forbidden(
            "You are not allowed to preview this page".to_string(),
        ));
    };
    match state.preview.verify(&token) {
        Ok(claims) => info!(sub = %claims.sub, "Preview token accepted"),
        Err(e) => {
            warn!(reason = %e, "Preview token rejected");
            state.draft_mode.disable();
            return Err(AppError::Forbidden(
                "You are not allowed to preview this page".to_string(),
            ));
        }
    }

    let target = redirect_target(query.path.as_deref())?;

    // Without both a collection and a slug there is no document to check.
    if let (Some(collection), Some(slug)) = (
        query.collection.as_deref().filter(|c| !c.is_empty()),
        query.slug.as_deref().filter(|s| !s.is_empty()),
    ) {
        let api = state.local_api().await?;
        let found = if collection == Post::COLLECTION {
            api.posts.find_by_slug(slug, true).await?.is_some()
        } else if collection == Product::COLLECTION {
            api.products.find_by_slug(slug, true).await?.is_some()
        } else {
            return Err(AppError::BadRequest(format!(
                "Unknown collection: {collection}"
            )));
        };
        if !found {
            return Err(AppError::NotFound("Document not found".to_string()));
        }
    }

    state.draft_mode.enable();
    info!(path = target, "Draft mode enabled");
    Ok(Redirect::temporary(target))
}

/// `GET /next/exit-draft?path`
pub async fn exit_draft(
    State(state): State<AppState>,
    Query(query): Query<ExitQuery>,
) -> Result<Redirect, AppError> {
    let target = redirect_target(query.path.as_deref())?;
    state.draft_mode.disable();
    info!(path = target, "Draft mode disabled");
    Ok(Redirect::temporary(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some("/next"))]
    #[case(Some("/next/posts/hello"), Some("/next/posts/hello"))]
    #[case(Some("//evil.example"), None)]
    #[case(Some("/\\evil.example"), None)]
    #[case(Some("https://evil.example"), None)]
    #[case(Some("/\t/evil.example"), None)]
    #[case(Some("/next\nx"), None)]
    #[case(Some("/next\r\nSet-Cookie: a=b"), None)]
    #[case(Some("/next posts"), None)]
    fn redirect_targets(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(redirect_target(raw).ok(), expected);
    }
}
