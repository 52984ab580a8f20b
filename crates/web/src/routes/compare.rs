//! Price comparison route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::{RankedOffer, rank_by_price};
use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Compare page query parameters.
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    #[serde(default)]
    pub q: String,
}

/// Price comparison page template.
#[derive(Template, WebTemplate)]
#[template(path = "compare.html")]
pub struct CompareTemplate {
    pub user: Option<CurrentUser>,
    pub query: String,
    /// False until the visitor submits a non-empty search; lets the template
    /// distinguish "not searched yet" from "no matches".
    pub searched: bool,
    pub offers: Vec<RankedOffer>,
}

/// Display the compare page.
///
/// An empty or whitespace-only query performs no fetch and shows no results.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(params): Query<CompareQuery>,
) -> Result<impl IntoResponse> {
    let term = params.q.trim();

    let offers = if term.is_empty() {
        Vec::new()
    } else {
        let fetched = ProductRepository::new(state.pool())
            .search_offers(term)
            .await?;
        rank_by_price(fetched)
    };

    Ok(CompareTemplate {
        user,
        searched: !term.is_empty(),
        query: params.q,
        offers,
    })
}
