use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use handlebars::RenderError;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::models::SearchFilters;
use crate::spoonacular::SpoonacularClient;
use crate::views::{Views, DETAIL_FAILED, SEARCH_FAILED};

#[derive(Clone)]
pub struct AppState {
    pub client: SpoonacularClient,
    pub views: Arc<Views>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(search_form))
        .route("/search", get(submit_search))
        .route("/dishes", get(list_dishes))
        .route("/dishes/:id", get(recipe_detail))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn search_form(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let filters = filters_from(raw);
    page(StatusCode::OK, state.views.search_form(&filters))
}

async fn submit_search(RawQuery(raw): RawQuery) -> Redirect {
    let filters = filters_from(raw);
    let query = filters.to_query_string();
    if query.is_empty() {
        Redirect::to("/dishes")
    } else {
        Redirect::to(&format!("/dishes?{query}"))
    }
}

async fn list_dishes(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let filters = filters_from(raw);
    match state.client.search_recipes(&filters).await {
        Ok(dishes) => page(StatusCode::OK, state.views.dishes(&dishes)),
        Err(e) => {
            error!(
                error = &e as &(dyn std::error::Error + 'static),
                ?filters,
                "failed to fetch recipes"
            );
            page(StatusCode::BAD_GATEWAY, state.views.failure(SEARCH_FAILED))
        }
    }
}

async fn recipe_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(recipe_id) = id.parse::<u64>() else {
        warn!(%id, "recipe id is not numeric");
        return page(StatusCode::BAD_GATEWAY, state.views.failure(DETAIL_FAILED));
    };

    match state.client.get_recipe(recipe_id).await {
        Ok(recipe) => page(StatusCode::OK, state.views.recipe(&recipe)),
        Err(e) => {
            error!(
                error = &e as &(dyn std::error::Error + 'static),
                recipe_id,
                "failed to fetch recipe details"
            );
            page(StatusCode::BAD_GATEWAY, state.views.failure(DETAIL_FAILED))
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn filters_from(raw: Option<String>) -> SearchFilters {
    raw.as_deref().map(SearchFilters::from_query).unwrap_or_default()
}

fn page(status: StatusCode, rendered: Result<String, RenderError>) -> Response {
    match rendered {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page.").into_response()
        }
    }
}
