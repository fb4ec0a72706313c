use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    AppState,
    error::AppResult,
    models::{FilterParams, Movie},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/filter", get(filter_movies))
        .route("/movies/{id}", get(get_movie).put(update_movie).delete(delete_movie))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    Ok(Json(state.catalog.list().await?))
}

/// Responds with `null` when no movie has this id.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<Option<Movie>>> {
    Ok(Json(state.catalog.get(id).await?))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<Movie>,
) -> AppResult<Json<Movie>> {
    Ok(Json(state.catalog.create(movie).await?))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(patch): Json<Movie>,
) -> AppResult<Json<Movie>> {
    Ok(Json(state.catalog.update(id, patch).await?))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.catalog.delete(id).await?;
    Ok(StatusCode::OK)
}

pub async fn filter_movies(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FilterParams>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.catalog.filter(q.text.as_deref(), q.stars, q.year).await?;
    Ok(Json(movies))
}
