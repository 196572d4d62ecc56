use std::{sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::{FromRequest, FromRequestParts, Path, State},
    http::StatusCode,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{ListQuery, Movie, MovieInput},
};

/// `Json` whose rejections become client-input errors.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct MovieJson<T>(pub T);

/// `Query` whose rejections become client-input errors.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct MovieQuery<T>(pub T);

/// The full service: movie routes wrapped in timeout, CORS and request tracing.
pub fn app(state: Arc<AppState>, timeout: Duration) -> Router {
    with_layers(router(state), timeout)
}

fn with_layers(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{imdb_id}", get(get_movie).put(update_movie))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    MovieQuery(q): MovieQuery<ListQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let year = q.year()?;
    let movies = state.store.list(year).await?;
    Ok(Json(movies.into_iter().map(Movie::from).collect()))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
) -> AppResult<Json<Movie>> {
    match state.store.get(&imdb_id).await? {
        Some(movie) => Ok(Json(movie.into())),
        None => Err(AppError::not_found(format!("movie {imdb_id} not found"))),
    }
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    MovieJson(input): MovieJson<MovieInput>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    input.validate()?;
    let movie = state.store.create(&input).await?;
    tracing::info!(id = movie.id, imdb_id = %movie.imdb_id, "movie created");
    Ok((StatusCode::CREATED, Json(movie.into())))
}

/// The path key is authoritative; a body naming a different `imdbID` is rejected.
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(imdb_id): Path<String>,
    MovieJson(input): MovieJson<MovieInput>,
) -> AppResult<Json<Movie>> {
    input.validate()?;
    if input.imdb_id != imdb_id {
        return Err(AppError::bad_request(format!(
            "imdbID {} in body does not match {imdb_id} in path",
            input.imdb_id
        )));
    }

    match state.store.update(&input).await? {
        Some(movie) => Ok(Json(movie.into())),
        None => Err(AppError::not_found(format!("movie {imdb_id} not found"))),
    }
}
