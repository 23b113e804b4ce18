//! HTTP API with Axum
//!
//! Routes:
//!
//! - `GET    /projects`      list projects, optional `?title=` substring filter
//! - `POST   /projects`      create a project
//! - `PUT    /projects/:id`  replace a project's title and owner
//! - `DELETE /projects/:id`  remove a project
//! - `GET    /metrics`       Prometheus metrics

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;
use crate::id;
use crate::metrics::METRICS;
use crate::middleware::{log_requests, validate_project_id};
use crate::project::{Project, ProjectInput};
use crate::store::ProjectStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<ProjectStore>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            store: Arc::new(ProjectStore::new()),
        }
    }

    fn record_store_size(&self) {
        METRICS.projects_stored.set(self.store.len() as f64);
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub title: Option<String>,
}

pub async fn run_server(config: Arc<Config>, shutdown: mpsc::Receiver<()>) -> Result<()> {
    let bind_addr = config.http_bind;
    let state = AppState::new(config);

    let listener = TcpListener::bind(bind_addr).await?;

    serve(listener, state, shutdown).await
}

/// Serve the API on an already bound listener until `shutdown` fires
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: mpsc::Receiver<()>,
) -> Result<()> {
    let app = create_router(state);

    info!(addr = %listener.local_addr()?, "Backend started!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

async fn shutdown_signal(mut shutdown: mpsc::Receiver<()>) {
    // A dropped sender counts as a shutdown request too
    let _ = shutdown.recv().await;
    info!("HTTP server shutting down");
}

pub fn create_router(state: AppState) -> Router {
    let project_routes: Router<AppState> = Router::new()
        .route("/projects/:id", put(update_project).delete(delete_project))
        .route_layer(axum::middleware::from_fn(validate_project_id));

    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route("/metrics", get(metrics_handler))
        .merge(project_routes)
        .layer(axum::middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Project>> {
    // An empty `?title=` lists everything
    let filter = query.title.as_deref().filter(|title| !title.is_empty());

    Json(state.store.list(filter))
}

async fn create_project(
    State(state): State<AppState>,
    body: Result<Json<ProjectInput>, JsonRejection>,
) -> Result<Json<Project>, ApiError> {
    let input = read_input(body)?;

    let project = state.store.create(input);
    state.record_store_size();

    Ok(Json(project))
}

async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    body: Result<Json<ProjectInput>, JsonRejection>,
) -> Result<Json<Project>, ApiError> {
    let project_id = stored_project_id(&project_id)?;
    let input = read_input(body)?;

    let project = state.store.update(project_id, input)?;

    Ok(Json(project))
}

async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let project_id = stored_project_id(&project_id)?;

    state.store.delete(project_id)?;
    state.record_store_size();

    Ok(StatusCode::NO_CONTENT)
}

async fn metrics_handler() -> Result<impl IntoResponse, ApiError> {
    METRICS
        .encode()
        .map_err(|e| ApiError::Metrics(e.to_string()))
}

/// Map a path id to a store key. Stored ids are always lower-case hyphenated,
/// so any other spelling of the same UUID names no stored project.
fn stored_project_id(raw: &str) -> Result<Uuid, ApiError> {
    let project_id = id::parse(raw).ok_or(ApiError::InvalidProjectId)?;

    if project_id.to_string() != raw {
        return Err(ApiError::ProjectNotFound);
    }

    Ok(project_id)
}

/// A body sent without a JSON content type reads as empty; unparsable JSON is rejected
fn read_input(body: Result<Json<ProjectInput>, JsonRejection>) -> Result<ProjectInput, ApiError> {
    match body {
        Ok(Json(input)) => Ok(input),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(ProjectInput::default()),
        Err(e) => Err(ApiError::MalformedBody(e.body_text())),
    }
}
