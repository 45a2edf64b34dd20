//! HTTP handlers and router.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use cardiorisk_ai::{Classifier, ModelError};
use cardiorisk_core::{Assessment, FeatureSchema, LastResult};
use cardiorisk_report::ReportWriter;
use chrono::Local;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AppError;
use crate::page;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn Classifier>,
    pub schema: Arc<FeatureSchema>,
    pub last: Arc<LastResult>,
    pub reports: Arc<ReportWriter>,
}

impl AppState {
    /// Fails when `schema` cannot place fields where the model expects them.
    pub fn new(
        model: Box<dyn Classifier>,
        schema: FeatureSchema,
        reports: ReportWriter,
    ) -> Result<Self, ModelError> {
        cardiorisk_ai::ensure_compatible(model.as_ref(), &schema)?;
        Ok(Self {
            model: Arc::from(model),
            schema: Arc::new(schema),
            last: Arc::new(LastResult::new()),
            reports: Arc::new(reports),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/download", get(download))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(&state.schema, &[], None))
}

async fn predict(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let features = state.schema.assemble(&fields)?;

    let model = Arc::clone(&state.model);
    let prediction =
        tokio::task::spawn_blocking(move || cardiorisk_ai::predict(model.as_ref(), &features))
            .await??;

    let assessment = Assessment::from_prediction(&prediction, &Local::now());
    info!(
        label = ?prediction.label,
        probability = assessment.probability,
        "prediction served"
    );
    state.last.store(assessment.clone());

    Ok(Html(page::render(&state.schema, &fields, Some(&assessment))))
}

async fn download(State(state): State<AppState>) -> Result<Response, AppError> {
    let last = state.last.snapshot();
    let reports = Arc::clone(&state.reports);
    let bytes = tokio::task::spawn_blocking(move || reports.write(last.as_ref())).await??;

    let disposition = format!("attachment; filename=\"{}\"", state.reports.file_name());
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

async fn health() -> &'static str {
    "ok"
}
