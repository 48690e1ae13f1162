//! API route handlers

use axum::Json;
use axum::extract::{Multipart, Query, State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use sol_core::{AnswerResult, DocumentId};

use crate::error::ApiError;
use crate::extract::extract_text;
use crate::server::AppState;

/// Most files accepted by one upload request
pub const MAX_FILES_PER_UPLOAD: usize = 3;

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub filename: String,
    pub doc_id: DocumentId,
    pub chunks: usize,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub documents: Vec<UploadedDocument>,
}

#[derive(Debug, Deserialize)]
pub struct AskParams {
    pub query: Option<String>,
}

/// Upload 1-3 files, then extract, chunk, embed and index them.
///
/// Every file is read and extracted before any is indexed, so a bad file
/// leaves the index untouched.
pub async fn upload_documents(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(e.status(), e.body_text()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if files.len() == MAX_FILES_PER_UPLOAD {
            return Err(ApiError::bad_request("Maximum 3 files allowed"));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
        files.push((filename, bytes));
    }

    if files.is_empty() {
        return Err(ApiError::bad_request("No files provided"));
    }
    info!(count = files.len(), "Received files for upload");

    let mut extracted = Vec::with_capacity(files.len());
    for (filename, bytes) in files {
        let text = extract_text(&filename, &bytes)?;
        if text.trim().is_empty() {
            return Err(ApiError::bad_request(format!(
                "No readable text found in file: {}",
                filename
            )));
        }
        extracted.push((filename, text));
    }

    let mut documents = Vec::with_capacity(extracted.len());
    for (filename, text) in extracted {
        let report = state.engine.add_document(&text, &filename).await?;
        info!(filename = %filename, doc_id = %report.doc_id, "Processed file");

        documents.push(UploadedDocument {
            filename,
            doc_id: report.doc_id,
            chunks: report.chunks,
            status: "processed".to_string(),
        });
    }

    Ok(Json(UploadResponse {
        message: "Documents uploaded and indexed successfully".to_string(),
        documents,
    }))
}

/// Answer a question over the uploaded documents
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskParams>,
) -> Result<Json<AnswerResult>, ApiError> {
    let query = params.query.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(ApiError::bad_request("Query cannot be empty"));
    }

    info!(query = %query, "Received query");
    let result = state.engine.answer_query(&query).await?;
    Ok(Json(result))
}

pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let indexed_chunks = state.engine.vector_count().await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "indexed_chunks": indexed_chunks,
    })))
}

/// Upload and query counters
pub async fn metrics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let snapshot = state.engine.metrics();
    let indexed_chunks = state.engine.vector_count().await?;

    Ok(Json(serde_json::json!({
        "total_uploads": snapshot.total_uploads,
        "total_queries": snapshot.total_queries,
        "avg_query_latency_seconds": round_to(snapshot.avg_query_latency_seconds, 3),
        "indexed_chunks": indexed_chunks,
    })))
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
