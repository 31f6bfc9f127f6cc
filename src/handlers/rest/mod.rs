use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{NoteRequest, ProcessNoteResponse, Status},
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    paths(process_note),
    components(schemas(NoteRequest, ProcessNoteResponse, Status)),
    tags(
        (name = "notes", description = "Note ingestion API")
    )
)]
pub struct ApiDoc;

pub fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ProcessNoteResponse::new(false, message)),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/process_note",
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note processed; `status` tells whether it was saved and uploaded", body = ProcessNoteResponse),
        (status = 500, description = "Request could not be processed", body = ProcessNoteResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn process_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            tracing::error!("Error processing note: {e}");
            return internal_error(format!("error while processing note: {}", e.body_text()));
        }
    };
    tracing::info!("Received request data: {:?}", request);

    let outcome = service.process_note(request).await;

    (
        StatusCode::OK,
        Json(ProcessNoteResponse::new(outcome.success, outcome.message)),
    )
        .into_response()
}

#[debug_handler]
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
