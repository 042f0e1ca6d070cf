//! Cron-job request handlers.

use crate::api::doc::CRON_TAG;
use crate::api::dto::{
    CreateCronJobRequest, CronJobResponse, DeleteCronJobResponse, ErrorResponse,
    UpdateCronJobRequest,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Creates cron-job routes.
pub fn cron_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_cron_jobs, create_cron_job))
        .routes(routes!(get_cron_job, update_cron_job, delete_cron_job))
}

/// GET /api/cron - List all cron jobs
#[utoipa::path(
    get,
    path = "/",
    tag = CRON_TAG,
    responses(
        (status = 200, description = "All jobs in insertion order", body = Vec<CronJobResponse>)
    )
)]
async fn list_cron_jobs(State(state): State<AppState>) -> AppResult<Json<Vec<CronJobResponse>>> {
    let jobs = state.services.jobs.list().await;
    let responses: Vec<CronJobResponse> = jobs.into_iter().map(CronJobResponse::from).collect();
    Ok(Json(responses))
}

/// POST /api/cron - Create a new cron job
#[utoipa::path(
    post,
    path = "/",
    tag = CRON_TAG,
    request_body = CreateCronJobRequest,
    responses(
        (status = 201, description = "Job created", body = CronJobResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
async fn create_cron_job(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateCronJobRequest>,
) -> AppResult<(StatusCode, Json<CronJobResponse>)> {
    let job = state.services.jobs.create(request.into_new_job()).await?;
    Ok((StatusCode::CREATED, Json(CronJobResponse::from(job))))
}

/// GET /api/cron/:id - Get cron job by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = CRON_TAG,
    params(
        ("id" = u64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = CronJobResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
async fn get_cron_job(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<CronJobResponse>> {
    let job = state.services.jobs.get(id).await?;
    Ok(Json(CronJobResponse::from(job)))
}

/// PUT /api/cron/:id - Update cron job by ID
#[utoipa::path(
    put,
    path = "/{id}",
    tag = CRON_TAG,
    params(
        ("id" = u64, Path, description = "Job ID")
    ),
    request_body = UpdateCronJobRequest,
    responses(
        (status = 200, description = "Job updated", body = CronJobResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
async fn update_cron_job(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    ValidatedJson(request): ValidatedJson<UpdateCronJobRequest>,
) -> AppResult<Json<CronJobResponse>> {
    let job = state
        .services
        .jobs
        .update(id, request.into_update_job())
        .await?;
    Ok(Json(CronJobResponse::from(job)))
}

/// DELETE /api/cron/:id - Delete cron job by ID
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CRON_TAG,
    params(
        ("id" = u64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job deleted", body = DeleteCronJobResponse),
        (status = 404, description = "Job not found", body = ErrorResponse)
    )
)]
async fn delete_cron_job(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<DeleteCronJobResponse>> {
    state.services.jobs.delete(id).await?;
    Ok(Json(DeleteCronJobResponse {
        success: true,
        message: format!("Job {id} deleted"),
    }))
}
