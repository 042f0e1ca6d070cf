use utoipa::OpenApi;

pub const CRON_TAG: &str = "Cron";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "webcron",
        description = "REST API for managing scheduled HTTP-callback cron jobs",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = CRON_TAG, description = "Cron job management endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
