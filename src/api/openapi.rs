use crate::api::schemas::{ErrorCode, ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::adapter::incoming::web::routes::{
    RegisterAccountForm, RegisterAccountResponse, RegisteredAccount, VerifyEmailResponse,
};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Registration API",
        version = "0.1.0",
        description = "Account registration with email verification"
    ),
    paths(
        crate::auth::adapter::incoming::web::routes::register_account_handler,
        crate::auth::adapter::incoming::web::routes::verify_email_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<RegisterAccountResponse>,
            SuccessResponse<VerifyEmailResponse>,
            ErrorResponse,
            ErrorDetail,
            ErrorCode,

            // Auth DTOs
            RegisterAccountForm,
            RegisterAccountResponse,
            RegisteredAccount,
            VerifyEmailResponse
        )
    ),
    tags(
        (name = "auth", description = "Registration and email verification"),
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/swagger-ui/`, OpenAPI document at `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui/{_:.*}").url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
