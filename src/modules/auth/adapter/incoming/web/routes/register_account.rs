use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::RegistrationForm;
use crate::auth::application::orchestrator::account_registration::AccountRegistrationError;
use crate::auth::application::use_cases::create_account::{CreateAccountError, CreateAccountInput};
use crate::multimedia::application::domain::policies::ImageValidationError;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Multipart form accepted by the registration endpoint (documentation only)
#[derive(Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct RegisterAccountForm {
    /// Display name
    #[schema(example = "Ann")]
    name: String,

    /// Email address, matched case-insensitively
    #[schema(example = "ann@x.com")]
    email: String,

    /// Plaintext password, stored only as a bcrypt hash
    #[schema(example = "secret123")]
    password: String,

    /// Optional JPEG or PNG, at most 2MB
    #[serde(rename = "profilePicture")]
    #[schema(value_type = Option<String>, format = Binary)]
    profile_picture: Option<Vec<u8>>,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterAccountResponse {
    /// Outcome message; differs when the verification email could not be sent
    #[schema(
        example = "Registration successful. Please check your email to verify your account."
    )]
    message: String,

    /// Created account
    account: RegisteredAccount,
}

#[derive(Serialize, ToSchema)]
pub struct RegisteredAccount {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    id: String,

    #[schema(example = "Ann")]
    name: String,

    #[schema(example = "ann@x.com")]
    email: String,

    #[schema(example = "/uploads/1700000000000-42.png")]
    profile_picture_path: Option<String>,

    #[schema(example = false)]
    is_verified: bool,
}

fn map_create_account_error(err: CreateAccountError, email: &str) -> HttpResponse {
    match &err {
        CreateAccountError::MissingFields => {
            warn!(email = %email, "Registration with missing fields");
            ApiResponse::bad_request("MISSING_FIELDS", &err.to_string())
        }

        CreateAccountError::EmailTaken => {
            warn!(email = %email, "Email already registered");
            ApiResponse::conflict("EMAIL_TAKEN", &err.to_string())
        }

        CreateAccountError::InvalidImage(image_err) => {
            warn!(email = %email, error = %image_err, "Rejected profile picture");
            let code = match image_err {
                ImageValidationError::NoFile => "NO_FILE",
                ImageValidationError::UnsupportedType(_) => "INVALID_FILE_TYPE",
                ImageValidationError::TooLarge { .. } => "FILE_TOO_LARGE",
            };
            ApiResponse::bad_request(code, &image_err.to_string())
        }

        other => {
            error!(email = %email, error = %other, "Unhandled account creation error");
            ApiResponse::internal_error()
        }
    }
}

/// Register a new account
///
/// Creates an unverified account and emails a verification link. The response
/// does not wait for the email to be delivered.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body(content = RegisterAccountForm, content_type = "multipart/form-data"),
    responses(
        (
            status = 201,
            description = "Account created",
            body = inline(SuccessResponse<RegisterAccountResponse>),
            example = json!({
                "success": true,
                "data": {
                    "message": "Registration successful. Please check your email to verify your account.",
                    "account": {
                        "id": "123e4567-e89b-12d3-a456-426614174000",
                        "name": "Ann",
                        "email": "ann@x.com",
                        "profile_picture_path": null,
                        "is_verified": false
                    }
                }
            })
        ),
        (
            status = 400,
            description = "Missing fields, malformed form, or invalid profile picture",
            body = ErrorResponse,
            examples(
                ("Missing fields" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "MISSING_FIELDS",
                        "message": "Name, email, and password are required."
                    }
                }))),
                ("Invalid file type" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "INVALID_FILE_TYPE",
                        "message": "Only JPG and PNG images are allowed"
                    }
                }))),
                ("File too large" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "FILE_TOO_LARGE",
                        "message": "File size exceeds 2MB"
                    }
                })))
            )
        ),
        (
            status = 409,
            description = "Email already registered",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "EMAIL_TAKEN",
                    "message": "Email is already registered."
                }
            })
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INTERNAL_ERROR",
                    "message": "Server error. Please try again later."
                }
            })
        ),
    )
)]
#[post("/api/auth/register")]
pub async fn register_account_handler(
    form: RegistrationForm,
    data: web::Data<AppState>,
) -> impl Responder {
    let email = form.email.clone().unwrap_or_default();

    info!(
        email = %email,
        has_profile_picture = form.profile_picture.is_some(),
        "Account registration attempt"
    );

    let profile_picture = match form.profile_picture {
        Some(file) => match data.profile_picture_storage.save(file).await {
            Ok(stored) => Some(stored),
            Err(e) => {
                error!(email = %email, error = %e, "Failed to store profile picture");
                return ApiResponse::internal_error();
            }
        },
        None => None,
    };

    let input = CreateAccountInput {
        name: form.name.unwrap_or_default(),
        email: email.clone(),
        password: form.password.unwrap_or_default(),
        profile_picture,
    };

    match data.register_account_orchestrator.register_account(input).await {
        Ok(account) => {
            info!(
                account_id = %account.account_id,
                email = %account.email,
                email_dispatched = account.email_dispatched,
                "Account registered"
            );

            ApiResponse::created(RegisterAccountResponse {
                message: account.message,
                account: RegisteredAccount {
                    id: account.account_id.to_string(),
                    name: account.name,
                    email: account.email,
                    profile_picture_path: account.profile_picture_path,
                    is_verified: account.is_verified,
                },
            })
        }

        Err(AccountRegistrationError::CreateAccountFailed(e)) => {
            map_create_account_error(e, &email)
        }
    }
}
