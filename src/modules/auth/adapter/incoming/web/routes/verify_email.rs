use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::verify_account_email::{
    VerifyAccountEmailError, VerifyAccountEmailInput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::{IntoParams, ToSchema};

pub const VERIFIED_MESSAGE: &str = "Email verified successfully. You can now log in.";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerifyEmailQuery {
    /// Token from the verification email
    token: Option<String>,

    /// Email address the token was issued to
    email: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct VerifyEmailResponse {
    #[schema(example = "Email verified successfully. You can now log in.")]
    message: String,
}

/// Verify an account's email address
///
/// Target of the link sent after registration. Succeeds exactly once per token.
#[utoipa::path(
    get,
    path = "/api/auth/verify-email",
    tag = "auth",
    params(VerifyEmailQuery),
    responses(
        (
            status = 200,
            description = "Email verified",
            body = inline(SuccessResponse<VerifyEmailResponse>),
            example = json!({
                "success": true,
                "data": { "message": "Email verified successfully. You can now log in." }
            })
        ),
        (
            status = 400,
            description = "Missing parameters, or no unverified account matches",
            body = ErrorResponse,
            examples(
                ("Missing parameters" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "INVALID_VERIFICATION_LINK",
                        "message": "Invalid verification link."
                    }
                }))),
                ("No match" = (value = json!({
                    "success": false,
                    "error": {
                        "code": "INVALID_OR_EXPIRED_LINK",
                        "message": "Invalid or expired verification link."
                    }
                })))
            )
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse
        ),
    )
)]
#[get("/api/auth/verify-email")]
pub async fn verify_email_handler(
    query: web::Query<VerifyEmailQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let email = query.email.clone().unwrap_or_default();

    let input = VerifyAccountEmailInput {
        token: query.token,
        email: query.email,
    };

    match data.verify_account_email_use_case.execute(input).await {
        Ok(()) => {
            info!(email = %email, "Email verified");
            ApiResponse::success(VerifyEmailResponse {
                message: VERIFIED_MESSAGE.to_string(),
            })
        }
        Err(e @ VerifyAccountEmailError::InvalidRequest) => {
            warn!(email = %email, "Verification link missing parameters");
            ApiResponse::bad_request("INVALID_VERIFICATION_LINK", &e.to_string())
        }
        Err(e @ VerifyAccountEmailError::InvalidOrExpiredLink) => {
            warn!(email = %email, "Verification link did not match");
            ApiResponse::bad_request("INVALID_OR_EXPIRED_LINK", &e.to_string())
        }
        Err(e) => {
            error!(email = %email, error = %e, "Email verification failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::use_cases::verify_account_email::IVerifyAccountEmailUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct MockVerifyAccountEmail {
        result: Result<(), VerifyAccountEmailError>,
        received: Arc<Mutex<Option<VerifyAccountEmailInput>>>,
    }

    impl MockVerifyAccountEmail {
        fn returning(result: Result<(), VerifyAccountEmailError>) -> Self {
            Self {
                result,
                received: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl IVerifyAccountEmailUseCase for MockVerifyAccountEmail {
        async fn execute(
            &self,
            input: VerifyAccountEmailInput,
        ) -> Result<(), VerifyAccountEmailError> {
            *self.received.lock().unwrap() = Some(input);
            self.result.clone()
        }
    }

    async fn call(use_case: MockVerifyAccountEmail, uri: &str) -> (u16, serde_json::Value) {
        let app_state = TestAppStateBuilder::default()
            .with_verify_account_email(use_case)
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .service(verify_email_handler),
        )
        .await;

        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body: serde_json::Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_verify_email_success() {
        let use_case = MockVerifyAccountEmail::returning(Ok(()));

        let (status, body) = call(
            use_case.clone(),
            "/api/auth/verify-email?token=abc123&email=ann%40x.com",
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["message"], VERIFIED_MESSAGE);

        let received = use_case.received.lock().unwrap().clone().unwrap();
        assert_eq!(received.token.as_deref(), Some("abc123"));
        assert_eq!(received.email.as_deref(), Some("ann@x.com"));
    }

    #[actix_web::test]
    async fn test_verify_email_missing_params_forwarded_as_none() {
        let use_case =
            MockVerifyAccountEmail::returning(Err(VerifyAccountEmailError::InvalidRequest));

        let (status, body) = call(use_case.clone(), "/api/auth/verify-email?token=abc123").await;

        assert_eq!(status, 400);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_VERIFICATION_LINK");
        assert_eq!(body["error"]["message"], "Invalid verification link.");

        let received = use_case.received.lock().unwrap().clone().unwrap();
        assert!(received.email.is_none());
    }

    #[actix_web::test]
    async fn test_verify_email_no_match() {
        let (status, body) = call(
            MockVerifyAccountEmail::returning(Err(VerifyAccountEmailError::InvalidOrExpiredLink)),
            "/api/auth/verify-email?token=wrong&email=ann%40x.com",
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "INVALID_OR_EXPIRED_LINK");
        assert_eq!(
            body["error"]["message"],
            "Invalid or expired verification link."
        );
    }

    #[actix_web::test]
    async fn test_verify_email_repository_error() {
        let (status, body) = call(
            MockVerifyAccountEmail::returning(Err(VerifyAccountEmailError::RepositoryError(
                "connection reset".to_string(),
            ))),
            "/api/auth/verify-email?token=abc123&email=ann%40x.com",
        )
        .await;

        assert_eq!(status, 500);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Server error. Please try again later."
        );
    }
}
