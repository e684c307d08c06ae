use serde::Serialize;
use utoipa::ToSchema;

/// Envelope of every 2xx body
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

/// Envelope of every 4xx/5xx body
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: ErrorCode,

    /// Shown to the user as is
    #[schema(example = "Email is already registered.")]
    pub message: String,
}

/// Every `error.code` the auth endpoints emit.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingFields,
    EmailTaken,
    NoFile,
    InvalidFileType,
    FileTooLarge,
    FieldTooLarge,
    InvalidForm,
    InvalidVerificationLink,
    InvalidOrExpiredLink,
    InternalError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_serialize_like_the_handlers_emit_them() {
        assert_eq!(
            serde_json::to_value(ErrorCode::InvalidOrExpiredLink).unwrap(),
            "INVALID_OR_EXPIRED_LINK"
        );
        assert_eq!(serde_json::to_value(ErrorCode::EmailTaken).unwrap(), "EMAIL_TAKEN");
    }
}
