use actix_multipart::{Field, Multipart};
use actix_web::{dev::Payload, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use futures::future::LocalBoxFuture;
use futures::StreamExt;
use tracing::warn;

use crate::multimedia::application::domain::entities::IncomingFile;
use crate::shared::api::ApiResponse;

pub const NAME_FIELD: &str = "name";
pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";
pub const PROFILE_PICTURE_FIELD: &str = "profilePicture";

/// Hard cap on a buffered upload. Files below it reach the image policy
/// (which enforces the real 2 MiB limit); files above it are refused while
/// reading, with the same 400 the policy would give.
pub const MAX_BUFFERED_FILE_BYTES: usize = 16 * 1024 * 1024;
pub const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// `multipart/form-data` body of `POST /api/auth/register`.
///
/// Text fields stay optional here; deciding what is missing belongs to the
/// registration use case. Unknown fields are drained and ignored.
#[derive(Debug, Default)]
pub struct RegistrationForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile_picture: Option<IncomingFile>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationFormError {
    #[error("Malformed multipart body: {0}")]
    Malformed(String),

    #[error("Field {0} is not valid UTF-8")]
    InvalidText(String),

    #[error("Field {field} exceeds {limit} bytes")]
    TooLarge { field: String, limit: usize },
}

impl RegistrationFormError {
    pub fn to_response(&self) -> HttpResponse {
        match self {
            RegistrationFormError::TooLarge { field, .. } if field == PROFILE_PICTURE_FIELD => {
                ApiResponse::bad_request("FILE_TOO_LARGE", "File size exceeds 2MB")
            }
            RegistrationFormError::TooLarge { .. } => {
                ApiResponse::bad_request("FIELD_TOO_LARGE", &self.to_string())
            }
            RegistrationFormError::Malformed(_) | RegistrationFormError::InvalidText(_) => {
                ApiResponse::bad_request("INVALID_FORM", "Invalid registration form")
            }
        }
    }
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

async fn read_field(
    field: &mut Field,
    name: &str,
    limit: usize,
) -> Result<Vec<u8>, RegistrationFormError> {
    let mut bytes = Vec::new();

    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| RegistrationFormError::Malformed(e.to_string()))?;
        if bytes.len() + chunk.len() > limit {
            return Err(RegistrationFormError::TooLarge {
                field: name.to_string(),
                limit,
            });
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, RegistrationFormError> {
    let bytes = read_field(field, name, MAX_TEXT_FIELD_BYTES).await?;
    String::from_utf8(bytes).map_err(|_| RegistrationFormError::InvalidText(name.to_string()))
}

impl RegistrationForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, RegistrationFormError> {
        let mut form = RegistrationForm::default();

        while let Some(field) = multipart.next().await {
            let mut field = field.map_err(|e| RegistrationFormError::Malformed(e.to_string()))?;
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                NAME_FIELD => form.name = Some(read_text(&mut field, &name).await?),
                EMAIL_FIELD => form.email = Some(read_text(&mut field, &name).await?),
                PASSWORD_FIELD => form.password = Some(read_text(&mut field, &name).await?),
                PROFILE_PICTURE_FIELD => {
                    let original_name = field
                        .content_disposition()
                        .and_then(|cd| cd.get_filename())
                        .unwrap_or_default()
                        .to_string();
                    let media_type = field
                        .content_type()
                        .map(|mime| mime.essence_str().to_string())
                        .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string());

                    let bytes = read_field(&mut field, &name, MAX_BUFFERED_FILE_BYTES).await?;

                    // Browsers send an empty part when no file was picked.
                    if original_name.is_empty() && bytes.is_empty() {
                        continue;
                    }

                    form.profile_picture = Some(IncomingFile {
                        original_name,
                        media_type,
                        bytes,
                    });
                }
                _ => {
                    read_field(&mut field, &name, MAX_BUFFERED_FILE_BYTES).await?;
                }
            }
        }

        Ok(form)
    }
}

impl FromRequest for RegistrationForm {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let multipart = Multipart::new(req.headers(), payload.take());

        Box::pin(async move {
            RegistrationForm::from_multipart(multipart)
                .await
                .map_err(|e| {
                    warn!(error = %e, "Rejected registration form");
                    create_api_error(e.to_response())
                })
        })
    }
}
