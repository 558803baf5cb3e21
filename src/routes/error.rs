use actix_web::http::StatusCode;
use actix_web::{error, web, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;

use crate::domain::validation::ValidationErrors;
use crate::store::StoreError;

pub const INVALID_FORM_DATA: &str = "Invalid form data";
pub const INVALID_EMAIL: &str = "Invalid email";
const INTERNAL_SERVER_ERROR: &str = "Internal server error";
const CONTACT_APOLOGY: &str =
    "Sorry, there was an error sending your message. Please try again later.";

/// The two ways an intake request can fail.
#[derive(thiserror::Error)]
pub enum IntakeError {
    /// The client sent something unusable. Carries every field that was rejected.
    #[error("{summary}: {errors}")]
    Validation {
        summary: &'static str,
        errors: ValidationErrors,
    },
    /// Anything else. Reported generically, the detail stays in the logs.
    #[error("Failed to access the submission store.")]
    Internal {
        apology: Option<&'static str>,
        #[source]
        source: StoreError,
    },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl IntakeError {
    pub fn invalid_contact(errors: ValidationErrors) -> Self {
        IntakeError::Validation {
            summary: INVALID_FORM_DATA,
            errors,
        }
    }

    pub fn invalid_newsletter(errors: ValidationErrors) -> Self {
        IntakeError::Validation {
            summary: INVALID_EMAIL,
            errors,
        }
    }

    pub fn internal(source: StoreError) -> Self {
        IntakeError::Internal {
            apology: None,
            source,
        }
    }

    pub fn contact_internal(source: StoreError) -> Self {
        IntakeError::Internal {
            apology: Some(CONTACT_APOLOGY),
            source,
        }
    }
}

impl std::fmt::Debug for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;

        if let Some(source) = std::error::Error::source(self) {
            write!(f, "\nCaused by:\n\t{}", source)?;
        }

        Ok(())
    }
}

impl ResponseError for IntakeError {
    fn status_code(&self) -> StatusCode {
        match self {
            IntakeError::Validation { .. } => StatusCode::BAD_REQUEST,
            IntakeError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            IntakeError::Validation { summary, errors } => ErrorBody {
                success: false,
                error: summary,
                details: Some(errors),
                message: None,
            },
            IntakeError::Internal { apology, .. } => ErrorBody {
                success: false,
                error: INTERNAL_SERVER_ERROR,
                details: None,
                message: *apology,
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Body extraction for an intake endpoint: malformed JSON is reported like any other validation error.
pub fn json_config(summary: &'static str) -> web::JsonConfig {
    web::JsonConfig::default().error_handler(move |err, _: &HttpRequest| {
        tracing::info!("Rejected request body: {}", err);
        let errors = ValidationErrors::single("body", err.to_string());

        error::InternalError::from_response(
            err,
            IntakeError::Validation { summary, errors }.error_response(),
        )
        .into()
    })
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorBody {
        success: false,
        error: "Method not allowed",
        details: None,
        message: None,
    })
}
