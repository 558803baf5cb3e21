use serde::Deserialize;

use crate::domain::email_address::EmailAddress;
use crate::domain::non_empty_text::NonEmptyText;
use crate::domain::validation::{required, ValidationErrors};

/// A contact form payload that passed validation but has no identity yet.
#[derive(Debug, Clone)]
pub struct NewContactSubmission {
    pub name: NonEmptyText,
    pub email: EmailAddress,
    pub company: Option<String>,
    pub project: NonEmptyText,
}

// Fields are optional at the wire level so a missing field is reported like any other violation
#[derive(Deserialize, Debug, Default)]
pub struct ContactSubmissionBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

impl TryFrom<ContactSubmissionBody> for NewContactSubmission {
    type Error = ValidationErrors;

    fn try_from(body: ContactSubmissionBody) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::default();

        let name = errors.check(
            "name",
            required(body.name, "Name is required").and_then(NonEmptyText::parse),
        );
        let email = errors.check(
            "email",
            required(body.email, "Email is required").and_then(EmailAddress::parse),
        );
        let project = errors.check(
            "project",
            required(body.project, "Project description is required")
                .and_then(NonEmptyText::parse),
        );
        let company = body
            .company
            .map(|company| company.trim().to_string())
            .filter(|company| !company.is_empty());

        match (name, email, project) {
            (Some(name), Some(email), Some(project)) if errors.is_empty() => {
                Ok(NewContactSubmission {
                    name,
                    email,
                    company,
                    project,
                })
            }
            _ => Err(errors),
        }
    }
}
