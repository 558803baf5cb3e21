use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::email_address::EmailAddress;
use crate::domain::new_contact_submission::NewContactSubmission;
use crate::domain::non_empty_text::NonEmptyText;
use crate::store::Record;

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: NonEmptyText,
    pub email: EmailAddress,
    pub company: Option<String>,
    pub project: NonEmptyText,
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Gives a validated submission its identity and creation time.
    pub fn create(new_submission: NewContactSubmission) -> ContactSubmission {
        ContactSubmission {
            id: Uuid::new_v4(),
            name: new_submission.name,
            email: new_submission.email,
            company: new_submission.company,
            project: new_submission.project,
            created_at: Utc::now(),
        }
    }
}

impl Record for ContactSubmission {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
