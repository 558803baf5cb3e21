use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::email_address::EmailAddress;
use crate::domain::new_newsletter_subscription::NewNewsletterSubscription;
use crate::store::Record;

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: Uuid,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

impl NewsletterSubscription {
    pub fn create(new_subscription: NewNewsletterSubscription) -> NewsletterSubscription {
        NewsletterSubscription {
            id: Uuid::new_v4(),
            email: new_subscription.email,
            created_at: Utc::now(),
        }
    }
}

impl Record for NewsletterSubscription {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
