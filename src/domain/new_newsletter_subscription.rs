use serde::Deserialize;

use crate::domain::email_address::EmailAddress;
use crate::domain::validation::{required, ValidationErrors};

#[derive(Debug, Clone)]
pub struct NewNewsletterSubscription {
    pub email: EmailAddress,
}

#[derive(Deserialize, Debug, Default)]
pub struct NewsletterSubscriptionBody {
    #[serde(default)]
    pub email: Option<String>,
}

impl TryFrom<NewsletterSubscriptionBody> for NewNewsletterSubscription {
    type Error = ValidationErrors;

    fn try_from(body: NewsletterSubscriptionBody) -> Result<Self, Self::Error> {
        let email = required(body.email, "Email is required")
            .and_then(EmailAddress::parse)
            .map_err(|message| ValidationErrors::single("email", message))?;

        Ok(NewNewsletterSubscription { email })
    }
}
