pub mod contact_submission;
pub mod email_address;
pub mod new_contact_submission;
pub mod new_newsletter_subscription;
pub mod newsletter_subscription;
pub mod non_empty_text;
pub mod validation;
