use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::domain::contact_submission::ContactSubmission;
use crate::domain::new_contact_submission::{ContactSubmissionBody, NewContactSubmission};
use crate::email_client::ContactNotifier;
use crate::routes::error::IntakeError;
use crate::store::Repository;

pub const CONTACT_SUCCESS_MESSAGE: &str =
    "Message sent successfully! We will get back to you within 24 hours.";

#[derive(Serialize)]
struct SubmitContactResponse {
    success: bool,
    submission: ContactSubmission,
    message: &'static str,
}

#[derive(Serialize)]
struct ContactSubmissionsResponse {
    success: bool,
    submissions: Vec<ContactSubmission>,
}

#[tracing::instrument(
    name = "Submitting a contact form handler",
    skip(body, contacts, notifier),
    fields(
        contact_email = tracing::field::Empty,
        submission_id = tracing::field::Empty
    )
)]
pub async fn submit_contact(
    body: web::Json<ContactSubmissionBody>,
    contacts: web::Data<dyn Repository<ContactSubmission>>,
    notifier: web::Data<dyn ContactNotifier>,
) -> Result<HttpResponse, IntakeError> {
    tracing::info!("Contact form submission received");

    let new_submission: NewContactSubmission = body.into_inner().try_into().map_err(|errors| {
        tracing::info!("Validation error: {}", errors);
        IntakeError::invalid_contact(errors)
    })?;
    tracing::Span::current().record("contact_email", new_submission.email.as_ref());

    let submission = contacts
        .insert(ContactSubmission::create(new_submission))
        .await
        .map_err(|err| {
            tracing::error!("Failed to store contact submission: {:?}", err);
            IntakeError::contact_internal(err)
        })?;
    tracing::Span::current().record("submission_id", tracing::field::display(submission.id));

    // The submission is already stored: from here on nothing can turn the response into an error
    send_notification(notifier.get_ref(), &submission).await;

    Ok(HttpResponse::Ok().json(SubmitContactResponse {
        success: true,
        submission,
        message: CONTACT_SUCCESS_MESSAGE,
    }))
}

#[tracing::instrument(name = "Listing contact submissions handler", skip(contacts))]
pub async fn list_contact_submissions(
    contacts: web::Data<dyn Repository<ContactSubmission>>,
) -> Result<HttpResponse, IntakeError> {
    let submissions = contacts.list().await.map_err(|err| {
        tracing::error!("Failed to list contact submissions: {:?}", err);
        IntakeError::internal(err)
    })?;

    Ok(HttpResponse::Ok().json(ContactSubmissionsResponse {
        success: true,
        submissions,
    }))
}

async fn send_notification(notifier: &dyn ContactNotifier, submission: &ContactSubmission) {
    match notifier.notify(submission).await {
        Ok(()) => tracing::info!("Contact email sent successfully"),
        Err(err) => tracing::error!(
            "Email sending failed, but submission was saved: {:?}",
            err
        ),
    }
}
