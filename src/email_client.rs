use askama::Template;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use crate::config::EmailClientSettings;
use crate::domain::contact_submission::ContactSubmission;

const NOT_PROVIDED: &str = "Not provided";

/// Receives every contact submission once it has been stored.
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), EmailError>;
}

/// Sends contact notifications through an authenticated SMTP relay over implicit TLS.
///
/// When the credentials are not configured the client is still built, but
/// every send fails immediately with [`EmailError::MissingCredentials`].
pub struct EmailClient {
    mailer: Option<Mailer>,
}

struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    envelope: Envelope,
}

#[derive(Debug, Clone)]
pub struct Envelope {
    sender: Mailbox,
    recipient: Mailbox,
    cc: Vec<Mailbox>,
}

impl EmailClient {
    pub fn new(settings: &EmailClientSettings) -> Result<EmailClient, EmailError> {
        let (username, password) = match (&settings.username, &settings.password) {
            (Some(username), Some(password))
                if !username.trim().is_empty() && !password.expose_secret().trim().is_empty() =>
            {
                (username.clone(), password.expose_secret().clone())
            }
            _ => return Ok(EmailClient { mailer: None }),
        };

        let envelope = Envelope::new(
            &username,
            &settings.get_recipient().unwrap_or_else(|| username.clone()),
            &settings.get_cc_list(),
        )?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(username, password))
            .timeout(Some(settings.get_timeout()))
            .build();

        Ok(EmailClient {
            mailer: Some(Mailer {
                transport,
                envelope,
            }),
        })
    }

    pub fn notifications_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    pub async fn send_email(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        let mailer = self.mailer.as_ref().ok_or(EmailError::MissingCredentials)?;
        let message = mailer.envelope.contact_message(submission)?;

        mailer.transport.send(message).await?;

        Ok(())
    }
}

#[async_trait]
impl ContactNotifier for EmailClient {
    #[tracing::instrument(
        name = "Send a contact notification email",
        skip(self, submission),
        fields(submission_id = %submission.id)
    )]
    async fn notify(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        self.send_email(submission).await
    }
}

impl Envelope {
    pub fn new(sender: &str, recipient: &str, cc: &[String]) -> Result<Envelope, EmailError> {
        let cc = cc
            .iter()
            .map(|address| address.parse())
            .collect::<Result<Vec<Mailbox>, _>>()?;

        Ok(Envelope {
            sender: sender.parse()?,
            recipient: recipient.parse()?,
            cc,
        })
    }

    pub fn contact_message(&self, submission: &ContactSubmission) -> Result<Message, EmailError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(format!("New Contact Submission: {}", submission.name));

        for cc in &self.cc {
            builder = builder.cc(cc.clone());
        }

        let message = builder.multipart(MultiPart::alternative_plain_html(
            render_text(submission)?,
            render_html(submission)?,
        ))?;

        Ok(message)
    }
}

#[derive(Template)]
#[template(path = "contact_notification.html")]
struct ContactNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    company: &'a str,
    project: &'a str,
    submitted_at: &'a str,
}

#[derive(Template)]
#[template(path = "contact_notification.txt", escape = "none")]
struct ContactNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    company: &'a str,
    project: &'a str,
    submitted_at: &'a str,
}

fn submitted_at(submission: &ContactSubmission) -> String {
    submission
        .created_at
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

pub fn render_text(submission: &ContactSubmission) -> Result<String, EmailError> {
    let submitted_at = submitted_at(submission);
    let template = ContactNotificationText {
        name: submission.name.as_ref(),
        email: submission.email.as_ref(),
        company: submission.company.as_deref().unwrap_or(NOT_PROVIDED),
        project: submission.project.as_ref(),
        submitted_at: &submitted_at,
    };

    Ok(template.render()?)
}

/// User values are HTML-escaped by the template.
pub fn render_html(submission: &ContactSubmission) -> Result<String, EmailError> {
    let submitted_at = submitted_at(submission);
    let template = ContactNotificationHtml {
        name: submission.name.as_ref(),
        email: submission.email.as_ref(),
        company: submission.company.as_deref().unwrap_or(NOT_PROVIDED),
        project: submission.project.as_ref(),
        submitted_at: &submitted_at,
    };

    Ok(template.render()?)
}

#[derive(thiserror::Error)]
pub enum EmailError {
    #[error("Email credentials not configured.")]
    MissingCredentials,
    #[error("Email address is not valid.")]
    InvalidAddress(#[from] lettre::address::AddressError),
    #[error("Failed to build the notification message.")]
    Message(#[from] lettre::error::Error),
    #[error("Failed to render the notification template.")]
    Template(#[from] askama::Error),
    #[error("Failed to deliver the notification through SMTP.")]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl std::fmt::Debug for EmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;

        if let Some(source) = std::error::Error::source(self) {
            write!(f, "\nCaused by:\n\t{}", source)?;
        }

        Ok(())
    }
}
