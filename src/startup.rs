use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::config::Settings;
use crate::domain::contact_submission::ContactSubmission;
use crate::domain::newsletter_subscription::NewsletterSubscription;
use crate::email_client::{ContactNotifier, EmailClient};
use crate::routes::{
    health_check, json_config, list_contact_submissions, list_newsletter_subscriptions,
    method_not_allowed, submit_contact, subscribe_to_newsletter, INVALID_EMAIL,
    INVALID_FORM_DATA,
};
use crate::store::{InMemoryRepository, Repository};

/// Everything the handlers share. Each part is a trait object so tests and
/// future backends can replace it.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn Repository<ContactSubmission>>,
    pub subscriptions: Arc<dyn Repository<NewsletterSubscription>>,
    pub notifier: Arc<dyn ContactNotifier>,
}

impl AppState {
    /// Process-lifetime stores and the configured SMTP client.
    pub fn from_settings(config: &Settings) -> Result<Self, std::io::Error> {
        let email_client = EmailClient::new(&config.email_client).map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid email client configuration: {:?}", err),
            )
        })?;

        if email_client.notifications_enabled() {
            tracing::info!("Contact notifications are sent through {}", config.email_client.host);
        } else {
            tracing::warn!("Email credentials not configured, contact notifications are disabled");
        }

        Ok(AppState {
            contacts: Arc::new(InMemoryRepository::<ContactSubmission>::new()),
            subscriptions: Arc::new(InMemoryRepository::<NewsletterSubscription>::new()),
            notifier: Arc::new(email_client),
        })
    }
}

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let state = AppState::from_settings(&config)?;

        Self::build_with_state(config, state).await
    }

    pub async fn build_with_state(config: Settings, state: AppState) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();

        tracing::info!("Server listening on {}:{}", config.application.get_host(), port);

        let server = run(listener, state)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, state: AppState) -> Result<Server, std::io::Error> {
    let contacts = web::Data::from(state.contacts);
    let subscriptions = web::Data::from(state.subscriptions);
    let notifier = web::Data::from(state.notifier);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/api/contact")
                    .app_data(json_config(INVALID_FORM_DATA))
                    .route(web::post().to(submit_contact))
                    .route(web::get().to(list_contact_submissions))
                    .default_service(web::to(method_not_allowed)),
            )
            .service(
                web::resource("/api/newsletter")
                    .app_data(json_config(INVALID_EMAIL))
                    .route(web::post().to(subscribe_to_newsletter))
                    .route(web::get().to(list_newsletter_subscriptions))
                    .default_service(web::to(method_not_allowed)),
            )
            .app_data(contacts.clone())
            .app_data(subscriptions.clone())
            .app_data(notifier.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
