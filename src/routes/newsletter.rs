use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::domain::new_newsletter_subscription::{
    NewNewsletterSubscription, NewsletterSubscriptionBody,
};
use crate::domain::newsletter_subscription::NewsletterSubscription;
use crate::routes::error::IntakeError;
use crate::store::Repository;

#[derive(Serialize)]
struct SubscribeResponse {
    success: bool,
    subscription: NewsletterSubscription,
}

#[derive(Serialize)]
struct SubscriptionsResponse {
    success: bool,
    subscriptions: Vec<NewsletterSubscription>,
}

// The same address may subscribe more than once: each request is stored as its own record
#[tracing::instrument(
    name = "Creating a newsletter subscription handler",
    skip(body, subscriptions),
    fields(subscriber_email = tracing::field::Empty)
)]
pub async fn subscribe_to_newsletter(
    body: web::Json<NewsletterSubscriptionBody>,
    subscriptions: web::Data<dyn Repository<NewsletterSubscription>>,
) -> Result<HttpResponse, IntakeError> {
    let new_subscription: NewNewsletterSubscription =
        body.into_inner().try_into().map_err(|errors| {
            tracing::info!("Validation error: {}", errors);
            IntakeError::invalid_newsletter(errors)
        })?;
    tracing::Span::current().record("subscriber_email", new_subscription.email.as_ref());

    let subscription = subscriptions
        .insert(NewsletterSubscription::create(new_subscription))
        .await
        .map_err(|err| {
            tracing::error!("Failed to store newsletter subscription: {:?}", err);
            IntakeError::internal(err)
        })?;

    Ok(HttpResponse::Ok().json(SubscribeResponse {
        success: true,
        subscription,
    }))
}

#[tracing::instrument(name = "Listing newsletter subscriptions handler", skip(subscriptions))]
pub async fn list_newsletter_subscriptions(
    subscriptions: web::Data<dyn Repository<NewsletterSubscription>>,
) -> Result<HttpResponse, IntakeError> {
    let subscriptions = subscriptions.list().await.map_err(|err| {
        tracing::error!("Failed to list newsletter subscriptions: {:?}", err);
        IntakeError::internal(err)
    })?;

    Ok(HttpResponse::Ok().json(SubscriptionsResponse {
        success: true,
        subscriptions,
    }))
}
