use contact_intake::config::get_configuration;
use contact_intake::startup::Application;
use contact_intake::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber(
        String::from("contact_intake"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    let config = get_configuration()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;
    let application = Application::build(config).await?;

    application.run_until_stop().await
}
