use config::{Config, ConfigError, File};
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time;

#[derive(Debug)]
pub enum Environment {
    Development,
    Production,
}

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    // Both credentials are optional: without them every send fails fast instead of blocking startup
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub recipient: Option<String>,
    // Comma separated, e.g. "ops@example.com,sales@example.com"
    pub cc: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl Settings {
    pub fn get_address(&self) -> String {
        format!(
            "{}:{}",
            self.application.get_host(),
            self.application.get_port()
        )
    }

    pub fn set_app_port(&mut self, port: u16) {
        self.application.port = port;
    }

    pub fn clear_email_credentials(&mut self) {
        self.email_client.username = None;
        self.email_client.password = None;
    }
}

impl ApplicationSettings {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_host(&self) -> String {
        self.host.clone()
    }
}

impl EmailClientSettings {
    /// Address notifications are delivered to. Falls back to the authenticated user.
    pub fn get_recipient(&self) -> Option<String> {
        self.recipient
            .clone()
            .filter(|recipient| !recipient.trim().is_empty())
            .or_else(|| self.username.clone())
    }

    pub fn get_cc_list(&self) -> Vec<String> {
        self.cc
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn get_timeout(&self) -> time::Duration {
        time::Duration::from_millis(self.timeout_milliseconds)
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            unknown_env => Err(format!(
                "{} is not supported environment. Use either 'development' or 'production'.",
                unknown_env
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let root_path = std::env::current_dir()
        .map_err(|err| ConfigError::Message(format!("Failed to determine the current directory: {}", err)))?;
    let config_directory = root_path.join("config");
    // Uses development environment by default
    let enviroment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "development".into())
        .try_into()
        .map_err(ConfigError::Message)?;
    let config_base_filepath = config_directory.join("base");
    let config_env_filepath = config_directory.join(enviroment.as_str());

    // It merges the base configuration file with the one from the specific environment (development or production)
    let settings = Config::builder()
        .add_source(File::from(config_base_filepath).required(true))
        .add_source(File::from(config_env_filepath).required(true))
        // Merge settings from environment variables with a prefix of APP and "__" separator
        // E.g APP_EMAIL_CLIENT__PASSWORD would set Settings.email_client.password
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    tracing::info!("Application environment = {:?}", enviroment);

    // Try to convert the value from the configuration file into a Settings type
    settings.try_deserialize()
}
