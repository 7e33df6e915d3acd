use std::env;

use thiserror::Error;

/// Errors raised while assembling the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),
}

/// Telegram Bot API credentials for order notifications.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Outbound mail API settings for the password-reset flow.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub api_url: String,
    pub from: String,
}

/// Server configuration assembled from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    pub jwt_secret: String,
    pub uploads_dir: String,
    /// Base URL used when composing links sent to users.
    pub public_url: String,
    pub telegram: Option<TelegramConfig>,
    pub mailer: Option<MailerConfig>,
}

impl ServerConfig {
    /// Read the configuration from the environment. `JWT_SECRET` is the only
    /// required variable; everything else has a sensible default or is
    /// optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "store.db".to_string());
        let address = env::var("ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);
        let uploads_dir = env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string());
        let public_url =
            env::var("PUBLIC_URL").unwrap_or_else(|_| format!("http://{address}:{port}"));

        let telegram = match (env::var("TELEGRAM_BOT_TOKEN"), env::var("TELEGRAM_CHAT_ID")) {
            (Ok(bot_token), Ok(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        let mailer = env::var("MAILER_URL").ok().map(|api_url| MailerConfig {
            api_url,
            from: env::var("MAILER_FROM").unwrap_or_else(|_| "no-reply@localhost".to_string()),
        });

        Ok(Self {
            database_url,
            address,
            port,
            jwt_secret,
            uploads_dir,
            public_url,
            telegram,
            mailer,
        })
    }
}
