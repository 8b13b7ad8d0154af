use poise::serenity_prelude::ApplicationId;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub discord_token: String,
    /// `None` when `CLIENT_ID` is unset or not a valid id; commands are then
    /// left unregistered.
    pub application_id: Option<ApplicationId>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let application_id = lookup("CLIENT_ID")
            .and_then(|id| id.trim().parse::<u64>().ok())
            .filter(|&id| id != 0)
            .map(ApplicationId::new);

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            discord_token,
            application_id,
            port,
        })
    }
}
