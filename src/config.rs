use std::fmt::Display;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

const DEFAULT_DATABASE_PATH: &str = "data/database.db";
const DEFAULT_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8080";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub address: IpAddr,
    pub port: u16,
}

#[derive(thiserror::Error, Debug)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

impl Config {
    /// Reads the configuration from the environment, after loading a `.env` file if there is one.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            database_path: parse_var(&lookup, "DATABASE_PATH", DEFAULT_DATABASE_PATH)?,
            address: parse_var(&lookup, "ADDRESS", DEFAULT_ADDRESS)?,
            port: parse_var(&lookup, "PORT", DEFAULT_PORT)?,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_owned()
    });

    value.trim().parse().map_err(|error: T::Err| ConfigError {
        key,
        reason: error.to_string(),
        value,
    })
}
