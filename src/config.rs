use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub session_ttl_minutes: i64,
    pub uploads_dir: String,
    pub seed_demo_data: bool,
    pub reset_on_shutdown: bool,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            host: get_env_or("HOST", "0.0.0.0"),
            port: get_env_parse_or("PORT", 8000)?,
            database_url: get_env_or("DATABASE_URL", "sqlite://dossiers.db"),
            jwt_secret: get_env("JWT_SECRET")?,
            session_ttl_minutes: get_env_parse_or("SESSION_TTL_MINUTES", 120)?,
            uploads_dir: get_env_or("UPLOADS_DIR", "./static/images"),
            seed_demo_data: get_env_parse_or("SEED_DEMO_DATA", true)?,
            reset_on_shutdown: get_env_parse_or("RESET_ON_SHUTDOWN", false)?,
            secure_cookies: get_env_parse_or("SECURE_COOKIES", false)?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
