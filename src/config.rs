use crate::AppOptions;
use crate::session::DEFAULT_IDLE_TIMEOUT;
use std::env;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite:tangocho.db";

/// bcrypt rejects costs outside this range.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub bcrypt_cost: u32,
    pub session_idle_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bcrypt_cost: parse_bcrypt_cost(env::var("BCRYPT_COST").ok().as_deref()),
            session_idle_timeout: parse_idle_minutes(
                env::var("SESSION_IDLE_MINUTES").ok().as_deref(),
            ),
        }
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            bcrypt_cost: self.bcrypt_cost,
            session_idle_timeout: self.session_idle_timeout,
        }
    }

    pub fn addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

pub fn parse_bcrypt_cost(raw: Option<&str>) -> u32 {
    raw.and_then(|c| c.trim().parse::<u32>().ok())
        .map(|c| c.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST))
        .unwrap_or(bcrypt::DEFAULT_COST)
}

/// Session idle timeout in whole minutes; zero or junk means the default.
pub fn parse_idle_minutes(raw: Option<&str>) -> Duration {
    raw.and_then(|m| m.trim().parse::<u64>().ok())
        .filter(|&m| m > 0)
        .map(|m| Duration::from_secs(m * 60))
        .unwrap_or(DEFAULT_IDLE_TIMEOUT)
}
