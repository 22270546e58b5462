use std::fmt::Display;
use std::str::FromStr;

use realty_core::booking::{clock, BusinessHours};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Every field except the JWT secret has a local-development default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, from the comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup.
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Opening hours and slot granularity for visit booking.
    pub booking: BusinessHours,
}

/// Read `key`, falling back to `default`, and parse it.
///
/// Panics with the variable name when the value does not parse.
fn env_or<T>(key: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_owned());
    raw.trim()
        .parse()
        .unwrap_or_else(|e| panic!("{key}='{raw}' is invalid: {e}"))
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `BOOKING_OPEN`          | `09:00`                 |
    /// | `BOOKING_CLOSE`         | `17:00`                 |
    /// | `BOOKING_SLOT_MINUTES`  | `30`                    |
    ///
    /// `JWT_SECRET` is read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on malformed values, including business hours that close
    /// before they open.
    pub fn from_env() -> Self {
        let cors_origins = env_or::<String>("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "3000"),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "30"),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", "30"),
            jwt: JwtConfig::from_env(),
            booking: booking_hours_from_env(),
        }
    }
}

fn booking_hours_from_env() -> BusinessHours {
    let open: String = env_or("BOOKING_OPEN", "09:00");
    let close: String = env_or("BOOKING_CLOSE", "17:00");
    let slot_minutes: u32 = env_or("BOOKING_SLOT_MINUTES", "30");

    let open = clock::parse(&open).unwrap_or_else(|e| panic!("BOOKING_OPEN: {e}"));
    let close = clock::parse(&close).unwrap_or_else(|e| panic!("BOOKING_CLOSE: {e}"));

    BusinessHours::new(open, close, slot_minutes)
        .unwrap_or_else(|e| panic!("Invalid booking hours: {e}"))
}
