use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Process-level settings read once at startup.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub skip_migrations: bool,
    pub bootstrap_admin: Option<AdminSeed>,
    pub http: HttpConfig,
}

/// Admin account created at startup when `ADMIN_USERNAME`, `ADMIN_EMAIL` and
/// `ADMIN_PASSWORD` are all set.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Settings that shape the router's middleware stack.
#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub allowed_origins: Vec<String>,
    /// Per-IP rate limiting on login and register. Needs peer addresses, so
    /// the server must be run with connect info.
    pub auth_rate_limit: bool,
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            auth_rate_limit: true,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = HttpConfig::default();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .context("PORT must be a valid port number")?,
            skip_migrations: flag("SKIP_MIGRATIONS", false),
            bootstrap_admin: admin_seed(),
            http: HttpConfig {
                allowed_origins: env::var("ALLOWED_ORIGINS")
                    .map(|s| parse_origins(&s))
                    .unwrap_or(defaults.allowed_origins),
                auth_rate_limit: flag("AUTH_RATE_LIMIT", defaults.auth_rate_limit),
                request_timeout: defaults.request_timeout,
            },
        })
    }
}

fn admin_seed() -> Option<AdminSeed> {
    let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
    Some(AdminSeed {
        username: var("ADMIN_USERNAME")?,
        email: var("ADMIN_EMAIL")?,
        password: var("ADMIN_PASSWORD")?,
    })
}

fn flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
