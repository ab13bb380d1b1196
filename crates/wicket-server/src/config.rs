//! Server configuration.
//!
//! The configuration surface is deliberately small: the database
//! connection parameters and the session-signing secret, all read from
//! the environment. Bind address and session lifetime are fixed
//! constants, not tunables.

use anyhow::Context as _;

/// Address the HTTP server binds to.
pub const BIND_ADDR: &str = "0.0.0.0:3000";

/// Server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database host.
    pub db_host: String,
    /// Database port.
    pub db_port: u16,
    /// Database user.
    pub db_user: String,
    /// Database password.
    pub db_password: String,
    /// Database name.
    pub db_database: String,
    /// Secret used to sign session cookies.
    pub session_secret: String,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// `DB_USER`, `DB_PASSWORD`, `DB_DATABASE`, and `SESSION_SECRET` are
    /// required; `DB_HOST` defaults to `localhost` and `DB_PORT` to
    /// `5432`. A `.env` file is honored if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or `DB_PORT`
    /// is not a valid port number.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let db_host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let db_port = std::env::var("DB_PORT")
            .unwrap_or_else(|_| "5432".to_string())
            .parse()
            .context("DB_PORT must be a valid port number")?;

        let db_user = std::env::var("DB_USER").context("DB_USER environment variable is required")?;
        let db_password =
            std::env::var("DB_PASSWORD").context("DB_PASSWORD environment variable is required")?;
        let db_database =
            std::env::var("DB_DATABASE").context("DB_DATABASE environment variable is required")?;
        let session_secret = std::env::var("SESSION_SECRET")
            .context("SESSION_SECRET environment variable is required")?;

        Ok(Self {
            db_host,
            db_port,
            db_user,
            db_password,
            db_database,
            session_secret,
        })
    }

    /// Returns the PostgreSQL connection URL.
    #[must_use]
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_database
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_assembly() {
        let config = AppConfig {
            db_host: "db.internal".to_string(),
            db_port: 5433,
            db_user: "wicket".to_string(),
            db_password: "pw".to_string(),
            db_database: "wicket".to_string(),
            session_secret: "secret".to_string(),
        };

        assert_eq!(
            config.database_url(),
            "postgres://wicket:pw@db.internal:5433/wicket"
        );
    }
}
