use mantis_db::DbParams;

/// Server configuration loaded from environment variables.
///
/// The Tator credentials are required; everything else has defaults
/// suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the Tator deployment.
    pub tator_host: String,
    /// Tator API token.
    pub tator_token: String,
    /// Project assumed when a request omits `project_name`.
    pub default_project: String,
    /// Connection parameters for the Tator PostgreSQL store
    /// (label-count aggregates).
    pub db: DbParams,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Default          |
    /// |-------------------------|------------------|
    /// | `HOST`                  | `0.0.0.0`        |
    /// | `PORT`                  | `8001`           |
    /// | `CORS_ORIGINS`          | (none)           |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`             |
    /// | `TATOR_API_HOST`        | — required       |
    /// | `TATOR_API_TOKEN`       | — required       |
    /// | `TATOR_DEFAULT_PROJECT` | `901902-uavs`    |
    /// | `TATOR_DB_NAME`         | `tator_online`   |
    /// | `TATOR_DB_USER`         | `django`         |
    /// | `TATOR_DB_PASSWORD`     | (empty)          |
    /// | `TATOR_DB_HOST`         | `localhost`      |
    /// | `TATOR_DB_PORT`         | `5432`           |
    ///
    /// Panics when a required credential is absent or a numeric value is
    /// malformed — misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let tator_host = std::env::var("TATOR_API_HOST")
            .expect("TATOR_API_HOST not found in environment variables!");
        let tator_token = std::env::var("TATOR_API_TOKEN")
            .expect("TATOR_API_TOKEN not found in environment variables!");

        let default_project =
            std::env::var("TATOR_DEFAULT_PROJECT").unwrap_or_else(|_| "901902-uavs".into());

        let db = DbParams {
            name: std::env::var("TATOR_DB_NAME").unwrap_or_else(|_| "tator_online".into()),
            user: std::env::var("TATOR_DB_USER").unwrap_or_else(|_| "django".into()),
            password: std::env::var("TATOR_DB_PASSWORD").unwrap_or_default(),
            host: std::env::var("TATOR_DB_HOST").unwrap_or_else(|_| "localhost".into()),
            port: std::env::var("TATOR_DB_PORT")
                .unwrap_or_else(|_| "5432".into())
                .parse()
                .expect("TATOR_DB_PORT must be a valid u16"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            tator_host,
            tator_token,
            default_project,
            db,
        }
    }
}
