//! Read-only aggregate queries against Tator's PostgreSQL store.
//!
//! The annotation service itself has no count-grouped-by-label endpoint,
//! so label reports go straight to the `public.main_localization` table.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod labels;

pub use labels::LabelCountRepo;

pub type DbPool = sqlx::PgPool;

/// Connection parameters for the Tator database.
#[derive(Debug, Clone)]
pub struct DbParams {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

/// Create a lazily-connecting pool.
///
/// No connection is opened until the first aggregate query runs, so the
/// service starts (and the annotation endpoints keep working) even when
/// the aggregate database is unreachable.
pub fn create_pool(params: &DbParams) -> DbPool {
    let options = PgConnectOptions::new()
        .host(&params.host)
        .port(params.port)
        .database(&params.name)
        .username(&params.user)
        .password(&params.password);

    PgPoolOptions::new()
        .max_connections(5)
        .connect_lazy_with(options)
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
