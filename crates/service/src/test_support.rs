#![cfg(test)]
use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::auth::{password::HashCost, AuthConfig};

/// Fresh migrated in-memory database per test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    Ok(models::db::connect_sqlite_memory().await?)
}

/// Auth config with the cheapest hash cost so tests stay fast.
pub fn fast_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: "test-secret".into(), token_ttl: Duration::hours(24), hash_cost: HashCost::minimal() }
}
