//! Ping command - Verifies the database is reachable.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the ping command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    db.ping().await?;
    println!("Pinged your deployment. You successfully connected to MongoDB!");
    Ok(())
}
