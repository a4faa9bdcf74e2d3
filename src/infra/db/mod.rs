//! Database connection and initialization.

use bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, IndexModel};

use crate::config::{Config, COLLECTION_USERS, COLLECTION_VOLUNTEERS};
use crate::errors::AppResult;

/// Database wrapper for connection management.
///
/// The MongoDB client pools connections internally; one instance is built at
/// startup and cloned into every repository.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database: mongodb::Database,
}

impl Database {
    /// Connect using the Stable API (v1, strict) and verify the deployment
    /// answers a ping.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.database_url).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options)?;
        let database = client.database(&config.database_name);
        let db = Self { client, database };

        db.ping().await?;
        tracing::info!(database = %config.database_name, "Pinged deployment, MongoDB connection ready");

        db.ensure_indexes().await;

        Ok(db)
    }

    /// Unique `email` indexes backing one user and one volunteer application
    /// per address. Documents without a string `email` are left out of the index.
    ///
    /// A failure (for example duplicates already stored) is logged and the
    /// lookup-before-insert checks remain the only guard.
    async fn ensure_indexes(&self) {
        for collection in [COLLECTION_USERS, COLLECTION_VOLUNTEERS] {
            let index = IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .name(format!("uniq_{}_email", collection))
                        .unique(true)
                        .partial_filter_expression(doc! { "email": { "$type": "string" } })
                        .build(),
                )
                .build();

            match self.collection::<Document>(collection).create_index(index).await {
                Ok(_) => tracing::debug!(%collection, "Unique email index ready"),
                Err(e) => tracing::warn!(%collection, error = %e, "Could not create unique email index"),
            }
        }
    }

    /// Typed handle on a collection of this database.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    /// Check connectivity with the `ping` admin command.
    pub async fn ping(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
