use std::time::Duration;

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

use crate::config::DatabaseConfig;
use crate::constants::MEMORY_DATABASE_URL;
use crate::entities::{account, config};

/// Storage manager holding the shared database connection pool.
#[derive(Clone, Debug)]
pub struct Storage {
    pub conn: DatabaseConnection,
}

impl Storage {
    /// Open the database described by `config` and make sure the schema exists.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .sqlx_logging(config.sqlx_logging);

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to open database: {}", config.url))?;

        let storage = Self { conn };
        storage.init_schema().await?;
        log::info!("Storage ready at {}", config.url);
        Ok(storage)
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to exactly one connection.
    pub async fn connect_memory() -> Result<Self> {
        let config = DatabaseConfig {
            url: MEMORY_DATABASE_URL.to_string(),
            max_connections: 1,
            min_connections: 1,
            sqlx_logging: false,
            ..DatabaseConfig::default()
        };
        Self::connect(&config).await
    }

    /// Create tables and indexes that do not exist yet.
    async fn init_schema(&self) -> Result<()> {
        self.create_table(account::Entity).await?;
        self.create_table(config::Entity).await?;
        Ok(())
    }

    async fn create_table<E>(&self, entity: E) -> Result<()>
    where
        E: EntityTrait,
    {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut table = schema.create_table_from_entity(entity);
        table.if_not_exists();
        self.conn
            .execute(backend.build(&table))
            .await
            .with_context(|| format!("Failed to create table {}", entity.table_name()))?;

        for mut index in schema.create_index_from_entity(entity) {
            index.if_not_exists();
            self.conn.execute(backend.build(&index)).await?;
        }
        Ok(())
    }

    /// Close the pool, waiting for in-flight statements.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}
