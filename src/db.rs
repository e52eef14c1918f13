//! Database connection and schema sync.

use entity::prelude::{Blog, Company, Person, User};
use sea_orm::{
    sea_query::{Table, TableCreateStatement},
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema,
};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// Open a connection pool to the configured database.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(10));

    Database::connect(options).await
}

/// Create any missing tables. With `reset`, every table is dropped first.
pub async fn sync_schema(db: &DatabaseConnection, reset: bool) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    if reset {
        tracing::warn!("Dropping all tables before schema sync");
        // blogs reference users, so drop in reverse dependency order
        let drops = [
            Table::drop().table(Blog).if_exists().to_owned(),
            Table::drop().table(Person).if_exists().to_owned(),
            Table::drop().table(Company).if_exists().to_owned(),
            Table::drop().table(User).if_exists().to_owned(),
        ];
        for statement in drops.iter() {
            db.execute(backend.build(statement)).await?;
        }
    }

    let schema = Schema::new(backend);
    let creates: [TableCreateStatement; 4] = [
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Company),
        schema.create_table_from_entity(Person),
        schema.create_table_from_entity(Blog),
    ];
    for mut statement in creates {
        statement.if_not_exists();
        db.execute(backend.build(&statement)).await?;
    }

    tracing::debug!("Database schema synchronized");
    Ok(())
}
