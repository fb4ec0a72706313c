use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema, Statement};

use crate::{entities::movie, error::AppResult};

pub async fn connect_and_prepare(options: impl Into<ConnectOptions>) -> AppResult<DatabaseConnection> {
    let db = Database::connect(options).await?;

    pragma(&db, "PRAGMA journal_mode=WAL").await?;
    pragma(&db, "PRAGMA synchronous=NORMAL").await?;

    create_tables(&db).await?;
    Ok(db)
}

async fn pragma(db: &DatabaseConnection, sql: &str) -> AppResult<()> {
    db.execute(Statement::from_string(db.get_database_backend(), sql.to_string())).await?;
    Ok(())
}

/// Creates the `movie` table from its entity definition if it is missing.
async fn create_tables(db: &DatabaseConnection) -> AppResult<()> {
    let backend = db.get_database_backend();
    let mut table = Schema::new(backend).create_table_from_entity(movie::Entity);
    table.if_not_exists();
    db.execute(backend.build(&table)).await?;
    Ok(())
}

#[cfg(test)]
pub async fn memory() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    connect_and_prepare(options).await.expect("in-memory database")
}
