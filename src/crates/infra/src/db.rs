use log::info;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use tokio::time::Duration;

/// Opens the SQLite pool. sqlx turns foreign keys on for every connection.
/// An in-memory database gets a single connection, since every SQLite memory
/// connection is a separate database.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let in_memory = database_url.contains(":memory:");
    let mut opt = ConnectOptions::new(database_url.to_string());
    opt.max_connections(if in_memory { 1 } else { 5 })
        .min_connections(1)
        .connect_timeout(Duration::from_secs(3))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false)
        .sqlx_logging_level(log::LevelFilter::Debug);
    if in_memory {
        // a recycled connection would drop the whole database
        opt.idle_timeout(Duration::from_secs(u32::MAX as u64))
            .max_lifetime(Duration::from_secs(u32::MAX as u64));
    }

    let db = Database::connect(opt).await?;
    let backend = db.get_database_backend();
    db.execute(Statement::from_string(backend, "SELECT 1".to_owned()))
        .await?;
    info!("Connected to {}", database_url);
    Ok(db)
}
