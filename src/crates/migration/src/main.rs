use env_logger::Env;
use sea_orm_migration::prelude::*;

/// Applies or reverts the schema. Reads the target from `DATABASE_URL`.
#[async_std::main]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Running schema migrations");
    cli::run_cli(migration::Migrator).await;
}
