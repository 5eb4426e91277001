use thiserror::Error;

pub mod classical;
pub mod dao;
pub mod manga;
pub mod music;

/// Errors of the read side.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    DbError(String),
}
