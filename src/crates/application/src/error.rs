use crate::catalog::CatalogError;
use crate::query::QueryError;
use domain::album::AlbumError;
use domain::artist::ArtistError;
use domain::classical_work::ClassicalWorkError;
use domain::manga::MangaError;
use domain::track::TrackError;

use thiserror::Error;

/// Error returned by commands and queries.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Artist error: {0}")]
    ArtistError(#[from] ArtistError),
    #[error("Album error: {0}")]
    AlbumError(#[from] AlbumError),
    #[error("Track error: {0}")]
    TrackError(#[from] TrackError),
    #[error("Classical work error: {0}")]
    ClassicalWorkError(#[from] ClassicalWorkError),
    #[error("Manga error: {0}")]
    MangaError(#[from] MangaError),
    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),
    #[error("Query error: {0}")]
    QueryError(#[from] QueryError),
    #[error("Aggregate not found: {0}: {1}")]
    AggregateNotFound(String, String),
    #[error("Unknown error: {0}")]
    UnknownError(String),
}
