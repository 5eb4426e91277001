//! Merging of remote catalog results with locally stored favorites.
//!
//! Two policies exist. [`flag_favorites`] keeps the remote list as-is and marks each
//! item that is also stored locally. [`favorites_first`] puts the local items first,
//! in their own order, followed by the remote items not already present.

use crate::catalog::CatalogError;
use domain::classical_work::ClassicalWork;
use domain::manga::FavoriteManga;
use model::catalog::{CatalogManga, CatalogTrack, CatalogWork};
use model::flagged::Flagged;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Identity of an item in its remote catalog.
pub trait HasExternalId {
    fn external_id(&self) -> i64;
}

impl HasExternalId for CatalogTrack {
    fn external_id(&self) -> i64 {
        self.id
    }
}

impl HasExternalId for CatalogWork {
    fn external_id(&self) -> i64 {
        self.id
    }
}

impl HasExternalId for CatalogManga {
    fn external_id(&self) -> i64 {
        self.mal_id
    }
}

impl HasExternalId for ClassicalWork {
    fn external_id(&self) -> i64 {
        self.id.as_i64()
    }
}

impl HasExternalId for FavoriteManga {
    fn external_id(&self) -> i64 {
        self.mal_id.as_i64()
    }
}

impl<T: HasExternalId> HasExternalId for Flagged<T> {
    fn external_id(&self) -> i64 {
        self.item.external_id()
    }
}

/// Result of a reconciling query. When the remote catalog failed, `items` holds only
/// what could be built from local data and `remote_error` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled<T> {
    pub items: Vec<T>,
    pub remote_error: Option<CatalogError>,
    pub next_page: Option<u32>,
}

impl<T> Reconciled<T> {
    pub fn complete(items: Vec<T>) -> Self {
        Self {
            items,
            remote_error: None,
            next_page: None,
        }
    }

    pub fn degraded(items: Vec<T>, error: CatalogError) -> Self {
        Self {
            items,
            remote_error: Some(error),
            next_page: None,
        }
    }

    pub fn with_next_page(mut self, next_page: Option<u32>) -> Self {
        self.next_page = next_page;
        self
    }

    pub fn is_degraded(&self) -> bool {
        self.remote_error.is_some()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Reconciled<U> {
        Reconciled {
            items: self.items.into_iter().map(f).collect(),
            remote_error: self.remote_error,
            next_page: self.next_page,
        }
    }
}

/// Marks every remote item whose id is in `favorite_ids`. Order and length are kept.
pub fn flag_favorites<T: HasExternalId>(
    remote: Vec<T>,
    favorite_ids: &HashSet<i64>,
) -> Vec<Flagged<T>> {
    remote
        .into_iter()
        .map(|item| {
            let is_favorite = favorite_ids.contains(&item.external_id());
            Flagged::new(item, is_favorite)
        })
        .collect()
}

/// Local items sorted by `order`, then the remote items whose id was not seen yet.
/// Every id appears at most once; the first occurrence wins.
pub fn favorites_first<T, F>(mut local: Vec<T>, remote: Vec<T>, order: F) -> Vec<T>
where
    T: HasExternalId,
    F: FnMut(&T, &T) -> Ordering,
{
    local.sort_by(order);
    let mut seen = HashSet::with_capacity(local.len() + remote.len());
    local
        .into_iter()
        .chain(remote)
        .filter(|item| seen.insert(item.external_id()))
        .collect()
}

/// [`favorites_first`] over a remote result that may have failed. On failure the
/// sorted local items are returned alone.
pub fn merge_remote<T, F>(
    local: Vec<T>,
    remote: Result<Vec<T>, CatalogError>,
    order: F,
) -> Reconciled<T>
where
    T: HasExternalId,
    F: FnMut(&T, &T) -> Ordering,
{
    match remote {
        Ok(remote) => Reconciled::complete(favorites_first(local, remote, order)),
        Err(e) => Reconciled::degraded(favorites_first(local, Vec::new(), order), e),
    }
}
