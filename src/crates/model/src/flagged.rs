use serde::Serialize;

/// A catalog item annotated with the local favorite status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flagged<T> {
    #[serde(flatten)]
    pub item: T,
    pub is_favorite: bool,
}

impl<T> Flagged<T> {
    pub fn new(item: T, is_favorite: bool) -> Self {
        Self { item, is_favorite }
    }
}
