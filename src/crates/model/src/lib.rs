pub mod catalog;
pub mod favorite_track;
pub mod flagged;
