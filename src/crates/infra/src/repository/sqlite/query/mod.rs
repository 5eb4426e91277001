pub mod favorite_track;
