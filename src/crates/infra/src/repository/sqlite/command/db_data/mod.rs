pub mod album;
pub mod artist;
pub mod classical_work;
pub mod favorite_manga;
pub mod track;
