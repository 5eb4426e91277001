pub mod album;
pub mod artist;
pub mod classical_work;
pub mod event;
pub mod manga;
pub mod track;
pub mod value;
