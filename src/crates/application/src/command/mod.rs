pub mod classical;
pub mod manga;
pub mod music;
pub mod shared;
