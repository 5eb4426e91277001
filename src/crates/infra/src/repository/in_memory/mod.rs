pub mod classical_work;
pub mod manga;
pub mod music;
