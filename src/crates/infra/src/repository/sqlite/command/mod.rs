pub mod album;
pub mod artist;
pub mod classical_work;
pub mod db_data;
pub mod manga;
pub mod track;
