pub mod favorite_ids;
pub mod registry;
