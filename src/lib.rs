pub mod config;
pub mod migrate;
pub mod observability;
pub mod recipe;

pub use config::Config;
pub use pantry_db::create_pool;
