use sqlx_migrator::{Info, Migrator};

mod equivalency;
mod feedback;
pub mod inventory;
mod m0001;
mod pool;
pub mod table;

pub use equivalency::{NewEquivalency, SqliteEquivalencyStore};
pub use feedback::SqliteFeedbackStore;
pub use pool::{connect_options, create_pool};

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::M0001)])?;

    Ok(migrator)
}
