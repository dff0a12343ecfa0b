pub use sea_orm_migration::prelude::*;
mod enums;
mod m20250301_000001_create_users_and_teams;
mod m20250301_000002_create_meets_and_scoring;
mod m20250315_000003_create_seasons;
mod macros;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_and_teams::Migration),
            Box::new(m20250301_000002_create_meets_and_scoring::Migration),
            Box::new(m20250315_000003_create_seasons::Migration),
        ]
    }
}
