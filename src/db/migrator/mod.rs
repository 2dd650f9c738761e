use sea_orm_migration::prelude::*;

mod m20261001_create_users_and_roles;
mod m20261002_create_user_roles;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_create_users_and_roles::Migration),
            Box::new(m20261002_create_user_roles::Migration),
        ]
    }
}
