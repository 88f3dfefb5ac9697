pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250901_000001_create_labubu; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250901_000001_create_labubu::Migration)]
    }
}

/// Apply every pending migration.
///
/// Called once at startup, before the server binds. Logs how many
/// migrations were pending so a deploy leaves a trace of schema changes.
pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    let pending = match Migrator::get_pending_migrations(db).await {
        Ok(pending) => pending.len(),
        // Migration table doesn't exist yet: everything is pending
        Err(DbErr::Exec(_)) => Migrator::migrations().len(),
        Err(e) => return Err(e),
    };

    tracing::info!(
        backend = ?db.get_database_backend(),
        pending,
        "applying migrations"
    );

    match Migrator::up(db, None).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!(error = %e, "migration failed");
            Err(e)
        }
    }
}

/// Count the number of migrations that have been applied to the database.
/// Returns 0 if the migration table doesn't exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Get the version string of the latest applied migration.
/// Returns None if no migrations have been applied or the migration table doesn't exist.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
