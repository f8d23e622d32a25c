//! Shared setup for repository tests on in-memory SQLite.

#![allow(dead_code)]

use docengine_db::entities::{approval_steps, audit_logs, documents, users};
use docengine_db::UserRepository;
use docengine_shared::types::UserId;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

/// Opens a fresh single-connection in-memory database with all tables created.
///
/// One connection keeps the in-memory database alive and makes concurrent
/// transactions queue up behind each other.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");

    create_table(&db, users::Entity).await;
    create_table(&db, documents::Entity).await;
    create_table(&db, approval_steps::Entity).await;
    create_table(&db, audit_logs::Entity).await;

    db
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) {
    let backend = db.get_database_backend();
    let statement = Schema::new(backend).create_table_from_entity(entity);
    db.execute(backend.build(&statement))
        .await
        .expect("Failed to create table");
}

/// Creates an active user and returns its ID.
pub async fn create_user(db: &DatabaseConnection, email: &str) -> UserId {
    let user = UserRepository::new(db.clone())
        .create(email, "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
        .await
        .expect("Failed to create user");
    user.id.into()
}
