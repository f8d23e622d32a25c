//! User repository for database operations.

use chrono::Utc;
use docengine_shared::types::UserId;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
};

use crate::entities::users;

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Another user already has this email.
    #[error("Email '{0}' is already registered")]
    EmailTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// User repository for lookups and creation.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email, ignoring case.
    ///
    /// `email` must already be normalized (trimmed, lowercased).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(users::Column::Email))).eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Creates an active user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmailTaken` if the normalized email is in use,
    /// including when a concurrent insert wins the unique index.
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<users::Model, UserError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(UserError::EmailTaken(email.to_string()));
        }

        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            is_active: Set(true),
            created_at: Set(Utc::now().into()),
        };

        user.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => UserError::EmailTaken(email.to_string()),
            _ => UserError::Database(e),
        })
    }

    /// Enables or disables a user.
    pub async fn set_active(&self, id: UserId, is_active: bool) -> Result<users::Model, DbErr> {
        users::ActiveModel {
            id: Set(id.into_inner()),
            is_active: Set(is_active),
            ..Default::default()
        }
        .update(&self.db)
        .await
    }
}
