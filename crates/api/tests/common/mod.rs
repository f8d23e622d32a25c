//! Shared helpers for HTTP tests against an in-memory database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use docengine_api::{AppState, create_router};
use docengine_core::auth::hash_password;
use docengine_db::UserRepository;
use docengine_db::entities::{approval_steps, audit_logs, documents, users};
use docengine_shared::types::UserId;
use docengine_shared::{Environment, JwtConfig, JwtService};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use serde_json::Value;
use tower::ServiceExt;

/// A router plus direct handles on its state.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new(environment: Environment) -> Self {
        let state = AppState {
            db: Arc::new(setup_db().await),
            jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
            environment,
        };
        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    pub fn db(&self) -> DatabaseConnection {
        (*self.state.db).clone()
    }

    /// Creates an active user with the given password and returns its ID.
    pub async fn user(&self, email: &str, password: &str) -> UserId {
        let hash = hash_password(password).expect("hash");
        let user = UserRepository::new(self.db())
            .create(email, &hash)
            .await
            .expect("Failed to create user");
        user.id.into()
    }

    /// Issues a bearer token for a user without going through login.
    pub fn token(&self, user_id: UserId, email: &str) -> String {
        self.state
            .jwt_service
            .generate_access_token(user_id.into_inner(), email)
            .expect("token")
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

async fn setup_db() -> DatabaseConnection {
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
