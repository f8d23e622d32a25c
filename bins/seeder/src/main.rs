//! Database seeder for DocEngine development and testing.
//!
//! Seeds two approvers and a document waiting on both of them. Running it
//! again leaves existing data untouched.
//!
//! Usage: cargo run --bin seeder

use docengine_core::auth::hash_password;
use docengine_db::{DocumentRepository, UserRepository};
use docengine_shared::config::DatabaseConfig;
use docengine_shared::types::UserId;
use sea_orm::DatabaseConnection;

/// Approvers in step order.
const APPROVERS: [&str; 2] = ["first.approver@docengine.dev", "second.approver@docengine.dev"];
/// Shared development password for seeded users.
const DEV_PASSWORD: &str = "password";
/// Title of the seeded document.
const DEMO_TITLE: &str = "Demo purchase order";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set in environment"))?;

    println!("Connecting to database...");
    let db = docengine_db::connect(&DatabaseConfig {
        url,
        max_connections: 1,
        min_connections: 1,
    })
    .await?;

    println!("Seeding approvers...");
    let (approvers, created) = seed_approvers(&db).await?;

    if created {
        println!("Seeding demo document...");
        seed_document(&db, &approvers).await?;
    } else {
        println!("  Approvers already exist, skipping demo document...");
    }

    println!("Seeding complete!");
    Ok(())
}

/// Returns the approver IDs and whether any of them had to be created.
async fn seed_approvers(db: &DatabaseConnection) -> anyhow::Result<(Vec<UserId>, bool)> {
    let repo = UserRepository::new(db.clone());
    let mut ids = Vec::with_capacity(APPROVERS.len());
    let mut created = false;

    for email in APPROVERS {
        if let Some(existing) = repo.find_by_email(email).await? {
            println!("  {email} already exists, skipping...");
            ids.push(existing.id.into());
            continue;
        }

        let hash = hash_password(DEV_PASSWORD)?;
        let user = repo.create(email, &hash).await?;
        println!("  Created approver: {email}");
        ids.push(user.id.into());
        created = true;
    }

    Ok((ids, created))
}

async fn seed_document(db: &DatabaseConnection, approvers: &[UserId]) -> anyhow::Result<()> {
    let repo = DocumentRepository::new(db.clone());
    let document = repo.create(DEMO_TITLE).await?;
    let steps = repo.add_steps(document.id, approvers).await?;
    println!(
        "  Created document {} with {} approval steps",
        document.id,
        steps.len()
    );
    Ok(())
}
