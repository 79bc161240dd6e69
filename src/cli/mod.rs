use anyhow::{Context, bail};
use sqlx::PgPool;
use tracing::info;

use drivewise_core::hash_password;
use drivewise_models::enums::UserRole;

/// Payment methods every deployment starts with.
pub const DEFAULT_PAYMENT_METHODS: [&str; 2] = ["cash", "bank_transfer"];

/// `(type_name, age_requirement, health_requirements, training_duration, fee)`
pub const STARTER_LICENSE_TYPES: [(&str, &str, &str, i32, i64); 3] = [
    (
        "A1",
        "18+",
        "Basic vision and hearing check",
        30,
        1_500_000,
    ),
    (
        "B1",
        "18+",
        "Vision, hearing and cardiovascular check",
        90,
        6_000_000,
    ),
    (
        "B2",
        "18+",
        "Vision, hearing and cardiovascular check",
        120,
        7_500_000,
    ),
];

pub async fn create_admin(
    db: &PgPool,
    user_name: &str,
    email: &str,
    phone_number: &str,
    password: &str,
) -> anyhow::Result<()> {
    let hashed_password = hash_password(password)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (user_name, email, phone_number, password, role)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT DO NOTHING",
    )
    .bind(user_name.trim())
    .bind(email.trim())
    .bind(phone_number.trim())
    .bind(hashed_password)
    .bind(UserRole::Admin)
    .execute(db)
    .await
    .context("Failed to insert admin user")?;

    if result.rows_affected() == 0 {
        bail!("A user with this user name or email already exists");
    }

    info!(user.name = %user_name, "Admin user created");
    Ok(())
}

/// Inserts the default payment methods and starter license types, skipping
/// any that already exist. Returns how many rows were added.
pub async fn seed_reference_data(db: &PgPool) -> anyhow::Result<u64> {
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for method in DEFAULT_PAYMENT_METHODS {
        inserted += sqlx::query(
            "INSERT INTO payment_methods (method) VALUES ($1) ON CONFLICT (method) DO NOTHING",
        )
        .bind(method)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    for (type_name, age, health, duration, fee) in STARTER_LICENSE_TYPES {
        inserted += sqlx::query(
            "INSERT INTO license_types (type_name, age_requirement, health_requirements, training_duration, fee)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (type_name) DO NOTHING",
        )
        .bind(type_name)
        .bind(age)
        .bind(health)
        .bind(duration)
        .bind(fee)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;

    info!(rows = inserted, "Reference data seeded");
    Ok(inserted)
}
