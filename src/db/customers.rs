use sqlx::PgPool;

use crate::models::Customer;

pub async fn list(pool: &PgPool, tenant: &str) -> Result<Vec<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>(
        "SELECT * FROM customers WHERE created_by = $1 ORDER BY created_at DESC",
    )
    .bind(tenant)
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &PgPool, tenant: &str, id: i64) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1 AND created_by = $2")
        .bind(id)
        .bind(tenant)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    tenant: &str,
    name: &str,
    email: &str,
    industry: Option<&str>,
) -> Result<Customer, sqlx::Error> {
    sqlx::query_as::<_, Customer>(
        "INSERT INTO customers (name, email, industry, created_by)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(industry)
    .bind(tenant)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    tenant: &str,
    id: i64,
    name: &str,
    email: &str,
    industry: Option<&str>,
) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as::<_, Customer>(
        "UPDATE customers SET name = $3, email = $4, industry = $5
         WHERE id = $1 AND created_by = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant)
    .bind(name)
    .bind(email)
    .bind(industry)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, tenant: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1 AND created_by = $2")
        .bind(id)
        .bind(tenant)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
