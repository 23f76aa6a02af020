use sqlx::PgPool;

use crate::models::UserRole;

pub async fn find_by_user_id(pool: &PgPool, user_id: &str) -> Result<Option<UserRole>, sqlx::Error> {
    sqlx::query_as::<_, UserRole>("SELECT * FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// The role check behind every admin-only surface: a row for this
/// provider ID with role 'admin'.
pub async fn find_admin(pool: &PgPool, user_id: &str) -> Result<Option<UserRole>, sqlx::Error> {
    sqlx::query_as::<_, UserRole>("SELECT * FROM user_roles WHERE user_id = $1 AND role = 'admin'")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    user_id: Option<&str>,
    email: &str,
    name: &str,
    role: &str,
    industry: Option<&str>,
    created_by: Option<&str>,
) -> Result<UserRole, sqlx::Error> {
    sqlx::query_as::<_, UserRole>(
        "INSERT INTO user_roles (user_id, email, name, role, industry, created_by)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(user_id)
    .bind(email)
    .bind(name)
    .bind(role)
    .bind(industry)
    .bind(created_by)
    .fetch_one(pool)
    .await
}

pub async fn list_by_tenant_and_role(
    pool: &PgPool,
    tenant: &str,
    role: &str,
) -> Result<Vec<UserRole>, sqlx::Error> {
    sqlx::query_as::<_, UserRole>(
        "SELECT * FROM user_roles WHERE created_by = $1 AND role = $2 ORDER BY created_at DESC",
    )
    .bind(tenant)
    .bind(role)
    .fetch_all(pool)
    .await
}

pub async fn list_by_tenant(pool: &PgPool, tenant: &str) -> Result<Vec<UserRole>, sqlx::Error> {
    sqlx::query_as::<_, UserRole>(
        "SELECT * FROM user_roles WHERE created_by = $1
         ORDER BY last_login_at DESC NULLS LAST",
    )
    .bind(tenant)
    .fetch_all(pool)
    .await
}

pub async fn set_role(
    pool: &PgPool,
    tenant: &str,
    id: i64,
    role: &str,
) -> Result<Option<UserRole>, sqlx::Error> {
    sqlx::query_as::<_, UserRole>(
        "UPDATE user_roles SET role = $3 WHERE id = $1 AND created_by = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant)
    .bind(role)
    .fetch_optional(pool)
    .await
}

pub async fn delete_user(pool: &PgPool, tenant: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM user_roles WHERE id = $1 AND created_by = $2 AND role = 'user'")
            .bind(id)
            .bind(tenant)
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}

/// Link a provider user ID to the role row seeded with this email.
/// Applied from the provider's user.created webhook.
pub async fn link_user_id(pool: &PgPool, email: &str, user_id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE user_roles SET user_id = $2 WHERE email = $1")
        .bind(email)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn record_activity(pool: &PgPool, user_id: &str, ip: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE user_roles SET last_login_at = now(), ip_address = $2 WHERE user_id = $1")
        .bind(user_id)
        .bind(ip)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn set_location(
    pool: &PgPool,
    user_id: &str,
    location: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE user_roles SET location = $2 WHERE user_id = $1")
        .bind(user_id)
        .bind(location)
        .execute(pool)
        .await?;
    Ok(())
}

/// An admin's own row plus, when it inherits from a parent admin, the
/// parent's display name.
pub async fn find_admin_with_parent(
    pool: &PgPool,
    user_id: &str,
) -> Result<Option<(UserRole, Option<String>)>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRole>(
        "SELECT * FROM user_roles WHERE user_id = $1 AND role = 'admin'",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let Some(admin) = row else { return Ok(None) };

    let parent_name = match admin.inherit_from.as_deref() {
        Some(parent_id) => {
            sqlx::query_scalar::<_, String>("SELECT name FROM user_roles WHERE user_id = $1")
                .bind(parent_id)
                .fetch_optional(pool)
                .await?
        }
        None => None,
    };

    Ok(Some((admin, parent_name)))
}
