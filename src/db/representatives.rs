use sqlx::PgPool;

use crate::models::Representative;

/// Representative fields shared by create and update.
#[derive(Debug, Clone)]
pub struct RepresentativeFields<'a> {
    pub company_name: &'a str,
    pub name: &'a str,
    pub designation: Option<&'a str>,
    pub email: &'a str,
    pub phone_number: Option<&'a str>,
    pub whatsapp_number: Option<&'a str>,
    pub address: Option<&'a str>,
    pub cnic_number: Option<&'a str>,
    pub status: &'a str,
}

pub async fn list(pool: &PgPool, tenant: &str) -> Result<Vec<Representative>, sqlx::Error> {
    sqlx::query_as::<_, Representative>(
        "SELECT * FROM representatives WHERE created_by = $1 ORDER BY created_at DESC",
    )
    .bind(tenant)
    .fetch_all(pool)
    .await
}

pub async fn find(
    pool: &PgPool,
    tenant: &str,
    id: i64,
) -> Result<Option<Representative>, sqlx::Error> {
    sqlx::query_as::<_, Representative>(
        "SELECT * FROM representatives WHERE id = $1 AND created_by = $2",
    )
    .bind(id)
    .bind(tenant)
    .fetch_optional(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    tenant: &str,
    fields: &RepresentativeFields<'_>,
) -> Result<Representative, sqlx::Error> {
    sqlx::query_as::<_, Representative>(
        "INSERT INTO representatives (
            company_name, name, designation, email, phone_number,
            whatsapp_number, address, cnic_number, status, created_by
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
    )
    .bind(fields.company_name)
    .bind(fields.name)
    .bind(fields.designation)
    .bind(fields.email)
    .bind(fields.phone_number)
    .bind(fields.whatsapp_number)
    .bind(fields.address)
    .bind(fields.cnic_number)
    .bind(fields.status)
    .bind(tenant)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    tenant: &str,
    id: i64,
    fields: &RepresentativeFields<'_>,
) -> Result<Option<Representative>, sqlx::Error> {
    sqlx::query_as::<_, Representative>(
        "UPDATE representatives SET
            company_name = $3, name = $4, designation = $5, email = $6,
            phone_number = $7, whatsapp_number = $8, address = $9,
            cnic_number = $10, status = $11, updated_at = now()
         WHERE id = $1 AND created_by = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant)
    .bind(fields.company_name)
    .bind(fields.name)
    .bind(fields.designation)
    .bind(fields.email)
    .bind(fields.phone_number)
    .bind(fields.whatsapp_number)
    .bind(fields.address)
    .bind(fields.cnic_number)
    .bind(fields.status)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, tenant: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM representatives WHERE id = $1 AND created_by = $2")
        .bind(id)
        .bind(tenant)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
