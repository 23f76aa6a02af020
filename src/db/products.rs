use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::ProductWithSizes;

/// Product fields shared by create and update.
#[derive(Debug, Clone)]
pub struct ProductFields<'a> {
    pub name: &'a str,
    pub style: Option<&'a str>,
    pub fabric: Option<&'a str>,
    pub vendor: Option<&'a str>,
    pub po_date: Option<NaiveDate>,
    pub image: Option<&'a str>,
}

const SELECT_WITH_SIZES: &str = "SELECT p.id, p.name, p.style, p.fabric, p.vendor, p.po_date, p.image, p.created_at,
        COALESCE(
            jsonb_agg(
                jsonb_build_object('size', sq.size, 'quantity', sq.quantity)
                ORDER BY sq.size
            ) FILTER (WHERE sq.id IS NOT NULL),
            '[]'::jsonb
        ) AS sizes
     FROM products p
     LEFT JOIN size_quantities sq ON sq.product_id = p.id";

pub async fn list(pool: &PgPool, tenant: &str) -> Result<Vec<ProductWithSizes>, sqlx::Error> {
    sqlx::query_as::<_, ProductWithSizes>(&format!(
        "{SELECT_WITH_SIZES} WHERE p.created_by = $1 GROUP BY p.id ORDER BY p.id DESC"
    ))
    .bind(tenant)
    .fetch_all(pool)
    .await
}

pub async fn find(
    pool: &PgPool,
    tenant: &str,
    id: i64,
) -> Result<Option<ProductWithSizes>, sqlx::Error> {
    sqlx::query_as::<_, ProductWithSizes>(&format!(
        "{SELECT_WITH_SIZES} WHERE p.created_by = $1 AND p.id = $2 GROUP BY p.id"
    ))
    .bind(tenant)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Products that still have stock in at least one size, with only the
/// in-stock sizes listed.
pub async fn list_available(
    pool: &PgPool,
    tenant: &str,
) -> Result<Vec<ProductWithSizes>, sqlx::Error> {
    sqlx::query_as::<_, ProductWithSizes>(
        "SELECT p.id, p.name, p.style, p.fabric, p.vendor, p.po_date, p.image, p.created_at,
            jsonb_agg(
                jsonb_build_object('size', sq.size, 'quantity', sq.quantity)
                ORDER BY sq.size
            ) AS sizes
         FROM products p
         JOIN size_quantities sq ON sq.product_id = p.id AND sq.quantity > 0
         WHERE p.created_by = $1
         GROUP BY p.id
         ORDER BY p.created_at DESC",
    )
    .bind(tenant)
    .fetch_all(pool)
    .await
}

/// Insert a product and its size rows in one transaction. Sizes with a
/// quantity of zero or less are not persisted.
pub async fn create(
    pool: &PgPool,
    tenant: &str,
    fields: &ProductFields<'_>,
    sizes: &HashMap<String, i32>,
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO products (name, style, fabric, vendor, po_date, image, created_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    )
    .bind(fields.name)
    .bind(fields.style)
    .bind(fields.fabric)
    .bind(fields.vendor)
    .bind(fields.po_date)
    .bind(fields.image)
    .bind(tenant)
    .fetch_one(&mut *tx)
    .await?;

    insert_sizes(&mut tx, id, sizes).await?;

    tx.commit().await?;
    Ok(id)
}

/// Update a product and replace its size rows. Returns false when the
/// product does not exist within the tenant.
pub async fn update(
    pool: &PgPool,
    tenant: &str,
    id: i64,
    fields: &ProductFields<'_>,
    sizes: &HashMap<String, i32>,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated: Option<(i64,)> = sqlx::query_as(
        "UPDATE products SET name = $3, style = $4, fabric = $5, vendor = $6, po_date = $7, image = $8
         WHERE id = $1 AND created_by = $2 RETURNING id",
    )
    .bind(id)
    .bind(tenant)
    .bind(fields.name)
    .bind(fields.style)
    .bind(fields.fabric)
    .bind(fields.vendor)
    .bind(fields.po_date)
    .bind(fields.image)
    .fetch_optional(&mut *tx)
    .await?;

    if updated.is_none() {
        return Ok(false);
    }

    sqlx::query("DELETE FROM size_quantities WHERE product_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    insert_sizes(&mut tx, id, sizes).await?;

    tx.commit().await?;
    Ok(true)
}

pub async fn delete(pool: &PgPool, tenant: &str, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1 AND created_by = $2")
        .bind(id)
        .bind(tenant)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

async fn insert_sizes(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    product_id: i64,
    sizes: &HashMap<String, i32>,
) -> Result<(), sqlx::Error> {
    for (size, quantity) in sizes {
        if *quantity > 0 {
            sqlx::query(
                "INSERT INTO size_quantities (product_id, size, quantity) VALUES ($1, $2, $3)",
            )
            .bind(product_id)
            .bind(size)
            .bind(quantity)
            .execute(&mut **tx)
            .await?;
        }
    }
    Ok(())
}
