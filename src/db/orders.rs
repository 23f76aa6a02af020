use sqlx::PgPool;

use crate::models::{Order, OrderRow};

/// Failure modes of the order placement flow.
#[derive(Debug)]
pub enum PlaceError {
    ProductNotFound,
    SizeUnavailable,
    InsufficientStock { available: i32 },
    Db(sqlx::Error),
}

impl From<sqlx::Error> for PlaceError {
    fn from(err: sqlx::Error) -> Self {
        PlaceError::Db(err)
    }
}

pub async fn list_by_tenant(pool: &PgPool, tenant: &str) -> Result<Vec<OrderRow>, sqlx::Error> {
    sqlx::query_as::<_, OrderRow>(
        "SELECT o.id, ur.name AS customer, p.name AS product, o.order_size,
                o.order_quantity, o.status, o.total, o.created_at
         FROM orders o
         LEFT JOIN products p ON p.id = o.product_id
         LEFT JOIN user_roles ur ON ur.id = o.user_id
         WHERE o.created_by = $1
         ORDER BY o.created_at DESC",
    )
    .bind(tenant)
    .fetch_all(pool)
    .await
}

pub async fn list_by_user(pool: &PgPool, user_row_id: i64) -> Result<Vec<OrderRow>, sqlx::Error> {
    sqlx::query_as::<_, OrderRow>(
        "SELECT o.id, ur.name AS customer, p.name AS product, o.order_size,
                o.order_quantity, o.status, o.total, o.created_at
         FROM orders o
         LEFT JOIN products p ON p.id = o.product_id
         LEFT JOIN user_roles ur ON ur.id = o.user_id
         WHERE o.user_id = $1
         ORDER BY o.created_at DESC",
    )
    .bind(user_row_id)
    .fetch_all(pool)
    .await
}

pub async fn update_status(
    pool: &PgPool,
    tenant: &str,
    id: i64,
    status: &str,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "UPDATE orders SET status = $3, updated_at = now()
         WHERE id = $1 AND created_by = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant)
    .bind(status)
    .fetch_optional(pool)
    .await
}

/// Place an order: lock the size row, check stock, decrement, insert.
/// The whole flow runs in one transaction so concurrent orders for the
/// same product/size cannot oversell.
pub async fn place(
    pool: &PgPool,
    tenant: &str,
    user_row_id: i64,
    product_id: i64,
    size: &str,
    quantity: i32,
    price: Option<f64>,
    notes: Option<&str>,
) -> Result<Order, PlaceError> {
    let mut tx = pool.begin().await?;

    let product: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM products WHERE id = $1 AND created_by = $2")
            .bind(product_id)
            .bind(tenant)
            .fetch_optional(&mut *tx)
            .await?;
    if product.is_none() {
        return Err(PlaceError::ProductNotFound);
    }

    let available: Option<i32> = sqlx::query_scalar(
        "SELECT quantity FROM size_quantities WHERE product_id = $1 AND size = $2 FOR UPDATE",
    )
    .bind(product_id)
    .bind(size)
    .fetch_optional(&mut *tx)
    .await?;

    match available {
        None => return Err(PlaceError::SizeUnavailable),
        Some(q) if q < quantity => return Err(PlaceError::InsufficientStock { available: q }),
        Some(_) => {}
    }

    sqlx::query(
        "UPDATE size_quantities SET quantity = quantity - $3
         WHERE product_id = $1 AND size = $2",
    )
    .bind(product_id)
    .bind(size)
    .bind(quantity)
    .execute(&mut *tx)
    .await?;

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (user_id, product_id, order_size, order_quantity, status, total, notes, created_by)
         VALUES ($1, $2, $3, $4, 'pending', $5, $6, $7) RETURNING *",
    )
    .bind(user_row_id)
    .bind(product_id)
    .bind(size)
    .bind(quantity)
    .bind(price.map(|p| p * quantity as f64))
    .bind(notes)
    .bind(tenant)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(order)
}
