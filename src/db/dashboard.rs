use sqlx::PgPool;

use crate::models::Order;

/// Headline numbers for the admin dashboard cards.
#[derive(Debug, sqlx::FromRow)]
pub struct StatsRow {
    pub total_products: i64,
    pub total_customers: i64,
    pub total_companies: i64,
    pub monthly_orders: i64,
    pub monthly_revenue: f64,
    pub new_products_this_week: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct MonthCount {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct TimelinePoint {
    pub month: String,
    pub new_products: i64,
    pub total_products: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct RecentSale {
    pub id: i64,
    pub total: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct MonthlySales {
    pub count: i64,
    pub total: f64,
    pub average: Option<f64>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct HeadlineStats {
    pub total_products: i64,
    pub total_users: i64,
    pub total_companies: i64,
    pub active_orders: i64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct UserOrderStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub total_value: f64,
}

#[derive(Debug, sqlx::FromRow)]
pub struct MonthTotals {
    pub month: String,
    pub orders: i64,
    pub amount: f64,
}

pub async fn stats(pool: &PgPool, tenant: &str) -> Result<StatsRow, sqlx::Error> {
    sqlx::query_as::<_, StatsRow>(
        "SELECT
            (SELECT COUNT(*) FROM products WHERE created_by = $1) AS total_products,
            (SELECT COUNT(*) FROM customers WHERE created_by = $1) AS total_customers,
            (SELECT COUNT(*) FROM representatives WHERE created_by = $1) AS total_companies,
            (SELECT COUNT(*) FROM orders WHERE created_by = $1
                AND created_at >= date_trunc('month', CURRENT_TIMESTAMP)) AS monthly_orders,
            (SELECT COALESCE(SUM(total), 0)::float8 FROM orders WHERE created_by = $1
                AND created_at >= date_trunc('month', CURRENT_TIMESTAMP)) AS monthly_revenue,
            (SELECT COUNT(*) FROM products WHERE created_by = $1
                AND created_at >= CURRENT_TIMESTAMP - INTERVAL '7 days') AS new_products_this_week",
    )
    .bind(tenant)
    .fetch_one(pool)
    .await
}

pub async fn representative_status_distribution(
    pool: &PgPool,
    tenant: &str,
) -> Result<Vec<StatusCount>, sqlx::Error> {
    sqlx::query_as::<_, StatusCount>(
        "SELECT status, COUNT(*) AS count FROM representatives
         WHERE created_by = $1 GROUP BY status ORDER BY count DESC",
    )
    .bind(tenant)
    .fetch_all(pool)
    .await
}

pub async fn products_by_fabric(
    pool: &PgPool,
    tenant: &str,
) -> Result<Vec<CategoryCount>, sqlx::Error> {
    sqlx::query_as::<_, CategoryCount>(
        "SELECT COALESCE(fabric, 'Uncategorized') AS category, COUNT(*) AS count
         FROM products WHERE created_by = $1
         GROUP BY fabric ORDER BY count DESC",
    )
    .bind(tenant)
    .fetch_all(pool)
    .await
}

pub async fn customer_growth(pool: &PgPool, tenant: &str) -> Result<Vec<MonthCount>, sqlx::Error> {
    sqlx::query_as::<_, MonthCount>(
        "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month,
                COUNT(*) AS count
         FROM customers
         WHERE created_by = $1
           AND created_at >= date_trunc('month', CURRENT_TIMESTAMP - INTERVAL '6 months')
         GROUP BY 1 ORDER BY 1",
    )
    .bind(tenant)
    .fetch_all(pool)
    .await
}

pub async fn product_timeline(
    pool: &PgPool,
    tenant: &str,
) -> Result<Vec<TimelinePoint>, sqlx::Error> {
    sqlx::query_as::<_, TimelinePoint>(
        "SELECT month,
                new_products,
                (SUM(new_products) OVER (ORDER BY month))::bigint AS total_products
         FROM (
            SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month,
                   COUNT(*) AS new_products
            FROM products
            WHERE created_by = $1
              AND created_at >= date_trunc('month', CURRENT_TIMESTAMP - INTERVAL '6 months')
            GROUP BY 1
         ) monthly
         ORDER BY month",
    )
    .bind(tenant)
    .fetch_all(pool)
    .await
}

pub async fn recent_sales(pool: &PgPool, tenant: &str) -> Result<Vec<RecentSale>, sqlx::Error> {
    sqlx::query_as::<_, RecentSale>(
        "SELECT o.id, o.total, o.created_at, ur.name, ur.email
         FROM orders o
         LEFT JOIN user_roles ur ON ur.id = o.user_id
         WHERE o.created_by = $1
           AND o.created_at >= CURRENT_TIMESTAMP - INTERVAL '30 days'
         ORDER BY o.created_at DESC
         LIMIT 10",
    )
    .bind(tenant)
    .fetch_all(pool)
    .await
}

pub async fn monthly_sales(pool: &PgPool, tenant: &str) -> Result<MonthlySales, sqlx::Error> {
    sqlx::query_as::<_, MonthlySales>(
        "SELECT COUNT(*) AS count,
                COALESCE(SUM(total), 0)::float8 AS total,
                AVG(total)::float8 AS average
         FROM orders
         WHERE created_by = $1
           AND created_at >= date_trunc('month', CURRENT_TIMESTAMP)",
    )
    .bind(tenant)
    .fetch_one(pool)
    .await
}

/// Counts for the admin landing page. "Active" orders are those not yet
/// shipped, delivered, or cancelled.
pub async fn headline(pool: &PgPool, tenant: &str) -> Result<HeadlineStats, sqlx::Error> {
    sqlx::query_as::<_, HeadlineStats>(
        "SELECT
            (SELECT COUNT(*) FROM products WHERE created_by = $1) AS total_products,
            (SELECT COUNT(*) FROM user_roles WHERE created_by = $1 AND role = 'user') AS total_users,
            (SELECT COUNT(*) FROM representatives WHERE created_by = $1 AND status = 'active') AS total_companies,
            (SELECT COUNT(*) FROM orders WHERE created_by = $1
                AND status IN ('pending', 'processing')) AS active_orders",
    )
    .bind(tenant)
    .fetch_one(pool)
    .await
}

pub async fn user_order_stats(
    pool: &PgPool,
    user_row_id: i64,
) -> Result<UserOrderStats, sqlx::Error> {
    sqlx::query_as::<_, UserOrderStats>(
        "SELECT COUNT(*) AS total_orders,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending_orders,
                COALESCE(SUM(total), 0)::float8 AS total_value
         FROM orders WHERE user_id = $1",
    )
    .bind(user_row_id)
    .fetch_one(pool)
    .await
}

pub async fn user_monthly_orders(
    pool: &PgPool,
    user_row_id: i64,
) -> Result<Vec<MonthTotals>, sqlx::Error> {
    sqlx::query_as::<_, MonthTotals>(
        "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month,
                COUNT(*) AS orders,
                COALESCE(SUM(total), 0)::float8 AS amount
         FROM orders
         WHERE user_id = $1
           AND created_at >= CURRENT_TIMESTAMP - INTERVAL '6 months'
         GROUP BY 1 ORDER BY 1",
    )
    .bind(user_row_id)
    .fetch_all(pool)
    .await
}

pub async fn user_orders_by_status(
    pool: &PgPool,
    user_row_id: i64,
) -> Result<Vec<StatusCount>, sqlx::Error> {
    sqlx::query_as::<_, StatusCount>(
        "SELECT status, COUNT(*) AS count FROM orders
         WHERE user_id = $1 GROUP BY status",
    )
    .bind(user_row_id)
    .fetch_all(pool)
    .await
}

pub async fn user_recent_orders(
    pool: &PgPool,
    user_row_id: i64,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC LIMIT 5",
    )
    .bind(user_row_id)
    .fetch_all(pool)
    .await
}
