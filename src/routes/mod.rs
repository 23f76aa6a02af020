pub mod admin;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod representatives;
pub mod users;
pub mod webhooks;

use axum::Router;
use axum::routing::{delete, get, patch, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Products (admin, tenant-scoped)
        .route("/api/products", get(products::list).post(products::create))
        .route(
            "/api/products/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::delete),
        )
        // Customers
        .route(
            "/api/customers",
            get(customers::list).post(customers::create),
        )
        .route(
            "/api/customers/{id}",
            get(customers::get)
                .put(customers::update)
                .delete(customers::delete),
        )
        // Representatives
        .route(
            "/api/representatives",
            get(representatives::list).post(representatives::create),
        )
        .route(
            "/api/representatives/{id}",
            get(representatives::get)
                .put(representatives::update)
                .delete(representatives::delete),
        )
        // Orders (admin)
        .route("/api/orders", get(orders::list))
        .route("/api/orders/{id}", patch(orders::update_status))
        // User-facing
        .route("/api/user/products", get(users::available_products))
        .route(
            "/api/user/orders",
            get(users::list_orders).post(users::place_order),
        )
        .route("/api/user/dashboard", get(users::dashboard))
        // Role probe
        .route("/api/check-admin", get(admin::check_admin))
        // Admin management
        .route(
            "/api/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route("/api/admin/users/{id}", delete(admin::delete_user))
        .route(
            "/api/admin/admins",
            get(admin::list_admins).post(admin::create_admin),
        )
        .route("/api/admin/admins/{id}", patch(admin::set_admin_access))
        .route("/api/admin/user-locations", get(admin::user_locations))
        .route("/api/admin/dashboard", get(admin::dashboard))
        // Dashboards
        .route("/api/dashboard/stats", get(dashboard::stats))
        .route("/api/dashboard/charts", get(dashboard::charts))
        .route("/api/dashboard/recent-sales", get(dashboard::recent_sales))
}

pub fn webhook_routes() -> Router<SharedState> {
    Router::new().route("/api/webhooks/identity", post(webhooks::identity))
}
