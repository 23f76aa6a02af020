use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use stitchdesk::auth::session::{self, Claims};
use stitchdesk::config::Config;
use stitchdesk::webhook;

pub const SESSION_SECRET: &str = "test-session-secret-that-is-long-enough";
pub const WEBHOOK_SECRET: &str = "whsec_dGVzdC13ZWJob29rLXNlY3JldC0zMmJ5dGU=";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Mint a session token the way the identity provider would.
    pub fn token(&self, provider_id: &str) -> String {
        session::encode_token(&Claims::new(provider_id), SESSION_SECRET)
            .expect("token encode failed")
    }

    /// Seed an admin role row and return a session token for it.
    /// `subject` is the prefix-stripped provider ID.
    pub async fn seed_admin(&self, subject: &str, email: &str) -> String {
        sqlx::query(
            "INSERT INTO user_roles (user_id, email, name, role) VALUES ($1, $2, $3, 'admin')",
        )
        .bind(subject)
        .bind(email)
        .bind("Admin")
        .execute(&self.pool)
        .await
        .expect("seed admin failed");

        self.token(&format!("user_{subject}"))
    }

    /// Seed a user role row owned by `tenant` and return its token.
    pub async fn seed_user(&self, subject: &str, email: &str, tenant: &str) -> String {
        sqlx::query(
            "INSERT INTO user_roles (user_id, email, name, role, created_by)
             VALUES ($1, $2, $3, 'user', $4)",
        )
        .bind(subject)
        .bind(email)
        .bind("User")
        .bind(tenant)
        .execute(&self.pool)
        .await
        .expect("seed user failed");

        self.token(&format!("user_{subject}"))
    }

    /// Create a product with sizes, return its id.
    pub async fn create_product(&self, token: &str, name: &str, sizes: Value) -> i64 {
        let (body, status) = self
            .post_auth(
                "/api/products",
                token,
                &json!({ "name": name, "fabric": "Cotton", "size_quantities": sizes }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create product failed: {body}");
        body["id"].as_i64().expect("product id missing")
    }

    /// Sign a webhook body the way the identity provider would and
    /// POST it. Returns (body, status).
    pub async fn post_webhook(&self, event: &Value) -> (Value, StatusCode) {
        let payload = serde_json::to_vec(event).unwrap();
        let msg_id = "msg_test_1";
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = webhook::sign(WEBHOOK_SECRET, msg_id, &timestamp, &payload)
            .expect("webhook sign failed");

        let resp = self
            .client
            .post(self.url("/api/webhooks/identity"))
            .header("svix-id", msg_id)
            .header("svix-timestamp", &timestamp)
            .header("svix-signature", signature)
            .header("content-type", "application/json")
            .body(payload)
            .send()
            .await
            .expect("webhook request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated POST request with JSON body.
    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated PUT request with JSON body.
    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated PATCH request with JSON body.
    pub async fn patch_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("patch request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated DELETE request.
    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!(
        "stitchdesk_test_{}",
        Uuid::now_v7().to_string().replace('-', "")
    );

    // Connect to default postgres DB to create test DB
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    // Connect to test DB and run migrations
    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        session_secret: SESSION_SECRET.to_string(),
        webhook_secret: WEBHOOK_SECRET.to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 1_048_576,
        trusted_proxies: vec![],
        geoip_api_base: None,
        log_level: "warn".to_string(),
    };

    let app = stitchdesk::build_app(pool.clone(), config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
