//! End-to-end test harness for Stockroom.
//!
//! Each [`TestApp`] runs the full router (sessions, identity loader,
//! security headers) on an ephemeral port backed by its own in-memory
//! database, and talks to it with a cookie-keeping `reqwest` client that does
//! not follow redirects, so tests can assert on `303`s and `Location`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stockroom-integration-tests
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use reqwest::{Client, Response, redirect::Policy};
use sqlx::SqlitePool;

use stockroom_web::config::AppConfig;
use stockroom_web::middleware::{create_session_layer, create_session_store};
use stockroom_web::state::AppState;
use stockroom_web::{build_router, db};

/// A running application plus a browser-like client.
pub struct TestApp {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    /// Client with its own cookie jar.
    pub client: Client,
    /// The application's database, for direct assertions.
    pub pool: SqlitePool,
}

impl TestApp {
    /// Start the application on a random local port.
    pub async fn spawn() -> Self {
        let config = AppConfig::for_tests();
        let pool = db::test_pool().await.expect("Failed to create test database");
        let store = create_session_store(&pool)
            .await
            .expect("Failed to migrate session store");
        let session_layer =
            create_session_layer(store, &config).expect("Failed to create session layer");

        let app = build_router(AppState::new(config, pool.clone()), session_layer);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Self::browser(),
            pool,
        }
    }

    /// A fresh client with an empty cookie jar (a second browser).
    #[must_use]
    pub fn browser() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Full URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET with the default client.
    pub async fn get(&self, path: &str) -> Response {
        self.get_with(&self.client, path).await
    }

    /// GET with a specific client.
    pub async fn get_with(&self, client: &Client, path: &str) -> Response {
        client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// Form POST with the default client.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.post_form_with(&self.client, path, fields).await
    }

    /// Form POST with a specific client.
    pub async fn post_form_with(
        &self,
        client: &Client,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Response {
        client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Submit the registration form.
    pub async fn register(&self, username: &str, password: &str) -> Response {
        self.post_form("/register", &[("username", username), ("password", password)])
            .await
    }

    /// Submit the login form.
    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    /// Register and log in, asserting both succeed.
    pub async fn register_and_login(&self, username: &str, password: &str) {
        let response = self.register(username, password).await;
        assert_eq!(response.status(), 303, "registration failed");
        let response = self.login(username, password).await;
        assert_eq!(response.status(), 303, "login failed");
    }

    /// Submit the add-product form.
    pub async fn add_product(&self, name: &str, price: &str, quantity: &str) -> Response {
        self.post_form(
            "/add_product",
            &[("name", name), ("price", price), ("quantity", quantity)],
        )
        .await
    }

    /// Number of product rows in the database.
    pub async fn product_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count products")
    }
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Read a response body as text.
pub async fn body(response: Response) -> String {
    response.text().await.expect("Failed to read response body")
}
