#![allow(dead_code)]

use reqwest::{redirect::Policy, Client};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Once,
};

pub const ADMIN_TOKEN: &str = "integration_test_admin_token";
pub const SESSION_SECRET: &str = "integration_test_session_secret_32_chars";
pub const SITE_URL: &str = "https://edebai.test";

/// Long enough for the 50 character minimum on meta descriptions.
pub const META_DESCRIPTION: &str =
    "Yapay zeka ve eğitim üzerine yazılmış, test amaçlı örnek bir açıklama metni.";

static INIT: Once = Once::new();
static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn init_env() {
    INIT.call_once(|| {
        std::env::set_var("RATE_LIMIT_ENABLED", "false");
        std::env::set_var("ENABLE_HSTS", "false");
    });
}

pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, COUNTER.fetch_add(1, Ordering::SeqCst))
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request");
        let status = resp.status().as_u16();
        let body = resp.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn admin_get(&self, path: &str) -> (u16, Value) {
        let resp = self
            .client
            .get(self.url(&format!("/admin{}", path)))
            .bearer_auth(ADMIN_TOKEN)
            .send()
            .await
            .expect("Failed to send admin request");
        let status = resp.status().as_u16();
        let body = resp.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn admin_send(&self, method: reqwest::Method, path: &str, payload: Value) -> (u16, Value) {
        let resp = self
            .client
            .request(method, self.url(&format!("/admin{}", path)))
            .bearer_auth(ADMIN_TOKEN)
            .json(&payload)
            .send()
            .await
            .expect("Failed to send admin request");
        let status = resp.status().as_u16();
        let body = resp.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn admin_post(&self, path: &str, payload: Value) -> Value {
        let (status, body) = self.admin_send(reqwest::Method::POST, path, payload).await;
        if status != 200 || !body["success"].as_bool().unwrap_or(false) {
            panic!("POST /admin{} failed: status={}, body={}", path, status, body);
        }
        body["data"].clone()
    }
}

pub async fn spawn_app() -> TestApp {
    init_env();

    let root = std::env::temp_dir().join(unique(&format!("edebai-test-{}", uuid::Uuid::new_v4())));
    std::fs::create_dir_all(&root).expect("Failed to create test directory");
    let upload_dir = root.join("uploads");

    let database_url = format!("sqlite://{}?mode=rwc", root.join("test.db").display());
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt)
        .await
        .expect("Failed to open test database");

    edebai::migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let site = edebai::config::site::SiteConfig {
        base_url: SITE_URL.to_string(),
        admin_token: Some(ADMIN_TOKEN.to_string()),
        upload_dir: upload_dir.to_string_lossy().into_owned(),
    };
    let upload_config = edebai::services::upload::UploadConfig {
        upload_dir: site.upload_dir.clone(),
    };
    let session_key = edebai::utils::session::SessionKey::new(SESSION_SECRET.as_bytes().to_vec());

    let app = axum::Router::new()
        .route("/health", axum::routing::get(|| async { "ok" }))
        .merge(edebai::routes::create_routes())
        .layer(axum::middleware::from_fn(
            edebai::middleware::security::security_headers_middleware,
        ))
        .layer(axum::extract::Extension(db.clone()))
        .layer(axum::extract::Extension(site))
        .layer(axum::extract::Extension(upload_config))
        .layer(axum::extract::Extension(session_key));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    let client = Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build HTTP client");

    TestApp {
        addr: format!("http://{}", addr),
        db,
        client,
        upload_dir,
    }
}

/// Create a category and return its JSON representation.
pub async fn create_test_category(app: &TestApp, name: &str) -> Value {
    app.admin_post(
        "/categories",
        json!({
            "name": name,
            "slug": unique("kategori"),
            "icon": "🤖",
            "description": format!("{} hakkında yazılar", name),
        }),
    )
    .await
}

/// Create an article from a minimal valid payload merged with `overrides`.
pub async fn create_test_article(app: &TestApp, overrides: Value) -> Value {
    let mut payload = json!({
        "title": format!("Deneme Yazısı {}", unique("makale")),
        "slug": unique("deneme-yazisi"),
        "excerpt": "Kısa bir özet.",
        "thumbnail": "articles/thumbnails/2025/01/kapak.jpg",
        "thumbnail_alt": "Kapak görseli",
        "author_name": "Edebai Yazarı",
        "meta_description": META_DESCRIPTION,
        "is_published": true,
    });
    if let (Some(base), Some(extra)) = (payload.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    app.admin_post("/articles", payload).await
}

pub async fn add_paragraph(app: &TestApp, article_id: i64, payload: Value) -> Value {
    app.admin_post(&format!("/articles/{}/paragraphs", article_id), payload)
        .await
}

pub async fn add_image(app: &TestApp, article_id: i64, payload: Value) -> Value {
    app.admin_post(&format!("/articles/{}/images", article_id), payload)
        .await
}

/// POST an urlencoded form, optionally with a `Cookie` header.
pub async fn post_form(
    app: &TestApp,
    path: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> (u16, Value) {
    let mut req = app.client.post(app.url(path)).form(fields);
    if let Some(cookie) = cookie {
        req = req.header(reqwest::header::COOKIE, cookie);
    }
    let resp = req.send().await.expect("Failed to post form");
    let status = resp.status().as_u16();
    let body = resp.json().await.expect("Failed to parse form response");
    (status, body)
}
