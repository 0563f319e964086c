use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};
use edebai::{
    config::{self, site::SiteConfig},
    middleware::security::security_headers_middleware,
    migration, routes,
    services::{
        cache::CacheService,
        upload::{UploadConfig, MEDIA_URL_PREFIX},
    },
};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use serde_json::json;
use std::env;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        // Public pages
        edebai::handlers::pages::home,
        edebai::handlers::pages::blog_list,
        edebai::handlers::pages::category_list,
        edebai::handlers::pages::category_detail,
        edebai::handlers::pages::article_detail,
        edebai::handlers::pages::search,
        edebai::handlers::pages::about,
        edebai::handlers::pages::contact,
        edebai::handlers::pages::cookie_policy,
        edebai::handlers::language::set_language,
        // Forms
        edebai::handlers::forms::newsletter_subscribe,
        edebai::handlers::forms::contact_submit,
        // Crawlers
        edebai::handlers::seo::robots,
        edebai::handlers::seo::sitemap,
        // Admin: categories
        edebai::handlers::category::list_categories,
        edebai::handlers::category::get_category,
        edebai::handlers::category::create_category,
        edebai::handlers::category::update_category,
        edebai::handlers::category::delete_category,
        // Admin: articles
        edebai::handlers::article::list_articles,
        edebai::handlers::article::get_article,
        edebai::handlers::article::create_article,
        edebai::handlers::article::update_article,
        edebai::handlers::article::delete_article,
        edebai::handlers::article::add_paragraph,
        edebai::handlers::article::update_paragraph,
        edebai::handlers::article::delete_paragraph,
        edebai::handlers::article::add_image,
        edebai::handlers::article::update_image,
        edebai::handlers::article::delete_image,
        edebai::handlers::upload::upload_image,
        // Admin: site settings
        edebai::handlers::settings::list_homepage_seo,
        edebai::handlers::settings::create_homepage_seo,
        edebai::handlers::settings::update_homepage_seo,
        edebai::handlers::settings::delete_homepage_seo,
        edebai::handlers::settings::list_cookie_consents,
        edebai::handlers::settings::create_cookie_consent,
        edebai::handlers::settings::update_cookie_consent,
        edebai::handlers::settings::delete_cookie_consent,
        edebai::handlers::settings::list_cookie_policies,
        edebai::handlers::settings::create_cookie_policy,
        edebai::handlers::settings::update_cookie_policy,
        edebai::handlers::settings::delete_cookie_policy,
        // Admin: inbox
        edebai::handlers::inbox::list_subscribers,
        edebai::handlers::inbox::set_subscriber_active,
        edebai::handlers::inbox::list_messages,
        edebai::handlers::inbox::mark_message_read,
    ),
    components(
        schemas(
            edebai::response::ApiResponse<serde_json::Value>,
            edebai::response::PaginatedResponse<serde_json::Value>,
            edebai::response::PaginationQuery,
            edebai::response::FormResponse,
            edebai::error::AppError,
            edebai::i18n::Language,
            // Requests
            edebai::handlers::forms::SubscribeForm,
            edebai::handlers::forms::ContactForm,
            edebai::handlers::inbox::SetActiveRequest,
            edebai::services::category::CategoryDraft,
            edebai::services::article::ArticleDraft,
            edebai::services::article_content::ParagraphDraft,
            edebai::services::article_content::ImageDraft,
            edebai::services::settings::HomepageSeoDraft,
            edebai::services::settings::CookieConsentDraft,
            edebai::services::settings::CookiePolicyDraft,
            edebai::services::upload::UploadKind,
            // Page contexts
            edebai::handlers::views::ArticleCard,
            edebai::handlers::views::ArticleDetailView,
            edebai::handlers::views::ContentBlock,
            edebai::handlers::views::CategoryView,
            edebai::handlers::views::SeoView,
            edebai::handlers::views::CookieConsentView,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "pages", description = "Public page contexts"),
        (name = "forms", description = "Newsletter and contact form posts"),
        (name = "seo", description = "robots.txt and sitemap.xml"),
        (name = "admin", description = "Content administration"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_token",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edebai=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration before doing anything else
    let site = validate_config()?;
    let session_key = config::site::session_key_from_env()?;

    tracing::info!("Starting edebai v{}...", env!("CARGO_PKG_VERSION"));

    let db = config::database::get_database().await?;
    tracing::info!("Database connected successfully");

    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let upload_config = UploadConfig {
        upload_dir: site.upload_dir.clone(),
    };

    // Redis/Cache is optional - graceful degradation if unavailable
    let cache = match config::redis::connect_redis().await {
        Ok(Some(conn)) => {
            tracing::info!("Redis connected successfully");
            Some(CacheService::new(conn))
        }
        Ok(None) => {
            tracing::info!("REDIS_URL not set, running without cache");
            None
        }
        Err(e) => {
            tracing::warn!("Redis unavailable, running without cache: {}", e);
            None
        }
    };

    let mut app = create_app(&site.upload_dir)
        .layer(Extension(db))
        .layer(Extension(site))
        .layer(Extension(upload_config))
        .layer(Extension(session_key));

    if let Some(cache) = cache {
        app = app.layer(Extension(cache));
    }

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Validate all required configuration at startup (fail-fast).
fn validate_config() -> anyhow::Result<SiteConfig> {
    // DATABASE_URL — checked here for early error; actual connection happens later
    if env::var("DATABASE_URL").is_err() {
        return Err(anyhow::anyhow!(
            "DATABASE_URL environment variable must be set"
        ));
    }

    let site = SiteConfig::from_env();
    if site.admin_token.is_none() {
        tracing::warn!("ADMIN_TOKEN not set, the admin API will refuse every request");
    }

    // Upload directory — create if needed
    std::fs::create_dir_all(&site.upload_dir).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create upload directory '{}': {}",
            site.upload_dir,
            e
        )
    })?;

    Ok(site)
}

fn build_cors_layer() -> CorsLayer {
    use axum::http::{header, HeaderValue, Method};

    let origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins_str == "*" {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

fn create_app(upload_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(routes::create_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service(MEDIA_URL_PREFIX, ServeDir::new(upload_dir))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check successful", body = serde_json::Value)
    )
)]
async fn health_check(Extension(db): Extension<DatabaseConnection>) -> impl IntoResponse {
    let db_ok = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await
        .is_ok();

    let status = if db_ok { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "service": "edebai",
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_ok,
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully shutting down...");
}
