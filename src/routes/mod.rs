use crate::config::rate_limit::{RateLimitConfig, RateLimitRule};
use crate::handlers;
use crate::middleware::admin::admin_auth_middleware;
use crate::services::upload::MAX_FILE_SIZE;
use axum::{extract::DefaultBodyLimit, middleware, routing, Router};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

/// Multipart framing on top of the largest accepted file.
const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE + 64 * 1024;

pub fn create_routes() -> Router {
    let rate_limit_config = RateLimitConfig::from_env();

    let public_read = public_read_routes(&rate_limit_config);
    let forms = form_routes(&rate_limit_config);
    let admin = admin_routes(&rate_limit_config).layer(middleware::from_fn(admin_auth_middleware));

    public_read.merge(forms).nest("/admin", admin)
}

/// Public pages, language switch and crawler documents.
fn public_read_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route("/", routing::get(handlers::pages::home))
        .route("/blog/", routing::get(handlers::pages::blog_list))
        .route("/kategoriler/", routing::get(handlers::pages::category_list))
        .route(
            "/kategori/{slug}/",
            routing::get(handlers::pages::category_detail),
        )
        .route(
            "/makale/{slug}/",
            routing::get(handlers::pages::article_detail),
        )
        .route("/ara/", routing::get(handlers::pages::search))
        .route("/hakkinda/", routing::get(handlers::pages::about))
        .route("/iletisim/", routing::get(handlers::pages::contact))
        .route(
            "/cerez-politikasi/",
            routing::get(handlers::pages::cookie_policy),
        )
        // Language
        .route(
            "/dil/{language}/",
            routing::get(handlers::language::set_language),
        )
        // Crawlers
        .route("/robots.txt", routing::get(handlers::seo::robots))
        .route("/sitemap.xml", routing::get(handlers::seo::sitemap));

    with_optional_rate_limit(router, config.enabled, config.public_read)
}

/// AJAX form posts.
fn form_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route(
            "/ajax/bulten-abone/",
            routing::post(handlers::forms::newsletter_subscribe),
        )
        .route(
            "/ajax/iletisim-gonder/",
            routing::post(handlers::forms::contact_submit),
        );

    with_optional_rate_limit(router, config.enabled, config.forms)
}

/// Admin API, mounted under `/admin`.
fn admin_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        // Categories
        .route(
            "/categories",
            routing::get(handlers::category::list_categories)
                .post(handlers::category::create_category),
        )
        .route(
            "/categories/{id}",
            routing::get(handlers::category::get_category)
                .put(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
        // Articles
        .route(
            "/articles",
            routing::get(handlers::article::list_articles)
                .post(handlers::article::create_article),
        )
        .route(
            "/articles/{id}",
            routing::get(handlers::article::get_article)
                .put(handlers::article::update_article)
                .delete(handlers::article::delete_article),
        )
        .route(
            "/articles/{id}/paragraphs",
            routing::post(handlers::article::add_paragraph),
        )
        .route(
            "/paragraphs/{id}",
            routing::put(handlers::article::update_paragraph)
                .delete(handlers::article::delete_paragraph),
        )
        .route(
            "/articles/{id}/images",
            routing::post(handlers::article::add_image),
        )
        .route(
            "/images/{id}",
            routing::put(handlers::article::update_image)
                .delete(handlers::article::delete_image),
        )
        // Uploads
        .route(
            "/uploads/{kind}",
            routing::post(handlers::upload::upload_image)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        // Site settings
        .route(
            "/homepage-seo",
            routing::get(handlers::settings::list_homepage_seo)
                .post(handlers::settings::create_homepage_seo),
        )
        .route(
            "/homepage-seo/{id}",
            routing::put(handlers::settings::update_homepage_seo)
                .delete(handlers::settings::delete_homepage_seo),
        )
        .route(
            "/cookie-consents",
            routing::get(handlers::settings::list_cookie_consents)
                .post(handlers::settings::create_cookie_consent),
        )
        .route(
            "/cookie-consents/{id}",
            routing::put(handlers::settings::update_cookie_consent)
                .delete(handlers::settings::delete_cookie_consent),
        )
        .route(
            "/cookie-policies",
            routing::get(handlers::settings::list_cookie_policies)
                .post(handlers::settings::create_cookie_policy),
        )
        .route(
            "/cookie-policies/{id}",
            routing::put(handlers::settings::update_cookie_policy)
                .delete(handlers::settings::delete_cookie_policy),
        )
        // Inbox
        .route(
            "/subscribers",
            routing::get(handlers::inbox::list_subscribers),
        )
        .route(
            "/subscribers/{id}",
            routing::put(handlers::inbox::set_subscriber_active),
        )
        .route("/messages", routing::get(handlers::inbox::list_messages))
        .route(
            "/messages/{id}/read",
            routing::post(handlers::inbox::mark_message_read),
        );

    with_optional_rate_limit(router, config.enabled, config.admin)
}

fn with_optional_rate_limit(router: Router, enabled: bool, rule: RateLimitRule) -> Router {
    if !enabled {
        return router;
    }

    let Some(governor_conf) = GovernorConfigBuilder::default()
        .per_second(rule.per_second)
        .burst_size(rule.burst_size)
        .finish()
    else {
        tracing::warn!(?rule, "invalid rate limit rule, serving without a limit");
        return router;
    };

    router.layer(GovernorLayer::new(governor_conf))
}
