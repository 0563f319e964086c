mod common;

use serde_json::json;

#[tokio::test]
async fn robots_points_at_the_sitemap() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/robots.txt")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let body = resp.text().await.unwrap();
    assert!(body.contains("User-agent: *"));
    assert!(body.contains("Disallow: /admin/"));
    assert!(body.contains("Sitemap: https://edebai.test/sitemap.xml"));
}

#[tokio::test]
async fn sitemap_lists_only_indexable_published_articles() {
    let app = common::spawn_app().await;
    let category = common::create_test_category(&app, "Edebiyat").await;
    common::create_test_article(
        &app,
        json!({ "slug": "gorunur", "category_id": category["id"] }),
    )
    .await;
    common::create_test_article(&app, json!({ "slug": "taslak", "is_published": false })).await;
    common::create_test_article(&app, json!({ "slug": "gizli", "noindex": true })).await;

    let resp = app.client.get(app.url("/sitemap.xml")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/xml"));

    let xml = resp.text().await.unwrap();
    assert!(xml.contains("<loc>https://edebai.test/makale/gorunur/</loc>"));
    assert!(!xml.contains("/makale/taslak/"));
    assert!(!xml.contains("/makale/gizli/"));
    assert!(xml.contains(&format!(
        "<loc>https://edebai.test/kategori/{}/</loc>",
        category["slug"].as_str().unwrap()
    )));
    assert!(xml.contains("<loc>https://edebai.test/hakkinda/</loc>"));
    assert!(xml.contains("<priority>0.9</priority>"));
    assert!(xml.contains("<changefreq>monthly</changefreq>"));
}
