mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn unpublished_article_is_hidden_everywhere() {
    let app = common::spawn_app().await;
    let category = common::create_test_category(&app, "Yapay Zeka").await;
    let draft = common::create_test_article(
        &app,
        json!({
            "title": "Taslak Yazı",
            "slug": "taslak-yazi",
            "category_id": category["id"],
            "is_published": false,
            "is_featured": true,
        }),
    )
    .await;
    assert_eq!(draft["is_published"], false);
    assert!(draft["published_date"].is_null());

    let (status, _) = app.get_json("/makale/taslak-yazi/").await;
    assert_eq!(status, 404);

    let (_, home) = app.get_json("/").await;
    assert_eq!(home["featured_articles"].as_array().unwrap().len(), 0);

    let (_, blog) = app.get_json("/blog/").await;
    assert_eq!(blog["articles"]["total"], 0);

    let slug = category["slug"].as_str().unwrap();
    let (status, detail) = app.get_json(&format!("/kategori/{}/", slug)).await;
    assert_eq!(status, 200);
    assert_eq!(detail["articles"]["total"], 0);

    let (_, search) = app.get_json("/ara/?q=Taslak").await;
    assert_eq!(search["results"]["total"], 0);
}

#[tokio::test]
async fn published_article_is_listed_and_counts_views() {
    let app = common::spawn_app().await;
    let article = common::create_test_article(
        &app,
        json!({ "title": "Merhaba Dünya", "slug": "merhaba-dunya", "is_featured": true }),
    )
    .await;
    assert!(article["published_date"].is_string());

    let (_, home) = app.get_json("/").await;
    assert_eq!(home["featured_articles"][0]["slug"], "merhaba-dunya");
    assert_eq!(home["featured_articles"][0]["url"], "/makale/merhaba-dunya/");

    let (_, blog) = app.get_json("/blog/").await;
    assert_eq!(blog["articles"]["total"], 1);

    for n in 1..=3 {
        let (status, page) = app.get_json("/makale/merhaba-dunya/").await;
        assert_eq!(status, 200);
        assert_eq!(page["article"]["view_count"], n);
        assert_eq!(page["language"], "tr");
    }

    let (_, stored) = app
        .admin_get(&format!("/articles/{}", article["id"]))
        .await;
    assert_eq!(stored["data"]["view_count"], 3);
}

#[tokio::test]
async fn content_is_interleaved_by_anchor() {
    let app = common::spawn_app().await;
    let article = common::create_test_article(&app, json!({ "slug": "duzen" })).await;
    let id = article["id"].as_i64().unwrap();

    let p1 = common::add_paragraph(&app, id, json!({ "sort_order": 1, "content": "Birinci" })).await;
    let p2 = common::add_paragraph(&app, id, json!({ "sort_order": 2, "content": "İkinci" })).await;
    let p3 = common::add_paragraph(
        &app,
        id,
        json!({ "sort_order": 3, "paragraph_type": "heading", "heading_text": "Üçüncü" }),
    )
    .await;
    let i1 = common::add_image(
        &app,
        id,
        json!({
            "image": "articles/content_images/2025/01/bir.jpg",
            "alt_text": "Bir",
            "after_paragraph_id": p1["id"],
        }),
    )
    .await;
    let i2 = common::add_image(
        &app,
        id,
        json!({ "image": "articles/content_images/2025/01/iki.jpg", "alt_text": "İki" }),
    )
    .await;

    let (status, page) = app.get_json("/makale/duzen/").await;
    assert_eq!(status, 200);

    let order: Vec<(String, i64)> = page["article"]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|block| {
            (
                block["type"].as_str().unwrap().to_string(),
                block["data"]["id"].as_i64().unwrap(),
            )
        })
        .collect();

    let expected = vec![
        ("paragraph".to_string(), p1["id"].as_i64().unwrap()),
        ("image".to_string(), i1["id"].as_i64().unwrap()),
        ("paragraph".to_string(), p2["id"].as_i64().unwrap()),
        ("paragraph".to_string(), p3["id"].as_i64().unwrap()),
        ("image".to_string(), i2["id"].as_i64().unwrap()),
    ];
    assert_eq!(order, expected);

    let heading = &page["article"]["content"][3]["data"];
    assert_eq!(heading["html"], "<h2>Üçüncü</h2>");
    assert_eq!(
        page["article"]["content"][1]["data"]["url"],
        "/media/articles/content_images/2025/01/bir.jpg"
    );
}

#[tokio::test]
async fn deleting_a_paragraph_moves_its_images_to_the_end() {
    let app = common::spawn_app().await;
    let article = common::create_test_article(&app, json!({ "slug": "tasima" })).await;
    let id = article["id"].as_i64().unwrap();

    let p1 = common::add_paragraph(&app, id, json!({ "sort_order": 1, "content": "Bir" })).await;
    common::add_paragraph(&app, id, json!({ "sort_order": 2, "content": "İki" })).await;
    let image = common::add_image(
        &app,
        id,
        json!({
            "image": "articles/content_images/2025/01/resim.jpg",
            "alt_text": "Resim",
            "after_paragraph_id": p1["id"],
        }),
    )
    .await;

    let (status, _) = app
        .admin_send(
            reqwest::Method::DELETE,
            &format!("/paragraphs/{}", p1["id"]),
            Value::Null,
        )
        .await;
    assert_eq!(status, 200);

    let (_, stored) = app.admin_get(&format!("/articles/{}", id)).await;
    assert!(stored["data"]["images"][0]["after_paragraph_id"].is_null());

    let (_, page) = app.get_json("/makale/tasima/").await;
    let content = page["article"]["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert_eq!(content[1]["type"], "image");
    assert_eq!(content[1]["data"]["id"], image["id"]);
}

#[tokio::test]
async fn image_anchor_must_belong_to_same_article() {
    let app = common::spawn_app().await;
    let first = common::create_test_article(&app, json!({})).await;
    let second = common::create_test_article(&app, json!({})).await;
    let paragraph = common::add_paragraph(
        &app,
        first["id"].as_i64().unwrap(),
        json!({ "content": "Başka yazı" }),
    )
    .await;

    let (status, body) = app
        .admin_send(
            reqwest::Method::POST,
            &format!("/articles/{}/images", second["id"]),
            json!({
                "image": "articles/content_images/2025/01/x.jpg",
                "alt_text": "x",
                "after_paragraph_id": paragraph["id"],
            }),
        )
        .await;
    assert_eq!(status, 400);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn related_articles_share_the_category() {
    let app = common::spawn_app().await;
    let ai = common::create_test_category(&app, "Yapay Zeka").await;
    let edu = common::create_test_category(&app, "Eğitim").await;

    common::create_test_article(&app, json!({ "slug": "ana", "category_id": ai["id"] })).await;
    common::create_test_article(&app, json!({ "slug": "komsu", "category_id": ai["id"] })).await;
    common::create_test_article(&app, json!({ "slug": "yabanci", "category_id": edu["id"] })).await;

    let (_, page) = app.get_json("/makale/ana/").await;
    let related = page["related_articles"].as_array().unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0]["slug"], "komsu");
    assert_eq!(page["article"]["category"]["id"], ai["id"]);
}

#[tokio::test]
async fn unknown_category_is_404() {
    let app = common::spawn_app().await;
    let (status, body) = app.get_json("/kategori/boyle-bir-kategori-yok/").await;
    assert_eq!(status, 404);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn article_slug_conflict_is_rejected() {
    let app = common::spawn_app().await;
    common::create_test_article(&app, json!({ "slug": "ayni" })).await;

    let (status, _) = app
        .admin_send(
            reqwest::Method::POST,
            "/articles",
            json!({
                "title": "Aynı",
                "slug": "ayni",
                "excerpt": "Özet",
                "thumbnail": "a.jpg",
                "thumbnail_alt": "a",
                "author_name": "Yazar",
                "meta_description": common::META_DESCRIPTION,
            }),
        )
        .await;
    assert_eq!(status, 409);
}

#[tokio::test]
async fn short_meta_description_is_rejected() {
    let app = common::spawn_app().await;
    let (status, body) = app
        .admin_send(
            reqwest::Method::POST,
            "/articles",
            json!({
                "title": "Kısa",
                "excerpt": "Özet",
                "thumbnail": "a.jpg",
                "thumbnail_alt": "a",
                "author_name": "Yazar",
                "meta_description": "çok kısa",
            }),
        )
        .await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("meta_description"));
}

#[tokio::test]
async fn blank_slug_is_derived_from_title() {
    let app = common::spawn_app().await;
    let article = common::create_test_article(
        &app,
        json!({ "title": "Öğrenciler İçin Yapay Zekâ", "slug": "" }),
    )
    .await;
    let slug = article["slug"].as_str().unwrap();
    assert!(!slug.is_empty());
    assert!(slug.is_ascii());
    assert_eq!(article["meta_title"], "Öğrenciler İçin Yapay Zekâ");
}

#[tokio::test]
async fn deleting_category_keeps_its_articles() {
    let app = common::spawn_app().await;
    let category = common::create_test_category(&app, "Geçici").await;
    let article =
        common::create_test_article(&app, json!({ "slug": "yetim", "category_id": category["id"] }))
            .await;

    let (status, _) = app
        .admin_send(
            reqwest::Method::DELETE,
            &format!("/categories/{}", category["id"]),
            Value::Null,
        )
        .await;
    assert_eq!(status, 200);

    let (_, stored) = app.admin_get(&format!("/articles/{}", article["id"])).await;
    assert!(stored["data"]["category_id"].is_null());

    let (status, _) = app.get_json("/makale/yetim/").await;
    assert_eq!(status, 200);
}
