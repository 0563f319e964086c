mod common;

use serde_json::json;

#[tokio::test]
async fn empty_query_has_no_result_set() {
    let app = common::spawn_app().await;
    common::create_test_article(&app, json!({})).await;

    let (status, page) = app.get_json("/ara/").await;
    assert_eq!(status, 200);
    assert!(page["results"].is_null());

    let (_, page) = app.get_json("/ara/?q=%20%20").await;
    assert!(page["results"].is_null());
}

#[tokio::test]
async fn matches_any_text_field_case_insensitively() {
    let app = common::spawn_app().await;
    common::create_test_article(
        &app,
        json!({ "slug": "baslikta", "title": "Makine Öğrenmesi Temelleri" }),
    )
    .await;
    common::create_test_article(
        &app,
        json!({ "slug": "ingilizcede", "title": "Sinir Ağları", "title_en": "Neural Networks" }),
    )
    .await;
    common::create_test_article(
        &app,
        json!({ "slug": "ozette", "excerpt": "Bu yazı MAKINE çevirisini anlatıyor." }),
    )
    .await;

    let (_, page) = app.get_json("/ara/?q=makine").await;
    let mut slugs: Vec<String> = page["results"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["slug"].as_str().unwrap().to_string())
        .collect();
    slugs.sort();
    assert_eq!(slugs, vec!["baslikta".to_string(), "ozette".to_string()]);

    let (_, page) = app.get_json("/ara/?q=neural").await;
    assert_eq!(page["results"]["total"], 1);
    assert_eq!(page["results"]["items"][0]["slug"], "ingilizcede");
    assert_eq!(page["query"], "neural");
}

#[tokio::test]
async fn turkish_capitals_match_their_own_text() {
    let app = common::spawn_app().await;
    common::create_test_article(&app, json!({ "slug": "siir", "title": "Şiir ve Yapay Zeka" }))
        .await;
    common::create_test_article(&app, json!({ "slug": "insan", "title": "İnsan ve Makine" }))
        .await;

    let (status, page) = app.get_json("/ara/?q=%C5%9Eiir").await;
    assert_eq!(status, 200);
    assert_eq!(page["results"]["total"], 1);
    assert_eq!(page["results"]["items"][0]["slug"], "siir");

    let (_, page) = app.get_json("/ara/?q=%C4%B0nsan").await;
    assert_eq!(page["results"]["total"], 1);
    assert_eq!(page["results"]["items"][0]["slug"], "insan");

    let (_, page) = app.get_json("/ara/?q=MAKINE").await;
    assert_eq!(page["results"]["total"], 1);
    assert_eq!(page["results"]["items"][0]["slug"], "insan");
}

#[tokio::test]
async fn unpublished_english_title_is_not_found() {
    let app = common::spawn_app().await;
    common::create_test_article(
        &app,
        json!({
            "title": "Gizli Taslak",
            "title_en": "Quantum Secret",
            "is_published": false,
        }),
    )
    .await;

    let (status, page) = app.get_json("/ara/?q=Quantum").await;
    assert_eq!(status, 200);
    assert_eq!(page["results"]["total"], 0);
    assert_eq!(page["results"]["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn like_wildcards_are_literal() {
    let app = common::spawn_app().await;
    common::create_test_article(&app, json!({ "title": "Yüzde Yüz Başarı" })).await;

    let (_, page) = app.get_json("/ara/?q=%25").await;
    assert_eq!(page["results"]["total"], 0);

    let (_, page) = app.get_json("/ara/?q=_").await;
    assert_eq!(page["results"]["total"], 0);
}

#[tokio::test]
async fn pages_are_clamped() {
    let app = common::spawn_app().await;
    for _ in 0..10 {
        common::create_test_article(&app, json!({ "title": format!("Ortak {}", common::unique("başlık")) })).await;
    }

    let (_, page) = app.get_json("/ara/?q=ortak&page=99").await;
    assert_eq!(page["results"]["total"], 10);
    assert_eq!(page["results"]["page"], 2);
    assert_eq!(page["results"]["items"].as_array().unwrap().len(), 1);

    let (_, page) = app.get_json("/blog/?page=abc").await;
    assert_eq!(page["articles"]["page"], 1);
    assert_eq!(page["articles"]["items"].as_array().unwrap().len(), 9);
    assert_eq!(page["articles"]["total_pages"], 2);

    let (_, page) = app.get_json("/blog/?page=0").await;
    assert_eq!(page["articles"]["page"], 2);
}
