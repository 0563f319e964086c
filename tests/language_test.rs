mod common;

use reqwest::header::{LOCATION, REFERER, SET_COOKIE};

fn set_cookies(resp: &reqwest::Response) -> Vec<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn valid_code_sets_cookie_and_returns_to_referrer() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/dil/en/"))
        .header(REFERER, "/blog/?page=2")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers()[LOCATION], "/blog/?page=2");

    let cookies = set_cookies(&resp);
    let language = cookies
        .iter()
        .find(|c| c.starts_with("language="))
        .expect("language cookie missing");
    assert!(language.starts_with("language=en;"));
    assert!(language.contains("Max-Age=31536000"));
    assert!(!language.contains("HttpOnly"));

    let session = cookies
        .iter()
        .find(|c| c.starts_with("sessionid="))
        .expect("session cookie missing");
    assert!(session.contains("HttpOnly"));
}

#[tokio::test]
async fn missing_referrer_goes_home() {
    let app = common::spawn_app().await;
    let resp = app.client.get(app.url("/dil/tr/")).send().await.unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers()[LOCATION], "/");
}

#[tokio::test]
async fn invalid_code_redirects_home_without_cookie() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/dil/de/"))
        .header(REFERER, "/blog/")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers()[LOCATION], "/");
    assert!(set_cookies(&resp).is_empty());
}

#[tokio::test]
async fn session_language_wins_over_cookie() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/dil/en/")).send().await.unwrap();
    let session = set_cookies(&resp)
        .into_iter()
        .find(|c| c.starts_with("sessionid="))
        .unwrap();
    let session_pair = session.split(';').next().unwrap().to_string();

    let resp = app
        .client
        .get(app.url("/hakkinda/"))
        .header(
            reqwest::header::COOKIE,
            format!("language=tr; {}", session_pair),
        )
        .send()
        .await
        .unwrap();
    let page: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(page["language"], "en");
    assert_eq!(page["page_title"], "About - EdebAi");
}

#[tokio::test]
async fn unknown_cookie_value_is_ignored() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .get(app.url("/hakkinda/"))
        .header(reqwest::header::COOKIE, "language=fr")
        .send()
        .await
        .unwrap();
    let page: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(page["language"], "tr");
}

#[tokio::test]
async fn english_titles_fall_back_to_turkish() {
    let app = common::spawn_app().await;
    common::create_test_article(
        &app,
        serde_json::json!({ "slug": "iki-dilli", "title": "Türkçe Başlık", "title_en": "English Title" }),
    )
    .await;
    common::create_test_article(
        &app,
        serde_json::json!({ "slug": "tek-dilli", "title": "Sadece Türkçe" }),
    )
    .await;

    let get_en = |path: &'static str| {
        app.client
            .get(app.url(path))
            .header(reqwest::header::COOKIE, "language=en")
            .send()
    };

    let page: serde_json::Value = get_en("/makale/iki-dilli/").await.unwrap().json().await.unwrap();
    assert_eq!(page["article"]["title"], "English Title");

    let page: serde_json::Value = get_en("/makale/tek-dilli/").await.unwrap().json().await.unwrap();
    assert_eq!(page["article"]["title"], "Sadece Türkçe");
}

#[tokio::test]
async fn custom_og_title_survives_english() {
    let app = common::spawn_app().await;
    common::create_test_article(
        &app,
        serde_json::json!({
            "slug": "og-basligi",
            "title": "Türkçe Başlık",
            "title_en": "English Title",
            "og_title": "Paylaşım Başlığı",
        }),
    )
    .await;

    let resp = app
        .client
        .get(app.url("/makale/og-basligi/"))
        .header(reqwest::header::COOKIE, "language=en")
        .send()
        .await
        .unwrap();
    let page: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(page["language"], "en");
    assert_eq!(page["article"]["title"], "English Title");
    assert_eq!(page["article"]["seo"]["og_title"], "Paylaşım Başlığı");
}
