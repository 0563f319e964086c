use crate::{
    error::AppResult,
    i18n::Language,
    utils::{
        cookie::{build_cookie, LANGUAGE_COOKIE, LANGUAGE_COOKIE_MAX_AGE, SESSION_COOKIE, SESSION_COOKIE_MAX_AGE},
        session::{encode_session, SessionData, SessionKey},
    },
};
use axum::{
    extract::Path,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};

fn redirect(location: HeaderValue) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn set_cookie(response: &mut Response, cookie: String) -> AppResult<()> {
    let value = HeaderValue::from_str(&cookie).map_err(anyhow::Error::from)?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(())
}

/// Switch the site language and send the visitor back where they came from.
///
/// Unknown codes redirect to the home page without touching any cookie.
#[utoipa::path(
    get,
    path = "/dil/{language}/",
    params(("language" = String, Path, description = "Language code: tr or en")),
    responses((status = 302, description = "Redirect to the referring page")),
    tag = "pages"
)]
pub async fn set_language(
    Path(code): Path<String>,
    headers: HeaderMap,
    session_key: Option<Extension<SessionKey>>,
) -> AppResult<Response> {
    let Some(lang) = Language::from_code(&code) else {
        return Ok(redirect(HeaderValue::from_static("/")));
    };

    let location = headers
        .get(header::REFERER)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("/"));
    let mut response = redirect(location);

    set_cookie(
        &mut response,
        build_cookie(LANGUAGE_COOKIE, lang.code(), LANGUAGE_COOKIE_MAX_AGE, false),
    )?;

    if let Some(Extension(key)) = session_key {
        let token = encode_session(
            &key,
            &SessionData {
                language: Some(lang),
            },
        )?;
        set_cookie(
            &mut response,
            build_cookie(SESSION_COOKIE, &token, SESSION_COOKIE_MAX_AGE, true),
        )?;
    }

    tracing::debug!(language = %lang, "language switched");
    Ok(response)
}
