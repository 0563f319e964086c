use crate::{
    i18n::Language,
    utils::{
        cookie::{extract_cookie, LANGUAGE_COOKIE, SESSION_COOKIE},
        session::{decode_session, SessionKey},
    },
};
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;

/// Language the visitor asked for.
///
/// Resolved from the signed session first, then the `language` cookie, and
/// Turkish otherwise. Values outside the supported set are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentLanguage(pub Language);

pub fn resolve_language(headers: &HeaderMap, key: Option<&SessionKey>) -> Language {
    let from_session = key.and_then(|key| {
        let token = extract_cookie(headers, SESSION_COOKIE)?;
        decode_session(key, &token)?.language
    });

    from_session
        .or_else(|| {
            extract_cookie(headers, LANGUAGE_COOKIE).and_then(|code| Language::from_code(&code))
        })
        .unwrap_or_default()
}

impl<S> FromRequestParts<S> for CurrentLanguage
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let key = parts.extensions.get::<SessionKey>();
        Ok(CurrentLanguage(resolve_language(&parts.headers, key)))
    }
}
