use axum::{
    extract::{Query, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::i18n::{Lang, LANGUAGE_COOKIE};

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

/// Locale to use when the path does not name one: `?lang=`, then the
/// `language` cookie, then French.
pub fn preferred_lang(jar: &CookieJar, query: &LangQuery) -> Lang {
    query
        .lang
        .as_deref()
        .and_then(Lang::from_code)
        .or_else(|| jar.get(LANGUAGE_COOKIE).and_then(|c| Lang::from_code(c.value())))
        .unwrap_or_default()
}

fn language_cookie(lang: Lang) -> Cookie<'static> {
    Cookie::build((LANGUAGE_COOKIE, lang.code()))
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

/// Remembers the locale of every localized page that is served.
pub async fn remember_language(jar: CookieJar, req: Request, next: Next) -> Response {
    let lang = Lang::from_path(req.uri().path());
    let response = next.run(req).await;

    match lang {
        Some(lang) if jar.get(LANGUAGE_COOKIE).map(|c| c.value()) != Some(lang.code()) => {
            (jar.add(language_cookie(lang)), response).into_response()
        }
        _ => response,
    }
}

/// `GET /`
pub async fn root_redirect(jar: CookieJar, Query(query): Query<LangQuery>) -> Redirect {
    let lang = preferred_lang(&jar, &query);
    Redirect::to(&lang.path("/login"))
}
