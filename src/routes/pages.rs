use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};

use crate::dto::account_dto::ErrorQuery;
use crate::dto::dossier_dto::PageQuery;
use crate::error::{Error, OrPage, PageError, PageResult};
use crate::i18n::{Lang, Notice};
use crate::middleware::session::{home_path, CurrentUser, StaffUser};
use crate::views;
use crate::AppState;

const STAFF_PER_PAGE: i64 = 10;
const CANDIDATE_PER_PAGE: i64 = 5;

pub async fn locale_index(Extension(lang): Extension<Lang>) -> Redirect {
    Redirect::to(&lang.path("/login"))
}

pub async fn error(
    Extension(lang): Extension<Lang>,
    user: Option<CurrentUser>,
    Query(query): Query<ErrorQuery>,
) -> Html<String> {
    let description = query
        .description
        .unwrap_or_else(|| Notice::Unexpected.text(lang).to_string());
    let back = query.url.unwrap_or_else(|| lang.path("/login"));
    views::account::error_page(lang, user.as_ref().map(|u| &u.0), &description, &back)
}

/// Same page in the other locale, taken from the `Referer` header.
pub async fn switch_lang(Extension(lang): Extension<Lang>, headers: HeaderMap) -> Redirect {
    let other = lang.other();
    let target = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|referer| swap_locale(referer, other))
        .unwrap_or_else(|| other.path("/login"));
    Redirect::to(&target)
}

fn swap_locale(referer: &str, target: Lang) -> Option<String> {
    let url = url::Url::parse(referer).ok()?;
    let path = url.path();
    let current = Lang::from_path(path)?;
    let rest = &path[current.path("").len()..];
    let mut swapped = target.path(rest);
    if let Some(query) = url.query() {
        swapped.push('?');
        swapped.push_str(query);
    }
    Some(swapped)
}

pub async fn not_found(uri: Uri) -> Response {
    let lang = Lang::from_path(uri.path()).unwrap_or_default();
    tracing::debug!(path = %uri.path(), "no route");
    PageError::new(lang, lang.path("/login"), Error::NotFound(Notice::PageNotFound)).into_response()
}

/// `GET /accueilResponsable`
pub async fn staff_home(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Query(query): Query<PageQuery>,
) -> PageResult {
    let (page, per_page) = query.resolve(STAFF_PER_PAGE);
    let dossiers = state
        .dossier_service
        .list(page, per_page)
        .await
        .or_page(lang, &lang.path("/login"))?;
    Ok(views::dossiers::staff_home(lang, &user, &dossiers).into_response())
}

/// `GET /accueil`
pub async fn candidate_home(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> PageResult {
    if user.is_staff() {
        return Ok(Redirect::to(&home_path(lang, &user)).into_response());
    }
    let back = lang.path("/login");
    let (page, per_page) = query.resolve(CANDIDATE_PER_PAGE);
    let dossiers = state
        .dossier_service
        .list_for_candidate(&user, page, per_page)
        .await
        .or_page(lang, &back)?;
    let notification = state
        .notification_service
        .latest(&user.id)
        .await
        .or_page(lang, &back)?;
    Ok(views::dossiers::candidate_home(lang, &user, &dossiers, notification.as_deref()).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_locale_keeps_path_and_query() {
        let swapped = swap_locale("http://localhost:8000/fr/dossier?page=2&per_page=10", Lang::En);
        assert_eq!(swapped.as_deref(), Some("/en/dossier?page=2&per_page=10"));
    }

    #[test]
    fn swap_locale_ignores_unlocalized_referers() {
        assert_eq!(swap_locale("http://localhost:8000/health", Lang::En), None);
        assert_eq!(swap_locale("not a url", Lang::Fr), None);
    }
}
