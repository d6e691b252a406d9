use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::CookieJar;

use crate::dto::account_dto::{LoginForm, LoginQuery, PasswordChangeForm, ProfileForm, RegisterForm};
use crate::error::{Error, OrPage, PageResult};
use crate::i18n::{Lang, Notice};
use crate::middleware::session::{
    expired_session_cookie, home_path, issue_token, session_cookie, CurrentUser,
};
use crate::views;
use crate::AppState;

/// `GET /login`. Users with a live session go straight to their home page.
pub async fn login_page(
    Extension(lang): Extension<Lang>,
    user: Option<CurrentUser>,
    Query(query): Query<LoginQuery>,
) -> Response {
    if let Some(CurrentUser(user)) = user {
        return Redirect::to(&home_path(lang, &user)).into_response();
    }
    views::account::login_page(lang, query.message.as_deref()).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> PageResult {
    let back = lang.path("/login");
    let user = state
        .user_service
        .authenticate(&form.email, &form.password)
        .await
        .or_page(lang, &back)?;
    let token = issue_token(&state.config, &user).or_page(lang, &back)?;

    tracing::info!(user_id = %user.id, role = %user.role, "user logged in");
    let jar = jar.add(session_cookie(&state.config, token));
    Ok((jar, Redirect::to(&home_path(lang, &user))).into_response())
}

pub async fn logout(Extension(lang): Extension<Lang>, jar: CookieJar) -> Response {
    let jar = jar.remove(expired_session_cookie());
    (jar, views::account::login_page(lang, Some(lang.t("logged_out")))).into_response()
}

pub async fn register_page(Extension(lang): Extension<Lang>) -> Response {
    views::account::register_page(lang).into_response()
}

pub async fn register(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    Form(form): Form<RegisterForm>,
) -> PageResult {
    let user = state
        .user_service
        .register(&form)
        .await
        .or_page(lang, &lang.path("/register"))?;

    tracing::info!(user_id = %user.id, "account registered");
    let message = format!("{} {}", lang.t("user_added"), user.username);
    Ok(views::account::login_page(lang, Some(&message)).into_response())
}

/// `GET /new_mdp`. Anonymous visitors name their account by e-mail.
pub async fn password_page(Extension(lang): Extension<Lang>, user: Option<CurrentUser>) -> Response {
    views::account::password_page(lang, user.as_ref().map(|u| &u.0), None).into_response()
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    session: Option<CurrentUser>,
    Form(form): Form<PasswordChangeForm>,
) -> PageResult {
    let back = lang.path("/new_mdp");
    let target = match &session {
        Some(CurrentUser(user)) => user.clone(),
        None => {
            let email = form.email.as_deref().unwrap_or_default().trim();
            state
                .user_service
                .find_by_email(email)
                .await
                .or_page(lang, &back)?
                .ok_or(Error::NotFound(Notice::UserNotFound))
                .or_page(lang, &back)?
        }
    };

    state
        .user_service
        .change_password(&target, &form)
        .await
        .or_page(lang, &back)?;
    tracing::info!(user_id = %target.id, "password changed");

    let message = lang.t("password_updated");
    match session {
        Some(CurrentUser(user)) => {
            let memberships = state.user_service.memberships(&user.id).await.or_page(lang, &back)?;
            Ok(views::account::profile_page(lang, &user, &memberships, Some(message)).into_response())
        }
        None => Ok(views::account::login_page(lang, Some(message)).into_response()),
    }
}

pub async fn profile_page(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    CurrentUser(user): CurrentUser,
) -> PageResult {
    let memberships = state
        .user_service
        .memberships(&user.id)
        .await
        .or_page(lang, &home_path(lang, &user))?;
    Ok(views::account::profile_page(lang, &user, &memberships, None).into_response())
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<ProfileForm>,
) -> PageResult {
    let back = lang.path("/profile");
    let updated = state
        .user_service
        .update_profile(&user.id, &form)
        .await
        .or_page(lang, &back)?;
    let memberships = state.user_service.memberships(&updated.id).await.or_page(lang, &back)?;
    Ok(views::account::profile_page(lang, &updated, &memberships, Some(lang.t("profile_updated")))
        .into_response())
}
