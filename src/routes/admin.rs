use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Extension, Form,
};

use crate::dto::admin_dto::{RoleForm, WhitelistForm};
use crate::error::{Error, OrPage, PageResult};
use crate::i18n::{Lang, Notice};
use crate::middleware::session::AdminUser;
use crate::models::user::Role;
use crate::views;
use crate::AppState;

/// `GET /administration`: every account with its whitelist switch.
pub async fn administration(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    AdminUser(admin): AdminUser,
) -> PageResult {
    let users = state
        .user_service
        .list_all()
        .await
        .or_page(lang, &lang.path("/accueilResponsable"))?;
    Ok(views::admin::administration_page(lang, &admin, &users).into_response())
}

pub async fn update_whitelist(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    AdminUser(admin): AdminUser,
    Form(form): Form<WhitelistForm>,
) -> PageResult {
    let back = lang.path("/administration");
    let enabled = form.enabled();
    state
        .user_service
        .set_whitelist(&form.user_id, enabled)
        .await
        .or_page(lang, &back)?;
    tracing::info!(user_id = %form.user_id, whitelist = enabled, by = %admin.id, "whitelist changed");
    Ok(Redirect::to(&back).into_response())
}

/// `GET /admin/users`
pub async fn roles(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    AdminUser(admin): AdminUser,
) -> PageResult {
    let users = state
        .user_service
        .list_all()
        .await
        .or_page(lang, &lang.path("/administration"))?;
    Ok(views::admin::roles_page(lang, &admin, &users).into_response())
}

pub async fn update_role(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    AdminUser(admin): AdminUser,
    Form(form): Form<RoleForm>,
) -> PageResult {
    let back = lang.path("/admin/users");
    let role = Role::parse(&form.role)
        .ok_or(Error::BadRequest(Notice::InvalidRole))
        .or_page(lang, &back)?;
    state
        .user_service
        .set_role(&form.user_id, role)
        .await
        .or_page(lang, &back)?;
    tracing::info!(user_id = %form.user_id, role = role.as_str(), by = %admin.id, "role changed");
    Ok(Redirect::to(&back).into_response())
}
