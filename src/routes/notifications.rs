use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Form,
};

use crate::dto::dossier_dto::{NotificationForm, PageQuery};
use crate::error::{OrPage, PageResult};
use crate::i18n::Lang;
use crate::middleware::session::{home_path, StaffUser};
use crate::views;
use crate::views::dossiers::{Listing, RowActions};
use crate::AppState;

const PER_PAGE: i64 = 10;

/// `GET /notif/dossier`: dossiers with a link to notify their owner.
pub async fn list(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Query(query): Query<PageQuery>,
) -> PageResult {
    let (page, per_page) = query.resolve(PER_PAGE);
    let dossiers = state
        .dossier_service
        .list(page, per_page)
        .await
        .or_page(lang, &home_path(lang, &user))?;
    let listing = Listing {
        here: "/notif/dossier",
        title_key: "notifications_title",
        search_path: None,
        actions: RowActions::Notify,
        keyword: None,
        intro: None,
    };
    Ok(views::dossiers::listing_page(lang, &user, &listing, &dossiers).into_response())
}

/// `GET /notif/:id/notification`
pub async fn form(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Path(id): Path<String>,
) -> PageResult {
    let back = lang.path("/notif/dossier");
    let dossier = state.dossier_service.get(&id).await.or_page(lang, &back)?;
    let recipient = state
        .notification_service
        .recipient(&id)
        .await
        .or_page(lang, &back)?;
    Ok(views::dossiers::notification_form(lang, &user, &dossier, &recipient, None).into_response())
}

/// `POST /dossier/:id/notification`. Replaces the owner's current message.
pub async fn send(
    State(state): State<AppState>,
    Extension(lang): Extension<Lang>,
    StaffUser(user): StaffUser,
    Path(id): Path<String>,
    Form(form): Form<NotificationForm>,
) -> PageResult {
    let back = lang.path(&format!("/notif/{}/notification", id));
    let dossier = state.dossier_service.get(&id).await.or_page(lang, &back)?;
    let recipient = state
        .notification_service
        .send(&id, &form.message)
        .await
        .or_page(lang, &back)?;
    tracing::info!(dossier_id = %id, recipient = %recipient.id, by = %user.id, "notification sent");
    Ok(
        views::dossiers::notification_form(lang, &user, &dossier, &recipient, Some(lang.t("notification_sent")))
            .into_response(),
    )
}
